pub mod app;
pub mod board_panel;
pub mod history_panel;
pub mod prompt_panel;
pub mod settings;
pub mod settings_io;
pub mod settings_panel;
