pub mod directive;
pub mod game_view;
pub mod history;
pub mod payloads;
pub mod prompt;
pub mod round;
