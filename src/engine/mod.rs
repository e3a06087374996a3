pub mod directive_parser;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod game_client;
pub mod orchestrator;
pub mod protocol;
pub mod reconciler;
pub mod ticker;
pub mod word_fill;
