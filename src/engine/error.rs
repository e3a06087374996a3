use thiserror::Error;

/// Failures talking to the game server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("invalid server url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("target {0} is not on the game server")]
    ForeignTarget(String),
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },
    #[error("unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

/// Reasons a prompt submission is refused before anything is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no prompt is active")]
    NoActiveSession,
    #[error("prompt {submitted} was replaced by prompt {active}")]
    StaleSession { submitted: u64, active: u64 },
    #[error("{input} input does not fit a {mode} prompt")]
    ModeMismatch { input: &'static str, mode: &'static str },
    #[error("word-fill form has not been loaded yet")]
    FormNotLoaded,
    #[error("expected {expected} word-fill values, got {got}")]
    BlankCountMismatch { expected: usize, got: usize },
}
