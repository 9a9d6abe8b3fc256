/// Error types for the assist engine
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Assistant request failed: {0}")]
    RequestFailed(String),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Completion response was empty")]
    EmptyCompletion,
}

pub type Result<T> = std::result::Result<T, AssistError>;
