//! Error types for the engine client

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Failed to connect to Docker Engine: {0}")]
    Connection(String),

    #[error("Docker Engine returned {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Failed to decode Engine response: {0}")]
    Decode(String),

    #[error("Engine response is missing the `{0}` field")]
    MissingField(&'static str),

    #[error("Invalid engine configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
