use thiserror::Error;

pub type Result<T> = std::result::Result<T, SpinError>;

#[derive(Error, Debug)]
pub enum SpinError {
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("A spin is already in progress")]
    SpinInProgress,

    #[error("Invalid wheel state: {0}")]
    InvalidState(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Prize index {index} out of range for catalog of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Wheel has been disposed")]
    Disposed,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SpinError {
    pub fn invalid_email(msg: impl Into<String>) -> Self {
        Self::InvalidEmail(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
