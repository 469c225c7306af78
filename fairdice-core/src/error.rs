use thiserror::Error;

pub type Result<T> = std::result::Result<T, FairDiceError>;

#[derive(Error, Debug)]
pub enum FairDiceError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Secure randomness unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("Protocol state error: {0}")]
    ProtocolState(String),

    #[error("Invalid encoding: {0}")]
    Encoding(String),

    #[error("Invalid range: {0} (must be at least 1)")]
    InvalidRange(u64),

    #[error("Game aborted by player")]
    Aborted,

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FairDiceError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn entropy(msg: impl Into<String>) -> Self {
        Self::EntropyUnavailable(msg.into())
    }

    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::ProtocolState(msg.into())
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    pub fn dialog(msg: impl Into<String>) -> Self {
        Self::Dialog(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<rand::Error> for FairDiceError {
    fn from(err: rand::Error) -> Self {
        FairDiceError::entropy(err.to_string())
    }
}
