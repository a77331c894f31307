use thiserror::Error;

pub type Result<T> = std::result::Result<T, RevealError>;

#[derive(Error, Debug)]
pub enum RevealError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown apple type: {0}")]
    UnknownApple(String),

    #[error("Draw service error: {status} {message}")]
    Service { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RevealError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn service(status: u16, msg: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: msg.into(),
        }
    }
}
