use thiserror::Error;

#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
