pub type VitrineResult<T> = Result<T, VitrineError>;

#[derive(thiserror::Error, Debug)]
pub enum VitrineError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("manifest error: {0}")]
    Manifest(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VitrineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn manifest(msg: impl Into<String>) -> Self {
        Self::Manifest(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
