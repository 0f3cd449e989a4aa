use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MailError>;
