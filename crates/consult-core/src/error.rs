use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid automation need: {0}")]
    InvalidAutomationNeed(String),
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

/// Raised when the draft could not be handed to the mail handler.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("mail handler rejected request: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
#[error("notification failed: {0}")]
pub struct NotifyError(pub String);
