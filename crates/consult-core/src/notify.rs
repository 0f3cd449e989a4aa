use crate::error::NotifyError;

pub const REQUEST_PREPARED_TITLE: &str = "Request Prepared";
pub const REQUEST_PREPARED_BODY: &str = "Your email client will open with the consultation request. Please send the email to complete your submission.";
pub const ERROR_TITLE: &str = "Error";

/// Transient user-facing notification emitted by the form controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    RequestPrepared,
    DispatchFailed { contact: String },
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::RequestPrepared => REQUEST_PREPARED_TITLE,
            Notice::DispatchFailed { .. } => ERROR_TITLE,
        }
    }

    pub fn description(&self) -> String {
        match self {
            Notice::RequestPrepared => REQUEST_PREPARED_BODY.to_string(),
            Notice::DispatchFailed { contact } => format!(
                "There was an issue preparing your request. Please contact us directly at {contact}"
            ),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::DispatchFailed { .. })
    }
}

pub trait Notifier {
    fn notify(&self, notice: &Notice) -> Result<(), NotifyError>;
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, notice: &Notice) -> Result<(), NotifyError> {
        (**self).notify(notice)
    }
}
