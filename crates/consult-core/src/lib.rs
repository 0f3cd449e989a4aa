pub mod domain;
pub mod draft;
pub mod error;
pub mod form;
pub mod notify;
pub mod rules;

pub use domain::*;
pub use draft::{encode_component, EmailDraft, NOT_PROVIDED, NO_ADDITIONAL_MESSAGE};
pub use error::{CoreError, DispatchError, NotifyError};
pub use form::{
    Dispatcher, FormController, FormSettings, FormState, ResetTimer, SubmitOutcome, RESET_DELAY,
};
pub use notify::{Notice, Notifier};
pub use rules::*;
