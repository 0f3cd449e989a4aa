use std::cell::RefCell;
use std::time::{Duration, Instant};

use consult_core::{Notice, Notifier, NotifyError};

pub const TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: &'static str,
    pub description: String,
    pub is_error: bool,
    pub expires_at: Instant,
}

/// Keeps the most recent notice on screen until it expires.
#[derive(Debug, Default)]
pub struct ToastNotifier {
    slot: RefCell<Option<Toast>>,
}

impl ToastNotifier {
    pub fn current(&self) -> Option<Toast> {
        self.slot.borrow().clone()
    }

    pub fn expire(&self, now: Instant) {
        let mut slot = self.slot.borrow_mut();
        if matches!(slot.as_ref(), Some(toast) if now >= toast.expires_at) {
            *slot = None;
        }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), NotifyError> {
        *self.slot.borrow_mut() = Some(Toast {
            title: notice.title(),
            description: notice.description(),
            is_error: notice.is_error(),
            expires_at: Instant::now() + TOAST_TTL,
        });
        Ok(())
    }
}
