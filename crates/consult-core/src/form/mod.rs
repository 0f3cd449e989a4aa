mod timer;

pub use timer::ResetTimer;

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::domain::{ConsultationForm, EmailAddress, Field};
use crate::draft::EmailDraft;
use crate::error::DispatchError;
use crate::notify::{Notice, Notifier};
use crate::rules::FieldErrors;

/// How long the Submitted confirmation stays up before the form resets.
pub const RESET_DELAY: Duration = Duration::from_secs(5);

/// Hands a draft to the platform's mail handler. Fire-and-forget.
pub trait Dispatcher {
    fn dispatch(&self, draft: &EmailDraft) -> Result<(), DispatchError>;
}

impl<T: Dispatcher + ?Sized> Dispatcher for &T {
    fn dispatch(&self, draft: &EmailDraft) -> Result<(), DispatchError> {
        (**self).dispatch(draft)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one field rule failed; see `FormController::errors`.
    Invalid,
    Dispatched(EmailDraft),
    Failed,
    /// Submit arrived while the form was not editable.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct FormSettings {
    pub recipient: EmailAddress,
    pub site_name: String,
}

pub struct FormController<D, N> {
    settings: FormSettings,
    dispatcher: D,
    notifier: N,
    form: ConsultationForm,
    errors: FieldErrors,
    state: FormState,
    reset: ResetTimer,
}

impl<D, N> FormController<D, N>
where
    D: Dispatcher,
    N: Notifier,
{
    pub fn new(settings: FormSettings, dispatcher: D, notifier: N) -> Self {
        Self {
            settings,
            dispatcher,
            notifier,
            form: ConsultationForm::default(),
            errors: FieldErrors::default(),
            state: FormState::Editing,
            reset: ResetTimer::default(),
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn form(&self) -> &ConsultationForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn reset_deadline(&self) -> Option<Instant> {
        self.reset.deadline()
    }

    pub fn reset_remaining(&self, now: Instant) -> Option<Duration> {
        self.reset.remaining(now)
    }

    pub fn is_editable(&self) -> bool {
        self.state == FormState::Editing
    }

    /// Applies an edit to the raw fields. Edits are dropped outside Editing.
    pub fn edit(&mut self, apply: impl FnOnce(&mut ConsultationForm)) -> bool {
        if !self.is_editable() {
            return false;
        }
        apply(&mut self.form);
        true
    }

    pub fn set_text(&mut self, field: Field, value: impl Into<String>) -> bool {
        let value = value.into();
        self.edit(|form| {
            if let Some(target) = form.text_mut(field) {
                *target = value;
            }
        })
    }

    pub fn set_consent(&mut self, consent: bool) -> bool {
        self.edit(|form| form.consent = consent)
    }

    /// Clears fields and errors without going through a submission.
    pub fn clear(&mut self) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.form = ConsultationForm::default();
        self.errors.clear();
        true
    }

    pub fn submit(&mut self, now: Instant) -> SubmitOutcome {
        if !self.is_editable() {
            debug!(state = ?self.state, "submit ignored");
            return SubmitOutcome::Ignored;
        }

        let request = match self.form.validate() {
            Ok(request) => request,
            Err(errors) => {
                debug!(violations = errors.len(), "submission blocked by validation");
                self.errors = errors;
                return SubmitOutcome::Invalid;
            }
        };
        self.errors.clear();
        self.transition(FormState::Submitting);

        let draft = EmailDraft::compose(&request, &self.settings.recipient, &self.settings.site_name);
        match self.dispatcher.dispatch(&draft) {
            Ok(()) => {
                self.transition(FormState::Submitted);
                self.reset.schedule(now + RESET_DELAY);
                self.emit(Notice::RequestPrepared);
                SubmitOutcome::Dispatched(draft)
            }
            Err(err) => {
                warn!(error = %err, "mail handoff failed");
                self.transition(FormState::Editing);
                self.emit(Notice::DispatchFailed {
                    contact: self.settings.recipient.to_string(),
                });
                SubmitOutcome::Failed
            }
        }
    }

    /// Runs the pending auto-reset once its deadline has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.reset.fire(now) {
            return false;
        }
        self.form = ConsultationForm::default();
        self.errors.clear();
        self.transition(FormState::Editing);
        true
    }

    fn transition(&mut self, next: FormState) {
        debug!(from = ?self.state, to = ?next, "form state");
        self.state = next;
    }

    fn emit(&self, notice: Notice) {
        if let Err(err) = self.notifier.notify(&notice) {
            warn!(error = %err, title = notice.title(), "notification not delivered");
        }
    }
}

impl<D, N> Drop for FormController<D, N> {
    fn drop(&mut self) {
        if self.reset.cancel() {
            debug!("pending form reset cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::error::NotifyError;

    #[derive(Default)]
    struct RecordingDispatcher {
        drafts: RefCell<Vec<EmailDraft>>,
        fail: Cell<bool>,
    }

    impl Dispatcher for RecordingDispatcher {
        fn dispatch(&self, draft: &EmailDraft) -> Result<(), DispatchError> {
            if self.fail.get() {
                return Err(DispatchError::Rejected("no mail handler".to_string()));
            }
            self.drafts.borrow_mut().push(draft.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notices: RefCell<Vec<Notice>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: &Notice) -> Result<(), NotifyError> {
            self.notices.borrow_mut().push(notice.clone());
            Ok(())
        }
    }

    struct BrokenNotifier;

    impl Notifier for BrokenNotifier {
        fn notify(&self, _notice: &Notice) -> Result<(), NotifyError> {
            Err(NotifyError("display unavailable".to_string()))
        }
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("log buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_debug_logs(run: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, run);
        let bytes = buffer.0.lock().expect("log buffer").clone();
        String::from_utf8(bytes).expect("utf8 logs")
    }

    fn settings() -> FormSettings {
        FormSettings {
            recipient: "info@landisventures.com".parse().expect("recipient"),
            site_name: "Landis Ventures".to_string(),
        }
    }

    fn controller() -> FormController<RecordingDispatcher, RecordingNotifier> {
        FormController::new(
            settings(),
            RecordingDispatcher::default(),
            RecordingNotifier::default(),
        )
    }

    fn fill_valid<D: Dispatcher, N: Notifier>(controller: &mut FormController<D, N>) {
        controller.set_text(Field::FirstName, "Jane");
        controller.set_text(Field::LastName, "Doe");
        controller.set_text(Field::Email, "jane@acme.com");
        controller.set_text(Field::Company, "Acme Corp");
        controller.set_text(Field::AutomationNeeds, "workflow");
        controller.set_consent(true);
    }

    #[test]
    fn starts_editing_with_empty_form() {
        let controller = controller();
        assert_eq!(controller.state(), FormState::Editing);
        assert!(controller.form().is_empty());
        assert!(controller.errors().is_empty());
        assert_eq!(controller.reset_deadline(), None);
    }

    #[test]
    fn invalid_submit_stays_editing_and_reports_all_errors() {
        let mut controller = controller();
        controller.set_text(Field::FirstName, "Jane");

        let outcome = controller.submit(Instant::now());

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(controller.state(), FormState::Editing);
        assert_eq!(controller.errors().len(), 5);
        assert!(!controller.errors().contains(Field::FirstName));
        assert!(controller.dispatcher().drafts.borrow().is_empty());
        assert!(controller.notifier().notices.borrow().is_empty());
        assert_eq!(controller.form().first_name, "Jane");
    }

    #[test]
    fn valid_submit_dispatches_and_enters_submitted() {
        let mut controller = controller();
        fill_valid(&mut controller);
        let now = Instant::now();

        let outcome = controller.submit(now);

        let SubmitOutcome::Dispatched(draft) = outcome else {
            panic!("expected dispatch, got {outcome:?}");
        };
        assert_eq!(draft.subject, "Consultation Request from Jane Doe - Acme Corp");
        assert!(draft.body.contains("Phone: Not provided"));
        assert!(draft.body.contains("No additional message"));
        assert_eq!(controller.state(), FormState::Submitted);
        assert_eq!(controller.reset_deadline(), Some(now + RESET_DELAY));
        assert_eq!(controller.dispatcher().drafts.borrow().as_slice(), &[draft]);
        assert_eq!(
            controller.notifier().notices.borrow().as_slice(),
            &[Notice::RequestPrepared]
        );
    }

    #[test]
    fn errors_from_a_previous_attempt_clear_on_success() {
        let mut controller = controller();
        assert_eq!(controller.submit(Instant::now()), SubmitOutcome::Invalid);
        assert!(!controller.errors().is_empty());

        fill_valid(&mut controller);
        assert!(matches!(
            controller.submit(Instant::now()),
            SubmitOutcome::Dispatched(_)
        ));
        assert!(controller.errors().is_empty());
    }

    #[test]
    fn resets_exactly_after_delay() {
        let mut controller = controller();
        fill_valid(&mut controller);
        controller.set_text(Field::Message, "Invoices");
        let now = Instant::now();
        assert!(matches!(controller.submit(now), SubmitOutcome::Dispatched(_)));

        assert!(!controller.tick(now + Duration::from_millis(4_999)));
        assert_eq!(controller.state(), FormState::Submitted);
        assert_eq!(controller.form().first_name, "Jane");

        assert!(controller.tick(now + RESET_DELAY));
        assert_eq!(controller.state(), FormState::Editing);
        assert!(controller.form().is_empty());
        assert_eq!(controller.reset_deadline(), None);
        assert!(!controller.tick(now + RESET_DELAY * 2));
    }

    #[test]
    fn submitted_form_rejects_edits_and_resubmits() {
        let mut controller = controller();
        fill_valid(&mut controller);
        let now = Instant::now();
        assert!(matches!(controller.submit(now), SubmitOutcome::Dispatched(_)));

        assert!(!controller.set_text(Field::FirstName, "John"));
        assert!(!controller.set_consent(false));
        assert!(!controller.clear());
        assert_eq!(controller.form().first_name, "Jane");
        assert_eq!(controller.submit(now), SubmitOutcome::Ignored);
        assert_eq!(controller.dispatcher().drafts.borrow().len(), 1);
    }

    #[test]
    fn dispatch_failure_returns_to_editing_and_keeps_fields() {
        let mut controller = controller();
        controller.dispatcher().fail.set(true);
        fill_valid(&mut controller);
        controller.set_text(Field::Phone, "+1 555 0100");
        let before = controller.form().clone();

        let outcome = controller.submit(Instant::now());

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(controller.state(), FormState::Editing);
        assert_eq!(controller.form(), &before);
        assert_eq!(controller.reset_deadline(), None);
        assert_eq!(
            controller.notifier().notices.borrow().as_slice(),
            &[Notice::DispatchFailed {
                contact: "info@landisventures.com".to_string()
            }]
        );

        controller.dispatcher().fail.set(false);
        assert!(matches!(
            controller.submit(Instant::now()),
            SubmitOutcome::Dispatched(_)
        ));
    }

    #[test]
    fn notifier_failure_does_not_change_outcome() {
        let dispatcher = RecordingDispatcher::default();
        let mut controller = FormController::new(settings(), &dispatcher, BrokenNotifier);
        fill_valid(&mut controller);

        assert!(matches!(
            controller.submit(Instant::now()),
            SubmitOutcome::Dispatched(_)
        ));
        assert_eq!(controller.state(), FormState::Submitted);
        drop(controller);
        assert_eq!(dispatcher.drafts.borrow().len(), 1);
    }

    #[test]
    fn clear_resets_fields_and_errors_while_editing() {
        let mut controller = controller();
        controller.set_text(Field::Company, "Acme Corp");
        controller.submit(Instant::now());
        assert!(!controller.errors().is_empty());

        assert!(controller.clear());
        assert!(controller.form().is_empty());
        assert!(controller.errors().is_empty());
    }

    #[test]
    fn dropping_submitted_controller_cancels_pending_reset() {
        let logs = capture_debug_logs(|| {
            let mut controller = controller();
            fill_valid(&mut controller);
            assert!(matches!(
                controller.submit(Instant::now()),
                SubmitOutcome::Dispatched(_)
            ));
            assert!(controller.reset_deadline().is_some());
            drop(controller);
        });
        assert!(logs.contains("form state"));
        assert!(logs.contains("pending form reset cancelled"));
    }

    #[test]
    fn dropping_after_reset_has_nothing_to_cancel() {
        let logs = capture_debug_logs(|| {
            let mut controller = controller();
            fill_valid(&mut controller);
            let now = Instant::now();
            assert!(matches!(controller.submit(now), SubmitOutcome::Dispatched(_)));
            assert!(controller.tick(now + RESET_DELAY));
            drop(controller);
        });
        assert!(logs.contains("form state"));
        assert!(!logs.contains("pending form reset cancelled"));
    }
}
