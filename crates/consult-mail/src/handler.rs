use std::cell::RefCell;
use std::io::{self, Write};

use consult_core::{DispatchError, Dispatcher, EmailDraft};
use tracing::debug;

/// Opens the mailto URL with the platform's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemMailHandler;

impl Dispatcher for SystemMailHandler {
    fn dispatch(&self, draft: &EmailDraft) -> Result<(), DispatchError> {
        let url = draft.mailto_url();
        debug!(recipient = %draft.recipient, bytes = url.len(), "opening mail handler");
        open::that(&url)?;
        Ok(())
    }
}

/// Writes the mailto URL instead of opening it.
pub struct PrintHandler<W> {
    out: RefCell<W>,
}

impl<W: Write> PrintHandler<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> Dispatcher for PrintHandler<W> {
    fn dispatch(&self, draft: &EmailDraft) -> Result<(), DispatchError> {
        let mut out = self.out.borrow_mut();
        writeln!(out, "{}", draft.mailto_url())?;
        out.flush()?;
        Ok(())
    }
}

pub enum MailHandler {
    System(SystemMailHandler),
    Print(PrintHandler<Box<dyn Write>>),
}

impl MailHandler {
    pub fn system() -> Self {
        Self::System(SystemMailHandler)
    }

    pub fn print() -> Self {
        Self::print_to(Box::new(io::stdout()))
    }

    pub fn print_to(out: Box<dyn Write>) -> Self {
        Self::Print(PrintHandler::new(out))
    }
}

impl Dispatcher for MailHandler {
    fn dispatch(&self, draft: &EmailDraft) -> Result<(), DispatchError> {
        match self {
            MailHandler::System(handler) => handler.dispatch(draft),
            MailHandler::Print(handler) => handler.dispatch(draft),
        }
    }
}
