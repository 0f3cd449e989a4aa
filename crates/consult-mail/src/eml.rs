use std::fs;
use std::path::Path;

use consult_core::{ConsultationRequest, EmailDraft};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::Message;

use crate::error::Result;

/// Renders the draft as an RFC 5322 message from the requester to the recipient.
pub fn render_eml(request: &ConsultationRequest, draft: &EmailDraft) -> Result<Vec<u8>> {
    let from = Mailbox::new(Some(request.full_name()), request.email().clone().into_inner());
    let to = Mailbox::new(None, draft.recipient.clone().into_inner());
    let message = Message::builder()
        .from(from.clone())
        .reply_to(from)
        .to(to)
        .subject(draft.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(draft.body.clone())?;
    Ok(message.formatted())
}

pub fn write_eml(path: &Path, request: &ConsultationRequest, draft: &EmailDraft) -> Result<()> {
    let bytes = render_eml(request, draft)?;
    fs::write(path, bytes)?;
    Ok(())
}
