use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::domain::{ConsultationRequest, EmailAddress};

pub const NOT_PROVIDED: &str = "Not provided";
pub const NO_ADDITIONAL_MESSAGE: &str = "No additional message";

/// Bytes left alone by a URI component encoder.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Outgoing message derived from a validated request. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailDraft {
    pub recipient: EmailAddress,
    pub subject: String,
    pub body: String,
}

impl EmailDraft {
    pub fn compose(request: &ConsultationRequest, recipient: &EmailAddress, site_name: &str) -> Self {
        Self {
            recipient: recipient.clone(),
            subject: subject_for(request),
            body: body_for(request, site_name),
        }
    }

    pub fn mailto_url(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            encode_component(&self.subject),
            encode_component(&self.body)
        )
    }
}

pub fn subject_for(request: &ConsultationRequest) -> String {
    format!(
        "Consultation Request from {} - {}",
        request.full_name(),
        request.company()
    )
}

pub fn body_for(request: &ConsultationRequest, site_name: &str) -> String {
    let lines = [
        "New Consultation Request:".to_string(),
        String::new(),
        format!("Name: {}", request.full_name()),
        format!("Email: {}", request.email()),
        format!("Phone: {}", request.phone().unwrap_or(NOT_PROVIDED)),
        format!("Company: {}", request.company()),
        format!("Automation Needs: {}", request.automation_needs()),
        String::new(),
        "Message:".to_string(),
        request.message().unwrap_or(NO_ADDITIONAL_MESSAGE).to_string(),
        String::new(),
        format!("This inquiry was submitted through the {site_name} website."),
    ];
    lines.join("\n")
}

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}
