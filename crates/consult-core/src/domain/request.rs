use serde::Serialize;

use crate::domain::{AutomationNeed, EmailAddress, Field};
use crate::rules::{validate_form, FieldErrors};

/// Raw, editable values of the consultation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsultationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub automation_needs: String,
    pub message: String,
    pub consent: bool,
}

impl ConsultationForm {
    /// Text value of a field; `None` for the consent checkbox.
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::FirstName => Some(&self.first_name),
            Field::LastName => Some(&self.last_name),
            Field::Email => Some(&self.email),
            Field::Phone => Some(&self.phone),
            Field::Company => Some(&self.company),
            Field::AutomationNeeds => Some(&self.automation_needs),
            Field::Message => Some(&self.message),
            Field::Consent => None,
        }
    }

    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::FirstName => Some(&mut self.first_name),
            Field::LastName => Some(&mut self.last_name),
            Field::Email => Some(&mut self.email),
            Field::Phone => Some(&mut self.phone),
            Field::Company => Some(&mut self.company),
            Field::AutomationNeeds => Some(&mut self.automation_needs),
            Field::Message => Some(&mut self.message),
            Field::Consent => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<ConsultationRequest, FieldErrors> {
        validate_form(self)
    }
}

/// A request that passed every field rule. Only produced by validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationRequest {
    first_name: String,
    last_name: String,
    email: EmailAddress,
    phone: Option<String>,
    company: String,
    automation_needs: AutomationNeed,
    message: Option<String>,
}

impl ConsultationRequest {
    pub(crate) fn new(
        first_name: String,
        last_name: String,
        email: EmailAddress,
        phone: Option<String>,
        company: String,
        automation_needs: AutomationNeed,
        message: Option<String>,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            phone,
            company,
            automation_needs,
            message,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn automation_needs(&self) -> AutomationNeed {
        self.automation_needs
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
