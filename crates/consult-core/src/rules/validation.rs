use std::collections::BTreeMap;
use std::fmt;

use crate::domain::{AutomationNeed, ConsultationForm, ConsultationRequest, EmailAddress, Field};

pub const FIRST_NAME_REQUIRED: &str = "First name is required";
pub const LAST_NAME_REQUIRED: &str = "Last name is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const COMPANY_REQUIRED: &str = "Company name is required";
pub const AUTOMATION_NEEDS_REQUIRED: &str = "Please select your automation needs";
pub const CONSENT_REQUIRED: &str = "You must agree to receive communications";

/// Per-field validation messages, ordered by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    fn insert(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field.name(), message)?;
            first = false;
        }
        Ok(())
    }
}

/// Checks every rule at once so all violations are reported together.
pub fn validate_form(form: &ConsultationForm) -> Result<ConsultationRequest, FieldErrors> {
    let mut errors = FieldErrors::default();

    let first_name = required_text(&form.first_name);
    if first_name.is_none() {
        errors.insert(Field::FirstName, FIRST_NAME_REQUIRED);
    }
    let last_name = required_text(&form.last_name);
    if last_name.is_none() {
        errors.insert(Field::LastName, LAST_NAME_REQUIRED);
    }
    let email = form.email.parse::<EmailAddress>().ok();
    if email.is_none() {
        errors.insert(Field::Email, EMAIL_INVALID);
    }
    let company = required_text(&form.company);
    if company.is_none() {
        errors.insert(Field::Company, COMPANY_REQUIRED);
    }
    let automation_needs = form.automation_needs.parse::<AutomationNeed>().ok();
    if automation_needs.is_none() {
        errors.insert(Field::AutomationNeeds, AUTOMATION_NEEDS_REQUIRED);
    }
    if !form.consent {
        errors.insert(Field::Consent, CONSENT_REQUIRED);
    }

    let (Some(first_name), Some(last_name), Some(email), Some(company), Some(automation_needs), true) =
        (first_name, last_name, email, company, automation_needs, form.consent)
    else {
        return Err(errors);
    };

    Ok(ConsultationRequest::new(
        first_name,
        last_name,
        email,
        optional_text(&form.phone),
        company,
        automation_needs,
        optional_text(&form.message),
    ))
}

fn required_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

fn optional_text(value: &str) -> Option<String> {
    required_text(value)
}
