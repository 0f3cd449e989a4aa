use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Company,
    AutomationNeeds,
    Message,
    Consent,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Phone,
        Field::Company,
        Field::AutomationNeeds,
        Field::Message,
        Field::Consent,
    ];

    /// Wire name of the field, as used in JSON output.
    pub fn name(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Company => "company",
            Field::AutomationNeeds => "automationNeeds",
            Field::Message => "message",
            Field::Consent => "consent",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email Address",
            Field::Phone => "Phone Number",
            Field::Company => "Company Name",
            Field::AutomationNeeds => "Primary Automation Interest",
            Field::Message => "Additional Details",
            Field::Consent => "Consent",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, Field::Phone | Field::Message)
    }
}
