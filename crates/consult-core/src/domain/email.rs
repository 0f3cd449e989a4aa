use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(lettre::Address);

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> lettre::Address {
        self.0
    }
}

impl FromStr for EmailAddress {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidEmail(s.to_string()));
        }
        let address = trimmed
            .parse::<lettre::Address>()
            .map_err(|_| CoreError::InvalidEmail(s.to_string()))?;
        if !is_plain_local_part(address.user()) || !is_dotted_domain(address.domain()) {
            return Err(CoreError::InvalidEmail(s.to_string()));
        }
        Ok(Self(address))
    }
}

/// Unquoted ASCII local part: letters, digits and `_ ' + - .`, with no
/// leading, trailing or doubled dot.
fn is_plain_local_part(user: &str) -> bool {
    let allowed =
        |ch: char| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '\'' | '+' | '-' | '.');
    !user.is_empty()
        && user.chars().all(allowed)
        && !user.starts_with('.')
        && !user.ends_with(['.', '\''])
        && !user.contains("..")
}

/// Hostname with at least two labels and an alphabetic top-level label of
/// two or more letters.
fn is_dotted_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, hosts)) = labels.split_last() else {
        return false;
    };
    !hosts.is_empty()
        && tld.len() >= 2
        && tld.chars().all(|ch| ch.is_ascii_alphabetic())
        && hosts.iter().all(|label| {
            label.starts_with(|ch: char| ch.is_ascii_alphanumeric())
                && label.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
        })
}

impl TryFrom<&str> for EmailAddress {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EmailAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::EmailAddress;

    #[test]
    fn parses_and_trims() {
        let email: EmailAddress = "  jane@acme.com ".parse().expect("valid");
        assert_eq!(email.as_str(), "jane@acme.com");
    }

    #[test]
    fn accepts_common_shapes() {
        for raw in [
            "jane.doe@acme.com",
            "jane+leads@mail.acme.co.uk",
            "o'brien@acme-corp.io",
            "J_Doe@ACME.COM",
        ] {
            assert!(raw.parse::<EmailAddress>().is_ok(), "rejected {raw:?}");
        }
    }

    #[test]
    fn rejects_malformed_shapes() {
        for raw in [
            "",
            "   ",
            "jane",
            "jane@",
            "@acme.com",
            "jane doe@acme.com",
            "jane@acme",
            "jane@localhost",
            "\"j d\"@acme.com",
            "jané@acme.com",
            ".jane@acme.com",
            "jane..doe@acme.com",
            "jane@acme.c",
            "jane@acme.c0m",
            "jane@-acme.com",
            "jane@[127.0.0.1]",
        ] {
            assert!(raw.parse::<EmailAddress>().is_err(), "accepted {raw:?}");
        }
    }
}
