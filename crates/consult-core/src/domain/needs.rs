use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutomationNeed {
    Rpa,
    Idp,
    Workflow,
    Data,
    Customer,
    Compliance,
    Integration,
    Other,
}

impl AutomationNeed {
    pub const ALL: [AutomationNeed; 8] = [
        AutomationNeed::Rpa,
        AutomationNeed::Idp,
        AutomationNeed::Workflow,
        AutomationNeed::Data,
        AutomationNeed::Customer,
        AutomationNeed::Compliance,
        AutomationNeed::Integration,
        AutomationNeed::Other,
    ];

    pub fn code(self) -> &'static str {
        match self {
            AutomationNeed::Rpa => "rpa",
            AutomationNeed::Idp => "idp",
            AutomationNeed::Workflow => "workflow",
            AutomationNeed::Data => "data",
            AutomationNeed::Customer => "customer",
            AutomationNeed::Compliance => "compliance",
            AutomationNeed::Integration => "integration",
            AutomationNeed::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AutomationNeed::Rpa => "Robotic Process Automation (RPA)",
            AutomationNeed::Idp => "Intelligent Document Processing",
            AutomationNeed::Workflow => "Workflow Automation",
            AutomationNeed::Data => "Data Processing & Analytics",
            AutomationNeed::Customer => "Customer Onboarding",
            AutomationNeed::Compliance => "Compliance & Reporting",
            AutomationNeed::Integration => "System Integration",
            AutomationNeed::Other => "Other / Multiple Areas",
        }
    }
}

impl FromStr for AutomationNeed {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AutomationNeed::ALL
            .into_iter()
            .find(|need| need.code() == s)
            .ok_or_else(|| CoreError::InvalidAutomationNeed(s.to_string()))
    }
}

impl fmt::Display for AutomationNeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
