//! Check (çek) entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{NamedRef, decimal};
use crate::types::Id;

/// Lifecycle status of a check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pending,
    Collected,
    Endorsed,
    Bounced,
    Cancelled,
}

impl CheckStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Collected => "collected",
            Self::Endorsed => "endorsed",
            Self::Bounced => "bounced",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Whether the check was received from or issued to the counterparty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckDirection {
    #[default]
    Received,
    Issued,
}

/// A check as returned by the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Check {
    pub id: Id,
    pub check_number: String,
    pub bank_name: String,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(deserialize_with = "decimal")]
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: CheckStatus,
    #[serde(default)]
    pub direction: CheckDirection,
    #[serde(default)]
    pub contact: Option<NamedRef>,
    #[serde(default)]
    pub notes: Option<String>,
}

pub(crate) fn default_currency() -> String {
    "TRY".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_string_amounts() {
        let check: Check = serde_json::from_value(json!({
            "id": 3,
            "check_number": "A-1001",
            "bank_name": "Ziraat",
            "amount": "1500.50",
            "issue_date": "2026-01-10",
            "due_date": "2026-03-10",
            "status": "pending",
            "contact": {"id": 9, "name": "Acme Ltd"}
        }))
        .unwrap();

        assert_eq!(check.amount, 1500.50);
        assert_eq!(check.currency, "TRY");
        assert_eq!(check.direction, CheckDirection::Received);
        assert_eq!(check.contact.unwrap().name, "Acme Ltd");
    }
}
