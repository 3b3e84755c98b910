//! Check draft.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{FormDraft, Section, clean, from_validator, require_text};
use crate::models::{Check, CheckDirection, CheckStatus};
use crate::types::{FieldErrors, Id};

/// Create/update request for a check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct CheckDraft {
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub check_number: String,

    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub bank_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub branch: Option<String>,

    #[validate(
        required(message = "is required"),
        range(
            exclusive_min = 0.0,
            max = 1_000_000_000.0,
            message = "must be greater than zero"
        )
    )]
    pub amount: Option<f64>,

    #[validate(length(equal = 3, message = "must be a 3-letter currency code"))]
    pub currency: String,

    #[validate(required(message = "is required"))]
    pub issue_date: Option<NaiveDate>,

    #[validate(required(message = "is required"))]
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    pub direction: CheckDirection,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CheckStatus>,

    #[validate(required(message = "select a contact"))]
    pub contact_id: Option<Id>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub notes: Option<String>,
}

impl Default for CheckDraft {
    fn default() -> Self {
        Self {
            check_number: String::new(),
            bank_name: String::new(),
            branch: None,
            amount: None,
            currency: crate::models::default_currency(),
            issue_date: None,
            due_date: None,
            direction: CheckDirection::default(),
            status: None,
            contact_id: None,
            notes: None,
        }
    }
}

impl FormDraft for CheckDraft {
    const SECTIONS: &'static [Section] = &[
        Section {
            name: "details",
            fields: &["check_number", "bank_name", "branch", "amount", "currency"],
        },
        Section {
            name: "dates",
            fields: &["issue_date", "due_date"],
        },
        Section {
            name: "party",
            fields: &["contact_id", "direction", "status"],
        },
        Section {
            name: "notes",
            fields: &["notes"],
        },
    ];

    fn field_errors(&self) -> FieldErrors {
        let draft = self.normalized();
        let mut errors = FieldErrors::new();

        require_text(&mut errors, "check_number", &draft.check_number);
        require_text(&mut errors, "bank_name", &draft.bank_name);
        from_validator(draft.validate(), &mut errors);

        if let (Some(issue), Some(due)) = (draft.issue_date, draft.due_date)
            && due < issue
        {
            errors.insert("due_date", "must not be earlier than the issue date");
        }

        errors
    }

    fn normalized(&self) -> Self {
        Self {
            check_number: self.check_number.trim().to_string(),
            bank_name: self.bank_name.trim().to_string(),
            branch: clean(&self.branch),
            currency: self.currency.trim().to_uppercase(),
            notes: clean(&self.notes),
            ..self.clone()
        }
    }
}

impl From<&Check> for CheckDraft {
    fn from(check: &Check) -> Self {
        Self {
            check_number: check.check_number.clone(),
            bank_name: check.bank_name.clone(),
            branch: check.branch.clone(),
            amount: Some(check.amount),
            currency: check.currency.clone(),
            issue_date: Some(check.issue_date),
            due_date: Some(check.due_date),
            direction: check.direction,
            status: Some(check.status),
            contact_id: check.contact.as_ref().map(|c| c.id),
            notes: check.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drafts::validate;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn valid() -> CheckDraft {
        CheckDraft {
            check_number: "A-1001".into(),
            bank_name: "Ziraat".into(),
            amount: Some(2500.0),
            issue_date: date(2026, 1, 10),
            due_date: date(2026, 3, 10),
            contact_id: Some(Id::new(9)),
            ..CheckDraft::default()
        }
    }

    #[test]
    fn valid_draft_has_no_errors() {
        assert!(validate(&valid()).is_empty());
    }

    #[test]
    fn due_date_before_issue_date_is_rejected() {
        let draft = CheckDraft {
            due_date: date(2026, 1, 5),
            ..valid()
        };

        let errors = validate(&draft);
        assert_eq!(
            errors.get("due_date"),
            Some("must not be earlier than the issue date")
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(CheckDraft::first_invalid_section(&errors), Some("dates"));
    }

    #[test]
    fn blank_draft_reports_required_fields() {
        let errors = validate(&CheckDraft::default());

        assert_eq!(errors.get("check_number"), Some("is required"));
        assert_eq!(errors.get("bank_name"), Some("is required"));
        assert_eq!(errors.get("amount"), Some("is required"));
        assert_eq!(errors.get("issue_date"), Some("is required"));
        assert_eq!(errors.get("contact_id"), Some("select a contact"));
        assert!(!errors.contains("currency"));
        assert_eq!(CheckDraft::first_invalid_section(&errors), Some("details"));
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let draft = CheckDraft {
            amount: Some(0.0),
            ..valid()
        };
        assert_eq!(
            validate(&draft).get("amount"),
            Some("must be greater than zero")
        );
    }

    #[test]
    fn validation_is_repeatable() {
        let draft = CheckDraft {
            bank_name: "  ".into(),
            due_date: date(2025, 12, 1),
            ..valid()
        };
        assert_eq!(validate(&draft), validate(&draft));
    }

    #[test]
    fn currency_is_normalized_before_checking() {
        let draft = CheckDraft {
            currency: " usd ".into(),
            ..valid()
        };
        assert!(validate(&draft).is_empty());
        assert_eq!(draft.normalized().currency, "USD");
    }
}
