//! Contact draft.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{FormDraft, Section, clean, from_validator, require_text};
use crate::models::{Contact, ContactKind};
use crate::types::{FieldErrors, Id};

/// Create/update request for a contact.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContactDraft {
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: ContactKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_office_id: Option<Id>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 20, message = "must be at most 20 characters"))]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_id: Option<Id>,
}

impl FormDraft for ContactDraft {
    const SECTIONS: &'static [Section] = &[
        Section {
            name: "general",
            fields: &["name", "type", "email", "phone"],
        },
        Section {
            name: "tax",
            fields: &["tax_number", "tax_office_id"],
        },
        Section {
            name: "address",
            fields: &["address", "city_id"],
        },
    ];

    fn field_errors(&self) -> FieldErrors {
        let draft = self.normalized();
        let mut errors = FieldErrors::new();

        require_text(&mut errors, "name", &draft.name);
        from_validator(draft.validate(), &mut errors);

        if let Some(tax_number) = &draft.tax_number {
            // 10 digits for companies, 11 for individuals.
            let digits = tax_number.chars().all(|c| c.is_ascii_digit());
            if !digits || !(10..=11).contains(&tax_number.len()) {
                errors.insert("tax_number", "must be 10 or 11 digits");
            }
            if draft.tax_office_id.is_none() {
                errors.insert("tax_office_id", "is required when a tax number is given");
            }
        }

        errors
    }

    fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            tax_number: clean(&self.tax_number).map(|t| t.replace(' ', "")),
            email: clean(&self.email).map(|e| e.to_lowercase()),
            phone: clean(&self.phone),
            address: clean(&self.address),
            ..self.clone()
        }
    }
}

impl From<&Contact> for ContactDraft {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            kind: contact.kind,
            tax_number: contact.tax_number.clone(),
            tax_office_id: contact.tax_office.as_ref().map(|t| t.id),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            address: contact.address.clone(),
            city_id: contact.city.as_ref().map(|c| c.id),
        }
    }
}
