//! Form drafts and their client-side validation rules.
//!
//! A draft is the editable, not-yet-submitted shape of one entity. Each
//! draft is an explicit struct with one field per request key. Single-field
//! rules are declared with `validator` derives; rules that need more than one
//! field (or a trimmed view of a field) are written out by hand.

mod check;
mod contact;
mod stock;
mod vehicle;

pub use check::CheckDraft;
pub use contact::ContactDraft;
pub use stock::StockMovementDraft;
pub use vehicle::VehicleDraft;

use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::ValidationErrors;

use crate::types::FieldErrors;

/// A tab or section of a form and the fields it shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    pub name: &'static str,
    pub fields: &'static [&'static str],
}

/// The editable shape of one entity.
pub trait FormDraft:
    Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Sections of the form in display order.
    const SECTIONS: &'static [Section];

    /// Check the draft. An empty map means the draft may be submitted.
    ///
    /// This is a pure function of the draft's content.
    fn field_errors(&self) -> FieldErrors;

    /// The draft as it should be validated and sent: trimmed, with blank
    /// optional text turned into `None`.
    fn normalized(&self) -> Self {
        self.clone()
    }

    /// First section, in display order, that holds an invalid field.
    fn first_invalid_section(errors: &FieldErrors) -> Option<&'static str> {
        Self::SECTIONS
            .iter()
            .find(|section| section.fields.iter().any(|f| errors.contains(f)))
            .map(|section| section.name)
    }
}

/// Validate a draft, returning the error map (empty when valid).
pub fn validate<D: FormDraft>(draft: &D) -> FieldErrors {
    draft.field_errors()
}

/// First message per field from a `validator` run.
pub(crate) fn from_validator(result: Result<(), ValidationErrors>, errors: &mut FieldErrors) {
    let Err(failed) = result else {
        return;
    };

    for (field, list) in failed.field_errors() {
        if let Some(first) = list.first() {
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| first.code.to_string());
            errors.insert(field.to_string(), message);
        }
    }
}

/// Record "is required" for blank text.
pub(crate) fn require_text(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field, "is required");
    }
}

/// Trim text; blank becomes `None`.
pub(crate) fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
