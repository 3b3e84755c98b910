//! Vehicle draft.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{FormDraft, Section, clean, from_validator, require_text};
use crate::models::{Vehicle, VehicleStatus};
use crate::types::FieldErrors;

/// Create/update request for a vehicle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct VehicleDraft {
    #[validate(length(max = 15, message = "must be at most 15 characters"))]
    pub plate: String,

    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub brand: String,

    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1950, max = 2100, message = "must be between 1950 and 2100"))]
    pub year: Option<i32>,

    #[serde(default)]
    pub status: VehicleStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 5_000_000, message = "must be at most 5,000,000 km"))]
    pub mileage: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_expiry: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub notes: Option<String>,
}

impl FormDraft for VehicleDraft {
    const SECTIONS: &'static [Section] = &[
        Section {
            name: "general",
            fields: &["plate", "brand", "model", "year", "status"],
        },
        Section {
            name: "maintenance",
            fields: &["mileage", "inspection_date", "insurance_expiry"],
        },
        Section {
            name: "notes",
            fields: &["notes"],
        },
    ];

    fn field_errors(&self) -> FieldErrors {
        let draft = self.normalized();
        let mut errors = FieldErrors::new();

        require_text(&mut errors, "plate", &draft.plate);
        require_text(&mut errors, "brand", &draft.brand);
        require_text(&mut errors, "model", &draft.model);

        let compact: String = draft.plate.chars().filter(|c| *c != ' ').collect();
        if !compact.is_empty()
            && (!compact.chars().all(|c| c.is_ascii_alphanumeric())
                || !(5..=10).contains(&compact.len()))
        {
            errors.insert("plate", "must be a valid plate number");
        }

        from_validator(draft.validate(), &mut errors);
        errors
    }

    fn normalized(&self) -> Self {
        Self {
            plate: self
                .plate
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_uppercase(),
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            notes: clean(&self.notes),
            ..self.clone()
        }
    }
}

impl From<&Vehicle> for VehicleDraft {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            plate: vehicle.plate.clone(),
            brand: vehicle.brand.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year,
            status: vehicle.status,
            mileage: vehicle.mileage,
            inspection_date: vehicle.inspection_date,
            insurance_expiry: vehicle.insurance_expiry,
            notes: vehicle.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drafts::validate;

    fn valid() -> VehicleDraft {
        VehicleDraft {
            plate: "34 abc 123".into(),
            brand: "Ford".into(),
            model: "Transit".into(),
            year: Some(2021),
            ..VehicleDraft::default()
        }
    }

    #[test]
    fn plate_is_normalized() {
        let draft = VehicleDraft {
            plate: "  34  abc 123 ".into(),
            ..valid()
        };
        assert_eq!(draft.normalized().plate, "34 ABC 123");
        assert!(validate(&draft).is_empty());
    }

    #[test]
    fn plate_with_symbols_is_rejected() {
        let draft = VehicleDraft {
            plate: "34-AB*12".into(),
            ..valid()
        };
        assert_eq!(
            validate(&draft).get("plate"),
            Some("must be a valid plate number")
        );
    }

    #[test]
    fn year_out_of_range_is_rejected() {
        let draft = VehicleDraft {
            year: Some(1890),
            ..valid()
        };
        let errors = validate(&draft);
        assert_eq!(errors.get("year"), Some("must be between 1950 and 2100"));
        assert_eq!(VehicleDraft::first_invalid_section(&errors), Some("general"));
    }

    #[test]
    fn excessive_mileage_points_to_maintenance() {
        let draft = VehicleDraft {
            mileage: Some(9_000_000),
            ..valid()
        };
        let errors = validate(&draft);
        assert!(errors.contains("mileage"));
        assert_eq!(
            VehicleDraft::first_invalid_section(&errors),
            Some("maintenance")
        );
    }
}
