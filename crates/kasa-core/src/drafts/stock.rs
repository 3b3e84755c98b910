//! Stock movement draft.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{FormDraft, Section, clean, from_validator};
use crate::models::{MovementKind, StockMovement};
use crate::types::{FieldErrors, Id};

/// Create/update request for a stock movement.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct StockMovementDraft {
    #[validate(required(message = "select a product"))]
    pub product_id: Option<Id>,

    #[serde(rename = "type", default)]
    pub kind: MovementKind,

    #[validate(required(message = "is required"))]
    pub quantity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub unit_price: Option<f64>,

    #[validate(required(message = "is required"))]
    pub movement_date: Option<NaiveDate>,

    #[validate(required(message = "select a warehouse"))]
    pub warehouse_id: Option<Id>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_warehouse_id: Option<Id>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub note: Option<String>,
}

impl FormDraft for StockMovementDraft {
    const SECTIONS: &'static [Section] = &[
        Section {
            name: "movement",
            fields: &["product_id", "type", "quantity", "unit_price", "movement_date"],
        },
        Section {
            name: "warehouses",
            fields: &["warehouse_id", "target_warehouse_id"],
        },
        Section {
            name: "notes",
            fields: &["note"],
        },
    ];

    fn field_errors(&self) -> FieldErrors {
        let draft = self.normalized();
        let mut errors = FieldErrors::new();

        from_validator(draft.validate(), &mut errors);

        if let Some(quantity) = draft.quantity {
            match draft.kind {
                // Adjustments may correct stock downwards.
                MovementKind::Adjustment if quantity == 0.0 => {
                    errors.insert("quantity", "must not be zero");
                }
                MovementKind::Adjustment => {}
                _ if quantity <= 0.0 => {
                    errors.insert("quantity", "must be greater than zero");
                }
                _ => {}
            }
        }

        if draft.kind == MovementKind::Transfer {
            match draft.target_warehouse_id {
                None => errors.insert("target_warehouse_id", "is required for transfers"),
                Some(target) if Some(target) == draft.warehouse_id => errors.insert(
                    "target_warehouse_id",
                    "must differ from the source warehouse",
                ),
                Some(_) => {}
            }
        }

        errors
    }

    fn normalized(&self) -> Self {
        Self {
            target_warehouse_id: if self.kind == MovementKind::Transfer {
                self.target_warehouse_id
            } else {
                None
            },
            note: clean(&self.note),
            ..self.clone()
        }
    }
}

impl From<&StockMovement> for StockMovementDraft {
    fn from(movement: &StockMovement) -> Self {
        Self {
            product_id: Some(movement.product.id),
            kind: movement.kind,
            quantity: Some(movement.quantity),
            unit_price: movement.unit_price,
            movement_date: Some(movement.movement_date),
            warehouse_id: Some(movement.warehouse.id),
            target_warehouse_id: movement.target_warehouse.as_ref().map(|w| w.id),
            note: movement.note.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drafts::validate;

    fn valid() -> StockMovementDraft {
        StockMovementDraft {
            product_id: Some(Id::new(1)),
            kind: MovementKind::In,
            quantity: Some(12.0),
            movement_date: NaiveDate::from_ymd_opt(2026, 2, 1),
            warehouse_id: Some(Id::new(2)),
            ..StockMovementDraft::default()
        }
    }

    #[test]
    fn valid_draft_has_no_errors() {
        assert!(validate(&valid()).is_empty());
    }

    #[test]
    fn outgoing_quantity_must_be_positive() {
        let draft = StockMovementDraft {
            kind: MovementKind::Out,
            quantity: Some(-3.0),
            ..valid()
        };
        assert_eq!(
            validate(&draft).get("quantity"),
            Some("must be greater than zero")
        );
    }

    #[test]
    fn adjustment_may_be_negative_but_not_zero() {
        let negative = StockMovementDraft {
            kind: MovementKind::Adjustment,
            quantity: Some(-3.0),
            ..valid()
        };
        assert!(validate(&negative).is_empty());

        let zero = StockMovementDraft {
            quantity: Some(0.0),
            ..negative
        };
        assert_eq!(validate(&zero).get("quantity"), Some("must not be zero"));
    }

    #[test]
    fn transfer_needs_a_distinct_target() {
        let missing = StockMovementDraft {
            kind: MovementKind::Transfer,
            ..valid()
        };
        let errors = validate(&missing);
        assert_eq!(
            errors.get("target_warehouse_id"),
            Some("is required for transfers")
        );
        assert_eq!(
            StockMovementDraft::first_invalid_section(&errors),
            Some("warehouses")
        );

        let same = StockMovementDraft {
            target_warehouse_id: Some(Id::new(2)),
            ..missing
        };
        assert_eq!(
            validate(&same).get("target_warehouse_id"),
            Some("must differ from the source warehouse")
        );
    }

    #[test]
    fn target_is_dropped_for_non_transfers() {
        let draft = StockMovementDraft {
            target_warehouse_id: Some(Id::new(5)),
            ..valid()
        };
        assert_eq!(draft.normalized().target_warehouse_id, None);
    }
}
