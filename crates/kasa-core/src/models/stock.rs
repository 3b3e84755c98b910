//! Stock movement entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{NamedRef, decimal, optional_decimal};
use crate::types::Id;

/// Direction of a stock movement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    #[default]
    In,
    Out,
    Transfer,
    Adjustment,
}

impl MovementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Transfer => "transfer",
            Self::Adjustment => "adjustment",
        }
    }
}

/// A stock movement as returned by the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: Id,
    pub product: NamedRef,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    #[serde(deserialize_with = "decimal")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub unit_price: Option<f64>,
    pub movement_date: NaiveDate,
    pub warehouse: NamedRef,
    #[serde(default)]
    pub target_warehouse: Option<NamedRef>,
    #[serde(default)]
    pub note: Option<String>,
}
