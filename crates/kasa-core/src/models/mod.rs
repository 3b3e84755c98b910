//! Entity DTOs mirrored from the API.
//!
//! These are transport shapes only; the server owns identity and integrity.

mod check;
mod contact;
mod stock;
mod vehicle;

pub use check::{Check, CheckDirection, CheckStatus};
pub(crate) use check::default_currency;
pub use contact::{Contact, ContactKind};
pub use stock::{MovementKind, StockMovement};
pub use vehicle::{Vehicle, VehicleStatus};

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::Id;

/// A related entity embedded by id and display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: Id,
    pub name: String,
}

/// Accept decimals sent either as JSON numbers or as strings (`"1500.00"`).
pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimal {
        Number(f64),
        Text(String),
    }

    match Decimal::deserialize(deserializer)? {
        Decimal::Number(n) => Ok(n),
        Decimal::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Optional variant of [`decimal`]; `null` and blank strings become `None`.
pub(crate) fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimal {
        Number(f64),
        Text(String),
    }

    match Option::<Decimal>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Decimal::Number(n)) => Ok(Some(n)),
        Some(Decimal::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Decimal::Text(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}
