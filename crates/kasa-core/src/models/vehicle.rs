//! Fleet vehicle entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Id;

/// Operational status of a vehicle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Active,
    InService,
    Inactive,
    Sold,
}

impl VehicleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::InService => "in_service",
            Self::Inactive => "inactive",
            Self::Sold => "sold",
        }
    }
}

/// A vehicle as returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Id,
    pub plate: String,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub status: VehicleStatus,
    #[serde(default)]
    pub mileage: Option<u64>,
    #[serde(default)]
    pub inspection_date: Option<NaiveDate>,
    #[serde(default)]
    pub insurance_expiry: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}
