//! Contact (customer/supplier) entity.

use serde::{Deserialize, Serialize};

use super::NamedRef;
use crate::types::Id;

/// Commercial role of a contact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    #[default]
    Customer,
    Supplier,
    Both,
}

impl ContactKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Supplier => "supplier",
            Self::Both => "both",
        }
    }
}

/// A contact as returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Id,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ContactKind,
    #[serde(default)]
    pub tax_number: Option<String>,
    #[serde(default)]
    pub tax_office: Option<NamedRef>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<NamedRef>,
}
