//! kasa-core - Core types, drafts and traits for the kasa client.

pub mod drafts;
pub mod error;
pub mod models;
pub mod resource;
pub mod traits;
pub mod types;

pub use drafts::{CheckDraft, ContactDraft, FormDraft, Section, StockMovementDraft, VehicleDraft};
pub use error::{ApiError, Error, InvalidInputError, TransportError};
pub use models::{Check, Contact, StockMovement, Vehicle};
pub use resource::{Checks, Contacts, Resource, StockMovements, Vehicles};
pub use traits::{Api, OptionSource, PageSource};
pub use types::{
    BaseUrl, FieldErrors, Id, ListPage, ListQuery, OptionValue, Pagination, SelectOption,
};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
