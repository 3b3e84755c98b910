//! Core kasa types.
//!
//! Validated values are checked at construction time so the rest of the
//! client can pass them around without re-checking.

mod base_url;
mod field_errors;
mod id;
mod list;
mod select;

pub use base_url::BaseUrl;
pub use field_errors::FieldErrors;
pub use id::Id;
pub use list::{ALL_FILTER, ListPage, ListQuery, Pagination, normalize_filter};
pub use select::{OptionValue, SelectOption};
