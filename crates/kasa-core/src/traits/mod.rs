//! Core traits for API access and remote data sources.

mod api;
mod source;

pub use api::Api;
pub use source::{OptionSource, PageSource};
