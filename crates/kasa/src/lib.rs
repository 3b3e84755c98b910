//! kasa - Screen controllers for the kasa business-management client.
//!
//! The controllers hold the state a screen renders and talk to the API
//! through the [`PageSource`](kasa_core::PageSource) and
//! [`OptionSource`](kasa_core::OptionSource) traits, so tests can swap the
//! network for scripted sources.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use kasa::{ListConfig, ListController, RemoteList};
//! use kasa_core::{BaseUrl, Checks};
//! use kasa_http::HttpApi;
//!
//! # async fn example() -> Result<(), kasa_core::Error> {
//! let api = Arc::new(HttpApi::new(BaseUrl::new("https://erp.example.com/api")?)?);
//! let config = ListConfig::default();
//! let checks = ListController::new(RemoteList::<Checks, _>::new(api, config.per_page), config);
//!
//! checks.load().await.ok();
//! checks.set_filter(Some("pending"));
//! for check in checks.state().items {
//!     println!("{} {}", check.check_number, check.amount);
//! }
//! # Ok(())
//! # }
//! ```

pub mod debounce;
pub mod form;
pub mod generation;
pub mod list;
pub mod select;
pub mod source;

pub use debounce::Debouncer;
pub use form::{FormController, SubmitError};
pub use generation::{Generation, GenerationCounter};
pub use list::{ListConfig, ListController, ListState, LoadStatus};
pub use select::{SelectConfig, SelectController, SelectState, SelectStatus, SelectionChange};
pub use source::{OptionCatalog, RemoteList, RemoteOptions};
