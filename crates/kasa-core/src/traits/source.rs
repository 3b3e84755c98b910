//! Remote data source traits consumed by the list and select controllers.

use async_trait::async_trait;

use crate::types::{ListPage, ListQuery, SelectOption};
use crate::Result;

/// Something that can fetch one page of a list for a query.
#[async_trait]
pub trait PageSource: Send + Sync + 'static {
    /// Item type of the list.
    type Item: Send + Sync + 'static;

    /// Fetch the page named by `query.page`.
    async fn fetch_page(&self, query: &ListQuery) -> Result<ListPage<Self::Item>>;
}

/// Something that can search selectable options by free text.
#[async_trait]
pub trait OptionSource: Send + Sync + 'static {
    /// Search options; an empty query means unfiltered.
    async fn search(&self, query: &str) -> Result<Vec<SelectOption>>;
}
