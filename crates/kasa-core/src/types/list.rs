//! List query and page types.

use serde::{Deserialize, Serialize};

/// Filter id that means "no filter".
pub const ALL_FILTER: &str = "all";

/// Search, filter and page parameters of one list screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Free-text search as typed.
    pub search: String,
    /// Selected status/type filter, `None` for "all".
    pub filter: Option<String>,
    /// 1-based page number.
    pub page: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter: None,
            page: 1,
        }
    }
}

impl ListQuery {
    /// An unfiltered query for the first page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the filter; `"all"` and blank ids clear it.
    pub fn with_filter(mut self, filter: Option<&str>) -> Self {
        self.filter = normalize_filter(filter);
        self
    }

    /// The same query at another page.
    pub fn at_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Trimmed search term, `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        let trimmed = self.search.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Map a filter id from the UI to the query value.
pub fn normalize_filter(filter: Option<&str>) -> Option<String> {
    filter
        .map(str::trim)
        .filter(|f| !f.is_empty() && !f.eq_ignore_ascii_case(ALL_FILTER))
        .map(str::to_string)
}

/// Pagination metadata returned with a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub last_page: u32,
    #[serde(default)]
    pub total: u64,
}

impl Pagination {
    /// Metadata for a response that was not paginated.
    pub fn single(total: usize) -> Self {
        Self {
            current_page: 1,
            last_page: 1,
            total: total as u64,
        }
    }

    /// Whether a further page exists.
    pub fn has_more(&self) -> bool {
        self.current_page < self.last_page
    }
}

/// One page of a remote list.
#[derive(Clone, Debug, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> ListPage<T> {
    /// A page with explicit pagination metadata.
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }

    /// Convert the items, keeping the pagination.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListPage<U> {
        ListPage {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
