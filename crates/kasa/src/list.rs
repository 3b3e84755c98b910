//! Paginated list controller.
//!
//! One controller backs one list screen. It owns the query (search text,
//! filter, page), issues fetches through a [`PageSource`], merges pages and
//! publishes the result through a [`watch`] channel the UI renders from.
//!
//! Every fetch mints a [`Generation`] before it starts and may only write
//! state while that generation is still the latest. Spawned tasks hold a
//! weak reference to the controller, so nothing is written once it is
//! unmounted.

use std::sync::{Arc, Weak};
use std::time::Duration;

use kasa_core::types::normalize_filter;
use kasa_core::{ListPage, ListQuery, PageSource, Pagination, Result};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::debounce::Debouncer;
use crate::generation::{Generation, GenerationCounter};

/// Quiet period before a search text change is fetched.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Items requested per page.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Tuning of a [`ListController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListConfig {
    pub search_debounce: Duration,
    pub per_page: u32,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Which indicator the UI should show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    /// Full-screen spinner: first load or a new search/filter.
    Loading,
    /// Pull-to-refresh indicator.
    Refreshing,
    /// Footer spinner below the last item.
    LoadingMore,
}

/// Observable state of a list screen.
#[derive(Clone, Debug, PartialEq)]
pub struct ListState<T> {
    pub query: ListQuery,
    pub items: Vec<T>,
    /// Pagination of the last applied page, `None` before the first one.
    pub pagination: Option<Pagination>,
    pub status: LoadStatus,
    /// Message of the last failed fetch; cleared by the next success.
    pub error: Option<String>,
    /// Whether the latest fetch has not answered yet.
    pub in_flight: bool,
}

impl<T> ListState<T> {
    fn new(query: ListQuery) -> Self {
        Self {
            query,
            items: Vec::new(),
            pagination: None,
            status: LoadStatus::Idle,
            error: None,
            in_flight: false,
        }
    }

    /// Whether another page exists past the loaded ones.
    pub fn has_more(&self) -> bool {
        self.pagination.is_some_and(|p| p.has_more())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FetchKind {
    /// Page 1 with the full spinner.
    Load,
    /// Page 1 with the pull-to-refresh indicator.
    Refresh,
    /// Page 1 with no indicator at all.
    Silent,
    /// Next page, appended.
    More,
}

impl FetchKind {
    fn status(self) -> Option<LoadStatus> {
        match self {
            Self::Load => Some(LoadStatus::Loading),
            Self::Refresh => Some(LoadStatus::Refreshing),
            Self::Silent => None,
            Self::More => Some(LoadStatus::LoadingMore),
        }
    }
}

/// Controller of one paginated list screen.
///
/// Methods are synchronous and must be called inside a Tokio runtime. Those
/// that fetch return the [`JoinHandle`] of the spawned fetch; awaiting it
/// is optional.
pub struct ListController<S: PageSource> {
    inner: Arc<Inner<S>>,
}

struct Inner<S: PageSource> {
    source: Arc<S>,
    config: ListConfig,
    state: watch::Sender<ListState<S::Item>>,
    generations: GenerationCounter,
    search: Debouncer,
}

impl<S> ListController<S>
where
    S: PageSource,
    S::Item: Clone,
{
    /// Create a controller with an empty query. Nothing is fetched until
    /// [`load`](Self::load).
    pub fn new(source: S, config: ListConfig) -> Self {
        Self::with_query(source, config, ListQuery::new())
    }

    /// Create a controller starting from a given search and filter.
    pub fn with_query(source: S, config: ListConfig, query: ListQuery) -> Self {
        let query = ListQuery {
            filter: normalize_filter(query.filter.as_deref()),
            page: 1,
            ..query
        };
        let (state, _) = watch::channel(ListState::new(query));

        Self {
            inner: Arc::new(Inner {
                source: Arc::new(source),
                config,
                state,
                generations: GenerationCounter::new(),
                search: Debouncer::new(),
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ListState<S::Item> {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every applied state change.
    pub fn subscribe(&self) -> watch::Receiver<ListState<S::Item>> {
        self.inner.state.subscribe()
    }

    pub fn config(&self) -> ListConfig {
        self.inner.config
    }

    /// First fetch when the screen mounts.
    pub fn load(&self) -> JoinHandle<()> {
        self.inner.start(FetchKind::Load)
    }

    /// Update the search text and fetch page 1 once typing pauses.
    ///
    /// Each call restarts the quiet period, so a burst of keystrokes leads
    /// to one fetch carrying the final text. Unchanged text does nothing.
    pub fn set_search_text(&self, text: impl Into<String>) {
        let text = text.into();
        let changed = self.inner.state.send_if_modified(|state| {
            if state.query.search == text {
                return false;
            }
            state.query.search = text;
            true
        });
        if !changed {
            return;
        }

        let weak = Arc::downgrade(&self.inner);
        self.inner
            .search
            .schedule(self.inner.config.search_debounce, move || {
                if let Some(inner) = weak.upgrade() {
                    inner.start(FetchKind::Load);
                }
            });
    }

    /// Change the filter and fetch page 1 right away.
    ///
    /// `"all"` and blank ids clear the filter. Returns `None` when the
    /// filter did not change.
    pub fn set_filter(&self, filter: Option<&str>) -> Option<JoinHandle<()>> {
        let filter = normalize_filter(filter);
        let changed = self.inner.state.send_if_modified(|state| {
            if state.query.filter == filter {
                return false;
            }
            state.query.filter = filter;
            true
        });
        changed.then(|| self.inner.start(FetchKind::Load))
    }

    /// Pull-to-refresh: fetch page 1 again for the current query.
    pub fn refresh(&self) -> JoinHandle<()> {
        self.inner.start(FetchKind::Refresh)
    }

    /// Fetch the next page and append it.
    ///
    /// Does nothing while any fetch is in flight, while a search change is
    /// still debouncing, before the first page arrived, or when the last
    /// page is already loaded.
    pub fn load_more(&self) -> Option<JoinHandle<()>> {
        // The query already holds the new search text; its next page would
        // be appended to the previous search's items.
        if self.inner.search.is_pending() {
            debug!("Ignoring load more while a search is pending");
            return None;
        }
        {
            let state = self.inner.state.borrow();
            if state.in_flight || !state.has_more() {
                debug!(
                    in_flight = state.in_flight,
                    has_more = state.has_more(),
                    "Ignoring load more"
                );
                return None;
            }
        }
        Some(self.inner.start(FetchKind::More))
    }

    /// The screen regained focus: refetch page 1 without any indicator.
    pub fn on_screen_refocus(&self) -> JoinHandle<()> {
        self.inner.start(FetchKind::Silent)
    }

    /// Whether a search fetch is waiting for typing to pause.
    pub fn search_pending(&self) -> bool {
        self.inner.search.is_pending()
    }

    /// Tear the controller down.
    ///
    /// The pending search timer is cancelled and responses still in flight
    /// are discarded when they arrive.
    pub fn unmount(self) {
        self.inner.search.cancel();
        debug!("List controller unmounted");
    }
}

impl<S> Inner<S>
where
    S: PageSource,
    S::Item: Clone,
{
    fn start(self: &Arc<Self>, kind: FetchKind) -> JoinHandle<()> {
        if kind != FetchKind::More {
            // Page 1 fetches already carry the latest search text.
            self.search.cancel();
        }

        let token = self.generations.mint();
        let mut query = ListQuery::new();
        self.state.send_modify(|state| {
            query = match kind {
                FetchKind::More => {
                    let next = state.pagination.map_or(1, |p| p.current_page) + 1;
                    state.query.at_page(next)
                }
                _ => state.query.at_page(1),
            };
            if let Some(status) = kind.status() {
                state.status = status;
            }
            state.in_flight = true;
        });
        debug!(%token, ?kind, page = query.page, search = %query.search, "Fetching list page");

        let source = Arc::clone(&self.source);
        let weak: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let result = source.fetch_page(&query).await;
            match weak.upgrade() {
                Some(inner) => inner.apply(token, kind, query, result),
                None => debug!(%token, "Discarding list response after unmount"),
            }
        })
    }

    fn apply(
        &self,
        token: Generation,
        kind: FetchKind,
        query: ListQuery,
        result: Result<ListPage<S::Item>>,
    ) {
        if !self.generations.is_current(token) {
            debug!(%token, ?kind, "Dropping stale list response");
            return;
        }

        self.state.send_modify(|state| {
            state.in_flight = false;
            state.status = LoadStatus::Idle;

            match result {
                Ok(page) => {
                    debug!(%token, count = page.items.len(), page = query.page, "Applying list page");
                    if kind == FetchKind::More {
                        state.items.extend(page.items);
                    } else {
                        state.items = page.items;
                    }
                    state.pagination = Some(page.pagination);
                    state.query.page = query.page;
                    state.error = None;
                }
                Err(error) => {
                    warn!(%token, ?kind, %error, "List fetch failed");
                    if kind == FetchKind::Load {
                        state.items.clear();
                        state.pagination = None;
                    }
                    state.error = Some(error.to_string());
                }
            }
        });
    }
}

impl<S: PageSource> std::fmt::Debug for ListController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("config", &self.inner.config)
            .field("generation", &self.inner.generations.latest())
            .finish_non_exhaustive()
    }
}
