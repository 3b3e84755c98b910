//! Remote-backed select controller.
//!
//! Backs searchable selects, autocompletes and the address/tax-office
//! pickers: the user opens an overlay, types to search a remote catalog
//! and picks one option. Fetch failures stay inside the controller and only
//! show up as [`SelectStatus::Failed`].

use std::sync::{Arc, Weak};
use std::time::Duration;

use kasa_core::{OptionSource, OptionValue, Result, SelectOption};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::debounce::Debouncer;
use crate::generation::{Generation, GenerationCounter};

/// Quiet period before a query change is searched.
pub const DEFAULT_QUERY_DEBOUNCE: Duration = Duration::from_millis(300);

/// Tuning of a [`SelectController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectConfig {
    pub debounce: Duration,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_QUERY_DEBOUNCE,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// The search succeeded without matches.
    Empty,
    /// The search failed; options were cleared.
    Failed,
}

/// Observable state of a select.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectState {
    /// Whether the overlay is shown.
    pub open: bool,
    pub query: String,
    pub options: Vec<SelectOption>,
    pub status: SelectStatus,
    /// Whether `options` answer the current query.
    pub loaded: bool,
    pub selected: Option<SelectOption>,
}

/// What the consumer is told when the selection changes.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionChange {
    Selected {
        value: OptionValue,
        option: SelectOption,
    },
    Cleared,
}

type OnChange = Box<dyn Fn(SelectionChange) + Send + Sync>;

/// Controller of one remote-backed select.
///
/// Methods are synchronous and must be called inside a Tokio runtime.
pub struct SelectController<S: OptionSource> {
    inner: Arc<Inner<S>>,
}

struct Inner<S: OptionSource> {
    source: Arc<S>,
    config: SelectConfig,
    state: watch::Sender<SelectState>,
    generations: GenerationCounter,
    query: Debouncer,
    on_change: Option<OnChange>,
}

impl<S: OptionSource> SelectController<S> {
    pub fn new(source: S, config: SelectConfig) -> Self {
        Self::build(source, config, None)
    }

    /// Create a controller that reports selection changes to `on_change`.
    pub fn with_on_change<F>(source: S, config: SelectConfig, on_change: F) -> Self
    where
        F: Fn(SelectionChange) + Send + Sync + 'static,
    {
        Self::build(source, config, Some(Box::new(on_change)))
    }

    fn build(source: S, config: SelectConfig, on_change: Option<OnChange>) -> Self {
        let (state, _) = watch::channel(SelectState::default());
        Self {
            inner: Arc::new(Inner {
                source: Arc::new(source),
                config,
                state,
                generations: GenerationCounter::new(),
                query: Debouncer::new(),
                on_change,
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SelectState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SelectState> {
        self.inner.state.subscribe()
    }

    /// Show the overlay, searching the current query if its options are
    /// not loaded yet.
    pub fn open(&self) -> Option<JoinHandle<()>> {
        let mut needs_fetch = false;
        self.inner.state.send_if_modified(|state| {
            needs_fetch = !state.loaded && state.status != SelectStatus::Loading;
            let changed = !state.open;
            state.open = true;
            changed
        });
        needs_fetch.then(|| self.inner.fetch(None))
    }

    /// Hide the overlay without selecting anything.
    pub fn close(&self) {
        self.inner.query.cancel();
        self.inner.state.send_if_modified(|state| {
            let changed = state.open;
            state.open = false;
            changed
        });
    }

    /// Update the query; it is searched once typing pauses, if the overlay
    /// is still open by then.
    pub fn on_query_change(&self, text: impl Into<String>) {
        let text = text.into();
        self.inner.state.send_if_modified(|state| {
            if state.query == text {
                return false;
            }
            state.query = text;
            state.loaded = false;
            true
        });

        let weak = Arc::downgrade(&self.inner);
        self.inner.query.schedule(self.inner.config.debounce, move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if inner.state.borrow().open {
                inner.fetch(None);
            } else {
                debug!("Select closed before its query was searched");
            }
        });
    }

    /// Search `text` immediately, skipping the quiet period.
    pub fn search_now(&self, text: impl Into<String>) -> JoinHandle<()> {
        let text = text.into();
        self.inner.state.send_if_modified(|state| {
            let changed = state.query != text;
            state.query = text;
            changed
        });
        self.inner.fetch(None)
    }

    /// Commit `option`, close the overlay and tell the consumer.
    pub fn select(&self, option: SelectOption) {
        self.inner.query.cancel();
        self.inner.state.send_modify(|state| {
            state.selected = Some(option.clone());
            state.open = false;
        });
        self.inner.notify(SelectionChange::Selected {
            value: option.value.clone(),
            option,
        });
    }

    /// Reset the selection and query, and tell the consumer.
    pub fn clear(&self) {
        self.inner.query.cancel();
        self.inner.state.send_modify(|state| {
            state.selected = None;
            if !state.query.is_empty() {
                state.query.clear();
                state.loaded = false;
            }
        });
        self.inner.notify(SelectionChange::Cleared);
    }

    /// Show an externally provided value, e.g. when editing a saved entity.
    ///
    /// When the loaded options contain the value its option is used as is.
    /// Otherwise the raw value is shown right away and, if nothing is loaded
    /// yet, one unfiltered search tries to resolve its label. The consumer
    /// is not notified.
    pub fn set_value(&self, value: Option<OptionValue>) -> Option<JoinHandle<()>> {
        let Some(value) = value else {
            self.inner.state.send_modify(|state| state.selected = None);
            return None;
        };

        let mut loaded = false;
        self.inner.state.send_modify(|state| {
            loaded = state.loaded;
            let known = state.options.iter().find(|o| o.value == value).cloned();
            state.selected = Some(known.unwrap_or_else(|| SelectOption::unresolved(value.clone())));
        });

        (!loaded).then(|| self.inner.fetch(Some(value)))
    }

    /// Tear the controller down; late responses are discarded.
    pub fn unmount(self) {
        self.inner.query.cancel();
        debug!("Select controller unmounted");
    }
}

impl<S: OptionSource> Inner<S> {
    /// Search the current query, or the unfiltered catalog when resolving
    /// a prefilled value.
    ///
    /// A resolving fetch only takes over the option list while the query is
    /// empty. Otherwise it leaves the typed search alone and just resolves
    /// the label.
    fn fetch(self: &Arc<Self>, resolve: Option<OptionValue>) -> JoinHandle<()> {
        if resolve.is_none() {
            self.query.cancel();
        }

        let mut text = String::new();
        let mut owns_list = true;
        self.state.send_modify(|state| {
            if resolve.is_none() {
                text = state.query.clone();
            } else {
                owns_list = state.query.is_empty();
            }
            if owns_list {
                state.status = SelectStatus::Loading;
            }
        });
        let token = owns_list.then(|| self.generations.mint());
        debug!(token = ?token, query = %text, resolving = resolve.is_some(), "Searching options");

        let source = Arc::clone(&self.source);
        let weak: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let result = source.search(&text).await;
            match weak.upgrade() {
                Some(inner) => inner.apply(token, text, resolve, result),
                None => debug!(token = ?token, "Discarding options after unmount"),
            }
        })
    }

    fn apply(
        &self,
        token: Option<Generation>,
        text: String,
        resolve: Option<OptionValue>,
        result: Result<Vec<SelectOption>>,
    ) {
        if let (Some(value), Ok(options)) = (&resolve, &result) {
            // The label is resolved even if a newer search owns the list.
            if let Some(found) = options.iter().find(|o| &o.value == value) {
                self.state.send_if_modified(|state| {
                    let unresolved = state
                        .selected
                        .as_ref()
                        .is_some_and(|s| &s.value == value && s != found);
                    if unresolved {
                        state.selected = Some(found.clone());
                    }
                    unresolved
                });
            }
        }

        let Some(token) = token else {
            debug!("Prefill lookup done; the typed search keeps the list");
            return;
        };
        if !self.generations.is_current(token) {
            debug!(%token, "Dropping stale options");
            return;
        }

        self.state.send_modify(|state| match result {
            Ok(options) => {
                debug!(%token, count = options.len(), "Applying options");
                state.status = if options.is_empty() {
                    SelectStatus::Empty
                } else {
                    SelectStatus::Ready
                };
                state.loaded = state.query == text;
                state.options = options;
            }
            Err(error) => {
                warn!(%token, %error, "Option search failed");
                state.options.clear();
                state.status = SelectStatus::Failed;
                state.loaded = false;
            }
        });
    }

    fn notify(&self, change: SelectionChange) {
        debug!(?change, "Selection changed");
        if let Some(on_change) = &self.on_change {
            on_change(change);
        }
    }
}

impl<S: OptionSource> std::fmt::Debug for SelectController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectController")
            .field("config", &self.inner.config)
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}
