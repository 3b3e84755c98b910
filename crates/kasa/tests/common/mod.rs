//! Scripted sources whose responses the test releases one by one.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use kasa_core::{
    Error, ListPage, ListQuery, OptionSource, PageSource, Pagination, Result, SelectOption,
    TransportError,
};
use tokio::sync::oneshot;

/// A call waiting for the test to answer it.
struct Pending<Q, R> {
    request: Q,
    reply: Option<oneshot::Sender<Result<R>>>,
}

/// Records every request and parks it until [`Script::respond`].
pub struct Script<Q, R> {
    calls: Arc<Mutex<Vec<Pending<Q, R>>>>,
}

impl<Q, R> Clone for Script<Q, R> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<Q: Clone, R> Script<Q, R> {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Requests seen so far, in call order.
    pub fn requests(&self) -> Vec<Q> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.request.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Answer call `index` (0-based).
    pub fn respond(&self, index: usize, result: Result<R>) {
        let reply = self.calls.lock().unwrap()[index]
            .reply
            .take()
            .expect("call already answered");
        let _ = reply.send(result);
    }

    async fn call(&self, request: Q) -> Result<R> {
        let (tx, rx) = oneshot::channel();
        self.calls.lock().unwrap().push(Pending {
            request,
            reply: Some(tx),
        });
        rx.await.unwrap_or_else(|_| Err(Error::Transport(TransportError::Cancelled)))
    }
}

pub type ScriptedPages = Script<ListQuery, ListPage<String>>;
pub type ScriptedOptions = Script<String, Vec<SelectOption>>;

#[async_trait]
impl PageSource for ScriptedPages {
    type Item = String;

    async fn fetch_page(&self, query: &ListQuery) -> Result<ListPage<String>> {
        self.call(query.clone()).await
    }
}

#[async_trait]
impl OptionSource for ScriptedOptions {
    async fn search(&self, query: &str) -> Result<Vec<SelectOption>> {
        self.call(query.to_string()).await
    }
}

/// A page of string items.
pub fn page(items: &[&str], current_page: u32, last_page: u32) -> ListPage<String> {
    ListPage::new(
        items.iter().map(|s| s.to_string()).collect(),
        Pagination {
            current_page,
            last_page,
            total: u64::from(last_page) * 20,
        },
    )
}

pub fn offline() -> Error {
    Error::Transport(TransportError::Connection {
        message: "network unreachable".to_string(),
    })
}

/// Let spawned tasks run without moving the clock.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
