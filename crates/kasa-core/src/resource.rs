//! Resource endpoints and response envelopes.
//!
//! Every entity is exposed by the API as a REST resource with the same
//! shape: a paginated list with `page`, `per_page`, `search` and one
//! entity-specific filter key, plus get/create/update/delete by id.

use std::fmt::Debug;

use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::drafts::{CheckDraft, ContactDraft, FormDraft, StockMovementDraft, VehicleDraft};
use crate::models::{Check, Contact, StockMovement, Vehicle};
use crate::traits::Api;
use crate::types::{Id, ListPage, ListQuery, Pagination};
use crate::Result;

/// A REST resource served by the API.
pub trait Resource: Send + Sync + 'static {
    /// Endpoint path below the API base.
    const PATH: &'static str;
    /// Query key the list filter is sent under.
    const FILTER_KEY: &'static str;
    /// Entity as returned by the API.
    type Item: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static;
    /// Editable shape sent on create/update.
    type Draft: FormDraft;

    /// Path of one entity.
    fn item_path(id: Id) -> String {
        format!("{}/{}", Self::PATH, id)
    }
}

/// `/checks`, filtered by `status`.
#[derive(Debug, Clone, Copy)]
pub struct Checks;

impl Resource for Checks {
    const PATH: &'static str = "checks";
    const FILTER_KEY: &'static str = "status";
    type Item = Check;
    type Draft = CheckDraft;
}

/// `/contacts`, filtered by `type`.
#[derive(Debug, Clone, Copy)]
pub struct Contacts;

impl Resource for Contacts {
    const PATH: &'static str = "contacts";
    const FILTER_KEY: &'static str = "type";
    type Item = Contact;
    type Draft = ContactDraft;
}

/// `/vehicles`, filtered by `status`.
#[derive(Debug, Clone, Copy)]
pub struct Vehicles;

impl Resource for Vehicles {
    const PATH: &'static str = "vehicles";
    const FILTER_KEY: &'static str = "status";
    type Item = Vehicle;
    type Draft = VehicleDraft;
}

/// `/stock-movements`, filtered by `type`.
#[derive(Debug, Clone, Copy)]
pub struct StockMovements;

impl Resource for StockMovements {
    const PATH: &'static str = "stock-movements";
    const FILTER_KEY: &'static str = "type";
    type Item = StockMovement;
    type Draft = StockMovementDraft;
}

/// Query parameters of a list request.
pub fn list_params(query: &ListQuery, filter_key: &str, per_page: u32) -> Vec<(String, String)> {
    let mut params = vec![
        ("page".to_string(), query.page.max(1).to_string()),
        ("per_page".to_string(), per_page.to_string()),
    ];
    if let Some(term) = query.search_term() {
        params.push(("search".to_string(), term.to_string()));
    }
    if let Some(filter) = &query.filter {
        params.push((filter_key.to_string(), filter.clone()));
    }
    params
}

/// Decode a list body.
///
/// Accepts `{ "data": [...], "meta": {...} }`, a paginator with the
/// pagination keys at top level, or a bare array. Without pagination
/// metadata the body is treated as a single page.
pub fn decode_page<T: DeserializeOwned>(body: Value) -> Result<ListPage<T>> {
    let pagination = match body.get("meta").filter(|m| m.is_object()) {
        Some(meta) => Some(Pagination::deserialize(meta)?),
        None if body.get("current_page").is_some() => Some(Pagination::deserialize(&body)?),
        None => None,
    };

    let items: Vec<T> = match body {
        Value::Array(_) => serde_json::from_value(body)?,
        Value::Object(mut map) => {
            let data = map.remove("data").unwrap_or(Value::Null);
            serde_json::from_value(data)?
        }
        other => serde_json::from_value(other)?,
    };

    let pagination = pagination.unwrap_or_else(|| Pagination::single(items.len()));
    Ok(ListPage::new(items, pagination))
}

/// Decode a single-entity body, with or without a `data` envelope.
pub fn decode_item<T: DeserializeOwned>(body: Value) -> Result<T> {
    match body {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            let data = map.remove("data").unwrap_or(Value::Null);
            Ok(serde_json::from_value(data)?)
        }
        other => Ok(serde_json::from_value(other)?),
    }
}

/// Fetch one page of a resource.
pub async fn list<R, A>(api: &A, query: &ListQuery, per_page: u32) -> Result<ListPage<R::Item>>
where
    R: Resource,
    A: Api + ?Sized,
{
    debug!(resource = R::PATH, page = query.page, "Listing");
    let params = list_params(query, R::FILTER_KEY, per_page);
    let body = api.get(R::PATH, &params).await?;
    decode_page(body)
}

/// Fetch one entity by id.
pub async fn fetch<R, A>(api: &A, id: Id) -> Result<R::Item>
where
    R: Resource,
    A: Api + ?Sized,
{
    debug!(resource = R::PATH, %id, "Fetching");
    let body = api.get(&R::item_path(id), &[]).await?;
    decode_item(body)
}

/// Create an entity from a draft.
pub async fn create<R, A>(api: &A, draft: &R::Draft) -> Result<R::Item>
where
    R: Resource,
    A: Api + ?Sized,
{
    debug!(resource = R::PATH, "Creating");
    let body = serde_json::to_value(draft.normalized())?;
    let response = api.post(R::PATH, &body).await?;
    decode_item(response)
}

/// Replace an entity's editable fields with a draft.
pub async fn update<R, A>(api: &A, id: Id, draft: &R::Draft) -> Result<R::Item>
where
    R: Resource,
    A: Api + ?Sized,
{
    debug!(resource = R::PATH, %id, "Updating");
    let body = serde_json::to_value(draft.normalized())?;
    let response = api.put(&R::item_path(id), &body).await?;
    decode_item(response)
}

/// Delete an entity.
pub async fn delete<R, A>(api: &A, id: Id) -> Result<()>
where
    R: Resource,
    A: Api + ?Sized,
{
    debug!(resource = R::PATH, %id, "Deleting");
    api.delete(&R::item_path(id)).await
}
