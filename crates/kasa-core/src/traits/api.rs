//! REST API trait.

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

/// Capability to talk to the remote REST API.
///
/// Controllers receive this as an injected dependency instead of reaching
/// for a global client, so tests can substitute their own implementation.
/// Paths are relative to the API base, e.g. `checks` or `checks/12`.
#[async_trait]
pub trait Api: Send + Sync {
    /// GET a path with query parameters.
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value>;

    /// POST a JSON body.
    async fn post(&self, path: &str, body: &Value) -> Result<Value>;

    /// PUT a JSON body.
    async fn put(&self, path: &str, body: &Value) -> Result<Value>;

    /// DELETE a path.
    async fn delete(&self, path: &str) -> Result<()>;
}

#[async_trait]
impl<A> Api for std::sync::Arc<A>
where
    A: Api + ?Sized,
{
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        (**self).get(path, query).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        (**self).post(path, body).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        (**self).put(path, body).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        (**self).delete(path).await
    }
}
