//! HTTP API client.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use tracing::{debug, instrument, trace};

use kasa_core::{Api, BaseUrl, Error, InvalidInputError, Result, TransportError};

use crate::error::{api_error, transport};

/// Request timeout used by [`HttpApi::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A network-backed [`Api`] talking JSON over HTTP.
///
/// Cloning is cheap; clones share the connection pool and the bearer token.
#[derive(Clone)]
pub struct HttpApi {
    inner: Arc<ApiInner>,
}

struct ApiInner {
    client: reqwest::Client,
    base: BaseUrl,
    token: RwLock<Option<String>>,
}

impl HttpApi {
    /// Create a client for the given API base with the default timeout.
    pub fn new(base: BaseUrl) -> Result<Self> {
        Self::with_timeout(base, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(base: BaseUrl, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("kasa/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Http {
                message: e.to_string(),
            })?;

        Ok(Self {
            inner: Arc::new(ApiInner {
                client,
                base,
                token: RwLock::new(None),
            }),
        })
    }

    /// Attach a bearer token to every following request.
    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.set_token(Some(token.into()));
        self
    }

    /// Replace or remove the bearer token.
    pub fn set_token(&self, token: Option<String>) {
        let mut guard = self
            .inner
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = token;
    }

    /// Returns the API base URL.
    pub fn base(&self) -> &BaseUrl {
        &self.inner.base
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.inner.base.endpoint(path);
        let mut builder = self
            .inner
            .client
            .request(method, &url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        let token = self
            .inner
            .token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                InvalidInputError::Other {
                    message: "token contains invalid header characters".to_string(),
                }
            })?;
            builder = builder.header(AUTHORIZATION, value);
        }

        Ok(builder)
    }

    /// Send a request and decode the JSON body, mapping failures.
    async fn send(&self, builder: RequestBuilder) -> Result<Value> {
        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        trace!(status = %status, "API response");

        let body = response.bytes().await.map_err(transport)?;

        if !status.is_success() {
            let error = api_error(status.as_u16(), &body);
            debug!(%error, "API request rejected");
            return Err(Error::Api(error));
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl Api for HttpApi {
    #[instrument(skip(self, query), fields(base = %self.inner.base))]
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        debug!(path, "GET");
        trace!(?query, "query parameters");
        let builder = self.request(Method::GET, path)?.query(query);
        self.send(builder).await
    }

    #[instrument(skip(self, body), fields(base = %self.inner.base))]
    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        debug!(path, "POST");
        let builder = self.request(Method::POST, path)?.json(body);
        self.send(builder).await
    }

    #[instrument(skip(self, body), fields(base = %self.inner.base))]
    async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        debug!(path, "PUT");
        let builder = self.request(Method::PUT, path)?.json(body);
        self.send(builder).await
    }

    #[instrument(skip(self), fields(base = %self.inner.base))]
    async fn delete(&self, path: &str) -> Result<()> {
        debug!(path, "DELETE");
        let builder = self.request(Method::DELETE, path)?;
        self.send(builder).await.map(|_| ())
    }
}

impl std::fmt::Debug for HttpApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApi")
            .field("base", &self.inner.base)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
