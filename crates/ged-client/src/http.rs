//! Shared HTTP plumbing for every service.
//!
//! Each call is exactly one request: no retries, no redirects followed
//! across hosts. A non-2xx response becomes an [`AppError`] carrying the
//! status and the server's `detail` (or `message`) text.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use ged_core::config::ApiConfig;
use ged_core::error::{AppError, ErrorKind};
use ged_core::result::AppResult;
use ged_session::SessionStore;

/// HTTP client bound to one API base URL and one session store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<SessionStore>,
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(config: &ApiConfig, store: Arc<SessionStore>) -> AppResult<Self> {
        Self::with_base_url(
            &config.resolved_base_url(),
            Duration::from_secs(config.timeout_seconds),
            store,
        )
    }

    /// Build a client for an explicit base URL.
    pub fn with_base_url(
        base_url: &str,
        timeout: Duration,
        store: Arc<SessionStore>,
    ) -> AppResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| {
            AppError::configuration(format!("Invalid API base URL '{base_url}': {e}"))
        })?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            http,
            base_url,
            store,
        })
    }

    /// Base URL every path is joined onto.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session store supplying the bearer token.
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Absolute URL of an API path such as `/api/v1/nodes/trash`.
    pub fn url(&self, path: &str) -> AppResult<Url> {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        Url::parse(&format!("{}{path}", self.base_url))
            .map_err(|e| AppError::validation(format!("Invalid request path '{path}': {e}")))
    }

    /// Start a request for an already-built URL.
    pub fn request(&self, method: Method, url: Url) -> ApiRequest<'_> {
        ApiRequest {
            client: self,
            method,
            url,
            body: None,
            authenticated: true,
        }
    }

    pub fn get(&self, path: &str) -> AppResult<ApiRequest<'_>> {
        Ok(self.request(Method::GET, self.url(path)?))
    }

    pub fn post(&self, path: &str) -> AppResult<ApiRequest<'_>> {
        Ok(self.request(Method::POST, self.url(path)?))
    }

    pub fn put(&self, path: &str) -> AppResult<ApiRequest<'_>> {
        Ok(self.request(Method::PUT, self.url(path)?))
    }

    pub fn patch(&self, path: &str) -> AppResult<ApiRequest<'_>> {
        Ok(self.request(Method::PATCH, self.url(path)?))
    }

    pub fn delete(&self, path: &str) -> AppResult<ApiRequest<'_>> {
        Ok(self.request(Method::DELETE, self.url(path)?))
    }
}

/// Append one percent-encoded path segment to `url`.
pub fn push_segment(url: &mut Url, segment: &str) -> AppResult<()> {
    url.path_segments_mut()
        .map_err(|_| AppError::validation("Cannot append a path segment to this URL"))?
        .pop_if_empty()
        .push(segment);
    Ok(())
}

#[derive(Debug)]
enum Body {
    Json(Value),
    Form(Vec<(String, String)>),
}

/// A request being prepared.
#[derive(Debug)]
pub struct ApiRequest<'a> {
    client: &'a ApiClient,
    method: Method,
    url: Url,
    body: Option<Body>,
    authenticated: bool,
}

impl ApiRequest<'_> {
    /// Append query-string pairs.
    pub fn query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut pairs = pairs.into_iter().peekable();
        if pairs.peek().is_some() {
            self.url.query_pairs_mut().extend_pairs(pairs);
        }
        self
    }

    /// Send `body` as JSON.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> AppResult<Self> {
        self.body = Some(Body::Json(serde_json::to_value(body)?));
        Ok(self)
    }

    /// Send `fields` as an url-encoded form.
    pub fn form<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.body = Some(Body::Form(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ));
        self
    }

    /// Do not attach the bearer token.
    pub fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }

    /// The URL this request will hit.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Send the request and decode a JSON response.
    ///
    /// Cancelling `cancel` drops the in-flight request and resolves to an
    /// error of kind [`ErrorKind::Cancelled`].
    pub async fn send<T: DeserializeOwned>(self, cancel: &CancellationToken) -> AppResult<T> {
        let label = format!("{} {}", self.method, self.url.path());
        if cancel.is_cancelled() {
            return Err(AppError::cancelled(format!("{label} cancelled")));
        }

        let mut builder = self.client.http.request(self.method, self.url.clone());
        if self.authenticated {
            if let Some(token) = self.client.store.token().await? {
                builder = builder.bearer_auth(token);
            }
        }
        builder = match &self.body {
            Some(Body::Json(body)) => builder.json(body),
            Some(Body::Form(fields)) => builder.form(fields),
            None => builder,
        };

        debug!(request = %label, "Sending API request");
        let exchange = async {
            let response = builder.send().await?;
            decode::<T>(response).await
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(request = %label, "API request cancelled");
                Err(AppError::cancelled(format!("{label} cancelled")))
            }
            result = exchange => result,
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let status = response.status();
    let body = response.bytes().await?;
    debug!(status = status.as_u16(), bytes = body.len(), "Received API response");

    if !status.is_success() {
        return Err(api_error(status, &body));
    }

    let body: &[u8] = if body.is_empty() { b"null" } else { &body };
    serde_json::from_slice(body).map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Unexpected response body: {e}"),
            e,
        )
    })
}

/// Map a non-2xx response to an error, preferring the server's message.
pub fn api_error(status: StatusCode, body: &[u8]) -> AppError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| server_message(&v))
        .unwrap_or_else(|| {
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )
        });
    AppError::api(status.as_u16(), message)
}

fn server_message(body: &Value) -> Option<String> {
    ["detail", "message"].iter().find_map(|key| match body.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        // Validation failures arrive as `[{"loc": [...], "msg": "..."}]`.
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        _ => None,
    })
}
