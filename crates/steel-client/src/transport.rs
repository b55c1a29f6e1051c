//! # HTTP Transport
//!
//! The single choke point for outbound requests: fixed base endpoint, fixed
//! timeout, centralized failure classification, and the notification side
//! effect.
//!
//! ## Request Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Transport Request Path                             │
//! │                                                                         │
//! │  get/post/put/delete(path, options)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  reqwest send (base_url + path, query params, 10s timeout)             │
//! │       │                                                                 │
//! │       ├── no response ──────────► classify → NoConnection ─┐           │
//! │       │                                                    │           │
//! │       ├── status not 2xx ──────► classify by status ───────┤           │
//! │       │                          (body message extracted)  │           │
//! │       │                                                    ▼           │
//! │       │                                        notify unless silent    │
//! │       │                                                    │           │
//! │       ▼                                                    ▼           │
//! │  parse JSON body → T                              Err(ApiError)        │
//! │                                                                         │
//! │  No automatic retry: the classified error propagates to the caller     │
//! │  after the notification fires.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::notify::{LogNotifier, Notification, Notifier};

// =============================================================================
// Request Options
// =============================================================================

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query parameters appended to the request URL.
    pub query: Vec<(String, String)>,

    /// Suppresses the error notification side effect for this call.
    /// The classified error still propagates; only the notification is
    /// skipped, for callers that surface failures themselves.
    pub silent: bool,
}

impl RequestOptions {
    /// Creates empty options (no query, notifications on).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Suppresses the error notification for this call.
    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }
}

// =============================================================================
// HttpTransport
// =============================================================================

/// HTTP transport bound to a base endpoint.
///
/// Cheap to clone; clones share the connection pool and the notifier.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    notifier: Arc<dyn Notifier>,
}

impl HttpTransport {
    /// Creates a transport from the client configuration, with the default
    /// log-based notifier.
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        Self::with_notifier(config, Arc::new(LogNotifier))
    }

    /// Creates a transport with a custom notification surface.
    pub fn with_notifier(config: &ClientConfig, notifier: Arc<dyn Notifier>) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()
            .map_err(|e| ApiError::Other(e.to_string()))?;

        Ok(HttpTransport {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            notifier,
        })
    }

    /// The configured base endpoint.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // =========================================================================
    // Verbs
    // =========================================================================

    /// GET `base_url/path`, decoding the JSON response body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let request = self.client.get(self.url(path));
        let body = self.send_checked(request, path, &options).await?;
        self.parse(&body, &options)
    }

    /// POST a JSON body to `base_url/path`, decoding the JSON response.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let request = self.client.post(self.url(path)).json(body);
        let body = self.send_checked(request, path, &options).await?;
        self.parse(&body, &options)
    }

    /// PUT a JSON body to `base_url/path`, decoding the JSON response.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let request = self.client.put(self.url(path)).json(body);
        let body = self.send_checked(request, path, &options).await?;
        self.parse(&body, &options)
    }

    /// DELETE `base_url/path`. The response body, if any, is discarded.
    pub async fn delete(&self, path: &str, options: RequestOptions) -> ApiResult<()> {
        let request = self.client.delete(self.url(path));
        self.send_checked(request, path, &options).await?;
        Ok(())
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Sends the request and returns the raw body of a successful response.
    /// Every failure leaves through [`HttpTransport::surface`], classified.
    async fn send_checked(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
        options: &RequestOptions,
    ) -> ApiResult<String> {
        let request = if options.query.is_empty() {
            request
        } else {
            request.query(&options.query)
        };

        debug!(path = %path, "Dispatching request");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Err(self.surface(ApiError::from_transport(e), options)),
        };

        let status = response.status();

        // Body first: non-success bodies may carry a server message, and
        // success bodies are what we return
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return Err(self.surface(ApiError::from_transport(e), options)),
        };

        if !status.is_success() {
            error!(
                path = %path,
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "Request failed"
            );
            let server_message = extract_server_message(&body);
            return Err(self.surface(
                ApiError::from_status(status.as_u16(), path, server_message),
                options,
            ));
        }

        Ok(body)
    }

    fn parse<T: DeserializeOwned>(&self, body: &str, options: &RequestOptions) -> ApiResult<T> {
        serde_json::from_str(body).map_err(|e| {
            error!(
                error = %e,
                body = %body.chars().take(200).collect::<String>(),
                "Failed to parse response body"
            );
            self.surface(ApiError::Other(format!("invalid response body: {}", e)), options)
        })
    }

    /// Fires the notification side effect (unless the call opted out) and
    /// hands the error back for propagation.
    fn surface(&self, err: ApiError, options: &RequestOptions) -> ApiError {
        if !options.silent {
            self.notifier.notify(Notification::error(&err));
        }
        err
    }
}

/// Pulls the `message` field out of a JSON error body, if there is one.
fn extract_server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("message")?.as_str().map(String::from)
}

// =============================================================================
// Unit Tests
// =============================================================================
