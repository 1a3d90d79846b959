/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Request layer for the Dale backend
//!
//! Every screen-level operation funnels through [`ApiClient::request`], which:
//! - Resolves the full URL against the base fixed at construction
//! - Injects the bearer token held by the shared [`Session`]
//! - Bounds the wait for a response with a fixed timeout
//! - Logs start/end lines through the diagnostics sink
//! - Turns non-2xx bodies into a classified [`AppError`]
//!
//! # Example
//! ```ignore
//! use dale_client::prelude::*;
//!
//! let api = ApiClient::new(RuntimeConfig::from_env(), session, LogSink::default())?;
//! let page: ListResponse<Note> = api.request("/table/notes/list", RequestOptions::get()).await?;
//! ```

use crate::config::RuntimeConfig;
use crate::constants::{REQUEST_TIMEOUT_MS, USER_AGENT};
use crate::diagnostics::LogSink;
use crate::error::{AppError, ApiFailure};
use crate::session::Session;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as HttpClient, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Method, extra headers and body of one call
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method
    pub method: Method,
    /// Extra headers, applied over the JSON content type
    pub headers: Vec<(String, String)>,
    /// JSON body
    pub body: Option<Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    /// `GET` without a body
    #[must_use]
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: None,
        }
    }

    /// `POST` without a body
    #[must_use]
    pub fn post() -> Self {
        Self {
            method: Method::POST,
            ..Self::get()
        }
    }

    /// `POST` with a serializable body
    pub fn post_json<B: Serialize + ?Sized>(body: &B) -> Result<Self, AppError> {
        Ok(Self::post().with_body(serde_json::to_value(body)?))
    }

    /// Sets the method
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Adds a header; later values replace earlier ones with the same name
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the JSON body
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// HTTP client bound to one backend and one session
pub struct ApiClient {
    base_url: String,
    http_client: HttpClient,
    session: Arc<Session>,
    sink: LogSink,
    timeout: Duration,
    counter: AtomicU64,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("requests", &self.counter.load(Ordering::Relaxed))
            .finish()
    }
}

impl ApiClient {
    /// Creates a client, resolving the base address once
    ///
    /// # Arguments
    /// * `config` - Runtime inputs used for base address resolution
    /// * `session` - Shared session providing the bearer token
    /// * `sink` - Destination of the request diagnostics
    ///
    /// # Returns
    /// * `Ok(ApiClient)` - Client ready to use
    /// * `Err(AppError)` - If the HTTP client cannot be built
    pub fn new(
        config: &RuntimeConfig,
        session: Arc<Session>,
        sink: LogSink,
    ) -> Result<Self, AppError> {
        let base_url = config.api_base_url();
        sink.log(&format!(
            "Base URL: {} (host={}, explicit={})",
            base_url,
            config.api_host.as_deref().unwrap_or("n/a"),
            config.api_base.as_deref().unwrap_or("n/a"),
        ));
        let http_client = HttpClient::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            base_url,
            http_client,
            session,
            sink,
            timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
            counter: AtomicU64::new(0),
        })
    }

    /// Replaces the response timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolved base address
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session shared with the services built on this client
    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Diagnostics sink
    #[must_use]
    pub fn sink(&self) -> &LogSink {
        &self.sink
    }

    /// Response timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Number of requests issued so far
    #[must_use]
    pub fn requests_issued(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    /// Makes a GET request
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, AppError> {
        self.request(endpoint, RequestOptions::get()).await
    }

    /// Makes a POST request with a JSON body
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, AppError> {
        self.request(endpoint, RequestOptions::post_json(body)?)
            .await
    }

    /// Executes one call against `base + endpoint`
    ///
    /// The response body is always parsed as JSON. A 2xx body is deserialized
    /// into `T`; anything else is classified into [`AppError::Validation`] or
    /// [`AppError::Api`]. Nothing is retried.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, AppError> {
        let headers = self.build_headers(&options.headers)?;
        let request_id = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let method = options.method;
        let url = format!("{}{}", self.base_url, endpoint);
        let start = Instant::now();
        self.sink
            .log(&format!("Request {request_id} start {method} {url}"));

        let mut request = self
            .http_client
            .request(method.clone(), &url)
            .headers(headers);
        if let Some(body) = &options.body {
            request = request.body(serde_json::to_string(body)?);
        }

        let response = match tokio::time::timeout(self.timeout, request.send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                self.sink.warn(&format!(
                    "Request {request_id} failed {method} {url} after {}ms: {e}",
                    elapsed_ms(start)
                ));
                return Err(AppError::Transport(e));
            }
            Err(_) => {
                let elapsed_ms = elapsed_ms(start);
                let err = AppError::Timeout { elapsed_ms };
                self.sink.warn(&format!(
                    "Request {request_id} failed {method} {url} after {elapsed_ms}ms: {err}"
                ));
                return Err(err);
            }
        };

        let status = response.status();
        self.sink.log(&format!(
            "Request {request_id} response {method} {url} status={} duration={}ms",
            status.as_u16(),
            elapsed_ms(start)
        ));

        let text = response.text().await.inspect_err(|e| {
            self.sink.warn(&format!(
                "Request {request_id} failed {method} {url} after {}ms: {e}",
                elapsed_ms(start)
            ));
        })?;
        let data: Value = serde_json::from_str(&text).inspect_err(|e| {
            self.sink.warn(&format!(
                "Request {request_id} failed to parse JSON {method} {url} after {}ms: {e}",
                elapsed_ms(start)
            ));
        })?;

        if !status.is_success() {
            return Err(ApiFailure::classify(&data).into_error(status));
        }

        Ok(serde_json::from_value(data)?)
    }

    fn build_headers(&self, extra: &[(String, String)]) -> Result<HeaderMap, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| AppError::Precondition(format!("invalid header name {name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| AppError::Precondition(format!("invalid header value for {name}: {e}")))?;
            headers.insert(name, value);
        }
        if let Some(token) = self.session.auth_token() {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| AppError::Precondition(format!("invalid access token: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
