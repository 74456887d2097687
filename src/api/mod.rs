//! REST client for the employee-management backend.
//!
//! DESIGN
//! ======
//! One generic request path ([`ApiClient::request`]) carries every endpoint.
//! The endpoint submodules only choose method, path, body, and response type.
//! Response handling is split into pure functions (`decode_success`,
//! `ErrorFallback::message`, `default_headers`) so status and body rules are
//! testable without a server.
//!
//! TRUST BOUNDARY
//! ==============
//! Success bodies are decoded straight into the caller's type. There is no
//! schema validation beyond serde; client and server are assumed to agree.

pub mod attendance;
pub mod auth;
pub mod billing;
pub mod dashboard;
pub mod leave;
pub mod logo;
pub mod messages;
pub mod projects;
pub mod types;
pub mod users;
pub mod work_reports;

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{ClientConfig, HttpTimeouts};
use crate::error::{ClientError, UNKNOWN_SERVER_ERROR, http_status_message};
use crate::token::SharedTokenStore;

// =============================================================================
// REQUEST
// =============================================================================

/// A single backend call: method, path, optional JSON body, optional headers.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<Result<Vec<u8>, String>>,
    headers: Option<HeaderMap>,
    fallback: ErrorFallback,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), body: None, headers: None, fallback: ErrorFallback::GENERIC }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body. Encoding errors surface when the request is sent.
    #[must_use]
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = Some(serde_json::to_vec(body).map_err(|e| e.to_string()));
        self
    }

    /// Replace the default header set (content type + bearer auth) entirely.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Use endpoint-specific messages for rejections without a usable
    /// `message`.
    #[must_use]
    pub fn error_fallback(mut self, fallback: ErrorFallback) -> Self {
        self.fallback = fallback;
        self
    }
}

/// Messages for a rejected response whose body carries no usable `message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorFallback {
    /// The body is JSON without a non-empty `message`.
    pub missing_message: &'static str,
    /// The body is not JSON. `None` reports the HTTP status instead.
    pub unparsable: Option<&'static str>,
}

impl ErrorFallback {
    pub const GENERIC: Self = Self { missing_message: UNKNOWN_SERVER_ERROR, unparsable: None };

    /// Pick the message for a rejected `status` with `body`.
    #[must_use]
    pub fn message(&self, status: u16, body: &[u8]) -> String {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => value
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(self.missing_message)
                .to_owned(),
            Err(_) => self.unparsable.map_or_else(|| http_status_message(status), str::to_owned),
        }
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// Typed HTTP client bound to one backend and one token store.
///
/// Cheap to clone; clones share the connection pool and the token store.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: SharedTokenStore,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client from parsed config.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::HttpClientBuild`] if the transport cannot be built.
    pub fn new(config: &ClientConfig, tokens: SharedTokenStore) -> Result<Self, ClientError> {
        Self::with_timeouts(&config.base_url, config.timeouts, tokens)
    }

    /// Build a client for an already-normalized base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::HttpClientBuild`] if the transport cannot be built.
    pub fn with_timeouts(base_url: &str, timeouts: HttpTimeouts, tokens: SharedTokenStore) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ClientError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned(), tokens })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token store this client reads auth from and writes logins to.
    #[must_use]
    pub fn tokens(&self) -> &SharedTokenStore {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send `req` and decode a JSON body into `T`.
    ///
    /// A 204 or empty body decodes from `null`, so `T = ()` or `Option<_>`
    /// accept it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`] for non-2xx statuses,
    /// [`ClientError::Network`] when no response arrives, and
    /// [`ClientError::Decode`] when the body does not match `T`.
    pub async fn request<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<T, ClientError> {
        let (status, body) = self.execute(req).await?;
        decode_success(status, &body)
    }

    /// Send `req` and discard any success body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::request`], minus decode failures.
    pub async fn request_empty(&self, req: ApiRequest) -> Result<(), ClientError> {
        self.execute(req).await.map(|_| ())
    }

    async fn execute(&self, req: ApiRequest) -> Result<(StatusCode, Vec<u8>), ClientError> {
        let ApiRequest { method, path, body, headers, fallback } = req;
        let headers = match headers {
            Some(h) => h,
            None => default_headers(self.tokens.get().as_deref()),
        };

        let mut builder = self.http.request(method.clone(), self.url(&path)).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body.map_err(ClientError::Encode)?);
        }

        tracing::debug!(%method, %path, "api request");
        finish(builder, &method, &path, fallback).await
    }

    /// Send a multipart form with auth only; the transport sets the content
    /// type and boundary.
    pub(crate) async fn request_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        fallback: ErrorFallback,
    ) -> Result<T, ClientError> {
        let builder = self
            .http
            .post(self.url(path))
            .headers(auth_headers(self.tokens.get().as_deref()))
            .multipart(form);

        tracing::debug!(method = %Method::POST, %path, "api multipart request");
        let (status, body) = finish(builder, &Method::POST, path, fallback).await?;
        decode_success(status, &body)
    }
}

async fn finish(
    builder: reqwest::RequestBuilder,
    method: &Method,
    path: &str,
    fallback: ErrorFallback,
) -> Result<(StatusCode, Vec<u8>), ClientError> {
    let response = builder.send().await.map_err(|e| {
        tracing::warn!(%method, %path, error = %e, "api request failed to send");
        ClientError::Network(e.to_string())
    })?;

    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?
        .to_vec();

    if !status.is_success() {
        let message = fallback.message(status.as_u16(), &body);
        tracing::debug!(%method, %path, status = status.as_u16(), %message, "api request rejected");
        return Err(ClientError::Request { status: status.as_u16(), message });
    }
    Ok((status, body))
}

// =============================================================================
// PURE HELPERS
// =============================================================================

/// Headers applied when the caller supplies none.
#[must_use]
pub fn default_headers(token: Option<&str>) -> HeaderMap {
    let mut headers = auth_headers(token);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Bearer auth header alone, or nothing when no token is stored.
#[must_use]
pub fn auth_headers(token: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(token) = token {
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => tracing::warn!("stored token is not a valid header value; sending without auth"),
        }
    }
    headers
}

/// Headers for endpoints that must not carry auth (login).
#[must_use]
pub fn json_only_headers() -> HeaderMap {
    default_headers(None)
}

fn decode_success<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, ClientError> {
    let value = if status == StatusCode::NO_CONTENT || body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice::<Value>(body).map_err(|e| ClientError::Decode(e.to_string()))?
    };
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Percent-encode a caller-supplied id for use as one path segment.
pub(crate) fn segment(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
