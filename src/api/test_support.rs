//! In-process mock backend for client and session tests.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::HeaderMap;

use crate::api::ApiClient;
use crate::config::HttpTimeouts;
use crate::token::{MemoryTokenStore, SharedTokenStore};

/// Serve `router` on an ephemeral localhost port and return its base URL.
pub(crate) async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock backend crashed");
    });
    format!("http://{addr}")
}

/// Client against `base_url` with a memory store holding `token`.
pub(crate) fn client_with(base_url: &str, token: Option<&str>) -> (ApiClient, SharedTokenStore) {
    let store: SharedTokenStore = Arc::new(match token {
        Some(t) => MemoryTokenStore::with_token(t),
        None => MemoryTokenStore::new(),
    });
    let timeouts = HttpTimeouts { request_secs: 5, connect_secs: 2 };
    let client = ApiClient::with_timeouts(base_url, timeouts, store.clone()).expect("build client");
    (client, store)
}

/// Build a well-formed three-segment token whose payload is `payload`.
pub(crate) fn make_token(payload: &serde_json::Value) -> String {
    use base64::Engine;
    let body = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("eyJhbGciOiJIUzI1NiJ9.{body}.signature")
}

// =============================================================================
// RECORDING BACKEND
// =============================================================================

/// One request as the recording backend saw it.
#[derive(Clone, Debug)]
pub(crate) struct Call {
    pub method: String,
    /// Path plus query string, exactly as sent.
    pub uri: String,
    pub body: serde_json::Value,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Clone, Default)]
pub(crate) struct Calls {
    inner: Arc<Mutex<Vec<Call>>>,
}

impl Calls {
    pub(crate) fn last(&self) -> Call {
        self.inner.lock().expect("calls lock").last().cloned().expect("backend saw no requests")
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.lock().expect("calls lock").len()
    }
}

/// Serve a catch-all backend that records every call and answers with
/// `respond(call)`: a status plus an optional JSON body.
pub(crate) async fn spawn_recorder<F>(respond: F) -> (String, Calls)
where
    F: Fn(&Call) -> (u16, Option<serde_json::Value>) + Send + Sync + 'static,
{
    use axum::body::Bytes;
    use axum::http::{Method, StatusCode, Uri};
    use axum::response::IntoResponse;

    let calls = Calls::default();
    let recorded = calls.clone();
    let respond = Arc::new(respond);
    let router = Router::new().fallback(move |method: Method, uri: Uri, headers: HeaderMap, body: Bytes| {
        let recorded = recorded.clone();
        let respond = respond.clone();
        async move {
            let read = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned);
            let call = Call {
                method: method.to_string(),
                uri: uri.path_and_query().map_or_else(|| uri.path().to_owned(), ToString::to_string),
                body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
                authorization: read("authorization"),
                content_type: read("content-type"),
            };
            let (status, payload) = respond(&call);
            recorded.inner.lock().expect("calls lock").push(call);
            let status = StatusCode::from_u16(status).expect("valid status");
            match payload {
                Some(v) => (status, axum::Json(v)).into_response(),
                None => status.into_response(),
            }
        }
    });
    (spawn_backend(router).await, calls)
}
