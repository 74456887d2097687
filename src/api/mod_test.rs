use serde_json::json;

use super::test_support::{client_with, spawn_recorder};
use super::*;

// =============================================================================
// default_headers / auth_headers
// =============================================================================

#[test]
fn default_headers_with_token() {
    let headers = default_headers(Some("abc"));
    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
}

#[test]
fn default_headers_without_token() {
    let headers = default_headers(None);
    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    assert!(headers.get(AUTHORIZATION).is_none());
}

#[test]
fn auth_headers_never_set_content_type() {
    let headers = auth_headers(Some("abc"));
    assert!(headers.get(CONTENT_TYPE).is_none());
    assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
}

#[test]
fn auth_headers_skip_unencodable_token() {
    assert!(auth_headers(Some("bad\ntoken")).get(AUTHORIZATION).is_none());
}

// =============================================================================
// ErrorFallback
// =============================================================================

#[test]
fn error_message_uses_body_message() {
    let message = ErrorFallback::GENERIC.message(401, br#"{"message":"Invalid credentials"}"#);
    assert_eq!(message, "Invalid credentials");
}

#[test]
fn error_message_unparseable_body_uses_status() {
    assert_eq!(ErrorFallback::GENERIC.message(500, b"<html>oops</html>"), "HTTP error! Status: 500");
    assert_eq!(ErrorFallback::GENERIC.message(502, b""), "HTTP error! Status: 502");
}

#[test]
fn error_message_json_without_message() {
    assert_eq!(ErrorFallback::GENERIC.message(400, br#"{"error":"nope"}"#), UNKNOWN_SERVER_ERROR);
    assert_eq!(ErrorFallback::GENERIC.message(400, br#"{"message":""}"#), UNKNOWN_SERVER_ERROR);
}

#[test]
fn custom_fallback_replaces_both_defaults() {
    let fallback = ErrorFallback { missing_message: "Nothing said.", unparsable: Some("Garbled.") };
    assert_eq!(fallback.message(400, br#"{"code":1}"#), "Nothing said.");
    assert_eq!(fallback.message(500, b"<html>"), "Garbled.");
    assert_eq!(fallback.message(409, br#"{"message":"Taken"}"#), "Taken");
}

// =============================================================================
// decode_success
// =============================================================================

#[test]
fn no_content_decodes_to_unit() {
    let () = decode_success(StatusCode::NO_CONTENT, b"").unwrap();
}

#[test]
fn no_content_decodes_to_none() {
    let none: Option<Vec<u8>> = decode_success(StatusCode::NO_CONTENT, b"").unwrap();
    assert!(none.is_none());
}

#[test]
fn empty_ok_body_is_null() {
    let () = decode_success(StatusCode::OK, b"  ").unwrap();
}

#[test]
fn body_decodes_into_type() {
    let n: u32 = decode_success(StatusCode::OK, b"7").unwrap();
    assert_eq!(n, 7);
}

#[test]
fn shape_mismatch_is_decode_error() {
    let err = decode_success::<u32>(StatusCode::OK, br#"{"count":7}"#).unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

// =============================================================================
// live requests
// =============================================================================

/// `/ok` echoes a small object, `/empty` answers 204, `/denied` a JSON
/// rejection, `/broken` a rejection without a body, anything else 404.
async fn backend() -> (String, super::test_support::Calls) {
    spawn_recorder(|call| match call.uri.as_str() {
        "/ok" => (200, Some(json!({ "value": 1 }))),
        "/empty" => (204, None),
        "/denied" => (403, Some(json!({ "message": "Admins only" }))),
        "/broken" => (500, None),
        _ => (404, Some(json!({}))),
    })
    .await
}

#[tokio::test]
async fn attaches_bearer_when_token_present() {
    let (base, calls) = backend().await;
    let (client, _) = client_with(&base, Some("tok-1"));

    let body: Value = client.request(ApiRequest::get("/ok")).await.unwrap();
    assert_eq!(body, json!({ "value": 1 }));

    let last = calls.last();
    assert_eq!(last.authorization.as_deref(), Some("Bearer tok-1"));
    assert_eq!(last.content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn omits_bearer_when_token_absent() {
    let (base, calls) = backend().await;
    let (client, _) = client_with(&base, None);

    let _: Value = client.request(ApiRequest::get("/ok")).await.unwrap();
    assert_eq!(calls.last().authorization, None);
}

#[tokio::test]
async fn explicit_headers_replace_defaults() {
    let (base, calls) = backend().await;
    let (client, _) = client_with(&base, Some("tok-1"));

    let mut headers = HeaderMap::new();
    headers.insert("x-trace", HeaderValue::from_static("1"));
    let _: Value = client.request(ApiRequest::get("/ok").headers(headers)).await.unwrap();

    let last = calls.last();
    assert_eq!(last.authorization, None);
    assert_eq!(last.content_type, None);
}

#[tokio::test]
async fn reads_token_at_send_time() {
    let (base, calls) = backend().await;
    let (client, store) = client_with(&base, None);

    store.set("late").unwrap();
    let _: Value = client.request(ApiRequest::get("/ok")).await.unwrap();
    assert_eq!(calls.last().authorization.as_deref(), Some("Bearer late"));
}

#[tokio::test]
async fn status_204_yields_unit() {
    let (base, calls) = backend().await;
    let (client, _) = client_with(&base, None);

    let () = client.request(ApiRequest::post("/empty").json(&json!({}))).await.unwrap();
    client.request_empty(ApiRequest::post("/empty")).await.unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls.last().method, "POST");
}

#[tokio::test]
async fn non_2xx_message_is_exact() {
    let (base, _) = backend().await;
    let (client, _) = client_with(&base, None);

    let err = client.request::<Value>(ApiRequest::get("/denied")).await.unwrap_err();
    assert_eq!(err.to_string(), "Admins only");
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn non_2xx_unparseable_body_uses_status() {
    let (base, _) = backend().await;
    let (client, _) = client_with(&base, None);

    let err = client.request_empty(ApiRequest::get("/broken")).await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP error! Status: 500");
}

#[tokio::test]
async fn request_fallback_applies_to_live_rejections() {
    let (base, _) = backend().await;
    let (client, _) = client_with(&base, None);
    let fallback = ErrorFallback { missing_message: "Lookup failed.", unparsable: Some("Server fell over.") };

    let err = client.request_empty(ApiRequest::get("/missing").error_fallback(fallback)).await.unwrap_err();
    assert_eq!(err.to_string(), "Lookup failed.");
    let err = client.request_empty(ApiRequest::get("/broken").error_fallback(fallback)).await.unwrap_err();
    assert_eq!(err.to_string(), "Server fell over.");
}

#[tokio::test]
async fn unknown_route_is_request_error() {
    let (base, _) = backend().await;
    let (client, _) = client_with(&base, None);

    let err = client.request_empty(ApiRequest::get("/missing")).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), UNKNOWN_SERVER_ERROR);
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let (client, _) = client_with(&format!("http://{addr}"), None);

    let err = client.request_empty(ApiRequest::get("/ok")).await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
}
