use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn missing_base_url_is_fatal() {
    let err = ClientConfig::from_lookup(lookup_from(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::MissingBaseUrl { var: BASE_URL_VAR }));
}

#[test]
fn blank_base_url_is_missing() {
    let err = ClientConfig::from_lookup(lookup_from(&[(BASE_URL_VAR, "   ")])).unwrap_err();
    assert!(matches!(err, ConfigError::MissingBaseUrl { .. }));
}

#[test]
fn base_url_must_be_http() {
    let err = ClientConfig::from_lookup(lookup_from(&[(BASE_URL_VAR, "ftp://host")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    let err = ClientConfig::from_lookup(lookup_from(&[(BASE_URL_VAR, "https://")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
}

#[test]
fn defaults_apply() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[(BASE_URL_VAR, "http://localhost:5000/api/")])).unwrap();
    assert_eq!(cfg.base_url, "http://localhost:5000/api");
    assert_eq!(cfg.timeouts, HttpTimeouts::default());
    assert_eq!(cfg.token_path, default_token_path());
}

#[test]
fn overrides_parse() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        (BASE_URL_VAR, "https://staff.example.test"),
        (TOKEN_PATH_VAR, "/tmp/staffdesk/token"),
        (REQUEST_TIMEOUT_VAR, "5"),
        (CONNECT_TIMEOUT_VAR, "2"),
    ]))
    .unwrap();
    assert_eq!(cfg.base_url, "https://staff.example.test");
    assert_eq!(cfg.token_path, PathBuf::from("/tmp/staffdesk/token"));
    assert_eq!(cfg.timeouts, HttpTimeouts { request_secs: 5, connect_secs: 2 });
}

#[test]
fn bad_timeouts_fall_back() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        (BASE_URL_VAR, "http://h"),
        (REQUEST_TIMEOUT_VAR, "soon"),
        (CONNECT_TIMEOUT_VAR, "0"),
    ]))
    .unwrap();
    assert_eq!(cfg.timeouts, HttpTimeouts::default());
}

#[test]
fn new_normalizes_url() {
    assert_eq!(ClientConfig::new("http://h/").unwrap().base_url, "http://h");
}
