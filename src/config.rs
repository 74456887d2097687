//! Client configuration parsed from environment variables.

use std::path::PathBuf;

use crate::error::ConfigError;

pub const BASE_URL_VAR: &str = "STAFFDESK_API_BASE_URL";
pub const TOKEN_PATH_VAR: &str = "STAFFDESK_TOKEN_PATH";
pub const REQUEST_TIMEOUT_VAR: &str = "STAFFDESK_REQUEST_TIMEOUT_SECS";
pub const CONNECT_TIMEOUT_VAR: &str = "STAFFDESK_CONNECT_TIMEOUT_SECS";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const FALLBACK_TOKEN_PATH: &str = ".staffdesk-token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend root, without a trailing slash.
    pub base_url: String,
    /// Where the file-backed token store keeps the bearer token.
    pub token_path: PathBuf,
    pub timeouts: HttpTimeouts,
}

impl ClientConfig {
    /// Build a config for `base_url` with default token path and timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if `base_url` is not http(s).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            token_path: default_token_path(),
            timeouts: HttpTimeouts::default(),
        })
    }

    /// Build typed client config from environment variables.
    ///
    /// Required:
    /// - `STAFFDESK_API_BASE_URL`
    ///
    /// Optional:
    /// - `STAFFDESK_TOKEN_PATH`: platform data dir + `token` when absent
    /// - `STAFFDESK_REQUEST_TIMEOUT_SECS`: default 30
    /// - `STAFFDESK_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the base URL is missing or malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the base URL is missing or malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = lookup(BASE_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingBaseUrl { var: BASE_URL_VAR })?;
        let base_url = normalize_base_url(&raw)?;

        let token_path = lookup(TOKEN_PATH_VAR)
            .filter(|v| !v.trim().is_empty())
            .map_or_else(default_token_path, PathBuf::from);

        let timeouts = HttpTimeouts {
            request_secs: parse_u64(lookup(REQUEST_TIMEOUT_VAR), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(lookup(CONNECT_TIMEOUT_VAR), DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { base_url, token_path, timeouts })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| ConfigError::InvalidBaseUrl(raw.to_owned()))?;
    if rest.is_empty() {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

fn default_token_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "staffdesk")
        .map_or_else(|| PathBuf::from(FALLBACK_TOKEN_PATH), |dirs| dirs.data_dir().join("token"))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
