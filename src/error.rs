//! Error types for configuration, transport, and token storage.
//!
//! ERROR HANDLING
//! ==============
//! Every operation-level failure is returned to the immediate caller as a
//! [`ClientError`]; nothing in this crate retries. Token-resolution failures
//! are the one exception: the session manager handles those locally and
//! degrades to an anonymous session (see `session`).

use crate::token::store::TokenStoreError;

/// Message used when a non-2xx body has JSON but no usable `message` field.
pub const UNKNOWN_SERVER_ERROR: &str = "An unknown server error occurred.";

/// Login rejection whose JSON body has no usable `message`.
pub const LOGIN_FAILED: &str = "Login failed.";

/// Logo upload rejection whose body is not JSON.
pub const LOGO_UPLOAD_FAILED: &str = "Failed to upload logo.";

/// Message used when the transport never produced a response.
pub const NETWORK_ERROR: &str = "Network error: unable to reach server";

/// Build the fallback message for an error body that is not JSON.
#[must_use]
pub fn http_status_message(status: u16) -> String {
    format!("HTTP error! Status: {status}")
}

// =============================================================================
// CONFIG
// =============================================================================

/// Startup configuration failures. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The required base URL variable is not set or is blank.
    #[error("missing API base URL: env var {var} not set")]
    MissingBaseUrl { var: &'static str },

    /// The base URL is not an absolute http(s) URL.
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

// =============================================================================
// CLIENT
// =============================================================================

/// Errors produced by API client and session operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The backend answered with a non-2xx status.
    ///
    /// Displays as exactly the server-provided (or synthesized) message so UI
    /// layers can show it verbatim.
    #[error("{message}")]
    Request { status: u16, message: String },

    /// No response was received.
    #[error("{} ({})", NETWORK_ERROR, .0)]
    Network(String),

    /// The request body could not be serialized.
    #[error("request encode failed: {0}")]
    Encode(String),

    /// A 2xx body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The login token could not be persisted.
    #[error("token storage failed: {0}")]
    Storage(#[from] TokenStoreError),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ClientError {
    /// HTTP status for [`ClientError::Request`], `None` for everything else.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the backend rejected the caller's credentials or token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Request { status: 401 | 403, .. })
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
