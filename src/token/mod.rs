//! Bearer-token storage and payload decoding.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store is the single source of truth for "is a token present" across
//! restarts. Writers are restricted by convention: the API client writes on
//! login success, the session manager clears on logout and on failed
//! resolution. Everything else only reads.

pub mod payload;
pub mod store;

pub use payload::{TokenError, TokenPayload, decode_payload};
pub use store::{FileTokenStore, MemoryTokenStore, SharedTokenStore, TokenStore, TokenStoreError};
