//! Client core for the staff management backend.
//!
//! ARCHITECTURE
//! ============
//! - `token`: bearer-token storage and payload decoding
//! - `api`: typed REST client over one generic request path
//! - `session`: session state machine built on the API client
//! - `guard`: route table, auth gating, and navigation on session events
//!
//! Data flows downward: guards read session state, the session manager calls
//! the API client, the API client reads and writes the token store.

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod session;
pub mod token;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ConfigError};
pub use session::{Session, SessionEvent, SessionManager, SessionPhase};
