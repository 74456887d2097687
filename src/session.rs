//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Constructed once at the application root and shared by reference. Route
//! guards read the current [`Session`] through a `watch` receiver; navigation
//! observers react to [`SessionEvent`]s on a broadcast channel. The manager
//! itself never navigates.
//!
//! STATE MACHINE
//! =============
//! `Initializing` → `Authenticated` | `Anonymous`. `user`, `token`, and
//! `loading` are always published together in one `send_replace`, so no
//! receiver can see `loading == false` next to a half-updated pairing.
//!
//! TRADE-OFFS
//! ==========
//! Overlapping `login` calls are not serialized. Each publishes only while the
//! store still holds its own token, checked inside the `watch` lock, so the
//! last token written to the store is also the one published here. A
//! resolution whose token was replaced while its fetch was in flight starts
//! over with the new token unless a login or logout already settled the
//! session.

use tokio::sync::{broadcast, watch};

use crate::api::ApiClient;
use crate::api::types::{Credentials, NewUser, User};
use crate::error::ClientError;
use crate::token::{TokenError, decode_payload};

const EVENT_CAPACITY: usize = 16;

// =============================================================================
// STATE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Initializing,
    Authenticated,
    Anonymous,
}

/// Snapshot of the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
}

impl Session {
    /// A stored token is being resolved.
    #[must_use]
    pub fn initializing(token: String) -> Self {
        Self { user: None, token: Some(token), loading: true }
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self { user: None, token: None, loading: false }
    }

    #[must_use]
    pub fn authenticated(user: User, token: String) -> Self {
        Self { user: Some(user), token: Some(token), loading: false }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match (self.loading, &self.user) {
            (true, _) => SessionPhase::Initializing,
            (false, Some(_)) => SessionPhase::Authenticated,
            (false, None) => SessionPhase::Anonymous,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.phase() == SessionPhase::Authenticated
    }
}

/// Transitions worth reacting to outside the manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A stored token resolved to a user at startup.
    Restored { user_id: String },
    /// A stored token was invalid or its user could not be fetched.
    Expired,
    /// Interactive login succeeded.
    SignedIn { user_id: String },
    /// The user logged out.
    SignedOut,
}

/// Why a stored token did not resolve. Logged, never returned.
#[derive(Debug, thiserror::Error)]
enum ResolveError {
    #[error("stored token is malformed: {0}")]
    Token(#[from] TokenError),
    #[error("fetching token user failed: {0}")]
    Fetch(#[from] ClientError),
}

// =============================================================================
// MANAGER
// =============================================================================

pub struct SessionManager {
    api: ApiClient,
    state: watch::Sender<Session>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionManager {
    /// Create the manager without touching the network.
    ///
    /// With a stored token the session starts `Initializing` until
    /// [`SessionManager::resolve`] runs; without one it is `Anonymous`
    /// immediately.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let initial = match api.tokens().get() {
            Some(token) => Session::initializing(token),
            None => Session::anonymous(),
        };
        let (state, _) = watch::channel(initial);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { api, state, events }
    }

    /// Create the manager and resolve any stored token before returning.
    pub async fn start(api: ApiClient) -> Self {
        let manager = Self::new(api);
        manager.resolve().await;
        manager
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Current snapshot.
    #[must_use]
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase()
    }

    /// Receiver that observes every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Receiver for transition events, used to drive navigation.
    #[must_use]
    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine; events are advisory.
        let _ = self.events.send(event);
    }

    /// Turn the stored token into a confirmed user, or discard it.
    ///
    /// Never fails: every problem ends in `Anonymous` with the store cleared.
    /// Never returns while the session is still `Initializing`.
    pub async fn resolve(&self) -> SessionPhase {
        loop {
            let Some(token) = self.api.tokens().get() else {
                self.state.send_replace(Session::anonymous());
                return SessionPhase::Anonymous;
            };
            let stale = {
                let current = self.state.borrow();
                !current.loading || current.token.as_deref() != Some(token.as_str())
            };
            if stale {
                self.state.send_replace(Session::initializing(token.clone()));
            }

            let outcome = self.fetch_token_user(&token).await;

            if self.api.tokens().get().as_deref() != Some(token.as_str()) {
                if !self.state.borrow().loading {
                    tracing::debug!("session settled during resolution; dropping result");
                    return self.phase();
                }
                tracing::debug!("stored token replaced during resolution; resolving again");
                continue;
            }

            return match outcome {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, "session restored");
                    let user_id = user.id.clone();
                    self.state.send_replace(Session::authenticated(user, token));
                    self.emit(SessionEvent::Restored { user_id });
                    SessionPhase::Authenticated
                }
                Err(e) => {
                    tracing::warn!(error = %e, "discarding stored token");
                    if let Err(e) = self.api.tokens().clear() {
                        tracing::warn!(error = %e, "failed to clear stored token");
                    }
                    self.state.send_replace(Session::anonymous());
                    self.emit(SessionEvent::Expired);
                    SessionPhase::Anonymous
                }
            };
        }
    }

    async fn fetch_token_user(&self, token: &str) -> Result<User, ResolveError> {
        let payload = decode_payload(token)?;
        Ok(self.api.fetch_user(&payload.user_id).await?)
    }

    /// Sign in and publish the authenticated session.
    ///
    /// If an overlapping login replaced the stored token first, the user is
    /// still returned but the newer login's session stays published.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged; the session is not modified.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, ClientError> {
        let response = self.api.login(credentials).await?;
        let tokens = self.api.tokens();
        let published = self.state.send_if_modified(|session| {
            if tokens.get().as_deref() != Some(response.token.as_str()) {
                return false;
            }
            *session = Session::authenticated(response.user.clone(), response.token.clone());
            true
        });
        if published {
            self.emit(SessionEvent::SignedIn { user_id: response.user.id.clone() });
        } else {
            tracing::debug!(user_id = %response.user.id, "login superseded by a newer token");
        }
        Ok(response.user)
    }

    /// Create an account on behalf of a new user. The current session is
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns the API client's error unchanged.
    pub async fn register(&self, new_user: &NewUser) -> Result<User, ClientError> {
        let created = self.api.create_user(new_user).await?;
        tracing::info!(user_id = %created.user.id, username = %created.user.username, "user created");
        Ok(created.user)
    }

    /// Forget the token and publish an anonymous session. Idempotent.
    pub fn logout(&self) {
        self.api.logout();
        self.state.send_replace(Session::anonymous());
        self.emit(SessionEvent::SignedOut);
        tracing::info!("logged out");
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
