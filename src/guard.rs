//! Route table and auth gating.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every view applies the same unauthenticated-redirect rule, so the rule
//! lives here as pure functions over a [`Session`] snapshot. Navigation in
//! response to login/logout is driven by [`spawn_navigation_observer`], which
//! keeps routing out of the session manager.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::session::{Session, SessionEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Public landing page.
    Welcome,
    Login,
    /// Protected area; everything under `/app`.
    App,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Welcome => "/welcome",
            Self::Login => "/login",
            Self::App => "/app",
        }
    }

    #[must_use]
    pub fn is_protected(self) -> bool {
        matches!(self, Self::App)
    }
}

/// What a view should do with the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show the requested view.
    Render,
    /// Show nothing until the session resolves.
    Placeholder,
    Redirect(Route),
}

/// Map a request path onto the route table. Unknown paths and `/` redirect
/// to the welcome page.
#[must_use]
pub fn match_path(path: &str) -> Result<Route, Route> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    match trimmed {
        "/welcome" => Ok(Route::Welcome),
        "/login" => Ok(Route::Login),
        "/app" => Ok(Route::App),
        p if p.starts_with("/app/") => Ok(Route::App),
        _ => Err(Route::Welcome),
    }
}

/// Gate a protected view on the session.
#[must_use]
pub fn guard(session: &Session) -> GuardDecision {
    if session.loading {
        GuardDecision::Placeholder
    } else if should_redirect_unauth(session) {
        GuardDecision::Redirect(Route::Welcome)
    } else {
        GuardDecision::Render
    }
}

/// True once loading has finished and no user is present.
#[must_use]
pub fn should_redirect_unauth(session: &Session) -> bool {
    !session.loading && session.user.is_none()
}

/// Full decision for a path: route lookup, protection, and the login page's
/// bounce to `/app` for an already-signed-in user.
#[must_use]
pub fn decide(path: &str, session: &Session) -> GuardDecision {
    match match_path(path) {
        Err(target) => GuardDecision::Redirect(target),
        Ok(route) if route.is_protected() => guard(session),
        Ok(Route::Login) if session.is_authenticated() => GuardDecision::Redirect(Route::App),
        Ok(_) => GuardDecision::Render,
    }
}

/// Where to go after a session event, if anywhere.
#[must_use]
pub fn navigation_for(event: &SessionEvent) -> Option<Route> {
    match event {
        SessionEvent::SignedIn { .. } => Some(Route::App),
        SessionEvent::SignedOut => Some(Route::Welcome),
        SessionEvent::Restored { .. } | SessionEvent::Expired => None,
    }
}

/// Something that can move the UI to a route.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Forward navigation-worthy session events to `navigator` until the
/// session manager is dropped.
pub fn spawn_navigation_observer(
    mut events: broadcast::Receiver<SessionEvent>,
    navigator: Arc<dyn Navigator>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if let Some(route) = navigation_for(&event) {
                        tracing::debug!(path = route.path(), "navigating");
                        navigator.navigate(route);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "navigation observer lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
