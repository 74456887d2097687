//! Login, logout, and account creation.
//!
//! Login is the only call that writes the token store as a side effect of a
//! successful response. Logout never touches the network.

use super::types::{CreatedUser, Credentials, LoginResponse, NewUser};
use super::{ApiClient, ApiRequest, ErrorFallback, json_only_headers};
use crate::error::{ClientError, LOGIN_FAILED};

const LOGIN_FALLBACK: ErrorFallback = ErrorFallback { missing_message: LOGIN_FAILED, unparsable: None };

impl ApiClient {
    /// Exchange credentials for a user and bearer token via `POST /auth/login`.
    ///
    /// The request carries no `Authorization` header, even if a token is
    /// stored. On success the returned token replaces the stored one.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`] on rejection (the store is left
    /// untouched), [`ClientError::Network`] when unreachable, and
    /// [`ClientError::Storage`] if the token cannot be persisted.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ClientError> {
        let req = ApiRequest::post("/auth/login")
            .headers(json_only_headers())
            .error_fallback(LOGIN_FALLBACK)
            .json(credentials);
        let response: LoginResponse = self.request(req).await?;
        self.tokens.set(&response.token)?;
        tracing::info!(user_id = %response.user.id, "login succeeded");
        Ok(response)
    }

    /// Forget the stored token. Always succeeds; a storage failure is logged.
    pub fn logout(&self) {
        if let Err(e) = self.tokens.clear() {
            tracing::warn!(error = %e, "failed to clear stored token");
        }
    }

    /// Create an account via `POST /users`. Requires an administrator token.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn create_user(&self, new_user: &NewUser) -> Result<CreatedUser, ClientError> {
        self.request(ApiRequest::post("/users").json(new_user)).await
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
