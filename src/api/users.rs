//! User records and passwords.

use serde_json::json;

use super::types::{ChangePassword, User, UserUpdate};
use super::{ApiClient, ApiRequest, segment};
use crate::error::ClientError;

fn user_path(user_id: &str) -> String {
    format!("/users/{}", segment(user_id))
}

impl ApiClient {
    /// `GET /users`
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn fetch_users(&self) -> Result<Vec<User>, ClientError> {
        self.request(ApiRequest::get("/users")).await
    }

    /// `GET /users/:id`
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn fetch_user(&self, user_id: &str) -> Result<User, ClientError> {
        self.request(ApiRequest::get(user_path(user_id))).await
    }

    /// `PUT /users/:id` with fields the user may change on their own profile.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn update_profile(&self, user_id: &str, update: &UserUpdate) -> Result<User, ClientError> {
        self.request(ApiRequest::put(user_path(user_id)).json(update)).await
    }

    /// `PUT /users/:id` as an administrator; the backend accepts role changes.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn admin_update_user(&self, user_id: &str, update: &UserUpdate) -> Result<User, ClientError> {
        tracing::info!(%user_id, role_change = update.role.is_some(), "admin user update");
        self.request(ApiRequest::put(user_path(user_id)).json(update)).await
    }

    /// `DELETE /users/:id`
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn delete_user(&self, user_id: &str) -> Result<(), ClientError> {
        self.request_empty(ApiRequest::delete(user_path(user_id))).await
    }

    /// `POST /users/:id/change-password`
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn change_password(&self, user_id: &str, change: &ChangePassword) -> Result<(), ClientError> {
        let path = format!("{}/change-password", user_path(user_id));
        self.request_empty(ApiRequest::post(path).json(change)).await
    }

    /// `POST /users/:id/reset-password` (administrator only).
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn admin_reset_password(&self, user_id: &str, new_password: &str) -> Result<(), ClientError> {
        let path = format!("{}/reset-password", user_path(user_id));
        self.request_empty(ApiRequest::post(path).json(&json!({ "newPassword": new_password })))
            .await
    }
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
