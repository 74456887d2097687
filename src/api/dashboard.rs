//! Role-specific dashboard summaries.

use super::types::Dashboard;
use super::{ApiClient, ApiRequest};
use crate::error::ClientError;

impl ApiClient {
    /// `GET /dashboard/admin`
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn fetch_admin_dashboard(&self) -> Result<Dashboard, ClientError> {
        self.request(ApiRequest::get("/dashboard/admin")).await
    }

    /// `GET /dashboard/employee`
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn fetch_employee_dashboard(&self) -> Result<Dashboard, ClientError> {
        self.request(ApiRequest::get("/dashboard/employee")).await
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
