//! Clock-in/clock-out and attendance history.

use serde_json::json;

use super::types::{AttendanceFilters, AttendanceRecord, AttendanceStatus};
use super::{ApiClient, ApiRequest};
use crate::error::ClientError;

/// Both filter keys are always sent; an absent filter is an empty value.
fn attendance_list_path(filters: &AttendanceFilters) -> String {
    let user_id = filters.user_id.as_deref().unwrap_or_default();
    let date = filters.date.as_deref().unwrap_or_default();
    format!("/attendance?userId={}&date={}", urlencoding::encode(user_id), urlencoding::encode(date))
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected
    /// (for example, when already clocked in).
    pub async fn clock_in(&self) -> Result<AttendanceRecord, ClientError> {
        self.request(ApiRequest::post("/attendance/clock-in").json(&json!({}))).await
    }

    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn clock_out(&self) -> Result<AttendanceRecord, ClientError> {
        self.request(ApiRequest::post("/attendance/clock-out").json(&json!({}))).await
    }

    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn fetch_my_attendance_status(&self) -> Result<AttendanceStatus, ClientError> {
        self.request(ApiRequest::get("/attendance/status/me")).await
    }

    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn fetch_attendance_records(
        &self,
        filters: &AttendanceFilters,
    ) -> Result<Vec<AttendanceRecord>, ClientError> {
        self.request(ApiRequest::get(attendance_list_path(filters))).await
    }
}

#[cfg(test)]
#[path = "attendance_test.rs"]
mod tests;
