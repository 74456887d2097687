//! Leave requests and their approval flow.

use serde::Serialize;

use super::types::{LeaveDecision, LeaveRequest, NewLeaveRequest};
use super::{ApiClient, ApiRequest, segment};
use crate::error::ClientError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusChange<'a> {
    status: LeaveDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    admin_notes: Option<&'a str>,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn apply_for_leave(&self, request: &NewLeaveRequest) -> Result<LeaveRequest, ClientError> {
        self.request(ApiRequest::post("/leave-requests").json(request)).await
    }

    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn fetch_my_leave_requests(&self) -> Result<Vec<LeaveRequest>, ClientError> {
        self.request(ApiRequest::get("/leave-requests/my-requests")).await
    }

    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn fetch_all_leave_requests(&self) -> Result<Vec<LeaveRequest>, ClientError> {
        self.request(ApiRequest::get("/leave-requests")).await
    }

    /// Approve or reject a request. Only these two outcomes are expressible.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn update_leave_status(
        &self,
        request_id: &str,
        decision: LeaveDecision,
        admin_notes: Option<&str>,
    ) -> Result<LeaveRequest, ClientError> {
        let path = format!("/leave-requests/{}/status", segment(request_id));
        let body = StatusChange { status: decision, admin_notes };
        self.request(ApiRequest::put(path).json(&body)).await
    }

    /// Withdraw the signed-in user's own request.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn cancel_leave_request(&self, request_id: &str) -> Result<LeaveRequest, ClientError> {
        let path = format!("/leave-requests/{}/cancel", segment(request_id));
        self.request(ApiRequest::put(path)).await
    }
}

#[cfg(test)]
#[path = "leave_test.rs"]
mod tests;
