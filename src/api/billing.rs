//! Billing records, optionally filtered to one employee.

use super::types::{BillingRecord, Patch};
use super::{ApiClient, ApiRequest, segment};
use crate::error::ClientError;

fn billing_list_path(user_id: Option<&str>) -> String {
    match user_id {
        Some(id) if !id.is_empty() => format!("/billing-records?userId={}", urlencoding::encode(id)),
        _ => "/billing-records".to_owned(),
    }
}

fn billing_record_path(record_id: &str) -> String {
    format!("/billing-records/{}", segment(record_id))
}

impl ApiClient {
    /// `GET /billing-records`, or only `user_id`'s records when given.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn fetch_billing_records(&self, user_id: Option<&str>) -> Result<Vec<BillingRecord>, ClientError> {
        self.request(ApiRequest::get(billing_list_path(user_id))).await
    }

    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn add_billing_record(&self, record: &Patch) -> Result<BillingRecord, ClientError> {
        self.request(ApiRequest::post("/billing-records").json(record)).await
    }

    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn update_billing_record(&self, record_id: &str, updates: &Patch) -> Result<BillingRecord, ClientError> {
        self.request(ApiRequest::put(billing_record_path(record_id)).json(updates)).await
    }

    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn delete_billing_record(&self, record_id: &str) -> Result<(), ClientError> {
        self.request_empty(ApiRequest::delete(billing_record_path(record_id))).await
    }
}

#[cfg(test)]
#[path = "billing_test.rs"]
mod tests;
