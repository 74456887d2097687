//! Daily work reports.

use super::types::{DailyWorkReport, NewWorkReport};
use super::{ApiClient, ApiRequest, segment};
use crate::error::ClientError;

impl ApiClient {
    /// Submit today's report for the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn submit_work_report(&self, report: &NewWorkReport) -> Result<DailyWorkReport, ClientError> {
        self.request(ApiRequest::post("/work-reports").json(report)).await
    }

    /// The signed-in user's own reports.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn fetch_my_work_reports(&self) -> Result<Vec<DailyWorkReport>, ClientError> {
        self.request(ApiRequest::get("/work-reports")).await
    }

    /// Every employee's reports (administrator only).
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn fetch_all_work_reports(&self) -> Result<Vec<DailyWorkReport>, ClientError> {
        self.request(ApiRequest::get("/work-reports/all")).await
    }

    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn fetch_work_report(&self, report_id: &str) -> Result<DailyWorkReport, ClientError> {
        self.request(ApiRequest::get(format!("/work-reports/{}", segment(report_id)))).await
    }
}

#[cfg(test)]
#[path = "work_reports_test.rs"]
mod tests;
