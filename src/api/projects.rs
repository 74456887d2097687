//! Project CRUD.

use super::types::{NewProject, Patch, Project};
use super::{ApiClient, ApiRequest, segment};
use crate::error::ClientError;

fn project_path(project_id: &str) -> String {
    format!("/projects/{}", segment(project_id))
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn fetch_projects(&self) -> Result<Vec<Project>, ClientError> {
        self.request(ApiRequest::get("/projects")).await
    }

    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn fetch_project(&self, project_id: &str) -> Result<Project, ClientError> {
        self.request(ApiRequest::get(project_path(project_id))).await
    }

    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn add_project(&self, project: &NewProject) -> Result<Project, ClientError> {
        self.request(ApiRequest::post("/projects").json(project)).await
    }

    /// Send only the fields in `updates`.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn update_project(&self, project_id: &str, updates: &Patch) -> Result<Project, ClientError> {
        self.request(ApiRequest::put(project_path(project_id)).json(updates)).await
    }

    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn delete_project(&self, project_id: &str) -> Result<(), ClientError> {
        self.request_empty(ApiRequest::delete(project_path(project_id))).await
    }
}

#[cfg(test)]
#[path = "projects_test.rs"]
mod tests;
