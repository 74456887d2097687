//! Internal messaging between employees.

use super::types::{InternalMessage, NewMessage};
use super::{ApiClient, ApiRequest, segment};
use crate::error::ClientError;

impl ApiClient {
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn send_message(&self, message: &NewMessage) -> Result<InternalMessage, ClientError> {
        self.request(ApiRequest::post("/messages/send").json(message)).await
    }

    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn fetch_my_messages(&self) -> Result<Vec<InternalMessage>, ClientError> {
        self.request(ApiRequest::get("/messages/my-messages")).await
    }

    /// The backend answers with a bare JSON number.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn fetch_unread_message_count(&self) -> Result<u64, ClientError> {
        self.request(ApiRequest::get("/messages/unread-count")).await
    }

    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn mark_message_read(&self, message_id: &str) -> Result<(), ClientError> {
        let path = format!("/messages/{}/read", segment(message_id));
        self.request_empty(ApiRequest::put(path)).await
    }

    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or is rejected.
    pub async fn mark_all_messages_read(&self) -> Result<(), ClientError> {
        self.request_empty(ApiRequest::post("/messages/read-all")).await
    }
}

#[cfg(test)]
#[path = "messages_test.rs"]
mod tests;
