// Backoffice
// Copyright 2024 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Client for the feedback endpoints.
//!
//! Feedbacks live in two buckets on the server: the inbox of fresh entries and the archive
//! of saved ones.  Every mutation returns the refreshed content of the bucket it acted on.

use crate::client::{ApiClient, json_or_error};
use crate::errors::ApiResult;
use async_trait::async_trait;
use backoffice_core::model::Feedback;
use serde::Deserialize;

/// Response carrying the feedbacks of one bucket.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ListFeedbacksResponse {
    /// Feedbacks in the requested bucket.
    pub feedbacks: Vec<Feedback>,

    /// Informational message to surface to the user, if any.
    #[serde(default)]
    pub message: Option<String>,
}

/// Shape of the body of the pending notification count response.
#[derive(Deserialize)]
struct NotificationCountBody {
    /// Number of feedbacks not yet seen by the administrators.
    notifications: u64,
}

/// Interface to the feedback endpoints.
#[async_trait]
pub trait FeedbackApi {
    /// Fetches the inbox of fresh feedbacks.
    async fn list(&self) -> ApiResult<ListFeedbacksResponse>;

    /// Fetches the archive of saved feedbacks.
    async fn list_saved(&self) -> ApiResult<ListFeedbacksResponse>;

    /// Returns how many feedbacks have not been seen yet.
    async fn notification_count(&self) -> ApiResult<u64>;

    /// Archives the feedback behind `id` and returns the refreshed inbox.
    async fn save(&self, id: &str) -> ApiResult<ListFeedbacksResponse>;

    /// Deletes the feedback behind `id` from the inbox and returns the refreshed inbox.
    async fn delete(&self, id: &str) -> ApiResult<ListFeedbacksResponse>;

    /// Deletes the feedback behind `id` from the archive and returns the refreshed
    /// archive.
    async fn delete_saved(&self, id: &str) -> ApiResult<ListFeedbacksResponse>;
}

/// Implementation of the feedback interface against the real server.
#[derive(Clone)]
pub struct RestFeedbackApi {
    /// The shared HTTP client with which to issue requests.
    client: ApiClient,
}

impl RestFeedbackApi {
    /// Creates a new client that issues requests via `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FeedbackApi for RestFeedbackApi {
    async fn list(&self) -> ApiResult<ListFeedbacksResponse> {
        let response = self.client.get("feedbacks").await?;
        json_or_error(response).await
    }

    async fn list_saved(&self) -> ApiResult<ListFeedbacksResponse> {
        let response = self.client.get("feedbacks/saved").await?;
        json_or_error(response).await
    }

    async fn notification_count(&self) -> ApiResult<u64> {
        let response = self.client.get("feedbacks/notifications").await?;
        let body: NotificationCountBody = json_or_error(response).await?;
        Ok(body.notifications)
    }

    async fn save(&self, id: &str) -> ApiResult<ListFeedbacksResponse> {
        let response = self.client.post_empty(&format!("feedbacks/{}", id)).await?;
        json_or_error(response).await
    }

    async fn delete(&self, id: &str) -> ApiResult<ListFeedbacksResponse> {
        let response = self.client.delete(&format!("feedbacks/{}", id)).await?;
        json_or_error(response).await
    }

    async fn delete_saved(&self, id: &str) -> ApiResult<ListFeedbacksResponse> {
        let response = self.client.delete(&format!("feedbacks/saved/{}", id)).await?;
        json_or_error(response).await
    }
}

/// Implementation of the feedback interface that returns canned responses.
#[cfg(any(test, feature = "testutils"))]
#[derive(Default)]
pub struct MockFeedbackApi {
    /// Canned behavior of the `list` operation.
    pub list: crate::testutils::MockOp<(), ListFeedbacksResponse>,

    /// Canned behavior of the `list_saved` operation.
    pub list_saved: crate::testutils::MockOp<(), ListFeedbacksResponse>,

    /// Canned behavior of the `notification_count` operation.
    pub notification_count: crate::testutils::MockOp<(), u64>,

    /// Canned behavior of the `save` operation, keyed by feedback identifier.
    pub save: crate::testutils::MockOp<String, ListFeedbacksResponse>,

    /// Canned behavior of the `delete` operation, keyed by feedback identifier.
    pub delete: crate::testutils::MockOp<String, ListFeedbacksResponse>,

    /// Canned behavior of the `delete_saved` operation, keyed by feedback identifier.
    pub delete_saved: crate::testutils::MockOp<String, ListFeedbacksResponse>,
}

#[cfg(any(test, feature = "testutils"))]
#[async_trait]
impl FeedbackApi for MockFeedbackApi {
    async fn list(&self) -> ApiResult<ListFeedbacksResponse> {
        self.list.call(()).await
    }

    async fn list_saved(&self) -> ApiResult<ListFeedbacksResponse> {
        self.list_saved.call(()).await
    }

    async fn notification_count(&self) -> ApiResult<u64> {
        self.notification_count.call(()).await
    }

    async fn save(&self, id: &str) -> ApiResult<ListFeedbacksResponse> {
        self.save.call(id.to_owned()).await
    }

    async fn delete(&self, id: &str) -> ApiResult<ListFeedbacksResponse> {
        self.delete.call(id.to_owned()).await
    }

    async fn delete_saved(&self, id: &str) -> ApiResult<ListFeedbacksResponse> {
        self.delete_saved.call(id.to_owned()).await
    }
}
