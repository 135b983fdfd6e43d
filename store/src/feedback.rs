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

//! Store for the feedback inbox and archive.
//!
//! The server keeps feedbacks in two buckets, the inbox of fresh entries and the archive
//! of saved ones, but the client shows only one bucket at a time so a single held list
//! serves both.  Which bucket the list currently mirrors depends on whether `refresh` or
//! `refresh_saved` ran last.

use crate::notifier::{Notifier, error_message};
use backoffice_api::feedback::FeedbackApi;
use backoffice_core::model::Feedback;
use futures::lock::Mutex;
use std::sync::Arc;

/// Mutable state held by the feedback store.
#[derive(Default)]
struct FeedbackState {
    /// Whether an action is currently talking to the server.
    loading: bool,

    /// Last-fetched copy of the bucket selected by the last refresh.
    feedbacks: Vec<Feedback>,
}

/// Client-side state for the feedback pages.
pub struct FeedbackStore {
    /// Client with which to reach the feedback endpoints.
    api: Arc<dyn FeedbackApi + Send + Sync>,

    /// Sink for user-facing notifications.
    notifier: Arc<dyn Notifier + Send + Sync>,

    /// The held state, behind an async mutex.
    state: Mutex<FeedbackState>,
}

impl FeedbackStore {
    /// Creates a store that talks to the server via `api` and surfaces messages via
    /// `notifier`.
    pub fn new(
        api: Arc<dyn FeedbackApi + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        Self { api, notifier, state: Mutex::from(FeedbackState::default()) }
    }

    /// Whether an action is currently talking to the server.
    pub async fn loading(&self) -> bool {
        self.state.lock().await.loading
    }

    /// Returns a copy of the held feedback list.
    pub async fn feedbacks(&self) -> Vec<Feedback> {
        self.state.lock().await.feedbacks.clone()
    }

    /// Replaces the held list with a fresh copy of the inbox.
    pub async fn refresh(&self) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.list().await {
            Ok(response) => {
                self.state.lock().await.feedbacks = response.feedbacks;
                Some(())
            }
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Replaces the held list with a fresh copy of the archive.
    pub async fn refresh_saved(&self) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.list_saved().await {
            Ok(response) => {
                self.state.lock().await.feedbacks = response.feedbacks;
                Some(())
            }
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Returns how many feedbacks have not been seen yet.
    pub async fn notification_count(&self) -> Option<u64> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.notification_count().await {
            Ok(count) => Some(count),
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Archives the feedback behind `id` and refills the held list with the refreshed
    /// inbox.
    pub async fn save(&self, id: &str) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.save(id).await {
            Ok(response) => {
                self.state.lock().await.feedbacks = response.feedbacks;
                if let Some(message) = response.message {
                    self.notifier.success(&message).await;
                }
                Some(())
            }
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Deletes the feedback behind `id` from the inbox and refills the held list with the
    /// refreshed inbox.
    pub async fn delete(&self, id: &str) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.delete(id).await {
            Ok(response) => {
                self.state.lock().await.feedbacks = response.feedbacks;
                if let Some(message) = response.message {
                    self.notifier.success(&message).await;
                }
                Some(())
            }
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Deletes the feedback behind `id` from the archive and refills the held list with
    /// the refreshed archive.
    pub async fn delete_saved(&self, id: &str) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.delete_saved(id).await {
            Ok(response) => {
                self.state.lock().await.feedbacks = response.feedbacks;
                if let Some(message) = response.message {
                    self.notifier.success(&message).await;
                }
                Some(())
            }
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::RecorderNotifier;
    use backoffice_api::errors::ApiError;
    use backoffice_api::feedback::{ListFeedbacksResponse, MockFeedbackApi};

    /// Builds a bucket response containing one feedback per entry in `ids`.
    fn bucket(ids: &[&str], message: Option<&str>) -> ListFeedbacksResponse {
        let feedbacks = ids.iter().map(|id| Feedback::for_test(id, "Muito bom")).collect();
        ListFeedbacksResponse { feedbacks, message: message.map(str::to_owned) }
    }

    /// Returns the identifiers of the feedbacks held by `store`.
    async fn held_ids(store: &FeedbackStore) -> Vec<String> {
        store.feedbacks().await.into_iter().map(|feedback| feedback.id).collect()
    }

    #[tokio::test]
    async fn test_refresh_saved_replaces_the_inbox_view() {
        let api = Arc::new(MockFeedbackApi::default());
        api.list.returns(Ok(bucket(&["f1", "f2"], None))).await;
        api.list_saved.returns(Ok(bucket(&["f9"], None))).await;
        let notifier = RecorderNotifier::default();
        let store = FeedbackStore::new(api, Arc::from(notifier.clone()));

        store.refresh().await.unwrap();
        assert_eq!(vec!["f1", "f2"], held_ids(&store).await);

        store.refresh_saved().await.unwrap();
        assert_eq!(vec!["f9"], held_ids(&store).await);

        notifier.expect_no_notifications().await;
        assert!(!store.loading().await);
    }

    #[tokio::test]
    async fn test_save_refills_and_notifies() {
        let api = Arc::new(MockFeedbackApi::default());
        api.save.returns(Ok(bucket(&["f2"], Some("Feedback arquivado")))).await;
        let notifier = RecorderNotifier::default();
        let store = FeedbackStore::new(api.clone(), Arc::from(notifier.clone()));

        store.save("f1").await.unwrap();

        assert_eq!(vec!["f2"], held_ids(&store).await);
        assert_eq!(vec!["f1".to_owned()], api.save.requests().await);
        notifier.expect_one_success("Feedback arquivado").await;
    }

    #[tokio::test]
    async fn test_notification_count_passes_through() {
        let api = Arc::new(MockFeedbackApi::default());
        api.notification_count.returns(Ok(7)).await;
        let notifier = RecorderNotifier::default();
        let store = FeedbackStore::new(api, Arc::from(notifier.clone()));

        assert_eq!(Some(7), store.notification_count().await);
        notifier.expect_no_notifications().await;
        assert!(!store.loading().await);
    }

    #[tokio::test]
    async fn test_delete_error_notifies_and_keeps_the_list() {
        let api = Arc::new(MockFeedbackApi::default());
        api.list.returns(Ok(bucket(&["f1"], None))).await;
        api.delete.returns(Err(ApiError::Unknown)).await;
        let notifier = RecorderNotifier::default();
        let store = FeedbackStore::new(api, Arc::from(notifier.clone()));

        store.refresh().await.unwrap();
        assert_eq!(None, store.delete("f1").await);

        assert_eq!(vec!["f1"], held_ids(&store).await);
        notifier.expect_one_error("Error").await;
        assert!(!store.loading().await);
    }
}
