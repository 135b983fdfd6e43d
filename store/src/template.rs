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

//! Store for the notification template list.

use crate::notifier::{Notifier, error_message};
use backoffice_api::template::TemplateApi;
use backoffice_core::model::TemplateNotification;
use futures::lock::Mutex;
use std::sync::Arc;

/// Mutable state held by the template store.
#[derive(Default)]
struct TemplateState {
    /// Whether an action is currently talking to the server.
    loading: bool,

    /// Last-fetched copy of the template list.
    templates: Vec<TemplateNotification>,
}

/// Client-side state for the notification template page.
pub struct TemplateStore {
    /// Client with which to reach the template endpoints.
    api: Arc<dyn TemplateApi + Send + Sync>,

    /// Sink for user-facing notifications.
    notifier: Arc<dyn Notifier + Send + Sync>,

    /// The held state, behind an async mutex.
    state: Mutex<TemplateState>,
}

impl TemplateStore {
    /// Creates a store that talks to the server via `api` and surfaces messages via
    /// `notifier`.
    pub fn new(
        api: Arc<dyn TemplateApi + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        Self { api, notifier, state: Mutex::from(TemplateState::default()) }
    }

    /// Whether an action is currently talking to the server.
    pub async fn loading(&self) -> bool {
        self.state.lock().await.loading
    }

    /// Returns a copy of the held template list.
    pub async fn templates(&self) -> Vec<TemplateNotification> {
        self.state.lock().await.templates.clone()
    }

    /// Replaces the held list with a fresh copy from the server.
    pub async fn refresh(&self) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.list().await {
            Ok(response) => {
                self.state.lock().await.templates = response.templates;
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

    /// Creates a new template.
    pub async fn create(&self, title: &str, text: &str) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.create(title, text).await {
            Ok(response) => {
                self.state.lock().await.templates = response.templates;
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

    /// Updates the template behind `id`.
    pub async fn update(&self, id: &str, title: &str, text: &str) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.update(id, title, text).await {
            Ok(response) => {
                self.state.lock().await.templates = response.templates;
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

    /// Deletes the template behind `id` and drops it from the held list.
    pub async fn delete(&self, id: &str) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.delete(id).await {
            Ok(message) => {
                self.state.lock().await.templates.retain(|template| template.id != id);
                if let Some(message) = message {
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
    use backoffice_api::template::{ListTemplatesResponse, MockTemplateApi};

    /// Builds a template with the given `id` and placeholder contents everywhere else.
    fn template(id: &str) -> TemplateNotification {
        TemplateNotification::new(id.to_owned(), "Aviso".to_owned(), "Olá!".to_owned())
    }

    /// Builds a list response containing one template per entry in `ids`.
    fn listing(ids: &[&str], message: Option<&str>) -> ListTemplatesResponse {
        let templates = ids.iter().map(|id| template(id)).collect();
        ListTemplatesResponse { templates, message: message.map(str::to_owned) }
    }

    /// Returns the identifiers of the templates held by `store`.
    async fn held_ids(store: &TemplateStore) -> Vec<String> {
        store.templates().await.into_iter().map(|template| template.id).collect()
    }

    #[tokio::test]
    async fn test_refresh_replaces_the_list() {
        let api = Arc::new(MockTemplateApi::default());
        api.list.returns(Ok(listing(&["t1"], None))).await;
        api.list.returns(Ok(listing(&["t2", "t3"], None))).await;
        let notifier = RecorderNotifier::default();
        let store = TemplateStore::new(api, Arc::from(notifier.clone()));

        store.refresh().await.unwrap();
        assert_eq!(vec!["t1"], held_ids(&store).await);

        store.refresh().await.unwrap();
        assert_eq!(vec!["t2", "t3"], held_ids(&store).await);

        notifier.expect_no_notifications().await;
        assert!(!store.loading().await);
    }

    #[tokio::test]
    async fn test_create_refills_and_notifies() {
        let api = Arc::new(MockTemplateApi::default());
        api.create.returns(Ok(listing(&["t1"], Some("Modelo criado")))).await;
        let notifier = RecorderNotifier::default();
        let store = TemplateStore::new(api.clone(), Arc::from(notifier.clone()));

        store.create("Aviso", "Olá!").await.unwrap();

        assert_eq!(vec!["t1"], held_ids(&store).await);
        assert_eq!(vec![("Aviso".to_owned(), "Olá!".to_owned())], api.create.requests().await);
        notifier.expect_one_success("Modelo criado").await;
    }

    #[tokio::test]
    async fn test_delete_filters_the_list() {
        let api = Arc::new(MockTemplateApi::default());
        api.list.returns(Ok(listing(&["t1", "t2"], None))).await;
        api.delete.returns(Ok(Some("Modelo removido".to_owned()))).await;
        let notifier = RecorderNotifier::default();
        let store = TemplateStore::new(api, Arc::from(notifier.clone()));

        store.refresh().await.unwrap();
        store.delete("t2").await.unwrap();

        assert_eq!(vec!["t1"], held_ids(&store).await);
        notifier.expect_one_success("Modelo removido").await;
    }

    #[tokio::test]
    async fn test_update_error_keeps_the_list() {
        let api = Arc::new(MockTemplateApi::default());
        api.list.returns(Ok(listing(&["t1"], None))).await;
        api.update
            .returns(Err(ApiError::Transport {
                status: 404,
                message: Some("Modelo não encontrado".to_owned()),
            }))
            .await;
        let notifier = RecorderNotifier::default();
        let store = TemplateStore::new(api, Arc::from(notifier.clone()));

        store.refresh().await.unwrap();
        assert_eq!(None, store.update("t9", "Aviso", "Olá!").await);

        assert_eq!(vec!["t1"], held_ids(&store).await);
        notifier.expect_one_error("Modelo não encontrado").await;
        assert!(!store.loading().await);
    }
}
