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

//! Store for the per-installation settings.

use crate::notifier::{Notifier, error_message};
use backoffice_api::setting::SettingApi;
use backoffice_core::model::Setting;
use futures::lock::Mutex;
use std::sync::Arc;

/// Mutable state held by the setting store.
#[derive(Default)]
struct SettingState {
    /// Whether an action is currently talking to the server.
    loading: bool,

    /// Last-fetched copy of the settings, as the list the server models them in.
    settings: Vec<Setting>,
}

/// Client-side state for the settings page.
pub struct SettingStore {
    /// Client with which to reach the setting endpoints.
    api: Arc<dyn SettingApi + Send + Sync>,

    /// Sink for user-facing notifications.
    notifier: Arc<dyn Notifier + Send + Sync>,

    /// The held state, behind an async mutex.
    state: Mutex<SettingState>,
}

impl SettingStore {
    /// Creates a store that talks to the server via `api` and surfaces messages via
    /// `notifier`.
    pub fn new(
        api: Arc<dyn SettingApi + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        Self { api, notifier, state: Mutex::from(SettingState::default()) }
    }

    /// Whether an action is currently talking to the server.
    pub async fn loading(&self) -> bool {
        self.state.lock().await.loading
    }

    /// Returns a copy of the held settings.
    pub async fn settings(&self) -> Vec<Setting> {
        self.state.lock().await.settings.clone()
    }

    /// Replaces the held settings with a fresh copy from the server.
    pub async fn refresh(&self) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.get().await {
            Ok(response) => {
                self.state.lock().await.settings = response.settings;
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

    /// Updates the settings.
    pub async fn update(&self, allow_feedback_saved: bool) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.update(allow_feedback_saved).await {
            Ok(response) => {
                self.state.lock().await.settings = response.settings;
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
    use backoffice_api::setting::{ListSettingsResponse, MockSettingApi};

    #[tokio::test]
    async fn test_refresh_replaces_the_settings() {
        let api = Arc::new(MockSettingApi::default());
        let response = ListSettingsResponse {
            settings: vec![Setting { allow_feedback_saved: true }],
            message: None,
        };
        api.get.returns(Ok(response)).await;
        let notifier = RecorderNotifier::default();
        let store = SettingStore::new(api, Arc::from(notifier.clone()));

        store.refresh().await.unwrap();

        assert_eq!(vec![Setting { allow_feedback_saved: true }], store.settings().await);
        notifier.expect_no_notifications().await;
        assert!(!store.loading().await);
    }

    #[tokio::test]
    async fn test_update_refills_and_notifies() {
        let api = Arc::new(MockSettingApi::default());
        let response = ListSettingsResponse {
            settings: vec![Setting { allow_feedback_saved: false }],
            message: Some("Configuração salva".to_owned()),
        };
        api.update.returns(Ok(response)).await;
        let notifier = RecorderNotifier::default();
        let store = SettingStore::new(api.clone(), Arc::from(notifier.clone()));

        store.update(false).await.unwrap();

        assert_eq!(vec![Setting { allow_feedback_saved: false }], store.settings().await);
        assert_eq!(vec![false], api.update.requests().await);
        notifier.expect_one_success("Configuração salva").await;
    }

    #[tokio::test]
    async fn test_update_error_keeps_the_settings() {
        let api = Arc::new(MockSettingApi::default());
        let response = ListSettingsResponse {
            settings: vec![Setting { allow_feedback_saved: true }],
            message: None,
        };
        api.get.returns(Ok(response)).await;
        api.update.returns(Err(ApiError::Unknown)).await;
        let notifier = RecorderNotifier::default();
        let store = SettingStore::new(api, Arc::from(notifier.clone()));

        store.refresh().await.unwrap();
        assert_eq!(None, store.update(false).await);

        assert_eq!(vec![Setting { allow_feedback_saved: true }], store.settings().await);
        notifier.expect_one_error("Error").await;
        assert!(!store.loading().await);
    }
}
