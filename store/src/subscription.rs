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

//! Store for the subscription plan list.

use crate::notifier::{Notifier, error_message};
use backoffice_api::subscription::SubscriptionApi;
use backoffice_core::model::Subscription;
use futures::lock::Mutex;
use std::sync::Arc;

/// Mutable state held by the subscription store.
#[derive(Default)]
struct SubscriptionState {
    /// Whether an action is currently talking to the server.
    loading: bool,

    /// Last-fetched copy of the plan list.
    subscriptions: Vec<Subscription>,
}

/// Client-side state for the subscription administration page.
pub struct SubscriptionStore {
    /// Client with which to reach the subscription endpoints.
    api: Arc<dyn SubscriptionApi + Send + Sync>,

    /// Sink for user-facing notifications.
    notifier: Arc<dyn Notifier + Send + Sync>,

    /// The held state, behind an async mutex.
    state: Mutex<SubscriptionState>,
}

impl SubscriptionStore {
    /// Creates a store that talks to the server via `api` and surfaces messages via
    /// `notifier`.
    pub fn new(
        api: Arc<dyn SubscriptionApi + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        Self { api, notifier, state: Mutex::from(SubscriptionState::default()) }
    }

    /// Whether an action is currently talking to the server.
    pub async fn loading(&self) -> bool {
        self.state.lock().await.loading
    }

    /// Returns a copy of the held plan list.
    pub async fn subscriptions(&self) -> Vec<Subscription> {
        self.state.lock().await.subscriptions.clone()
    }

    /// Replaces the held list with a fresh copy from the server.
    pub async fn refresh(&self) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.list().await {
            Ok(response) => {
                self.state.lock().await.subscriptions = response.subscriptions;
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

    /// Changes the price of the plan behind `id`.
    pub async fn update_price(&self, id: &str, price: f64) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.update_price(id, price).await {
            Ok(response) => {
                self.state.lock().await.subscriptions = response.subscriptions;
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
    use backoffice_api::subscription::{ListSubscriptionsResponse, MockSubscriptionApi};

    /// Builds a plan with the given `id` and `price`.
    fn plan(id: &str, price: f64) -> Subscription {
        Subscription { id: id.to_owned(), name: "Pro".to_owned(), price, enterprises_using: 0 }
    }

    #[tokio::test]
    async fn test_refresh_replaces_the_list() {
        let api = Arc::new(MockSubscriptionApi::default());
        let response =
            ListSubscriptionsResponse { subscriptions: vec![plan("s1", 49.9)], message: None };
        api.list.returns(Ok(response)).await;
        let notifier = RecorderNotifier::default();
        let store = SubscriptionStore::new(api, Arc::from(notifier.clone()));

        store.refresh().await.unwrap();

        assert_eq!(vec![plan("s1", 49.9)], store.subscriptions().await);
        notifier.expect_no_notifications().await;
        assert!(!store.loading().await);
    }

    #[tokio::test]
    async fn test_update_price_refills_and_notifies() {
        let api = Arc::new(MockSubscriptionApi::default());
        let response = ListSubscriptionsResponse {
            subscriptions: vec![plan("s1", 59.9)],
            message: Some("Preço atualizado".to_owned()),
        };
        api.update_price.returns(Ok(response)).await;
        let notifier = RecorderNotifier::default();
        let store = SubscriptionStore::new(api.clone(), Arc::from(notifier.clone()));

        store.update_price("s1", 59.9).await.unwrap();

        assert_eq!(vec![plan("s1", 59.9)], store.subscriptions().await);
        assert_eq!(vec![("s1".to_owned(), 59.9)], api.update_price.requests().await);
        notifier.expect_one_success("Preço atualizado").await;
    }

    #[tokio::test]
    async fn test_update_price_error_keeps_the_list() {
        let api = Arc::new(MockSubscriptionApi::default());
        let response =
            ListSubscriptionsResponse { subscriptions: vec![plan("s1", 49.9)], message: None };
        api.list.returns(Ok(response)).await;
        api.update_price.returns(Err(ApiError::Unknown)).await;
        let notifier = RecorderNotifier::default();
        let store = SubscriptionStore::new(api, Arc::from(notifier.clone()));

        store.refresh().await.unwrap();
        assert_eq!(None, store.update_price("s1", 0.0).await);

        assert_eq!(vec![plan("s1", 49.9)], store.subscriptions().await);
        notifier.expect_one_error("Error").await;
        assert!(!store.loading().await);
    }
}
