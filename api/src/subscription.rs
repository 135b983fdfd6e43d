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

//! Client for the subscription plan endpoints.

use crate::client::{ApiClient, json_or_error};
use crate::errors::ApiResult;
use async_trait::async_trait;
use backoffice_core::model::Subscription;
use serde::{Deserialize, Serialize};

/// Response carrying the full list of subscription plans, which the server returns for
/// every operation that changes it.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ListSubscriptionsResponse {
    /// All subscription plans known to the server.
    pub subscriptions: Vec<Subscription>,

    /// Informational message to surface to the user, if any.
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload of the price update request.
#[derive(Serialize)]
struct UpdatePriceRequest<'a> {
    /// Identifier of the plan to reprice.
    id: &'a str,

    /// New monthly price of the plan.
    price: f64,
}

/// Interface to the subscription plan endpoints.
#[async_trait]
pub trait SubscriptionApi {
    /// Fetches the full list of subscription plans.
    async fn list(&self) -> ApiResult<ListSubscriptionsResponse>;

    /// Changes the price of the plan behind `id` and returns the refreshed list.
    async fn update_price(&self, id: &str, price: f64) -> ApiResult<ListSubscriptionsResponse>;
}

/// Implementation of the subscription interface against the real server.
#[derive(Clone)]
pub struct RestSubscriptionApi {
    /// The shared HTTP client with which to issue requests.
    client: ApiClient,
}

impl RestSubscriptionApi {
    /// Creates a new client that issues requests via `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SubscriptionApi for RestSubscriptionApi {
    async fn list(&self) -> ApiResult<ListSubscriptionsResponse> {
        let response = self.client.get("subscription").await?;
        json_or_error(response).await
    }

    async fn update_price(&self, id: &str, price: f64) -> ApiResult<ListSubscriptionsResponse> {
        let response = self.client.put("subscription", &UpdatePriceRequest { id, price }).await?;
        json_or_error(response).await
    }
}

/// Implementation of the subscription interface that returns canned responses.
#[cfg(any(test, feature = "testutils"))]
#[derive(Default)]
pub struct MockSubscriptionApi {
    /// Canned behavior of the `list` operation.
    pub list: crate::testutils::MockOp<(), ListSubscriptionsResponse>,

    /// Canned behavior of the `update_price` operation, keyed by `(id, price)`.
    pub update_price: crate::testutils::MockOp<(String, f64), ListSubscriptionsResponse>,
}

#[cfg(any(test, feature = "testutils"))]
#[async_trait]
impl SubscriptionApi for MockSubscriptionApi {
    async fn list(&self) -> ApiResult<ListSubscriptionsResponse> {
        self.list.call(()).await
    }

    async fn update_price(&self, id: &str, price: f64) -> ApiResult<ListSubscriptionsResponse> {
        self.update_price.call((id.to_owned(), price)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_subscriptions_response_decodes_plans() {
        let json = r#"{
            "subscriptions": [
                {"id": "s1", "name": "Pro", "price": 99.9, "enterprises_using": 4}
            ],
            "message": "Preço atualizado"
        }"#;
        let response: ListSubscriptionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(1, response.subscriptions.len());
        assert_eq!("Pro", response.subscriptions[0].name);
        assert_eq!(Some("Preço atualizado".to_owned()), response.message);
    }

    #[tokio::test]
    async fn test_mock_records_update_price_requests() {
        let mock = MockSubscriptionApi::default();
        mock.update_price
            .returns(Ok(ListSubscriptionsResponse { subscriptions: vec![], message: None }))
            .await;

        mock.update_price("s1", 49.9).await.unwrap();
        assert_eq!(vec![("s1".to_owned(), 49.9)], mock.update_price.requests().await);
    }
}
