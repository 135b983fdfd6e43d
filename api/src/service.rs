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

//! Client for the service catalog endpoint.

use crate::client::{ApiClient, json_or_error};
use crate::errors::ApiResult;
use async_trait::async_trait;
use backoffice_core::model::SelectOption;
use serde::Deserialize;

/// Shape of the body of the service catalog response.
#[derive(Deserialize)]
struct ServicesBody {
    /// Services in label/value form.
    services: Vec<SelectOption>,
}

/// Interface to the service catalog endpoint.
#[async_trait]
pub trait ServiceApi {
    /// Fetches the catalog of services in label/value form for selection widgets.
    async fn list(&self) -> ApiResult<Vec<SelectOption>>;
}

/// Implementation of the service catalog interface against the real server.
#[derive(Clone)]
pub struct RestServiceApi {
    /// The shared HTTP client with which to issue requests.
    client: ApiClient,
}

impl RestServiceApi {
    /// Creates a new client that issues requests via `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ServiceApi for RestServiceApi {
    async fn list(&self) -> ApiResult<Vec<SelectOption>> {
        let response = self.client.get("service").await?;
        let body: ServicesBody = json_or_error(response).await?;
        Ok(body.services)
    }
}

/// Implementation of the service catalog interface that returns canned responses.
#[cfg(any(test, feature = "testutils"))]
#[derive(Default)]
pub struct MockServiceApi {
    /// Canned behavior of the `list` operation.
    pub list: crate::testutils::MockOp<(), Vec<SelectOption>>,
}

#[cfg(any(test, feature = "testutils"))]
#[async_trait]
impl ServiceApi for MockServiceApi {
    async fn list(&self) -> ApiResult<Vec<SelectOption>> {
        self.list.call(()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClientOptions;

    #[test]
    fn test_services_body_decodes_catalog() {
        let json = r#"{"services": [{"label": "Consultoria", "value": "svc-1"}]}"#;
        let body: ServicesBody = serde_json::from_str(json).unwrap();
        assert_eq!(
            vec![SelectOption::new("Consultoria".to_owned(), "svc-1".to_owned())],
            body.services
        );
    }

    #[tokio::test]
    async fn test_mock_serves_canned_catalog() {
        let mock = MockServiceApi::default();
        mock.list.returns(Ok(vec![SelectOption::new("A".to_owned(), "1".to_owned())])).await;

        let services = mock.list().await.unwrap();
        assert_eq!(1, services.len());
        assert_eq!(1, mock.list.requests().await.len());
    }

    /// Smoke test against a live server, which must be reachable at the base URL in
    /// `BACKOFFICE_BASE_URL` and hold valid credentials.
    #[tokio::test]
    #[ignore = "Requires environment configuration and is expensive"]
    async fn test_live_list_services() {
        let opts = ApiClientOptions::from_env("BACKOFFICE").unwrap();
        let client = ApiClient::new(opts);
        let api = RestServiceApi::new(client);
        api.list().await.unwrap();
    }
}
