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

//! Client for the global settings endpoints.

use crate::client::{ApiClient, json_or_error};
use crate::errors::ApiResult;
use async_trait::async_trait;
use backoffice_core::model::Setting;
use serde::{Deserialize, Serialize};

/// Response carrying the global settings, which the server returns both on read and after
/// an update.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ListSettingsResponse {
    /// Current settings.  The server models these as a list even though there is a single
    /// entry today.
    pub settings: Vec<Setting>,

    /// Informational message to surface to the user, if any.
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload of the settings update request.
#[derive(Serialize)]
struct UpdateSettingRequest {
    /// Whether new feedbacks should be archived automatically.
    allow_feedback_saved: bool,
}

/// Interface to the global settings endpoints.
#[async_trait]
pub trait SettingApi {
    /// Fetches the current settings.
    async fn get(&self) -> ApiResult<ListSettingsResponse>;

    /// Updates the settings and returns the refreshed values.
    async fn update(&self, allow_feedback_saved: bool) -> ApiResult<ListSettingsResponse>;
}

/// Implementation of the settings interface against the real server.
#[derive(Clone)]
pub struct RestSettingApi {
    /// The shared HTTP client with which to issue requests.
    client: ApiClient,
}

impl RestSettingApi {
    /// Creates a new client that issues requests via `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SettingApi for RestSettingApi {
    async fn get(&self) -> ApiResult<ListSettingsResponse> {
        let response = self.client.get("setting").await?;
        json_or_error(response).await
    }

    async fn update(&self, allow_feedback_saved: bool) -> ApiResult<ListSettingsResponse> {
        let request = UpdateSettingRequest { allow_feedback_saved };
        let response = self.client.put("setting", &request).await?;
        json_or_error(response).await
    }
}

/// Implementation of the settings interface that returns canned responses.
#[cfg(any(test, feature = "testutils"))]
#[derive(Default)]
pub struct MockSettingApi {
    /// Canned behavior of the `get` operation.
    pub get: crate::testutils::MockOp<(), ListSettingsResponse>,

    /// Canned behavior of the `update` operation, keyed by the submitted flag.
    pub update: crate::testutils::MockOp<bool, ListSettingsResponse>,
}

#[cfg(any(test, feature = "testutils"))]
#[async_trait]
impl SettingApi for MockSettingApi {
    async fn get(&self) -> ApiResult<ListSettingsResponse> {
        self.get.call(()).await
    }

    async fn update(&self, allow_feedback_saved: bool) -> ApiResult<ListSettingsResponse> {
        self.update.call(allow_feedback_saved).await
    }
}
