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

//! Client for the notification template endpoints.

use crate::client::{ApiClient, json_or_error, message_or_error};
use crate::errors::ApiResult;
use async_trait::async_trait;
use backoffice_core::model::TemplateNotification;
use serde::{Deserialize, Serialize};

/// Response carrying the full list of templates, which the server returns for every
/// operation that changes it.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ListTemplatesResponse {
    /// All notification templates known to the server.
    pub templates: Vec<TemplateNotification>,

    /// Informational message to surface to the user, if any.
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload of the template creation request.
#[derive(Serialize)]
struct CreateTemplateRequest<'a> {
    /// Subject line of the template.
    title: &'a str,

    /// Body of the template.
    text: &'a str,
}

/// Payload of the template update request.
#[derive(Serialize)]
struct UpdateTemplateRequest<'a> {
    /// Identifier of the template to update.
    id: &'a str,

    /// New subject line of the template.
    title: &'a str,

    /// New body of the template.
    text: &'a str,
}

/// Interface to the notification template endpoints.
#[async_trait]
pub trait TemplateApi {
    /// Fetches the full list of templates.
    async fn list(&self) -> ApiResult<ListTemplatesResponse>;

    /// Creates a new template and returns the refreshed list.
    async fn create(&self, title: &str, text: &str) -> ApiResult<ListTemplatesResponse>;

    /// Updates a template and returns the refreshed list.
    async fn update(&self, id: &str, title: &str, text: &str) -> ApiResult<ListTemplatesResponse>;

    /// Deletes the template behind `id`.
    async fn delete(&self, id: &str) -> ApiResult<Option<String>>;
}

/// Implementation of the template interface against the real server.
#[derive(Clone)]
pub struct RestTemplateApi {
    /// The shared HTTP client with which to issue requests.
    client: ApiClient,
}

impl RestTemplateApi {
    /// Creates a new client that issues requests via `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TemplateApi for RestTemplateApi {
    async fn list(&self) -> ApiResult<ListTemplatesResponse> {
        let response = self.client.get("template-notification").await?;
        json_or_error(response).await
    }

    async fn create(&self, title: &str, text: &str) -> ApiResult<ListTemplatesResponse> {
        let request = CreateTemplateRequest { title, text };
        let response = self.client.post("template-notification", &request).await?;
        json_or_error(response).await
    }

    async fn update(&self, id: &str, title: &str, text: &str) -> ApiResult<ListTemplatesResponse> {
        let request = UpdateTemplateRequest { id, title, text };
        let response = self.client.put("template-notification", &request).await?;
        json_or_error(response).await
    }

    async fn delete(&self, id: &str) -> ApiResult<Option<String>> {
        let response = self.client.delete(&format!("template-notification/{}", id)).await?;
        message_or_error(response).await
    }
}

/// Implementation of the template interface that returns canned responses.
#[cfg(any(test, feature = "testutils"))]
#[derive(Default)]
pub struct MockTemplateApi {
    /// Canned behavior of the `list` operation.
    pub list: crate::testutils::MockOp<(), ListTemplatesResponse>,

    /// Canned behavior of the `create` operation, keyed by `(title, text)`.
    pub create: crate::testutils::MockOp<(String, String), ListTemplatesResponse>,

    /// Canned behavior of the `update` operation, keyed by `(id, title, text)`.
    pub update: crate::testutils::MockOp<(String, String, String), ListTemplatesResponse>,

    /// Canned behavior of the `delete` operation, keyed by template identifier.
    pub delete: crate::testutils::MockOp<String, Option<String>>,
}

#[cfg(any(test, feature = "testutils"))]
#[async_trait]
impl TemplateApi for MockTemplateApi {
    async fn list(&self) -> ApiResult<ListTemplatesResponse> {
        self.list.call(()).await
    }

    async fn create(&self, title: &str, text: &str) -> ApiResult<ListTemplatesResponse> {
        self.create.call((title.to_owned(), text.to_owned())).await
    }

    async fn update(&self, id: &str, title: &str, text: &str) -> ApiResult<ListTemplatesResponse> {
        self.update.call((id.to_owned(), title.to_owned(), text.to_owned())).await
    }

    async fn delete(&self, id: &str) -> ApiResult<Option<String>> {
        self.delete.call(id.to_owned()).await
    }
}
