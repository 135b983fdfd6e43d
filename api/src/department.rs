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

//! Client for the department endpoints.

use crate::client::{ApiClient, json_or_error};
use crate::errors::ApiResult;
use async_trait::async_trait;
use backoffice_core::model::Department;
use serde::{Deserialize, Serialize};

/// Response carrying the full department list, which the server returns for every
/// operation that changes it.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ListDepartmentsResponse {
    /// All departments known to the server, as a flat parent-linked list.
    pub departments: Vec<Department>,

    /// Whether the enterprise has finished filling in its organizational data.
    #[serde(default)]
    pub filled_data: Option<bool>,

    /// Informational message to surface to the user, if any.
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload of the department creation request.
///
/// Field names follow the wire format of the server.
#[derive(Serialize)]
struct CreateDepartmentRequest<'a> {
    /// Display name of the new department.
    name: &'a str,

    /// Identifier of the parent department, or `None` for a root.
    #[serde(rename = "parentId")]
    parent_id: Option<i32>,
}

/// Payload of the department update request.
///
/// Field names follow the wire format of the server.
#[derive(Serialize)]
struct UpdateDepartmentRequest<'a> {
    /// Identifier of the department to update.
    id: i32,

    /// New display name of the department.
    name: &'a str,

    /// New parent of the department, or `None` to make it a root.
    #[serde(rename = "parentId")]
    parent_id: Option<i32>,
}

/// Interface to the department endpoints.
#[async_trait]
pub trait DepartmentApi {
    /// Fetches the full department list.
    async fn list(&self) -> ApiResult<ListDepartmentsResponse>;

    /// Creates a new department and returns the refreshed list.
    async fn create(&self, name: &str, parent_id: Option<i32>)
    -> ApiResult<ListDepartmentsResponse>;

    /// Updates a department and returns the refreshed list.
    async fn update(
        &self,
        id: i32,
        name: &str,
        parent_id: Option<i32>,
    ) -> ApiResult<ListDepartmentsResponse>;

    /// Deletes the department behind `id` and returns the refreshed list.
    async fn delete(&self, id: i32) -> ApiResult<ListDepartmentsResponse>;
}

/// Implementation of the department interface against the real server.
#[derive(Clone)]
pub struct RestDepartmentApi {
    /// The shared HTTP client with which to issue requests.
    client: ApiClient,
}

impl RestDepartmentApi {
    /// Creates a new client that issues requests via `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DepartmentApi for RestDepartmentApi {
    async fn list(&self) -> ApiResult<ListDepartmentsResponse> {
        let response = self.client.get("department").await?;
        json_or_error(response).await
    }

    async fn create(
        &self,
        name: &str,
        parent_id: Option<i32>,
    ) -> ApiResult<ListDepartmentsResponse> {
        let request = CreateDepartmentRequest { name, parent_id };
        let response = self.client.post("department", &request).await?;
        json_or_error(response).await
    }

    async fn update(
        &self,
        id: i32,
        name: &str,
        parent_id: Option<i32>,
    ) -> ApiResult<ListDepartmentsResponse> {
        let request = UpdateDepartmentRequest { id, name, parent_id };
        let response = self.client.put("department", &request).await?;
        json_or_error(response).await
    }

    async fn delete(&self, id: i32) -> ApiResult<ListDepartmentsResponse> {
        let response = self.client.delete(&format!("department/{}", id)).await?;
        json_or_error(response).await
    }
}

/// Implementation of the department interface that returns canned responses.
#[cfg(any(test, feature = "testutils"))]
#[derive(Default)]
pub struct MockDepartmentApi {
    /// Canned behavior of the `list` operation.
    pub list: crate::testutils::MockOp<(), ListDepartmentsResponse>,

    /// Canned behavior of the `create` operation, keyed by `(name, parent_id)`.
    pub create: crate::testutils::MockOp<(String, Option<i32>), ListDepartmentsResponse>,

    /// Canned behavior of the `update` operation, keyed by `(id, name, parent_id)`.
    pub update: crate::testutils::MockOp<(i32, String, Option<i32>), ListDepartmentsResponse>,

    /// Canned behavior of the `delete` operation, keyed by department identifier.
    pub delete: crate::testutils::MockOp<i32, ListDepartmentsResponse>,
}

#[cfg(any(test, feature = "testutils"))]
#[async_trait]
impl DepartmentApi for MockDepartmentApi {
    async fn list(&self) -> ApiResult<ListDepartmentsResponse> {
        self.list.call(()).await
    }

    async fn create(
        &self,
        name: &str,
        parent_id: Option<i32>,
    ) -> ApiResult<ListDepartmentsResponse> {
        self.create.call((name.to_owned(), parent_id)).await
    }

    async fn update(
        &self,
        id: i32,
        name: &str,
        parent_id: Option<i32>,
    ) -> ApiResult<ListDepartmentsResponse> {
        self.update.call((id, name.to_owned(), parent_id)).await
    }

    async fn delete(&self, id: i32) -> ApiResult<ListDepartmentsResponse> {
        self.delete.call(id).await
    }
}
