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

//! Client for the member roster endpoints.

use crate::client::{ApiClient, json_or_error, message_or_error};
use crate::errors::ApiResult;
use async_trait::async_trait;
use backoffice_core::model::UserAdm;
use serde::{Deserialize, Serialize};

/// Response carrying the full member roster, which the server returns for every operation
/// that changes it.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ListMembersResponse {
    /// All members known to the server.
    pub users: Vec<UserAdm>,

    /// Informational message to surface to the user, if any.
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload of the member creation request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MemberCreate {
    /// Display name of the member.
    pub name: String,

    /// Role of the member within its enterprise.
    pub position: String,

    /// Email address of the member.
    pub email: String,

    /// Cleartext password of the new account.
    pub password: String,

    /// Department the member belongs to, if any.
    pub department: Option<String>,
}

/// Payload of the member update request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MemberUpdate {
    /// Server-assigned identifier of the member to update.
    pub id: String,

    /// Display name of the member.
    pub name: String,

    /// Email address of the member.
    pub email: String,

    /// Role of the member within its enterprise.
    pub position: String,

    /// Department the member belongs to, if any.
    pub department: Option<String>,
}

/// Payload of the activation toggle request.
///
/// Field names follow the wire format of the server.
#[derive(Serialize)]
struct SetActiveRequest<'a> {
    /// New activation state: 1 to allow logins, 0 to deactivate.
    active: i32,

    /// Identifier of the member to toggle.
    #[serde(rename = "userId")]
    user_id: &'a str,
}

/// Interface to the member roster endpoints.
#[async_trait]
pub trait MemberApi {
    /// Fetches the full member roster.
    async fn list(&self) -> ApiResult<ListMembersResponse>;

    /// Creates a new member and returns the refreshed roster.
    async fn create(&self, member: &MemberCreate) -> ApiResult<ListMembersResponse>;

    /// Updates a member and returns the refreshed roster.
    async fn update(&self, member: &MemberUpdate) -> ApiResult<ListMembersResponse>;

    /// Toggles whether the member behind `user_id` may log in and returns the refreshed
    /// roster.
    async fn set_active(&self, user_id: &str, active: i32) -> ApiResult<ListMembersResponse>;

    /// Deletes the member behind `id`.
    async fn delete(&self, id: &str) -> ApiResult<Option<String>>;
}

/// Implementation of the member interface against the real server.
#[derive(Clone)]
pub struct RestMemberApi {
    /// The shared HTTP client with which to issue requests.
    client: ApiClient,
}

impl RestMemberApi {
    /// Creates a new client that issues requests via `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MemberApi for RestMemberApi {
    async fn list(&self) -> ApiResult<ListMembersResponse> {
        let response = self.client.get("member").await?;
        json_or_error(response).await
    }

    async fn create(&self, member: &MemberCreate) -> ApiResult<ListMembersResponse> {
        let response = self.client.post("member", member).await?;
        json_or_error(response).await
    }

    async fn update(&self, member: &MemberUpdate) -> ApiResult<ListMembersResponse> {
        let response = self.client.put("member", member).await?;
        json_or_error(response).await
    }

    async fn set_active(&self, user_id: &str, active: i32) -> ApiResult<ListMembersResponse> {
        let request = SetActiveRequest { active, user_id };
        let response = self.client.put("member/active", &request).await?;
        json_or_error(response).await
    }

    async fn delete(&self, id: &str) -> ApiResult<Option<String>> {
        let response = self.client.delete(&format!("member/{}", id)).await?;
        message_or_error(response).await
    }
}

/// Implementation of the member interface that returns canned responses.
#[cfg(any(test, feature = "testutils"))]
#[derive(Default)]
pub struct MockMemberApi {
    /// Canned behavior of the `list` operation.
    pub list: crate::testutils::MockOp<(), ListMembersResponse>,

    /// Canned behavior of the `create` operation.
    pub create: crate::testutils::MockOp<MemberCreate, ListMembersResponse>,

    /// Canned behavior of the `update` operation.
    pub update: crate::testutils::MockOp<MemberUpdate, ListMembersResponse>,

    /// Canned behavior of the `set_active` operation, keyed by `(user_id, active)`.
    pub set_active: crate::testutils::MockOp<(String, i32), ListMembersResponse>,

    /// Canned behavior of the `delete` operation, keyed by member identifier.
    pub delete: crate::testutils::MockOp<String, Option<String>>,
}

#[cfg(any(test, feature = "testutils"))]
#[async_trait]
impl MemberApi for MockMemberApi {
    async fn list(&self) -> ApiResult<ListMembersResponse> {
        self.list.call(()).await
    }

    async fn create(&self, member: &MemberCreate) -> ApiResult<ListMembersResponse> {
        self.create.call(member.clone()).await
    }

    async fn update(&self, member: &MemberUpdate) -> ApiResult<ListMembersResponse> {
        self.update.call(member.clone()).await
    }

    async fn set_active(&self, user_id: &str, active: i32) -> ApiResult<ListMembersResponse> {
        self.set_active.call((user_id.to_owned(), active)).await
    }

    async fn delete(&self, id: &str) -> ApiResult<Option<String>> {
        self.delete.call(id.to_owned()).await
    }
}
