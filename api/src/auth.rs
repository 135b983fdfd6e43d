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

//! Client for the authentication and profile endpoints.

use crate::client::{ApiClient, json_or_error, message_or_error};
use crate::errors::ApiResult;
use async_trait::async_trait;
use backoffice_core::model::{AccessToken, User};
use serde::{Deserialize, Serialize};

/// Payload of the login request.
#[derive(Serialize)]
struct LoginRequest<'a> {
    /// Email address of the account.
    email: &'a str,

    /// Cleartext password of the account.
    password: &'a str,
}

/// Payload of the account registration request.
///
/// Field names follow the wire format of the server, which mixes snake case and camel case.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegisterRequest {
    /// Name of the person registering the account.
    pub name: String,

    /// Email address of the new account.
    pub email: String,

    /// Cleartext password of the new account.
    pub password: String,

    /// Name of the enterprise to create alongside the account.
    #[serde(rename = "nameEnterprise")]
    pub name_enterprise: String,

    /// Position of the person within the new enterprise.
    pub position: String,
}

/// Session details returned by the login and registration endpoints.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LoginResponse {
    /// Account that just logged in.
    pub user: User,

    /// Bearer token minted by the server for this session.
    pub token: AccessToken,

    /// Identifier of the enterprise created during registration, if any.
    pub enterprise_created: Option<String>,

    /// Position of the account within its enterprise, if known.
    pub enterprise_position: Option<String>,

    /// Informational message to surface to the user, if any.
    #[serde(default)]
    pub message: Option<String>,
}

/// Response to a profile update, carrying the updated account.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ProfileResponse {
    /// Account after the update.
    pub user: User,

    /// Informational message to surface to the user, if any.
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload of the reset request.
#[derive(Serialize)]
struct ResetRequest<'a> {
    /// Email address of the account to reset.
    email: &'a str,
}

/// Payload of the verification code check.
#[derive(Serialize)]
struct VerifyRequest<'a> {
    /// Verification code the user received over email.
    code: &'a str,

    /// Email address of the account being reset.
    email: &'a str,
}

/// Payload of the password replacement after a reset.
#[derive(Serialize)]
struct NewPasswordRequest<'a> {
    /// New cleartext password for the account.
    password: &'a str,

    /// Email address of the account being reset.
    email: &'a str,
}

/// Payload of the profile update request.
#[derive(Serialize)]
struct UpdateProfileRequest<'a> {
    /// New name of the account.
    name: &'a str,

    /// New email address of the account.
    email: &'a str,

    /// New department of the account, if any.
    department: Option<&'a str>,
}

/// Payload of the password change request.
///
/// Field names follow the wire format of the server.
#[derive(Serialize)]
struct UpdatePasswordRequest<'a> {
    /// Current cleartext password of the account.
    #[serde(rename = "passwordActual")]
    password_actual: &'a str,

    /// New cleartext password of the account.
    #[serde(rename = "passwordNew")]
    password_new: &'a str,
}

/// Interface to the authentication and profile endpoints.
#[async_trait]
pub trait AuthApi {
    /// Logs into an existing account and returns the new session.
    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse>;

    /// Registers a new account with its enterprise and returns the new session.
    async fn register(&self, request: RegisterRequest) -> ApiResult<LoginResponse>;

    /// Starts a password reset for the account behind `email`.
    async fn reset(&self, email: &str) -> ApiResult<Option<String>>;

    /// Checks the verification `code` the user received during a reset.
    async fn verify(&self, code: &str, email: &str) -> ApiResult<Option<String>>;

    /// Replaces the password of the account behind `email` after a verified reset.
    async fn new_password(&self, password: &str, email: &str) -> ApiResult<Option<String>>;

    /// Updates the profile of the active account.
    async fn update_profile(
        &self,
        name: &str,
        email: &str,
        department: Option<&str>,
    ) -> ApiResult<ProfileResponse>;

    /// Changes the password of the active account.
    async fn update_password(&self, actual: &str, new: &str) -> ApiResult<Option<String>>;
}

/// Implementation of the authentication interface against the real server.
#[derive(Clone)]
pub struct RestAuthApi {
    /// The shared HTTP client with which to issue requests.
    client: ApiClient,
}

impl RestAuthApi {
    /// Creates a new client that issues requests via `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthApi for RestAuthApi {
    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let response = self.client.post("login", &LoginRequest { email, password }).await?;
        json_or_error(response).await
    }

    async fn register(&self, request: RegisterRequest) -> ApiResult<LoginResponse> {
        let response = self.client.post("register", &request).await?;
        json_or_error(response).await
    }

    async fn reset(&self, email: &str) -> ApiResult<Option<String>> {
        let response = self.client.post("reset", &ResetRequest { email }).await?;
        message_or_error(response).await
    }

    async fn verify(&self, code: &str, email: &str) -> ApiResult<Option<String>> {
        let response = self.client.post("verify", &VerifyRequest { code, email }).await?;
        message_or_error(response).await
    }

    async fn new_password(&self, password: &str, email: &str) -> ApiResult<Option<String>> {
        let response =
            self.client.post("newPassword", &NewPasswordRequest { password, email }).await?;
        message_or_error(response).await
    }

    async fn update_profile(
        &self,
        name: &str,
        email: &str,
        department: Option<&str>,
    ) -> ApiResult<ProfileResponse> {
        let response =
            self.client.put("user", &UpdateProfileRequest { name, email, department }).await?;
        json_or_error(response).await
    }

    async fn update_password(&self, actual: &str, new: &str) -> ApiResult<Option<String>> {
        let request = UpdatePasswordRequest { password_actual: actual, password_new: new };
        let response = self.client.put("user/password", &request).await?;
        message_or_error(response).await
    }
}

/// Implementation of the authentication interface that returns canned responses.
#[cfg(any(test, feature = "testutils"))]
#[derive(Default)]
pub struct MockAuthApi {
    /// Canned behavior of the `login` operation, keyed by `(email, password)`.
    pub login: crate::testutils::MockOp<(String, String), LoginResponse>,

    /// Canned behavior of the `register` operation.
    pub register: crate::testutils::MockOp<RegisterRequest, LoginResponse>,

    /// Canned behavior of the `reset` operation, keyed by email.
    pub reset: crate::testutils::MockOp<String, Option<String>>,

    /// Canned behavior of the `verify` operation, keyed by `(code, email)`.
    pub verify: crate::testutils::MockOp<(String, String), Option<String>>,

    /// Canned behavior of the `new_password` operation, keyed by `(password, email)`.
    pub new_password: crate::testutils::MockOp<(String, String), Option<String>>,

    /// Canned behavior of the `update_profile` operation, keyed by
    /// `(name, email, department)`.
    pub update_profile: crate::testutils::MockOp<(String, String, Option<String>), ProfileResponse>,

    /// Canned behavior of the `update_password` operation, keyed by `(actual, new)`.
    pub update_password: crate::testutils::MockOp<(String, String), Option<String>>,
}

#[cfg(any(test, feature = "testutils"))]
#[async_trait]
impl AuthApi for MockAuthApi {
    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        self.login.call((email.to_owned(), password.to_owned())).await
    }

    async fn register(&self, request: RegisterRequest) -> ApiResult<LoginResponse> {
        self.register.call(request).await
    }

    async fn reset(&self, email: &str) -> ApiResult<Option<String>> {
        self.reset.call(email.to_owned()).await
    }

    async fn verify(&self, code: &str, email: &str) -> ApiResult<Option<String>> {
        self.verify.call((code.to_owned(), email.to_owned())).await
    }

    async fn new_password(&self, password: &str, email: &str) -> ApiResult<Option<String>> {
        self.new_password.call((password.to_owned(), email.to_owned())).await
    }

    async fn update_profile(
        &self,
        name: &str,
        email: &str,
        department: Option<&str>,
    ) -> ApiResult<ProfileResponse> {
        self.update_profile
            .call((name.to_owned(), email.to_owned(), department.map(str::to_owned)))
            .await
    }

    async fn update_password(&self, actual: &str, new: &str) -> ApiResult<Option<String>> {
        self.update_password.call((actual.to_owned(), new.to_owned())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_uses_wire_field_names() {
        let request = RegisterRequest {
            name: "Ana".to_owned(),
            email: "ana@example.com".to_owned(),
            password: "secret123".to_owned(),
            name_enterprise: "ACME".to_owned(),
            position: "CEO".to_owned(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!("ACME", value["nameEnterprise"]);
        assert!(value.get("name_enterprise").is_none());
    }

    #[test]
    fn test_update_password_request_uses_wire_field_names() {
        let request = UpdatePasswordRequest { password_actual: "old", password_new: "new" };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!("old", value["passwordActual"]);
        assert_eq!("new", value["passwordNew"]);
    }

    #[test]
    fn test_login_response_decodes_minimal_payload() {
        let json = r#"{
            "user": {
                "id": "u1", "name": "Ana", "email": "ana@example.com",
                "position": "CEO", "active": 1
            },
            "token": "abc123",
            "enterprise_created": null,
            "enterprise_position": "CEO"
        }"#;
        let response: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!("Ana", response.user.name);
        assert_eq!("abc123", response.token.as_str());
        assert_eq!(None, response.enterprise_created);
        assert_eq!(Some("CEO".to_owned()), response.enterprise_position);
        assert_eq!(None, response.message);
    }

    #[tokio::test]
    async fn test_mock_records_login_requests() {
        let mock = MockAuthApi::default();
        mock.reset.returns(Ok(Some("Email enviado".to_owned()))).await;

        let message = mock.reset("ana@example.com").await.unwrap();
        assert_eq!(Some("Email enviado".to_owned()), message);
        assert_eq!(vec!["ana@example.com".to_owned()], mock.reset.requests().await);
    }
}
