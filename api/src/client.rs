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

//! The shared HTTP client used by every resource client.

use crate::errors::{ApiError, ApiResult, http_response_to_api_error, reqwest_error_to_api_error};
use backoffice_core::env::get_optional_var;
use backoffice_core::model::AccessToken;
use futures::lock::Mutex;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::sync::Arc;
use url::Url;

/// Default base URL of the server when none is configured.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Ensures that the path of `url` ends with a slash so that joining relative resource paths
/// appends to it instead of replacing its last segment.
fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Options to configure an `ApiClient`.
#[derive(Clone, Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct ApiClientOptions {
    /// Address of the server all requests go to.
    pub base_url: Url,
}

impl Default for ApiClientOptions {
    fn default() -> Self {
        let base_url = Url::parse(DEFAULT_BASE_URL).expect("Hardcoded URL must be valid");
        Self { base_url: normalize_base_url(base_url) }
    }
}

impl ApiClientOptions {
    /// Creates a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_BASE_URL`, all of which are optional.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        let base_url = match get_optional_var::<String>(prefix, "BASE_URL")? {
            Some(raw) => Url::parse(&raw).map_err(|e| {
                format!("Invalid URL in environment variable {}_BASE_URL: {}", prefix, e)
            })?,
            None => Url::parse(DEFAULT_BASE_URL).expect("Hardcoded URL must be valid"),
        };
        Ok(Self { base_url: normalize_base_url(base_url) })
    }
}

/// Asynchronous HTTP client shared by all resource clients.
///
/// The client holds the bearer token of the active session in a slot that the
/// authentication flows update.  Whenever the slot holds a token, it is attached to every
/// outgoing request; otherwise requests go out unauthenticated and it is the server's job
/// to reject them.
#[derive(Clone)]
pub struct ApiClient {
    /// Address of the server all requests go to, with a trailing slash.
    base_url: Url,

    /// The underlying HTTP client with which to issue requests.
    client: Client,

    /// The bearer token of the active session, if any.
    token: Arc<Mutex<Option<AccessToken>>>,
}

impl ApiClient {
    /// Creates a new client using `opts` for configuration.
    pub fn new(opts: ApiClientOptions) -> Self {
        Self {
            base_url: opts.base_url,
            client: Client::default(),
            token: Arc::from(Mutex::from(None)),
        }
    }

    /// Replaces the bearer token attached to outgoing requests.  `None` makes subsequent
    /// requests unauthenticated.
    pub async fn set_token(&self, token: Option<AccessToken>) {
        *self.token.lock().await = token;
    }

    /// Returns the bearer token currently attached to outgoing requests, if any.
    pub async fn token(&self) -> Option<AccessToken> {
        self.token.lock().await.clone()
    }

    /// Resolves the relative resource `path` against the configured base URL.
    fn url(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Generic(format!("Invalid request path {}: {}", path, e)))
    }

    /// Attaches the bearer token, if present, and issues the request.
    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let request = match self.token().await {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        };
        request.send().await.map_err(reqwest_error_to_api_error)
    }

    /// Issues a GET request against `path`.
    pub(crate) async fn get(&self, path: &str) -> ApiResult<Response> {
        self.send(self.client.get(self.url(path)?)).await
    }

    /// Issues a POST request against `path` with a JSON `body`.
    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Response> {
        self.send(self.client.post(self.url(path)?).json(body)).await
    }

    /// Issues a POST request against `path` with no body.
    pub(crate) async fn post_empty(&self, path: &str) -> ApiResult<Response> {
        self.send(self.client.post(self.url(path)?)).await
    }

    /// Issues a PUT request against `path` with a JSON `body`.
    pub(crate) async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Response> {
        self.send(self.client.put(self.url(path)?).json(body)).await
    }

    /// Issues a DELETE request against `path`.
    pub(crate) async fn delete(&self, path: &str) -> ApiResult<Response> {
        self.send(self.client.delete(self.url(path)?)).await
    }
}

/// Decodes the JSON payload of a successful `response` into `T`, or maps an unsuccessful
/// `response` to the corresponding `ApiError`.
pub(crate) async fn json_or_error<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    if response.status().is_success() {
        response.json::<T>().await.map_err(reqwest_error_to_api_error)
    } else {
        Err(http_response_to_api_error(response).await)
    }
}

/// Shape of the body of responses that only carry an informational message.
#[derive(Deserialize)]
struct MessageBody {
    /// Informational message to surface to the user.
    message: Option<String>,
}

/// Extracts the optional informational message of a successful `response`, or maps an
/// unsuccessful `response` to the corresponding `ApiError`.
///
/// Unlike `json_or_error`, a successful body that is empty or not JSON yields no message
/// instead of an error, because these responses are informational only.
pub(crate) async fn message_or_error(response: Response) -> ApiResult<Option<String>> {
    if response.status().is_success() {
        let text = response.text().await.map_err(reqwest_error_to_api_error)?;
        match serde_json::from_str::<MessageBody>(&text) {
            Ok(body) => Ok(body.message),
            Err(_) => Ok(None),
        }
    } else {
        Err(http_response_to_api_error(response).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apiclientoptions_default() {
        let opts = ApiClientOptions::default();
        assert_eq!("http://localhost:8000/", opts.base_url.as_str());
    }

    #[test]
    fn test_apiclientoptions_from_env_all_present() {
        let overrides = [("BACKOFFICE_BASE_URL", Some("https://api.example.com/v1"))];
        temp_env::with_vars(overrides, || {
            let opts = ApiClientOptions::from_env("BACKOFFICE").unwrap();
            assert_eq!("https://api.example.com/v1/", opts.base_url.as_str());
        });
    }

    #[test]
    fn test_apiclientoptions_from_env_use_defaults() {
        temp_env::with_var_unset("BACKOFFICE_BASE_URL", || {
            let opts = ApiClientOptions::from_env("BACKOFFICE").unwrap();
            assert_eq!(ApiClientOptions::default(), opts);
        });
    }

    #[test]
    fn test_apiclientoptions_from_env_invalid_url() {
        temp_env::with_var("BACKOFFICE_BASE_URL", Some("not a url"), || {
            let err = ApiClientOptions::from_env("BACKOFFICE").unwrap_err();
            assert!(err.contains("Invalid URL in environment variable BACKOFFICE_BASE_URL"));
        });
    }

    #[tokio::test]
    async fn test_apiclient_token_slot_starts_empty() {
        let client = ApiClient::new(ApiClientOptions::default());
        assert_eq!(None, client.token().await);
    }

    #[tokio::test]
    async fn test_apiclient_token_slot_set_and_clear() {
        let client = ApiClient::new(ApiClientOptions::default());

        client.set_token(Some(AccessToken::from("session-token"))).await;
        assert_eq!(Some(AccessToken::from("session-token")), client.token().await);

        client.set_token(None).await;
        assert_eq!(None, client.token().await);
    }

    #[tokio::test]
    async fn test_apiclient_clones_share_the_token_slot() {
        let client = ApiClient::new(ApiClientOptions::default());
        let clone = client.clone();

        client.set_token(Some(AccessToken::from("shared"))).await;
        assert_eq!(Some(AccessToken::from("shared")), clone.token().await);
    }
}
