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

//! Error types for the API client layer.

use reqwest::Response;
use serde::Deserialize;
use thiserror::Error;

/// Failure of an API call, classified at the HTTP boundary.
///
/// This is a closed taxonomy on purpose: downstream code matches on these variants instead
/// of inspecting error values at runtime.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    /// The server replied with a non-success status code.  `message` carries the
    /// server-supplied explanation when the response body had one.
    #[error("HTTP request returned status {status}")]
    Transport {
        /// Numeric HTTP status code of the response.
        status: u16,

        /// Explanation extracted from the response body, if the server provided one.
        message: Option<String>,
    },

    /// The request failed before a usable response was obtained, such as a connection
    /// failure or a payload that did not decode.
    #[error("{0}")]
    Generic(String),

    /// The failure carried no usable information at all.
    #[error("Unknown error")]
    Unknown,
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Converts a `reqwest::Error` to an `ApiError`.
pub(crate) fn reqwest_error_to_api_error(e: reqwest::Error) -> ApiError {
    ApiError::Generic(format!("{}", e))
}

/// Shape of the body the server attaches to error responses.
#[derive(Deserialize)]
struct ErrorBody {
    /// Human-readable explanation of the failure.
    message: Option<String>,
}

/// Converts a `reqwest::Response` to an `ApiError`.  The response must have a non-success
/// status.
///
/// The server explains most failures with a JSON body carrying a `message` field, which
/// gets surfaced to the user verbatim.  A body that cannot be read at all degrades to
/// `Unknown` because at that point neither the payload nor the connection can be trusted.
pub(crate) async fn http_response_to_api_error(response: Response) -> ApiError {
    let status = response.status();
    assert!(!status.is_success(), "Should not have been called on a successful request");

    match response.text().await {
        Ok(text) => {
            let message = match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => body.message,
                Err(_) => None,
            };
            ApiError::Transport { status: status.as_u16(), message }
        }
        Err(_) => ApiError::Unknown,
    }
}
