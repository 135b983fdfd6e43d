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

//! User-facing notifications emitted by the stores.

use async_trait::async_trait;
use backoffice_api::errors::ApiError;
use log::{error, info};

/// Fallback text for failures that carry no message of their own.
const FALLBACK_ERROR_MESSAGE: &str = "Error";

/// Sink for the user-facing notifications emitted by the stores.
#[async_trait]
pub trait Notifier {
    /// Surfaces the informational `message` of a successful operation.
    async fn success(&self, message: &str);

    /// Surfaces the explanation `message` of a failed operation.
    async fn error(&self, message: &str);
}

/// Notifier that routes notifications to the log.
#[derive(Clone, Default)]
pub struct LogNotifier {}

#[async_trait]
impl Notifier for LogNotifier {
    async fn success(&self, message: &str) {
        info!("{}", message);
    }

    async fn error(&self, message: &str) {
        error!("{}", message);
    }
}

/// Resolves the user-facing message of a failed API call.
///
/// Server-supplied explanations win; failures without one degrade to a fixed fallback
/// string so that the user always sees something.
pub(crate) fn error_message(e: &ApiError) -> String {
    match e {
        ApiError::Transport { message: Some(message), .. } => message.clone(),
        ApiError::Transport { message: None, .. } => FALLBACK_ERROR_MESSAGE.to_owned(),
        ApiError::Generic(message) => message.clone(),
        ApiError::Unknown => FALLBACK_ERROR_MESSAGE.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_server_explanation() {
        let e = ApiError::Transport { status: 422, message: Some("Email inválido".to_owned()) };
        assert_eq!("Email inválido", error_message(&e));
    }

    #[test]
    fn test_error_message_transport_without_body_falls_back() {
        let e = ApiError::Transport { status: 500, message: None };
        assert_eq!("Error", error_message(&e));
    }

    #[test]
    fn test_error_message_generic_passes_through() {
        let e = ApiError::Generic("connection refused".to_owned());
        assert_eq!("connection refused", error_message(&e));
    }

    #[test]
    fn test_error_message_unknown_falls_back() {
        assert_eq!("Error", error_message(&ApiError::Unknown));
    }
}
