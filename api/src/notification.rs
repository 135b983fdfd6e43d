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

//! Client for the notification delivery endpoint.

use crate::client::{ApiClient, message_or_error};
use crate::errors::ApiResult;
use async_trait::async_trait;
use serde::Serialize;

/// Payload of the notification delivery request.
///
/// Field names follow the wire format of the server.
#[derive(Serialize)]
struct SendNotificationRequest<'a> {
    /// Subject line of the notification.
    title: &'a str,

    /// Body of the notification.
    text: &'a str,

    /// Identifiers of the enterprises to notify.
    #[serde(rename = "enterprisesId")]
    enterprise_ids: &'a [String],
}

/// Interface to the notification delivery endpoint.
#[async_trait]
pub trait NotificationApi {
    /// Sends a notification to the enterprises behind `enterprise_ids`.
    async fn send(
        &self,
        title: &str,
        text: &str,
        enterprise_ids: &[String],
    ) -> ApiResult<Option<String>>;
}

/// Implementation of the notification interface against the real server.
#[derive(Clone)]
pub struct RestNotificationApi {
    /// The shared HTTP client with which to issue requests.
    client: ApiClient,
}

impl RestNotificationApi {
    /// Creates a new client that issues requests via `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationApi for RestNotificationApi {
    async fn send(
        &self,
        title: &str,
        text: &str,
        enterprise_ids: &[String],
    ) -> ApiResult<Option<String>> {
        let request = SendNotificationRequest { title, text, enterprise_ids };
        let response = self.client.post("notification/send", &request).await?;
        message_or_error(response).await
    }
}

/// Implementation of the notification interface that returns canned responses.
#[cfg(any(test, feature = "testutils"))]
#[derive(Default)]
pub struct MockNotificationApi {
    /// Canned behavior of the `send` operation, keyed by `(title, text, enterprise_ids)`.
    pub send: crate::testutils::MockOp<(String, String, Vec<String>), Option<String>>,
}

#[cfg(any(test, feature = "testutils"))]
#[async_trait]
impl NotificationApi for MockNotificationApi {
    async fn send(
        &self,
        title: &str,
        text: &str,
        enterprise_ids: &[String],
    ) -> ApiResult<Option<String>> {
        self.send.call((title.to_owned(), text.to_owned(), enterprise_ids.to_vec())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_request_uses_wire_field_names() {
        let ids = vec!["e1".to_owned(), "e2".to_owned()];
        let request = SendNotificationRequest {
            title: "Aviso",
            text: "Manutenção programada",
            enterprise_ids: &ids,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!("Aviso", value["title"]);
        assert_eq!(2, value["enterprisesId"].as_array().unwrap().len());
        assert!(value.get("enterprise_ids").is_none());
    }

    #[tokio::test]
    async fn test_mock_records_send_requests() {
        let mock = MockNotificationApi::default();
        mock.send.returns(Ok(Some("Notificação enviada".to_owned()))).await;

        let ids = vec!["e1".to_owned()];
        let message = mock.send("Aviso", "Olá", &ids).await.unwrap();
        assert_eq!(Some("Notificação enviada".to_owned()), message);
        assert_eq!(
            vec![("Aviso".to_owned(), "Olá".to_owned(), ids)],
            mock.send.requests().await
        );
    }
}
