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

//! Assembly of the administration client: shared wiring and the route table.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use backoffice_api::auth::RestAuthApi;
use backoffice_api::{ApiClient, ApiClientOptions};
use backoffice_api::coupon::RestCouponApi;
use backoffice_api::department::RestDepartmentApi;
use backoffice_api::enterprise::RestEnterpriseApi;
use backoffice_api::feedback::RestFeedbackApi;
use backoffice_api::member::RestMemberApi;
use backoffice_api::notification::{NotificationApi, RestNotificationApi};
use backoffice_api::service::{RestServiceApi, ServiceApi};
use backoffice_api::setting::RestSettingApi;
use backoffice_api::subscription::RestSubscriptionApi;
use backoffice_api::template::RestTemplateApi;
use backoffice_core::env::get_optional_var;
use backoffice_store::auth::AuthStore;
use backoffice_store::coupon::CouponStore;
use backoffice_store::department::DepartmentStore;
use backoffice_store::enterprise::EnterpriseStore;
use backoffice_store::feedback::FeedbackStore;
use backoffice_store::member::MemberStore;
use backoffice_store::setting::SettingStore;
use backoffice_store::subscription::SubscriptionStore;
use backoffice_store::template::TemplateStore;
use backoffice_store::{FileSession, LogNotifier, Notifier, Session};
use derive_getters::Getters;
use std::fmt;
use std::sync::Arc;

pub mod routes;

/// Environment variable prefix for all configuration of this client.
const ENV_PREFIX: &str = "BACKOFFICE";

/// Default location of the persisted session when none is configured.
const DEFAULT_SESSION_FILE: &str = "backoffice-session.json";

/// The fully-wired client application.
///
/// All stores talk to the server through one shared HTTP client, so the bearer token
/// adopted by the authentication flows is attached to every request no matter which
/// store issues it.  The notification and service endpoints have no state to hold, so
/// they are exposed as bare clients instead of stores.
#[derive(Getters)]
pub struct App {
    /// Store for the active session and the account that owns it.
    auth: Arc<AuthStore>,

    /// Store for the coupon table.
    coupons: Arc<CouponStore>,

    /// Store for the department forest.
    departments: Arc<DepartmentStore>,

    /// Store for the enterprise roster.
    enterprises: Arc<EnterpriseStore>,

    /// Store for the feedback inbox and archive.
    feedbacks: Arc<FeedbackStore>,

    /// Store for the member roster.
    members: Arc<MemberStore>,

    /// Client for the notification dispatch endpoint.
    notifications: Arc<dyn NotificationApi + Send + Sync>,

    /// Client for the service catalog endpoint.
    services: Arc<dyn ServiceApi + Send + Sync>,

    /// Store for the per-installation settings.
    settings: Arc<SettingStore>,

    /// Store for the subscription plan list.
    subscriptions: Arc<SubscriptionStore>,

    /// Store for the notification template list.
    templates: Arc<TemplateStore>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App").finish_non_exhaustive()
    }
}

impl App {
    /// Wires up the application from its injected components: every resource client is
    /// built on top of `client`, sessions persist via `session`, and all stores surface
    /// messages via `notifier`.
    pub fn new(
        client: ApiClient,
        session: Arc<dyn Session + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        let auth = Arc::from(AuthStore::new(
            Arc::from(RestAuthApi::new(client.clone())),
            client.clone(),
            session,
            notifier.clone(),
        ));
        let coupons = Arc::from(CouponStore::new(
            Arc::from(RestCouponApi::new(client.clone())),
            notifier.clone(),
        ));
        let departments = Arc::from(DepartmentStore::new(
            Arc::from(RestDepartmentApi::new(client.clone())),
            notifier.clone(),
        ));
        let enterprises = Arc::from(EnterpriseStore::new(
            Arc::from(RestEnterpriseApi::new(client.clone())),
            notifier.clone(),
        ));
        let feedbacks = Arc::from(FeedbackStore::new(
            Arc::from(RestFeedbackApi::new(client.clone())),
            notifier.clone(),
        ));
        let members = Arc::from(MemberStore::new(
            Arc::from(RestMemberApi::new(client.clone())),
            notifier.clone(),
        ));
        let settings = Arc::from(SettingStore::new(
            Arc::from(RestSettingApi::new(client.clone())),
            notifier.clone(),
        ));
        let subscriptions = Arc::from(SubscriptionStore::new(
            Arc::from(RestSubscriptionApi::new(client.clone())),
            notifier.clone(),
        ));
        let templates = Arc::from(TemplateStore::new(
            Arc::from(RestTemplateApi::new(client.clone())),
            notifier,
        ));
        let notifications = Arc::from(RestNotificationApi::new(client.clone()));
        let services = Arc::from(RestServiceApi::new(client));
        Self {
            auth,
            coupons,
            departments,
            enterprises,
            feedbacks,
            members,
            notifications,
            services,
            settings,
            subscriptions,
            templates,
        }
    }

    /// Wires up the application from environment variables, falling back to a local
    /// server address and a session file in the current directory when unset.
    pub fn from_env() -> Result<Self, String> {
        let opts = ApiClientOptions::from_env(ENV_PREFIX)?;
        let session_file = get_optional_var::<String>(ENV_PREFIX, "SESSION_FILE")?
            .unwrap_or_else(|| DEFAULT_SESSION_FILE.to_owned());
        let client = ApiClient::new(opts);
        let session = Arc::from(FileSession::new(session_file));
        let notifier = Arc::from(LogNotifier::default());
        Ok(Self::new(client, session, notifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::model::{AccessToken, User};
    use backoffice_store::SessionData;
    use backoffice_store::testutils::{MemorySession, RecorderNotifier, init_test_logging};

    #[tokio::test]
    async fn test_new_shares_the_session_with_the_auth_store() {
        init_test_logging();

        let session = MemorySession::default();
        let data =
            SessionData { user: User::for_test("u1", "Ana"), token: AccessToken::from("abc123") };
        session.save(&data).await.unwrap();

        let notifier = RecorderNotifier::default();
        let app = App::new(
            ApiClient::new(ApiClientOptions::default()),
            Arc::from(session),
            Arc::from(notifier.clone()),
        );

        let user = app.auth().restore().await.unwrap();
        assert_eq!("Ana", user.name);
        assert_eq!(Some(AccessToken::from("abc123")), app.auth().token().await);
        notifier.expect_no_notifications().await;
    }

    #[tokio::test]
    async fn test_logout_leaves_every_store_unauthenticated() {
        init_test_logging();

        let session = MemorySession::default();
        let data =
            SessionData { user: User::for_test("u1", "Ana"), token: AccessToken::from("abc123") };
        session.save(&data).await.unwrap();

        let notifier = RecorderNotifier::default();
        let app = App::new(
            ApiClient::new(ApiClientOptions::default()),
            Arc::from(session.clone()),
            Arc::from(notifier.clone()),
        );

        app.auth().restore().await.unwrap();
        app.auth().logout().await;

        assert_eq!(None, app.auth().user().await);
        assert_eq!(None, app.auth().token().await);
        assert_eq!(None, session.load().await.unwrap());
    }

    #[test]
    fn test_from_env_uses_defaults() {
        let overrides =
            [("BACKOFFICE_BASE_URL", None::<&str>), ("BACKOFFICE_SESSION_FILE", None)];
        temp_env::with_vars(overrides, || {
            App::from_env().unwrap();
        });
    }

    #[test]
    fn test_from_env_rejects_an_invalid_base_url() {
        temp_env::with_var("BACKOFFICE_BASE_URL", Some("not a url"), || {
            let err = App::from_env().unwrap_err();
            assert!(err.contains("BACKOFFICE_BASE_URL"));
        });
    }
}
