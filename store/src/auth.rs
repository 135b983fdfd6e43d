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

//! Store for the active session and the account that owns it.
//!
//! Unlike the resource stores, this one owns three pieces of shared machinery: the
//! account and token held in memory, the token slot of the shared HTTP client, and the
//! session persisted across restarts.  Every action that changes who is logged in must
//! keep the three in agreement, and the helpers in this module exist to make that hard
//! to get wrong.
//!
//! Session storage failures never surface to the user: a login that cannot be persisted
//! is still a valid login for the lifetime of the process, so such failures are logged
//! and swallowed.

use crate::notifier::{Notifier, error_message};
use crate::session::{Session, SessionData};
use backoffice_api::auth::{AuthApi, RegisterRequest};
use backoffice_api::ApiClient;
use backoffice_core::model::{AccessToken, User};
use futures::lock::Mutex;
use log::warn;
use std::sync::Arc;

/// Mutable state held by the auth store.
#[derive(Default)]
struct AuthState {
    /// Whether an action is currently talking to the server.
    loading: bool,

    /// Account that owns the active session, if logged in.
    user: Option<User>,

    /// Bearer token of the active session, if logged in.
    token: Option<AccessToken>,
}

/// Client-side state for the active session.
pub struct AuthStore {
    /// Client with which to reach the authentication endpoints.
    api: Arc<dyn AuthApi + Send + Sync>,

    /// The shared HTTP client whose token slot mirrors the active session.
    client: ApiClient,

    /// Storage that persists the session across restarts.
    session: Arc<dyn Session + Send + Sync>,

    /// Sink for user-facing notifications.
    notifier: Arc<dyn Notifier + Send + Sync>,

    /// The held state, behind an async mutex.
    state: Mutex<AuthState>,
}

impl AuthStore {
    /// Creates a store that talks to the server via `api`, mirrors the session token into
    /// `client`, persists the session via `session`, and surfaces messages via `notifier`.
    pub fn new(
        api: Arc<dyn AuthApi + Send + Sync>,
        client: ApiClient,
        session: Arc<dyn Session + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        Self { api, client, session, notifier, state: Mutex::from(AuthState::default()) }
    }

    /// Whether an action is currently talking to the server.
    pub async fn loading(&self) -> bool {
        self.state.lock().await.loading
    }

    /// Returns a copy of the account that owns the active session, if logged in.
    pub async fn user(&self) -> Option<User> {
        self.state.lock().await.user.clone()
    }

    /// Returns a copy of the bearer token of the active session, if logged in.
    pub async fn token(&self) -> Option<AccessToken> {
        self.state.lock().await.token.clone()
    }

    /// Adopts `user` and `token` as the active session and pushes the token into the
    /// shared HTTP client.
    async fn adopt(&self, user: User, token: AccessToken) {
        {
            let mut state = self.state.lock().await;
            state.user = Some(user);
            state.token = Some(token.clone());
        }
        self.client.set_token(Some(token)).await;
    }

    /// Persists the held session, if there is one.
    async fn persist(&self) {
        let data = {
            let state = self.state.lock().await;
            match (&state.user, &state.token) {
                (Some(user), Some(token)) => {
                    SessionData { user: user.clone(), token: token.clone() }
                }
                _ => return,
            }
        };
        if let Err(e) = self.session.save(&data).await {
            warn!("Failed to persist the session: {}", e);
        }
    }

    /// Re-adopts the session persisted by a previous run, if there is one.
    ///
    /// Returns the account that owns the restored session, or `None` when no session was
    /// persisted or it could not be read back.  An unreadable session is treated as being
    /// logged out instead of as an error the user can act on.
    pub async fn restore(&self) -> Option<User> {
        let data = match self.session.load().await {
            Ok(Some(data)) => data,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to restore the session: {}", e);
                return None;
            }
        };
        self.adopt(data.user.clone(), data.token).await;
        Some(data.user)
    }

    /// Logs into an existing account and adopts the returned session.
    pub async fn login(&self, email: &str, password: &str) -> Option<User> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.login(email, password).await {
            Ok(response) => {
                self.adopt(response.user.clone(), response.token).await;
                self.persist().await;
                Some(response.user)
            }
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Registers a new account with its enterprise and adopts the returned session.
    pub async fn register(&self, request: RegisterRequest) -> Option<User> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.register(request).await {
            Ok(response) => {
                self.adopt(response.user.clone(), response.token).await;
                self.persist().await;
                if let Some(message) = response.message {
                    self.notifier.success(&message).await;
                }
                Some(response.user)
            }
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Starts a password reset for the account behind `email`.
    pub async fn reset(&self, email: &str) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.reset(email).await {
            Ok(message) => {
                if let Some(message) = message {
                    self.notifier.success(&message).await;
                }
                Some(())
            }
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Checks the verification `code` the user received during a reset.
    pub async fn verify(&self, code: &str, email: &str) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.verify(code, email).await {
            Ok(message) => {
                if let Some(message) = message {
                    self.notifier.success(&message).await;
                }
                Some(())
            }
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Replaces the password of the account behind `email` after a verified reset.
    pub async fn new_password(&self, password: &str, email: &str) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.new_password(password, email).await {
            Ok(message) => {
                if let Some(message) = message {
                    self.notifier.success(&message).await;
                }
                Some(())
            }
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Updates the profile of the active account and re-persists the session so the
    /// stored copy of the account does not go stale.
    pub async fn update_profile(
        &self,
        name: &str,
        email: &str,
        department: Option<&str>,
    ) -> Option<User> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.update_profile(name, email, department).await {
            Ok(response) => {
                self.state.lock().await.user = Some(response.user.clone());
                self.persist().await;
                if let Some(message) = response.message {
                    self.notifier.success(&message).await;
                }
                Some(response.user)
            }
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Changes the password of the active account.
    pub async fn update_password(&self, actual: &str, new: &str) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.update_password(actual, new).await {
            Ok(message) => {
                if let Some(message) = message {
                    self.notifier.success(&message).await;
                }
                Some(())
            }
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Drops the active session: forgets the held account and token, clears the token
    /// slot of the shared HTTP client, and erases the persisted session.
    pub async fn logout(&self) {
        {
            let mut state = self.state.lock().await;
            state.user = None;
            state.token = None;
        }
        self.client.set_token(None).await;
        if let Err(e) = self.session.clear().await {
            warn!("Failed to erase the persisted session: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::{MemorySession, RecorderNotifier, init_test_logging};
    use backoffice_api::auth::{LoginResponse, MockAuthApi, ProfileResponse};
    use backoffice_api::ApiClientOptions;
    use backoffice_api::errors::ApiError;

    /// Builds a client whose token slot the tests can observe.
    fn client() -> ApiClient {
        ApiClient::new(ApiClientOptions::default())
    }

    /// Builds a login response that mints the session `(user, "abc123")`.
    fn minted(id: &str, name: &str, message: Option<&str>) -> LoginResponse {
        LoginResponse {
            user: User::for_test(id, name),
            token: AccessToken::from("abc123"),
            enterprise_created: None,
            enterprise_position: Some("CEO".to_owned()),
            message: message.map(str::to_owned),
        }
    }

    #[tokio::test]
    async fn test_restore_without_a_persisted_session_stays_logged_out() {
        init_test_logging();

        let api = Arc::new(MockAuthApi::default());
        let notifier = RecorderNotifier::default();
        let store = AuthStore::new(
            api,
            client(),
            Arc::from(MemorySession::default()),
            Arc::from(notifier.clone()),
        );

        assert_eq!(None, store.restore().await);

        assert_eq!(None, store.user().await);
        assert_eq!(None, store.token().await);
        notifier.expect_no_notifications().await;
    }

    #[tokio::test]
    async fn test_restore_adopts_the_persisted_session() {
        init_test_logging();

        let session = MemorySession::default();
        let data =
            SessionData { user: User::for_test("u1", "Ana"), token: AccessToken::from("abc123") };
        session.save(&data).await.unwrap();

        let api = Arc::new(MockAuthApi::default());
        let client = client();
        let notifier = RecorderNotifier::default();
        let store = AuthStore::new(
            api,
            client.clone(),
            Arc::from(session),
            Arc::from(notifier.clone()),
        );

        let user = store.restore().await.unwrap();

        assert_eq!("Ana", user.name);
        assert_eq!(Some(User::for_test("u1", "Ana")), store.user().await);
        assert_eq!(Some(AccessToken::from("abc123")), client.token().await);
        notifier.expect_no_notifications().await;
    }

    #[tokio::test]
    async fn test_restore_failure_is_treated_as_logged_out() {
        init_test_logging();

        let session = MemorySession::default();
        session.inject_error().await;

        let api = Arc::new(MockAuthApi::default());
        let notifier = RecorderNotifier::default();
        let store =
            AuthStore::new(api, client(), Arc::from(session), Arc::from(notifier.clone()));

        assert_eq!(None, store.restore().await);

        assert_eq!(None, store.user().await);
        notifier.expect_no_notifications().await;
    }

    #[tokio::test]
    async fn test_login_adopts_and_persists_the_session() {
        init_test_logging();

        let api = Arc::new(MockAuthApi::default());
        api.login.returns(Ok(minted("u1", "Ana", None))).await;
        let client = client();
        let session = MemorySession::default();
        let notifier = RecorderNotifier::default();
        let store = AuthStore::new(
            api.clone(),
            client.clone(),
            Arc::from(session.clone()),
            Arc::from(notifier.clone()),
        );

        let user = store.login("ana@example.com", "secret123").await.unwrap();

        assert_eq!("u1", user.id);
        assert_eq!(Some(AccessToken::from("abc123")), store.token().await);
        assert_eq!(Some(AccessToken::from("abc123")), client.token().await);
        let persisted = session.load().await.unwrap().unwrap();
        assert_eq!(User::for_test("u1", "Ana"), persisted.user);
        assert_eq!(
            vec![("ana@example.com".to_owned(), "secret123".to_owned())],
            api.login.requests().await
        );
        notifier.expect_no_notifications().await;
        assert!(!store.loading().await);
    }

    #[tokio::test]
    async fn test_login_error_notifies_and_stays_logged_out() {
        init_test_logging();

        let api = Arc::new(MockAuthApi::default());
        api.login
            .returns(Err(ApiError::Transport {
                status: 401,
                message: Some("Credenciais inválidas".to_owned()),
            }))
            .await;
        let client = client();
        let session = MemorySession::default();
        let notifier = RecorderNotifier::default();
        let store = AuthStore::new(
            api,
            client.clone(),
            Arc::from(session.clone()),
            Arc::from(notifier.clone()),
        );

        assert_eq!(None, store.login("ana@example.com", "wrong").await);

        assert_eq!(None, store.user().await);
        assert_eq!(None, client.token().await);
        assert_eq!(None, session.load().await.unwrap());
        notifier.expect_one_error("Credenciais inválidas").await;
        assert!(!store.loading().await);
    }

    #[tokio::test]
    async fn test_login_survives_a_session_save_failure() {
        init_test_logging();

        let api = Arc::new(MockAuthApi::default());
        api.login.returns(Ok(minted("u1", "Ana", None))).await;
        let session = MemorySession::default();
        session.inject_error().await;
        let notifier = RecorderNotifier::default();
        let store = AuthStore::new(
            api,
            client(),
            Arc::from(session),
            Arc::from(notifier.clone()),
        );

        store.login("ana@example.com", "secret123").await.unwrap();

        assert_eq!(Some(User::for_test("u1", "Ana")), store.user().await);
        notifier.expect_no_notifications().await;
    }

    #[tokio::test]
    async fn test_register_adopts_the_session_and_notifies() {
        init_test_logging();

        let api = Arc::new(MockAuthApi::default());
        api.register.returns(Ok(minted("u1", "Ana", Some("Conta criada")))).await;
        let session = MemorySession::default();
        let notifier = RecorderNotifier::default();
        let store = AuthStore::new(
            api.clone(),
            client(),
            Arc::from(session.clone()),
            Arc::from(notifier.clone()),
        );

        let request = RegisterRequest {
            name: "Ana".to_owned(),
            email: "ana@example.com".to_owned(),
            password: "secret123".to_owned(),
            name_enterprise: "ACME".to_owned(),
            position: "CEO".to_owned(),
        };
        let user = store.register(request.clone()).await.unwrap();

        assert_eq!("Ana", user.name);
        assert!(session.load().await.unwrap().is_some());
        assert_eq!(vec![request], api.register.requests().await);
        notifier.expect_one_success("Conta criada").await;
    }

    #[tokio::test]
    async fn test_reset_flow_notifies_each_step() {
        init_test_logging();

        let api = Arc::new(MockAuthApi::default());
        api.reset.returns(Ok(Some("Email enviado".to_owned()))).await;
        api.verify.returns(Ok(None)).await;
        api.new_password.returns(Ok(Some("Senha alterada".to_owned()))).await;
        let notifier = RecorderNotifier::default();
        let store = AuthStore::new(
            api,
            client(),
            Arc::from(MemorySession::default()),
            Arc::from(notifier.clone()),
        );

        store.reset("ana@example.com").await.unwrap();
        store.verify("123456", "ana@example.com").await.unwrap();
        store.new_password("secret456", "ana@example.com").await.unwrap();

        use crate::testutils::Notification;
        assert_eq!(
            vec![
                Notification::Success("Email enviado".to_owned()),
                Notification::Success("Senha alterada".to_owned()),
            ],
            notifier.notifications().await
        );
        assert!(!store.loading().await);
    }

    #[tokio::test]
    async fn test_update_profile_replaces_the_user_and_repersists() {
        init_test_logging();

        let api = Arc::new(MockAuthApi::default());
        api.login.returns(Ok(minted("u1", "Ana", None))).await;
        api.update_profile
            .returns(Ok(ProfileResponse {
                user: User::for_test("u1", "Ana Maria"),
                message: Some("Perfil atualizado".to_owned()),
            }))
            .await;
        let session = MemorySession::default();
        let notifier = RecorderNotifier::default();
        let store = AuthStore::new(
            api.clone(),
            client(),
            Arc::from(session.clone()),
            Arc::from(notifier.clone()),
        );

        store.login("ana@example.com", "secret123").await.unwrap();
        let user = store.update_profile("Ana Maria", "ana@example.com", None).await.unwrap();

        assert_eq!("Ana Maria", user.name);
        assert_eq!(Some(User::for_test("u1", "Ana Maria")), store.user().await);
        let persisted = session.load().await.unwrap().unwrap();
        assert_eq!("Ana Maria", persisted.user.name);
        assert_eq!(
            vec![("Ana Maria".to_owned(), "ana@example.com".to_owned(), None)],
            api.update_profile.requests().await
        );
        notifier.expect_one_success("Perfil atualizado").await;
    }

    #[tokio::test]
    async fn test_update_password_notifies_only() {
        init_test_logging();

        let api = Arc::new(MockAuthApi::default());
        api.update_password.returns(Ok(Some("Senha alterada".to_owned()))).await;
        let notifier = RecorderNotifier::default();
        let store = AuthStore::new(
            api.clone(),
            client(),
            Arc::from(MemorySession::default()),
            Arc::from(notifier.clone()),
        );

        store.update_password("secret123", "secret456").await.unwrap();

        assert_eq!(None, store.user().await);
        assert_eq!(
            vec![("secret123".to_owned(), "secret456".to_owned())],
            api.update_password.requests().await
        );
        notifier.expect_one_success("Senha alterada").await;
    }

    #[tokio::test]
    async fn test_logout_clears_the_session_everywhere() {
        init_test_logging();

        let api = Arc::new(MockAuthApi::default());
        api.login.returns(Ok(minted("u1", "Ana", None))).await;
        let client = client();
        let session = MemorySession::default();
        let notifier = RecorderNotifier::default();
        let store = AuthStore::new(
            api,
            client.clone(),
            Arc::from(session.clone()),
            Arc::from(notifier.clone()),
        );

        store.login("ana@example.com", "secret123").await.unwrap();
        store.logout().await;

        assert_eq!(None, store.user().await);
        assert_eq!(None, store.token().await);
        assert_eq!(None, client.token().await);
        assert_eq!(None, session.load().await.unwrap());
        notifier.expect_no_notifications().await;
    }

    #[tokio::test]
    async fn test_logout_survives_a_session_clear_failure() {
        init_test_logging();

        let api = Arc::new(MockAuthApi::default());
        api.login.returns(Ok(minted("u1", "Ana", None))).await;
        let session = MemorySession::default();
        let notifier = RecorderNotifier::default();
        let store = AuthStore::new(
            api,
            client(),
            Arc::from(session.clone()),
            Arc::from(notifier.clone()),
        );

        store.login("ana@example.com", "secret123").await.unwrap();
        session.inject_error().await;
        store.logout().await;

        assert_eq!(None, store.user().await);
        notifier.expect_no_notifications().await;
    }
}
