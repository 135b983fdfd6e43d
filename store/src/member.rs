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

//! Store for the administration member roster.

use crate::notifier::{Notifier, error_message};
use backoffice_api::member::{MemberApi, MemberCreate, MemberUpdate};
use backoffice_core::model::UserAdm;
use futures::lock::Mutex;
use std::sync::Arc;

/// Mutable state held by the member store.
#[derive(Default)]
struct MemberState {
    /// Whether an action is currently talking to the server.
    loading: bool,

    /// Last-fetched copy of the member roster.
    members: Vec<UserAdm>,
}

/// Client-side state for the member administration page.
pub struct MemberStore {
    /// Client with which to reach the member endpoints.
    api: Arc<dyn MemberApi + Send + Sync>,

    /// Sink for user-facing notifications.
    notifier: Arc<dyn Notifier + Send + Sync>,

    /// The held state, behind an async mutex.
    state: Mutex<MemberState>,
}

impl MemberStore {
    /// Creates a store that talks to the server via `api` and surfaces messages via
    /// `notifier`.
    pub fn new(
        api: Arc<dyn MemberApi + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        Self { api, notifier, state: Mutex::from(MemberState::default()) }
    }

    /// Whether an action is currently talking to the server.
    pub async fn loading(&self) -> bool {
        self.state.lock().await.loading
    }

    /// Returns a copy of the held member roster.
    pub async fn members(&self) -> Vec<UserAdm> {
        self.state.lock().await.members.clone()
    }

    /// Replaces the held roster with a fresh copy from the server.
    pub async fn refresh(&self) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.list().await {
            Ok(response) => {
                self.state.lock().await.members = response.users;
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

    /// Creates a new member.
    pub async fn create(&self, member: &MemberCreate) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.create(member).await {
            Ok(response) => {
                self.state.lock().await.members = response.users;
                if let Some(message) = response.message {
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

    /// Updates a member.
    pub async fn update(&self, member: &MemberUpdate) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.update(member).await {
            Ok(response) => {
                self.state.lock().await.members = response.users;
                if let Some(message) = response.message {
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

    /// Toggles whether the member behind `user_id` may log in.
    pub async fn set_active(&self, user_id: &str, active: i32) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.set_active(user_id, active).await {
            Ok(response) => {
                self.state.lock().await.members = response.users;
                if let Some(message) = response.message {
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

    /// Deletes the member behind `id` and drops it from the held roster.
    pub async fn delete(&self, id: &str) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.delete(id).await {
            Ok(message) => {
                self.state.lock().await.members.retain(|member| member.id != id);
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
}
