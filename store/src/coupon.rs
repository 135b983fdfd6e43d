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

//! Store for the coupon administration table.

use crate::notifier::{Notifier, error_message};
use backoffice_api::coupon::{CouponApi, CouponPayload};
use backoffice_core::model::{CouponDetail, CouponRow};
use futures::lock::Mutex;
use std::sync::Arc;

/// Mutable state held by the coupon store.
#[derive(Default)]
struct CouponState {
    /// Whether an action is currently talking to the server.
    loading: bool,

    /// Last-fetched copy of the coupon table.
    coupons: Vec<CouponRow>,
}

/// Client-side state for the coupon administration page.
pub struct CouponStore {
    /// Client with which to reach the coupon endpoints.
    api: Arc<dyn CouponApi + Send + Sync>,

    /// Sink for user-facing notifications.
    notifier: Arc<dyn Notifier + Send + Sync>,

    /// The held state, behind an async mutex.
    state: Mutex<CouponState>,
}

impl CouponStore {
    /// Creates a store that talks to the server via `api` and surfaces messages via
    /// `notifier`.
    pub fn new(
        api: Arc<dyn CouponApi + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        Self { api, notifier, state: Mutex::from(CouponState::default()) }
    }

    /// Whether an action is currently talking to the server.
    pub async fn loading(&self) -> bool {
        self.state.lock().await.loading
    }

    /// Returns a copy of the held coupon table.
    pub async fn coupons(&self) -> Vec<CouponRow> {
        self.state.lock().await.coupons.clone()
    }

    /// Replaces the held table with a fresh copy from the server.
    pub async fn refresh(&self) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.list().await {
            Ok(response) => {
                self.state.lock().await.coupons = response.coupons;
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

    /// Fetches the coupon behind `id` in the detail shape used by the edit form.
    ///
    /// The result is handed to the caller instead of being held because it backs a
    /// short-lived dialog.
    pub async fn get(&self, id: &str) -> Option<CouponDetail> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.get(id).await {
            Ok(coupon) => Some(coupon),
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Creates a new coupon.
    pub async fn create(&self, payload: &CouponPayload) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.create(payload).await {
            Ok(response) => {
                self.state.lock().await.coupons = response.coupons;
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

    /// Updates the coupon behind `id`.
    pub async fn update(&self, id: &str, payload: &CouponPayload) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.update(id, payload).await {
            Ok(response) => {
                self.state.lock().await.coupons = response.coupons;
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

    /// Deletes the coupon behind `id` and drops it from the held table.
    pub async fn delete(&self, id: &str) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.delete(id).await {
            Ok(message) => {
                self.state.lock().await.coupons.retain(|coupon| coupon.id != id);
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
