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

//! Utilities to help testing code built on top of the stores.

use crate::notifier::Notifier;
use crate::session::{Session, SessionData, SessionResult};
use async_trait::async_trait;
use futures::lock::Mutex;
use std::io;
use std::sync::Arc;

/// Initializes logging for a test, ignoring repeated initialization.
pub fn init_test_logging() {
    let _can_fail = env_logger::builder().is_test(true).try_init();
}

/// One notification captured by the `RecorderNotifier`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Notification {
    /// An informational message of a successful operation.
    Success(String),

    /// An explanation of a failed operation.
    Error(String),
}

/// Notifier that captures notifications instead of surfacing them.
#[derive(Clone, Default)]
pub struct RecorderNotifier {
    /// Storage for captured notifications, oldest first.
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecorderNotifier {
    /// Returns a copy of all captured notifications, oldest first.
    pub async fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().await.clone()
    }

    /// Expects that no notifications were emitted.
    pub async fn expect_no_notifications(&self) {
        let notifications = self.notifications.lock().await;
        assert!(notifications.is_empty(), "Expected to find no notifications");
    }

    /// Expects that exactly one success notification with `exp_message` was emitted.
    pub async fn expect_one_success(&self, exp_message: &str) {
        let notifications = self.notifications.lock().await;
        assert_eq!(
            vec![Notification::Success(exp_message.to_owned())],
            *notifications,
            "Expected to find just one success notification"
        );
    }

    /// Expects that exactly one error notification with `exp_message` was emitted.
    pub async fn expect_one_error(&self, exp_message: &str) {
        let notifications = self.notifications.lock().await;
        assert_eq!(
            vec![Notification::Error(exp_message.to_owned())],
            *notifications,
            "Expected to find just one error notification"
        );
    }
}

#[async_trait]
impl Notifier for RecorderNotifier {
    async fn success(&self, message: &str) {
        self.notifications.lock().await.push(Notification::Success(message.to_owned()));
    }

    async fn error(&self, message: &str) {
        self.notifications.lock().await.push(Notification::Error(message.to_owned()));
    }
}

/// Session storage backed by memory, with optional fault injection.
#[derive(Clone, Default)]
pub struct MemorySession {
    /// The persisted session, if any.
    data: Arc<Mutex<Option<SessionData>>>,

    /// Whether operations should fail instead of touching the session.
    fail: Arc<Mutex<bool>>,
}

impl MemorySession {
    /// Makes all subsequent operations fail with an I/O error.
    pub async fn inject_error(&self) {
        *self.fail.lock().await = true;
    }

    /// Returns an error if fault injection is active.
    async fn maybe_fail(&self) -> SessionResult<()> {
        if *self.fail.lock().await {
            return Err(io::Error::other("Injected session failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl Session for MemorySession {
    async fn load(&self) -> SessionResult<Option<SessionData>> {
        self.maybe_fail().await?;
        Ok(self.data.lock().await.clone())
    }

    async fn save(&self, data: &SessionData) -> SessionResult<()> {
        self.maybe_fail().await?;
        *self.data.lock().await = Some(data.clone());
        Ok(())
    }

    async fn clear(&self) -> SessionResult<()> {
        self.maybe_fail().await?;
        *self.data.lock().await = None;
        Ok(())
    }
}
