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

//! Persistence of the active session across program restarts.

use async_trait::async_trait;
use backoffice_core::model::{AccessToken, User};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;

/// Result type for session persistence operations.
pub type SessionResult<T> = io::Result<T>;

/// The data persisted for an active session.
///
/// The keys under which the two entries are stored predate this client and must not
/// change, or existing sessions would be dropped on upgrade.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SessionData {
    /// Account that owns the session.
    #[serde(rename = "themplus_user")]
    pub user: User,

    /// Bearer token of the session.
    #[serde(rename = "themplus_token")]
    pub token: AccessToken,
}

/// Interface to persist the active session across program restarts.
#[async_trait]
pub trait Session {
    /// Returns the persisted session, if there is one.
    async fn load(&self) -> SessionResult<Option<SessionData>>;

    /// Persists `data` as the active session, replacing any previous one.
    async fn save(&self, data: &SessionData) -> SessionResult<()>;

    /// Forgets the persisted session, if there was one.
    async fn clear(&self) -> SessionResult<()>;
}

/// Session storage backed by a JSON file.
#[derive(Clone)]
pub struct FileSession {
    /// Location of the file holding the session.
    path: PathBuf,
}

impl FileSession {
    /// Creates a new store that persists the session at `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Session for FileSession {
    async fn load(&self) -> SessionResult<Option<SessionData>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        let data = serde_json::from_str::<SessionData>(&text)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Some(data))
    }

    async fn save(&self, data: &SessionData) -> SessionResult<()> {
        let text = serde_json::to_string_pretty(data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(&self.path, text)
    }

    async fn clear(&self) -> SessionResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
