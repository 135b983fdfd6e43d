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

//! The `Feedback` data type.

use serde::{Deserialize, Serialize};

/// A feedback entry submitted by an end user, as returned by the server.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Feedback {
    /// Server-assigned identifier of the entry.
    pub id: String,

    /// Free-form text of the feedback.
    pub message: String,

    /// Display name of the user that submitted the feedback, if known.
    pub user_name: Option<String>,

    /// Identifier of the enterprise the submitter belongs to, if known.
    pub enterprise_id: Option<String>,

    /// Display name of the enterprise the submitter belongs to, if known.
    pub enterprise_name: Option<String>,

    /// Submission timestamp as rendered by the server.
    pub created_at: Option<String>,
}

#[cfg(any(test, feature = "testutils"))]
impl Feedback {
    /// Creates a feedback entry with the given `id` and `message` and no attribution.
    /// Useful for testing purposes only.
    pub fn for_test(id: &str, message: &str) -> Self {
        Self {
            id: id.to_owned(),
            message: message.to_owned(),
            user_name: None,
            enterprise_id: None,
            enterprise_name: None,
            created_at: None,
        }
    }
}
