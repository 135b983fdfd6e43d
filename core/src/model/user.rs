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

//! The `User` and `UserAdm` data types.

use serde::{Deserialize, Serialize};

/// A user of an enterprise as returned by the server.
///
/// `active` is an integer 0/1 flag, not a boolean, because that is how the server encodes it
/// on the wire.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct User {
    /// Server-assigned identifier of the user.
    pub id: String,

    /// Display name of the user.
    pub name: String,

    /// Email address of the user.
    pub email: String,

    /// Contact phone, if one was provided.
    pub phone: Option<String>,

    /// Role of the user within its enterprise.
    pub position: String,

    /// Whether the user may log in (1) or has been deactivated (0).
    pub active: i32,

    /// Department the user belongs to, if any.
    pub department_id: Option<String>,

    /// Enterprise the user is currently viewing, for accounts that can switch views.
    pub view_enterprise_id: Option<String>,

    /// Display name of the enterprise the user is currently viewing.
    pub view_enterprise_name: Option<String>,

    /// Identifier of the account that created this user, if recorded.
    pub created_by: Option<String>,

    /// Creation timestamp as rendered by the server.
    pub created_at: Option<String>,
}

/// A user as seen from the administration roster, which carries a subset of the `User`
/// fields.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct UserAdm {
    /// Server-assigned identifier of the user.
    pub id: String,

    /// Display name of the user.
    pub name: String,

    /// Email address of the user.
    pub email: String,

    /// Role of the user within its enterprise.
    pub position: String,

    /// Whether the user may log in (1) or has been deactivated (0).
    pub active: i32,

    /// Identifier of the account that created this user, if recorded.
    pub created_by: Option<String>,

    /// Department the user belongs to, if any.
    pub department_id: Option<String>,

    /// Creation timestamp as rendered by the server.
    pub created_at: Option<String>,
}

#[cfg(any(test, feature = "testutils"))]
impl User {
    /// Creates a user with the given `id` and `name` and placeholder contents everywhere
    /// else.  Useful for testing purposes only.
    pub fn for_test(id: &str, name: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            email: format!("{}@example.com", name),
            phone: None,
            position: "member".to_owned(),
            active: 1,
            department_id: None,
            view_enterprise_id: None,
            view_enterprise_name: None,
            created_by: None,
            created_at: None,
        }
    }
}
