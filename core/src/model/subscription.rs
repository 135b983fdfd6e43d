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

//! The `Subscription` data type.

use serde::{Deserialize, Serialize};

/// A subscription plan as returned by the server.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Subscription {
    /// Server-assigned identifier of the plan.
    pub id: String,

    /// Display name of the plan.
    pub name: String,

    /// Monthly price of the plan in BRL.
    pub price: f64,

    /// Number of enterprises currently on this plan.
    pub enterprises_using: u32,
}
