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

//! The `SelectOption` data type.

use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// A label/value pair as consumed by selection widgets.
///
/// The server returns these readily assembled for the lists that feed dropdowns, such as the
/// enterprise selector and the service catalog.
#[derive(Clone, Constructor, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SelectOption {
    /// Text shown to the user.
    pub label: String,

    /// Opaque identifier submitted back to the server upon selection.
    pub value: String,
}
