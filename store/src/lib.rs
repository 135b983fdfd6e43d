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

//! Client-side state for the back-office, one store per server resource.
//!
//! Every store owns the last-fetched copy of its resource plus a loading flag, both behind
//! an async mutex so overlapping actions interleave at await points.  All stores follow the
//! same action contract:
//!
//! 1. Raise the loading flag.
//! 2. Issue the request through the injected resource client.
//! 3. On success, replace the held state with the server's copy and route any
//!    informational message to the injected [`Notifier`].
//! 4. On failure, resolve the error to a user-facing message, route it to the notifier,
//!    and return `None`.  Errors never propagate out of a store.
//! 5. Lower the loading flag.
//!
//! Stores receive their collaborators as constructor arguments and hold no global state,
//! so tests can assemble them from the mock clients and a recording notifier.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

mod notifier;
pub use notifier::{LogNotifier, Notifier};
mod session;
pub use session::{FileSession, Session, SessionData, SessionResult};
#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub mod auth;
pub mod coupon;
pub mod department;
pub mod enterprise;
pub mod feedback;
pub mod member;
pub mod setting;
pub mod subscription;
pub mod template;
