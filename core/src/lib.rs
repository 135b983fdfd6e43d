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

//! Core types for the back-office administration client.
//!
//! The crates in this workspace implement the client-side layers of the back-office
//! administration application: the pieces that authenticate an administrator and let them
//! manage enterprises, members, departments, coupons, subscriptions, notification templates,
//! feedback and settings against a remote REST service.  The workspace adheres to the
//! following layered architecture, leaves first:
//!
//! 1.  `core` (this crate): high-level data types that represent the entities exchanged with
//!     the server, pure validation routines for form input, and the environment and clock
//!     abstractions shared by every other layer.  There is no I/O in here.
//!
//! 1.  `api`: the transport layer.  One client module per server resource, each backed by a
//!     shared HTTP client that attaches the bearer token of the active session to every
//!     outgoing request.  Every call returns an explicit result so that failures can never
//!     pass silently.
//!
//! 1.  `store`: the state layer.  One store per resource holding the last-fetched collection
//!     and a loading flag, updating both around every API call and reporting the outcome
//!     through a notification seam.
//!
//! 1.  `app`: the assembly layer.  Builds the full set of stores from environment
//!     configuration and declares the route table of the application.
//!
//! There are result and error types per layer, such as `ModelResult` and `ApiResult`, and
//! errors flow upwards with the `?` operator until the stores consume them to notify the
//! user.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod clocks;
pub mod env;
pub mod model;
pub mod validate;
