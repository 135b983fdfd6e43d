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

//! Typed clients for the back-office REST API.
//!
//! There is one module per server resource.  Every module defines a trait with the
//! operations the resource supports, a `Rest`-prefixed implementation that issues the real
//! HTTP requests through the shared [`ApiClient`], and a `Mock`-prefixed implementation for
//! tests that records requests and serves canned responses.
//!
//! All operations resolve to an [`errors::ApiResult`]: a successful status code yields the
//! decoded payload and any other outcome yields a closed [`errors::ApiError`] variant.
//! There is deliberately no way for a response to be neither a success nor an error.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

mod client;
pub use client::{ApiClient, ApiClientOptions};
pub mod errors;
#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub mod auth;
pub mod coupon;
pub mod department;
pub mod enterprise;
pub mod feedback;
pub mod member;
pub mod notification;
pub mod service;
pub mod setting;
pub mod subscription;
pub mod template;
