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

//! High-level data types for the entities exchanged with the server.
//!
//! All entities in here are flat records defined by the server's API: the server owns their
//! lifecycle and the client never invents identity.  As a consequence, most types are plain
//! serializable structs without validating constructors.  The exception is the newtype
//! pattern used for values that carry an invariant of their own, such as `AccessToken`.

use thiserror::Error;

mod coupon;
mod department;
mod enterprise;
mod feedback;
mod select;
mod setting;
mod subscription;
mod template;
mod token;
mod user;

pub use coupon::{Coupon, CouponDetail, CouponRow, GrantedCoupon};
pub use department::{Department, DepartmentNode, department_tree};
pub use enterprise::{Enterprise, EnterpriseCoupon, EnterpriseCreate};
pub use feedback::Feedback;
pub use select::SelectOption;
pub use setting::Setting;
pub use subscription::Subscription;
pub use template::TemplateNotification;
pub use token::AccessToken;
pub use user::{User, UserAdm};

/// Error type for model validation problems.
#[derive(Debug, Eq, Error, PartialEq)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
