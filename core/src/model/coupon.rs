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

//! The coupon data types.
//!
//! Coupons come in several shapes depending on the API that returns them: the bare
//! name/identifier pair used in selection lists, the row shape used by the administration
//! table, the detail shape used when editing one, and the summary shape attached to the
//! enterprises that hold a grant.

use serde::{Deserialize, Serialize};

/// A coupon as used in selection lists.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Coupon {
    /// Server-assigned identifier of the coupon.
    pub id: String,

    /// Display name of the coupon.
    pub name: String,
}

/// A coupon as granted to a specific enterprise.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GrantedCoupon {
    /// Server-assigned identifier of the coupon.
    pub id: String,

    /// Discriminator of the coupon's kind as defined by the server.
    #[serde(rename = "type")]
    pub kind: String,

    /// Display name of the coupon.
    pub name: String,

    /// Expiration date as rendered by the server, if the coupon expires.
    pub date_expiration: Option<String>,
}

/// A coupon row as shown in the administration table.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CouponRow {
    /// Server-assigned identifier of the coupon.
    pub id: String,

    /// Display name of the coupon.
    pub name: String,

    /// Discriminator of the coupon's kind as defined by the server.
    #[serde(rename = "type")]
    pub kind: String,

    /// Whether the coupon can currently be redeemed (1) or not (0).
    pub active: i32,

    /// Number of redemptions so far.
    pub using: u32,

    /// Maximum number of redemptions, if bounded.
    pub limit: Option<u32>,

    /// Expiration date as rendered by the server, if the coupon expires.
    pub date_expiration: Option<String>,

    /// Creation timestamp as rendered by the server.
    pub created_at: Option<String>,

    /// Redemption code of the coupon.
    pub code: String,
}

/// A coupon in the detail shape used by the edit form.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CouponDetail {
    /// Server-assigned identifier of the coupon.
    pub id: String,

    /// Display name of the coupon.
    pub name: String,

    /// Free-form description of the coupon.
    pub description: Option<String>,

    /// Discriminator of the coupon's kind as defined by the server.
    #[serde(rename = "type")]
    pub kind: String,

    /// Maximum number of redemptions, if bounded.
    pub limit: Option<u32>,

    /// Subscription plan the coupon applies to, if restricted to one.
    pub subscription_id: Option<String>,

    /// Service the coupon applies to, if restricted to one.
    pub service_id: Option<String>,

    /// Discount percentage in `(0, 100]`, if the coupon grants one.
    pub discount: Option<f64>,

    /// Redemption code of the coupon.
    pub code: String,

    /// Expiration date as rendered by the server, if the coupon expires.
    pub date_expiration: Option<String>,
}
