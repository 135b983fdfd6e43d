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

//! Client for the coupon administration endpoints.

use crate::client::{ApiClient, json_or_error, message_or_error};
use crate::errors::ApiResult;
use async_trait::async_trait;
use backoffice_core::model::{CouponDetail, CouponRow};
use serde::{Deserialize, Serialize};

/// Response carrying the full coupon table, which the server returns for every operation
/// that changes it.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ListCouponsResponse {
    /// All coupons known to the server.
    pub coupons: Vec<CouponRow>,

    /// Informational message to surface to the user, if any.
    #[serde(default)]
    pub message: Option<String>,
}

/// Shape of the body of the single-coupon response.
#[derive(Deserialize)]
struct CouponBody {
    /// The requested coupon in detail form.
    coupon: CouponDetail,
}

/// Attributes of a coupon as submitted on creation and update.
///
/// Field names follow the wire format of the server, which mixes snake case and camel case.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CouponPayload {
    /// Display name of the coupon.
    pub name: String,

    /// Discriminator of the coupon's kind as defined by the server.
    #[serde(rename = "type")]
    pub kind: String,

    /// Subscription plan the coupon applies to, if restricted to one.
    #[serde(rename = "subscription")]
    pub subscription_id: Option<String>,

    /// Service the coupon applies to, if restricted to one.
    #[serde(rename = "service")]
    pub service_id: Option<String>,

    /// Discount percentage in `(0, 100]`, if the coupon grants one.
    pub discount: Option<f64>,

    /// Expiration date in `DD/MM/YYYY` form, if the coupon expires.
    #[serde(rename = "dateExpiration")]
    pub date_expiration: Option<String>,

    /// Maximum number of redemptions, if bounded.
    pub limit: Option<u32>,

    /// Free-form description of the coupon.
    pub description: Option<String>,

    /// Redemption code of the coupon.
    pub code: String,
}

/// Payload of the coupon update request, which extends `CouponPayload` with the identifier
/// of the coupon to update.
#[derive(Serialize)]
struct UpdateCouponRequest<'a> {
    /// Server-assigned identifier of the coupon to update.
    id: &'a str,

    /// New attributes of the coupon.
    #[serde(flatten)]
    payload: &'a CouponPayload,
}

/// Interface to the coupon administration endpoints.
#[async_trait]
pub trait CouponApi {
    /// Fetches the full coupon table.
    async fn list(&self) -> ApiResult<ListCouponsResponse>;

    /// Fetches the coupon behind `id` in detail form.
    async fn get(&self, id: &str) -> ApiResult<CouponDetail>;

    /// Creates a new coupon and returns the refreshed table.
    async fn create(&self, payload: &CouponPayload) -> ApiResult<ListCouponsResponse>;

    /// Updates the coupon behind `id` and returns the refreshed table.
    async fn update(&self, id: &str, payload: &CouponPayload) -> ApiResult<ListCouponsResponse>;

    /// Deletes the coupon behind `id`.
    async fn delete(&self, id: &str) -> ApiResult<Option<String>>;
}

/// Implementation of the coupon interface against the real server.
#[derive(Clone)]
pub struct RestCouponApi {
    /// The shared HTTP client with which to issue requests.
    client: ApiClient,
}

impl RestCouponApi {
    /// Creates a new client that issues requests via `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CouponApi for RestCouponApi {
    async fn list(&self) -> ApiResult<ListCouponsResponse> {
        let response = self.client.get("adm/coupon").await?;
        json_or_error(response).await
    }

    async fn get(&self, id: &str) -> ApiResult<CouponDetail> {
        let response = self.client.get(&format!("adm/coupon/{}", id)).await?;
        let body: CouponBody = json_or_error(response).await?;
        Ok(body.coupon)
    }

    async fn create(&self, payload: &CouponPayload) -> ApiResult<ListCouponsResponse> {
        let response = self.client.post("adm/coupon", payload).await?;
        json_or_error(response).await
    }

    async fn update(&self, id: &str, payload: &CouponPayload) -> ApiResult<ListCouponsResponse> {
        let request = UpdateCouponRequest { id, payload };
        let response = self.client.put("adm/coupon", &request).await?;
        json_or_error(response).await
    }

    async fn delete(&self, id: &str) -> ApiResult<Option<String>> {
        let response = self.client.delete(&format!("adm/coupon/{}", id)).await?;
        message_or_error(response).await
    }
}

/// Implementation of the coupon interface that returns canned responses.
#[cfg(any(test, feature = "testutils"))]
#[derive(Default)]
pub struct MockCouponApi {
    /// Canned behavior of the `list` operation.
    pub list: crate::testutils::MockOp<(), ListCouponsResponse>,

    /// Canned behavior of the `get` operation, keyed by coupon identifier.
    pub get: crate::testutils::MockOp<String, CouponDetail>,

    /// Canned behavior of the `create` operation.
    pub create: crate::testutils::MockOp<CouponPayload, ListCouponsResponse>,

    /// Canned behavior of the `update` operation, keyed by `(id, payload)`.
    pub update: crate::testutils::MockOp<(String, CouponPayload), ListCouponsResponse>,

    /// Canned behavior of the `delete` operation, keyed by coupon identifier.
    pub delete: crate::testutils::MockOp<String, Option<String>>,
}

#[cfg(any(test, feature = "testutils"))]
#[async_trait]
impl CouponApi for MockCouponApi {
    async fn list(&self) -> ApiResult<ListCouponsResponse> {
        self.list.call(()).await
    }

    async fn get(&self, id: &str) -> ApiResult<CouponDetail> {
        self.get.call(id.to_owned()).await
    }

    async fn create(&self, payload: &CouponPayload) -> ApiResult<ListCouponsResponse> {
        self.create.call(payload.clone()).await
    }

    async fn update(&self, id: &str, payload: &CouponPayload) -> ApiResult<ListCouponsResponse> {
        self.update.call((id.to_owned(), payload.clone())).await
    }

    async fn delete(&self, id: &str) -> ApiResult<Option<String>> {
        self.delete.call(id.to_owned()).await
    }
}
