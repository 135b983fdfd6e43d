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

//! Client for the enterprise administration endpoints.

use crate::client::{ApiClient, json_or_error, message_or_error};
use crate::errors::ApiResult;
use async_trait::async_trait;
use backoffice_core::model::{Enterprise, EnterpriseCreate, GrantedCoupon, SelectOption, User};
use serde::{Deserialize, Serialize};

/// Response carrying the full roster of enterprises, which the server returns for every
/// operation that changes it.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ListEnterprisesResponse {
    /// All enterprises known to the server.
    pub enterprises: Vec<Enterprise>,

    /// Informational message to surface to the user, if any.
    #[serde(default)]
    pub message: Option<String>,
}

/// Shape of the body of the selection list response.
#[derive(Deserialize)]
struct SelectEnterprisesBody {
    /// Enterprises in label/value form.
    enterprises: Vec<SelectOption>,
}

/// Shape of the body of the granted coupons response.
#[derive(Deserialize)]
struct GrantedCouponsBody {
    /// Coupons granted to the requested enterprise.
    coupons: Vec<GrantedCoupon>,
}

/// Shape of the body of the enterprise members response.
#[derive(Deserialize)]
struct MembersBody {
    /// Accounts that belong to the requested enterprise.
    members: Vec<User>,
}

/// Details of the administrator account created alongside a new enterprise.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnterpriseUserCreate {
    /// Display name of the account.
    pub name: String,

    /// Role of the account within the enterprise.
    pub position: String,

    /// Email address of the account.
    pub email: String,

    /// Cleartext password of the account.
    pub password: String,

    /// Contact phone, if one was provided.
    pub phone: Option<String>,
}

/// Payload of the enterprise creation request.
#[derive(Serialize)]
struct CreateEnterpriseRequest<'a> {
    /// The enterprise to register.
    enterprise: &'a EnterpriseCreate,

    /// The administrator account to create alongside it.
    user: &'a EnterpriseUserCreate,
}

/// Payload of the enterprise update request, which is the subset of `Enterprise` fields
/// that the administrator may edit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnterpriseUpdate {
    /// Server-assigned identifier of the enterprise to update.
    pub id: String,

    /// Display name of the enterprise.
    pub name: String,

    /// Brazilian company registry number, for enterprises registered as companies.
    pub cnpj: Option<String>,

    /// Brazilian personal registry number, for enterprises registered as individuals.
    pub cpf: Option<String>,

    /// Postal code of the enterprise's address.
    pub cep: Option<String>,

    /// State of the enterprise's address.
    pub state: Option<String>,

    /// City of the enterprise's address.
    pub city: Option<String>,

    /// Neighborhood of the enterprise's address.
    pub neighborhood: Option<String>,

    /// Street of the enterprise's address.
    pub address: Option<String>,

    /// Free-form complement of the enterprise's address.
    pub complement: Option<String>,

    /// Street number of the enterprise's address.
    pub number_address: Option<String>,

    /// Contact email address.
    pub email: Option<String>,

    /// Contact phone number.
    pub phone: Option<String>,
}

/// Payload of the coupon grant request.
///
/// Field names follow the wire format of the server.  A `coupon_id` of `None` clears the
/// enterprise's current grant.
#[derive(Serialize)]
struct LinkCouponRequest<'a> {
    /// Identifier of the enterprise receiving the grant.
    #[serde(rename = "enterpriseId")]
    enterprise_id: &'a str,

    /// Identifier of the coupon to grant, or `None` to clear it.
    #[serde(rename = "couponId")]
    coupon_id: Option<&'a str>,
}

/// Interface to the enterprise administration endpoints.
#[async_trait]
pub trait EnterpriseApi {
    /// Fetches the full roster of enterprises.
    async fn list(&self) -> ApiResult<ListEnterprisesResponse>;

    /// Fetches all enterprises in label/value form for selection widgets.
    async fn list_select(&self) -> ApiResult<Vec<SelectOption>>;

    /// Fetches the coupons currently granted to the enterprise behind `id`.
    async fn coupons_of(&self, id: &str) -> ApiResult<Vec<GrantedCoupon>>;

    /// Fetches the accounts that belong to the enterprise behind `id`.
    async fn members_of(&self, id: &str) -> ApiResult<Vec<User>>;

    /// Registers a new enterprise with its administrator account and returns the refreshed
    /// roster.
    async fn create(
        &self,
        enterprise: &EnterpriseCreate,
        user: &EnterpriseUserCreate,
    ) -> ApiResult<ListEnterprisesResponse>;

    /// Updates an enterprise and returns the refreshed roster.
    async fn update(&self, enterprise: &EnterpriseUpdate) -> ApiResult<ListEnterprisesResponse>;

    /// Grants `coupon_id` to `enterprise_id`, or clears the grant when `None`, and returns
    /// the refreshed roster.
    async fn link_coupon(
        &self,
        enterprise_id: &str,
        coupon_id: Option<&str>,
    ) -> ApiResult<ListEnterprisesResponse>;

    /// Deletes the enterprise behind `id`.
    async fn delete(&self, id: &str) -> ApiResult<Option<String>>;

    /// Revokes the grant of `coupon_id` from its enterprise.
    async fn unlink_coupon(&self, coupon_id: &str) -> ApiResult<Option<String>>;
}

/// Implementation of the enterprise interface against the real server.
#[derive(Clone)]
pub struct RestEnterpriseApi {
    /// The shared HTTP client with which to issue requests.
    client: ApiClient,
}

impl RestEnterpriseApi {
    /// Creates a new client that issues requests via `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EnterpriseApi for RestEnterpriseApi {
    async fn list(&self) -> ApiResult<ListEnterprisesResponse> {
        let response = self.client.get("enterprise").await?;
        json_or_error(response).await
    }

    async fn list_select(&self) -> ApiResult<Vec<SelectOption>> {
        let response = self.client.get("enterprise/list-select").await?;
        let body: SelectEnterprisesBody = json_or_error(response).await?;
        Ok(body.enterprises)
    }

    async fn coupons_of(&self, id: &str) -> ApiResult<Vec<GrantedCoupon>> {
        let response = self.client.get(&format!("enterprise/{}/coupons", id)).await?;
        let body: GrantedCouponsBody = json_or_error(response).await?;
        Ok(body.coupons)
    }

    async fn members_of(&self, id: &str) -> ApiResult<Vec<User>> {
        let response = self.client.get(&format!("enterprise/{}/members", id)).await?;
        let body: MembersBody = json_or_error(response).await?;
        Ok(body.members)
    }

    async fn create(
        &self,
        enterprise: &EnterpriseCreate,
        user: &EnterpriseUserCreate,
    ) -> ApiResult<ListEnterprisesResponse> {
        let request = CreateEnterpriseRequest { enterprise, user };
        let response = self.client.post("enterprise", &request).await?;
        json_or_error(response).await
    }

    async fn update(&self, enterprise: &EnterpriseUpdate) -> ApiResult<ListEnterprisesResponse> {
        let response = self.client.put("enterprise", enterprise).await?;
        json_or_error(response).await
    }

    async fn link_coupon(
        &self,
        enterprise_id: &str,
        coupon_id: Option<&str>,
    ) -> ApiResult<ListEnterprisesResponse> {
        let request = LinkCouponRequest { enterprise_id, coupon_id };
        let response = self.client.post("enterprise/coupon", &request).await?;
        json_or_error(response).await
    }

    async fn delete(&self, id: &str) -> ApiResult<Option<String>> {
        let response = self.client.delete(&format!("enterprise/{}", id)).await?;
        message_or_error(response).await
    }

    async fn unlink_coupon(&self, coupon_id: &str) -> ApiResult<Option<String>> {
        let response = self.client.delete(&format!("enterprise/{}/coupon", coupon_id)).await?;
        message_or_error(response).await
    }
}

/// Implementation of the enterprise interface that returns canned responses.
#[cfg(any(test, feature = "testutils"))]
#[derive(Default)]
pub struct MockEnterpriseApi {
    /// Canned behavior of the `list` operation.
    pub list: crate::testutils::MockOp<(), ListEnterprisesResponse>,

    /// Canned behavior of the `list_select` operation.
    pub list_select: crate::testutils::MockOp<(), Vec<SelectOption>>,

    /// Canned behavior of the `coupons_of` operation, keyed by enterprise identifier.
    pub coupons_of: crate::testutils::MockOp<String, Vec<GrantedCoupon>>,

    /// Canned behavior of the `members_of` operation, keyed by enterprise identifier.
    pub members_of: crate::testutils::MockOp<String, Vec<User>>,

    /// Canned behavior of the `create` operation.
    pub create:
        crate::testutils::MockOp<(EnterpriseCreate, EnterpriseUserCreate), ListEnterprisesResponse>,

    /// Canned behavior of the `update` operation.
    pub update: crate::testutils::MockOp<EnterpriseUpdate, ListEnterprisesResponse>,

    /// Canned behavior of the `link_coupon` operation, keyed by
    /// `(enterprise_id, coupon_id)`.
    pub link_coupon: crate::testutils::MockOp<(String, Option<String>), ListEnterprisesResponse>,

    /// Canned behavior of the `delete` operation, keyed by enterprise identifier.
    pub delete: crate::testutils::MockOp<String, Option<String>>,

    /// Canned behavior of the `unlink_coupon` operation, keyed by coupon identifier.
    pub unlink_coupon: crate::testutils::MockOp<String, Option<String>>,
}

#[cfg(any(test, feature = "testutils"))]
#[async_trait]
impl EnterpriseApi for MockEnterpriseApi {
    async fn list(&self) -> ApiResult<ListEnterprisesResponse> {
        self.list.call(()).await
    }

    async fn list_select(&self) -> ApiResult<Vec<SelectOption>> {
        self.list_select.call(()).await
    }

    async fn coupons_of(&self, id: &str) -> ApiResult<Vec<GrantedCoupon>> {
        self.coupons_of.call(id.to_owned()).await
    }

    async fn members_of(&self, id: &str) -> ApiResult<Vec<User>> {
        self.members_of.call(id.to_owned()).await
    }

    async fn create(
        &self,
        enterprise: &EnterpriseCreate,
        user: &EnterpriseUserCreate,
    ) -> ApiResult<ListEnterprisesResponse> {
        self.create.call((enterprise.clone(), user.clone())).await
    }

    async fn update(&self, enterprise: &EnterpriseUpdate) -> ApiResult<ListEnterprisesResponse> {
        self.update.call(enterprise.clone()).await
    }

    async fn link_coupon(
        &self,
        enterprise_id: &str,
        coupon_id: Option<&str>,
    ) -> ApiResult<ListEnterprisesResponse> {
        self.link_coupon.call((enterprise_id.to_owned(), coupon_id.map(str::to_owned))).await
    }

    async fn delete(&self, id: &str) -> ApiResult<Option<String>> {
        self.delete.call(id.to_owned()).await
    }

    async fn unlink_coupon(&self, coupon_id: &str) -> ApiResult<Option<String>> {
        self.unlink_coupon.call(coupon_id.to_owned()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_coupon_request_uses_wire_field_names() {
        let request = LinkCouponRequest { enterprise_id: "e1", coupon_id: Some("c1") };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!("e1", value["enterpriseId"]);
        assert_eq!("c1", value["couponId"]);

        let request = LinkCouponRequest { enterprise_id: "e1", coupon_id: None };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value["couponId"].is_null());
    }

    #[test]
    fn test_list_enterprises_response_message_is_optional() {
        let json = r#"{"enterprises": []}"#;
        let response: ListEnterprisesResponse = serde_json::from_str(json).unwrap();
        assert!(response.enterprises.is_empty());
        assert_eq!(None, response.message);
    }

    #[test]
    fn test_granted_coupons_body_decodes_kind_from_type() {
        let json = r#"{"coupons": [
            {"id": "c1", "type": "subscription", "name": "WELCOME", "date_expiration": null}
        ]}"#;
        let body: GrantedCouponsBody = serde_json::from_str(json).unwrap();
        assert_eq!(1, body.coupons.len());
        assert_eq!("subscription", body.coupons[0].kind);
    }

    #[tokio::test]
    async fn test_mock_records_delete_requests() {
        let mock = MockEnterpriseApi::default();
        mock.delete.returns(Ok(Some("Organização removida".to_owned()))).await;

        let message = mock.delete("e5").await.unwrap();
        assert_eq!(Some("Organização removida".to_owned()), message);
        assert_eq!(vec!["e5".to_owned()], mock.delete.requests().await);
    }
}
