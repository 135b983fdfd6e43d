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

//! The `Enterprise` data types.

use serde::{Deserialize, Serialize};

/// A coupon granted to an enterprise.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EnterpriseCoupon {
    /// Server-assigned identifier of the grant itself.
    pub id: String,

    /// Identifier of the granted coupon.
    pub coupon_id: String,

    /// Identifier of the enterprise holding the grant.
    pub enterprise_id: String,
}

/// An enterprise (organization) as returned by the server.
///
/// All address and contact fields are optional because the server only requires a name at
/// registration time.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Enterprise {
    /// Server-assigned identifier of the enterprise.
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

    /// Subscription plan the enterprise is on, if any.
    pub subscription_id: Option<String>,

    /// Identifier of the account that registered this enterprise, if recorded.
    pub created_by: Option<String>,

    /// Code of the enterprise in the external financial integration, if linked.
    pub code_financial: Option<String>,

    /// Coupons currently granted to the enterprise.
    #[serde(default)]
    pub coupons: Vec<EnterpriseCoupon>,
}

/// The payload to register a new enterprise, which is the subset of `Enterprise` fields that
/// the administrator provides by hand.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EnterpriseCreate {
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

    /// Code of the enterprise in the external financial integration, if linked.
    pub code_financial: Option<String>,
}

#[cfg(any(test, feature = "testutils"))]
impl Enterprise {
    /// Creates an enterprise with the given `id` and `name` and empty contents everywhere
    /// else.  Useful for testing purposes only.
    pub fn for_test(id: &str, name: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            cnpj: None,
            cpf: None,
            cep: None,
            state: None,
            city: None,
            neighborhood: None,
            address: None,
            complement: None,
            number_address: None,
            email: None,
            phone: None,
            subscription_id: None,
            created_by: None,
            code_financial: None,
            coupons: vec![],
        }
    }
}
