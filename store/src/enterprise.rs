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

//! Store for the enterprise roster and the per-enterprise member list.

use crate::notifier::{Notifier, error_message};
use backoffice_api::enterprise::{EnterpriseApi, EnterpriseUpdate, EnterpriseUserCreate};
use backoffice_core::model::{Enterprise, EnterpriseCreate, GrantedCoupon, SelectOption, User};
use futures::lock::Mutex;
use std::sync::Arc;

/// Mutable state held by the enterprise store.
#[derive(Default)]
struct EnterpriseState {
    /// Whether an action is currently talking to the server.
    loading: bool,

    /// Last-fetched copy of the enterprise roster.
    enterprises: Vec<Enterprise>,

    /// Last-fetched member list of the enterprise selected for inspection.
    members: Vec<User>,
}

/// Client-side state for the enterprise administration pages.
pub struct EnterpriseStore {
    /// Client with which to reach the enterprise endpoints.
    api: Arc<dyn EnterpriseApi + Send + Sync>,

    /// Sink for user-facing notifications.
    notifier: Arc<dyn Notifier + Send + Sync>,

    /// The held state, behind an async mutex.
    state: Mutex<EnterpriseState>,
}

impl EnterpriseStore {
    /// Creates a store that talks to the server via `api` and surfaces messages via
    /// `notifier`.
    pub fn new(
        api: Arc<dyn EnterpriseApi + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        Self { api, notifier, state: Mutex::from(EnterpriseState::default()) }
    }

    /// Whether an action is currently talking to the server.
    pub async fn loading(&self) -> bool {
        self.state.lock().await.loading
    }

    /// Returns a copy of the held enterprise roster.
    pub async fn enterprises(&self) -> Vec<Enterprise> {
        self.state.lock().await.enterprises.clone()
    }

    /// Returns a copy of the held member list.
    pub async fn members(&self) -> Vec<User> {
        self.state.lock().await.members.clone()
    }

    /// Replaces the held roster with a fresh copy from the server.
    pub async fn refresh(&self) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.list().await {
            Ok(response) => {
                self.state.lock().await.enterprises = response.enterprises;
                Some(())
            }
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Replaces the held member list with the members of the enterprise behind
    /// `enterprise_id`.
    pub async fn refresh_members(&self, enterprise_id: &str) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.members_of(enterprise_id).await {
            Ok(members) => {
                self.state.lock().await.members = members;
                Some(())
            }
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Fetches the coupons granted to the enterprise behind `enterprise_id`.
    ///
    /// The result is handed to the caller instead of being held because the grant dialog
    /// is the only consumer and it is short-lived.
    pub async fn coupons_of(&self, enterprise_id: &str) -> Option<Vec<GrantedCoupon>> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.coupons_of(enterprise_id).await {
            Ok(coupons) => Some(coupons),
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Fetches the enterprises in label/value form for selection widgets.
    pub async fn list_select(&self) -> Option<Vec<SelectOption>> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.list_select().await {
            Ok(options) => Some(options),
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Registers a new enterprise with its administrator account.
    pub async fn create(
        &self,
        enterprise: &EnterpriseCreate,
        user: &EnterpriseUserCreate,
    ) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.create(enterprise, user).await {
            Ok(response) => {
                self.state.lock().await.enterprises = response.enterprises;
                if let Some(message) = response.message {
                    self.notifier.success(&message).await;
                }
                Some(())
            }
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Updates an enterprise.
    pub async fn update(&self, enterprise: &EnterpriseUpdate) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.update(enterprise).await {
            Ok(response) => {
                self.state.lock().await.enterprises = response.enterprises;
                if let Some(message) = response.message {
                    self.notifier.success(&message).await;
                }
                Some(())
            }
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Grants `coupon_id` to `enterprise_id`, or clears the grant when `None`.
    pub async fn link_coupon(&self, enterprise_id: &str, coupon_id: Option<&str>) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.link_coupon(enterprise_id, coupon_id).await {
            Ok(response) => {
                self.state.lock().await.enterprises = response.enterprises;
                if let Some(message) = response.message {
                    self.notifier.success(&message).await;
                }
                Some(())
            }
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Revokes the grant of `coupon_id` from its enterprise.
    ///
    /// The held roster is not touched; callers refresh it when they need the grant lists
    /// to be current.
    pub async fn unlink_coupon(&self, coupon_id: &str) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.unlink_coupon(coupon_id).await {
            Ok(message) => {
                if let Some(message) = message {
                    self.notifier.success(&message).await;
                }
                Some(())
            }
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }

    /// Deletes the enterprise behind `id` and drops it from the held roster.
    pub async fn delete(&self, id: &str) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.delete(id).await {
            Ok(message) => {
                self.state.lock().await.enterprises.retain(|enterprise| enterprise.id != id);
                if let Some(message) = message {
                    self.notifier.success(&message).await;
                }
                Some(())
            }
            Err(e) => {
                self.notifier.error(&error_message(&e)).await;
                None
            }
        };
        self.state.lock().await.loading = false;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::RecorderNotifier;
    use backoffice_api::enterprise::{ListEnterprisesResponse, MockEnterpriseApi};
    use backoffice_api::errors::ApiError;

    /// Builds a roster response containing one enterprise per entry in `ids`.
    fn roster(ids: &[&str], message: Option<&str>) -> ListEnterprisesResponse {
        let enterprises = ids.iter().map(|id| Enterprise::for_test(id, "ACME")).collect();
        ListEnterprisesResponse { enterprises, message: message.map(str::to_owned) }
    }

    /// Returns the identifiers of the enterprises held by `store`.
    async fn held_ids(store: &EnterpriseStore) -> Vec<String> {
        store.enterprises().await.into_iter().map(|enterprise| enterprise.id).collect()
    }

    #[tokio::test]
    async fn test_refresh_replaces_the_roster() {
        let api = Arc::new(MockEnterpriseApi::default());
        api.list.returns(Ok(roster(&["e1", "e2"], None))).await;
        api.list.returns(Ok(roster(&["e3"], None))).await;
        let notifier = RecorderNotifier::default();
        let store = EnterpriseStore::new(api, Arc::from(notifier.clone()));

        store.refresh().await.unwrap();
        assert_eq!(vec!["e1", "e2"], held_ids(&store).await);

        store.refresh().await.unwrap();
        assert_eq!(vec!["e3"], held_ids(&store).await);

        notifier.expect_no_notifications().await;
        assert!(!store.loading().await);
    }

    #[tokio::test]
    async fn test_refresh_error_notifies_and_keeps_the_roster() {
        let api = Arc::new(MockEnterpriseApi::default());
        api.list.returns(Ok(roster(&["e1"], None))).await;
        api.list
            .returns(Err(ApiError::Transport {
                status: 500,
                message: Some("Falha no servidor".to_owned()),
            }))
            .await;
        let notifier = RecorderNotifier::default();
        let store = EnterpriseStore::new(api, Arc::from(notifier.clone()));

        store.refresh().await.unwrap();
        assert_eq!(None, store.refresh().await);

        assert_eq!(vec!["e1"], held_ids(&store).await);
        notifier.expect_one_error("Falha no servidor").await;
        assert!(!store.loading().await);
    }

    #[tokio::test]
    async fn test_create_refills_and_notifies() {
        let api = Arc::new(MockEnterpriseApi::default());
        api.create.returns(Ok(roster(&["e1", "e2"], Some("Organização criada")))).await;
        let notifier = RecorderNotifier::default();
        let store = EnterpriseStore::new(api, Arc::from(notifier.clone()));

        let enterprise = EnterpriseCreate {
            name: "ACME".to_owned(),
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
            code_financial: None,
        };
        let user = EnterpriseUserCreate {
            name: "Ana".to_owned(),
            position: "CEO".to_owned(),
            email: "ana@example.com".to_owned(),
            password: "secret123".to_owned(),
            phone: None,
        };
        store.create(&enterprise, &user).await.unwrap();

        assert_eq!(vec!["e1", "e2"], held_ids(&store).await);
        notifier.expect_one_success("Organização criada").await;
    }

    #[tokio::test]
    async fn test_delete_filters_the_roster() {
        let api = Arc::new(MockEnterpriseApi::default());
        api.list.returns(Ok(roster(&["e1", "e2", "e3"], None))).await;
        api.delete.returns(Ok(Some("Organização removida".to_owned()))).await;
        let notifier = RecorderNotifier::default();
        let store = EnterpriseStore::new(api, Arc::from(notifier.clone()));

        store.refresh().await.unwrap();
        store.delete("e2").await.unwrap();

        assert_eq!(vec!["e1", "e3"], held_ids(&store).await);
        notifier.expect_one_success("Organização removida").await;
    }

    #[tokio::test]
    async fn test_delete_error_leaves_the_roster_intact() {
        let api = Arc::new(MockEnterpriseApi::default());
        api.list.returns(Ok(roster(&["e1", "e2"], None))).await;
        api.delete.returns(Err(ApiError::Unknown)).await;
        let notifier = RecorderNotifier::default();
        let store = EnterpriseStore::new(api, Arc::from(notifier.clone()));

        store.refresh().await.unwrap();
        assert_eq!(None, store.delete("e2").await);

        assert_eq!(vec!["e1", "e2"], held_ids(&store).await);
        notifier.expect_one_error("Error").await;
        assert!(!store.loading().await);
    }

    #[tokio::test]
    async fn test_refresh_members_holds_the_member_list() {
        let api = Arc::new(MockEnterpriseApi::default());
        api.members_of.returns(Ok(vec![User::for_test("u1", "Ana")])).await;
        let notifier = RecorderNotifier::default();
        let store = EnterpriseStore::new(api.clone(), Arc::from(notifier.clone()));

        store.refresh_members("e1").await.unwrap();

        assert_eq!(vec![User::for_test("u1", "Ana")], store.members().await);
        assert_eq!(vec!["e1".to_owned()], api.members_of.requests().await);
        notifier.expect_no_notifications().await;
    }

    #[tokio::test]
    async fn test_coupons_of_returns_without_holding() {
        let api = Arc::new(MockEnterpriseApi::default());
        let coupon = GrantedCoupon {
            id: "c1".to_owned(),
            kind: "subscription".to_owned(),
            name: "WELCOME".to_owned(),
            date_expiration: None,
        };
        api.coupons_of.returns(Ok(vec![coupon.clone()])).await;
        let notifier = RecorderNotifier::default();
        let store = EnterpriseStore::new(api, Arc::from(notifier.clone()));

        assert_eq!(Some(vec![coupon]), store.coupons_of("e1").await);
        notifier.expect_no_notifications().await;
    }

    #[tokio::test]
    async fn test_link_coupon_refills_the_roster() {
        let api = Arc::new(MockEnterpriseApi::default());
        api.link_coupon.returns(Ok(roster(&["e1"], Some("Cupom vinculado")))).await;
        let notifier = RecorderNotifier::default();
        let store = EnterpriseStore::new(api.clone(), Arc::from(notifier.clone()));

        store.link_coupon("e1", Some("c1")).await.unwrap();

        assert_eq!(vec!["e1"], held_ids(&store).await);
        assert_eq!(
            vec![("e1".to_owned(), Some("c1".to_owned()))],
            api.link_coupon.requests().await
        );
        notifier.expect_one_success("Cupom vinculado").await;
    }
}
