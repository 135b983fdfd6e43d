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

//! Store for the department forest.

use crate::notifier::{Notifier, error_message};
use backoffice_api::department::DepartmentApi;
use backoffice_core::model::{Department, DepartmentNode, department_tree};
use futures::lock::Mutex;
use std::sync::Arc;

/// Mutable state held by the department store.
struct DepartmentState {
    /// Whether an action is currently talking to the server.
    loading: bool,

    /// Whether the server considers the department data complete for this installation.
    filled_data: bool,

    /// Last-fetched flat copy of the department list.
    departments: Vec<Department>,
}

impl Default for DepartmentState {
    fn default() -> Self {
        // The completeness flag starts raised until the first fetch says otherwise.
        Self { loading: false, filled_data: true, departments: vec![] }
    }
}

/// Client-side state for the department administration page.
pub struct DepartmentStore {
    /// Client with which to reach the department endpoints.
    api: Arc<dyn DepartmentApi + Send + Sync>,

    /// Sink for user-facing notifications.
    notifier: Arc<dyn Notifier + Send + Sync>,

    /// The held state, behind an async mutex.
    state: Mutex<DepartmentState>,
}

impl DepartmentStore {
    /// Creates a store that talks to the server via `api` and surfaces messages via
    /// `notifier`.
    pub fn new(
        api: Arc<dyn DepartmentApi + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        Self { api, notifier, state: Mutex::from(DepartmentState::default()) }
    }

    /// Whether an action is currently talking to the server.
    pub async fn loading(&self) -> bool {
        self.state.lock().await.loading
    }

    /// Whether the server considers the department data complete for this installation.
    pub async fn filled_data(&self) -> bool {
        self.state.lock().await.filled_data
    }

    /// Returns a copy of the held flat department list.
    pub async fn departments(&self) -> Vec<Department> {
        self.state.lock().await.departments.clone()
    }

    /// Derives the department forest from the held flat list.
    pub async fn tree(&self) -> Vec<DepartmentNode> {
        department_tree(&self.state.lock().await.departments)
    }

    /// Replaces the held list with `departments` as returned by the server.
    async fn refill(&self, departments: Vec<Department>, filled_data: Option<bool>) {
        let mut state = self.state.lock().await;
        state.departments = departments;
        if let Some(filled_data) = filled_data {
            state.filled_data = filled_data;
        }
    }

    /// Replaces the held list with a fresh copy from the server.
    pub async fn refresh(&self) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.list().await {
            Ok(response) => {
                self.refill(response.departments, response.filled_data).await;
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

    /// Creates a new department, nested under `parent_id` when given.
    pub async fn create(&self, name: &str, parent_id: Option<i32>) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.create(name, parent_id).await {
            Ok(response) => {
                self.refill(response.departments, response.filled_data).await;
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

    /// Updates the department behind `id`.
    pub async fn update(&self, id: i32, name: &str, parent_id: Option<i32>) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.update(id, name, parent_id).await {
            Ok(response) => {
                self.refill(response.departments, response.filled_data).await;
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

    /// Deletes the department behind `id`.
    ///
    /// The server recomputes the whole forest when a department goes away, so the held
    /// list is refilled from the response instead of filtered in place.
    pub async fn delete(&self, id: i32) -> Option<()> {
        self.state.lock().await.loading = true;
        let outcome = match self.api.delete(id).await {
            Ok(response) => {
                self.refill(response.departments, response.filled_data).await;
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::{RecorderNotifier, init_test_logging};
    use backoffice_api::department::{ListDepartmentsResponse, MockDepartmentApi};
    use backoffice_api::errors::ApiError;

    /// Builds a list response from `(id, name, parent_id)` triples.
    fn listing(
        departments: &[(i32, &str, Option<i32>)],
        filled_data: Option<bool>,
        message: Option<&str>,
    ) -> ListDepartmentsResponse {
        let departments = departments
            .iter()
            .map(|(id, name, parent_id)| Department::new(*id, (*name).to_owned(), *parent_id))
            .collect();
        ListDepartmentsResponse { departments, filled_data, message: message.map(str::to_owned) }
    }

    #[tokio::test]
    async fn test_refresh_replaces_the_list_and_the_completeness_flag() {
        init_test_logging();

        let api = Arc::new(MockDepartmentApi::default());
        api.list.returns(Ok(listing(&[(1, "Diretoria", None)], Some(false), None))).await;
        let notifier = RecorderNotifier::default();
        let store = DepartmentStore::new(api, Arc::from(notifier.clone()));

        assert!(store.filled_data().await);
        store.refresh().await.unwrap();

        let expected = vec![Department::new(1, "Diretoria".to_owned(), None)];
        assert_eq!(expected, store.departments().await);
        assert!(!store.filled_data().await);
        notifier.expect_no_notifications().await;
        assert!(!store.loading().await);
    }

    #[tokio::test]
    async fn test_refresh_without_flag_keeps_the_previous_flag() {
        init_test_logging();

        let api = Arc::new(MockDepartmentApi::default());
        api.list.returns(Ok(listing(&[], Some(false), None))).await;
        api.list.returns(Ok(listing(&[], None, None))).await;
        let notifier = RecorderNotifier::default();
        let store = DepartmentStore::new(api, Arc::from(notifier.clone()));

        store.refresh().await.unwrap();
        store.refresh().await.unwrap();

        assert!(!store.filled_data().await);
    }

    #[tokio::test]
    async fn test_tree_derives_from_the_held_list() {
        init_test_logging();

        let api = Arc::new(MockDepartmentApi::default());
        api.list
            .returns(Ok(listing(
                &[(1, "Diretoria", None), (2, "Financeiro", Some(1))],
                None,
                None,
            )))
            .await;
        let notifier = RecorderNotifier::default();
        let store = DepartmentStore::new(api, Arc::from(notifier.clone()));

        store.refresh().await.unwrap();
        let tree = store.tree().await;

        assert_eq!(1, tree.len());
        assert_eq!(1, tree[0].id);
        assert_eq!(vec![2], tree[0].children.iter().map(|node| node.id).collect::<Vec<i32>>());
    }

    #[tokio::test]
    async fn test_delete_refills_from_the_response() {
        init_test_logging();

        let api = Arc::new(MockDepartmentApi::default());
        api.list
            .returns(Ok(listing(
                &[(1, "Diretoria", None), (2, "Financeiro", Some(1))],
                None,
                None,
            )))
            .await;
        api.delete
            .returns(Ok(listing(&[(1, "Diretoria", None)], None, Some("Departamento removido"))))
            .await;
        let notifier = RecorderNotifier::default();
        let store = DepartmentStore::new(api.clone(), Arc::from(notifier.clone()));

        store.refresh().await.unwrap();
        store.delete(2).await.unwrap();

        let expected = vec![Department::new(1, "Diretoria".to_owned(), None)];
        assert_eq!(expected, store.departments().await);
        assert_eq!(vec![2], api.delete.requests().await);
        notifier.expect_one_success("Departamento removido").await;
    }

    #[tokio::test]
    async fn test_create_error_notifies_and_keeps_the_list() {
        init_test_logging();

        let api = Arc::new(MockDepartmentApi::default());
        api.list.returns(Ok(listing(&[(1, "Diretoria", None)], None, None))).await;
        api.create
            .returns(Err(ApiError::Transport {
                status: 422,
                message: Some("Nome já em uso".to_owned()),
            }))
            .await;
        let notifier = RecorderNotifier::default();
        let store = DepartmentStore::new(api, Arc::from(notifier.clone()));

        store.refresh().await.unwrap();
        assert_eq!(None, store.create("Diretoria", None).await);

        assert_eq!(1, store.departments().await.len());
        notifier.expect_one_error("Nome já em uso").await;
        assert!(!store.loading().await);
    }
}
