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

//! The `Department` data types and the tree derivation over them.

use derive_more::Constructor;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A department as returned by the server.
///
/// Departments form a forest through `parent_id`, which the server does not validate for
/// referential integrity, so a department may reference a parent that no longer exists.
#[derive(Clone, Constructor, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Department {
    /// Server-assigned identifier of the department.
    pub id: i32,

    /// Display name of the department.
    pub name: String,

    /// Identifier of the parent department, or none for top-level departments.
    pub parent_id: Option<i32>,
}

/// A department with its children resolved, as consumed by tree widgets.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DepartmentNode {
    /// Server-assigned identifier of the department.
    pub id: i32,

    /// Display name of the department.
    pub name: String,

    /// Identifier of the parent department as it came from the server.  Kept verbatim even
    /// when it does not resolve to a known department.
    pub parent_id: Option<i32>,

    /// Departments nested under this one, in the order the server listed them.
    pub children: Vec<DepartmentNode>,
}

/// Materializes the node for `department`, recursively attaching the children recorded in
/// `children_of`.
fn materialize(
    department: &Department,
    children_of: &HashMap<i32, Vec<&Department>>,
) -> DepartmentNode {
    let children = match children_of.get(&department.id) {
        Some(children) => children.iter().map(|child| materialize(child, children_of)).collect(),
        None => vec![],
    };
    DepartmentNode {
        id: department.id,
        name: department.name.clone(),
        parent_id: department.parent_id,
        children,
    }
}

/// Derives the department forest from the flat `departments` list.
///
/// Every department whose `parent_id` resolves to a department in the input appears in
/// exactly one `children` vector.  Departments whose `parent_id` does not resolve become
/// roots; the server data is likely inconsistent when this happens so the fallback is
/// logged.  Input order is preserved among siblings and among roots.
pub fn department_tree(departments: &[Department]) -> Vec<DepartmentNode> {
    let known: HashSet<i32> = departments.iter().map(|department| department.id).collect();

    let mut children_of: HashMap<i32, Vec<&Department>> = HashMap::default();
    let mut roots: Vec<&Department> = vec![];
    for department in departments {
        match department.parent_id {
            Some(parent_id) if parent_id != department.id && known.contains(&parent_id) => {
                children_of.entry(parent_id).or_default().push(department);
            }
            Some(parent_id) => {
                warn!(
                    "Department {} references unknown parent {}; treating it as a root",
                    department.id, parent_id
                );
                roots.push(department);
            }
            None => roots.push(department),
        }
    }

    roots.into_iter().map(|department| materialize(department, &children_of)).collect()
}
