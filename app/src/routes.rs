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

//! Static declaration of the navigation routes of the client.
//!
//! The table is a forest: one unauthenticated entry route, one authenticated parent that
//! frames all administration pages, and a catch-all for unknown paths.  The
//! `requires_auth` flag is declarative only; an outer navigation layer is responsible
//! for redirecting unauthenticated visitors before a guarded route resolves.

use derive_getters::Getters;

/// Identifier of a page of the client.
///
/// Pages are declared here but rendered elsewhere, so this carries no behavior.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Page {
    /// Combined login and registration page.
    Auth,

    /// Shell that frames all administration pages.
    Layout,

    /// Enterprise administration page.
    Enterprises,

    /// Member administration page.
    Members,

    /// Coupon administration page.
    Coupons,

    /// Department administration page.
    Departments,

    /// Subscription administration page.
    Subscriptions,

    /// Feedback inbox and archive page.
    Feedbacks,

    /// Fallback page for paths that match nothing else.
    NotFound,
}

/// One node of the route forest.
#[derive(Clone, Debug, Getters)]
pub struct Route {
    /// Path of the route, relative to its parent.
    path: &'static str,

    /// Name with which navigation refers to this route, if it has one.
    name: Option<&'static str>,

    /// Page this route resolves to.
    page: Page,

    /// Whether an outer navigation guard must keep unauthenticated visitors out.
    requires_auth: bool,

    /// Routes nested under this one.
    children: Vec<Route>,
}

/// Builds a leaf route for one of the administration pages.
fn admin_page(path: &'static str, name: &'static str, page: Page) -> Route {
    Route { path, name: Some(name), page, requires_auth: false, children: vec![] }
}

/// Returns the route forest of the client.
pub fn routes() -> Vec<Route> {
    vec![
        Route {
            path: "/",
            name: Some("auth"),
            page: Page::Auth,
            requires_auth: false,
            children: vec![],
        },
        Route {
            path: "/",
            name: None,
            page: Page::Layout,
            requires_auth: true,
            children: vec![
                admin_page("organizacoes", "admin-enterprise", Page::Enterprises),
                admin_page("usuarios", "admin-users", Page::Members),
                admin_page("cupons", "admin-coupon", Page::Coupons),
                admin_page("departamentos", "admin-departments", Page::Departments),
                admin_page("assinaturas", "admin-subscription", Page::Subscriptions),
                admin_page("feedbacks", "admin-feedbacks", Page::Feedbacks),
            ],
        },
        Route {
            path: "/:catchAll(.*)*",
            name: None,
            page: Page::NotFound,
            requires_auth: false,
            children: vec![],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_route_is_the_unauthenticated_auth_page() {
        let routes: &'static Vec<Route> = Box::leak(Box::new(routes()));
        let entry = &routes[0];
        assert_eq!("/", entry.path());
        assert_eq!(Some("auth"), *entry.name());
        assert_eq!(Page::Auth, *entry.page());
        assert!(!entry.requires_auth());
        assert!(entry.children().is_empty());
    }

    #[test]
    fn test_admin_pages_hang_from_the_authenticated_parent() {
        let routes: &'static Vec<Route> = Box::leak(Box::new(routes()));
        let parent = &routes[1];
        assert_eq!("/", parent.path());
        assert_eq!(None, *parent.name());
        assert_eq!(Page::Layout, *parent.page());
        assert!(*parent.requires_auth());

        let children: Vec<(&str, Option<&str>, Page)> = parent
            .children()
            .iter()
            .map(|route| (route.path(), *route.name(), *route.page()))
            .collect();
        assert_eq!(
            vec![
                ("organizacoes", Some("admin-enterprise"), Page::Enterprises),
                ("usuarios", Some("admin-users"), Page::Members),
                ("cupons", Some("admin-coupon"), Page::Coupons),
                ("departamentos", Some("admin-departments"), Page::Departments),
                ("assinaturas", Some("admin-subscription"), Page::Subscriptions),
                ("feedbacks", Some("admin-feedbacks"), Page::Feedbacks),
            ],
            children
        );
    }

    #[test]
    fn test_only_the_parent_carries_the_guard() {
        for child in routes()[1].children() {
            assert!(!child.requires_auth());
        }
    }

    #[test]
    fn test_catch_all_comes_last() {
        let routes = routes();
        let last = routes.last().unwrap();
        assert_eq!(Page::NotFound, *last.page());
        assert_eq!(None, *last.name());
        assert!(!last.requires_auth());
        assert!(last.children().is_empty());
    }
}
