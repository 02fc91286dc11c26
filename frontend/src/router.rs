use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::{
        guard::{RequireAuth, RequireRole},
        notifications::NotificationChannelHost,
    },
    pages::{
        admin::AdminPage, dashboard::DashboardPage, home::HomePage, login::LoginPage,
        operations::OperationsPage, portal::PortalPage,
    },
    state::{auth::AuthProvider, notifications::NotificationProvider},
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/login",
    "/dashboard",
    "/operations",
    "/admin",
    "/portal",
];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &["/dashboard", "/operations", "/admin", "/portal"];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/", "/login"];

/// Where each role lands after sign-in.
pub fn landing_route(role: &str) -> &'static str {
    match role {
        "super_admin" => "/admin",
        "operations" => "/operations",
        "customer" => "/portal",
        _ => "/dashboard",
    }
}

#[cfg(target_arch = "wasm32")]
pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    provide_context(ApiClient::new());
    view! {
        <Title text="Freightdesk"/>
        <AuthProvider>
            <NotificationProvider>
                <NotificationChannelHost/>
                <Router>
                    <Routes>
                        <Route path="/" view=HomePage/>
                        <Route path="/login" view=LoginPage/>
                        <Route path="/dashboard" view=ProtectedDashboard/>
                        <Route path="/operations" view=ProtectedOperations/>
                        <Route path="/admin" view=ProtectedAdmin/>
                        <Route path="/portal" view=ProtectedPortal/>
                    </Routes>
                </Router>
            </NotificationProvider>
        </AuthProvider>
    }
}

#[component]
fn ProtectedDashboard() -> impl IntoView {
    view! { <RequireAuth><DashboardPage/></RequireAuth> }
}

#[component]
fn ProtectedOperations() -> impl IntoView {
    view! {
        <RequireRole allowed={&["operations", "tenant_admin", "super_admin"]}>
            <OperationsPage/>
        </RequireRole>
    }
}

#[component]
fn ProtectedAdmin() -> impl IntoView {
    view! { <RequireRole allowed={&["super_admin"]}><AdminPage/></RequireRole> }
}

#[component]
fn ProtectedPortal() -> impl IntoView {
    view! { <RequireRole allowed={&["customer"]}><PortalPage/></RequireRole> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn protected_routes_are_subset_of_all() {
        let all: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        for path in PROTECTED_ROUTE_PATHS {
            assert!(
                all.contains(path),
                "protected path missing from ROUTE_PATHS: {}",
                path
            );
        }
    }

    #[test]
    fn public_and_protected_do_not_overlap() {
        let protected: HashSet<&str> = PROTECTED_ROUTE_PATHS.iter().copied().collect();
        for path in PUBLIC_ROUTE_PATHS {
            assert!(!protected.contains(path));
        }
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }

    #[test]
    fn every_role_lands_on_a_protected_route() {
        for role in ["super_admin", "tenant_admin", "operations", "customer"] {
            let landing = landing_route(role);
            assert!(
                PROTECTED_ROUTE_PATHS.contains(&landing),
                "{role} lands on unprotected {landing}"
            );
        }
    }

    #[test]
    fn unknown_roles_fall_back_to_the_dashboard() {
        assert_eq!(landing_route("dispatcher"), "/dashboard");
        assert_eq!(landing_route(""), "/dashboard");
    }

    #[test]
    fn role_landings_are_role_specific() {
        assert_eq!(landing_route("super_admin"), "/admin");
        assert_eq!(landing_route("operations"), "/operations");
        assert_eq!(landing_route("customer"), "/portal");
        assert_eq!(landing_route("tenant_admin"), "/dashboard");
    }
}
