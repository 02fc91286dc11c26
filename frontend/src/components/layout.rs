use crate::{
    components::notifications::NotificationBell,
    state::auth::{self, use_auth},
    utils::browser,
};
use leptos::*;

/// Navigation entries a given role is allowed to see.
pub fn nav_links(role: Option<&str>) -> Vec<(&'static str, &'static str)> {
    match role {
        Some("super_admin") => vec![
            ("/admin", "Tenants"),
            ("/dashboard", "Dashboard"),
            ("/operations", "Pickups"),
        ],
        Some("tenant_admin") => vec![("/dashboard", "Dashboard"), ("/operations", "Pickups")],
        Some("operations") => vec![("/operations", "Pickups")],
        Some("customer") => vec![("/portal", "My Orders")],
        _ => vec![],
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let links = create_memo(move |_| {
        nav_links(auth.get().user.as_ref().map(|user| user.role.as_str()))
    });

    let logout_action = auth::use_logout_action();
    let logout_pending = logout_action.pending();
    create_effect(move |_| {
        if logout_action.value().get().is_some() {
            browser::redirect(browser::LOGIN_PATH);
        }
    });
    let on_logout = move |_| {
        if logout_pending.get_untracked() {
            return;
        }
        logout_action.dispatch(());
    };

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center">
                        <h1 class="text-xl font-semibold text-fg">"Freightdesk"</h1>
                    </div>
                    <div class="flex items-center space-x-4">
                        <nav class="hidden lg:flex space-x-4">
                            {move || {
                                links
                                    .get()
                                    .into_iter()
                                    .map(|(href, label)| {
                                        view! {
                                            <a
                                                href=href
                                                class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                                            >
                                                {label}
                                            </a>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </nav>
                        <NotificationBell/>
                        <button
                            on:click=on_logout
                            class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium disabled:opacity-50 hover:bg-action-ghost-bg-hover"
                            disabled=move || logout_pending.get()
                        >
                            "Sign out"
                        </button>
                    </div>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center py-12">
            <div class="animate-spin rounded-full h-10 w-10 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

/// Shell around every protected page: header plus the page body.
#[component]
pub fn AuthenticatedLayout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 px-4 sm:px-6 lg:px-8">{children()}</main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::nav_links;

    #[test]
    fn nav_links_are_role_scoped() {
        assert!(nav_links(None).is_empty());
        let admin = nav_links(Some("super_admin"));
        assert!(admin.iter().any(|(href, _)| *href == "/admin"));
        let ops = nav_links(Some("operations"));
        assert_eq!(ops, vec![("/operations", "Pickups")]);
        let customer = nav_links(Some("customer"));
        assert!(customer.iter().all(|(href, _)| *href == "/portal"));
    }

    #[test]
    fn only_super_admin_sees_the_tenant_area() {
        for role in ["tenant_admin", "operations", "customer"] {
            assert!(
                nav_links(Some(role)).iter().all(|(href, _)| *href != "/admin"),
                "{role} must not see /admin"
            );
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::Header;
    use crate::test_support::helpers::{customer_user, provide_auth, super_admin_user};
    use crate::test_support::ssr::render_to_string;
    use leptos::*;

    #[test]
    fn header_shows_tenant_link_for_super_admin() {
        let html = render_to_string(move || {
            provide_auth(Some(super_admin_user()));
            view! { <Header/> }
        });
        assert!(html.contains("/admin"));
        assert!(html.contains("Sign out"));
    }

    #[test]
    fn header_hides_tenant_link_for_customers() {
        let html = render_to_string(move || {
            provide_auth(Some(customer_user()));
            view! { <Header/> }
        });
        assert!(!html.contains("href=\"/admin\""));
        assert!(html.contains("/portal"));
    }
}
