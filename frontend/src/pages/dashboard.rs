use crate::{components::layout::AuthenticatedLayout, state::auth::use_auth};
use leptos::*;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let (auth, _) = use_auth();
    let full_name = create_memo(move |_| {
        auth.get()
            .user
            .as_ref()
            .map(|user| user.full_name.clone())
            .unwrap_or_default()
    });
    let tenant = create_memo(move |_| {
        auth.get()
            .user
            .as_ref()
            .and_then(|user| user.tenant_slug.clone())
            .unwrap_or_else(|| "—".to_string())
    });
    let role = create_memo(move |_| {
        auth.get()
            .user
            .as_ref()
            .map(|user| user.role.clone())
            .unwrap_or_default()
    });

    view! {
        <AuthenticatedLayout>
            <h2 class="text-2xl font-bold text-fg">"Dashboard"</h2>
            <p class="mt-1 text-sm text-fg-muted">
                {move || format!("Signed in as {}", full_name.get())}
            </p>
            <div class="mt-6 grid grid-cols-1 gap-5 sm:grid-cols-2 lg:grid-cols-3">
                <div class="bg-surface-elevated overflow-hidden shadow rounded-lg p-5">
                    <dt class="text-sm font-medium text-fg-muted truncate">"Tenant"</dt>
                    <dd class="mt-1 text-2xl font-semibold text-fg">{move || tenant.get()}</dd>
                </div>
                <div class="bg-surface-elevated overflow-hidden shadow rounded-lg p-5">
                    <dt class="text-sm font-medium text-fg-muted truncate">"Role"</dt>
                    <dd class="mt-1 text-2xl font-semibold text-fg">{move || role.get()}</dd>
                </div>
                <div class="bg-surface-elevated overflow-hidden shadow rounded-lg p-5">
                    <dt class="text-sm font-medium text-fg-muted truncate">"Pickups"</dt>
                    <dd class="mt-1 text-sm text-fg-muted">
                        <a href="/operations" class="text-action-primary-bg hover:underline">
                            "Open the pickup queue"
                        </a>
                    </dd>
                </div>
            </div>
        </AuthenticatedLayout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::DashboardPage;
    use crate::test_support::helpers::{provide_auth, tenant_admin_user};
    use crate::test_support::ssr::render_to_string;
    use leptos::*;

    #[test]
    fn dashboard_shows_the_signed_in_profile() {
        let html = render_to_string(move || {
            provide_auth(Some(tenant_admin_user()));
            view! { <DashboardPage/> }
        });
        assert!(html.contains("Tara Admin"));
        assert!(html.contains("acme"));
    }
}
