use crate::{components::layout::AuthenticatedLayout, state::auth::use_auth};
use leptos::*;

/// Super-admin landing: platform-wide administration entry points. The
/// per-entity management screens hang off these cards.
#[component]
pub fn AdminPage() -> impl IntoView {
    let (auth, _) = use_auth();
    let operator = create_memo(move |_| {
        auth.get()
            .user
            .as_ref()
            .map(|user| user.email.clone())
            .unwrap_or_default()
    });

    view! {
        <AuthenticatedLayout>
            <h2 class="text-2xl font-bold text-fg">"Platform administration"</h2>
            <p class="mt-1 text-sm text-fg-muted">
                {move || format!("Operating as {}", operator.get())}
            </p>
            <div class="mt-6 grid grid-cols-1 gap-5 sm:grid-cols-2 lg:grid-cols-3">
                <AdminCard
                    title="Tenants"
                    description="Provision logistics tenants and their branding."
                />
                <AdminCard
                    title="Warehouses"
                    description="Capacity and coverage across every tenant."
                />
                <AdminCard
                    title="Users"
                    description="Role assignments and tenant membership."
                />
            </div>
        </AuthenticatedLayout>
    }
}

#[component]
fn AdminCard(title: &'static str, description: &'static str) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated overflow-hidden shadow rounded-lg p-5">
            <h3 class="text-lg font-medium text-fg">{title}</h3>
            <p class="mt-1 text-sm text-fg-muted">{description}</p>
        </div>
    }
}
