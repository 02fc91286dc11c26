use crate::{components::layout::AuthenticatedLayout, state::auth::use_auth};
use leptos::*;

/// Customer-facing landing. Order history and pickup booking live here.
#[component]
pub fn PortalPage() -> impl IntoView {
    let (auth, _) = use_auth();
    let full_name = create_memo(move |_| {
        auth.get()
            .user
            .as_ref()
            .map(|user| user.full_name.clone())
            .unwrap_or_default()
    });

    view! {
        <AuthenticatedLayout>
            <h2 class="text-2xl font-bold text-fg">
                {move || format!("Welcome back, {}", full_name.get())}
            </h2>
            <div class="mt-6 bg-surface-elevated shadow rounded-lg p-5">
                <h3 class="text-lg font-medium text-fg">"My orders"</h3>
                <p class="mt-1 text-sm text-fg-muted">
                    "Track shipments and request pickups for your account."
                </p>
            </div>
        </AuthenticatedLayout>
    }
}
