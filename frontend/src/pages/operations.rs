use crate::{
    api::{ApiClient, PickupResponse},
    components::layout::{AuthenticatedLayout, LoadingSpinner},
};
use leptos::*;

/// Badge styling for the pickup lifecycle states the backend reports.
fn status_class(status: &str) -> &'static str {
    match status {
        "pending" => "bg-status-warning-bg text-status-warning-text",
        "scheduled" => "bg-status-info-bg text-status-info-text",
        "completed" => "bg-status-success-bg text-status-success-text",
        "cancelled" => "bg-status-danger-bg text-status-danger-text",
        _ => "bg-surface text-fg-muted",
    }
}

#[component]
pub fn OperationsPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let pickups = create_local_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { api.list_pickups().await }
        },
    );

    view! {
        <AuthenticatedLayout>
            <h2 class="text-2xl font-bold text-fg">"Pickup queue"</h2>
            <p class="mt-1 text-sm text-fg-muted">
                "New requests arrive live through the notification feed."
            </p>
            <div class="mt-6">
                {move || match pickups.get() {
                    None => view! { <LoadingSpinner/> }.into_view(),
                    Some(Ok(items)) => view! { <PickupTable items=items/> }.into_view(),
                    Some(Err(error)) => {
                        view! {
                            <p class="text-sm text-status-danger-text">{error.message}</p>
                        }
                        .into_view()
                    }
                }}
            </div>
        </AuthenticatedLayout>
    }
}

#[component]
fn PickupTable(items: Vec<PickupResponse>) -> impl IntoView {
    if items.is_empty() {
        return view! {
            <p class="py-12 text-sm text-center text-fg-muted">"No pickups in the queue"</p>
        }
        .into_view();
    }

    view! {
        <div class="bg-surface-elevated shadow rounded-lg overflow-hidden">
            <table class="min-w-full divide-y divide-border">
                <thead>
                    <tr>
                        <th class="px-6 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">
                            "Reference"
                        </th>
                        <th class="px-6 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">
                            "Requester"
                        </th>
                        <th class="px-6 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">
                            "Address"
                        </th>
                        <th class="px-6 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">
                            "Status"
                        </th>
                        <th class="px-6 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">
                            "Scheduled"
                        </th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-border">
                    {items
                        .into_iter()
                        .map(|pickup| {
                            let scheduled = pickup
                                .scheduled_at
                                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                                .unwrap_or_else(|| "—".to_string());
                            view! {
                                <tr>
                                    <td class="px-6 py-4 whitespace-nowrap text-sm font-medium text-fg">
                                        {pickup.reference}
                                    </td>
                                    <td class="px-6 py-4 whitespace-nowrap text-sm text-fg-muted">
                                        {pickup.requester}
                                    </td>
                                    <td class="px-6 py-4 text-sm text-fg-muted">{pickup.address}</td>
                                    <td class="px-6 py-4 whitespace-nowrap">
                                        <span class=format!(
                                            "inline-flex px-2 py-0.5 rounded-full text-xs font-medium {}",
                                            status_class(&pickup.status),
                                        )>{pickup.status}</span>
                                    </td>
                                    <td class="px-6 py-4 whitespace-nowrap text-sm text-fg-muted">
                                        {scheduled}
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
    .into_view()
}

#[cfg(test)]
mod tests {
    use super::status_class;

    #[test]
    fn known_statuses_get_distinct_badges() {
        assert_ne!(status_class("pending"), status_class("completed"));
        assert_ne!(status_class("scheduled"), status_class("cancelled"));
    }

    #[test]
    fn unknown_statuses_fall_back_to_neutral() {
        assert_eq!(status_class("weird"), status_class("other"));
    }
}
