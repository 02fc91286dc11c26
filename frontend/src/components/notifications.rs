use crate::state::notifications::use_notifications;
use leptos::*;

/// Owns the push connection for the whole session: opened when the auth
/// state turns authenticated, closed on sign-out and on unmount. Mounted
/// once, above the router, so navigation never reopens the socket.
#[component]
pub fn NotificationChannelHost() -> impl IntoView {
    #[cfg(target_arch = "wasm32")]
    {
        use crate::api::channel::{spawn_notification_channel, ChannelHandle};
        use crate::state::auth::use_auth;
        use std::cell::RefCell;
        use std::rc::Rc;

        let (auth, _) = use_auth();
        let (_notifications, set_notifications) = use_notifications();
        let handle: Rc<RefCell<Option<ChannelHandle>>> = Rc::new(RefCell::new(None));

        let handle_for_effect = handle.clone();
        create_effect(move |_| {
            let authenticated = auth.get().is_authenticated;
            let mut slot = handle_for_effect.borrow_mut();
            if authenticated && slot.is_none() {
                *slot = Some(spawn_notification_channel(set_notifications));
            } else if !authenticated {
                // dropping the handle closes the socket promptly
                slot.take();
            }
        });
        on_cleanup(move || {
            handle.borrow_mut().take();
        });
    }

    view! { <></> }
}

#[component]
pub fn NotificationBell() -> impl IntoView {
    let (notifications, set_notifications) = use_notifications();
    let (open, set_open) = create_signal(false);
    let unread = create_memo(move |_| notifications.get().unread_count());
    let disconnected = create_memo(move |_| {
        use crate::api::channel::ChannelStatus;
        notifications.get().status == ChannelStatus::Disconnected
            && !notifications.get().items.is_empty()
    });

    let toggle = move |_| set_open.update(|open| *open = !*open);
    let clear_all = move |_| {
        set_notifications.update(|state| state.clear());
        set_open.set(false);
    };

    view! {
        <div class="relative">
            <button
                type="button"
                class="relative p-2 rounded-md text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                on:click=toggle
                aria-expanded=move || open.get()
            >
                <span class="sr-only">"Pickup notifications"</span>
                <svg
                    class="h-6 w-6"
                    xmlns="http://www.w3.org/2000/svg"
                    fill="none"
                    viewBox="0 0 24 24"
                    stroke="currentColor"
                >
                    <path
                        stroke-linecap="round"
                        stroke-linejoin="round"
                        stroke-width="2"
                        d="M15 17h5l-1.4-1.4a2 2 0 01-.6-1.4V11a6 6 0 10-12 0v3.2a2 2 0 01-.6 1.4L4 17h5m6 0v1a3 3 0 11-6 0v-1m6 0H9"
                    />
                </svg>
                <Show when=move || (unread.get() > 0)>
                    <span class="absolute top-1 right-1 inline-flex items-center justify-center px-1.5 py-0.5 text-xs font-bold rounded-full text-action-primary-text bg-action-danger-bg">
                        {move || unread.get()}
                    </span>
                </Show>
            </button>
            <Show when=move || open.get()>
                <div class="absolute right-0 mt-2 w-80 rounded-md shadow-lg bg-surface-elevated border border-border z-20">
                    <div class="flex justify-between items-center px-4 py-2 border-b border-border">
                        <span class="text-sm font-medium text-fg">"Pickup requests"</span>
                        <button
                            type="button"
                            class="text-xs text-fg-muted hover:text-fg"
                            on:click=clear_all
                        >
                            "Clear all"
                        </button>
                    </div>
                    <Show when=move || disconnected.get()>
                        <p class="px-4 py-1 text-xs text-fg-muted">"Reconnecting..."</p>
                    </Show>
                    <ul class="max-h-96 overflow-y-auto divide-y divide-border">
                        <Show
                            when=move || !notifications.get().items.is_empty()
                            fallback=|| {
                                view! {
                                    <li class="px-4 py-6 text-sm text-center text-fg-muted">
                                        "No new pickup requests"
                                    </li>
                                }
                            }
                        >
                            {move || {
                                notifications
                                    .get()
                                    .items
                                    .into_iter()
                                    .map(|notification| {
                                        view! {
                                            <li class="px-4 py-3">
                                                <p class="text-sm font-medium text-fg">
                                                    {notification.title}
                                                </p>
                                                <p class="text-sm text-fg-muted">
                                                    {notification.message}
                                                </p>
                                                <p class="mt-1 text-xs text-fg-muted">
                                                    {notification
                                                        .created_at
                                                        .format("%Y-%m-%d %H:%M")
                                                        .to_string()}
                                                </p>
                                            </li>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </Show>
                    </ul>
                </div>
            </Show>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::NotificationBell;
    use crate::state::notifications::NotificationState;
    use crate::test_support::helpers::pickup_notification;
    use crate::test_support::ssr::render_to_string;
    use leptos::*;

    #[test]
    fn bell_renders_without_a_badge_when_empty() {
        let html = render_to_string(|| {
            let ctx = create_signal(NotificationState::default());
            provide_context(ctx);
            view! { <NotificationBell/> }
        });
        assert!(html.contains("Pickup notifications"));
        assert!(!html.contains("font-bold"));
    }

    #[test]
    fn unread_items_surface_the_badge() {
        let html = render_to_string(|| {
            let (state, set_state) = create_signal(NotificationState::default());
            set_state.update(|s| {
                s.push(pickup_notification("n1"));
                s.push(pickup_notification("n2"));
            });
            provide_context((state, set_state));
            view! { <NotificationBell/> }
        });
        assert!(html.contains("font-bold"));
    }
}
