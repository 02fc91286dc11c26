use leptos::{ev::SubmitEvent, *};

#[component]
pub fn LoginForm(
    email: ReadSignal<String>,
    password: ReadSignal<String>,
    error: ReadSignal<Option<String>>,
    #[prop(into)] pending: Signal<bool>,
    on_email_input: Callback<String>,
    on_password_input: Callback<String>,
    on_submit: Callback<SubmitEvent>,
) -> impl IntoView {
    view! {
        <form class="space-y-6" on:submit=move |ev| on_submit.call(ev)>
            <Show when=move || error.get().is_some()>
                <div class="rounded-md bg-status-danger-bg border border-status-danger-border p-4">
                    <p class="text-sm text-status-danger-text">
                        {move || error.get().unwrap_or_default()}
                    </p>
                </div>
            </Show>
            <div>
                <label for="email" class="block text-sm font-medium text-fg">
                    "Email address"
                </label>
                <div class="mt-1">
                    <input
                        id="email"
                        name="email"
                        type="email"
                        autocomplete="email"
                        class="appearance-none block w-full px-3 py-2 border border-border rounded-md shadow-sm placeholder-fg-muted focus:outline-none focus:ring-action-primary-bg focus:border-action-primary-bg"
                        prop:value=email
                        on:input=move |ev| on_email_input.call(event_target_value(&ev))
                    />
                </div>
            </div>
            <div>
                <label for="password" class="block text-sm font-medium text-fg">
                    "Password"
                </label>
                <div class="mt-1">
                    <input
                        id="password"
                        name="password"
                        type="password"
                        autocomplete="current-password"
                        class="appearance-none block w-full px-3 py-2 border border-border rounded-md shadow-sm placeholder-fg-muted focus:outline-none focus:ring-action-primary-bg focus:border-action-primary-bg"
                        prop:value=password
                        on:input=move |ev| on_password_input.call(event_target_value(&ev))
                    />
                </div>
            </div>
            <div>
                <button
                    type="submit"
                    class="w-full flex justify-center py-2 px-4 border border-transparent rounded-md shadow-sm text-sm font-medium text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg_hover disabled:opacity-50"
                    disabled=move || pending.get()
                >
                    {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </div>
        </form>
    }
}
