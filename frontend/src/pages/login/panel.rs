use crate::{
    api::LoginRequest,
    pages::login::{components::form::LoginForm, utils},
    router::landing_route,
    state::auth,
    utils::browser,
};
use leptos::{ev::SubmitEvent, Callback, *};

#[component]
pub fn LoginPanel() -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let login_action = auth::use_login_action();
    let pending = login_action.pending();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(user) => {
                    set_error.set(None);
                    browser::redirect(landing_route(&user.role));
                }
                Err(err) => set_error.set(Some(err.message)),
            }
        }
    });

    let handle_submit = Callback::new(move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();

        if let Err(msg) = utils::validate_credentials(&email_value, &password_value) {
            set_error.set(Some(msg));
            return;
        }
        set_error.set(None);

        login_action.dispatch(LoginRequest {
            email: email_value.trim().to_string(),
            password: password_value,
        });
    });

    let email_input = Callback::new(move |value: String| set_email.set(value));
    let password_input = Callback::new(move |value: String| set_password.set(value));

    view! {
        <LoginForm
            email=email
            password=password
            error=error
            pending=pending
            on_email_input=email_input
            on_password_input=password_input
            on_submit=handle_submit
        />
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::LoginPanel;
    use crate::test_support::helpers::provide_auth;
    use crate::test_support::ssr::render_to_string;
    use leptos::*;

    #[test]
    fn login_panel_renders_both_fields() {
        let html = render_to_string(move || {
            provide_auth(None);
            view! { <LoginPanel/> }
        });
        assert!(html.contains("Email address"));
        assert!(html.contains("Password"));
        assert!(html.contains("Sign in"));
    }
}
