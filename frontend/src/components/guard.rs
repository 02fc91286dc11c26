use crate::{
    api::UserProfile,
    components::layout::LoadingSpinner,
    router::landing_route,
    state::auth::use_auth,
    utils::{browser, storage},
};
use leptos::*;

/// Mount-time admission state. The check is deliberately cheap: token
/// presence only, no decode. Bootstrap revalidation and the global 401
/// handling evict an expired session from the other side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Checking,
    Admitted,
    Denied,
}

pub fn decide(token_present: bool) -> GuardDecision {
    if token_present {
        GuardDecision::Admitted
    } else {
        GuardDecision::Denied
    }
}

fn should_render_children(is_authenticated: bool, is_loading: bool) -> bool {
    is_authenticated && !is_loading
}

fn role_allowed(user: Option<&UserProfile>, allowed: &[&str]) -> bool {
    user.map(|user| allowed.contains(&user.role.as_str()))
        .unwrap_or(false)
}

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let decision = decide(storage::stored_token().is_some());
    if decision == GuardDecision::Denied {
        browser::redirect_replace(browser::LOGIN_PATH);
    }

    let (auth, _) = use_auth();
    let is_authenticated = create_memo(move |_| auth.get().is_authenticated);
    let is_loading = create_memo(move |_| auth.get().loading);
    create_effect(move |_| {
        let state = auth.get();
        if !state.initialized || state.loading || state.is_authenticated {
            return;
        }
        browser::redirect_replace(browser::LOGIN_PATH);
    });

    view! {
        <Show
            when=move || {
                decision == GuardDecision::Admitted
                    && should_render_children(is_authenticated.get(), is_loading.get())
            }
            fallback=move || {
                if decision == GuardDecision::Admitted && is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

#[component]
pub fn RequireRole(allowed: &'static [&'static str], children: ChildrenFn) -> impl IntoView {
    let decision = decide(storage::stored_token().is_some());
    if decision == GuardDecision::Denied {
        browser::redirect_replace(browser::LOGIN_PATH);
    }

    let (auth, _) = use_auth();
    let is_authenticated = create_memo(move |_| auth.get().is_authenticated);
    let is_loading = create_memo(move |_| auth.get().loading);
    let has_role = create_memo(move |_| role_allowed(auth.get().user.as_ref(), allowed));
    create_effect(move |_| {
        let state = auth.get();
        if !state.initialized || state.loading {
            return;
        }
        if !state.is_authenticated {
            browser::redirect_replace(browser::LOGIN_PATH);
        } else if !role_allowed(state.user.as_ref(), allowed) {
            // signed in, wrong area: send them to their own landing page
            if let Some(user) = state.user.as_ref() {
                browser::redirect(landing_route(&user.role));
            }
        }
    });

    view! {
        <Show
            when=move || {
                decision == GuardDecision::Admitted
                    && should_render_children(is_authenticated.get(), is_loading.get())
                    && has_role.get()
            }
            fallback=move || {
                if decision == GuardDecision::Admitted && is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::{decide, role_allowed, should_render_children, GuardDecision};
    use crate::test_support::helpers::{customer_user, operations_user, super_admin_user};

    #[test]
    fn presence_alone_decides_admission() {
        assert_eq!(decide(true), GuardDecision::Admitted);
        assert_eq!(decide(false), GuardDecision::Denied);
    }

    #[test]
    fn guard_blocks_until_authenticated() {
        assert!(!should_render_children(false, true));
        assert!(!should_render_children(false, false));
        assert!(!should_render_children(true, true));
        assert!(should_render_children(true, false));
    }

    #[test]
    fn role_check_matches_the_allow_list() {
        let allowed = ["operations", "tenant_admin"];
        assert!(!role_allowed(None, &allowed));
        assert!(role_allowed(Some(&operations_user()), &allowed));
        assert!(!role_allowed(Some(&customer_user()), &allowed));
        assert!(!role_allowed(Some(&super_admin_user()), &allowed));
    }
}
