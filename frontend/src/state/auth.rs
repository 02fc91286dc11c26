use leptos::*;
use uuid::Uuid;

use crate::{
    api::{ApiClient, ApiError, LoginRequest, UserProfile},
    utils::{storage, token},
};

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

/// Rotate the token in the background once it gets this close to expiry.
const REFRESH_WINDOW_MS: i64 = 5 * 60 * 1_000;

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub initialized: bool,
}

impl AuthState {
    pub fn login_success(&mut self, user: UserProfile) {
        self.user = Some(user);
        self.is_authenticated = true;
        self.loading = false;
        self.initialized = true;
    }

    /// Idempotent re-assertion of the signed-in profile, e.g. when the
    /// session check adopts the backend's copy as ground truth.
    pub fn set_user(&mut self, user: UserProfile) {
        self.user = Some(user);
        self.is_authenticated = true;
        self.loading = false;
        self.initialized = true;
    }

    pub fn clear(&mut self) {
        self.user = None;
        self.is_authenticated = false;
        self.loading = false;
        self.initialized = true;
    }

    pub fn mark_initialized(&mut self) {
        self.loading = false;
        self.initialized = true;
    }
}

mod epoch {
    use std::cell::Cell;
    use uuid::Uuid;

    thread_local! {
        static EPOCH: Cell<Uuid> = Cell::new(Uuid::new_v4());
    }

    pub fn current() -> Uuid {
        EPOCH.with(|epoch| epoch.get())
    }

    pub fn bump() -> Uuid {
        let next = Uuid::new_v4();
        EPOCH.with(|epoch| epoch.set(next));
        next
    }
}

/// Identity of the current sign-in. Async continuations that write auth
/// state capture this before suspending and drop their result when it no
/// longer matches, so a stale response can never repopulate a session that
/// was cleared underneath it.
pub fn session_epoch() -> Uuid {
    epoch::current()
}

fn bump_session_epoch() {
    let _ = epoch::bump();
}

#[derive(Debug)]
pub enum BootstrapDecision {
    NoCredentials,
    Expired,
    Revalidate(storage::Credential),
}

/// Phase B entry: classify whatever the canonical store holds. Assumes the
/// stabilizer has already run.
pub fn bootstrap_decision() -> BootstrapDecision {
    match storage::load_credentials() {
        None => BootstrapDecision::NoCredentials,
        Some(credential) if token::is_expired(&credential.token) => BootstrapDecision::Expired,
        Some(credential) => BootstrapDecision::Revalidate(credential),
    }
}

/// Resolve the startup session question: absent and expired credentials end
/// unauthenticated; an unexpired pair seeds the state optimistically and is
/// then revalidated against the backend, failing closed on any error.
pub async fn run_bootstrap(api: &ApiClient, set_auth: WriteSignal<AuthState>) {
    match bootstrap_decision() {
        BootstrapDecision::NoCredentials => {
            set_auth.update(|state| state.mark_initialized());
        }
        BootstrapDecision::Expired => {
            storage::clear_credentials();
            set_auth.update(|state| state.mark_initialized());
        }
        BootstrapDecision::Revalidate(credential) => {
            let started_under = session_epoch();
            set_auth.update(|state| {
                state.user = Some(credential.user.clone());
                state.loading = true;
            });

            match api.get_me().await {
                Ok(user) => {
                    if session_epoch() != started_under {
                        return;
                    }
                    let _ = storage::save_credentials(&credential.token, &user);
                    set_auth.update(|state| state.set_user(user));
                    maybe_refresh(api, &credential.token, set_auth, started_under).await;
                }
                Err(error) => {
                    if session_epoch() != started_under {
                        return;
                    }
                    log::warn!("session check failed, signing out: {error}");
                    storage::clear_credentials();
                    set_auth.update(|state| state.clear());
                }
            }
        }
    }
}

/// Rotate a token that is close to expiry. The session was revalidated a
/// moment ago, so a failed rotation is logged and otherwise ignored.
async fn maybe_refresh(
    api: &ApiClient,
    current_token: &str,
    set_auth: WriteSignal<AuthState>,
    started_under: Uuid,
) {
    let close_to_expiry = token::remaining_ms(current_token)
        .map(|remaining| remaining < REFRESH_WINDOW_MS)
        .unwrap_or(false);
    if !close_to_expiry {
        return;
    }
    match api.refresh_token().await {
        Ok(data) => {
            if session_epoch() != started_under {
                return;
            }
            set_auth.update(|state| state.set_user(data.user));
        }
        Err(error) => log::warn!("token refresh failed: {error}"),
    }
}

fn create_auth_context() -> AuthContext {
    // Phase A: storage must be in its canonical shape before anything else
    // reads it. This provider mounts above every route and the
    // reconciliation is synchronous, so no guard can observe the legacy
    // layout.
    storage::reconcile_legacy_auth();

    let (auth_state, set_auth_state) = create_signal(AuthState::default());
    set_auth_state.update(|state| state.loading = true);

    let api_client = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    spawn_local(async move {
        run_bootstrap(&api_client, set_auth_state).await;
    });

    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_auth_context();
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

pub async fn login_request(
    request: LoginRequest,
    api: &ApiClient,
    set_auth: WriteSignal<AuthState>,
) -> Result<UserProfile, ApiError> {
    set_auth.update(|state| state.loading = true);

    match api.login(request).await {
        Ok(data) => {
            bump_session_epoch();
            set_auth.update(|state| state.login_success(data.user.clone()));
            Ok(data.user)
        }
        Err(error) => {
            set_auth.update(|state| state.loading = false);
            Err(error)
        }
    }
}

/// Sign out. The backend revocation is best-effort: local credentials and
/// state are gone when this returns no matter what the server said.
pub async fn logout(api: &ApiClient, set_auth: WriteSignal<AuthState>) -> Result<(), ApiError> {
    let result = api.logout().await;

    storage::clear_credentials();
    bump_session_epoch();
    set_auth.update(|state| state.clear());

    result
}

pub fn use_login_action() -> Action<LoginRequest, Result<UserProfile, ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let api = api.clone();
        async move { login_request(payload, &api, set_auth).await }
    })
}

pub fn use_logout_action() -> Action<(), Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    create_action(move |_: &()| {
        let api = api.clone();
        async move { logout(&api, set_auth).await }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::operations_user;
    use leptos::create_runtime;

    fn with_runtime<T>(test: impl FnOnce() -> T) -> T {
        let runtime = create_runtime();
        let result = test();
        runtime.dispose();
        result
    }

    #[test]
    fn use_auth_returns_default_without_context() {
        with_runtime(|| {
            let (state, _set_state) = use_auth();
            let snapshot = state.get();
            assert!(!snapshot.is_authenticated);
            assert!(!snapshot.initialized);
            assert!(snapshot.user.is_none());
        });
    }

    #[test]
    fn authenticated_always_implies_a_user() {
        let mut state = AuthState::default();
        state.login_success(operations_user());
        assert!(state.is_authenticated && state.user.is_some());

        state.set_user(operations_user());
        assert!(state.is_authenticated && state.user.is_some());

        state.clear();
        assert!(!state.is_authenticated && state.user.is_none());
    }

    #[test]
    fn every_mutation_leaves_initialized_set() {
        for apply in [
            (|state: &mut AuthState| state.login_success(operations_user()))
                as fn(&mut AuthState),
            |state| state.set_user(operations_user()),
            |state| state.clear(),
            |state| state.mark_initialized(),
        ] {
            let mut state = AuthState::default();
            assert!(!state.initialized);
            apply(&mut state);
            assert!(state.initialized);
            assert!(!state.loading);
        }
    }

    #[test]
    fn bootstrap_reads_the_canonical_shape_the_stabilizer_leaves() {
        storage::clear_credentials();
        storage::set_raw_for_test(
            storage::LEGACY_AUTH_KEY,
            r#"{"token":"not-a-jwt","user":{"id":"u1"}}"#,
        );

        storage::reconcile_legacy_auth();

        // migrated pair is visible, and its garbage token fails closed
        assert!(matches!(
            bootstrap_decision(),
            BootstrapDecision::Expired
        ));
        storage::clear_credentials();
    }

    #[test]
    fn epoch_moves_on_bump_only() {
        let before = session_epoch();
        assert_eq!(before, session_epoch());
        bump_session_epoch();
        assert_ne!(before, session_epoch());
    }
}
