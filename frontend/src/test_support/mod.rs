#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::types::{Notification, UserProfile};
    use crate::state::auth::AuthState;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    use leptos::*;
    use serde_json::json;

    pub fn operations_user() -> UserProfile {
        UserProfile {
            id: "u-ops".into(),
            email: "ops@acme-logistics.test".into(),
            full_name: "Olga Operations".into(),
            role: "operations".into(),
            permissions: vec!["pickups.read".into(), "pickups.update".into()],
            tenant_id: Some("t1".into()),
            tenant_slug: Some("acme".into()),
        }
    }

    pub fn tenant_admin_user() -> UserProfile {
        UserProfile {
            id: "u-tadmin".into(),
            email: "admin@acme-logistics.test".into(),
            full_name: "Tara Admin".into(),
            role: "tenant_admin".into(),
            permissions: vec!["tenant.manage".into()],
            tenant_id: Some("t1".into()),
            tenant_slug: Some("acme".into()),
        }
    }

    pub fn super_admin_user() -> UserProfile {
        UserProfile {
            id: "u-sadmin".into(),
            email: "root@freightdesk.test".into(),
            full_name: "Sam Root".into(),
            role: "super_admin".into(),
            permissions: vec!["*".into()],
            tenant_id: None,
            tenant_slug: None,
        }
    }

    pub fn customer_user() -> UserProfile {
        UserProfile {
            id: "u-cust".into(),
            email: "customer@example.test".into(),
            full_name: "Casey Customer".into(),
            role: "customer".into(),
            permissions: vec![],
            tenant_id: Some("t1".into()),
            tenant_slug: Some("acme".into()),
        }
    }

    pub fn pickup_notification(id: &str) -> Notification {
        Notification {
            notification_id: id.into(),
            pickup_id: format!("p-{id}"),
            title: "New pickup request".into(),
            message: "Pickup requested at Pier 4".into(),
            read_at: None,
            created_at: chrono::Utc::now(),
        }
    }

    /// JWT-shaped token whose `exp` sits `exp_offset_secs` away from now.
    pub fn bearer_token(exp_offset_secs: i64) -> String {
        let exp = chrono::Utc::now().timestamp() + exp_offset_secs;
        let payload = URL_SAFE_NO_PAD.encode(json!({ "sub": "u1", "exp": exp }).to_string());
        format!("e30.{payload}.sig")
    }

    pub fn user_profile_json(id: &str, role: &str) -> serde_json::Value {
        json!({
            "id": id,
            "email": "ops@acme-logistics.test",
            "full_name": "Olga Operations",
            "role": role,
            "permissions": ["pickups.read"],
            "tenant_id": "t1",
            "tenant_slug": "acme"
        })
    }

    pub fn provide_auth(
        user: Option<UserProfile>,
    ) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let is_authenticated = user.is_some();
        let (auth, set_auth) = create_signal(AuthState {
            user,
            is_authenticated,
            loading: false,
            initialized: true,
        });
        provide_context((auth, set_auth));
        (auth, set_auth)
    }
}
