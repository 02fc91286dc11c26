use serde::Deserialize;
use serde_json::Value;

use crate::api::types::UserProfile;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const LEGACY_AUTH_KEY: &str = "auth";

/// The persisted session pair. `token` and `user` only ever exist together;
/// a half-present pair is treated as no session at all.
#[derive(Debug, Clone)]
pub struct Credential {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
struct LegacyAuthRecord {
    token: String,
    user: Value,
}

pub fn save_credentials(token: &str, user: &UserProfile) -> Result<(), String> {
    let user_json =
        serde_json::to_string(user).map_err(|_| "Failed to serialize user profile".to_string())?;
    backend::set_item(TOKEN_KEY, token)?;
    if let Err(err) = backend::set_item(USER_KEY, &user_json) {
        // never leave a token without its profile
        backend::remove_item(TOKEN_KEY);
        return Err(err);
    }
    Ok(())
}

pub fn load_credentials() -> Option<Credential> {
    let token = backend::get_item(TOKEN_KEY)?;
    let user_json = backend::get_item(USER_KEY)?;
    let user = serde_json::from_str(&user_json).ok()?;
    Some(Credential { token, user })
}

/// Cheap presence check used by the route guard and the request pipeline.
pub fn stored_token() -> Option<String> {
    backend::get_item(TOKEN_KEY)
}

pub fn clear_credentials() {
    backend::remove_item(TOKEN_KEY);
    backend::remove_item(USER_KEY);
}

/// Migrate the legacy combined `auth` record into the flat `token`/`user`
/// pair. Idempotent; after it returns the store is always in the flat-pair
/// shape and the combined key is gone.
pub fn reconcile_legacy_auth() {
    let Some(raw) = backend::get_item(LEGACY_AUTH_KEY) else {
        return;
    };
    if let Ok(record) = serde_json::from_str::<LegacyAuthRecord>(&raw) {
        let user_json = record.user.to_string();
        if backend::set_item(TOKEN_KEY, &record.token).is_err()
            || backend::set_item(USER_KEY, &user_json).is_err()
        {
            backend::remove_item(TOKEN_KEY);
            backend::remove_item(USER_KEY);
        }
    }
    backend::remove_item(LEGACY_AUTH_KEY);
}

#[cfg(target_arch = "wasm32")]
mod backend {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    pub fn get_item(key: &str) -> Option<String> {
        storage()?.get_item(key).ok().flatten()
    }

    pub fn set_item(key: &str, value: &str) -> Result<(), String> {
        storage()
            .ok_or_else(|| "No localStorage".to_string())?
            .set_item(key, value)
            .map_err(|_| format!("Failed to write {key}"))
    }

    pub fn remove_item(key: &str) {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(key);
        }
    }
}

// In-memory stand-in so every storage-dependent path runs under native tests.
#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use std::cell::RefCell;
    use std::collections::HashMap;

    thread_local! {
        static STORE: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
    }

    pub fn get_item(key: &str) -> Option<String> {
        STORE.with(|store| store.borrow().get(key).cloned())
    }

    pub fn set_item(key: &str, value: &str) -> Result<(), String> {
        STORE.with(|store| {
            store.borrow_mut().insert(key.to_string(), value.to_string());
        });
        Ok(())
    }

    pub fn remove_item(key: &str) {
        STORE.with(|store| {
            store.borrow_mut().remove(key);
        });
    }
}

#[cfg(test)]
pub fn set_raw_for_test(key: &str, value: &str) {
    let _ = backend::set_item(key, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::operations_user;

    fn reset() {
        clear_credentials();
        backend::remove_item(LEGACY_AUTH_KEY);
    }

    #[test]
    fn save_then_load_round_trips_the_pair() {
        reset();
        let user = operations_user();
        save_credentials("tok-1", &user).unwrap();
        let loaded = load_credentials().unwrap();
        assert_eq!(loaded.token, "tok-1");
        assert_eq!(loaded.user.id, user.id);
        assert_eq!(stored_token().as_deref(), Some("tok-1"));
    }

    #[test]
    fn clear_removes_both_keys() {
        reset();
        save_credentials("tok-2", &operations_user()).unwrap();
        clear_credentials();
        assert!(load_credentials().is_none());
        assert!(stored_token().is_none());
    }

    #[test]
    fn half_present_pair_reads_as_absent() {
        reset();
        backend::set_item(TOKEN_KEY, "orphan").unwrap();
        assert!(load_credentials().is_none());
    }

    #[test]
    fn legacy_combined_key_is_split_into_flat_pair() {
        reset();
        backend::set_item(LEGACY_AUTH_KEY, r#"{"token":"T","user":{"id":"u1"}}"#).unwrap();

        reconcile_legacy_auth();

        assert_eq!(backend::get_item(TOKEN_KEY).as_deref(), Some("T"));
        assert_eq!(
            backend::get_item(USER_KEY).as_deref(),
            Some(r#"{"id":"u1"}"#)
        );
        assert!(backend::get_item(LEGACY_AUTH_KEY).is_none());
    }

    #[test]
    fn reconcile_is_idempotent() {
        reset();
        backend::set_item(LEGACY_AUTH_KEY, r#"{"token":"T","user":{"id":"u1"}}"#).unwrap();

        reconcile_legacy_auth();
        let token_once = backend::get_item(TOKEN_KEY);
        let user_once = backend::get_item(USER_KEY);

        reconcile_legacy_auth();

        assert_eq!(backend::get_item(TOKEN_KEY), token_once);
        assert_eq!(backend::get_item(USER_KEY), user_once);
        assert!(backend::get_item(LEGACY_AUTH_KEY).is_none());
    }

    #[test]
    fn reconcile_leaves_flat_pair_untouched_when_no_legacy_key() {
        reset();
        save_credentials("tok-3", &operations_user()).unwrap();
        reconcile_legacy_auth();
        assert_eq!(stored_token().as_deref(), Some("tok-3"));
        assert!(load_credentials().is_some());
    }

    #[test]
    fn corrupt_legacy_record_is_discarded() {
        reset();
        backend::set_item(LEGACY_AUTH_KEY, "not-json").unwrap();
        reconcile_legacy_auth();
        assert!(backend::get_item(LEGACY_AUTH_KEY).is_none());
        assert!(load_credentials().is_none());
    }
}
