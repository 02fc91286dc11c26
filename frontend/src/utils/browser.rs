//! Navigation shims over `window.location`. On the host build the redirect
//! target is recorded instead, so guard and client behavior stays observable
//! in native tests.

pub const LOGIN_PATH: &str = "/login";

#[cfg(target_arch = "wasm32")]
pub fn redirect(path: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(path);
    }
}

/// Redirect without leaving the current entry in history, so back-navigation
/// cannot land inside protected content.
#[cfg(target_arch = "wasm32")]
pub fn redirect_replace(path: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().replace(path);
    }
}

#[cfg(target_arch = "wasm32")]
pub fn current_path() -> Option<String> {
    web_sys::window()?.location().pathname().ok()
}

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::cell::RefCell;

    thread_local! {
        static LAST_REDIRECT: RefCell<Option<String>> = const { RefCell::new(None) };
    }

    pub fn record(path: &str) {
        LAST_REDIRECT.with(|last| *last.borrow_mut() = Some(path.to_string()));
    }

    pub fn take() -> Option<String> {
        LAST_REDIRECT.with(|last| last.borrow_mut().take())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn redirect(path: &str) {
    host::record(path);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn redirect_replace(path: &str) {
    host::record(path);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_path() -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn take_last_redirect() -> Option<String> {
    host::take()
}
