use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Runtime configuration loaded once at startup. Deployment provides either
/// a `window.__FREIGHTDESK_ENV` / `window.__FREIGHTDESK_CONFIG` global
/// (env.js) or a `config.json` next to the bundle; env.js wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub ws_base_url: Option<String>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();
static WS_BASE_URL: OnceLock<String> = OnceLock::new();

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

fn cache(slot: &OnceLock<String>, value: &str) -> String {
    let value = value.to_string();
    let _ = slot.set(value.clone());
    value
}

/// Derive the websocket origin from the API base when no explicit
/// `ws_base_url` is configured.
pub fn ws_url_from_api(api_base_url: &str) -> String {
    if let Some(rest) = api_base_url.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = api_base_url.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        api_base_url.to_string()
    }
}

#[cfg(target_arch = "wasm32")]
mod globals {
    use super::RuntimeConfig;

    fn read_key(obj: &js_sys::Object, upper: &str, lower: &str) -> Option<String> {
        js_sys::Reflect::get(obj, &upper.into())
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
            .or_else(|| js_sys::Reflect::get(obj, &lower.into()).ok())
            .and_then(|v| v.as_string())
    }

    fn read_global(name: &str) -> Option<RuntimeConfig> {
        let window = web_sys::window()?;
        let any = js_sys::Reflect::get(&window, &name.into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        let obj = js_sys::Object::from(any);
        Some(RuntimeConfig {
            api_base_url: read_key(&obj, "API_BASE_URL", "api_base_url"),
            ws_base_url: read_key(&obj, "WS_BASE_URL", "ws_base_url"),
        })
    }

    pub fn snapshot() -> Option<RuntimeConfig> {
        read_global("__FREIGHTDESK_ENV")
            .filter(|cfg| cfg.api_base_url.is_some() || cfg.ws_base_url.is_some())
            .or_else(|| read_global("__FREIGHTDESK_CONFIG"))
    }

    pub async fn fetch_runtime_config() -> Option<RuntimeConfig> {
        let resp = reqwest::get("./config.json").await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        resp.json::<RuntimeConfig>().await.ok()
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod globals {
    use super::RuntimeConfig;

    pub fn snapshot() -> Option<RuntimeConfig> {
        None
    }

    pub async fn fetch_runtime_config() -> Option<RuntimeConfig> {
        None
    }
}

async fn resolved_config() -> RuntimeConfig {
    if let Some(cfg) = globals::snapshot() {
        return cfg;
    }
    globals::fetch_runtime_config().await.unwrap_or_default()
}

pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    let cfg = resolved_config().await;
    match cfg.api_base_url {
        Some(url) => cache(&API_BASE_URL, &url),
        None => cache(&API_BASE_URL, DEFAULT_API_BASE_URL),
    }
}

pub async fn await_ws_base_url() -> String {
    if let Some(cached) = WS_BASE_URL.get() {
        return cached.clone();
    }
    let cfg = resolved_config().await;
    if let Some(url) = cfg.ws_base_url {
        return cache(&WS_BASE_URL, &url);
    }
    let api = await_api_base_url().await;
    cache(&WS_BASE_URL, &ws_url_from_api(&api))
}

pub async fn init() {
    let _ = await_api_base_url().await;
    let _ = await_ws_base_url().await;
}
