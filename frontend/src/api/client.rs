use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{
    api::types::{ApiError, Envelope, ErrorBody},
    config,
    utils::{browser, storage},
};

/// Auth-critical calls get a bounded timeout so a hung session check is
/// reported as a transport failure rather than waiting forever.
pub const AUTH_TIMEOUT: Duration = Duration::from_secs(15);

/// Shared request pipeline. Attaches the stored bearer token to outgoing
/// requests and is the single point that reacts to 401 responses by
/// clearing the credential store.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    pub(crate) fn get_auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();

        let token = storage::stored_token()
            .ok_or_else(|| ApiError::unauthorized("No stored session token"))?;

        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {token}")
                .parse()
                .map_err(|_| ApiError::unknown("Invalid token format"))?,
        );

        Ok(headers)
    }

    /// 401 anywhere invalidates the whole session: clear the stored pair and
    /// send the app back to the login entry point. The error itself still
    /// propagates to the caller unchanged.
    pub(crate) fn handle_unauthorized_status(status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            storage::clear_credentials();
            Self::redirect_to_login_if_needed();
        }
    }

    fn redirect_to_login_if_needed() {
        if browser::current_path().as_deref() == Some(browser::LOGIN_PATH) {
            return;
        }
        browser::redirect(browser::LOGIN_PATH);
    }

    /// Unwrap the `{ statusCode, message, data }` envelope of a response,
    /// applying the global 401 side effect first.
    pub(crate) async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        Self::handle_unauthorized_status(status);
        if status.is_success() {
            let envelope: Envelope<T> = response
                .json()
                .await
                .map_err(|e| ApiError::parse(format!("Failed to parse response: {e}")))?;
            Ok(envelope.data)
        } else {
            Err(Self::error_from_response(status, response).await)
        }
    }

    /// Like `read_envelope` but for endpoints whose payload is irrelevant.
    pub(crate) async fn expect_success(response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();
        Self::handle_unauthorized_status(status);
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(status, response).await)
        }
    }

    /// Send with the auth-call timeout applied. reqwest only supports
    /// request timeouts natively off-wasm, so the wasm path races the send
    /// against a timer instead.
    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) async fn send_with_timeout(
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        builder.timeout(AUTH_TIMEOUT).send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::request_failed("Request timed out")
            } else {
                ApiError::request_failed(format!("Request failed: {e}"))
            }
        })
    }

    #[cfg(target_arch = "wasm32")]
    pub(crate) async fn send_with_timeout(
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        use futures::future::{select, Either};

        let send = Box::pin(builder.send());
        let timeout = Box::pin(gloo_timers::future::sleep(AUTH_TIMEOUT));
        match select(send, timeout).await {
            Either::Left((result, _)) => {
                result.map_err(|e| ApiError::request_failed(format!("Request failed: {e}")))
            }
            Either::Right(_) => Err(ApiError::request_failed("Request timed out")),
        }
    }

    async fn error_from_response(status: StatusCode, response: reqwest::Response) -> ApiError {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .map(|body| body.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

        if status == StatusCode::UNAUTHORIZED {
            ApiError::unauthorized(message)
        } else if status.is_server_error() {
            ApiError::server(message)
        } else {
            ApiError::request_failed(message)
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
