use super::{
    client::ApiClient,
    types::{ApiError, LoginData, LoginRequest, UserProfile},
};
use crate::utils::storage;

impl ApiClient {
    /// Authenticate and persist the returned credential pair. Storage is
    /// only touched on success, and always as a pair.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginData, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = Self::send_with_timeout(
            self.http_client()
                .post(format!("{base_url}/auth/login"))
                .json(&request),
        )
        .await?;

        let data: LoginData = Self::read_envelope(response).await?;
        storage::save_credentials(&data.access_token, &data.user).map_err(ApiError::unknown)?;
        Ok(data)
    }

    /// Session check: returns the profile the backend currently associates
    /// with the stored token. Callers treat any error as "not signed in".
    pub async fn get_me(&self) -> Result<UserProfile, ApiError> {
        let headers = self.get_auth_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = Self::send_with_timeout(
            self.http_client()
                .get(format!("{base_url}/auth/me"))
                .headers(headers),
        )
        .await?;

        Self::read_envelope(response).await
    }

    /// Rotate the bearer token. Persists the new pair on success; the old
    /// credential stays in place on failure.
    pub async fn refresh_token(&self) -> Result<LoginData, ApiError> {
        let headers = self.get_auth_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = Self::send_with_timeout(
            self.http_client()
                .post(format!("{base_url}/auth/refresh-token"))
                .headers(headers),
        )
        .await?;

        let data: LoginData = Self::read_envelope(response).await?;
        storage::save_credentials(&data.access_token, &data.user).map_err(ApiError::unknown)?;
        Ok(data)
    }

    /// Best-effort server-side revocation. The caller clears local state
    /// regardless of the outcome.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let headers = self.get_auth_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = Self::send_with_timeout(
            self.http_client()
                .post(format!("{base_url}/auth/logout"))
                .headers(headers),
        )
        .await?;

        Self::expect_success(response).await
    }
}
