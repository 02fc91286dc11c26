use reqwest::multipart;

use super::{
    client::ApiClient,
    types::{ApiError, PickupResponse},
};

impl ApiClient {
    pub async fn list_pickups(&self) -> Result<Vec<PickupResponse>, ApiError> {
        let headers = self.get_auth_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = self
            .http_client()
            .get(format!("{base_url}/pickups"))
            .headers(headers)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {e}")))?;

        Self::read_envelope(response).await
    }

    /// Upload a proof-of-delivery document. The body goes out as multipart;
    /// no content-type is forced here so the part boundary stays intact.
    pub async fn upload_pickup_proof(
        &self,
        pickup_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<PickupResponse, ApiError> {
        let headers = self.get_auth_headers()?;
        let base_url = self.resolved_base_url().await;
        let form = multipart::Form::new()
            .part("file", multipart::Part::bytes(bytes).file_name(file_name.to_string()));

        let response = self
            .http_client()
            .post(format!("{base_url}/pickups/{pickup_id}/proof"))
            .headers(headers)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {e}")))?;

        Self::read_envelope(response).await
    }
}
