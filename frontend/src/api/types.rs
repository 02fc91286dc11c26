use chrono::{DateTime, Utc};
use leptos::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `data` payload of a successful login or token refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub access_token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub tenant_slug: Option<String>,
}

pub mod roles {
    pub const SUPER_ADMIN: &str = "super_admin";
    pub const TENANT_ADMIN: &str = "tenant_admin";
    pub const OPERATIONS: &str = "operations";
    pub const CUSTOMER: &str = "customer";
}

/// Response envelope every backend endpoint wraps its payload in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
    pub data: T,
}

/// Error-response body; `data` is absent or null on failures.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupResponse {
    pub id: String,
    pub reference: String,
    pub status: String,
    pub requester: String,
    pub address: String,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Push-channel event payload for a new pickup request. Lives in memory
/// only; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub notification_id: String,
    pub pickup_id: String,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub message: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.message
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.message.into_view()
    }
}

impl ApiError {
    fn with_code(message: impl Into<String>, code: &str) -> Self {
        Self {
            message: message.into(),
            code: code.to_string(),
            details: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_code(message, "VALIDATION_ERROR")
    }

    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::with_code(message, "REQUEST_FAILED")
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::with_code(message, "PARSE_ERROR")
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_code(message, "UNAUTHORIZED")
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::with_code(message, "SERVER_ERROR")
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::with_code(message, "UNKNOWN")
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == "UNAUTHORIZED"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_maps_camel_case_status_code() {
        let envelope: Envelope<UserProfile> = serde_json::from_value(json!({
            "statusCode": 200,
            "message": "ok",
            "data": { "id": "u1", "role": "operations" }
        }))
        .unwrap();
        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.data.id, "u1");
        assert!(envelope.data.permissions.is_empty());
    }

    #[test]
    fn notification_payload_uses_camel_case_keys() {
        let notification: Notification = serde_json::from_value(json!({
            "notificationId": "n1",
            "pickupId": "p1",
            "title": "New pickup request",
            "message": "Pickup requested at Pier 4",
            "readAt": null,
            "createdAt": "2026-08-07T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(notification.notification_id, "n1");
        assert_eq!(notification.pickup_id, "p1");
        assert!(notification.read_at.is_none());
    }

    #[test]
    fn minimal_user_profile_deserializes_with_defaults() {
        let user: UserProfile = serde_json::from_value(json!({ "id": "u1" })).unwrap();
        assert_eq!(user.id, "u1");
        assert!(user.role.is_empty());
        assert!(user.tenant_id.is_none());
    }
}
