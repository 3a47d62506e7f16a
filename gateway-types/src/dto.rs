//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::SessionId;

// ─────────────────────────────────────────────────────────────────────────────
// Auth DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to log in with merchant platform credentials.
///
/// Fields default to empty strings so that a missing field is reported as a
/// gateway-shaped 400, not a deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Merchant account email
    #[serde(default)]
    #[schema(example = "customer@example.com")]
    pub email: String,
    /// Merchant account password
    #[serde(default)]
    pub password: String,
}

/// Response after a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    /// Signed bearer credential wrapping the merchant token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// Id of the session created for this login
    #[schema(value_type = String, example = "sess_123e4567-e89b-12d3-a456-426614174000")]
    pub session_id: SessionId,
    /// User document from the merchant platform (merchant token removed)
    #[schema(value_type = Object)]
    pub user: serde_json::Value,
    /// When the session expires
    pub expires_at: DateTime<Utc>,
}

/// Response after a successful logout.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub success: bool,
    #[schema(example = "Logged out successfully")]
    pub message: String,
    /// Id of the session that was logged out
    #[schema(value_type = String, example = "sess_123e4567-e89b-12d3-a456-426614174000")]
    pub session_id: SessionId,
}

/// Response for the current-user endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub success: bool,
    /// User profile from the merchant platform
    #[schema(value_type = Object)]
    pub user: crate::domain::Profile,
}
