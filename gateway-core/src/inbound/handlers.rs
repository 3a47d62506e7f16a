//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use gateway_types::{AppError, LoginRequest, MerchantPlatform};

use crate::AuthService;

/// Application state shared across handlers.
pub struct AppState<M: MerchantPlatform> {
    pub service: AuthService<M>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16(),
            "timestamp": Utc::now().to_rfc3339(),
        });

        (status, Json(body)).into_response()
    }
}

/// Extracts the bearer token from the Authorization header.
/// Expected format: "Bearer <token>"
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Log in with merchant credentials.
#[tracing::instrument(skip(state, req), fields(email = %req.email))]
pub async fn login<M: MerchantPlatform>(
    State(state): State<Arc<AppState<M>>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let resp = state.service.login(req).await?;
    Ok(Json(resp))
}

/// Log out the session behind the bearer credential.
#[tracing::instrument(skip(state, headers))]
pub async fn logout<M: MerchantPlatform>(
    State(state): State<Arc<AppState<M>>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let bearer = bearer_token(&headers)
        .ok_or_else(|| AppError::Unauthorized("JWT token required for logout".into()))?;

    let resp = state.service.logout(bearer).await?;
    Ok(Json(resp))
}

/// Fetch the current user's profile.
#[tracing::instrument(skip(state, headers))]
pub async fn me<M: MerchantPlatform>(
    State(state): State<Arc<AppState<M>>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let bearer = bearer_token(&headers)
        .ok_or_else(|| AppError::Unauthorized("JWT token required for getMe".into()))?;

    let resp = state.service.me(bearer).await?;
    Ok(Json(resp))
}
