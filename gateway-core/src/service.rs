//! Auth Application Service
//!
//! Orchestrates the login/logout/profile flows across the token issuer,
//! the session registry and the merchant platform port. Contains NO
//! HTTP logic - pure orchestration.

use gateway_types::{
    AppError, LoginRequest, LoginResponse, LogoutResponse, MeResponse, MerchantCredentials,
    MerchantPlatform, Session, UpstreamError,
};

use crate::registry::SessionRegistry;
use crate::token::TokenIssuer;

/// Application service for the auth bridge.
///
/// Generic over `M: MerchantPlatform` - the adapter is injected at compile
/// time, so the real reqwest client and test stubs are interchangeable.
pub struct AuthService<M: MerchantPlatform> {
    upstream: M,
    issuer: TokenIssuer,
    registry: SessionRegistry,
}

impl<M: MerchantPlatform> AuthService<M> {
    /// Creates the service from its three collaborators.
    ///
    /// The registry is shared: pass a clone and keep another for the sweeper.
    pub fn new(upstream: M, issuer: TokenIssuer, registry: SessionRegistry) -> Self {
        Self {
            upstream,
            issuer,
            registry,
        }
    }

    /// Authenticates against the merchant platform and opens a session.
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        if req.email.trim().is_empty() || req.password.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Email and password are required".into(),
            ));
        }

        let login = self
            .upstream
            .login(MerchantCredentials {
                email: req.email,
                password: req.password,
            })
            .await
            .map_err(|err| match err {
                UpstreamError::Rejected(message) => AppError::Unauthorized(message),
                UpstreamError::Network(detail) => {
                    // Detail stays in the logs; the client sees a generic rejection.
                    tracing::error!(%detail, "merchant login request failed");
                    AppError::Unauthorized("Invalid credentials".into())
                }
            })?;

        let token = self
            .issuer
            .issue(&login.token, &login.perimetre)
            .map_err(|err| {
                tracing::error!(%err, "failed to sign bearer credential");
                AppError::Internal("Internal server error".into())
            })?;

        let session_id = self.registry.create(&login.token, &login.perimetre);
        let expires_at = self.registry.next_expiry();

        // Never echo the merchant token back to the frontend.
        let mut user = login.user;
        if let Some(obj) = user.as_object_mut() {
            obj.remove("token");
        }

        tracing::info!(%session_id, "login succeeded");

        Ok(LoginResponse {
            success: true,
            token,
            session_id,
            user,
            expires_at,
        })
    }

    /// Closes the session identified by the bearer credential.
    pub async fn logout(&self, bearer: &str) -> Result<LogoutResponse, AppError> {
        let session = self.authenticated_session(bearer, "Invalid or expired session")?;

        if !self.upstream.logout(&session).await {
            return Err(AppError::Internal("Logout failed".into()));
        }

        self.registry.delete(&session.merchant_token);

        Ok(LogoutResponse {
            success: true,
            message: "Logged out successfully".into(),
            session_id: session.id,
        })
    }

    /// Fetches the current user's profile through the session.
    pub async fn me(&self, bearer: &str) -> Result<MeResponse, AppError> {
        let session = self.authenticated_session(bearer, "Session not found")?;

        let user = self
            .upstream
            .fetch_profile(&session)
            .await
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired merchant token".into()))?;

        Ok(MeResponse {
            success: true,
            user,
        })
    }

    /// Verifies the bearer credential and resolves its live session.
    fn authenticated_session(
        &self,
        bearer: &str,
        missing_session_message: &str,
    ) -> Result<Session, AppError> {
        let claims = self.issuer.verify(bearer).map_err(|err| {
            tracing::warn!(%err, "bearer credential rejected");
            AppError::Unauthorized("Invalid or expired JWT token".into())
        })?;

        self.registry
            .find_by_merchant_token(&claims.merchant_token)
            .ok_or_else(|| AppError::Unauthorized(missing_session_message.into()))
    }
}
