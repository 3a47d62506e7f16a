//! # Gateway Upstream
//!
//! Outbound adapter implementing the `MerchantPlatform` port against the
//! real merchant platform over HTTP.
//!
//! All calls are single-shot: no retries, no timeout beyond the reqwest
//! default. Failures never escape the port boundary - they come back as
//! `UpstreamError`, `false`, or `None` per operation.

use async_trait::async_trait;
use reqwest::header;
use serde_json::Value;

use gateway_types::{
    MerchantCredentials, MerchantLogin, MerchantPlatform, Profile, Session, UpstreamError,
};

/// Perimeter assigned when the platform omits one from the login response.
const DEFAULT_PERIMETRE: &str = "10034";

/// Upstream endpoint configuration, supplied by the environment.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub login_url: String,
    pub logout_url: String,
    pub profile_url: String,
    /// Referer the platform expects on every call.
    pub referer_url: String,
}

/// HTTP client for the merchant platform.
pub struct MerchantClient {
    config: UpstreamConfig,
    http: reqwest::Client,
}

impl MerchantClient {
    /// Creates a client with a fresh connection pool.
    pub fn new(config: UpstreamConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    async fn do_logout(&self, session: &Session) -> Result<bool, UpstreamError> {
        let credential = serde_json::json!({ "token": session.merchant_token }).to_string();
        // The platform authenticates logout through its cookie triple as
        // well as the bearer header.
        let cookie = format!(
            "ID_PERIMETRE={}; ID={}; AUTH_CREDENTIAL={}",
            session.perimetre,
            session.merchant_token,
            urlencoding::encode(&credential),
        );

        let resp = self
            .http
            .post(&self.config.logout_url)
            .header(header::ACCEPT, "application/json, text/plain, */*")
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", session.merchant_token),
            )
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, cookie)
            .header(header::REFERER, &self.config.referer_url)
            .body("{}")
            .send()
            .await
            .map_err(network)?;

        let body: Value = resp.json().await.map_err(network)?;
        Ok(body.get("success").and_then(Value::as_bool).unwrap_or(false))
    }

    async fn do_fetch_profile(&self, session: &Session) -> Result<Profile, UpstreamError> {
        let resp = self
            .http
            .get(&self.config.profile_url)
            .header(header::ACCEPT, "application/json, text/plain, */*")
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", session.merchant_token),
            )
            .header(header::REFERER, &self.config.referer_url)
            .send()
            .await
            .map_err(network)?;

        resp.json::<Profile>().await.map_err(network)
    }
}

fn network(err: reqwest::Error) -> UpstreamError {
    UpstreamError::Network(err.to_string())
}

#[async_trait]
impl MerchantPlatform for MerchantClient {
    async fn login(
        &self,
        credentials: MerchantCredentials,
    ) -> Result<MerchantLogin, UpstreamError> {
        tracing::info!(email = %credentials.email, "attempting merchant login");

        let form = [
            ("email", credentials.email.as_str()),
            ("password", credentials.password.as_str()),
        ];

        let resp = self
            .http
            .post(&self.config.login_url)
            .header(header::ACCEPT, "application/json, text/plain, */*")
            // The platform requires the header present even before a token exists.
            .header(header::AUTHORIZATION, "Bearer")
            .header(header::COOKIE, "SHOW_CART=false")
            .header(header::REFERER, &self.config.referer_url)
            .form(&form)
            .send()
            .await
            .map_err(network)?;

        let body: Value = resp.json().await.map_err(network)?;

        if !body.get("success").and_then(Value::as_bool).unwrap_or(false) {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Invalid login response")
                .to_string();
            return Err(UpstreamError::Rejected(message));
        }

        let token = body
            .get("token")
            .and_then(Value::as_str)
            .ok_or_else(|| UpstreamError::Rejected("Login response missing token".into()))?
            .to_string();

        let perimetre = body
            .get("perimetre")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_PERIMETRE)
            .to_string();

        Ok(MerchantLogin {
            token,
            perimetre,
            user: body,
        })
    }

    async fn logout(&self, session: &Session) -> bool {
        match self.do_logout(session).await {
            Ok(confirmed) => confirmed,
            Err(err) => {
                tracing::warn!(%err, session_id = %session.id, "merchant logout failed");
                false
            }
        }
    }

    async fn fetch_profile(&self, session: &Session) -> Option<Profile> {
        match self.do_fetch_profile(session).await {
            Ok(profile) => Some(profile),
            Err(err) => {
                tracing::warn!(%err, session_id = %session.id, "merchant profile fetch failed");
                None
            }
        }
    }
}
