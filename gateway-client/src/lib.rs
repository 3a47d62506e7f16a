//! # Gateway Client SDK
//!
//! A typed Rust client for the merchant auth gateway API.
//! Holds the bearer credential issued at login and presents it on
//! subsequent calls.

use gateway_types::{LoginResponse, LogoutResponse, MeResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not logged in")]
    NotLoggedIn,
}

/// Auth gateway API client.
pub struct GatewayClient {
    base_url: String,
    token: Option<String>,
    http: Client,
}

impl GatewayClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            http: Client::new(),
        }
    }

    /// Checks if the gateway is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Logs in and stores the issued bearer credential for later calls.
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, ClientError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let resp = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .json(&body)
            .send()
            .await?;

        let login: LoginResponse = handle_response(resp).await?;
        self.token = Some(login.token.clone());
        Ok(login)
    }

    /// Fetches the current user's profile.
    pub async fn me(&self) -> Result<MeResponse, ClientError> {
        let token = self.token.as_ref().ok_or(ClientError::NotLoggedIn)?;
        let resp = self
            .http
            .get(format!("{}/auth/me", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;

        handle_response(resp).await
    }

    /// Logs out and drops the stored credential on success.
    pub async fn logout(&mut self) -> Result<LogoutResponse, ClientError> {
        let token = self.token.as_ref().ok_or(ClientError::NotLoggedIn)?;
        let resp = self
            .http
            .post(format!("{}/auth/logout", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;

        let logout: LogoutResponse = handle_response(resp).await?;
        self.token = None;
        Ok(logout)
    }

    /// The bearer credential from the last successful login, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    } else {
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GatewayClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = GatewayClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_starts_logged_out() {
        let client = GatewayClient::new("http://localhost:3000");
        assert!(client.token().is_none());
    }
}
