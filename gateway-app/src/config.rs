//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use gateway_upstream::UpstreamConfig;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub jwt_secret: String,
    /// Lifetime of issued bearer credentials.
    pub jwt_ttl: chrono::Duration,
    /// Lifetime of server-side sessions.
    pub session_timeout: chrono::Duration,
    /// How often expired sessions are swept.
    pub sweep_interval: Duration,
    pub upstream: UpstreamConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        let jwt_ttl = chrono::Duration::seconds(secs("JWT_TTL_SECS", 86_400)?);
        let session_timeout = chrono::Duration::seconds(secs("SESSION_TIMEOUT_SECS", 86_400)?);
        let sweep_interval = Duration::from_secs(secs("SWEEP_INTERVAL_SECS", 3_600)? as u64);

        let upstream = UpstreamConfig {
            login_url: required("MERCHANT_LOGIN_URL")?,
            logout_url: required("MERCHANT_LOGOUT_URL")?,
            profile_url: required("MERCHANT_PROFILE_URL")?,
            referer_url: required("MERCHANT_REFERER_URL")?,
        };

        Ok(Self {
            port,
            jwt_secret,
            jwt_ttl,
            session_timeout,
            sweep_interval,
            upstream,
        })
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    env::var(name).map_err(|_| anyhow::anyhow!("{} environment variable is required", name))
}

fn secs(name: &str, default: i64) -> anyhow::Result<i64> {
    match env::var(name) {
        Ok(raw) => Ok(raw.parse()?),
        Err(_) => Ok(default),
    }
}
