//! # Merchant Auth Gateway
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Build the merchant platform adapter
//! - Create the token issuer, session registry and auth service
//! - Start the HTTP server (which owns the session sweeper)

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gateway_core::{AuthService, SessionRegistry, TokenIssuer, inbound::HttpServer};
use gateway_upstream::MerchantClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,gateway_app=debug,gateway_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting auth gateway on port {}", config.port);
    tracing::info!("Merchant login endpoint: {}", config.upstream.login_url);

    // Wire up the bridging core
    let upstream = MerchantClient::new(config.upstream);
    let issuer = TokenIssuer::new(&config.jwt_secret, config.jwt_ttl);
    let registry = SessionRegistry::new(config.session_timeout);
    let service = AuthService::new(upstream, issuer, registry.clone());

    // Create and run the HTTP server
    let server = HttpServer::new(service, registry, config.sweep_interval);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
