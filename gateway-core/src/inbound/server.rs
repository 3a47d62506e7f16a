//! HTTP Server configuration and startup.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa_swagger_ui::SwaggerUi;

use gateway_types::MerchantPlatform;

use super::handlers::{self, AppState};
use crate::openapi::ApiDoc;
use crate::registry::SessionRegistry;
use crate::sweeper::Sweeper;
use crate::AuthService;

/// HTTP Server for the auth gateway API.
pub struct HttpServer<M: MerchantPlatform> {
    state: Arc<AppState<M>>,
    sweeper: Sweeper,
}

impl<M: MerchantPlatform> HttpServer<M> {
    /// Creates a new HTTP server and starts the session sweeper.
    ///
    /// `registry` must be a clone of the registry inside `service` so the
    /// sweeper works on the same table.
    pub fn new(
        service: AuthService<M>,
        registry: SessionRegistry,
        sweep_interval: Duration,
    ) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            sweeper: Sweeper::spawn(registry, sweep_interval),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        use utoipa::OpenApi as _;

        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .route("/health", get(handlers::health))
            .route("/auth/login", post(handlers::login::<M>))
            .route("/auth/logout", post(handlers::logout::<M>))
            .route("/auth/me", get(handlers::me::<M>))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        self.sweeper.shutdown();
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
