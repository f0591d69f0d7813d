//! Application startup and lifecycle management.

use crate::config::InstanceConfig;
use crate::handlers::{
    health_check, hello::hello, instances, metrics_handler, readiness_check,
};
use crate::middleware::metrics_middleware;
use crate::services::{init_metrics, Database, InstanceIdGenerator, InstanceService, InstanceStore};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::cors::cors_middleware;
use service_core::middleware::tracing::{request_id_middleware, RequestId};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: InstanceConfig,
    pub instances: InstanceService,
}

impl AppState {
    pub fn new(config: InstanceConfig, store: Arc<dyn InstanceStore>) -> Self {
        Self {
            config,
            instances: InstanceService::new(store, Arc::new(InstanceIdGenerator::from_entropy())),
        }
    }
}

/// Build the HTTP router with every route and middleware layer.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/hello", post(hello))
        .route("/api/ec2/create", post(instances::create_instance))
        .route("/api/ec2/list", get(instances::list_instances))
        .route("/api/ec/terminate/:id", post(instances::terminate_instance))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                let request_id = request
                    .extensions()
                    .get::<RequestId>()
                    .map(|id| id.0.as_str())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            },
        ))
        .layer(from_fn(request_id_middleware))
        // Outermost so preflight requests never reach routing.
        .layer(from_fn(cors_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    http_listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Connect to PostgreSQL and bind the HTTP listener.
    ///
    /// Fails when the initial connectivity check fails.
    pub async fn build(config: InstanceConfig) -> Result<Self, AppError> {
        let db = Database::connect(&config.database).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to PostgreSQL");
            e
        })?;

        Self::with_store(config, Arc::new(db)).await
    }

    /// Bind the HTTP listener on top of an already constructed store.
    pub async fn with_store(
        config: InstanceConfig,
        store: Arc<dyn InstanceStore>,
    ) -> Result<Self, AppError> {
        init_metrics();

        let state = AppState::new(config.clone(), store);

        // Port 0 picks a random port (tests).
        let http_addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let http_listener = TcpListener::bind(http_addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %http_addr, "Failed to bind HTTP listener");
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        tracing::info!(http_port = http_port, "Instance service listener bound");

        Ok(Self {
            http_port,
            http_listener,
            state,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        tracing::info!(
            service = "instance-service",
            version = env!("CARGO_PKG_VERSION"),
            http_port = self.http_port,
            "Service ready to accept connections"
        );

        axum::serve(self.http_listener, router).await.map_err(|e| {
            tracing::error!(error = %e, "HTTP server error");
            std::io::Error::other(format!("HTTP server error: {}", e))
        })
    }
}
