//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, service wiring and the Axum
//! server lifecycle.

use crate::application::services::{AuthService, TourService, UserService};
use crate::config::Config;
use crate::domain::repositories::{TourRepository, UserRepository};
use crate::infrastructure::persistence::{PgTourRepository, PgUserRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Repositories, services and shared state
/// - Axum HTTP server with trailing-slash normalization
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The configured frontend origin is not a valid header value
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let pool = Arc::new(pool);
    let tour_repository: Arc<dyn TourRepository> = Arc::new(PgTourRepository::new(pool.clone()));
    let user_repository: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));

    let state = AppState::new(
        Arc::new(TourService::new(tour_repository)),
        Arc::new(UserService::new(user_repository.clone())),
        Arc::new(AuthService::new(
            user_repository,
            config.token_signing_secret.clone(),
        )),
    );

    let frontend_origin: HeaderValue = config
        .frontend_origin
        .parse()
        .context("FRONTEND_ORIGIN is not a valid header value")?;

    let app = NormalizePathLayer::trim_trailing_slash()
        .layer(app_router(state, frontend_origin));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves when the process receives Ctrl-C, letting in-flight
/// requests finish before the server exits.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(err) => {
            // Without a signal handler the server just runs until killed.
            tracing::error!(%err, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    }
}
