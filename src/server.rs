//! HTTP server initialization and runtime setup.
//!
//! Builds the upstream client, schema registry and executor, then runs the
//! Axum server until Ctrl-C or SIGTERM.

use crate::config::Config;
use crate::execution::Executor;
use crate::graph::Schema;
use crate::infrastructure::upstream::RedditClient;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;

/// Builds the shared application state from configuration.
///
/// # Errors
///
/// Returns an error if the upstream client cannot be constructed.
pub fn build_state(config: &Config) -> Result<AppState> {
    let client = RedditClient::new(
        &config.upstream_base_url,
        config.upstream_timeout(),
        &config.upstream_user_agent,
    )
    .context("Failed to create upstream client")?;
    let origin = client.base_url().to_string();

    let schema = Arc::new(
        Schema::build().instrument(|ty, field| tracing::trace!(ty, field, "Resolving field")),
    );
    tracing::info!("Schema built with {} types", schema.type_count());

    let executor = Arc::new(Executor::new(schema, Arc::new(client)));

    Ok(AppState::new(executor, origin, config.graphiql))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The upstream client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config)?;
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("GraphQL server running at http://{addr}/graphql");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down gracefully"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down gracefully"),
    }
}
