use anyhow::Context;
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use txsplain::AppState;
use txsplain::api::routes;
use txsplain::config::{self, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::init_tracing();
    let cfg = AppConfig::from_env()?;
    let addr = SocketAddr::from((cfg.host, cfg.port));
    let state = AppState::new(cfg)?;

    let app: Router = routes::router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind server on {}", addr))?;

    info!("server listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server crashed")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
