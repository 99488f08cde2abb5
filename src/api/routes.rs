use crate::AppState;
use crate::api::handlers;
use axum::{Router, routing::get};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::splain::sample))
        .route("/health", get(handlers::health::health))
        .route("/{tx}", get(handlers::splain::splain_tx))
        .with_state(state)
}
