// Route path constants - single source of truth for all API paths

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub const SECRET: &str = "/secret";

/// Build the service router
///
/// Only `GET /secret` is registered. Anything else gets axum's default
/// 404 (unknown path) or 405 (other method on `/secret`).
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(SECRET, get(handlers::secret_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
