//! HTTP route handlers.

pub mod account;
pub mod health;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(account::router())
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
