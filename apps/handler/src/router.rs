use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;


/// Route the function host posts `onEntraUser` trigger invocations to.
pub const INVOCATION_ROUTE: &str = "/onEntraUser";

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(INVOCATION_ROUTE, post(handlers::events::invocation_handler))
        .route("/events", post(handlers::events::event_handler))
        .route("/health", get(handlers::health::health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
