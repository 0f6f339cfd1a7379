use super::handlers::{clear_cache, dashboard, health_check, leaderboard, sectors};
use super::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

/// Longer than the Eurostat client timeout so a slow fetch still completes.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Create application router with all routes and middleware
pub(crate) fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/health", get(health_check))
        .route("/api/v1/leaderboard", get(leaderboard))
        .route("/api/v1/sectors", get(sectors))
        .route("/api/v1/cache/clear", post(clear_cache))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        )
        .with_state(state)
}
