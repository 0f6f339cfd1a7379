//! Route handlers.
//!
//! Each request runs the pipeline for the selected sector over the memoized
//! dataset. Any pipeline failure replaces the whole page with the error page.

use super::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use eurenew::output::{DashboardView, LeaderboardTable, render_dashboard, render_error};
use eurenew::{EnergySector, PipelineError};
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};

/// Query parameters selecting a sector
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SectorQuery {
    /// Display name or `nrg_bal` code; anything else selects the first sector
    pub(crate) sector: Option<String>,
}

impl SectorQuery {
    fn resolve(&self) -> EnergySector {
        self.sector
            .as_deref()
            .and_then(|s| EnergySector::from_name(s).or_else(|| EnergySector::from_code(s)))
            .unwrap_or_default()
    }
}

/// One entry of the sector list
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SectorInfo {
    code: String,
    name: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct HealthResponse {
    status: String,
    version: String,
    dataset_cached: bool,
}

/// Error body of the JSON endpoints
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ErrorResponse {
    error: String,
}

const fn status_for(err: &PipelineError) -> StatusCode {
    if err.is_fetch() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Dashboard page for the selected sector
#[instrument(skip(state))]
pub(crate) async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<SectorQuery>,
) -> Response {
    let sector = query.resolve();

    match state.service.report(sector).await {
        Ok(report) => Html(render_dashboard(&DashboardView::from_report(&report))).into_response(),
        Err(err) => {
            error!(sector = sector.code(), error = %err, "dashboard request failed");
            (status_for(&err), Html(render_error(&err.to_string()))).into_response()
        }
    }
}

/// Leaderboard of the selected sector as JSON
#[instrument(skip(state))]
pub(crate) async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<SectorQuery>,
) -> Response {
    let sector = query.resolve();

    match state.service.report(sector).await {
        Ok(report) => Json(LeaderboardTable::from_report(&report)).into_response(),
        Err(err) => {
            error!(sector = sector.code(), error = %err, "leaderboard request failed");
            let body = ErrorResponse {
                error: err.to_string(),
            };
            (status_for(&err), Json(body)).into_response()
        }
    }
}

/// The reported sectors in selector order
pub(crate) async fn sectors() -> Json<Vec<SectorInfo>> {
    let sectors = EnergySector::all()
        .into_iter()
        .map(|s| SectorInfo {
            code: s.code().to_string(),
            name: s.name().to_string(),
        })
        .collect();
    Json(sectors)
}

/// Drop the memoized dataset so the next request refetches it
#[instrument(skip(state))]
pub(crate) async fn clear_cache(State(state): State<AppState>) -> StatusCode {
    state.service.clear_cache().await;
    StatusCode::NO_CONTENT
}

/// Health check endpoint
pub(crate) async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        dataset_cached: state.service.is_cached(),
    })
}
