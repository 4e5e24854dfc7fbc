//! HTTP route handlers.

use std::time::Instant;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::catalog::{CatalogError, TripConfig};
use crate::planner::Planner;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/lines", get(list_lines))
        .route("/plan", post(plan_trip))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Summarise the line catalog.
async fn list_lines(State(state): State<AppState>) -> Json<LinesResponse> {
    Json(LinesResponse::from_catalog(&state.catalog))
}

/// Plan a trip from the rider's boarding and destination choices.
async fn plan_trip(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlanResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid plan request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    if req.candidates.is_empty() {
        return Err(AppError::BadRequest {
            message: "At least one candidate is required".to_string(),
        });
    }

    let boarding =
        candidate_map(&req.candidates).map_err(|message| AppError::BadRequest { message })?;
    let destination =
        candidate_map(&req.destinations).map_err(|message| AppError::BadRequest { message })?;

    let trip = TripConfig::from_candidates(&state.catalog, &boarding, &destination)?;

    let start = Instant::now();
    let planner = Planner::new(&state.catalog, &state.poller, &state.config);
    let plan = planner.plan(&trip).await;
    let execution_ms = start.elapsed().as_millis() as u64;

    Ok(Json(PlanResponse::from_plan(&plan, execution_ms)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::InvertedTrip { .. } | CatalogError::InvalidCode(_) => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, reason = %message, "request failed");
        } else {
            warn!(%status, reason = %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
