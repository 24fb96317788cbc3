//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::{error, info, warn};

use crate::domain::ClockTime;
use crate::planner::{PlanError, PlanRequest, Preference};

use super::dto::*;
use super::state::AppState;

const DEFAULT_STOP_LIMIT: usize = 10;
const MAX_STOP_LIMIT: usize = 50;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stops", get(list_stops))
        .route("/lines", get(list_lines))
        .route("/plan", get(plan_route))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List stops, or search them when `q` is given.
async fn list_stops(
    State(state): State<AppState>,
    Query(req): Query<StopsQuery>,
) -> Json<StopsResponse> {
    let planner = &state.planner;
    let stops: Vec<String> = match req.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => {
            let limit = req.limit.unwrap_or(DEFAULT_STOP_LIMIT).min(MAX_STOP_LIMIT);
            planner
                .search_stops(q, limit)
                .into_iter()
                .map(str::to_string)
                .collect()
        }
        _ => planner
            .list_all_stops()
            .into_iter()
            .take(req.limit.unwrap_or(usize::MAX))
            .map(str::to_string)
            .collect(),
    };

    Json(StopsResponse { stops })
}

/// List every line in the catalog.
async fn list_lines(State(state): State<AppState>) -> Json<LinesResponse> {
    let lines = state.planner.lines().map(LineResult::from_line).collect();
    Json(LinesResponse { lines })
}

/// Plan a route between two stops.
///
/// The search is CPU-bound, so it runs on the blocking pool under the
/// configured deadline.
async fn plan_route(
    State(state): State<AppState>,
    Query(req): Query<PlanQuery>,
) -> Result<Json<PlanResponse>, AppError> {
    let preference = match req.preference.as_deref() {
        Some(p) => p
            .parse::<Preference>()
            .map_err(|message| AppError::BadRequest { message })?,
        None => Preference::default(),
    };

    let mut request = PlanRequest::new(req.from, req.to, preference);
    if let Some(time) = req.time.as_deref() {
        let depart_at = ClockTime::parse(time).map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;
        request = request.with_departure(depart_at);
    }

    let planner = state.planner.clone();
    let task = tokio::task::spawn_blocking(move || {
        let result = planner.plan(&request);
        (request, result)
    });

    let (request, result) = tokio::time::timeout(state.plan_timeout, task)
        .await
        .map_err(|_| AppError::from(PlanError::Timeout))?
        .map_err(|e| AppError::Internal {
            message: format!("planning task failed: {e}"),
        })?;
    let result = result?;

    info!(
        from = %request.origin,
        to = %request.destination,
        preference = %request.preference,
        itineraries = result.itineraries.len(),
        "plan request served"
    );

    let itineraries = result
        .itineraries
        .iter()
        .map(ItineraryResult::from_itinerary)
        .collect();
    Ok(Json(PlanResponse { itineraries }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        let message = e.to_string();
        match e {
            PlanError::UnknownStop(_) => AppError::NotFound { message },
            PlanError::SameOriginDestination(_) => AppError::BadRequest { message },
            PlanError::Timeout => AppError::Unavailable { message },
            PlanError::EmptyPath | PlanError::UnknownLine(_) => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
