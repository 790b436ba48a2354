//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::domain::{LineId, SectionId, StationId};
use crate::network::NewSection;

use super::dto::*;
use super::error::AppError;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations).post(create_station))
        .route("/stations/:id", delete(delete_station))
        .route("/lines", get(list_lines).post(create_line))
        .route("/lines/:id", get(get_line).delete(delete_line))
        .route("/lines/:id/sections", post(add_section))
        .route("/sections/:id", delete(delete_section))
        .route("/paths", get(find_path))
        .route("/fares", get(fare))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn list_stations(State(state): State<AppState>) -> Json<Vec<StationResult>> {
    let stations = state.network.stations();
    Json(stations.iter().map(StationResult::from).collect())
}

async fn create_station(
    State(state): State<AppState>,
    Json(req): Json<CreateStationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let station = state.network.create_station(&req.name)?;
    Ok((StatusCode::CREATED, Json(StationResult::from(&station))))
}

async fn delete_station(
    State(state): State<AppState>,
    Path(id): Path<StationId>,
) -> Result<StatusCode, AppError> {
    state.network.delete_station(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_lines(State(state): State<AppState>) -> Json<Vec<LineResult>> {
    let lines = state.network.lines();
    Json(lines.iter().map(LineResult::from).collect())
}

async fn create_line(
    State(state): State<AppState>,
    Json(req): Json<CreateLineRequest>,
) -> Result<impl IntoResponse, AppError> {
    let line = state.network.create_line(&req.name)?;
    Ok((StatusCode::CREATED, Json(LineResult::from(&line))))
}

async fn get_line(
    State(state): State<AppState>,
    Path(id): Path<LineId>,
) -> Result<Json<LineDetailResult>, AppError> {
    let detail = state.network.line(id)?;
    Ok(Json(LineDetailResult::from(&detail)))
}

async fn delete_line(
    State(state): State<AppState>,
    Path(id): Path<LineId>,
) -> Result<StatusCode, AppError> {
    state.network.delete_line(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a section to a line. Returns one section, or two when the
/// opposite direction was added as well.
async fn add_section(
    State(state): State<AppState>,
    Path(line): Path<LineId>,
    Json(req): Json<CreateSectionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let sections = state.network.add_section(line, NewSection::from(&req))?;
    let body: Vec<SectionResult> = sections.iter().map(SectionResult::from).collect();
    Ok((StatusCode::CREATED, Json(body)))
}

async fn delete_section(
    State(state): State<AppState>,
    Path(id): Path<SectionId>,
) -> Result<StatusCode, AppError> {
    state.network.delete_section(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Shortest path between two stations, with its fare.
async fn find_path(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Json<PathResponse>, AppError> {
    let route = state.network.route(query.source, query.target)?;
    let distance = i64::try_from(route.path.distance).unwrap_or(i64::MAX);
    let fare = state.fares.fare(distance)?;
    Ok(Json(PathResponse::from_route(&route, fare)))
}

async fn fare(
    State(state): State<AppState>,
    Query(query): Query<FareQuery>,
) -> Result<Json<FareResponse>, AppError> {
    let fare = state.fares.fare(query.distance)?;
    Ok(Json(FareResponse {
        distance: query.distance,
        fare,
    }))
}
