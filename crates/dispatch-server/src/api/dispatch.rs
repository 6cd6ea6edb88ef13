//! Dispatch planning endpoints.
//!
//! Missing upstream collections degrade to empty results with HTTP 200;
//! the one caller error - an unparseable dispatch date or time - maps to
//! HTTP 400.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use dispatch_core::models::{CalcDeliveryPathResult, MedDispatchRec};
use dispatch_core::planner::{self, EMPTY_LINESTRING};
use dispatch_core::{FleetSnapshot, PlanError};

use crate::state::AppState;

pub async fn query_available_drones(
    State(state): State<Arc<AppState>>,
    Json(recs): Json<Vec<MedDispatchRec>>,
) -> Result<Json<Vec<String>>, StatusCode> {
    if recs.is_empty() {
        return Ok(Json(Vec::new()));
    }
    let (Some(drones), Some(table)) = (
        state.ilp.drones().await,
        state.ilp.drones_for_service_points().await,
    ) else {
        return Ok(Json(Vec::new()));
    };

    planner::query_available_drones(&drones, &table, &recs)
        .map(Json)
        .map_err(invalid_input)
}

pub async fn calc_delivery_path(
    State(state): State<Arc<AppState>>,
    Json(recs): Json<Vec<MedDispatchRec>>,
) -> Result<Json<CalcDeliveryPathResult>, StatusCode> {
    if recs.is_empty() {
        return Ok(Json(CalcDeliveryPathResult::default()));
    }
    let Some(snapshot) = fetch_snapshot(&state).await else {
        return Ok(Json(CalcDeliveryPathResult::default()));
    };

    planner::calc_delivery_path(&snapshot, &recs)
        .map(Json)
        .map_err(invalid_input)
}

pub async fn calc_delivery_path_as_geojson(
    State(state): State<Arc<AppState>>,
    Json(recs): Json<Vec<MedDispatchRec>>,
) -> Result<String, StatusCode> {
    if recs.is_empty() {
        return Ok(EMPTY_LINESTRING.to_string());
    }
    let Some(snapshot) = fetch_snapshot(&state).await else {
        return Ok(EMPTY_LINESTRING.to_string());
    };

    planner::calc_delivery_path_as_geojson(&snapshot, &recs).map_err(invalid_input)
}

/// Pulls the four collections for one planning call. Drones, service points
/// and the availability table are required; restricted areas default to
/// "no no-fly zones" when absent.
async fn fetch_snapshot(state: &AppState) -> Option<FleetSnapshot> {
    let drones = state.ilp.drones().await?;
    let service_points = state.ilp.service_points().await?;
    let availability = state.ilp.drones_for_service_points().await?;
    let restricted_areas = state.ilp.restricted_areas().await.unwrap_or_default();

    Some(FleetSnapshot {
        drones,
        service_points,
        availability,
        restricted_areas,
    })
}

fn invalid_input(err: PlanError) -> StatusCode {
    tracing::warn!("rejecting dispatch request: {}", err);
    StatusCode::BAD_REQUEST
}
