//! Drone lookup and query endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use dispatch_core::models::{Drone, QueryAttribute};
use dispatch_core::query;

use crate::state::AppState;

pub async fn drones_with_cooling(
    State(state): State<Arc<AppState>>,
    Path(cooling): Path<bool>,
) -> Json<Vec<String>> {
    let Some(drones) = state.ilp.drones().await else {
        return Json(Vec::new());
    };
    let ids = drones
        .iter()
        .filter(|drone| drone.capability.as_ref().is_some_and(|c| c.cooling == cooling))
        .map(|drone| drone.id.clone())
        .collect();
    Json(ids)
}

pub async fn drone_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Drone>, StatusCode> {
    let drones = state.ilp.drones().await.unwrap_or_default();
    drones
        .into_iter()
        .find(|drone| drone.id == id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn query_as_path(
    State(state): State<Arc<AppState>>,
    Path((attribute, value)): Path<(String, String)>,
) -> Json<Vec<String>> {
    let Some(drones) = state.ilp.drones().await else {
        return Json(Vec::new());
    };
    let ids = drones
        .iter()
        .filter(|drone| query::match_single_attribute(drone, &attribute, &value))
        .map(|drone| drone.id.clone())
        .collect();
    Json(ids)
}

pub async fn query_drones(
    State(state): State<Arc<AppState>>,
    Json(queries): Json<Vec<QueryAttribute>>,
) -> Json<Vec<String>> {
    let Some(drones) = state.ilp.drones().await else {
        return Json(Vec::new());
    };
    Json(query::run_query(&drones, &queries))
}
