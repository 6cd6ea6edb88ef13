//! Route table and the small informational endpoints.

use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::{dispatch, drones, geometry};
use crate::state::AppState;

/// Fixed identifier returned by `/uid`.
const SERVICE_UID: &str = "dispatch-service-01";

pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/uid", get(uid))
        .route("/distanceTo", post(geometry::distance_to))
        .route("/isCloseTo", post(geometry::is_close_to))
        .route("/nextPosition", post(geometry::next_position))
        .route("/isInRegion", post(geometry::is_in_region))
        .route("/dronesWithCooling/:state", get(drones::drones_with_cooling))
        .route("/droneDetails/:id", get(drones::drone_details))
        .route("/queryAsPath/:attribute/:value", get(drones::query_as_path))
        .route("/query", post(drones::query_drones))
        .route("/queryAvailableDrones", post(dispatch::query_available_drones))
        .route("/calcDeliveryPath", post(dispatch::calc_delivery_path))
        .route(
            "/calcDeliveryPathAsGeoJson",
            post(dispatch::calc_delivery_path_as_geojson),
        )
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(format!(
        "<html><body><h1>Medical Dispatch Planner</h1>\
         <h4>ILP-REST-Service-URL:</h4> \
         <a href=\"{url}\" target=\"_blank\">{url}</a></body></html>",
        url = state.config.ilp_endpoint
    ))
}

async fn uid() -> &'static str {
    SERVICE_UID
}
