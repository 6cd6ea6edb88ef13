//! Data model shared between the logistics platform and the planner.

use serde::{Deserialize, Serialize};

use crate::geo::Position;

/// Flight capability of one drone. A drone with no recorded capability
/// never flies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    #[serde(default)]
    pub cooling: bool,
    #[serde(default)]
    pub heating: bool,
    pub capacity: f64,
    pub max_moves: i32,
    pub cost_per_move: f64,
    pub cost_initial: f64,
    pub cost_final: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub capability: Option<Capability>,
}

/// A drone's home base; takeoff and landing location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePoint {
    pub id: i32,
    pub name: String,
    pub location: Position,
}

/// When a drone may fly: a day of week plus an exclusive time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWindow {
    #[serde(default)]
    pub day_of_week: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub until: Option<String>,
}

/// One drone's availability as listed under a service point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneAvailability {
    pub id: String,
    #[serde(default)]
    pub availability: Vec<AvailabilityWindow>,
}

/// Entry of the drones-for-service-points table. The same drone id may
/// appear under several service points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DronesForServicePoint {
    pub service_point_id: i32,
    #[serde(default)]
    pub drones: Vec<DroneAvailability>,
}

/// Constraints a dispatch record places on the serving drone. Every field
/// is optional; absent means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    #[serde(default)]
    pub capacity: Option<f64>,
    #[serde(default)]
    pub cooling: Option<bool>,
    #[serde(default)]
    pub heating: Option<bool>,
    #[serde(default)]
    pub max_cost: Option<f64>,
}

/// A single medical dispatch request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedDispatchRec {
    pub id: i32,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub requirements: Option<Requirements>,
    pub delivery: Position,
}

/// Sentinel delivery id marking the return-to-base leg.
pub const RETURN_LEG_ID: i32 = -1;

/// One flight leg: the positions flown for a single delivery (or the
/// return), ending in a hover duplicate of the final position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPath {
    pub delivery_id: i32,
    pub flight_path: Vec<Position>,
}

/// One planned sortie: a drone and its legs in flight order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DronePath {
    pub drone_id: String,
    pub deliveries: Vec<DeliveryPath>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcDeliveryPathResult {
    pub drone_paths: Vec<DronePath>,
    pub total_moves: i64,
    pub total_cost: f64,
}

/// One clause of a structured drone query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryAttribute {
    #[serde(default)]
    pub attribute: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl QueryAttribute {
    pub fn new(
        attribute: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            attribute: Some(attribute.into()),
            operator: Some(operator.into()),
            value: Some(value.into()),
        }
    }
}
