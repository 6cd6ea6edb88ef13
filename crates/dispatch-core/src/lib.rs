//! Dispatch core - pure planning logic for the medical-delivery drone fleet.
//!
//! This crate contains the domain models, geometry, pathfinding and the
//! greedy sortie planner with NO networking dependencies.

pub mod eligibility;
pub mod error;
pub mod geo;
pub mod models;
pub mod pathfinder;
pub mod planner;
pub mod query;

pub use error::{PlanError, PlanResult};
pub use geo::{Position, Region};
pub use models::{
    CalcDeliveryPathResult, Capability, DeliveryPath, Drone, DronePath, MedDispatchRec,
    QueryAttribute, ServicePoint,
};
pub use planner::FleetSnapshot;
