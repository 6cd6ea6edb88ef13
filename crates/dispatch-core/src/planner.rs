//! Greedy sortie planning over a read-only fleet snapshot.
//!
//! The outer loop repeatedly plans the single sortie serving the most
//! remaining deliveries, emits its concrete flight path, and removes the
//! served records. Subset selection is deterministic: candidates are walked
//! in ascending record id and choices are irrevocable.

use serde::Serialize;

use crate::eligibility::{self, AvailabilityMap};
use crate::error::PlanResult;
use crate::geo::Region;
use crate::models::{
    CalcDeliveryPathResult, Capability, DeliveryPath, Drone, DronePath, DronesForServicePoint,
    MedDispatchRec, ServicePoint, RETURN_LEG_ID,
};
use crate::pathfinder;

/// Read-only fleet data pulled from the logistics platform for one planning
/// call.
#[derive(Debug, Clone, Default)]
pub struct FleetSnapshot {
    pub drones: Vec<Drone>,
    pub service_points: Vec<ServicePoint>,
    pub availability: Vec<DronesForServicePoint>,
    pub restricted_areas: Vec<Region>,
}

/// The GeoJSON rendering of a plan with no flyable route.
pub const EMPTY_LINESTRING: &str = "{\"type\":\"LineString\",\"coordinates\":[]}";

#[derive(Serialize)]
struct LineString {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: Vec<[f64; 2]>,
}

/// Ids of drones able to serve every record in `recs`.
pub fn query_available_drones(
    drones: &[Drone],
    availability_table: &[DronesForServicePoint],
    recs: &[MedDispatchRec],
) -> PlanResult<Vec<String>> {
    if recs.is_empty() {
        return Ok(Vec::new());
    }
    let availability = eligibility::build_availability_map(availability_table);

    let mut ids = Vec::new();
    for drone in drones {
        if can_serve_all(drone, recs, &availability)? {
            ids.push(drone.id.clone());
        }
    }
    Ok(ids)
}

fn can_serve_all(
    drone: &Drone,
    recs: &[MedDispatchRec],
    availability: &AvailabilityMap,
) -> PlanResult<bool> {
    for rec in recs {
        if !eligibility::can_serve(drone, rec) {
            return Ok(false);
        }
        if !eligibility::is_available_for_dispatch(&drone.id, rec, availability)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Plans sorties until no drone can serve any remaining record.
pub fn calc_delivery_path(
    snapshot: &FleetSnapshot,
    recs: &[MedDispatchRec],
) -> PlanResult<CalcDeliveryPathResult> {
    let mut result = CalcDeliveryPathResult::default();
    if recs.is_empty() {
        return Ok(result);
    }

    let availability = eligibility::build_availability_map(&snapshot.availability);
    let mut remaining: Vec<MedDispatchRec> = recs.to_vec();

    while !remaining.is_empty() {
        let mut best: Option<(&Drone, &ServicePoint, Vec<MedDispatchRec>)> = None;

        for drone in &snapshot.drones {
            let Some(home) = find_service_point_for_drone(
                &drone.id,
                &snapshot.availability,
                &snapshot.service_points,
            ) else {
                continue;
            };

            let subset = find_max_subset(
                drone,
                home,
                &remaining,
                &availability,
                &snapshot.restricted_areas,
            )?;
            if subset.len() > best.as_ref().map_or(0, |(_, _, chosen)| chosen.len()) {
                best = Some((drone, home, subset));
            }
        }

        let Some((drone, home, subset)) = best else {
            break;
        };

        let drone_path = build_drone_path(drone, home, &subset, &snapshot.restricted_areas);
        if drone_path.deliveries.is_empty() {
            break;
        }

        let moves = compute_moves(&drone_path);
        result.total_moves += moves;
        if let Some(capability) = &drone.capability {
            result.total_cost += compute_cost(capability, moves);
        }
        result.drone_paths.push(drone_path);

        remaining.retain(|rec| !subset.iter().any(|chosen| chosen.id == rec.id));
    }

    Ok(result)
}

/// Flattens the single-sortie plan covering all of `recs` into a GeoJSON
/// LineString. The first drone whose maximum subset is the whole batch
/// flies it; if none qualifies the LineString is empty.
pub fn calc_delivery_path_as_geojson(
    snapshot: &FleetSnapshot,
    recs: &[MedDispatchRec],
) -> PlanResult<String> {
    if recs.is_empty() {
        return Ok(EMPTY_LINESTRING.to_string());
    }

    let availability = eligibility::build_availability_map(&snapshot.availability);

    let mut chosen: Option<(&Drone, &ServicePoint)> = None;
    for drone in &snapshot.drones {
        let Some(home) = find_service_point_for_drone(
            &drone.id,
            &snapshot.availability,
            &snapshot.service_points,
        ) else {
            continue;
        };
        let subset = find_max_subset(drone, home, recs, &availability, &snapshot.restricted_areas)?;
        if subset.len() == recs.len() {
            chosen = Some((drone, home));
            break;
        }
    }

    let Some((drone, home)) = chosen else {
        return Ok(EMPTY_LINESTRING.to_string());
    };

    let drone_path = build_drone_path(drone, home, recs, &snapshot.restricted_areas);
    let coordinates: Vec<[f64; 2]> = drone_path
        .deliveries
        .iter()
        .flat_map(|leg| leg.flight_path.iter().map(|p| [p.lng, p.lat]))
        .collect();

    let line = LineString {
        kind: "LineString",
        coordinates,
    };
    Ok(serde_json::to_string(&line).unwrap_or_else(|_| EMPTY_LINESTRING.to_string()))
}

/// A drone's home is the first service point whose roster lists it. Entries
/// pointing at unknown service points are skipped, not fatal.
fn find_service_point_for_drone<'a>(
    drone_id: &str,
    table: &[DronesForServicePoint],
    service_points: &'a [ServicePoint],
) -> Option<&'a ServicePoint> {
    for entry in table {
        if entry.drones.iter().any(|drone| drone.id == drone_id) {
            if let Some(home) = service_points
                .iter()
                .find(|sp| sp.id == entry.service_point_id)
            {
                return Some(home);
            }
        }
    }
    None
}

/// Greedily picks the largest id-ordered subset of `remaining` this drone
/// can fly in one sortie from its home service point.
///
/// Each acceptance tentatively prices the whole sortie as if the candidate
/// were the last delivery: once any chosen record carries a cost cap, the
/// amortised per-delivery cost must stay within the tightest cap seen.
fn find_max_subset(
    drone: &Drone,
    home: &ServicePoint,
    remaining: &[MedDispatchRec],
    availability: &AvailabilityMap,
    restricted_areas: &[Region],
) -> PlanResult<Vec<MedDispatchRec>> {
    let Some(capability) = &drone.capability else {
        return Ok(Vec::new());
    };

    let mut candidates = Vec::new();
    for rec in remaining {
        if eligibility::can_serve(drone, rec)
            && eligibility::is_available_for_dispatch(&drone.id, rec, availability)?
        {
            candidates.push(rec.clone());
        }
    }
    if candidates.is_empty() {
        return Ok(Vec::new());
    }
    candidates.sort_by_key(|rec| rec.id);

    let mut chosen: Vec<MedDispatchRec> = Vec::new();
    let mut used_capacity = 0.0;
    let mut used_moves: i64 = 0;
    let mut current_pos = home.location;
    let mut tightest_cost_cap = f64::INFINITY;

    for candidate in candidates {
        let required_capacity = candidate
            .requirements
            .as_ref()
            .and_then(|req| req.capacity)
            .unwrap_or(0.0);
        let next_capacity = used_capacity + required_capacity;
        if next_capacity > capability.capacity {
            continue;
        }

        let outbound = pathfinder::find_path(&current_pos, &candidate.delivery, restricted_areas);
        if outbound.is_empty() {
            continue;
        }
        let moves_outbound = used_moves + (outbound.len() as i64 - 1);

        let inbound = pathfinder::find_path(&candidate.delivery, &home.location, restricted_areas);
        if inbound.is_empty() {
            continue;
        }
        let moves_if_included = moves_outbound + (inbound.len() as i64 - 1);
        if moves_if_included > i64::from(capability.max_moves) {
            continue;
        }

        // A cap of zero or less means the requester set none.
        let record_cap = candidate
            .requirements
            .as_ref()
            .and_then(|req| req.max_cost)
            .unwrap_or(0.0);
        let mut next_cost_cap = tightest_cost_cap;
        if record_cap > 0.0 && record_cap < next_cost_cap {
            next_cost_cap = record_cap;
        }

        if next_cost_cap < f64::INFINITY {
            let flight_cost = capability.cost_initial
                + moves_if_included as f64 * capability.cost_per_move
                + capability.cost_final;
            let per_delivery_cost = flight_cost / (chosen.len() as f64 + 1.0);
            if per_delivery_cost > next_cost_cap {
                continue;
            }
        }

        used_capacity = next_capacity;
        used_moves = moves_outbound;
        current_pos = candidate.delivery;
        tightest_cost_cap = next_cost_cap;
        chosen.push(candidate);
    }

    Ok(chosen)
}

/// Builds the concrete flight legs for one sortie: one leg per delivery in
/// id order plus the return-to-base leg, each ending in a hover duplicate.
/// An unroutable leg aborts the sortie with whatever was built so far.
fn build_drone_path(
    drone: &Drone,
    home: &ServicePoint,
    recs: &[MedDispatchRec],
    restricted_areas: &[Region],
) -> DronePath {
    let mut drone_path = DronePath {
        drone_id: drone.id.clone(),
        deliveries: Vec::new(),
    };
    if recs.is_empty() {
        return drone_path;
    }

    let mut ordered: Vec<&MedDispatchRec> = recs.iter().collect();
    ordered.sort_by_key(|rec| rec.id);

    let mut current = home.location;
    for rec in ordered {
        let mut leg = pathfinder::find_path(&current, &rec.delivery, restricted_areas);
        if leg.is_empty() {
            return drone_path;
        }

        let last = leg[leg.len() - 1];
        leg.push(last);
        drone_path.deliveries.push(DeliveryPath {
            delivery_id: rec.id,
            flight_path: leg,
        });
        current = last;
    }

    let mut return_leg = pathfinder::find_path(&current, &home.location, restricted_areas);
    if return_leg.is_empty() {
        return drone_path;
    }
    let last = return_leg[return_leg.len() - 1];
    return_leg.push(last);
    drone_path.deliveries.push(DeliveryPath {
        delivery_id: RETURN_LEG_ID,
        flight_path: return_leg,
    });

    drone_path
}

/// Total moves across all legs; the hover duplicate counts as one move.
fn compute_moves(path: &DronePath) -> i64 {
    path.deliveries
        .iter()
        .map(|leg| leg.flight_path.len().saturating_sub(1) as i64)
        .sum()
}

fn compute_cost(capability: &Capability, moves: i64) -> f64 {
    capability.cost_initial + moves as f64 * capability.cost_per_move + capability.cost_final
}
