//! Drone eligibility: capability matching and availability windows.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

use crate::error::{PlanError, PlanResult};
use crate::models::{AvailabilityWindow, Drone, DronesForServicePoint, MedDispatchRec};

/// Every availability window per drone id, merged across service points.
pub type AvailabilityMap = HashMap<String, Vec<AvailabilityWindow>>;

/// Collects availability windows per drone. The same drone may be listed
/// under several service points; its windows accumulate.
pub fn build_availability_map(table: &[DronesForServicePoint]) -> AvailabilityMap {
    let mut map: AvailabilityMap = HashMap::new();
    for service_point in table {
        for drone in &service_point.drones {
            map.entry(drone.id.clone())
                .or_default()
                .extend(drone.availability.iter().cloned());
        }
    }
    map
}

/// Whether the drone's capability covers the record's requirements.
///
/// The per-delivery cost cap is deliberately not checked here; the sortie
/// planner owns it. A `cooling: false` (or `heating: false`) requirement
/// imposes no constraint.
pub fn can_serve(drone: &Drone, rec: &MedDispatchRec) -> bool {
    let (Some(capability), Some(requirements)) = (&drone.capability, &rec.requirements) else {
        return false;
    };

    if let Some(required) = requirements.capacity {
        if capability.capacity < required {
            return false;
        }
    }
    if requirements.cooling == Some(true) && !capability.cooling {
        return false;
    }
    if requirements.heating == Some(true) && !capability.heating {
        return false;
    }
    true
}

/// Whether the drone has a window covering the record's date and time.
///
/// Window boundaries are exclusive on both sides: a dispatch at exactly
/// `from` or `until` is rejected. Windows with missing fields are skipped;
/// an unparseable date or time anywhere is a caller error.
pub fn is_available_for_dispatch(
    drone_id: &str,
    rec: &MedDispatchRec,
    availability: &AvailabilityMap,
) -> PlanResult<bool> {
    let Some(windows) = availability.get(drone_id).filter(|w| !w.is_empty()) else {
        return Ok(false);
    };
    let (Some(date), Some(time)) = (rec.date.as_deref(), rec.time.as_deref()) else {
        return Ok(false);
    };

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| PlanError::InvalidDate(date.to_string()))?;
    let time = parse_time(time)?;
    let day = day_name(date.weekday());

    for window in windows {
        let (Some(window_day), Some(from), Some(until)) = (
            window.day_of_week.as_deref(),
            window.from.as_deref(),
            window.until.as_deref(),
        ) else {
            continue;
        };
        if window_day != day {
            continue;
        }

        let from = parse_time(from)?;
        let until = parse_time(until)?;
        if time > from && time < until {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Times come in both `HH:MM` and `HH:MM:SS` in the wild; accept both.
fn parse_time(value: &str) -> PlanResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| PlanError::InvalidTime(value.to_string()))
}

fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}
