//! Typed attribute predicates over drone records.
//!
//! Two entry points share the attribute universe: the bare
//! `attribute = value` path match, and the structured multi-clause query.
//! The structured form silently drops clauses with any blank field before
//! matching, so an all-invalid query matches every drone; clauses that are
//! structurally complete but name an unknown attribute or an operator the
//! attribute type does not support are evaluated and fail.

use crate::models::{Capability, Drone, QueryAttribute};

/// Matches one drone against a bare `attribute = value` pair.
pub fn match_single_attribute(drone: &Drone, attribute: &str, value: &str) -> bool {
    let capability = drone.capability.as_ref();
    match attribute {
        "id" => drone.id == value,
        "name" => drone.name == value,
        "cooling" => capability.is_some_and(|c| c.cooling == parse_bool(value)),
        "heating" => capability.is_some_and(|c| c.heating == parse_bool(value)),
        "capacity" => equals_number(capability, value, |c| c.capacity),
        "maxMoves" => capability.is_some_and(|c| {
            value
                .parse::<i32>()
                .map(|v| c.max_moves == v)
                .unwrap_or(false)
        }),
        "costPerMove" => equals_number(capability, value, |c| c.cost_per_move),
        "costInitial" => equals_number(capability, value, |c| c.cost_initial),
        "costFinal" => equals_number(capability, value, |c| c.cost_final),
        _ => false,
    }
}

/// Runs a structured multi-clause query over the fleet and returns the ids
/// of drones matching every surviving clause.
pub fn run_query(drones: &[Drone], queries: &[QueryAttribute]) -> Vec<String> {
    let valid: Vec<&QueryAttribute> = queries.iter().filter(|q| is_valid_query(q)).collect();

    drones
        .iter()
        .filter(|drone| valid.iter().all(|query| match_query_attribute(drone, query)))
        .map(|drone| drone.id.clone())
        .collect()
}

/// Structural validity only: all three fields present and non-blank. Type
/// checking happens at match time.
fn is_valid_query(query: &QueryAttribute) -> bool {
    let present = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.trim().is_empty());
    present(&query.attribute) && present(&query.operator) && present(&query.value)
}

fn match_query_attribute(drone: &Drone, query: &QueryAttribute) -> bool {
    let (Some(attribute), Some(operator), Some(value)) = (
        query.attribute.as_deref(),
        query.operator.as_deref(),
        query.value.as_deref(),
    ) else {
        return false;
    };
    let capability = drone.capability.as_ref();

    match attribute {
        "id" => string_compare(&drone.id, operator, value),
        "name" => string_compare(&drone.name, operator, value),
        "cooling" => {
            capability.is_some_and(|c| boolean_compare(c.cooling, operator, parse_bool(value)))
        }
        "heating" => {
            capability.is_some_and(|c| boolean_compare(c.heating, operator, parse_bool(value)))
        }
        "capacity" => compare_number(capability, operator, value, |c| c.capacity),
        "maxMoves" => compare_number(capability, operator, value, |c| f64::from(c.max_moves)),
        "costPerMove" => compare_number(capability, operator, value, |c| c.cost_per_move),
        "costInitial" => compare_number(capability, operator, value, |c| c.cost_initial),
        "costFinal" => compare_number(capability, operator, value, |c| c.cost_final),
        _ => false,
    }
}

fn equals_number(
    capability: Option<&Capability>,
    value: &str,
    field: impl Fn(&Capability) -> f64,
) -> bool {
    match (capability, value.parse::<f64>()) {
        (Some(c), Ok(v)) => field(c) == v,
        _ => false,
    }
}

fn compare_number(
    capability: Option<&Capability>,
    operator: &str,
    value: &str,
    field: impl Fn(&Capability) -> f64,
) -> bool {
    match (capability, value.parse::<f64>()) {
        (Some(c), Ok(rhs)) => numeric_compare(field(c), operator, rhs),
        _ => false,
    }
}

fn numeric_compare(lhs: f64, operator: &str, rhs: f64) -> bool {
    match operator {
        "=" => lhs == rhs,
        "!=" => lhs != rhs,
        "<" => lhs < rhs,
        ">" => lhs > rhs,
        _ => false,
    }
}

/// String attributes accept equality only.
fn string_compare(lhs: &str, operator: &str, rhs: &str) -> bool {
    operator == "=" && lhs == rhs
}

/// Boolean attributes accept equality only.
fn boolean_compare(lhs: bool, operator: &str, rhs: bool) -> bool {
    operator == "=" && lhs == rhs
}

/// Wire-contract boolean parsing: anything that is not (case-insensitively)
/// "true" is false, never an error.
fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QueryAttribute;

    fn capability(cooling: bool, capacity: f64) -> Capability {
        Capability {
            cooling,
            heating: false,
            capacity,
            max_moves: 2000,
            cost_per_move: 0.1,
            cost_initial: 10.0,
            cost_final: 5.0,
        }
    }

    fn drone(id: &str, cooling: bool, capacity: f64) -> Drone {
        Drone {
            id: id.to_string(),
            name: format!("{id}-name"),
            capability: Some(capability(cooling, capacity)),
        }
    }

    fn bare_drone(id: &str) -> Drone {
        Drone {
            id: id.to_string(),
            name: format!("{id}-name"),
            capability: None,
        }
    }

    #[test]
    fn single_attribute_matches_strings_and_numbers() {
        let d = drone("D1", true, 100.0);
        assert!(match_single_attribute(&d, "id", "D1"));
        assert!(match_single_attribute(&d, "name", "D1-name"));
        assert!(match_single_attribute(&d, "capacity", "100"));
        assert!(match_single_attribute(&d, "maxMoves", "2000"));
        assert!(!match_single_attribute(&d, "capacity", "99"));
        assert!(!match_single_attribute(&d, "id", "D2"));
    }

    #[test]
    fn single_attribute_fails_on_parse_errors_and_unknowns() {
        let d = drone("D1", true, 100.0);
        assert!(!match_single_attribute(&d, "capacity", "lots"));
        assert!(!match_single_attribute(&d, "maxMoves", "2000.0"));
        assert!(!match_single_attribute(&d, "altitude", "100"));
    }

    #[test]
    fn capability_attributes_are_false_without_a_capability() {
        let d = bare_drone("D1");
        assert!(!match_single_attribute(&d, "cooling", "false"));
        assert!(!match_single_attribute(&d, "capacity", "0"));
        // Identity attributes still match.
        assert!(match_single_attribute(&d, "id", "D1"));
    }

    #[test]
    fn lenient_booleans_treat_anything_but_true_as_false() {
        let d = drone("D1", false, 1.0);
        assert!(match_single_attribute(&d, "cooling", "nope"));
        assert!(match_single_attribute(&d, "cooling", "FALSE"));
        let cool = drone("D2", true, 1.0);
        assert!(match_single_attribute(&cool, "cooling", "TRUE"));
    }

    #[test]
    fn query_ands_all_valid_clauses() {
        let fleet = [drone("D1", true, 100.0)];

        let hit = run_query(
            &fleet,
            &[
                QueryAttribute::new("cooling", "=", "true"),
                QueryAttribute::new("capacity", ">", "50"),
            ],
        );
        assert_eq!(hit, vec!["D1"]);

        let miss = run_query(
            &fleet,
            &[
                QueryAttribute::new("cooling", "=", "true"),
                QueryAttribute::new("capacity", ">", "200"),
            ],
        );
        assert!(miss.is_empty());
    }

    #[test]
    fn invalid_clauses_are_dropped_not_failed() {
        let fleet = [drone("D1", true, 100.0)];

        // Blank attribute: the clause is dropped, the empty predicate
        // matches everything.
        let result = run_query(&fleet, &[QueryAttribute::new("", "=", "x")]);
        assert_eq!(result, vec!["D1"]);

        // Whitespace counts as blank too.
        let result = run_query(&fleet, &[QueryAttribute::new("capacity", "  ", "5")]);
        assert_eq!(result, vec!["D1"]);

        // A missing field behaves the same way.
        let clause = QueryAttribute {
            attribute: Some("capacity".into()),
            operator: None,
            value: Some("5".into()),
        };
        assert_eq!(run_query(&fleet, &[clause]), vec!["D1"]);
    }

    #[test]
    fn complete_but_unknown_clauses_fail() {
        let fleet = [drone("D1", true, 100.0)];
        assert!(run_query(&fleet, &[QueryAttribute::new("altitude", "=", "5")]).is_empty());
        assert!(run_query(&fleet, &[QueryAttribute::new("capacity", ">=", "5")]).is_empty());
        assert!(run_query(&fleet, &[QueryAttribute::new("id", "!=", "D2")]).is_empty());
        assert!(run_query(&fleet, &[QueryAttribute::new("cooling", "<", "true")]).is_empty());
        assert!(run_query(&fleet, &[QueryAttribute::new("capacity", ">", "much")]).is_empty());
    }

    #[test]
    fn max_moves_parses_as_integer_in_path_form_but_number_in_query_form() {
        let fleet = [drone("D1", true, 100.0)];

        // The bare path match wants an integer literal.
        assert!(!match_single_attribute(&fleet[0], "maxMoves", "2000.0"));
        assert!(match_single_attribute(&fleet[0], "maxMoves", "2000"));

        // The structured form compares numerically, so a decimal works.
        let decimal = run_query(&fleet, &[QueryAttribute::new("maxMoves", "=", "2000.0")]);
        assert_eq!(decimal, vec!["D1"]);

        let below = run_query(&fleet, &[QueryAttribute::new("maxMoves", "<", "1999.5")]);
        assert!(below.is_empty());
    }

    #[test]
    fn adding_clauses_never_grows_the_result() {
        let fleet = [
            drone("D1", true, 100.0),
            drone("D2", true, 10.0),
            drone("D3", false, 100.0),
        ];
        let base = vec![QueryAttribute::new("cooling", "=", "true")];
        let narrowed = vec![
            QueryAttribute::new("cooling", "=", "true"),
            QueryAttribute::new("capacity", ">", "50"),
        ];

        let wide = run_query(&fleet, &base);
        let narrow = run_query(&fleet, &narrowed);
        assert!(narrow.iter().all(|id| wide.contains(id)));
        assert_eq!(wide, vec!["D1", "D2"]);
        assert_eq!(narrow, vec!["D1"]);
    }

    #[test]
    fn clause_order_does_not_change_the_result() {
        let fleet = [
            drone("D1", true, 100.0),
            drone("D2", true, 10.0),
            drone("D3", false, 100.0),
        ];
        let forward = vec![
            QueryAttribute::new("cooling", "=", "true"),
            QueryAttribute::new("capacity", ">", "50"),
        ];
        let reversed: Vec<QueryAttribute> = forward.iter().rev().cloned().collect();
        assert_eq!(run_query(&fleet, &forward), run_query(&fleet, &reversed));
    }
}
