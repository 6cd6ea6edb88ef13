//! A\* search over the implicit 16-direction move grid.
//!
//! The grid is continuous in principle; quantising every position to its
//! nearest step-sized cell collapses it to a finite one. The closed set and
//! the per-cell best-g map are keyed by that cell, and a short recency window
//! stops the search from oscillating around local minima near region
//! boundaries.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use crate::geo::{self, Position, Region, ANGLES, STEP};

/// Recently expanded cells a neighbour may not revisit.
const RECENT_WINDOW: usize = 10;

/// Grid cell identity: positions within half a step collapse to one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CellKey {
    lng: i64,
    lat: i64,
}

impl CellKey {
    fn of(position: &Position) -> Self {
        Self {
            lng: (position.lng / STEP).round() as i64,
            lat: (position.lat / STEP).round() as i64,
        }
    }
}

/// Search node in the local arena; `parent` indexes the arena.
#[derive(Debug, Clone)]
struct Node {
    position: Position,
    g: f64,
    parent: Option<usize>,
}

/// Heap entry ordered by lowest f, FIFO among equal f.
#[derive(Debug)]
struct OpenEntry {
    f: f64,
    seq: u64,
    node: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: invert so the smallest f (and among
        // equals, the earliest insertion) pops first.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Lower bound on the number of steps still needed.
fn heuristic(from: &Position, goal: &Position) -> f64 {
    match geo::distance(from, goal) {
        Some(d) => d / STEP,
        None => f64::MAX,
    }
}

/// Finds a step-by-step path from `start` to within one step of `goal`,
/// avoiding the restricted areas.
///
/// Returns the full node sequence in start-to-goal order, or an empty path
/// when no route exists or either endpoint is invalid.
pub fn find_path(start: &Position, goal: &Position, regions: &[Region]) -> Vec<Position> {
    if !start.is_valid() || !goal.is_valid() {
        return Vec::new();
    }

    let mut arena = vec![Node {
        position: *start,
        g: 0.0,
        parent: None,
    }];
    let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
    let mut best_g: HashMap<CellKey, f64> = HashMap::new();
    let mut closed: HashSet<CellKey> = HashSet::new();
    let mut recents: VecDeque<CellKey> = VecDeque::with_capacity(RECENT_WINDOW + 1);
    let mut seq = 0u64;

    best_g.insert(CellKey::of(start), 0.0);
    open.push(OpenEntry {
        f: heuristic(start, goal),
        seq,
        node: 0,
    });

    while let Some(entry) = open.pop() {
        let current = entry.node;
        let current_key = CellKey::of(&arena[current].position);
        if closed.contains(&current_key) {
            continue;
        }
        closed.insert(current_key);

        recents.push_back(current_key);
        if recents.len() > RECENT_WINDOW {
            recents.pop_front();
        }

        if geo::is_close(&arena[current].position, goal) == Some(true) {
            return reconstruct(&arena, current);
        }

        let current_pos = arena[current].position;
        let current_g = arena[current].g;

        for angle in ANGLES {
            let Some(next) = geo::next_position(&current_pos, angle) else {
                continue;
            };
            let next_key = CellKey::of(&next);

            if closed.contains(&next_key) {
                continue;
            }
            if !geo::is_valid_move(&current_pos, &next, regions) {
                continue;
            }
            if recents.contains(&next_key) {
                continue;
            }

            let tentative = current_g + STEP;
            if tentative < best_g.get(&next_key).copied().unwrap_or(f64::INFINITY) {
                best_g.insert(next_key, tentative);
                arena.push(Node {
                    position: next,
                    g: tentative,
                    parent: Some(current),
                });
                seq += 1;
                open.push(OpenEntry {
                    f: tentative + heuristic(&next, goal),
                    seq,
                    node: arena.len() - 1,
                });
            }
        }
    }

    Vec::new()
}

fn reconstruct(arena: &[Node], end: usize) -> Vec<Position> {
    let mut path = Vec::new();
    let mut current = Some(end);
    while let Some(idx) = current {
        path.push(arena[idx].position);
        current = arena[idx].parent;
    }
    path.reverse();
    path
}
