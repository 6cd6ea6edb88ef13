//! Geometry primitives on the plane-projected (lng, lat) grid.
//!
//! The movement model is deliberately planar: coordinates are treated as
//! Cartesian with a fixed step, wrap-around longitude and impassable poles.

use serde::{Deserialize, Serialize};

/// Distance covered by a single drone move, in degrees.
pub const STEP: f64 = 0.00015;

/// Two positions closer than this count as the same place.
pub const CLOSE_THRESHOLD: f64 = 0.00015;

/// The 16 legal compass headings in degrees (east = 0, north = 90, CCW).
pub const ANGLES: [f64; 16] = [
    0.0, 22.5, 45.0, 67.5, 90.0, 112.5, 135.0, 157.5, 180.0, 202.5, 225.0, 247.5, 270.0, 292.5,
    315.0, 337.5,
];

/// Number of interpolation samples per segment when checking no-fly zones.
const SEGMENT_SAMPLES: usize = 100;

/// A point on the (lng, lat) grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lng: f64,
    pub lat: f64,
}

impl Position {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// A position is valid when both coordinates are finite and on the globe.
    pub fn is_valid(&self) -> bool {
        self.lng.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lng)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

/// A restricted area: a closed polygon the flight path must not enter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vertices: Vec<Position>,
}

/// Euclidean distance between two valid positions.
pub fn distance(p1: &Position, p2: &Position) -> Option<f64> {
    if !p1.is_valid() || !p2.is_valid() {
        return None;
    }
    let dx = p1.lng - p2.lng;
    let dy = p1.lat - p2.lat;
    Some((dx * dx + dy * dy).sqrt())
}

/// Strictly-less-than closeness test: a position exactly one step away is
/// not close.
pub fn is_close(p1: &Position, p2: &Position) -> Option<bool> {
    distance(p1, p2).map(|d| d < CLOSE_THRESHOLD)
}

/// One step from `start` along one of the 16 legal headings.
///
/// Longitude wraps at the antimeridian; a step past either pole is illegal
/// and yields `None`.
pub fn next_position(start: &Position, angle: f64) -> Option<Position> {
    if !start.is_valid() || !ANGLES.contains(&angle) {
        return None;
    }

    let rad = angle.to_radians();
    let mut lng = start.lng + rad.cos() * STEP;
    let lat = start.lat + rad.sin() * STEP;

    if !(-90.0..=90.0).contains(&lat) {
        return None;
    }

    if lng > 180.0 {
        lng = -180.0 + (lng - 180.0);
    } else if lng < -180.0 {
        lng = 180.0 + (lng + 180.0);
    }

    Some(Position::new(lng, lat))
}

/// Ray-casting containment over a closed vertex ring.
///
/// Points on the boundary count as inside. Vertical edges toggle whenever
/// the probe x is left of them; all other edges use the interpolated
/// crossing.
pub fn point_in_polygon(point: &Position, polygon: &[Position]) -> bool {
    let n = polygon.len();
    if n == 0 {
        return false;
    }
    let x = point.lng;
    let y = point.lat;
    let mut inside = false;

    let mut p1 = polygon[0];
    for i in 0..=n {
        let p2 = polygon[i % n];

        if point_on_segment(x, y, p1.lng, p1.lat, p2.lng, p2.lat) {
            return true;
        }

        if y > p1.lat.min(p2.lat) && y <= p1.lat.max(p2.lat) && x <= p1.lng.max(p2.lng) {
            let x_crossing = (y - p1.lat) * (p2.lng - p1.lng) / (p2.lat - p1.lat) + p1.lng;
            if p1.lng == p2.lng || x <= x_crossing {
                inside = !inside;
            }
        }

        p1 = p2;
    }
    inside
}

/// Collinear within tolerance and between the endpoints.
fn point_on_segment(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> bool {
    let cross = (py - y1) * (x2 - x1) - (px - x1) * (y2 - y1);
    if cross.abs() > 1e-12 {
        return false;
    }
    let dot = (px - x1) * (px - x2) + (py - y1) * (py - y2);
    dot <= 0.0
}

/// Full-validation containment check for a well-formed region: the ring must
/// hold at least four vertices and close on itself, otherwise the answer is
/// `None`.
pub fn is_in_region(position: &Position, region: &Region) -> Option<bool> {
    if !position.is_valid() {
        return None;
    }
    let vertices = &region.vertices;
    if vertices.len() < 4 {
        return None;
    }

    let first = vertices[0];
    let last = vertices[vertices.len() - 1];
    if !first.is_valid() || !last.is_valid() {
        return None;
    }
    if first.lng != last.lng || first.lat != last.lat {
        return None;
    }

    Some(point_in_polygon(position, vertices))
}

/// Whether the straight segment from `start` to `end` stays clear of every
/// restricted area. Regions with fewer than three vertices are skipped.
pub fn is_valid_move(start: &Position, end: &Position, regions: &[Region]) -> bool {
    for region in regions {
        if region.vertices.len() < 3 {
            continue;
        }

        // Endpoint first: the most common failure.
        if point_in_polygon(end, &region.vertices) {
            return false;
        }

        for i in 1..SEGMENT_SAMPLES {
            let t = i as f64 / SEGMENT_SAMPLES as f64;
            let sample = Position::new(
                start.lng + t * (end.lng - start.lng),
                start.lat + t * (end.lat - start.lat),
            );
            if point_in_polygon(&sample, &region.vertices) {
                return false;
            }
        }
    }
    true
}
