//! Thin HTTP wrappers around the geometry primitives.
//!
//! Contract quirk kept for compatibility: invalid input yields HTTP 200
//! with a null body rather than a 4xx.

use axum::Json;
use serde::Deserialize;

use dispatch_core::geo::{self, ANGLES};
use dispatch_core::{Position, Region};

/// Wire-side position with nullable coordinates; converts only when both
/// coordinates are present and in range.
#[derive(Debug, Deserialize)]
pub struct PositionDto {
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub lat: Option<f64>,
}

impl PositionDto {
    fn to_position(&self) -> Option<Position> {
        match (self.lng, self.lat) {
            (Some(lng), Some(lat)) => {
                let position = Position::new(lng, lat);
                position.is_valid().then_some(position)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DistanceRequest {
    #[serde(default)]
    pub position1: Option<PositionDto>,
    #[serde(default)]
    pub position2: Option<PositionDto>,
}

fn position_pair(request: &DistanceRequest) -> Option<(Position, Position)> {
    let p1 = request.position1.as_ref()?.to_position()?;
    let p2 = request.position2.as_ref()?.to_position()?;
    Some((p1, p2))
}

pub async fn distance_to(Json(request): Json<DistanceRequest>) -> Json<Option<f64>> {
    Json(position_pair(&request).and_then(|(p1, p2)| geo::distance(&p1, &p2)))
}

pub async fn is_close_to(Json(request): Json<DistanceRequest>) -> Json<Option<bool>> {
    Json(position_pair(&request).and_then(|(p1, p2)| geo::is_close(&p1, &p2)))
}

#[derive(Debug, Deserialize)]
pub struct NextPositionRequest {
    #[serde(default)]
    pub start: Option<PositionDto>,
    #[serde(default)]
    pub angle: Option<f64>,
}

pub async fn next_position(Json(request): Json<NextPositionRequest>) -> Json<Option<Position>> {
    let start = request.start.as_ref().and_then(PositionDto::to_position);
    let result = match (start, request.angle) {
        (Some(start), Some(angle)) if ANGLES.contains(&angle) => geo::next_position(&start, angle),
        _ => None,
    };
    Json(result)
}

#[derive(Debug, Deserialize)]
pub struct RegionDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vertices: Option<Vec<PositionDto>>,
}

#[derive(Debug, Deserialize)]
pub struct IsInRegionRequest {
    #[serde(default)]
    pub position: Option<PositionDto>,
    #[serde(default)]
    pub region: Option<RegionDto>,
}

pub async fn is_in_region(Json(request): Json<IsInRegionRequest>) -> Json<Option<bool>> {
    let position = request.position.as_ref().and_then(PositionDto::to_position);
    let region = request.region.as_ref().and_then(to_region);
    let result = match (position, region) {
        (Some(position), Some(region)) => geo::is_in_region(&position, &region),
        _ => None,
    };
    Json(result)
}

/// Raw vertex coordinates pass through untouched; ring validation (length,
/// closure, first/last validity) happens in the core check.
fn to_region(dto: &RegionDto) -> Option<Region> {
    let vertices = dto.vertices.as_ref()?;
    let mut converted = Vec::with_capacity(vertices.len());
    for vertex in vertices {
        converted.push(Position::new(vertex.lng?, vertex.lat?));
    }
    Some(Region {
        name: dto.name.clone(),
        vertices: converted,
    })
}
