//! Seed point sampling
//!
//! Rejection-samples points in canvas space, keeping every pair at least
//! the configured spacing apart. Sampling gives up after a run of
//! consecutive rejections; a sparser dungeon is an accepted outcome.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::grid::TilePos;
use crate::rng::DungeonRng;
use crate::rooms::RoomId;

/// Index of a point in the point list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(pub usize);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// A sampled seed location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    pub x: f64,
    pub y: f64,
    /// Undirected adjacency, stored on both endpoints
    pub connections: Vec<PointId>,
    /// Tile the point falls in, once rooms are carved
    pub tile: Option<TilePos>,
    /// Room seeded by this point
    pub room: Option<RoomId>,
}

impl Point {
    pub fn new(id: PointId, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            connections: Vec::new(),
            tile: None,
            room: None,
        }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_connected_to(&self, other: PointId) -> bool {
        self.connections.contains(&other)
    }
}

/// Record an undirected connection on both endpoints
pub fn connect(points: &mut [Point], a: PointId, b: PointId) {
    points[a.0].connections.push(b);
    points[b.0].connections.push(a);
}

/// Sample up to `config.point_count` points
pub fn sample_points(config: &GeneratorConfig, rng: &mut DungeonRng) -> Vec<Point> {
    let mut points = Vec::with_capacity(config.point_count);
    extend_points(&mut points, config, rng);
    points
}

/// Add points to an existing set until the target count is reached or the
/// retry budget runs out
pub fn extend_points(points: &mut Vec<Point>, config: &GeneratorConfig, rng: &mut DungeonRng) {
    let (min_x, min_y, max_x, max_y) = config.sampling_bounds();
    let mut tries = 0;

    while points.len() < config.point_count && tries < config.point_max_tries {
        let x = rng.range_f64(min_x, max_x);
        let y = rng.range_f64(min_y, max_y);
        let candidate = Point::new(PointId(points.len()), x, y);

        let too_close = points
            .iter()
            .any(|p| p.distance(&candidate) < config.point_spacing);
        if too_close {
            tries += 1;
            continue;
        }

        tries = 0;
        points.push(candidate);
    }

    if points.len() < config.point_count {
        log::warn!(
            "placed {} of {} points before {} consecutive rejections",
            points.len(),
            config.point_count,
            config.point_max_tries
        );
    }
}
