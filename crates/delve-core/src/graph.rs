//! Room connectivity graph
//!
//! Builds the list of point pairs that corridors will be drilled for:
//! 1. A minimum spanning tree (Prim's) so every point is reachable
//! 2. Extra "circular path" edges between nearby points that are not
//!    already a few hops apart, giving the layout some loops

use serde::{Deserialize, Serialize};

use crate::points::{Point, PointId, connect};
use crate::rng::DungeonRng;

/// A pair of points to join with a corridor, drilled from `from` to `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: PointId,
    pub to: PointId,
}

impl Edge {
    pub fn new(from: PointId, to: PointId) -> Self {
        Self { from, to }
    }
}

/// Prim's minimum spanning tree over euclidean distance
///
/// Connections are recorded on the points. Each edge runs from the newly
/// reached point to the tree point it attaches to. Naive O(P³) scan; point
/// counts stay small.
pub fn minimum_spanning_tree(points: &mut [Point]) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(points.len().saturating_sub(1));
    if points.is_empty() {
        return edges;
    }

    let mut visited: Vec<PointId> = vec![points[0].id];
    let mut unvisited: Vec<PointId> = points[1..].iter().map(|p| p.id).collect();

    while !unvisited.is_empty() {
        let mut best: Option<(f64, usize, usize)> = None;
        for (ui, &u) in unvisited.iter().enumerate() {
            for (vi, &v) in visited.iter().enumerate() {
                let distance = points[u.0].distance(&points[v.0]);
                if best.is_none_or(|(d, _, _)| distance < d) {
                    best = Some((distance, ui, vi));
                }
            }
        }

        let Some((_, ui, vi)) = best else {
            break;
        };
        let u = unvisited.remove(ui);
        let v = visited[vi];
        connect(points, u, v);
        edges.push(Edge::new(u, v));
        visited.push(u);
    }

    edges
}

/// Add loop-forming edges between nearby points
///
/// For each point, the first other point within `max_distance` that is not
/// reachable within `max_depth` hops gets connected. At most one new edge
/// per point.
pub fn add_circular_paths(
    points: &mut [Point],
    edges: &mut Vec<Edge>,
    max_depth: u32,
    max_distance: f64,
    rng: &mut DungeonRng,
) -> usize {
    let mut added = 0;
    for a in 0..points.len() {
        for b in 0..points.len() {
            if a == b {
                continue;
            }
            if points[a].distance(&points[b]) > max_distance {
                continue;
            }
            let (from, to) = (points[a].id, points[b].id);
            if reachable_within(points, from, to, max_depth, rng) {
                continue;
            }
            connect(points, from, to);
            edges.push(Edge::new(from, to));
            added += 1;
            break;
        }
    }
    added
}

/// Bounded-depth search through existing connections
///
/// Expands the frontier in random order; the order only affects how much
/// work is done, not the answer. Neighbours of the start are at depth 0.
pub fn reachable_within(
    points: &[Point],
    start: PointId,
    target: PointId,
    max_depth: u32,
    rng: &mut DungeonRng,
) -> bool {
    let mut best_depth: Vec<Option<u32>> = vec![None; points.len()];
    best_depth[start.0] = Some(0);
    let mut frontier: Vec<(PointId, u32)> = vec![(start, 0)];

    while !frontier.is_empty() {
        let (point, depth) = frontier.swap_remove(rng.index(frontier.len()));
        for &next in &points[point.0].connections {
            if next == target {
                return true;
            }
            if depth >= max_depth {
                continue;
            }
            let next_depth = depth + 1;
            if best_depth[next.0].is_some_and(|d| d <= next_depth) {
                continue;
            }
            best_depth[next.0] = Some(next_depth);
            frontier.push((next, next_depth));
        }
    }
    false
}
