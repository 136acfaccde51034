//! Structural checks and statistics over a finished dungeon

use std::collections::BTreeSet;

use serde::Serialize;

use crate::dungeon::Dungeon;
use crate::grid::{Grid, Owner, TileKind, TilePos, WallId, WallKind};
use crate::walls::{next_parallel, same_sides};

/// Claimed tiles reachable from `start` through gaps and doors,
/// indexed row-major
pub fn reachable_tiles(grid: &Grid, start: TilePos) -> Vec<bool> {
    let size = grid.size();
    let mut reached = vec![false; size * size];
    if !grid.in_bounds(start) || grid.owner(start).is_none() {
        return reached;
    }
    reached[start.y * size + start.x] = true;
    let mut stack = vec![start];
    while let Some(pos) = stack.pop() {
        for (dir, n) in grid.neighbors(pos) {
            let idx = n.y * size + n.x;
            if reached[idx] || grid.owner(n).is_none() {
                continue;
            }
            if grid.wall_kind(pos, dir).is_passable() {
                reached[idx] = true;
                stack.push(n);
            }
        }
    }
    reached
}

/// Whether every room can be walked to from the first one
pub fn is_connected(dungeon: &Dungeon) -> bool {
    let Some(first) = dungeon.rooms().first() else {
        return true;
    };
    let grid = dungeon.grid();
    let size = grid.size();
    let reached = reachable_tiles(grid, first.core);
    dungeon
        .rooms()
        .iter()
        .all(|room| reached[room.core.y * size + room.core.x])
}

/// Pairs of side-by-side parallel doors joining the same two owners
pub fn redundant_door_pairs(grid: &Grid) -> Vec<(WallId, WallId)> {
    grid.walls()
        .filter(|(_, w)| w.kind == WallKind::Door)
        .filter_map(|(id, _)| {
            let next = next_parallel(grid, id)?;
            (grid.wall(next).kind == WallKind::Door && same_sides(grid, id, next))
                .then_some((id, next))
        })
        .collect()
}

/// Verify the structural invariants of a dungeon
///
/// Returns a description of the first violation found.
pub fn check_invariants(dungeon: &Dungeon) -> Result<(), String> {
    let grid = dungeon.grid();

    let mut listed: BTreeSet<TilePos> = BTreeSet::new();
    for room in dungeon.rooms() {
        if room.tiles.first() != Some(&room.core) {
            return Err(format!("{} does not list its core {} first", room.id, room.core));
        }
        for &pos in &room.tiles {
            if grid.owner(pos) != Some(room.owner()) {
                return Err(format!("{} lists {pos} owned by {:?}", room.id, grid.owner(pos)));
            }
            if !listed.insert(pos) {
                return Err(format!("{pos} is listed twice"));
            }
        }
    }

    for corridor in dungeon.corridors() {
        if corridor.tiles.is_empty() {
            return Err(format!("{} has no tiles", corridor.id));
        }
        for &pos in &corridor.tiles {
            if grid.owner(pos) != Some(corridor.owner()) {
                return Err(format!(
                    "{} lists {pos} owned by {:?}",
                    corridor.id,
                    grid.owner(pos)
                ));
            }
            if !listed.insert(pos) {
                return Err(format!("{pos} is listed twice"));
            }
        }
        if !is_contiguous(grid, corridor.owner(), &corridor.tiles) {
            return Err(format!("{} is split into pieces", corridor.id));
        }
    }

    let claimed = grid.tiles().filter(|t| t.is_claimed()).count();
    if claimed != listed.len() {
        return Err(format!(
            "{claimed} claimed tiles but {} appear in room or corridor lists",
            listed.len()
        ));
    }

    for point in dungeon.points() {
        for &other in &point.connections {
            if !dungeon.points()[other.0].is_connected_to(point.id) {
                return Err(format!("{} -> {other} has no reverse connection", point.id));
            }
        }
    }

    for (id, wall) in grid.walls() {
        if wall.kind != WallKind::Door {
            continue;
        }
        let (a, b) = grid.wall_sides(id);
        let a = a.and_then(|p| grid.owner(p));
        let b = b.and_then(|p| grid.owner(p));
        if a.is_none() || b.is_none() || a == b {
            return Err(format!("door {} does not join two owners", wall.label()));
        }
    }

    Ok(())
}

/// Tiles of one owner form a single 4-connected piece
fn is_contiguous(grid: &Grid, owner: Owner, tiles: &[TilePos]) -> bool {
    let Some(&first) = tiles.first() else {
        return true;
    };
    let mut seen = BTreeSet::from([first]);
    let mut stack = vec![first];
    while let Some(pos) = stack.pop() {
        for (_, n) in grid.neighbors(pos) {
            if grid.owner(n) == Some(owner) && seen.insert(n) {
                stack.push(n);
            }
        }
    }
    seen.len() == tiles.len()
}

/// Headline numbers for a dungeon
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DungeonStats {
    pub rooms: usize,
    pub corridors: usize,
    pub points: usize,
    pub tree_edges: usize,
    pub circular_edges: usize,
    pub room_tiles: usize,
    pub corridor_tiles: usize,
    pub empty_tiles: usize,
    pub solid_walls: usize,
    pub gaps: usize,
    pub doors: usize,
    /// Claimed tiles that cannot be walked to from the first room
    pub unreachable_tiles: usize,
}

impl DungeonStats {
    pub fn collect(dungeon: &Dungeon) -> Self {
        let grid = dungeon.grid();
        let mut stats = DungeonStats {
            rooms: dungeon.rooms().len(),
            corridors: dungeon.corridor_set().len(),
            points: dungeon.points().len(),
            tree_edges: dungeon.tree_edges().len(),
            circular_edges: dungeon.circular_edges().len(),
            ..Default::default()
        };

        for tile in grid.tiles() {
            match tile.kind() {
                TileKind::Room => stats.room_tiles += 1,
                TileKind::Corridor => stats.corridor_tiles += 1,
                TileKind::None => stats.empty_tiles += 1,
            }
        }
        for (_, wall) in grid.walls() {
            match wall.kind {
                WallKind::Solid => stats.solid_walls += 1,
                WallKind::Gap => stats.gaps += 1,
                WallKind::Door => stats.doors += 1,
                WallKind::None => {}
            }
        }

        if let Some(first) = dungeon.rooms().first() {
            let reached = reachable_tiles(grid, first.core);
            stats.unreachable_tiles = grid
                .tiles()
                .filter(|t| t.is_claimed() && !reached[t.pos.y * grid.size() + t.pos.x])
                .count();
        }
        stats
    }
}
