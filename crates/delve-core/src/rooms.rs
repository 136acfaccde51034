//! Room carving
//!
//! Every seed point becomes the core tile of a room, which is then grown
//! into a rectangle of random size around it. Rooms never take tiles
//! that another room already owns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::error::{GenError, GenResult};
use crate::grid::{Grid, Owner, TilePos};
use crate::points::{Point, PointId};
use crate::rng::DungeonRng;

/// Index of a room in the room list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub usize);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// A rectangular-ish cluster of tiles anchored at a core tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    /// Point that seeded this room
    pub seed: PointId,
    /// Always the first entry of `tiles`
    pub core: TilePos,
    pub tiles: Vec<TilePos>,
    pub width: u32,
    pub height: u32,
}

impl Room {
    pub fn new(id: RoomId, seed: PointId, core: TilePos) -> Self {
        Self {
            id,
            seed,
            core,
            tiles: vec![core],
            width: 1,
            height: 1,
        }
    }

    pub fn owner(&self) -> Owner {
        Owner::Room(self.id)
    }

    /// Room tile nearest to `target`; the core wins ties
    pub fn closest_tile(&self, target: TilePos) -> TilePos {
        self.tiles
            .iter()
            .copied()
            .min_by_key(|t| t.distance_sq(target))
            .unwrap_or(self.core)
    }
}

/// Draw a footprint in `min..=max`, redrawing one side at random while
/// square rooms are disallowed and the sides match
fn draw_footprint(config: &GeneratorConfig, rng: &mut DungeonRng) -> (u32, u32) {
    let (min, max) = (config.min_room_size, config.max_room_size);
    let mut width = rng.range_inclusive(min, max);
    let mut height = rng.range_inclusive(min, max);
    while !config.allow_square_rooms && width == height && min < max {
        if rng.coin() {
            width = rng.range_inclusive(min, max);
        } else {
            height = rng.range_inclusive(min, max);
        }
    }
    (width, height)
}

/// Offsets `-floor(size/2) .. ceil(size/2)` around the core
fn span(size: u32) -> std::ops::Range<i64> {
    let size = size as i64;
    -(size / 2)..(size - size / 2)
}

/// Create one room per seed point and grow each to its footprint
///
/// Rooms are numbered in row-major order of their core tiles. Two points
/// landing in the same tile is an error.
pub fn carve_rooms(
    grid: &mut Grid,
    points: &mut [Point],
    config: &GeneratorConfig,
    rng: &mut DungeonRng,
) -> GenResult<Vec<Room>> {
    let tile_size = config.tile_size();

    let mut cores: Vec<(TilePos, PointId)> = Vec::with_capacity(points.len());
    for point in points.iter() {
        let Some(pos) = grid.tile_at_point(point.x, point.y, tile_size) else {
            return Err(GenError::invalid(format!(
                "point {} at ({:.1}, {:.1}) lies outside the grid",
                point.id, point.x, point.y
            )));
        };
        cores.push((pos, point.id));
    }
    cores.sort_by_key(|&(pos, id)| (pos.y, pos.x, id));

    let mut rooms: Vec<Room> = Vec::with_capacity(cores.len());
    for &(pos, seed) in &cores {
        if let Some(owner) = grid.owner(pos) {
            let first = match owner {
                Owner::Room(id) => rooms[id.0].seed,
                Owner::Corridor(_) => seed,
            };
            return Err(GenError::RoomCollision {
                tile: pos,
                first,
                second: seed,
            });
        }
        let id = RoomId(rooms.len());
        grid.set_owner(pos, Some(Owner::Room(id)));
        points[seed.0].tile = Some(pos);
        points[seed.0].room = Some(id);
        rooms.push(Room::new(id, seed, pos));
    }

    let size = grid.size() as i64;
    for room in &mut rooms {
        let (width, height) = draw_footprint(config, rng);
        room.width = width;
        room.height = height;

        for dx in span(width) {
            for dy in span(height) {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let x = room.core.x as i64 + dx;
                let y = room.core.y as i64 + dy;
                if x < 0 || y < 0 || x >= size || y >= size {
                    continue;
                }
                let pos = TilePos::new(x as usize, y as usize);
                if grid.owner(pos).is_some() {
                    continue;
                }
                grid.set_owner(pos, Some(room.owner()));
                room.tiles.push(pos);
            }
        }
        keep_connected_to_core(grid, room);
    }

    log::debug!("carved {} rooms", rooms.len());
    Ok(rooms)
}

/// Release room tiles cut off from the core by earlier rooms
fn keep_connected_to_core(grid: &mut Grid, room: &mut Room) {
    let mut reached = vec![room.core];
    let mut frontier = vec![room.core];
    while let Some(pos) = frontier.pop() {
        for (_, n) in grid.neighbors(pos) {
            if grid.owner(n) == Some(room.owner()) && !reached.contains(&n) {
                reached.push(n);
                frontier.push(n);
            }
        }
    }
    if reached.len() == room.tiles.len() {
        return;
    }

    for &pos in &room.tiles {
        if !reached.contains(&pos) {
            grid.set_owner(pos, None);
        }
    }
    room.tiles.retain(|t| reached.contains(t));
    log::debug!("{} lost tiles cut off from its core", room.id);
}
