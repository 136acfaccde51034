//! Grid tiles and their owners

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{Direction, WallId};
use crate::corridor::CorridorId;
use crate::rooms::RoomId;

/// Integer grid coordinate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct TilePos {
    pub x: usize,
    pub y: usize,
}

impl TilePos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance in tiles
    pub fn distance_sq(self, other: TilePos) -> usize {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx * dx + dy * dy
    }

    /// Neighbour in `dir`, or None when it would leave a `size`x`size` grid
    pub fn step(self, dir: Direction, size: usize) -> Option<TilePos> {
        let (dx, dy) = dir.offset();
        let nx = self.x as i64 + dx as i64;
        let ny = self.y as i64 + dy as i64;
        if nx < 0 || ny < 0 || nx >= size as i64 || ny >= size as i64 {
            return None;
        }
        Some(TilePos::new(nx as usize, ny as usize))
    }

    /// Direction from `self` to an orthogonally adjacent `other`
    pub fn direction_to(self, other: TilePos) -> Option<Direction> {
        Direction::ALL.into_iter().find(|dir| {
            let (dx, dy) = dir.offset();
            self.x as i64 + dx as i64 == other.x as i64
                && self.y as i64 + dy as i64 == other.y as i64
        })
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// What claimed a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Owner {
    Room(RoomId),
    Corridor(CorridorId),
}

impl Owner {
    pub const fn kind(self) -> TileKind {
        match self {
            Owner::Room(_) => TileKind::Room,
            Owner::Corridor(_) => TileKind::Corridor,
        }
    }

    pub const fn corridor(self) -> Option<CorridorId> {
        match self {
            Owner::Corridor(id) => Some(id),
            Owner::Room(_) => None,
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Room(id) => write!(f, "{id}"),
            Owner::Corridor(id) => write!(f, "{id}"),
        }
    }
}

/// Tile type, derived from the owner
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum TileKind {
    #[default]
    None = 0,
    Room = 1,
    Corridor = 2,
}

impl TileKind {
    /// Map symbol
    pub const fn symbol(self) -> char {
        match self {
            TileKind::None => ' ',
            TileKind::Room => '.',
            TileKind::Corridor => '#',
        }
    }
}

/// One grid cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub pos: TilePos,
    /// Absent iff the tile is unclaimed
    pub owner: Option<Owner>,
    /// Wall slots N, E, S, W
    pub walls: [WallId; 4],
}

impl Tile {
    pub fn kind(&self) -> TileKind {
        self.owner.map_or(TileKind::None, Owner::kind)
    }

    pub fn is_claimed(&self) -> bool {
        self.owner.is_some()
    }

    pub fn wall(&self, dir: Direction) -> WallId {
        self.walls[dir.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_bounds() {
        let origin = TilePos::new(0, 0);
        assert_eq!(origin.step(Direction::North, 10), None);
        assert_eq!(origin.step(Direction::West, 10), None);
        assert_eq!(origin.step(Direction::East, 10), Some(TilePos::new(1, 0)));
        assert_eq!(origin.step(Direction::South, 10), Some(TilePos::new(0, 1)));
        assert_eq!(TilePos::new(9, 9).step(Direction::East, 10), None);
    }

    #[test]
    fn test_direction_to() {
        let p = TilePos::new(4, 4);
        assert_eq!(p.direction_to(TilePos::new(4, 3)), Some(Direction::North));
        assert_eq!(p.direction_to(TilePos::new(5, 4)), Some(Direction::East));
        assert_eq!(p.direction_to(TilePos::new(5, 5)), None);
    }

    #[test]
    fn test_kind_follows_owner() {
        let mut tile = Tile {
            pos: TilePos::new(1, 1),
            owner: None,
            walls: [WallId(0); 4],
        };
        assert_eq!(tile.kind(), TileKind::None);
        tile.owner = Some(Owner::Room(RoomId(0)));
        assert_eq!(tile.kind(), TileKind::Room);
        tile.owner = Some(Owner::Corridor(CorridorId(3)));
        assert_eq!(tile.kind(), TileKind::Corridor);
    }
}
