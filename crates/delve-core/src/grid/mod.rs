//! Tile lattice and the wall lattice between tiles
//!
//! Tiles and walls live in dense arenas indexed by integer coordinates.
//! Every interior wall is a single [`Wall`] referenced from the wall
//! slots of both tiles it separates, so the two sides can never disagree.

mod direction;
mod tile;
mod wall;

pub use direction::{Direction, Orientation};
pub use tile::{Owner, Tile, TileKind, TilePos};
pub use wall::{Wall, WallId, WallKind};

use serde::{Deserialize, Serialize};

/// Square grid of tiles with the walls around them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    tiles: Vec<Tile>,
    walls: Vec<Wall>,
}

impl Grid {
    /// Allocate a `size`x`size` grid with unclaimed tiles and
    /// unclassified walls
    pub fn new(size: usize) -> Self {
        let horizontal = size * (size + 1);
        let mut walls = Vec::with_capacity(2 * horizontal);
        for y in 0..=size {
            for x in 0..size {
                walls.push(Wall::new(TilePos::new(x, y), Orientation::Horizontal));
            }
        }
        for y in 0..size {
            for x in 0..=size {
                walls.push(Wall::new(TilePos::new(x, y), Orientation::Vertical));
            }
        }

        let mut tiles = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                let north = WallId(y * size + x);
                let south = WallId((y + 1) * size + x);
                let west = WallId(horizontal + y * (size + 1) + x);
                let east = WallId(horizontal + y * (size + 1) + x + 1);
                tiles.push(Tile {
                    pos: TilePos::new(x, y),
                    owner: None,
                    walls: [north, east, south, west],
                });
            }
        }

        Self { size, tiles, walls }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, pos: TilePos) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    fn index(&self, pos: TilePos) -> usize {
        debug_assert!(self.in_bounds(pos), "tile {pos} outside grid");
        pos.y * self.size + pos.x
    }

    pub fn tile(&self, pos: TilePos) -> &Tile {
        &self.tiles[self.index(pos)]
    }

    pub fn get(&self, pos: TilePos) -> Option<&Tile> {
        self.in_bounds(pos).then(|| self.tile(pos))
    }

    /// Tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn walls(&self) -> impl Iterator<Item = (WallId, &Wall)> {
        self.walls.iter().enumerate().map(|(i, w)| (WallId(i), w))
    }

    pub fn wall(&self, id: WallId) -> &Wall {
        &self.walls[id.0]
    }

    pub fn owner(&self, pos: TilePos) -> Option<Owner> {
        self.tile(pos).owner
    }

    pub fn kind(&self, pos: TilePos) -> TileKind {
        self.tile(pos).kind()
    }

    pub fn neighbor(&self, pos: TilePos, dir: Direction) -> Option<TilePos> {
        pos.step(dir, self.size)
    }

    /// In-grid neighbours with the direction leading to them
    pub fn neighbors(&self, pos: TilePos) -> impl Iterator<Item = (Direction, TilePos)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.neighbor(pos, dir).map(|n| (dir, n)))
    }

    pub fn wall_kind(&self, pos: TilePos, dir: Direction) -> WallKind {
        self.wall(self.tile(pos).wall(dir)).kind
    }

    pub fn set_wall_kind(&mut self, pos: TilePos, dir: Direction, kind: WallKind) {
        let id = self.tile(pos).wall(dir);
        self.walls[id.0].kind = kind;
    }

    pub(crate) fn set_wall_kind_by_id(&mut self, id: WallId, kind: WallKind) {
        self.walls[id.0].kind = kind;
    }

    pub(crate) fn set_owner(&mut self, pos: TilePos, owner: Option<Owner>) {
        let idx = self.index(pos);
        self.tiles[idx].owner = owner;
    }

    /// Wall whose anchor is `pos`: the north edge of tile `pos` for
    /// horizontal walls, the west edge for vertical ones
    pub fn wall_at(&self, pos: TilePos, orientation: Orientation) -> Option<WallId> {
        let size = self.size;
        match orientation {
            Orientation::Horizontal if pos.x < size && pos.y <= size => {
                Some(WallId(pos.y * size + pos.x))
            }
            Orientation::Vertical if pos.x <= size && pos.y < size => {
                Some(WallId(size * (size + 1) + pos.y * (size + 1) + pos.x))
            }
            _ => None,
        }
    }

    /// The tiles on either side of a wall; `None` past the grid border
    pub fn wall_sides(&self, id: WallId) -> (Option<TilePos>, Option<TilePos>) {
        let wall = self.wall(id);
        let pos = wall.pos;
        match wall.orientation {
            Orientation::Horizontal => {
                let north = pos.y.checked_sub(1).map(|y| TilePos::new(pos.x, y));
                let south = (pos.y < self.size).then_some(pos);
                (north, south)
            }
            Orientation::Vertical => {
                let west = pos.x.checked_sub(1).map(|x| TilePos::new(x, pos.y));
                let east = (pos.x < self.size).then_some(pos);
                (west, east)
            }
        }
    }

    /// Tile that contains a canvas-space point, clamped onto the grid
    pub fn tile_at_point(&self, px: f64, py: f64, tile_size: f64) -> Option<TilePos> {
        if self.size == 0 || !(px >= 0.0 && py >= 0.0) {
            return None;
        }
        let x = ((px / tile_size).floor() as usize).min(self.size - 1);
        let y = ((py / tile_size).floor() as usize).min(self.size - 1);
        Some(TilePos::new(x, y))
    }
}
