//! Wall segments between tiles

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{Orientation, TilePos};

/// Index into the grid's wall arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WallId(pub usize);

/// Wall classification
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum WallKind {
    /// Not yet classified, or between two empty tiles
    #[default]
    None = 0,
    /// Impassable
    Solid = 1,
    /// Open passage inside one owner
    Gap = 2,
    /// Connector between two owners
    Door = 3,
}

impl WallKind {
    pub const fn is_passable(self) -> bool {
        matches!(self, WallKind::Gap | WallKind::Door)
    }

    pub const fn symbol(self, orientation: Orientation) -> char {
        match (self, orientation) {
            (WallKind::None | WallKind::Gap, _) => ' ',
            (WallKind::Door, _) => '+',
            (WallKind::Solid, Orientation::Horizontal) => '-',
            (WallKind::Solid, Orientation::Vertical) => '|',
        }
    }
}

/// Boundary segment, shared by the two tiles it separates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wall {
    /// Horizontal walls sit on the north edge of `pos`, vertical walls
    /// on its west edge. Coordinates may equal the grid size for the
    /// south and east borders.
    pub pos: TilePos,
    pub orientation: Orientation,
    pub kind: WallKind,
}

impl Wall {
    pub fn new(pos: TilePos, orientation: Orientation) -> Self {
        Self {
            pos,
            orientation,
            kind: WallKind::None,
        }
    }

    /// Stable textual id, e.g. `hx3y4` or `x3y4`
    pub fn label(&self) -> String {
        let prefix = match self.orientation {
            Orientation::Horizontal => "h",
            Orientation::Vertical => "",
        };
        format!("{prefix}x{}y{}", self.pos.x, self.pos.y)
    }
}
