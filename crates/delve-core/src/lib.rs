//! delve-core: seeded room-and-corridor dungeon generation
//!
//! Samples well-spaced seed points, links them with a spanning tree plus
//! a few short loops, grows a room around each point and drills corridors
//! along every link. The result is a square grid of tiles with classified
//! walls between them.
//!
//! ```no_run
//! use delve_core::{Dungeon, GeneratorConfig};
//!
//! let dungeon = Dungeon::generate(&GeneratorConfig::default(), 42)?;
//! println!("{} rooms", dungeon.rooms().len());
//! # Ok::<(), delve_core::GenError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod consts;
pub mod corridor;
pub mod dungeon;
pub mod error;
pub mod graph;
pub mod grid;
pub mod points;
pub mod rng;
pub mod rooms;
pub mod walls;

pub use analysis::DungeonStats;
pub use config::GeneratorConfig;
pub use corridor::{Corridor, CorridorId};
pub use dungeon::{Dungeon, WallPartition, WallView};
pub use error::{GenError, GenResult};
pub use grid::{Direction, Grid, Orientation, Owner, Tile, TileKind, TilePos, Wall, WallId, WallKind};
pub use points::{Point, PointId};
pub use rng::DungeonRng;
pub use rooms::{Room, RoomId};
