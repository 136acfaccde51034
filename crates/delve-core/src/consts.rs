//! Default generation parameters
//!
//! These mirror the values the generator was tuned with.

/// Canvas dimensions (continuous space the seed points live in)
pub const CANVAS_WIDTH: f64 = 800.0;
pub const CANVAS_HEIGHT: f64 = 800.0;

/// Seed point sampling
pub const POINT_COUNT: usize = 100;
pub const POINT_SPACING: f64 = 100.0;
pub const POINT_BORDER_OFFSET: f64 = 50.0;
pub const POINT_MAX_TRIES: u32 = 100;

/// Grid dimension (tiles per side)
pub const DUNGEON_SIZE: usize = 50;

/// Room footprint limits (inclusive)
pub const MIN_ROOM_SIZE: u32 = 3;
pub const MAX_ROOM_SIZE: u32 = 5;

/// Hop budget for the "already close in the graph" check
pub const CIRCULAR_PATH_DEPTH: u32 = 4;

/// Circular paths may span at most this many point spacings
pub const CIRCULAR_PATH_SPACING_FACTOR: f64 = 2.0;

/// Drilling step cap per grid tile when none is configured
pub const DRILL_STEPS_PER_TILE: usize = 4;
