//! Generator configuration
//!
//! Plain numeric and boolean knobs. Missing fields fall back to the
//! defaults in [`crate::consts`], so partial JSON documents are accepted.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GenError, GenResult};

/// Parameters for one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    // Continuous space
    pub canvas_width: f64,
    pub canvas_height: f64,

    // Point sampling
    pub point_count: usize,
    pub point_spacing: f64,
    pub point_border_offset: f64,
    pub point_max_tries: u32,

    // Grid and rooms
    pub dungeon_size: usize,
    pub min_room_size: u32,
    pub max_room_size: u32,
    pub allow_square_rooms: bool,

    // Circular paths
    pub circular_path_depth: u32,
    /// Defaults to twice the point spacing
    pub circular_path_max_distance: Option<f64>,

    // Drilling heuristics
    pub closest_start_tile: bool,
    pub closest_start_corridor: bool,
    pub closest_target_tile: bool,
    pub closest_target_corridor: bool,
    /// Defaults to a multiple of the tile count
    pub max_drill_steps: Option<usize>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            point_count: POINT_COUNT,
            point_spacing: POINT_SPACING,
            point_border_offset: POINT_BORDER_OFFSET,
            point_max_tries: POINT_MAX_TRIES,
            dungeon_size: DUNGEON_SIZE,
            min_room_size: MIN_ROOM_SIZE,
            max_room_size: MAX_ROOM_SIZE,
            allow_square_rooms: false,
            circular_path_depth: CIRCULAR_PATH_DEPTH,
            circular_path_max_distance: None,
            closest_start_tile: true,
            closest_start_corridor: true,
            closest_target_tile: true,
            closest_target_corridor: true,
            max_drill_steps: None,
        }
    }
}

impl GeneratorConfig {
    /// Side length of one tile in canvas units
    pub fn tile_size(&self) -> f64 {
        self.canvas_width.max(self.canvas_height) / self.dungeon_size as f64
    }

    /// Maximum distance between two points joined by a circular path
    pub fn circular_path_distance(&self) -> f64 {
        self.circular_path_max_distance
            .unwrap_or(self.point_spacing * CIRCULAR_PATH_SPACING_FACTOR)
    }

    /// Step cap for drilling one corridor
    pub fn drill_step_limit(&self) -> usize {
        self.max_drill_steps
            .unwrap_or(DRILL_STEPS_PER_TILE * self.dungeon_size * self.dungeon_size)
    }

    /// Sampling rectangle as `(min_x, min_y, max_x, max_y)`
    pub fn sampling_bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.point_border_offset,
            self.point_border_offset,
            self.canvas_width - self.point_border_offset,
            self.canvas_height - self.point_border_offset,
        )
    }

    /// Reject configurations that cannot produce a dungeon
    pub fn validate(&self) -> GenResult<()> {
        self.validate_layout()?;
        self.validate_sampling()
    }

    /// Grid, canvas and room size checks; enough for hand-placed points
    pub fn validate_layout(&self) -> GenResult<()> {
        if self.dungeon_size == 0 {
            return Err(GenError::invalid("dungeon_size must be positive"));
        }
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(GenError::invalid("canvas dimensions must be positive"));
        }
        if self.min_room_size == 0 {
            return Err(GenError::invalid("min_room_size must be positive"));
        }
        if self.min_room_size > self.max_room_size {
            return Err(GenError::invalid(format!(
                "min_room_size {} exceeds max_room_size {}",
                self.min_room_size, self.max_room_size
            )));
        }
        if self.min_room_size == self.max_room_size && !self.allow_square_rooms {
            return Err(GenError::invalid(
                "min_room_size == max_room_size requires allow_square_rooms",
            ));
        }
        Ok(())
    }

    /// Checks that only matter when seed points are sampled
    pub fn validate_sampling(&self) -> GenResult<()> {
        if !(self.point_spacing > 0.0) {
            return Err(GenError::invalid("point_spacing must be positive"));
        }
        if self.point_border_offset < 0.0 {
            return Err(GenError::invalid("point_border_offset must not be negative"));
        }

        let (min_x, min_y, max_x, max_y) = self.sampling_bounds();
        if max_x <= min_x || max_y <= min_y {
            return Err(GenError::invalid(
                "border offset leaves no room to place points",
            ));
        }
        let diagonal = (max_x - min_x).hypot(max_y - min_y);
        if self.point_count > 1 && self.point_spacing > diagonal {
            return Err(GenError::invalid(format!(
                "{} points cannot be spaced {} apart inside a {:.0}x{:.0} area",
                self.point_count,
                self.point_spacing,
                max_x - min_x,
                max_y - min_y
            )));
        }
        Ok(())
    }
}
