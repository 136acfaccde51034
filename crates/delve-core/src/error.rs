//! Generation errors

use thiserror::Error;

use crate::grid::TilePos;
use crate::points::PointId;

/// Errors that abort a generation run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Seed points {first} and {second} both fall in tile {tile}")]
    RoomCollision {
        tile: TilePos,
        first: PointId,
        second: PointId,
    },

    #[error("Corridor from {from} to {to} did not reach its target after {steps} steps")]
    DrillingStalled {
        from: TilePos,
        to: TilePos,
        steps: usize,
    },
}

impl GenError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        GenError::InvalidConfig {
            reason: reason.into(),
        }
    }
}

pub type GenResult<T> = Result<T, GenError>;
