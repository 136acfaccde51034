//! Wall classification
//!
//! Runs once drilling is finished. Doors placed by the driller are kept;
//! every other wall is derived from the owners on its two sides.

use crate::grid::{Grid, Orientation, TilePos, WallId, WallKind};

/// Derive every non-door wall from tile ownership
///
/// - same owner on both sides: `Gap`
/// - touches at least one claimed tile otherwise: `Solid`
/// - nothing claimed on either side: `None`
///
/// Running it twice gives the same grid.
pub fn classify_walls(grid: &mut Grid) {
    let ids: Vec<WallId> = grid.walls().map(|(id, _)| id).collect();
    for id in ids {
        if grid.wall(id).kind == WallKind::Door {
            continue;
        }
        let (a, b) = grid.wall_sides(id);
        let a = a.and_then(|pos| grid.owner(pos));
        let b = b.and_then(|pos| grid.owner(pos));
        let kind = match (a, b) {
            (None, None) => WallKind::None,
            (Some(a), Some(b)) if a == b => WallKind::Gap,
            _ => WallKind::Solid,
        };
        grid.set_wall_kind_by_id(id, kind);
    }
}

/// Demote doors that sit directly beside a parallel door joining the
/// same two owners, keeping the first one in wall order
///
/// The driller already walls up a fresh door beside a parallel one
/// between a room and a corridor. What reaches this pass is mostly doors
/// between two rooms that touch along several tiles, plus the odd pair
/// left when a run stops on a hit first. The tiles on each side of such a
/// pair share an owner, so the kept door still joins both areas. Returns
/// the number of doors removed.
pub fn prune_redundant_doors(grid: &mut Grid) -> usize {
    let mut removed = 0;
    let ids: Vec<WallId> = grid.walls().map(|(id, _)| id).collect();
    for id in ids {
        if grid.wall(id).kind != WallKind::Door {
            continue;
        }
        let Some(next) = next_parallel(grid, id) else {
            continue;
        };
        if grid.wall(next).kind == WallKind::Door && same_sides(grid, id, next) {
            grid.set_wall_kind_by_id(next, WallKind::Solid);
            removed += 1;
        }
    }
    if removed > 0 {
        log::debug!("removed {removed} redundant doors");
    }
    removed
}

/// Neighbouring wall along the same line: east for horizontal walls,
/// south for vertical ones
pub(crate) fn next_parallel(grid: &Grid, id: WallId) -> Option<WallId> {
    let wall = grid.wall(id);
    let pos = wall.pos;
    let next = match wall.orientation {
        Orientation::Horizontal => TilePos::new(pos.x + 1, pos.y),
        Orientation::Vertical => TilePos::new(pos.x, pos.y + 1),
    };
    grid.wall_at(next, wall.orientation)
}

/// Both walls join the same owner on the same side
pub(crate) fn same_sides(grid: &Grid, a: WallId, b: WallId) -> bool {
    let owners = |id| {
        let (first, second) = grid.wall_sides(id);
        (
            first.and_then(|pos| grid.owner(pos)),
            second.and_then(|pos| grid.owner(pos)),
        )
    };
    let (a1, a2) = owners(a);
    let (b1, b2) = owners(b);
    a1.is_some() && a2.is_some() && a1 == b1 && a2 == b2
}
