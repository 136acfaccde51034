//! ASCII map rendering
//!
//! Each tile takes one character with a wall character on every side, so
//! an `n`x`n` grid renders as `(2n+1)` lines of `2n+1` characters.

use delve_core::{Dungeon, DungeonStats, Grid, Orientation, TilePos, WallKind};

/// Corner post: drawn when a solid wall runs into it
fn corner_char(grid: &Grid, x: usize, y: usize) -> char {
    let solid = |pos: TilePos, orientation| {
        grid.wall_at(pos, orientation)
            .is_some_and(|id| grid.wall(id).kind == WallKind::Solid)
    };
    let left = x > 0 && solid(TilePos::new(x - 1, y), Orientation::Horizontal);
    let right = solid(TilePos::new(x, y), Orientation::Horizontal);
    let up = y > 0 && solid(TilePos::new(x, y - 1), Orientation::Vertical);
    let down = solid(TilePos::new(x, y), Orientation::Vertical);
    match (left || right, up || down) {
        (true, _) => '-',
        (false, true) => '|',
        (false, false) => ' ',
    }
}

pub fn render_ascii(grid: &Grid) -> String {
    let size = grid.size();
    let mut out = String::with_capacity((2 * size + 2) * (2 * size + 1));

    for y in 0..=size {
        // Wall row above tile row `y`
        for x in 0..=size {
            out.push(corner_char(grid, x, y));
            if x < size {
                let kind = grid
                    .wall_at(TilePos::new(x, y), Orientation::Horizontal)
                    .map_or(WallKind::None, |id| grid.wall(id).kind);
                out.push(kind.symbol(Orientation::Horizontal));
            }
        }
        out.push('\n');

        if y == size {
            break;
        }
        for x in 0..=size {
            let kind = grid
                .wall_at(TilePos::new(x, y), Orientation::Vertical)
                .map_or(WallKind::None, |id| grid.wall(id).kind);
            out.push(kind.symbol(Orientation::Vertical));
            if x < size {
                out.push(grid.kind(TilePos::new(x, y)).symbol());
            }
        }
        out.push('\n');
    }
    out
}

pub fn render_summary(dungeon: &Dungeon) -> String {
    let stats = DungeonStats::collect(dungeon);
    let mut lines = vec![
        format!("seed:       {}", dungeon.seed()),
        format!("points:     {}", stats.points),
        format!(
            "edges:      {} tree + {} circular",
            stats.tree_edges, stats.circular_edges
        ),
        format!("rooms:      {} ({} tiles)", stats.rooms, stats.room_tiles),
        format!(
            "corridors:  {} ({} tiles)",
            stats.corridors, stats.corridor_tiles
        ),
        format!(
            "walls:      {} solid, {} gaps, {} doors",
            stats.solid_walls, stats.gaps, stats.doors
        ),
    ];
    if stats.unreachable_tiles > 0 {
        lines.push(format!("unreachable: {} tiles", stats.unreachable_tiles));
    }
    lines.join("\n")
}
