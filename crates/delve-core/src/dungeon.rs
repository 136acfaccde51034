//! Generation pipeline and the finished dungeon
//!
//! A run goes grid → points → graph → rooms → corridors → walls. All
//! randomness flows through one [`DungeonRng`] seeded up front, so a
//! seed and a config fully determine the result.

use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::corridor::{Corridor, CorridorSet, drill_corridors};
use crate::error::GenResult;
use crate::graph::{Edge, add_circular_paths, minimum_spanning_tree};
use crate::grid::{Grid, Orientation, Owner, TilePos, WallId, WallKind};
use crate::points::{Point, PointId, sample_points};
use crate::rng::DungeonRng;
use crate::rooms::{Room, carve_rooms};
use crate::walls::{classify_walls, prune_redundant_doors};

/// A generated dungeon; read-only once built
#[derive(Debug, Clone, Serialize)]
pub struct Dungeon {
    seed: u64,
    config: GeneratorConfig,
    grid: Grid,
    points: Vec<Point>,
    edges: Vec<Edge>,
    /// How many of `edges` came from the spanning tree
    tree_edges: usize,
    rooms: Vec<Room>,
    corridors: CorridorSet,
}

/// One wall with the owners on either side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WallView {
    pub id: WallId,
    pub pos: TilePos,
    pub orientation: Orientation,
    pub kind: WallKind,
    /// North/west side first
    pub sides: (Option<Owner>, Option<Owner>),
}

/// Walls grouped by kind for rendering
#[derive(Debug, Clone, Default, Serialize)]
pub struct WallPartition {
    pub solid: Vec<WallView>,
    pub gap: Vec<WallView>,
    pub door: Vec<WallView>,
}

impl Dungeon {
    /// Generate a dungeon from sampled seed points
    pub fn generate(config: &GeneratorConfig, seed: u64) -> GenResult<Self> {
        config.validate()?;
        let mut rng = DungeonRng::new(seed);
        let grid = Grid::new(config.dungeon_size);
        let points = sample_points(config, &mut rng);
        Self::build(config, grid, points, rng)
    }

    /// Generate a dungeon from fixed seed positions in canvas units
    ///
    /// Skips sampling, so the sampling rectangle and spacing settings are
    /// not checked; everything downstream still uses the seeded RNG.
    pub fn from_points(config: &GeneratorConfig, positions: &[(f64, f64)], seed: u64) -> GenResult<Self> {
        config.validate_layout()?;
        let rng = DungeonRng::new(seed);
        let grid = Grid::new(config.dungeon_size);
        let points = positions
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Point::new(PointId(i), x, y))
            .collect();
        Self::build(config, grid, points, rng)
    }

    fn build(
        config: &GeneratorConfig,
        mut grid: Grid,
        mut points: Vec<Point>,
        mut rng: DungeonRng,
    ) -> GenResult<Self> {
        let seed = rng.seed();
        log::info!(
            "generating {0}x{0} dungeon from {1} points (seed {seed})",
            config.dungeon_size,
            points.len()
        );

        let mut edges = minimum_spanning_tree(&mut points);
        let tree_edges = edges.len();
        let loops = add_circular_paths(
            &mut points,
            &mut edges,
            config.circular_path_depth,
            config.circular_path_distance(),
            &mut rng,
        );
        log::debug!("{tree_edges} tree edges, {loops} circular paths");

        let rooms = carve_rooms(&mut grid, &mut points, config, &mut rng)?;
        let corridors = drill_corridors(&mut grid, &rooms, &points, &edges, config, &mut rng)?;
        prune_redundant_doors(&mut grid);
        classify_walls(&mut grid);

        log::info!("{} rooms, {} corridors", rooms.len(), corridors.len());
        Ok(Self {
            seed,
            config: config.clone(),
            grid,
            points,
            edges,
            tree_edges,
            rooms,
            corridors,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Spanning tree edges followed by circular paths
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn tree_edges(&self) -> &[Edge] {
        &self.edges[..self.tree_edges]
    }

    pub fn circular_edges(&self) -> &[Edge] {
        &self.edges[self.tree_edges..]
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn corridors(&self) -> impl Iterator<Item = &Corridor> {
        self.corridors.iter()
    }

    pub fn corridor_set(&self) -> &CorridorSet {
        &self.corridors
    }

    pub fn tile_size(&self) -> f64 {
        self.config.tile_size()
    }

    /// Every wall that is not `None`, grouped by kind
    pub fn walls_by_kind(&self) -> WallPartition {
        let mut partition = WallPartition::default();
        for (id, wall) in self.grid.walls() {
            let (a, b) = self.grid.wall_sides(id);
            let view = WallView {
                id,
                pos: wall.pos,
                orientation: wall.orientation,
                kind: wall.kind,
                sides: (
                    a.and_then(|p| self.grid.owner(p)),
                    b.and_then(|p| self.grid.owner(p)),
                ),
            };
            match wall.kind {
                WallKind::Solid => partition.solid.push(view),
                WallKind::Gap => partition.gap.push(view),
                WallKind::Door => partition.door.push(view),
                WallKind::None => {}
            }
        }
        partition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenError;
    use crate::grid::TileKind;

    fn small_config() -> GeneratorConfig {
        GeneratorConfig {
            canvas_width: 400.0,
            canvas_height: 400.0,
            dungeon_size: 25,
            point_count: 8,
            point_spacing: 80.0,
            point_border_offset: 30.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_default() {
        let dungeon = Dungeon::generate(&GeneratorConfig::default(), 42).unwrap();
        assert_eq!(dungeon.seed(), 42);
        assert_eq!(dungeon.rooms().len(), dungeon.points().len());
        assert_eq!(dungeon.tree_edges().len(), dungeon.points().len() - 1);
        assert!(dungeon.corridors().count() > 0);
    }

    #[test]
    fn test_same_seed_same_dungeon() {
        let config = small_config();
        let a = Dungeon::generate(&config, 7).unwrap();
        let b = Dungeon::generate(&config, 7).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.edges(), b.edges());
        assert_eq!(a.rooms(), b.rooms());
    }

    #[test]
    fn test_invalid_config_rejected_before_work() {
        let config = GeneratorConfig {
            min_room_size: 6,
            max_room_size: 4,
            ..Default::default()
        };
        assert!(matches!(
            Dungeon::generate(&config, 1),
            Err(GenError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_walls_partition_counts() {
        let dungeon = Dungeon::generate(&small_config(), 11).unwrap();
        let partition = dungeon.walls_by_kind();
        let grid = dungeon.grid();
        let count = |kind| grid.walls().filter(|(_, w)| w.kind == kind).count();
        assert_eq!(partition.solid.len(), count(WallKind::Solid));
        assert_eq!(partition.gap.len(), count(WallKind::Gap));
        assert_eq!(partition.door.len(), count(WallKind::Door));
        for door in &partition.door {
            let (a, b) = door.sides;
            assert!(a.is_some() && b.is_some() && a != b);
        }
    }

    #[test]
    fn test_from_points_single_room() {
        let config = GeneratorConfig {
            canvas_width: 100.0,
            canvas_height: 100.0,
            dungeon_size: 10,
            min_room_size: 3,
            max_room_size: 3,
            allow_square_rooms: true,
            ..Default::default()
        };
        let dungeon = Dungeon::from_points(&config, &[(25.0, 25.0)], 3).unwrap();
        assert_eq!(dungeon.rooms().len(), 1);
        assert_eq!(dungeon.rooms()[0].tiles.len(), 9);
        assert!(dungeon.edges().is_empty());
        assert!(dungeon.walls_by_kind().door.is_empty());
        assert_eq!(
            dungeon.grid().tiles().filter(|t| t.kind() == TileKind::Room).count(),
            9
        );
    }

    #[test]
    fn test_from_points_ignores_sampling_settings() {
        // The default border offset of 50 leaves nothing of a 60x60 canvas
        let config = GeneratorConfig {
            canvas_width: 60.0,
            canvas_height: 60.0,
            dungeon_size: 6,
            point_spacing: 1000.0,
            ..Default::default()
        };
        assert!(Dungeon::generate(&config, 1).is_err());
        let dungeon = Dungeon::from_points(&config, &[(15.0, 15.0), (45.0, 45.0)], 1).unwrap();
        assert_eq!(dungeon.rooms().len(), 2);
        assert_eq!(dungeon.tree_edges().len(), 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let dungeon = Dungeon::generate(&small_config(), 5).unwrap();
        let json = serde_json::to_value(&dungeon).unwrap();
        assert_eq!(json["seed"], 5);
        assert!(json["corridors"].is_array());
    }
}
