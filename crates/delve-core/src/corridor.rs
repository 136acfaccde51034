//! Corridor drilling
//!
//! For every graph edge a corridor is walked tile by tile from the start
//! room towards the target room:
//! 1. Lock onto an axis once the row or column lines up with the target
//! 2. Step one tile, claiming empty rock for the active corridor
//! 3. Fuse with any other corridor stepped into
//! 4. Put doors where ownership changes between a room and anything else
//! 5. Stop early if a touched corridor already reaches the target room
//! 6. Drop a fresh door that would sit right beside an existing parallel
//!    door into the same room
//!
//! Leaving a room into rock always starts a new corridor, so every live
//! corridor is a single connected run of tiles.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::config::GeneratorConfig;
use crate::error::{GenError, GenResult};
use crate::graph::Edge;
use crate::grid::{Direction, Grid, Owner, TileKind, TilePos, WallKind};
use crate::points::Point;
use crate::rng::DungeonRng;
use crate::rooms::{Room, RoomId};

/// Corridor identifier; never reused within one dungeon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CorridorId(pub usize);

impl fmt::Display for CorridorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// A connected run of tiles carved by drilling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corridor {
    pub id: CorridorId,
    pub tiles: Vec<TilePos>,
}

impl Corridor {
    pub fn owner(&self) -> Owner {
        Owner::Corridor(self.id)
    }
}

/// Live corridors, ordered by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorridorSet {
    corridors: BTreeMap<CorridorId, Corridor>,
    next_id: usize,
}

impl Serialize for CorridorSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.corridors.values())
    }
}

impl CorridorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.corridors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corridors.is_empty()
    }

    pub fn get(&self, id: CorridorId) -> Option<&Corridor> {
        self.corridors.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Corridor> {
        self.corridors.values()
    }

    fn create(&mut self) -> CorridorId {
        let id = CorridorId(self.next_id);
        self.next_id += 1;
        self.corridors.insert(id, Corridor { id, tiles: Vec::new() });
        id
    }

    fn claim(&mut self, grid: &mut Grid, id: CorridorId, pos: TilePos) {
        grid.set_owner(pos, Some(Owner::Corridor(id)));
        if let Some(corridor) = self.corridors.get_mut(&id) {
            corridor.tiles.push(pos);
        }
    }

    /// Return a corridor tile to rock, dropping the corridor if it empties
    fn release(&mut self, grid: &mut Grid, pos: TilePos) {
        let Some(Owner::Corridor(id)) = grid.owner(pos) else {
            return;
        };
        grid.set_owner(pos, None);
        if let Some(corridor) = self.corridors.get_mut(&id) {
            corridor.tiles.retain(|&t| t != pos);
            if corridor.tiles.is_empty() {
                self.corridors.remove(&id);
            }
        }
    }

    /// Move every tile of `from` into `into` and discard `from`
    fn absorb(&mut self, grid: &mut Grid, from: CorridorId, into: CorridorId) {
        if from == into {
            return;
        }
        let Some(absorbed) = self.corridors.remove(&from) else {
            return;
        };
        for &pos in &absorbed.tiles {
            grid.set_owner(pos, Some(Owner::Corridor(into)));
        }
        if let Some(survivor) = self.corridors.get_mut(&into) {
            survivor.tiles.extend(absorbed.tiles);
        }
    }
}

/// Where one drill run is heading
#[derive(Debug, Clone, Copy)]
struct Goal {
    tile: TilePos,
    /// Target room, or a corridor already attached to it
    owner: Owner,
    room: RoomId,
}

impl Goal {
    fn reached_by(&self, owner: Option<Owner>) -> bool {
        owner == Some(self.owner) || owner == Some(Owner::Room(self.room))
    }
}

/// Drill one corridor per edge, in edge order
pub fn drill_corridors(
    grid: &mut Grid,
    rooms: &[Room],
    points: &[Point],
    edges: &[Edge],
    config: &GeneratorConfig,
    rng: &mut DungeonRng,
) -> GenResult<CorridorSet> {
    let mut corridors = CorridorSet::new();
    let mut driller = Driller {
        grid,
        rooms,
        corridors: &mut corridors,
        config,
        rng,
    };
    for edge in edges {
        let (Some(start), Some(target)) = (points[edge.from.0].room, points[edge.to.0].room) else {
            continue;
        };
        driller.drill(start, target)?;
    }
    log::debug!("drilled {} edges into {} corridors", edges.len(), corridors.len());
    Ok(corridors)
}

struct Driller<'a> {
    grid: &'a mut Grid,
    rooms: &'a [Room],
    corridors: &'a mut CorridorSet,
    config: &'a GeneratorConfig,
    rng: &'a mut DungeonRng,
}

impl Driller<'_> {
    fn drill(&mut self, start: RoomId, target: RoomId) -> GenResult<()> {
        let rooms = self.rooms;
        let start_room = &rooms[start.0];
        let target_room = &rooms[target.0];

        let (mut current, mut active) = self.pick_start(start_room, target_room.core);
        let goal = self.pick_goal(target_room, current);
        log::trace!(
            "drilling {start} -> {target}: {current} towards {} ({})",
            goal.tile,
            goal.owner
        );

        if goal.reached_by(self.grid.owner(current)) {
            return Ok(());
        }

        let stalled = |steps| GenError::DrillingStalled {
            from: start_room.core,
            to: target_room.core,
            steps,
        };

        let mut horizontal = current.x.abs_diff(goal.tile.x) < current.y.abs_diff(goal.tile.y);
        let limit = self.config.drill_step_limit();
        let mut steps = 0;

        loop {
            if steps >= limit {
                return Err(stalled(steps));
            }
            steps += 1;

            if current.y == goal.tile.y {
                horizontal = true;
            }
            if current.x == goal.tile.x {
                horizontal = false;
            }
            let Some(dir) = step_direction(current, goal.tile, horizontal) else {
                return Err(stalled(steps));
            };
            let Some(next) = self.grid.neighbor(current, dir) else {
                return Err(stalled(steps));
            };
            let previous = current;
            current = next;

            // A room breaks the run; whatever comes after it is a new corridor
            if self.grid.kind(previous) == TileKind::Room {
                active = None;
            }

            let mut fresh = false;
            match self.grid.owner(current) {
                None => {
                    let id = match active {
                        Some(id) => id,
                        None => self.corridors.create(),
                    };
                    self.corridors.claim(self.grid, id, current);
                    active = Some(id);
                    fresh = true;
                }
                Some(Owner::Corridor(other)) if active != Some(other) => {
                    if let Some(id) = active {
                        self.corridors.absorb(self.grid, id, other);
                    }
                    active = Some(other);
                }
                Some(_) => {}
            }

            let door = self.place_door(previous, current);

            if self.grid.kind(current) == TileKind::Corridor
                && !goal.reached_by(self.grid.owner(current))
            {
                if let Some(hit) = self.hit_reaching_goal(current, &goal) {
                    if let Some(id) = active {
                        self.corridors.absorb(self.grid, id, hit);
                    }
                    log::trace!("{start} -> {target} joined {hit} after {steps} steps");
                    return Ok(());
                }
            }

            if door {
                match (self.grid.kind(previous), self.grid.kind(current)) {
                    (TileKind::Room, TileKind::Corridor) => {
                        if let Some(beside) = self.parallel_door(previous, current) {
                            self.grid.set_wall_kind(current, dir.opposite(), WallKind::Solid);
                            let kept = self.corridor_at(beside);
                            if fresh {
                                self.corridors.release(self.grid, current);
                                current = beside;
                                active = kept;
                            } else {
                                active = self.fuse(active, kept, &goal);
                            }
                        }
                    }
                    (TileKind::Corridor, TileKind::Room) => {
                        if let Some(beside) = self.parallel_door(current, previous) {
                            self.grid.set_wall_kind(previous, dir, WallKind::Solid);
                            let kept = self.corridor_at(beside);
                            active = self.fuse(active, kept, &goal);
                        }
                    }
                    _ => {}
                }
            }

            if goal.reached_by(self.grid.owner(current)) {
                log::trace!("{start} -> {target} arrived after {steps} steps");
                return Ok(());
            }
        }
    }

    /// Starting tile: the core, the room tile nearest the target, or a
    /// tile of an attached corridor that is nearer still
    fn pick_start(&self, room: &Room, reference: TilePos) -> (TilePos, Option<CorridorId>) {
        let mut tile = if self.config.closest_start_tile {
            room.closest_tile(reference)
        } else {
            room.core
        };
        let mut active = None;
        if self.config.closest_start_corridor {
            if let Some((pos, id)) = self.closest_attached_corridor_tile(room, reference) {
                if pos.distance_sq(reference) < tile.distance_sq(reference) {
                    tile = pos;
                    active = Some(id);
                }
            }
        }
        (tile, active)
    }

    fn pick_goal(&self, room: &Room, from: TilePos) -> Goal {
        let mut goal = Goal {
            tile: if self.config.closest_target_tile {
                room.closest_tile(from)
            } else {
                room.core
            },
            owner: room.owner(),
            room: room.id,
        };
        if self.config.closest_target_corridor {
            if let Some((pos, id)) = self.closest_attached_corridor_tile(room, from) {
                if pos.distance_sq(from) < goal.tile.distance_sq(from) {
                    goal.tile = pos;
                    goal.owner = Owner::Corridor(id);
                }
            }
        }
        goal
    }

    /// Nearest tile to `reference` among corridors that have a door into `room`
    fn closest_attached_corridor_tile(
        &self,
        room: &Room,
        reference: TilePos,
    ) -> Option<(TilePos, CorridorId)> {
        let mut attached: Vec<CorridorId> = Vec::new();
        for &pos in &room.tiles {
            for (dir, n) in self.grid.neighbors(pos) {
                if self.grid.wall_kind(pos, dir) != WallKind::Door {
                    continue;
                }
                if let Some(Owner::Corridor(id)) = self.grid.owner(n) {
                    if !attached.contains(&id) {
                        attached.push(id);
                    }
                }
            }
        }

        attached
            .iter()
            .filter_map(|&id| self.corridors.get(id))
            .flat_map(|c| c.tiles.iter().map(move |&t| (t, c.id)))
            .min_by_key(|&(t, _)| t.distance_sq(reference))
    }

    /// Mark a door between two adjacent tiles when ownership changes and
    /// at least one side is a room
    fn place_door(&mut self, from: TilePos, to: TilePos) -> bool {
        let (Some(a), Some(b)) = (self.grid.owner(from), self.grid.owner(to)) else {
            return false;
        };
        if a == b {
            return false;
        }
        let both_rooms = a.kind() == TileKind::Room && b.kind() == TileKind::Room;
        if a.kind() == b.kind() && !both_rooms {
            return false;
        }
        let Some(dir) = from.direction_to(to) else {
            return false;
        };
        self.grid.set_wall_kind(from, dir, WallKind::Door);
        true
    }

    /// A foreign corridor touching `pos` that already has a door into the
    /// target room
    fn hit_reaching_goal(&mut self, pos: TilePos, goal: &Goal) -> Option<CorridorId> {
        let own = self.grid.owner(pos);
        let mut hits: Vec<TilePos> = Vec::new();
        for (_, n) in self.grid.neighbors(pos) {
            let owner = self.grid.owner(n);
            if self.grid.kind(n) != TileKind::Corridor || owner == own {
                continue;
            }
            if hits.iter().all(|&h| self.grid.owner(h) != owner) {
                hits.push(n);
            }
        }

        for hit in hits {
            if self.reaches_goal_room(hit, goal) {
                return self.corridor_at(hit);
            }
        }
        None
    }

    /// Random-order flood through one corridor looking for a door into
    /// the goal
    fn reaches_goal_room(&mut self, start: TilePos, goal: &Goal) -> bool {
        let size = self.grid.size();
        let owner = self.grid.owner(start);
        let mut seen = vec![false; size * size];
        seen[start.y * size + start.x] = true;
        let mut frontier = vec![start];

        while !frontier.is_empty() {
            let tile = frontier.swap_remove(self.rng.index(frontier.len()));
            for (dir, n) in self.grid.neighbors(tile) {
                let n_owner = self.grid.owner(n);
                if goal.reached_by(n_owner) && self.grid.wall_kind(tile, dir) == WallKind::Door {
                    return true;
                }
                let idx = n.y * size + n.x;
                if n_owner == owner && !seen[idx] {
                    seen[idx] = true;
                    frontier.push(n);
                }
            }
        }
        false
    }

    /// Corridor tile beside `corridor_side` (across the direction of travel)
    /// whose own door leads into the same owner as `room_side`
    fn parallel_door(&self, room_side: TilePos, corridor_side: TilePos) -> Option<TilePos> {
        let towards_room = corridor_side.direction_to(room_side)?;
        let room_owner = self.grid.owner(room_side);
        towards_room.perpendicular().into_iter().find_map(|side| {
            let beside = self.grid.neighbor(corridor_side, side)?;
            if self.grid.kind(beside) != TileKind::Corridor
                || self.grid.wall_kind(beside, towards_room) != WallKind::Door
            {
                return None;
            }
            let across = self.grid.neighbor(beside, towards_room)?;
            (self.grid.owner(across) == room_owner).then_some(beside)
        })
    }

    fn corridor_at(&self, pos: TilePos) -> Option<CorridorId> {
        self.grid.owner(pos).and_then(Owner::corridor)
    }

    /// Merge two adjacent corridors, keeping the goal corridor alive
    fn fuse(
        &mut self,
        a: Option<CorridorId>,
        b: Option<CorridorId>,
        goal: &Goal,
    ) -> Option<CorridorId> {
        let (a, b) = match (a, b) {
            (Some(a), Some(b)) => (a, b),
            (a, b) => return a.or(b),
        };
        if goal.owner == Owner::Corridor(a) {
            self.corridors.absorb(self.grid, b, a);
            Some(a)
        } else {
            self.corridors.absorb(self.grid, a, b);
            Some(b)
        }
    }
}

fn step_direction(from: TilePos, to: TilePos, horizontal: bool) -> Option<Direction> {
    use std::cmp::Ordering::*;
    if horizontal {
        match from.x.cmp(&to.x) {
            Less => Some(Direction::East),
            Greater => Some(Direction::West),
            Equal => None,
        }
    } else {
        match from.y.cmp(&to.y) {
            Less => Some(Direction::South),
            Greater => Some(Direction::North),
            Equal => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::minimum_spanning_tree;
    use crate::points::PointId;
    use crate::rooms::carve_rooms;

    fn config(size: usize, room: u32) -> GeneratorConfig {
        GeneratorConfig {
            canvas_width: size as f64 * 10.0,
            canvas_height: size as f64 * 10.0,
            dungeon_size: size,
            min_room_size: room,
            max_room_size: room,
            allow_square_rooms: true,
            ..Default::default()
        }
    }

    fn point_in(id: usize, x: usize, y: usize) -> Point {
        Point::new(PointId(id), x as f64 * 10.0 + 5.0, y as f64 * 10.0 + 5.0)
    }

    struct Fixture {
        grid: Grid,
        rooms: Vec<Room>,
        points: Vec<Point>,
    }

    fn fixture(config: &GeneratorConfig, cores: &[(usize, usize)]) -> Fixture {
        let mut grid = Grid::new(config.dungeon_size);
        let mut points: Vec<Point> = cores
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| point_in(i, x, y))
            .collect();
        let rooms = carve_rooms(&mut grid, &mut points, config, &mut DungeonRng::new(1)).unwrap();
        Fixture {
            grid,
            rooms,
            points,
        }
    }

    fn doors(grid: &Grid) -> usize {
        grid.walls().filter(|(_, w)| w.kind == WallKind::Door).count()
    }

    #[test]
    fn test_step_direction() {
        let a = TilePos::new(2, 2);
        assert_eq!(step_direction(a, TilePos::new(5, 9), true), Some(Direction::East));
        assert_eq!(step_direction(a, TilePos::new(0, 9), true), Some(Direction::West));
        assert_eq!(step_direction(a, TilePos::new(5, 9), false), Some(Direction::South));
        assert_eq!(step_direction(a, TilePos::new(5, 0), false), Some(Direction::North));
        assert_eq!(step_direction(a, a, true), None);
    }

    #[test]
    fn test_straight_corridor_between_two_rooms() {
        let config = config(20, 3);
        let Fixture {
            mut grid,
            rooms,
            points,
        } = fixture(&config, &[(3, 5), (15, 5)]);
        let edges = vec![Edge::new(PointId(0), PointId(1))];
        let corridors =
            drill_corridors(&mut grid, &rooms, &points, &edges, &config, &mut DungeonRng::new(2))
                .unwrap();

        assert_eq!(corridors.len(), 1);
        let corridor = corridors.iter().next().unwrap();
        // Room edges are x=4 and x=14; the corridor fills the gap between them
        assert_eq!(corridor.tiles.len(), 9);
        for (i, pos) in corridor.tiles.iter().enumerate() {
            assert_eq!(*pos, TilePos::new(5 + i, 5));
        }
        assert_eq!(doors(&grid), 2);
        assert_eq!(grid.wall_kind(TilePos::new(4, 5), Direction::East), WallKind::Door);
        assert_eq!(grid.wall_kind(TilePos::new(14, 5), Direction::West), WallKind::Door);
    }

    #[test]
    fn test_core_to_core_bends_once() {
        let mut config = config(20, 1);
        config.closest_start_tile = false;
        config.closest_target_tile = false;
        let Fixture {
            mut grid,
            rooms,
            points,
        } = fixture(&config, &[(2, 2), (10, 6)]);
        let edges = vec![Edge::new(PointId(0), PointId(1))];
        let corridors =
            drill_corridors(&mut grid, &rooms, &points, &edges, &config, &mut DungeonRng::new(2))
                .unwrap();

        let corridor = corridors.iter().next().unwrap();
        // |dx| = 8 is not smaller than |dy| = 4, so the walk goes vertical first
        assert_eq!(corridor.tiles[0], TilePos::new(2, 3));
        assert!(corridor.tiles.contains(&TilePos::new(2, 6)));
        assert_eq!(*corridor.tiles.last().unwrap(), TilePos::new(9, 6));
        assert_eq!(corridor.tiles.len(), 4 + 7);
        assert_eq!(doors(&grid), 2);
    }

    #[test]
    fn test_crossing_corridor_merges() {
        let mut config = config(21, 1);
        config.closest_start_corridor = false;
        config.closest_target_corridor = false;
        // Vertical pair and a third room off to the side
        let Fixture {
            mut grid,
            rooms,
            points,
        } = fixture(&config, &[(10, 2), (10, 18), (2, 10), (18, 10)]);
        let ids: Vec<PointId> = rooms.iter().map(|r| r.seed).collect();
        let top = ids[0];
        let left = ids[1];
        let right = ids[2];
        let bottom = ids[3];
        let edges = vec![Edge::new(top, bottom), Edge::new(left, right)];
        let corridors =
            drill_corridors(&mut grid, &rooms, &points, &edges, &config, &mut DungeonRng::new(3))
                .unwrap();

        // The horizontal run crosses the vertical one and fuses with it
        assert_eq!(corridors.len(), 1);
        let only = corridors.iter().next().unwrap().owner();
        assert_eq!(grid.owner(TilePos::new(10, 10)), Some(only));
        assert_eq!(grid.owner(TilePos::new(5, 10)), Some(only));
        assert_eq!(grid.owner(TilePos::new(10, 5)), Some(only));
    }

    #[test]
    fn test_hit_corridor_reaching_target_stops_drilling() {
        let mut config = config(20, 1);
        config.closest_start_corridor = false;
        config.closest_target_corridor = false;
        let Fixture {
            mut grid,
            rooms,
            points,
        } = fixture(&config, &[(2, 10), (16, 10), (9, 3)]);
        // Rooms are numbered by core row first
        let a = rooms[1].seed; // (2, 10)
        let b = rooms[2].seed; // (16, 10)
        let c = rooms[0].seed; // (9, 3)
        let mut rng = DungeonRng::new(4);
        // First a straight corridor along row 10, then one from the top room
        // heading down towards the right-hand room
        let edges = vec![Edge::new(a, b), Edge::new(c, b)];
        let corridors =
            drill_corridors(&mut grid, &rooms, &points, &edges, &config, &mut rng).unwrap();

        assert_eq!(corridors.len(), 1);
        let corridor = corridors.iter().next().unwrap();
        // The second run stops once it touches row 10 instead of drilling
        // alongside it to the target
        assert!(!corridor.tiles.iter().any(|t| t.y == 9 && t.x > 9));
        assert_eq!(doors(&grid), 3);
    }

    #[test]
    fn test_adjacent_rooms_get_a_door() {
        let config = config(12, 3);
        let Fixture {
            mut grid,
            rooms,
            points,
        } = fixture(&config, &[(3, 5), (6, 5)]);
        let edges = vec![Edge::new(PointId(0), PointId(1))];
        let corridors =
            drill_corridors(&mut grid, &rooms, &points, &edges, &config, &mut DungeonRng::new(5))
                .unwrap();

        assert!(corridors.is_empty());
        assert_eq!(grid.wall_kind(TilePos::new(4, 5), Direction::East), WallKind::Door);
    }

    #[test]
    fn test_second_edge_reuses_attached_corridor() {
        let config = config(24, 3);
        let Fixture {
            mut grid,
            rooms,
            points,
        } = fixture(&config, &[(3, 3), (20, 3), (20, 8)]);
        let ids: Vec<PointId> = rooms.iter().map(|r| r.seed).collect();
        let edges = vec![Edge::new(ids[0], ids[1]), Edge::new(ids[0], ids[2])];
        let corridors =
            drill_corridors(&mut grid, &rooms, &points, &edges, &config, &mut DungeonRng::new(6))
                .unwrap();

        // The second run sets off from the corridor already attached to the
        // start room instead of cutting a new door
        let start_doors: usize = rooms[0]
            .tiles
            .iter()
            .map(|&t| {
                Direction::ALL
                    .into_iter()
                    .filter(|&d| grid.wall_kind(t, d) == WallKind::Door)
                    .count()
            })
            .sum();
        assert_eq!(start_doors, 1);
        for corridor in corridors.iter() {
            assert!(corridor.tiles.iter().all(|t| t.x > 4));
        }
    }

    #[test]
    fn test_step_cap_reports_stall() {
        let mut config = config(20, 1);
        config.max_drill_steps = Some(3);
        let Fixture {
            mut grid,
            rooms,
            points,
        } = fixture(&config, &[(1, 1), (18, 18)]);
        let edges = vec![Edge::new(PointId(0), PointId(1))];
        let err =
            drill_corridors(&mut grid, &rooms, &points, &edges, &config, &mut DungeonRng::new(7))
                .unwrap_err();
        assert_eq!(
            err,
            GenError::DrillingStalled {
                from: TilePos::new(1, 1),
                to: TilePos::new(18, 18),
                steps: 3,
            }
        );
    }

    #[test]
    fn test_mst_corridors_keep_owners_consistent() {
        let config = config(30, 3);
        let Fixture {
            mut grid,
            rooms,
            mut points,
        } = fixture(&config, &[(4, 4), (20, 6), (8, 22), (25, 25), (14, 14)]);
        let edges = minimum_spanning_tree(&mut points);
        let corridors =
            drill_corridors(&mut grid, &rooms, &points, &edges, &config, &mut DungeonRng::new(8))
                .unwrap();

        for corridor in corridors.iter() {
            assert!(!corridor.tiles.is_empty());
            for &pos in &corridor.tiles {
                assert_eq!(grid.owner(pos), Some(corridor.owner()));
            }
        }
        let claimed = grid
            .tiles()
            .filter(|t| t.kind() == TileKind::Corridor)
            .count();
        let listed: usize = corridors.iter().map(|c| c.tiles.len()).sum();
        assert_eq!(claimed, listed);
    }

    #[test]
    fn test_fresh_exit_beside_parallel_door_resumes_from_neighbour() {
        let mut config = config(20, 3);
        config.closest_start_corridor = false;
        config.closest_target_corridor = false;
        let Fixture { mut grid, rooms, .. } = fixture(&config, &[(5, 5), (15, 5)]);
        // An existing stub leaves the left room one row up, through (6, 4) east
        let mut corridors = CorridorSet::new();
        let stub = corridors.create();
        corridors.claim(&mut grid, stub, TilePos::new(7, 4));
        corridors.claim(&mut grid, stub, TilePos::new(8, 4));
        grid.set_wall_kind(TilePos::new(6, 4), Direction::East, WallKind::Door);

        let mut rng = DungeonRng::new(9);
        let mut driller = Driller {
            grid: &mut grid,
            rooms: &rooms,
            corridors: &mut corridors,
            config: &config,
            rng: &mut rng,
        };
        driller.drill(RoomId(0), RoomId(1)).unwrap();

        // The tile just stepped into goes back to rock and its door is walled up
        assert_eq!(grid.owner(TilePos::new(7, 5)), None);
        assert_eq!(grid.wall_kind(TilePos::new(6, 5), Direction::East), WallKind::Solid);
        assert_eq!(grid.wall_kind(TilePos::new(6, 4), Direction::East), WallKind::Door);

        // Drilling carries on along the stub's row
        for x in 7..=13 {
            assert_eq!(grid.owner(TilePos::new(x, 4)), Some(Owner::Corridor(stub)), "x = {x}");
        }
        assert_eq!(grid.wall_kind(TilePos::new(13, 4), Direction::East), WallKind::Door);
        assert_eq!(corridors.len(), 1);
        assert!(corridors.get(CorridorId(1)).is_none());
        assert_eq!(corridors.get(stub).map(|c| c.tiles.len()), Some(7));
    }

    #[test]
    fn test_entry_beside_parallel_door_fuses_corridors() {
        let mut config = config(22, 3);
        config.closest_start_corridor = false;
        config.closest_target_corridor = false;
        let Fixture { mut grid, rooms, .. } = fixture(&config, &[(3, 5), (10, 5), (17, 5)]);
        // A stub already enters the middle room one row up, through (8, 4) east
        let mut corridors = CorridorSet::new();
        let stub = corridors.create();
        corridors.claim(&mut grid, stub, TilePos::new(8, 4));
        grid.set_wall_kind(TilePos::new(8, 4), Direction::East, WallKind::Door);

        let mut rng = DungeonRng::new(10);
        let mut driller = Driller {
            grid: &mut grid,
            rooms: &rooms,
            corridors: &mut corridors,
            config: &config,
            rng: &mut rng,
        };
        driller.drill(RoomId(0), RoomId(2)).unwrap();

        // The new door into the middle room is walled up and the run joins the stub
        assert_eq!(grid.wall_kind(TilePos::new(8, 5), Direction::East), WallKind::Solid);
        assert_eq!(grid.wall_kind(TilePos::new(8, 4), Direction::East), WallKind::Door);
        let kept = Some(Owner::Corridor(stub));
        assert_eq!(grid.owner(TilePos::new(5, 5)), kept);
        assert_eq!(grid.owner(TilePos::new(8, 5)), kept);
        assert!(corridors.get(CorridorId(1)).is_none());
        assert_eq!(corridors.get(stub).map(|c| c.tiles.len()), Some(5));

        // Past the middle room a new corridor reaches the target
        assert_eq!(corridors.len(), 2);
        assert_eq!(grid.owner(TilePos::new(12, 5)), Some(Owner::Corridor(CorridorId(2))));
        assert_eq!(grid.wall_kind(TilePos::new(11, 5), Direction::East), WallKind::Door);
        assert_eq!(grid.wall_kind(TilePos::new(15, 5), Direction::East), WallKind::Door);
    }
}
