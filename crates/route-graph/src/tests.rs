//! Unit tests for route-graph.
//!
//! Maps are 5×5 square grids of 100 px cells unless stated otherwise.

#[cfg(test)]
mod helpers {
    use std::cell::Cell as StdCell;

    use route_core::{Cell, Mover, WorldPoint};

    use crate::{
        CollisionOracle, GridTopology, NativeEngine, NativeGraph, NativeSearch, NativeStep,
        OracleError, SquareGrid, Wall, WallIndex,
    };

    pub fn grid() -> SquareGrid {
        SquareGrid::new(5, 5, 100.0, 5.0)
    }

    pub fn p(x: f64, y: f64) -> WorldPoint {
        WorldPoint::new(x, y)
    }

    /// Vertical wall on the x = 200 grid line covering rows 0–3; the only way
    /// from column 1 to column 2 is the orthogonal step along row 4.
    pub fn gap_wall() -> Wall {
        Wall::new(p(200.0, 0.0), p(200.0, 400.0))
    }

    /// Wraps a [`WallIndex`] and counts oracle calls.
    pub struct CountingOracle {
        pub inner: WallIndex,
        pub calls: StdCell<usize>,
    }

    impl CountingOracle {
        pub fn new(walls: Vec<Wall>) -> Self {
            Self { inner: WallIndex::new(walls), calls: StdCell::new(0) }
        }
    }

    impl CollisionOracle for CountingOracle {
        fn step_blocked(
            &self,
            topology: &dyn GridTopology,
            from: Cell,
            to: Cell,
            mover: &Mover,
        ) -> Result<bool, OracleError> {
            self.calls.set(self.calls.get() + 1);
            self.inner.step_blocked(topology, from, to, mover)
        }
    }

    /// Oracle that fails every query.
    pub struct BrokenOracle;

    impl CollisionOracle for BrokenOracle {
        fn step_blocked(
            &self,
            _topology: &dyn GridTopology,
            _from: Cell,
            _to: Cell,
            _mover: &Mover,
        ) -> Result<bool, OracleError> {
            Err(OracleError::Collision("scene not ready".into()))
        }
    }

    /// Native engine that records graph builds and never finds anything.
    #[derive(Default)]
    pub struct RecordingNative {
        /// `(radius, elevation, height_aware)` per build.
        pub builds: Vec<(f64, f64, bool)>,
    }

    impl NativeEngine for RecordingNative {
        fn build_graph(
            &mut self,
            _walls: &[Wall],
            radius: f64,
            elevation: f64,
            height_aware: bool,
        ) -> Result<NativeGraph, OracleError> {
            self.builds.push((radius, elevation, height_aware));
            Ok(NativeGraph(self.builds.len() as u64))
        }

        fn create_search(
            &mut self,
            _from: WorldPoint,
            _to: WorldPoint,
            _graph: NativeGraph,
            _max_distance: Option<f64>,
        ) -> Result<NativeSearch, OracleError> {
            Ok(NativeSearch(0))
        }

        fn step(&mut self, _search: NativeSearch) -> Result<NativeStep, OracleError> {
            Ok(NativeStep::NoPath)
        }

        fn reset(&mut self, _search: NativeSearch) -> Result<(), OracleError> {
            Ok(())
        }

        fn dispose(&mut self, _search: NativeSearch) {}
    }
}

// ── Level index ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod levels {
    use route_core::LevelId;

    use super::helpers::*;
    use crate::{ElevationBand, LevelIndex};

    #[test]
    fn flat_index_has_one_level() {
        let idx = LevelIndex::flat();
        assert_eq!(idx.level_count(), 1);
        assert_eq!(idx.level_for(-1e9), LevelId(0));
        assert_eq!(idx.level_for(0.0), LevelId(0));
        assert_eq!(idx.level_for(1e9), LevelId(0));
    }

    #[test]
    fn top_band_keeps_boundary_in_level_below() {
        let idx = LevelIndex::from_bands([ElevationBand::bottom(0.0), ElevationBand::top(10.0)]);
        assert_eq!(idx.level_count(), 3);
        assert_eq!(idx.level_for(-5.0), LevelId(0));
        assert_eq!(idx.level_for(0.0), LevelId(1), "bottom band opens the level above");
        assert_eq!(idx.level_for(5.0), LevelId(1));
        assert_eq!(idx.level_for(10.0), LevelId(1), "top band closes the level below");
        assert_eq!(idx.level_for(10.0 + 1e-9), LevelId(2));
    }

    #[test]
    fn bottom_sorts_before_top_at_equal_elevation() {
        let idx = LevelIndex::from_bands([ElevationBand::top(5.0), ElevationBand::bottom(5.0)]);
        let bands = idx.bands();
        assert_eq!(bands.len(), 4);
        assert_eq!(bands[1], ElevationBand::bottom(5.0));
        assert_eq!(bands[2], ElevationBand::top(5.0));
        // Exactly on the shared elevation: past the bottom, before the top.
        assert_eq!(idx.level_for(5.0), LevelId(1));
        assert_eq!(idx.level_for(5.5), LevelId(2));
    }

    #[test]
    fn every_elevation_lands_in_a_valid_level() {
        let idx = LevelIndex::from_bands([
            ElevationBand::bottom(0.0),
            ElevationBand::top(10.0),
            ElevationBand::bottom(20.0),
            ElevationBand::top(30.0),
        ]);
        let mut last = LevelId(0);
        for step in -20..=80 {
            let level = idx.level_for(step as f64 * 0.5);
            assert!(level.index() < idx.level_count());
            assert!(level >= last, "levels must not decrease with elevation");
            last = level;
        }
    }

    #[test]
    fn duplicates_and_nan_are_dropped() {
        let idx = LevelIndex::from_bands([
            ElevationBand::top(10.0),
            ElevationBand::top(10.0),
            ElevationBand::bottom(f64::NAN),
        ]);
        assert_eq!(idx.bands().len(), 3);
    }

    #[test]
    fn detect_ignores_heights_unless_height_aware() {
        let walls = vec![gap_wall().with_height(0.0, 10.0)];
        assert_eq!(LevelIndex::detect(&walls, false), LevelIndex::flat());

        let idx = LevelIndex::detect(&walls, true);
        assert_eq!(idx.level_count(), 3);
        assert_eq!(idx.level_for(10.0), LevelId(1));
    }

    #[test]
    fn unbounded_walls_add_no_levels() {
        let idx = LevelIndex::detect(&[gap_wall()], true);
        assert_eq!(idx, LevelIndex::flat());
    }
}

// ── Topologies ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod topology {
    use route_core::{Cell, GridKind};

    use super::helpers::*;
    use crate::{GridTopology, HexGrid};

    fn neighbors_of(t: &dyn GridTopology, c: Cell) -> Vec<Cell> {
        let mut out = Vec::new();
        t.neighbors(c, &mut out);
        out.sort();
        out
    }

    #[test]
    fn square_has_eight_neighbors_and_diagonals() {
        let g = grid();
        assert_eq!(neighbors_of(&g, Cell::new(2, 2)).len(), 8);
        assert!(g.is_diagonal(Cell::new(2, 2), Cell::new(3, 3)));
        assert!(!g.is_diagonal(Cell::new(2, 2), Cell::new(2, 3)));
    }

    #[test]
    fn square_bounds_and_centers() {
        let g = grid();
        assert!(g.in_bounds(Cell::new(4, 4)));
        assert!(!g.in_bounds(Cell::new(5, 0)));
        assert!(!g.in_bounds(Cell::new(0, -1)));
        assert_eq!(g.cell_center(Cell::new(1, 2)), p(150.0, 250.0));
    }

    #[test]
    fn square_from_dimensions_rounds_up() {
        let g = crate::SquareGrid::from_dimensions(450.0, 300.0, 100.0, 5.0);
        assert_eq!((g.columns, g.rows), (5, 3));
    }

    #[test]
    fn hex_row_neighbors_depend_on_shift() {
        let g = HexGrid::new(6, 6, false, true, 100.0, 5.0);
        // Row 2 is even, hence shifted right: neighbors lean right.
        assert_eq!(
            neighbors_of(&g, Cell::new(2, 2)),
            vec![
                Cell::new(1, 2),
                Cell::new(2, 1),
                Cell::new(2, 3),
                Cell::new(3, 1),
                Cell::new(3, 2),
                Cell::new(3, 3),
            ]
        );
        // Row 1 is not shifted: neighbors lean left.
        assert_eq!(
            neighbors_of(&g, Cell::new(2, 1)),
            vec![
                Cell::new(1, 0),
                Cell::new(1, 1),
                Cell::new(1, 2),
                Cell::new(2, 0),
                Cell::new(2, 2),
                Cell::new(3, 1),
            ]
        );
    }

    #[test]
    fn hex_adjacency_is_symmetric() {
        for columnar in [false, true] {
            for even in [false, true] {
                let g = HexGrid::new(8, 8, columnar, even, 100.0, 5.0);
                for x in 1..7 {
                    for y in 1..7 {
                        let c = Cell::new(x, y);
                        for n in neighbors_of(&g, c) {
                            assert!(
                                neighbors_of(&g, n).contains(&c),
                                "{c} -> {n} not mirrored (columnar={columnar}, even={even})"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn hex_has_no_diagonals() {
        let g = HexGrid::new(6, 6, false, true, 100.0, 5.0);
        assert_eq!(g.kind(), GridKind::Hex { columnar: false, even: true });
        assert!(!g.is_diagonal(Cell::new(2, 2), Cell::new(3, 3)));
    }

    #[test]
    fn hex_dimensions_use_three_quarter_pitch() {
        let g = HexGrid::from_dimensions(300.0, 300.0, false, false, 100.0, 5.0);
        assert_eq!((g.columns, g.rows), (3, 4));
        let c = HexGrid::from_dimensions(300.0, 300.0, true, false, 100.0, 5.0);
        assert_eq!((c.columns, c.rows), (4, 3));
    }
}

// ── Walls & collision ─────────────────────────────────────────────────────────

#[cfg(test)]
mod walls {
    use route_core::{Cell, Mover};

    use super::helpers::*;
    use crate::walls::segments_intersect;
    use crate::{CollisionOracle, DoorState, ObstacleSource, WallIndex};

    #[test]
    fn segment_intersection_cases() {
        // Crossing.
        assert!(segments_intersect(p(0.0, 0.0), p(10.0, 10.0), p(0.0, 10.0), p(10.0, 0.0)));
        // Parallel.
        assert!(!segments_intersect(p(0.0, 0.0), p(10.0, 0.0), p(0.0, 1.0), p(10.0, 1.0)));
        // Touching an endpoint counts.
        assert!(segments_intersect(p(0.0, 0.0), p(10.0, 0.0), p(10.0, 0.0), p(10.0, 5.0)));
        // Collinear but disjoint.
        assert!(!segments_intersect(p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0)));
    }

    #[test]
    fn wall_blocks_crossing_steps_only() {
        let g = grid();
        let idx = WallIndex::new(vec![gap_wall()]);
        let m = Mover::default();
        assert!(idx.step_blocked(&g, Cell::new(1, 0), Cell::new(2, 0), &m).unwrap());
        assert!(!idx.step_blocked(&g, Cell::new(1, 4), Cell::new(2, 4), &m).unwrap());
        // Diagonal through the wall's end point.
        assert!(idx.step_blocked(&g, Cell::new(1, 3), Cell::new(2, 4), &m).unwrap());
        // Same side of the wall.
        assert!(!idx.step_blocked(&g, Cell::new(0, 0), Cell::new(1, 1), &m).unwrap());
    }

    #[test]
    fn open_doors_and_passable_walls_do_not_block() {
        let g = grid();
        let mut passable = gap_wall();
        passable.blocks_movement = false;
        let idx = WallIndex::new(vec![gap_wall().with_door(DoorState::Open), passable]);
        assert_eq!(idx.walls().len(), 2);
        assert!(!idx.step_blocked(&g, Cell::new(1, 0), Cell::new(2, 0), &Mover::default()).unwrap());

        let closed = WallIndex::new(vec![gap_wall().with_door(DoorState::Closed)]);
        assert!(closed.step_blocked(&g, Cell::new(1, 0), Cell::new(2, 0), &Mover::default()).unwrap());
    }

    #[test]
    fn height_aware_index_lets_movers_pass_over() {
        let g = grid();
        let low = gap_wall().with_height(0.0, 10.0);
        let flying = Mover::default().at_elevation(20.0);
        let walking = Mover::default().at_elevation(5.0);

        let flat = WallIndex::new(vec![low]);
        assert!(flat.step_blocked(&g, Cell::new(1, 0), Cell::new(2, 0), &flying).unwrap());

        let aware = WallIndex::new(vec![low]).height_aware(true);
        assert!(!aware.step_blocked(&g, Cell::new(1, 0), Cell::new(2, 0), &flying).unwrap());
        assert!(aware.step_blocked(&g, Cell::new(1, 0), Cell::new(2, 0), &walking).unwrap());
    }

    #[test]
    fn even_sized_movers_snap_to_grid_lines() {
        let g = grid();
        // Horizontal wall inside row 1, between the row-1 center line and the
        // grid line above it.
        let idx = WallIndex::new(vec![crate::Wall::new(p(0.0, 120.0), p(500.0, 120.0))]);
        let small = Mover::default();
        let large = Mover::sized(2.0, 2.0);
        // A 1×1 mover walks along y = 150 and never meets the wall.
        assert!(!idx.step_blocked(&g, Cell::new(1, 1), Cell::new(2, 1), &small).unwrap());
        // A 2×2 mover anchored at row 1 moves from the y = 100 line down to
        // y = 200 and crosses it.
        assert!(idx.step_blocked(&g, Cell::new(1, 1), Cell::new(1, 2), &large).unwrap());
    }

    #[test]
    fn tiny_movers_snap_inside_the_cell() {
        let g = grid();
        // Short horizontal wall across the left half of row 1's lower edge.
        let idx = WallIndex::new(vec![crate::Wall::new(p(100.0, 160.0), p(160.0, 160.0))]);
        let down = (Cell::new(1, 1), Cell::new(1, 2));
        // Centered movers walk down x = 150 and hit it.
        assert!(idx.step_blocked(&g, down.0, down.1, &Mover::default()).unwrap());
        assert!(idx.step_blocked(&g, down.0, down.1, &Mover::sized(0.75, 0.75)).unwrap());
        // A half-cell mover stands at (175, 175) and passes to its right.
        assert!(!idx.step_blocked(&g, down.0, down.1, &Mover::sized(0.5, 0.5)).unwrap());
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use crate::{DoorState, GraphError, load_walls_reader};

    const WALLS: &str = "\
ax,ay,bx,by,bottom,top,door
200,0,200,400,,,none
0,300,100,300,0,10,closed
100,300,200,300,,,open
";

    #[test]
    fn parses_walls() {
        let walls = load_walls_reader(WALLS.as_bytes()).unwrap();
        assert_eq!(walls.len(), 3);
        assert_eq!(walls[0].bottom, f64::NEG_INFINITY);
        assert_eq!(walls[0].top, f64::INFINITY);
        assert_eq!((walls[1].bottom, walls[1].top), (0.0, 10.0));
        assert_eq!(walls[1].door, DoorState::Closed);
        assert!(walls[1].is_obstacle());
        assert!(!walls[2].is_obstacle());
    }

    #[test]
    fn empty_door_column_means_no_door() {
        let csv = "ax,ay,bx,by,bottom,top,door\n0,0,1,1,,,\n";
        let walls = load_walls_reader(csv.as_bytes()).unwrap();
        assert_eq!(walls[0].door, DoorState::None);
    }

    #[test]
    fn rejects_unknown_door_state() {
        let csv = "ax,ay,bx,by,bottom,top,door\n0,0,1,1,,,ajar\n";
        let err = load_walls_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, GraphError::Parse(ref m) if m.contains("ajar")), "{err}");
    }

    #[test]
    fn rejects_inverted_heights() {
        let csv = "ax,ay,bx,by,bottom,top,door\n0,0,1,1,10,0,none\n";
        assert!(matches!(load_walls_reader(csv.as_bytes()), Err(GraphError::Parse(_))));
    }

    #[test]
    fn rejects_malformed_numbers() {
        let csv = "ax,ay,bx,by,bottom,top,door\nx,0,1,1,,,none\n";
        assert!(matches!(load_walls_reader(csv.as_bytes()), Err(GraphError::Parse(_))));
    }
}

// ── Graph cache ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod cache {
    use route_core::{Cell, GridKind, LevelId, Mover, SizeClass};

    use super::helpers::*;
    use crate::{ContinuousSpace, GraphCache, GraphError, LevelIndex, Neighbor, World};

    fn flat_cache() -> GraphCache {
        GraphCache::new(GridKind::Square, LevelIndex::flat())
    }

    #[test]
    fn nodes_are_built_once() {
        let g = grid();
        let oracle = CountingOracle::new(vec![]);
        let walls: Vec<crate::Wall> = vec![];
        let world = World::new(&g, &oracle, &walls);
        let mut cache = flat_cache();
        let m = Mover::default();

        let n = cache.node(&world, Cell::new(2, 2), SizeClass(1), LevelId(0), &m).unwrap();
        assert_eq!(n.neighbors.len(), 8);
        assert_eq!(oracle.calls.get(), 8);

        cache.node(&world, Cell::new(2, 2), SizeClass(1), LevelId(0), &m).unwrap();
        assert_eq!(oracle.calls.get(), 8, "second lookup must hit the cache");
        assert_eq!(cache.node_count(), 1);
    }

    #[test]
    fn corner_nodes_skip_out_of_bounds_candidates() {
        let g = grid();
        let oracle = CountingOracle::new(vec![]);
        let walls: Vec<crate::Wall> = vec![];
        let world = World::new(&g, &oracle, &walls);
        let mut cache = flat_cache();
        let n = cache
            .node(&world, Cell::new(0, 0), SizeClass(1), LevelId(0), &Mover::default())
            .unwrap();
        assert_eq!(n.neighbors.len(), 3);
        assert_eq!(oracle.calls.get(), 3, "out-of-bounds candidates are never queried");
        assert!(n.neighbors.contains(&Neighbor { cell: Cell::new(1, 1), diagonal: true }));
        assert!(n.neighbors.contains(&Neighbor { cell: Cell::new(1, 0), diagonal: false }));
    }

    #[test]
    fn blocked_neighbors_are_dropped() {
        let g = grid();
        let oracle = CountingOracle::new(vec![gap_wall()]);
        let walls = vec![gap_wall()];
        let world = World::new(&g, &oracle, &walls);
        let mut cache = flat_cache();
        let n = cache
            .node(&world, Cell::new(1, 2), SizeClass(1), LevelId(0), &Mover::default())
            .unwrap();
        let cells: Vec<Cell> = n.neighbors.iter().map(|n| n.cell).collect();
        assert_eq!(cells.len(), 5);
        assert!(cells.iter().all(|c| c.x <= 1));
    }

    #[test]
    fn size_classes_and_levels_get_separate_graphs() {
        let g = grid();
        let oracle = CountingOracle::new(vec![]);
        let walls: Vec<crate::Wall> = vec![];
        let world = World::new(&g, &oracle, &walls);
        let mut cache = flat_cache();
        let m = Mover::default();
        let c = Cell::new(2, 2);
        cache.node(&world, c, SizeClass(1), LevelId(0), &m).unwrap();
        cache.node(&world, c, SizeClass(0), LevelId(0), &m).unwrap();
        cache.node(&world, c, SizeClass(1), LevelId(1), &m).unwrap();
        assert_eq!(cache.graph_count(), 3);
        assert_eq!(cache.node_count(), 3);
    }

    #[test]
    fn out_of_bounds_and_oracle_faults_are_errors() {
        let g = grid();
        let walls: Vec<crate::Wall> = vec![];
        let broken = BrokenOracle;
        let world = World::new(&g, &broken, &walls);
        let mut cache = flat_cache();
        let m = Mover::default();

        let err = cache.node(&world, Cell::new(9, 9), SizeClass(1), LevelId(0), &m).unwrap_err();
        assert!(matches!(err, GraphError::OutOfBounds(_)));

        let err = cache.node(&world, Cell::new(1, 1), SizeClass(1), LevelId(0), &m).unwrap_err();
        assert!(matches!(err, GraphError::Oracle(_)));
        assert_eq!(cache.node_count(), 0, "failed builds are not cached");
    }

    #[test]
    fn build_detects_levels_from_obstacles() {
        let g = grid();
        let oracle = CountingOracle::new(vec![]);
        let walls = vec![gap_wall().with_height(0.0, 10.0)];
        let world = World::new(&g, &oracle, &walls);
        assert_eq!(GraphCache::build(&world, false).levels().level_count(), 1);
        let cache = GraphCache::build(&world, true);
        assert_eq!(cache.levels().level_count(), 3);
        assert_eq!(cache.level_for(20.0), LevelId(2));
    }

    #[test]
    fn native_graphs_are_keyed_by_level_and_size() {
        let space = ContinuousSpace::new(1000.0, 1000.0, 100.0, 5.0);
        let oracle = CountingOracle::new(vec![]);
        let walls = vec![gap_wall()];
        let world = World::new(&space, &oracle, &walls);
        let mut cache = GraphCache::new(GridKind::Gridless, LevelIndex::flat());
        let mut native = RecordingNative::default();

        let one = Mover::default();
        let two = Mover::sized(2.0, 1.0);
        let a = cache.native_graph(&mut native, &world, &one, LevelId(0), 0.9, false).unwrap();
        let b = cache.native_graph(&mut native, &world, &one, LevelId(0), 0.9, false).unwrap();
        let c = cache.native_graph(&mut native, &world, &two, LevelId(0), 0.9, false).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(native.builds.len(), 2);
        assert!((native.builds[0].0 - 45.0).abs() < 1e-9);
        assert!((native.builds[1].0 - 90.0).abs() < 1e-9);
    }

    #[test]
    fn graph_kinds_do_not_mix() {
        let g = grid();
        let oracle = CountingOracle::new(vec![]);
        let walls: Vec<crate::Wall> = vec![];
        let world = World::new(&g, &oracle, &walls);
        let mut cache = flat_cache();
        let mut native = RecordingNative::default();
        let err = cache
            .native_graph(&mut native, &world, &Mover::default(), LevelId(0), 0.9, false)
            .unwrap_err();
        assert!(matches!(err, GraphError::WrongGridKind(_)));

        let mut gridless = GraphCache::new(GridKind::Gridless, LevelIndex::flat());
        let err = gridless
            .node(&world, Cell::new(0, 0), SizeClass(0), LevelId(0), &Mover::default())
            .unwrap_err();
        assert!(matches!(err, GraphError::WrongGridKind(_)));
    }
}
