//! Fluent builder for constructing an [`Engine`].

use std::rc::Rc;

use route_core::{EngineConfig, JobId};
use route_graph::{
    CollisionOracle, GraphCache, GridTopology, LevelIndex, NativeEngine, ObstacleSource,
    TerrainOracle, WallIndex,
};
use route_schedule::{Clock, NoopObserver, QuantumObserver, Scheduler, SystemClock};

use crate::{Engine, EngineError, EngineResult};

/// Fluent builder for [`Engine`].
///
/// # Required inputs
///
/// - [`EngineConfig`]: slice size, quantum budget, diagonal rule, ...
/// - a [`GridTopology`]: [`SquareGrid`], [`HexGrid`] or [`ContinuousSpace`]
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                                     |
/// |------------------|---------------------------------------------|
/// | `.walls(w)`      | No walls                                    |
/// | `.collision(c)`  | The wall index from `.walls`                |
/// | `.obstacles(o)`  | The wall index from `.walls`                |
/// | `.terrain(t)`    | None (fixed step costs)                     |
/// | `.native(n)`     | None; required on gridless maps             |
/// | `.clock(c)`      | [`SystemClock`]                             |
/// | `.observer(o)`   | [`NoopObserver`]                            |
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(EngineConfig::default(), SquareGrid::new(20, 20, 100.0, 5.0))
///     .walls(WallIndex::new(load_walls_csv("walls.csv")?))
///     .build()?;
/// let ticket = engine.submit_search(from, to, SearchOptions::default())?;
/// engine.run_until_idle();
/// ```
///
/// [`SquareGrid`]: route_graph::SquareGrid
/// [`HexGrid`]: route_graph::HexGrid
/// [`ContinuousSpace`]: route_graph::ContinuousSpace
pub struct EngineBuilder {
    config:    EngineConfig,
    topology:  Box<dyn GridTopology>,
    walls:     Option<WallIndex>,
    collision: Option<Box<dyn CollisionOracle>>,
    obstacles: Option<Box<dyn ObstacleSource>>,
    terrain:   Option<Box<dyn TerrainOracle>>,
    native:    Option<Box<dyn NativeEngine>>,
    clock:     Option<Box<dyn Clock>>,
    observer:  Option<Box<dyn QuantumObserver>>,
}

impl EngineBuilder {
    pub fn new(config: EngineConfig, topology: impl GridTopology + 'static) -> Self {
        Self {
            config,
            topology:  Box::new(topology),
            walls:     None,
            collision: None,
            obstacles: None,
            terrain:   None,
            native:    None,
            clock:     None,
            observer:  None,
        }
    }

    /// Use `walls` both as the collision oracle and as the obstacle source.
    ///
    /// The index follows [`EngineConfig::height_aware`] regardless of how it
    /// was built.
    pub fn walls(mut self, walls: WallIndex) -> Self {
        self.walls = Some(walls);
        self
    }

    /// Override the collision oracle.
    pub fn collision(mut self, collision: impl CollisionOracle + 'static) -> Self {
        self.collision = Some(Box::new(collision));
        self
    }

    /// Override the obstacle source used for level detection and native graphs.
    pub fn obstacles(mut self, obstacles: impl ObstacleSource + 'static) -> Self {
        self.obstacles = Some(Box::new(obstacles));
        self
    }

    pub fn terrain(mut self, terrain: impl TerrainOracle + 'static) -> Self {
        self.terrain = Some(Box::new(terrain));
        self
    }

    pub fn native(mut self, native: impl NativeEngine + 'static) -> Self {
        self.native = Some(Box::new(native));
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn observer(mut self, observer: impl QuantumObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Validate the configuration, detect levels and return an idle engine.
    pub fn build(self) -> EngineResult<Engine> {
        self.config.validate()?;
        let kind = self.topology.kind();
        if kind.is_gridless() && self.native.is_none() {
            return Err(EngineError::NativeEngineMissing);
        }

        let walls = self.walls.unwrap_or_else(|| WallIndex::new(Vec::new()));
        let walls = Rc::new(walls.height_aware(self.config.height_aware));
        let collision = self.collision.unwrap_or_else(|| Box::new(Rc::clone(&walls)));
        let obstacles = self.obstacles.unwrap_or_else(|| Box::new(walls));

        let mut engine = Engine {
            topology: self.topology,
            collision,
            obstacles,
            terrain: self.terrain,
            native: self.native,
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock::new())),
            observer: self.observer.unwrap_or_else(|| Box::new(NoopObserver)),
            scheduler: Scheduler::new(&self.config),
            cache: GraphCache::new(kind, LevelIndex::flat()),
            config: self.config,
            next_job: JobId(1),
        };
        engine.invalidate_cache();
        Ok(engine)
    }
}
