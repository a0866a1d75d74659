//! Collaborator contracts: what the engine needs from the host map.
//!
//! All oracle calls are fallible.  A fault is reported back to the search
//! step that made the call and fails only the job that owns that search.

use std::rc::Rc;

use route_core::{Cell, Mover, WorldPoint};

use crate::{GridTopology, OracleError, Wall};

// ── Collision ─────────────────────────────────────────────────────────────────

/// Answers "does a straight move from `from` to `to` cross a blocking
/// obstacle for this mover?".
pub trait CollisionOracle {
    fn step_blocked(
        &self,
        topology: &dyn GridTopology,
        from: Cell,
        to: Cell,
        mover: &Mover,
    ) -> Result<bool, OracleError>;
}

impl<T: CollisionOracle + ?Sized> CollisionOracle for Rc<T> {
    fn step_blocked(
        &self,
        topology: &dyn GridTopology,
        from: Cell,
        to: Cell,
        mover: &Mover,
    ) -> Result<bool, OracleError> {
        (**self).step_blocked(topology, from, to, mover)
    }
}

// ── Terrain ───────────────────────────────────────────────────────────────────

/// One terrain-weighted measurement between two world points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TerrainMeasurement {
    /// Distance in host units (not cells).
    pub distance: f64,
    /// The measurement finished in the "no further diagonal" state: it took a
    /// straight step where a diagonal was due.
    pub ends_without_diagonal: bool,
}

impl TerrainMeasurement {
    pub fn new(distance: f64) -> Self {
        Self { distance, ends_without_diagonal: false }
    }
}

/// Optional variable-terrain cost provider.
pub trait TerrainOracle {
    /// Measure the terrain-weighted distance from `from` to `to` for `mover`.
    ///
    /// With `no_diagonals` set, the measurement starts in the state where
    /// the next diagonal step is priced as a full extra step (the second
    /// diagonal of an alternating pair).
    fn measure(
        &self,
        from: WorldPoint,
        to: WorldPoint,
        mover: &Mover,
        no_diagonals: bool,
    ) -> Result<TerrainMeasurement, OracleError>;
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

/// Source of wall geometry, used for level detection and for building
/// continuous-space graphs.
pub trait ObstacleSource {
    fn walls(&self) -> &[Wall];
}

impl ObstacleSource for Vec<Wall> {
    fn walls(&self) -> &[Wall] {
        self
    }
}

impl<T: ObstacleSource + ?Sized> ObstacleSource for Rc<T> {
    fn walls(&self) -> &[Wall] {
        (**self).walls()
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Borrowed bundle of the read-only collaborators a search step consults.
#[derive(Copy, Clone)]
pub struct World<'a> {
    pub topology:  &'a dyn GridTopology,
    pub collision: &'a dyn CollisionOracle,
    pub terrain:   Option<&'a dyn TerrainOracle>,
    pub obstacles: &'a dyn ObstacleSource,
}

impl<'a> World<'a> {
    pub fn new(
        topology:  &'a dyn GridTopology,
        collision: &'a dyn CollisionOracle,
        obstacles: &'a dyn ObstacleSource,
    ) -> Self {
        Self { topology, collision, terrain: None, obstacles }
    }

    /// Attach a terrain oracle.
    pub fn with_terrain(mut self, terrain: &'a dyn TerrainOracle) -> Self {
        self.terrain = Some(terrain);
        self
    }
}
