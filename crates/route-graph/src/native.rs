//! Boundary to the opaque continuous-space ("gridless") search engine.
//!
//! The engine owns its graphs and searches; this side only holds handles.
//! Handles are plain ids so they can be stored in the [`GraphCache`] and in
//! queued jobs without borrowing the engine.
//!
//! [`GraphCache`]: crate::GraphCache

use route_core::WorldPoint;

use crate::{OracleError, Wall};

/// Handle to a navigation graph built by a [`NativeEngine`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NativeGraph(pub u64);

/// Handle to an in-progress search owned by a [`NativeEngine`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NativeSearch(pub u64);

/// A finished continuous-space route.  The engine has already simplified it
/// and priced it in host distance units.
#[derive(Clone, Debug, PartialEq)]
pub struct NativeRoute {
    pub path: Vec<WorldPoint>,
    pub cost: f64,
}

/// Result of one native search step.
#[derive(Clone, Debug, PartialEq)]
pub enum NativeStep {
    Pending,
    Found(NativeRoute),
    /// No route within the distance bound.
    NoPath,
}

/// Capabilities the continuous-space engine must provide.
pub trait NativeEngine {
    /// Build a navigation graph around `walls` for a circular footprint of
    /// `radius` pixels at `elevation`.
    fn build_graph(
        &mut self,
        walls: &[Wall],
        radius: f64,
        elevation: f64,
        height_aware: bool,
    ) -> Result<NativeGraph, OracleError>;

    /// Start a search on `graph`.  `max_distance` is in host units;
    /// `None` means unbounded.
    fn create_search(
        &mut self,
        from: WorldPoint,
        to: WorldPoint,
        graph: NativeGraph,
        max_distance: Option<f64>,
    ) -> Result<NativeSearch, OracleError>;

    /// Advance `search` by one step.
    fn step(&mut self, search: NativeSearch) -> Result<NativeStep, OracleError>;

    /// Restart `search` from its start point.
    fn reset(&mut self, search: NativeSearch) -> Result<(), OracleError>;

    /// Release `search`.  Disposing an unknown handle is a no-op.
    fn dispose(&mut self, search: NativeSearch);

    /// Drop every graph the engine built.  Called when the graph cache is
    /// discarded; live searches are reset separately.
    fn release_graphs(&mut self) {}
}
