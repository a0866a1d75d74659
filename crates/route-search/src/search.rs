//! The resumable search interface shared by grid and gridless searches.
//!
//! A search never runs to completion on its own: the caller drives it with
//! [`PathSearch::step`] and inspects the [`StepOutcome`].  Everything a step
//! may touch (oracles, graph cache, native engine) is lent to it for the
//! duration of the call through a [`SearchContext`].

use route_core::{EngineConfig, Waypoint};
use route_graph::{GraphCache, NativeEngine, World};

use crate::{GridSearch, GridlessSearch, SearchError, SearchResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// A finished route.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// Waypoints from start to goal, inclusive.
    pub waypoints: Vec<Waypoint>,
    /// Total cost in host distance units.
    pub cost: f64,
}

impl Route {
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

// ── StepOutcome ───────────────────────────────────────────────────────────────

/// Result of one [`PathSearch::step`].
#[derive(Debug)]
pub enum StepOutcome<T> {
    /// No result yet; step again.
    Pending,
    /// The goal was reached.
    Found(T),
    /// The frontier ran dry or the distance cutoff was hit.  Not an error.
    Exhausted,
    /// A collaborator failed.  The search must not be stepped again.
    Fault(SearchError),
}

impl<T> StepOutcome<T> {
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, StepOutcome::Pending)
    }
}

// ── SearchContext ─────────────────────────────────────────────────────────────

/// Everything a search step borrows from the engine.
pub struct SearchContext<'a> {
    pub world:  World<'a>,
    pub cache:  &'a mut GraphCache,
    pub native: Option<&'a mut dyn NativeEngine>,
    pub config: &'a EngineConfig,
}

// ── PathSearch ────────────────────────────────────────────────────────────────

/// A search that can be advanced one bounded step at a time.
pub trait PathSearch {
    /// What a successful step yields before post-processing.
    type Found;

    /// One pop-and-expand cycle.
    fn step(&mut self, ctx: &mut SearchContext<'_>) -> StepOutcome<Self::Found>;

    /// Turn a successful step's result into the caller-visible route.
    fn finish(&mut self, ctx: &mut SearchContext<'_>, found: Self::Found) -> SearchResult<Route>;

    /// Restart from the start position, e.g. after the cache was rebuilt.
    fn reset(&mut self, ctx: &mut SearchContext<'_>) -> SearchResult<()>;

    /// Release resources held outside this value.  Idempotent.
    fn free(&mut self, ctx: &mut SearchContext<'_>);
}

// ── AnySearch ─────────────────────────────────────────────────────────────────

/// Either search variant.  Post-processes inside `step`, so a `Found`
/// outcome already carries the final [`Route`].
pub enum AnySearch {
    Grid(GridSearch),
    Gridless(GridlessSearch),
}

impl AnySearch {
    pub fn is_gridless(&self) -> bool {
        matches!(self, AnySearch::Gridless(_))
    }
}

/// Step `search` and post-process on success; a failed post-process turns
/// into a fault.
fn step_and_finish<S: PathSearch>(search: &mut S, ctx: &mut SearchContext<'_>) -> StepOutcome<Route> {
    match search.step(ctx) {
        StepOutcome::Pending => StepOutcome::Pending,
        StepOutcome::Exhausted => StepOutcome::Exhausted,
        StepOutcome::Fault(e) => StepOutcome::Fault(e),
        StepOutcome::Found(found) => match search.finish(ctx, found) {
            Ok(route) => StepOutcome::Found(route),
            Err(e) => StepOutcome::Fault(e),
        },
    }
}

impl PathSearch for AnySearch {
    type Found = Route;

    fn step(&mut self, ctx: &mut SearchContext<'_>) -> StepOutcome<Route> {
        match self {
            AnySearch::Grid(s) => step_and_finish(s, ctx),
            AnySearch::Gridless(s) => step_and_finish(s, ctx),
        }
    }

    fn finish(&mut self, _ctx: &mut SearchContext<'_>, found: Route) -> SearchResult<Route> {
        Ok(found)
    }

    fn reset(&mut self, ctx: &mut SearchContext<'_>) -> SearchResult<()> {
        match self {
            AnySearch::Grid(s) => s.reset(ctx),
            AnySearch::Gridless(s) => s.reset(ctx),
        }
    }

    fn free(&mut self, ctx: &mut SearchContext<'_>) {
        match self {
            AnySearch::Grid(s) => s.free(ctx),
            AnySearch::Gridless(s) => s.free(ctx),
        }
    }
}

impl From<GridSearch> for AnySearch {
    fn from(s: GridSearch) -> Self {
        AnySearch::Grid(s)
    }
}

impl From<GridlessSearch> for AnySearch {
    fn from(s: GridlessSearch) -> Self {
        AnySearch::Gridless(s)
    }
}
