//! Continuous-space search, delegated to the native engine.

use route_core::{Waypoint, WorldPoint};
use route_graph::{NativeEngine, NativeRoute, NativeSearch, NativeStep};

use crate::{PathSearch, Route, SearchContext, SearchError, SearchOptions, SearchResult, StepOutcome};

/// Handle-holding wrapper around a native search.
pub struct GridlessSearch {
    handle: NativeSearch,
    freed: bool,
}

impl GridlessSearch {
    /// Fetch (or build) the native graph for the mover's size and level and
    /// create a search on it.
    pub fn new(
        ctx: &mut SearchContext<'_>,
        from: WorldPoint,
        to: WorldPoint,
        options: &SearchOptions,
    ) -> SearchResult<Self> {
        options.validate()?;
        let native = ctx.native.as_deref_mut().ok_or(SearchError::NativeEngineMissing)?;
        let mover = &options.mover;
        let level = ctx.cache.level_for(mover.elevation);
        let graph = ctx.cache.native_graph(
            native,
            &ctx.world,
            mover,
            level,
            ctx.config.gridless_size_ratio,
            ctx.config.height_aware,
        )?;
        let handle = native.create_search(from, to, graph, options.max_distance)?;
        Ok(Self { handle, freed: false })
    }

    pub fn handle(&self) -> NativeSearch {
        self.handle
    }

    fn engine<'c, 'a>(
        ctx: &'c mut SearchContext<'a>,
    ) -> SearchResult<&'c mut (dyn NativeEngine + 'a)> {
        ctx.native.as_deref_mut().ok_or(SearchError::NativeEngineMissing)
    }
}

impl PathSearch for GridlessSearch {
    type Found = NativeRoute;

    fn step(&mut self, ctx: &mut SearchContext<'_>) -> StepOutcome<NativeRoute> {
        let native = match Self::engine(ctx) {
            Ok(n) => n,
            Err(e) => return StepOutcome::Fault(e),
        };
        match native.step(self.handle) {
            Ok(NativeStep::Pending) => StepOutcome::Pending,
            Ok(NativeStep::Found(route)) => StepOutcome::Found(route),
            Ok(NativeStep::NoPath) => StepOutcome::Exhausted,
            Err(e) => StepOutcome::Fault(e.into()),
        }
    }

    fn finish(&mut self, _ctx: &mut SearchContext<'_>, found: NativeRoute) -> SearchResult<Route> {
        tracing::debug!(waypoints = found.path.len(), cost = found.cost, "gridless route found");
        Ok(Route {
            waypoints: found.path.into_iter().map(Waypoint::Point).collect(),
            cost: found.cost,
        })
    }

    fn reset(&mut self, ctx: &mut SearchContext<'_>) -> SearchResult<()> {
        Self::engine(ctx)?.reset(self.handle)?;
        Ok(())
    }

    fn free(&mut self, ctx: &mut SearchContext<'_>) {
        if self.freed {
            return;
        }
        if let Ok(native) = Self::engine(ctx) {
            native.dispose(self.handle);
            self.freed = true;
        }
    }
}
