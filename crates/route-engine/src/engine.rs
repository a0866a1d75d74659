//! The `Engine` context object and its public operations.

use std::rc::Rc;

use route_core::{EngineConfig, GridKind, JobId, Waypoint};
use route_graph::{
    CollisionOracle, GraphCache, GridTopology, NativeEngine, ObstacleSource, TerrainOracle,
    WallIndex, World,
};
use route_schedule::{Clock, Job, PathTicket, QuantumObserver, QuantumReport, Scheduler, ticket};
use route_search::{
    AnySearch, GridSearch, GridlessSearch, PathSearch, Route, SearchContext, SearchOptions,
    StepOutcome,
};

use crate::{EngineError, EngineResult};

// ── Split borrows ─────────────────────────────────────────────────────────────

/// Disjoint borrows of the engine's fields for one operation.
struct Parts<'a> {
    ctx:       SearchContext<'a>,
    scheduler: &'a mut Scheduler,
    clock:     &'a dyn Clock,
    observer:  &'a mut dyn QuantumObserver,
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Owner of the graph cache, the job queue and every host collaborator.
///
/// The engine is single-threaded.  The host calls [`Engine::run_quantum`]
/// from its event loop while [`Engine::wants_quantum`] is `true`; quanta
/// never overlap and the cache is only rebuilt between them.
///
/// Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct Engine {
    pub(crate) topology:  Box<dyn GridTopology>,
    pub(crate) collision: Box<dyn CollisionOracle>,
    pub(crate) obstacles: Box<dyn ObstacleSource>,
    pub(crate) terrain:   Option<Box<dyn TerrainOracle>>,
    pub(crate) native:    Option<Box<dyn NativeEngine>>,
    pub(crate) clock:     Box<dyn Clock>,
    pub(crate) observer:  Box<dyn QuantumObserver>,
    pub(crate) config:    EngineConfig,
    pub(crate) cache:     GraphCache,
    pub(crate) scheduler: Scheduler,
    pub(crate) next_job:  JobId,
}

impl Engine {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid_kind(&self) -> GridKind {
        self.topology.kind()
    }

    pub fn cache(&self) -> &GraphCache {
        &self.cache
    }

    /// Jobs waiting in the queue, including the one being stepped.
    pub fn queued(&self) -> usize {
        self.scheduler.len()
    }

    /// `true` while the host should schedule another quantum.
    pub fn wants_quantum(&self) -> bool {
        !self.scheduler.is_empty()
    }

    /// `true` if the ticket's job is still queued.
    pub fn is_queued(&self, ticket: &PathTicket) -> bool {
        self.scheduler.contains(ticket.id())
    }

    // ── Searches ──────────────────────────────────────────────────────────

    /// Queue a search from `from` to `to` and return its ticket.
    ///
    /// Square and hex maps take [`Waypoint::Cell`]s, gridless maps take
    /// [`Waypoint::Point`]s.  If the queue was idle a quantum runs before
    /// this returns, so short searches may already be resolved.
    ///
    /// # Errors
    ///
    /// Only configuration problems: mismatched waypoints, invalid options,
    /// a start cell off the map, or a native engine failing to build a
    /// graph or create the search.
    pub fn submit_search(
        &mut self,
        from: Waypoint,
        to: Waypoint,
        options: SearchOptions,
    ) -> EngineResult<PathTicket> {
        let search = self.create_search(from, to, &options)?;
        let id = self.next_job;
        self.next_job = id.next();

        let (ticket, completer) = ticket(id);
        let was_idle = self.scheduler.is_empty();
        tracing::trace!(job = %id, %from, %to, "search submitted");
        self.scheduler.submit(Job::new(search, completer));
        if was_idle {
            self.run_quantum();
        }
        Ok(ticket)
    }

    /// Run a search to completion on the caller's stack, bypassing the queue.
    ///
    /// Returns `Ok(None)` when no route exists within `max_distance`.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnboundedBlockingSearch`] if `options` carries no
    /// distance bound, any error [`Engine::submit_search`] reports, and the
    /// fault that stopped the search.
    pub fn await_search_blocking(
        &mut self,
        from: Waypoint,
        to: Waypoint,
        options: SearchOptions,
    ) -> EngineResult<Option<Route>> {
        if !options.is_bounded() {
            return Err(EngineError::UnboundedBlockingSearch);
        }
        let mut search = self.create_search(from, to, &options)?;
        let mut parts = self.parts();
        let result = loop {
            match search.step(&mut parts.ctx) {
                StepOutcome::Pending => continue,
                StepOutcome::Found(route) => break Ok(Some(route)),
                StepOutcome::Exhausted => break Ok(None),
                StepOutcome::Fault(e) => break Err(e.into()),
            }
        };
        search.free(&mut parts.ctx);
        result
    }

    /// Remove the ticket's job from the queue.  Its ticket never resolves.
    ///
    /// Returns `false` if the job already finished or was cancelled.
    pub fn cancel_search(&mut self, ticket: &PathTicket) -> bool {
        let Parts { mut ctx, scheduler, .. } = self.parts();
        scheduler.cancel(ticket.id(), &mut ctx)
    }

    /// Cancel every queued job, e.g. when the host switches scenes.
    pub fn clear_jobs(&mut self) -> usize {
        let Parts { mut ctx, scheduler, .. } = self.parts();
        scheduler.cancel_all(&mut ctx)
    }

    // ── Scheduling ────────────────────────────────────────────────────────

    /// Run one scheduling quantum.
    pub fn run_quantum(&mut self) -> QuantumReport {
        let Parts { mut ctx, scheduler, clock, observer } = self.parts();
        scheduler.run_quantum(&mut ctx, clock, observer)
    }

    /// Run quanta until the queue is empty.  Returns how many ran.
    pub fn run_until_idle(&mut self) -> u64 {
        let mut quanta = 0;
        while self.wants_quantum() {
            self.run_quantum();
            quanta += 1;
        }
        quanta
    }

    // ── Invalidation ──────────────────────────────────────────────────────

    /// Discard every cached graph, re-detect levels and restart all queued
    /// searches against the fresh cache.
    pub fn invalidate_cache(&mut self) {
        let cache = GraphCache::build(&self.world(), self.config.height_aware);
        self.cache = cache;
        if let Some(native) = self.native.as_mut() {
            native.release_graphs();
        }
        tracing::debug!(
            levels = self.cache.levels().level_count(),
            jobs = self.scheduler.len(),
            "graph cache invalidated"
        );
        let Parts { mut ctx, scheduler, .. } = self.parts();
        scheduler.reset_all(&mut ctx);
    }

    /// Replace the wall set and invalidate.
    pub fn set_walls(&mut self, walls: WallIndex) {
        let walls = Rc::new(walls.height_aware(self.config.height_aware));
        self.collision = Box::new(Rc::clone(&walls));
        self.obstacles = Box::new(walls);
        self.invalidate_cache();
    }

    /// Replace the grid and invalidate.  Queued jobs are cancelled when the
    /// grid kind changes, since their waypoints no longer apply.
    pub fn set_topology(&mut self, topology: impl GridTopology + 'static) -> EngineResult<()> {
        if topology.kind().is_gridless() && self.native.is_none() {
            return Err(EngineError::NativeEngineMissing);
        }
        if topology.kind() != self.topology.kind() {
            self.clear_jobs();
        }
        self.topology = Box::new(topology);
        self.invalidate_cache();
        Ok(())
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn world(&self) -> World<'_> {
        let world = World::new(&*self.topology, &*self.collision, &*self.obstacles);
        match &self.terrain {
            Some(t) => world.with_terrain(&**t),
            None => world,
        }
    }

    fn parts(&mut self) -> Parts<'_> {
        let Engine {
            ref topology,
            ref collision,
            ref obstacles,
            ref terrain,
            ref mut native,
            ref clock,
            ref mut observer,
            ref config,
            ref mut cache,
            ref mut scheduler,
            ..
        } = *self;

        let mut world = World::new(&**topology, &**collision, &**obstacles);
        if let Some(t) = terrain {
            world = world.with_terrain(&**t);
        }
        let native: Option<&mut dyn NativeEngine> = match native {
            Some(n) => Some(&mut **n),
            None => None,
        };
        Parts {
            ctx: SearchContext { world, cache, native, config },
            scheduler,
            clock: &**clock,
            observer: &mut **observer,
        }
    }

    fn create_search(
        &mut self,
        from: Waypoint,
        to: Waypoint,
        options: &SearchOptions,
    ) -> EngineResult<AnySearch> {
        let kind = self.topology.kind();
        let mut parts = self.parts();
        if kind.is_gridless() {
            let (Some(a), Some(b)) = (from.as_point(), to.as_point()) else {
                return Err(EngineError::WaypointMismatch { kind, expected: "point" });
            };
            Ok(GridlessSearch::new(&mut parts.ctx, a, b, options)?.into())
        } else {
            let (Some(a), Some(b)) = (from.as_cell(), to.as_cell()) else {
                return Err(EngineError::WaypointMismatch { kind, expected: "cell" });
            };
            Ok(GridSearch::new(&parts.ctx, a, b, options)?.into())
        }
    }
}
