//! A* over the cached square/hex adjacency graphs.
//!
//! # One step
//!
//! ```text
//! pop best entry            → none left           ⇒ Exhausted
//! entry.cost > max_cost     →                      ⇒ Exhausted
//! entry.cell == goal        →                      ⇒ Found(entry)
//! close entry.cell, fetch its node from the cache (building it if new),
//! push every open neighbor with cost + step_cost   ⇒ Pending
//! ```
//!
//! The distance cutoff terminates the whole search once the cheapest open
//! entry is over budget; individual edges are never filtered by it.

use std::rc::Rc;

use rustc_hash::FxHashSet;

use route_core::{Cell, LevelId, Mover, SizeClass, footprint_area, footprint_shape};
use route_graph::Neighbor;

use crate::{
    CostModel, Frontier, FrontierEntry, PathSearch, PostProcess, Route, SearchContext,
    SearchError, SearchOptions, SearchResult, StepOutcome,
};

pub struct GridSearch {
    start: Cell,
    goal: Cell,
    mover: Mover,
    /// Footprint offsets, precomputed for terrain costs and string-pulling.
    shape: Vec<Cell>,
    size: SizeClass,
    level: LevelId,
    model: CostModel,
    /// Cutoff in cells; `+∞` when unbounded.
    max_cost: f64,
    interpolate: bool,
    start_cost: f64,

    frontier: Frontier,
    closed: FxHashSet<Cell>,
    /// Neighbors of the node being expanded, copied out of the cache.
    neighbors: Vec<Neighbor>,
    steps: u64,
}

impl GridSearch {
    /// Prepare a search from `start` to `goal` and seed its frontier.
    ///
    /// # Errors
    ///
    /// [`SearchError::StartOutOfBounds`] if `start` is not on the map, and
    /// [`SearchError::Core`] for invalid options.
    pub fn new(
        ctx: &SearchContext<'_>,
        start: Cell,
        goal: Cell,
        options: &SearchOptions,
    ) -> SearchResult<Self> {
        options.validate()?;
        let topology = ctx.world.topology;
        if !topology.in_bounds(start) {
            return Err(SearchError::StartOutOfBounds(start));
        }
        let kind = topology.kind();
        let mover = options.mover;
        let max_cost = options
            .max_distance
            .map_or(f64::INFINITY, |d| (d / topology.distance_per_cell()).round());

        let mut search = Self {
            start,
            goal,
            mover,
            shape: footprint_shape(&mover, kind),
            size: SizeClass::for_mover(&mover, kind),
            level: ctx.cache.level_for(mover.elevation),
            model: CostModel::select(ctx.config.diagonal_rule, &ctx.world, options.ignore_terrain),
            max_cost,
            interpolate: options.interpolate,
            start_cost: options.start_cost,
            frontier: Frontier::new(),
            closed: FxHashSet::default(),
            neighbors: Vec::with_capacity(8),
            steps: 0,
        };
        search.seed();
        Ok(search)
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn level(&self) -> LevelId {
        self.level
    }

    pub fn size_class(&self) -> SizeClass {
        self.size
    }

    pub fn cost_model(&self) -> CostModel {
        self.model
    }

    /// Steps taken since the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn seed(&mut self) {
        self.frontier.clear();
        self.closed.clear();
        self.steps = 0;
        let estimated = self.start_cost + self.model.heuristic(self.start, self.goal);
        self.frontier.push(FrontierEntry::root(self.start, self.start_cost, estimated));
    }

    fn expand(&mut self, ctx: &mut SearchContext<'_>, current: &Rc<FrontierEntry>) -> SearchResult<()> {
        let node = ctx
            .cache
            .node(&ctx.world, current.cell, self.size, self.level, &self.mover)?;
        self.neighbors.clear();
        self.neighbors.extend_from_slice(&node.neighbors);

        let area = if self.model.is_terrain() {
            footprint_area(current.cell, &self.shape, ctx.world.topology.kind())
        } else {
            Vec::new()
        };

        for neighbor in self.neighbors.iter() {
            if self.closed.contains(&neighbor.cell) {
                continue;
            }
            let edge = self.model.step_cost(
                &ctx.world,
                &self.mover,
                &area,
                current.cell,
                neighbor.cell,
                neighbor.diagonal,
                current.cost,
            )?;
            let cost = current.cost + edge;
            self.frontier.push(FrontierEntry {
                cell: neighbor.cell,
                cost,
                estimated: cost + self.model.heuristic(neighbor.cell, self.goal),
                previous: Some(Rc::clone(current)),
            });
        }
        Ok(())
    }
}

impl PathSearch for GridSearch {
    type Found = Rc<FrontierEntry>;

    fn step(&mut self, ctx: &mut SearchContext<'_>) -> StepOutcome<Rc<FrontierEntry>> {
        self.steps += 1;
        let Some(current) = self.frontier.pop() else {
            tracing::trace!(start = %self.start, goal = %self.goal, steps = self.steps, "frontier exhausted");
            return StepOutcome::Exhausted;
        };
        if current.cost > self.max_cost {
            tracing::trace!(cost = current.cost, max = self.max_cost, "distance cutoff reached");
            return StepOutcome::Exhausted;
        }
        if current.cell == self.goal {
            return StepOutcome::Found(current);
        }
        self.closed.insert(current.cell);
        match self.expand(ctx, &current) {
            Ok(()) => StepOutcome::Pending,
            Err(e) => StepOutcome::Fault(e),
        }
    }

    fn finish(&mut self, ctx: &mut SearchContext<'_>, found: Rc<FrontierEntry>) -> SearchResult<Route> {
        let post = PostProcess {
            mover: &self.mover,
            shape: &self.shape,
            model: self.model,
            interpolate: self.interpolate,
        };
        let route = post.run(&ctx.world, &found)?;
        tracing::debug!(
            start = %self.start,
            goal = %self.goal,
            steps = self.steps,
            waypoints = route.len(),
            cost = route.cost,
            "grid route found"
        );
        Ok(route)
    }

    fn reset(&mut self, ctx: &mut SearchContext<'_>) -> SearchResult<()> {
        // The cache may have been rebuilt with a different level layout.
        self.level = ctx.cache.level_for(self.mover.elevation);
        self.seed();
        Ok(())
    }

    fn free(&mut self, _ctx: &mut SearchContext<'_>) {
        self.frontier.clear();
        self.closed.clear();
    }
}
