//! Path reconstruction and string-pulling.
//!
//! The goal entry's `previous` chain is walked back to the start.  With
//! interpolation on, each newly reached waypoint is checked against the one
//! two places behind it: if a straight step between them is unobstructed
//! (and, in terrain mode, no costlier than the two hops it replaces), the
//! waypoint in between is dropped.  This happens during the walk, so a long
//! straight corridor collapses to its two ends.
//!
//! The returned cost is the search's accumulated cost, floored to whole
//! cells and scaled to host distance units.  Simplification only ever
//! removes waypoints and never changes that cost.

use route_core::{Cell, Mover, StepOffset, Waypoint, footprint_area};
use route_graph::{OracleError, World};

use crate::{CostModel, FrontierEntry, Route, cost::terrain_cost};

/// Settings for turning a goal entry into a [`Route`].
pub struct PostProcess<'a> {
    pub mover: &'a Mover,
    pub shape: &'a [Cell],
    pub model: CostModel,
    pub interpolate: bool,
}

impl PostProcess<'_> {
    pub fn run(&self, world: &World<'_>, goal: &FrontierEntry) -> Result<Route, OracleError> {
        let mut path: Vec<Cell> = Vec::new();
        for entry in goal.ancestry() {
            if self.interpolate && path.len() >= 2 {
                let far = path[path.len() - 2];
                let middle = path[path.len() - 1];
                if self.can_skip(world, far, middle, entry.cell)? {
                    path.pop();
                }
            }
            path.push(entry.cell);
        }
        path.reverse();

        Ok(Route {
            waypoints: path.into_iter().map(Waypoint::Cell).collect(),
            cost: goal.cost.floor() * world.topology.distance_per_cell(),
        })
    }

    /// Whether `middle` is redundant between `start` and `end`.
    fn can_skip(
        &self,
        world: &World<'_>,
        start: Cell,
        middle: Cell,
        end: Cell,
    ) -> Result<bool, OracleError> {
        if world
            .collision
            .step_blocked(world.topology, start, end, self.mover)?
        {
            return Ok(false);
        }
        if !self.model.is_terrain() {
            return Ok(true);
        }

        let kind = world.topology.kind();
        let start_area = footprint_area(start, self.shape, kind);
        let middle_area = footprint_area(middle, self.shape, kind);

        let first = terrain_cost(
            world,
            self.mover,
            &start_area,
            StepOffset::between(start, middle, kind),
            0.0,
        )?;
        let second = terrain_cost(
            world,
            self.mover,
            &middle_area,
            StepOffset::between(middle, end, kind),
            first,
        )?;
        let direct = terrain_cost(
            world,
            self.mover,
            &start_area,
            StepOffset::between(start, end, kind),
            0.0,
        )?;
        Ok(direct <= first + second)
    }
}
