//! Step costs and the search heuristic.
//!
//! # Modes
//!
//! | Mode      | Orthogonal | Diagonal                        |
//! |-----------|------------|---------------------------------|
//! | `Fixed`   | 1          | `DiagonalRule::diagonal_cost()` |
//! | `Terrain` | measured   | measured                        |
//!
//! In terrain mode every cell of the mover's footprint is translated by the
//! step and measured through the [`TerrainOracle`]; the worst cell prices the
//! whole step.
//!
//! # Half steps
//!
//! Under alternating diagonals the accumulated cost of a path that has taken
//! an odd number of diagonals ends in `.5`.  When the accumulated cost's
//! fractional part lies strictly between 0.25 and 0.75 the oracle measures in
//! "no further diagonal" mode, and a measurement that finishes in that state
//! is charged an extra half cell.
//!
//! [`TerrainOracle`]: route_graph::TerrainOracle

use route_core::{Cell, DiagonalRule, Mover, StepOffset};
use route_graph::{OracleError, World};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CostModel {
    Fixed(DiagonalRule),
    /// Terrain-weighted; the rule still shapes the heuristic.
    Terrain(DiagonalRule),
}

impl CostModel {
    /// Terrain mode when the world has a terrain oracle and the caller did
    /// not opt out.
    pub fn select(rule: DiagonalRule, world: &World<'_>, ignore_terrain: bool) -> Self {
        if world.terrain.is_some() && !ignore_terrain {
            CostModel::Terrain(rule)
        } else {
            CostModel::Fixed(rule)
        }
    }

    pub fn rule(self) -> DiagonalRule {
        match self {
            CostModel::Fixed(rule) | CostModel::Terrain(rule) => rule,
        }
    }

    pub fn is_terrain(self) -> bool {
        matches!(self, CostModel::Terrain(_))
    }

    /// Admissible estimate from `from` to `to` in cells.
    ///
    /// Chebyshev distance; alternating diagonals add half a cell for each
    /// diagonal the straight-line route needs.
    pub fn heuristic(self, from: Cell, to: Cell) -> f64 {
        let (dx, dy) = from.abs_delta(to);
        let base = dx.max(dy) as f64;
        match self.rule() {
            DiagonalRule::Alternating => base + dx.min(dy) as f64 * 0.5,
            DiagonalRule::Equidistant => base,
        }
    }

    /// Cost of one step from `from` to `to`.
    ///
    /// `area` is the footprint at `from` (only read in terrain mode) and
    /// `accumulated` the cost already spent before the step.
    pub fn step_cost(
        self,
        world: &World<'_>,
        mover: &Mover,
        area: &[Cell],
        from: Cell,
        to: Cell,
        diagonal: bool,
        accumulated: f64,
    ) -> Result<f64, OracleError> {
        match self {
            CostModel::Fixed(rule) => Ok(if diagonal { rule.diagonal_cost() } else { 1.0 }),
            CostModel::Terrain(_) => {
                let offset = StepOffset::between(from, to, world.topology.kind());
                terrain_cost(world, mover, area, offset, accumulated)
            }
        }
    }
}

/// Worst terrain-weighted distance, in cells, over every footprint cell
/// translated by `offset`.
///
/// Returns 0 without a terrain oracle.
pub fn terrain_cost(
    world: &World<'_>,
    mover: &Mover,
    area: &[Cell],
    offset: StepOffset,
    accumulated: f64,
) -> Result<f64, OracleError> {
    let Some(terrain) = world.terrain else {
        return Ok(0.0);
    };
    let topology = world.topology;
    let kind = topology.kind();
    let per_cell = topology.distance_per_cell();

    let half_step = accumulated.rem_euclid(1.0);
    let no_diagonals = half_step > 0.25 && half_step < 0.75;

    let mut worst = 0.0_f64;
    for &src in area {
        let dst = offset.apply(src, kind);
        let m = terrain.measure(
            topology.cell_center(src),
            topology.cell_center(dst),
            mover,
            no_diagonals,
        )?;
        let mut cells = (m.distance / per_cell).round();
        if m.ends_without_diagonal {
            cells += 0.5;
        }
        worst = worst.max(cells);
    }
    Ok(worst)
}
