//! Per-search options.

use route_core::{CoreError, CoreResult, Mover};

/// Caller-supplied knobs for one search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOptions {
    /// Footprint and elevation of the entity being routed.
    pub mover: Mover,
    /// Cutoff in host distance units.  `None` searches without bound.
    pub max_distance: Option<f64>,
    /// Drop waypoints that a straight, unobstructed step makes redundant.
    pub interpolate: bool,
    /// Use fixed step costs even when a terrain oracle is present.
    pub ignore_terrain: bool,
    /// Cost already spent before the first step, in cells.
    pub start_cost: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            mover: Mover::default(),
            max_distance: None,
            interpolate: true,
            ignore_terrain: false,
            start_cost: 0.0,
        }
    }
}

impl SearchOptions {
    pub fn for_mover(mover: Mover) -> Self {
        Self { mover, ..Self::default() }
    }

    pub fn max_distance(mut self, distance: f64) -> Self {
        self.max_distance = Some(distance);
        self
    }

    pub fn interpolate(mut self, enabled: bool) -> Self {
        self.interpolate = enabled;
        self
    }

    pub fn ignore_terrain(mut self, ignore: bool) -> Self {
        self.ignore_terrain = ignore;
        self
    }

    pub fn start_cost(mut self, cost: f64) -> Self {
        self.start_cost = cost;
        self
    }

    /// `true` if the search has a finite distance bound.
    pub fn is_bounded(&self) -> bool {
        self.max_distance.is_some_and(f64::is_finite)
    }

    pub fn validate(&self) -> CoreResult<()> {
        self.mover.validate()?;
        if let Some(d) = self.max_distance {
            if d.is_nan() || d < 0.0 {
                return Err(CoreError::Config(format!(
                    "max_distance must be a non-negative number, got {d}"
                )));
            }
        }
        if !(self.start_cost >= 0.0 && self.start_cost.is_finite()) {
            return Err(CoreError::Config(format!(
                "start_cost must be a non-negative number, got {}",
                self.start_cost
            )));
        }
        Ok(())
    }
}
