//! Engine configuration.
//!
//! # Scheduling
//!
//! The scheduler runs in quanta of `quantum_budget_ms` wall-clock
//! milliseconds.  Within a quantum the head-of-queue job is stepped up to
//! `steps_per_slice` times before the clock is checked again.
//!
//! # Diagonals
//!
//! Rulesets price diagonal moves differently:
//!
//! | Rule          | Per-diagonal cost | Notes                                        |
//! |---------------|-------------------|----------------------------------------------|
//! | `Alternating` | 1.5               | 5-10-5: every second diagonal costs double   |
//! | `Equidistant` | 1.0001            | 5-5-5: the epsilon prefers fewer diagonals   |

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

// ── DiagonalRule ──────────────────────────────────────────────────────────────

/// How diagonal steps on square grids are priced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DiagonalRule {
    /// 5-10-5 diagonals: each diagonal counts 1.5 cells.
    Alternating,
    /// 5-5-5 diagonals: each diagonal counts (just over) one cell.
    #[default]
    Equidistant,
}

impl DiagonalRule {
    /// Cost of a single diagonal step.
    #[inline]
    pub fn diagonal_cost(self) -> f64 {
        match self {
            DiagonalRule::Alternating => 1.5,
            DiagonalRule::Equidistant => 1.0001,
        }
    }

    /// Pick the rule for a game system / grid diagonal setting pair.
    ///
    /// `pf2e` always uses alternating diagonals; otherwise the grid setting
    /// decides (`"5105"` means alternating).
    pub fn for_ruleset(system_id: &str, grid_rule: &str) -> DiagonalRule {
        if system_id == "pf2e" || grid_rule == "5105" {
            DiagonalRule::Alternating
        } else {
            DiagonalRule::Equidistant
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DiagonalRule::Alternating => "alternating",
            DiagonalRule::Equidistant => "equidistant",
        }
    }
}

impl FromStr for DiagonalRule {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "5105" | "alternating" => Ok(DiagonalRule::Alternating),
            "555" | "equidistant" => Ok(DiagonalRule::Equidistant),
            other => Err(CoreError::Config(format!(
                "invalid diagonal rule {other:?}: expected \"5105\", \"555\", \"alternating\" or \"equidistant\""
            ))),
        }
    }
}

impl fmt::Display for DiagonalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── EngineConfig ──────────────────────────────────────────────────────────────

/// Top-level engine configuration.
///
/// Typically deserialized from the host's settings store (feature `serde`);
/// missing fields take their defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Steps granted to the head-of-queue job between clock checks.
    pub steps_per_slice: u32,

    /// Wall-clock budget of one scheduling quantum, in milliseconds.
    pub quantum_budget_ms: u64,

    /// Diagonal pricing on square grids.
    pub diagonal_rule: DiagonalRule,

    /// Gridless footprint diameter as a fraction of `size × cell_size`.
    pub gridless_size_ratio: f64,

    /// Whether wall top/bottom heights split the map into levels.
    pub height_aware: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            steps_per_slice: 20,
            quantum_budget_ms: 50,
            diagonal_rule: DiagonalRule::default(),
            gridless_size_ratio: 0.9,
            height_aware: false,
        }
    }
}

impl EngineConfig {
    /// Reject settings the scheduler or graph cache cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.steps_per_slice == 0 {
            return Err(CoreError::Config("steps_per_slice must be at least 1".into()));
        }
        if self.quantum_budget_ms == 0 {
            return Err(CoreError::Config("quantum_budget_ms must be at least 1".into()));
        }
        if !(self.gridless_size_ratio > 0.0 && self.gridless_size_ratio.is_finite()) {
            return Err(CoreError::Config(format!(
                "gridless_size_ratio must be a positive number, got {}",
                self.gridless_size_ratio
            )));
        }
        Ok(())
    }

    /// The quantum budget as a `Duration`.
    #[inline]
    pub fn quantum_budget(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.quantum_budget_ms)
    }
}
