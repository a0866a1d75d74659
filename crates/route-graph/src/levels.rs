//! Vertical partitioning of the map into levels.
//!
//! # Bands and levels
//!
//! Wall tops and bottoms become [`ElevationBand`]s, sorted by elevation.  The
//! gap between two adjacent bands is one level, addressed by a zero-based
//! [`LevelId`]:
//!
//! ```text
//! band:   -∞(bottom)   0(bottom)   10(top)   +∞(top)
//! level:        0            1          2
//! ```
//!
//! An elevation exactly on a band belongs to the level above a bottom band
//! and to the level below a top band.  At equal elevations bottom bands sort
//! before top bands, which makes "bands at or below the elevation" a prefix of
//! the sequence and lets [`LevelIndex::level_for`] binary-search it.

use std::cmp::Ordering;

use route_core::LevelId;

use crate::Wall;

// ── ElevationBand ─────────────────────────────────────────────────────────────

/// A wall top (`is_top`) or bottom at a given elevation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElevationBand {
    pub elevation: f64,
    pub is_top: bool,
}

impl ElevationBand {
    pub const fn bottom(elevation: f64) -> Self {
        Self { elevation, is_top: false }
    }

    pub const fn top(elevation: f64) -> Self {
        Self { elevation, is_top: true }
    }

    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.elevation
            .total_cmp(&other.elevation)
            .then(self.is_top.cmp(&other.is_top))
    }
}

// ── LevelIndex ────────────────────────────────────────────────────────────────

/// Sorted band sequence, always bracketed by a `-∞` bottom and a `+∞` top.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelIndex {
    bands: Vec<ElevationBand>,
}

impl Default for LevelIndex {
    fn default() -> Self {
        Self::flat()
    }
}

impl LevelIndex {
    /// A single level spanning all elevations.
    pub fn flat() -> Self {
        Self {
            bands: vec![
                ElevationBand::bottom(f64::NEG_INFINITY),
                ElevationBand::top(f64::INFINITY),
            ],
        }
    }

    /// Build from arbitrary bands.  Adds the `±∞` sentinels, sorts, and drops
    /// duplicates and NaN elevations.
    pub fn from_bands(bands: impl IntoIterator<Item = ElevationBand>) -> Self {
        let mut all: Vec<ElevationBand> = Self::flat().bands;
        all.extend(bands.into_iter().filter(|b| !b.elevation.is_nan()));
        all.sort_by(ElevationBand::sort_cmp);
        all.dedup_by(|a, b| a.sort_cmp(b) == Ordering::Equal);
        Self { bands: all }
    }

    /// Detect levels from wall heights.
    ///
    /// Without height awareness every wall spans all elevations and the map
    /// is a single level.
    pub fn detect(walls: &[Wall], height_aware: bool) -> Self {
        if !height_aware {
            return Self::flat();
        }
        let bands = walls.iter().flat_map(|w| {
            [ElevationBand::top(w.top), ElevationBand::bottom(w.bottom)]
        });
        let index = Self::from_bands(bands);
        tracing::debug!(levels = index.level_count(), walls = walls.len(), "detected levels");
        index
    }

    /// Level containing `elevation`.
    pub fn level_for(&self, elevation: f64) -> LevelId {
        let at_or_below = self.bands.partition_point(|band| {
            band.elevation < elevation || (band.elevation == elevation && !band.is_top)
        });
        // The -∞ bottom band is always counted, so `at_or_below >= 1` for any
        // elevation above -∞.
        LevelId(at_or_below.saturating_sub(1).min(self.level_count() - 1) as u32)
    }

    /// Number of levels (gaps between adjacent bands).
    pub fn level_count(&self) -> usize {
        self.bands.len() - 1
    }

    pub fn bands(&self) -> &[ElevationBand] {
        &self.bands
    }
}
