//! Grid and world coordinates.
//!
//! Discrete maps address positions by integer [`Cell`] coordinates; the
//! continuous ("gridless") mode works in pixel-space [`WorldPoint`]s.  Both
//! show up as endpoints and as route waypoints, so [`Waypoint`] carries
//! either.

use std::fmt;
use std::ops::{Add, Sub};

// ── Cell ──────────────────────────────────────────────────────────────────────

/// Integer grid coordinates.  `x` grows right (column), `y` grows down (row).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev (L∞) distance in cells.
    #[inline]
    pub fn chebyshev(self, other: Cell) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// `(|dx|, |dy|)` between two cells.
    #[inline]
    pub fn abs_delta(self, other: Cell) -> (i32, i32) {
        ((self.x - other.x).abs(), (self.y - other.y).abs())
    }
}

impl Add for Cell {
    type Output = Cell;
    #[inline]
    fn add(self, rhs: Cell) -> Cell {
        Cell::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Cell {
    type Output = Cell;
    #[inline]
    fn sub(self, rhs: Cell) -> Cell {
        Cell::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── WorldPoint ────────────────────────────────────────────────────────────────

/// A point in continuous world (pixel) space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance_to(self, other: WorldPoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ── Waypoint ──────────────────────────────────────────────────────────────────

/// A search endpoint or route waypoint: a grid cell on discrete maps, a world
/// point on gridless maps.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Waypoint {
    Cell(Cell),
    Point(WorldPoint),
}

impl Waypoint {
    /// The cell, if this is a discrete waypoint.
    #[inline]
    pub fn as_cell(self) -> Option<Cell> {
        match self {
            Waypoint::Cell(c) => Some(c),
            Waypoint::Point(_) => None,
        }
    }

    /// The world point, if this is a continuous waypoint.
    #[inline]
    pub fn as_point(self) -> Option<WorldPoint> {
        match self {
            Waypoint::Point(p) => Some(p),
            Waypoint::Cell(_) => None,
        }
    }
}

impl From<Cell> for Waypoint {
    fn from(c: Cell) -> Self {
        Waypoint::Cell(c)
    }
}

impl From<WorldPoint> for Waypoint {
    fn from(p: WorldPoint) -> Self {
        Waypoint::Point(p)
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Waypoint::Cell(c) => c.fmt(f),
            Waypoint::Point(p) => p.fmt(f),
        }
    }
}

// ── GridKind ──────────────────────────────────────────────────────────────────

/// Host grid topology.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridKind {
    #[default]
    Square,
    /// Offset-coordinate hex grid.  `columnar` grids shift every other
    /// column, otherwise every other row; `even` says whether the even
    /// rows/columns are the shifted ones.
    Hex { columnar: bool, even: bool },
    /// Continuous space; searches run in the native engine.
    Gridless,
}

impl GridKind {
    #[inline]
    pub fn is_hex(self) -> bool {
        matches!(self, GridKind::Hex { .. })
    }

    #[inline]
    pub fn is_gridless(self) -> bool {
        matches!(self, GridKind::Gridless)
    }

    /// Human-readable label, used in log output.
    pub fn as_str(self) -> &'static str {
        match self {
            GridKind::Square => "square",
            GridKind::Hex { .. } => "hex",
            GridKind::Gridless => "gridless",
        }
    }
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
