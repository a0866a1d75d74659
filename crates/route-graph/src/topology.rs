//! Grid topology service: neighbor enumeration, bounds, and cell ↔ world
//! mapping.
//!
//! The engine is grid-agnostic and talks to the map only through
//! [`GridTopology`].  Hosts with their own grid implementation provide that
//! trait; [`SquareGrid`] and [`HexGrid`] cover the common layouts and are
//! used by the tests and the demo.
//!
//! # Hex layout
//!
//! [`HexGrid`] uses offset coordinates.  Row-based grids shift every other
//! row half a cell to the right; columnar grids shift every other column
//! half a cell down.  `even` selects whether the even or the odd rows
//! (columns) are the shifted ones.  Rows (columns) are packed at 3/4 of the
//! cell pitch along the offset axis.

use route_core::{Cell, GridKind, WorldPoint};

// ── GridTopology trait ────────────────────────────────────────────────────────

/// Host grid capabilities required by the graph cache and the cost model.
pub trait GridTopology {
    /// Layout of this grid.
    fn kind(&self) -> GridKind;

    /// Append the geometric neighbors of `cell` to `out`.  Neighbors may lie
    /// outside the map; the cache filters them through [`in_bounds`].
    ///
    /// [`in_bounds`]: GridTopology::in_bounds
    fn neighbors(&self, cell: Cell, out: &mut Vec<Cell>);

    /// `true` if `cell` lies inside the world.
    fn in_bounds(&self, cell: Cell) -> bool;

    /// Pixel-space center of `cell`.
    fn cell_center(&self, cell: Cell) -> WorldPoint;

    /// Edge length of one cell in pixels.
    fn cell_size(&self) -> f64;

    /// Host distance units (feet, metres, …) per cell.
    fn distance_per_cell(&self) -> f64;

    /// Whether a step between two adjacent cells is diagonal.  Only square
    /// grids have diagonals.
    fn is_diagonal(&self, from: Cell, to: Cell) -> bool {
        self.kind() == GridKind::Square && from.x != to.x && from.y != to.y
    }
}

// ── SquareGrid ────────────────────────────────────────────────────────────────

/// Square grid with 8-way adjacency.
#[derive(Clone, Debug, PartialEq)]
pub struct SquareGrid {
    pub columns: i32,
    pub rows: i32,
    pub cell_size: f64,
    pub distance_per_cell: f64,
}

impl SquareGrid {
    pub fn new(columns: i32, rows: i32, cell_size: f64, distance_per_cell: f64) -> Self {
        Self { columns, rows, cell_size, distance_per_cell }
    }

    /// Grid covering a `width × height` pixel canvas.
    pub fn from_dimensions(width: f64, height: f64, cell_size: f64, distance_per_cell: f64) -> Self {
        Self::new(
            (width / cell_size).ceil() as i32,
            (height / cell_size).ceil() as i32,
            cell_size,
            distance_per_cell,
        )
    }
}

impl GridTopology for SquareGrid {
    fn kind(&self) -> GridKind {
        GridKind::Square
    }

    fn neighbors(&self, cell: Cell, out: &mut Vec<Cell>) {
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                out.push(Cell::new(cell.x + dx, cell.y + dy));
            }
        }
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.columns && cell.y < self.rows
    }

    fn cell_center(&self, cell: Cell) -> WorldPoint {
        WorldPoint::new(
            (cell.x as f64 + 0.5) * self.cell_size,
            (cell.y as f64 + 0.5) * self.cell_size,
        )
    }

    fn cell_size(&self) -> f64 {
        self.cell_size
    }

    fn distance_per_cell(&self) -> f64 {
        self.distance_per_cell
    }
}

// ── HexGrid ───────────────────────────────────────────────────────────────────

/// Offset-coordinate hex grid with 6-way adjacency.
#[derive(Clone, Debug, PartialEq)]
pub struct HexGrid {
    pub columns: i32,
    pub rows: i32,
    pub columnar: bool,
    pub even: bool,
    pub cell_size: f64,
    pub distance_per_cell: f64,
}

impl HexGrid {
    pub fn new(
        columns: i32,
        rows: i32,
        columnar: bool,
        even: bool,
        cell_size: f64,
        distance_per_cell: f64,
    ) -> Self {
        Self { columns, rows, columnar, even, cell_size, distance_per_cell }
    }

    /// Grid covering a `width × height` pixel canvas.  The offset axis packs
    /// cells at 3/4 pitch.
    pub fn from_dimensions(
        width: f64,
        height: f64,
        columnar: bool,
        even: bool,
        cell_size: f64,
        distance_per_cell: f64,
    ) -> Self {
        let (columns, rows) = if columnar {
            ((width / (0.75 * cell_size)).ceil(), (height / cell_size).ceil())
        } else {
            ((width / cell_size).ceil(), (height / (0.75 * cell_size)).ceil())
        };
        Self::new(columns as i32, rows as i32, columnar, even, cell_size, distance_per_cell)
    }

    /// Whether row (or column, on columnar grids) `line` is shifted by half a cell.
    #[inline]
    fn is_shifted(&self, line: i32) -> bool {
        (line.rem_euclid(2) == 0) == self.even
    }
}

impl GridTopology for HexGrid {
    fn kind(&self) -> GridKind {
        GridKind::Hex { columnar: self.columnar, even: self.even }
    }

    fn neighbors(&self, cell: Cell, out: &mut Vec<Cell>) {
        if self.columnar {
            let lo = if self.is_shifted(cell.x) { 0 } else { -1 };
            out.push(Cell::new(cell.x, cell.y - 1));
            out.push(Cell::new(cell.x, cell.y + 1));
            for dx in [-1, 1] {
                out.push(Cell::new(cell.x + dx, cell.y + lo));
                out.push(Cell::new(cell.x + dx, cell.y + lo + 1));
            }
        } else {
            let lo = if self.is_shifted(cell.y) { 0 } else { -1 };
            out.push(Cell::new(cell.x - 1, cell.y));
            out.push(Cell::new(cell.x + 1, cell.y));
            for dy in [-1, 1] {
                out.push(Cell::new(cell.x + lo, cell.y + dy));
                out.push(Cell::new(cell.x + lo + 1, cell.y + dy));
            }
        }
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.columns && cell.y < self.rows
    }

    fn cell_center(&self, cell: Cell) -> WorldPoint {
        let size = self.cell_size;
        if self.columnar {
            let shift = if self.is_shifted(cell.x) { 0.5 } else { 0.0 };
            WorldPoint::new(
                (cell.x as f64 * 0.75 + 0.5) * size,
                (cell.y as f64 + 0.5 + shift) * size,
            )
        } else {
            let shift = if self.is_shifted(cell.y) { 0.5 } else { 0.0 };
            WorldPoint::new(
                (cell.x as f64 + 0.5 + shift) * size,
                (cell.y as f64 * 0.75 + 0.5) * size,
            )
        }
    }

    fn cell_size(&self) -> f64 {
        self.cell_size
    }

    fn distance_per_cell(&self) -> f64 {
        self.distance_per_cell
    }
}

// ── ContinuousSpace ───────────────────────────────────────────────────────────

/// Gridless map.  Has no discrete adjacency; only the scale is meaningful,
/// since searches run inside the native engine.
#[derive(Clone, Debug, PartialEq)]
pub struct ContinuousSpace {
    pub width: f64,
    pub height: f64,
    pub cell_size: f64,
    pub distance_per_cell: f64,
}

impl ContinuousSpace {
    pub fn new(width: f64, height: f64, cell_size: f64, distance_per_cell: f64) -> Self {
        Self { width, height, cell_size, distance_per_cell }
    }
}

impl GridTopology for ContinuousSpace {
    fn kind(&self) -> GridKind {
        GridKind::Gridless
    }

    fn neighbors(&self, _cell: Cell, _out: &mut Vec<Cell>) {}

    fn in_bounds(&self, cell: Cell) -> bool {
        let p = self.cell_center(cell);
        p.x >= 0.0 && p.y >= 0.0 && p.x < self.width && p.y < self.height
    }

    fn cell_center(&self, cell: Cell) -> WorldPoint {
        WorldPoint::new(
            (cell.x as f64 + 0.5) * self.cell_size,
            (cell.y as f64 + 0.5) * self.cell_size,
        )
    }

    fn cell_size(&self) -> f64 {
        self.cell_size
    }

    fn distance_per_cell(&self) -> f64 {
        self.distance_per_cell
    }
}
