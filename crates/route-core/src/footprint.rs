//! Mover footprints: which cells a token of a given size covers, and how that
//! cover moves when the token steps between cells.
//!
//! Square movers cover a `ceil(w) × ceil(h)` block centered on their anchor
//! cell.  Hex movers cover 1, 3, 7 or 12 cells for sizes 1 through 4.  Offset
//! coordinates make hex translation parity-dependent, so multi-cell movement
//! goes through [`StepOffset`] rather than plain cell subtraction.

use crate::{Cell, CoreError, CoreResult, GridKind, SizeClass};

// ── Mover ─────────────────────────────────────────────────────────────────────

/// Description of the entity being routed.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Mover {
    /// Width in cells (square grids).  May be fractional for tiny tokens.
    pub width: f64,
    /// Height in cells (square grids).
    pub height: f64,
    /// Size on hex grids (1–4).
    pub hex_size: u32,
    /// Hex tokens in the alternate orientation have their shape mirrored
    /// vertically.
    pub alt_orientation: bool,
    /// Elevation the mover travels at.  Selects the level and filters walls.
    pub elevation: f64,
}

impl Default for Mover {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            hex_size: 1,
            alt_orientation: false,
            elevation: 0.0,
        }
    }
}

impl Mover {
    /// A `w × h` mover at elevation 0.
    pub fn sized(width: f64, height: f64) -> Self {
        Self { width, height, ..Self::default() }
    }

    /// Same mover at a different elevation.
    pub fn at_elevation(self, elevation: f64) -> Self {
        Self { elevation, ..self }
    }

    /// The larger of width and height; the gridless engine keys its graphs
    /// by this.
    #[inline]
    pub fn max_extent(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Reject sizes no footprint can be built for.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.width > 0.0 && self.width.is_finite()) || !(self.height > 0.0 && self.height.is_finite()) {
            return Err(CoreError::InvalidMover(format!(
                "size must be positive and finite, got {}x{}",
                self.width, self.height
            )));
        }
        if !(1..=4).contains(&self.hex_size) {
            return Err(CoreError::InvalidMover(format!(
                "hex size must be between 1 and 4, got {}",
                self.hex_size
            )));
        }
        if self.elevation.is_nan() {
            return Err(CoreError::InvalidMover("elevation is NaN".into()));
        }
        Ok(())
    }
}

impl SizeClass {
    /// Graph-sharing class for `mover` on a `kind` grid.
    ///
    /// Square movers are grouped by where they snap, independently per axis:
    /// odd and sub-cell sizes to cell centers (bits 0 and 1), even sizes to
    /// cell corners, and sizes of half a cell or less to a quarter of the
    /// cell (bits 2 and 3).
    pub fn for_mover(mover: &Mover, kind: GridKind) -> SizeClass {
        match kind {
            GridKind::Square => {
                let w = axis_class(mover.width);
                let h = axis_class(mover.height);
                SizeClass((w & 1) | (h & 1) << 1 | (w >> 1) << 2 | (h >> 1) << 3)
            }
            GridKind::Hex { .. } | GridKind::Gridless => SizeClass(0),
        }
    }
}

/// `0b01` centered, `0b00` on a grid line, `0b10` on a quarter point.
fn axis_class(extent: f64) -> u8 {
    if extent <= 0.5 {
        0b10
    } else if extent >= 1.0 && (extent.round() as i64) % 2 == 0 {
        0b00
    } else {
        0b01
    }
}

// ── Shape & area ──────────────────────────────────────────────────────────────

const HEX_SIZE_2: [(i32, i32); 2] = [(0, -1), (-1, -1)];
const HEX_SIZE_3: [(i32, i32); 4] = [(0, 1), (-1, 1), (-1, 0), (1, 0)];
const HEX_SIZE_4: [(i32, i32); 5] = [(-2, -1), (1, -1), (-1, -2), (0, -2), (1, -2)];

/// Cell offsets (relative to the anchor cell) covered by `mover`.
pub fn footprint_shape(mover: &Mover, kind: GridKind) -> Vec<Cell> {
    match kind {
        GridKind::Gridless => vec![Cell::ORIGIN],
        GridKind::Square => {
            let top = -(mover.height / 2.0).floor() as i32;
            let left = -(mover.width / 2.0).floor() as i32;
            let rows = mover.height.ceil().max(1.0) as i32;
            let cols = mover.width.ceil().max(1.0) as i32;
            let mut shape = Vec::with_capacity((rows * cols) as usize);
            for y in 0..rows {
                for x in 0..cols {
                    shape.push(Cell::new(x + left, y + top));
                }
            }
            shape
        }
        GridKind::Hex { columnar, .. } => {
            let mut shape = vec![Cell::ORIGIN];
            let tiers: [&[(i32, i32)]; 3] = [&HEX_SIZE_2, &HEX_SIZE_3, &HEX_SIZE_4];
            for (tier, offsets) in tiers.iter().enumerate() {
                if mover.hex_size as usize >= tier + 2 {
                    shape.extend(offsets.iter().map(|&(x, y)| Cell::new(x, y)));
                }
            }
            if mover.alt_orientation {
                shape.iter_mut().for_each(|c| c.y = -c.y);
            }
            if columnar {
                shape.iter_mut().for_each(|c| std::mem::swap(&mut c.x, &mut c.y));
            }
            shape
        }
    }
}

/// Absolute cells covered by a mover with `shape` anchored at `position`.
///
/// On hex grids an odd offset along the shifted axis lands one cell further
/// when the anchor's row (column) parity differs from the grid's shift parity.
pub fn footprint_area(position: Cell, shape: &[Cell], kind: GridKind) -> Vec<Cell> {
    shape
        .iter()
        .map(|&space| {
            let mut cell = position + space;
            if let GridKind::Hex { columnar, even } = kind {
                let shifted = if even { 1 } else { 0 };
                if columnar {
                    if space.x % 2 != 0 && position.x % 2 != shifted {
                        cell.y += 1;
                    }
                } else if space.y % 2 != 0 && position.y % 2 != shifted {
                    cell.x += 1;
                }
            }
            cell
        })
        .collect()
}

// ── StepOffset ────────────────────────────────────────────────────────────────

/// Translation between two cells that can be re-applied to every cell of a
/// footprint.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StepOffset {
    pub dx: i32,
    pub dy: i32,
    /// Hex only: the step crosses an odd number of shifted rows/columns.
    adjustment_needed: bool,
    /// Hex only: parity of the step's origin along the shifted axis.
    origin_even: bool,
}

impl StepOffset {
    /// Offset that moves `start` onto `end`.
    pub fn between(start: Cell, end: Cell, kind: GridKind) -> StepOffset {
        let (adjustment_needed, origin_even) = match kind {
            GridKind::Hex { columnar: true, .. } => {
                ((start.x - end.x) % 2 != 0, start.x % 2 == 0)
            }
            GridKind::Hex { columnar: false, .. } => {
                ((start.y - end.y) % 2 != 0, start.y % 2 == 0)
            }
            _ => (false, false),
        };
        StepOffset {
            dx: end.x - start.x,
            dy: end.y - start.y,
            adjustment_needed,
            origin_even,
        }
    }

    /// Apply the offset to `origin`, correcting for hex parity so that the
    /// result keeps the same relative placement as the original step.
    pub fn apply(self, origin: Cell, kind: GridKind) -> Cell {
        let mut pos = Cell::new(origin.x + self.dx, origin.y + self.dy);
        if let GridKind::Hex { columnar, even } = kind {
            if self.adjustment_needed {
                let axis = if columnar { origin.x } else { origin.y };
                if (axis % 2 == 0) != self.origin_even {
                    let delta = if self.origin_even == even { -1 } else { 1 };
                    if columnar {
                        pos.y += delta;
                    } else {
                        pos.x += delta;
                    }
                }
            }
        }
        pos
    }
}
