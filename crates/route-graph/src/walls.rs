//! Wall geometry and the R-tree backed [`WallIndex`] collision oracle.
//!
//! # Collision model
//!
//! A step from cell A to cell B is blocked when the straight segment between
//! the mover's snap points at A and B touches any wall that
//!
//! - blocks movement,
//! - is not an open door, and
//! - (height-aware maps only) spans the mover's elevation.
//!
//! Snap points are cell centers, except that square movers with an even
//! width (height) sit on the grid line half a cell before the center on that
//! axis, where the middle of their footprint lies.
//!
//! Segment envelopes live in an R-tree (via `rstar`) so each query only
//! tests walls whose bounding boxes overlap the step.

use rstar::{AABB, RTree, RTreeObject};

use route_core::{Cell, GridKind, Mover, WorldPoint};

use crate::{CollisionOracle, GridTopology, ObstacleSource, OracleError};

// ── Wall ──────────────────────────────────────────────────────────────────────

/// Door state of a wall segment.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorState {
    /// Not a door.
    #[default]
    None,
    Closed,
    Open,
}

/// A wall segment in world (pixel) coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wall {
    pub a: WorldPoint,
    pub b: WorldPoint,
    /// Lowest blocked elevation; `-∞` when the wall has no bottom.
    pub bottom: f64,
    /// Highest blocked elevation; `+∞` when the wall has no top.
    pub top: f64,
    pub blocks_movement: bool,
    pub door: DoorState,
}

impl Wall {
    /// An infinitely tall, movement-blocking wall from `a` to `b`.
    pub fn new(a: WorldPoint, b: WorldPoint) -> Self {
        Self {
            a,
            b,
            bottom: f64::NEG_INFINITY,
            top: f64::INFINITY,
            blocks_movement: true,
            door: DoorState::None,
        }
    }

    /// Same wall restricted to `bottom..=top`.
    pub fn with_height(self, bottom: f64, top: f64) -> Self {
        Self { bottom, top, ..self }
    }

    pub fn with_door(self, door: DoorState) -> Self {
        Self { door, ..self }
    }

    /// `true` if the wall currently stops movement at any elevation.
    #[inline]
    pub fn is_obstacle(&self) -> bool {
        self.blocks_movement && self.door != DoorState::Open
    }

    /// `true` if `elevation` lies within the wall's vertical extent.
    #[inline]
    pub fn spans(&self, elevation: f64) -> bool {
        self.bottom <= elevation && elevation <= self.top
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: the wall's bounding box plus its index into
/// `WallIndex::walls`.
#[derive(Clone)]
struct WallEntry {
    envelope: AABB<[f64; 2]>,
    index: usize,
}

impl RTreeObject for WallEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

// ── WallIndex ─────────────────────────────────────────────────────────────────

/// Spatially indexed wall set.  Implements [`CollisionOracle`] and
/// [`ObstacleSource`].
pub struct WallIndex {
    walls: Vec<Wall>,
    height_aware: bool,
    tree: RTree<WallEntry>,
}

impl WallIndex {
    /// Index `walls`.  Walls that never block movement stay visible through
    /// [`ObstacleSource`] but are left out of the R-tree.
    pub fn new(walls: Vec<Wall>) -> Self {
        let entries = walls
            .iter()
            .enumerate()
            .filter(|(_, w)| w.is_obstacle())
            .map(|(index, w)| WallEntry {
                envelope: AABB::from_corners([w.a.x, w.a.y], [w.b.x, w.b.y]),
                index,
            })
            .collect();
        Self {
            walls,
            height_aware: false,
            tree: RTree::bulk_load(entries),
        }
    }

    /// Honor wall top/bottom heights when testing collisions.
    pub fn height_aware(mut self, enabled: bool) -> Self {
        self.height_aware = enabled;
        self
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// `true` if the segment `p..q` touches an obstacle at `elevation`.
    pub fn segment_blocked(&self, p: WorldPoint, q: WorldPoint, elevation: f64) -> bool {
        let query = AABB::from_corners([p.x, p.y], [q.x, q.y]);
        self.tree
            .locate_in_envelope_intersecting(&query)
            .map(|entry| &self.walls[entry.index])
            .filter(|wall| !self.height_aware || wall.spans(elevation))
            .any(|wall| segments_intersect(p, q, wall.a, wall.b))
    }
}

impl ObstacleSource for WallIndex {
    fn walls(&self) -> &[Wall] {
        &self.walls
    }
}

impl CollisionOracle for WallIndex {
    fn step_blocked(
        &self,
        topology: &dyn GridTopology,
        from: Cell,
        to: Cell,
        mover: &Mover,
    ) -> Result<bool, OracleError> {
        let start = snap_point(topology, from, mover);
        let end = snap_point(topology, to, mover);
        Ok(self.segment_blocked(start, end, mover.elevation))
    }
}

/// Where `mover` anchored at `cell` actually stands.
///
/// Hex movers stand on the cell center.  On square grids each axis snaps on
/// its own: movers half a cell wide or less to the middle of a sub-cell
/// quarter, even sizes to the grid line before the center, everything else
/// to the center.
fn snap_point(topology: &dyn GridTopology, cell: Cell, mover: &Mover) -> WorldPoint {
    let mut p = topology.cell_center(cell);
    if topology.kind() == GridKind::Square {
        let size = topology.cell_size();
        p.x = snap_axis(p.x, size, mover.width);
        p.y = snap_axis(p.y, size, mover.height);
    }
    p
}

fn snap_axis(center: f64, size: f64, extent: f64) -> f64 {
    let half = size / 2.0;
    if extent <= 0.5 {
        let corner = center - half;
        let quarter = half.floor().max(1.0);
        let slot = ((center - corner) / quarter).floor();
        corner + (slot + 0.5) * quarter
    } else if extent >= 1.0 && (extent.round() as i64) % 2 == 0 {
        center - half
    } else {
        center
    }
}

// ── Segment math ──────────────────────────────────────────────────────────────

#[inline]
fn cross(o: WorldPoint, a: WorldPoint, b: WorldPoint) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// `q` lies within the bounding box of `p..r` (used for collinear cases).
#[inline]
fn on_segment(p: WorldPoint, q: WorldPoint, r: WorldPoint) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Closed-segment intersection test: touching endpoints count.
pub(crate) fn segments_intersect(p1: WorldPoint, p2: WorldPoint, q1: WorldPoint, q2: WorldPoint) -> bool {
    let d1 = cross(q1, q2, p1);
    let d2 = cross(q1, q2, p2);
    let d3 = cross(p1, p2, q1);
    let d4 = cross(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(q1, p1, q2))
        || (d2 == 0.0 && on_segment(q1, p2, q2))
        || (d3 == 0.0 && on_segment(p1, q1, p2))
        || (d4 == 0.0 && on_segment(p1, q2, p2))
}
