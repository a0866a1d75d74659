//! Lazily built adjacency graphs.
//!
//! # Keys
//!
//! | Map kind        | Graph key                    | Contents                          |
//! |-----------------|------------------------------|-----------------------------------|
//! | square / hex    | `(SizeClass, LevelId)`       | sparse `Cell → Node` table         |
//! | gridless        | `(LevelId, footprint size)`  | one [`NativeGraph`] handle         |
//!
//! A [`Node`] is built the first time a search asks for it and stays cached
//! until the whole cache is dropped.  Building a node asks the collision
//! oracle about every in-bounds geometric neighbor, so a node costs up to
//! eight oracle calls once and nothing afterwards.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

use route_core::{Cell, GridKind, LevelId, Mover, SizeClass};

use crate::{GraphError, GraphResult, LevelIndex, NativeEngine, NativeGraph, World};

// ── Node ──────────────────────────────────────────────────────────────────────

/// An adjacent, reachable cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Neighbor {
    pub cell: Cell,
    pub diagonal: bool,
}

/// A cell together with every neighbor a mover of its size class can step to
/// on its level.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub cell: Cell,
    pub neighbors: Vec<Neighbor>,
}

// ── GraphCache ────────────────────────────────────────────────────────────────

/// Owner of the level index and of every graph built since the last
/// invalidation.
pub struct GraphCache {
    kind: GridKind,
    levels: LevelIndex,
    gridded: FxHashMap<(SizeClass, LevelId), FxHashMap<Cell, Node>>,
    gridless: FxHashMap<(LevelId, u64), NativeGraph>,
    /// Reused buffer for raw neighbor candidates.
    scratch: Vec<Cell>,
}

impl GraphCache {
    pub fn new(kind: GridKind, levels: LevelIndex) -> Self {
        Self {
            kind,
            levels,
            gridded: FxHashMap::default(),
            gridless: FxHashMap::default(),
            scratch: Vec::with_capacity(8),
        }
    }

    /// Fresh cache for `world`, detecting levels from its obstacles.
    pub fn build(world: &World<'_>, height_aware: bool) -> Self {
        let kind = world.topology.kind();
        let levels = LevelIndex::detect(world.obstacles.walls(), height_aware);
        tracing::debug!(grid = %kind, levels = levels.level_count(), "graph cache built");
        Self::new(kind, levels)
    }

    pub fn kind(&self) -> GridKind {
        self.kind
    }

    pub fn levels(&self) -> &LevelIndex {
        &self.levels
    }

    /// Level a mover at `elevation` travels on.
    pub fn level_for(&self, elevation: f64) -> LevelId {
        self.levels.level_for(elevation)
    }

    /// Number of nodes built across all gridded graphs.
    pub fn node_count(&self) -> usize {
        self.gridded.values().map(|g| g.len()).sum()
    }

    /// Number of distinct graphs (gridded tables plus native handles).
    pub fn graph_count(&self) -> usize {
        self.gridded.len() + self.gridless.len()
    }

    // ── Gridded graphs ────────────────────────────────────────────────────

    /// The node at `cell` in the `(size, level)` graph, building it on first
    /// request.
    ///
    /// # Errors
    ///
    /// [`GraphError::WrongGridKind`] on gridless maps,
    /// [`GraphError::OutOfBounds`] for cells outside the map, and any
    /// collision oracle fault raised while building the node.
    pub fn node(
        &mut self,
        world: &World<'_>,
        cell: Cell,
        size: SizeClass,
        level: LevelId,
        mover: &Mover,
    ) -> GraphResult<&Node> {
        if self.kind.is_gridless() {
            return Err(GraphError::WrongGridKind("cell"));
        }
        if !world.topology.in_bounds(cell) {
            return Err(GraphError::OutOfBounds(cell));
        }
        let graph = self.gridded.entry((size, level)).or_default();
        match graph.entry(cell) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => {
                let node = build_node(world, cell, mover, &mut self.scratch)?;
                Ok(e.insert(node))
            }
        }
    }

    // ── Gridless graphs ───────────────────────────────────────────────────

    /// Native graph for a mover of `mover.max_extent()` cells on `level`,
    /// built on first request.
    ///
    /// The graph is built at the elevation of the first mover that asks for
    /// it; later movers on the same level share it.
    pub fn native_graph(
        &mut self,
        native: &mut dyn NativeEngine,
        world: &World<'_>,
        mover: &Mover,
        level: LevelId,
        size_ratio: f64,
        height_aware: bool,
    ) -> GraphResult<NativeGraph> {
        if !self.kind.is_gridless() {
            return Err(GraphError::WrongGridKind("native"));
        }
        let size = mover.max_extent();
        match self.gridless.entry((level, size.to_bits())) {
            Entry::Occupied(e) => Ok(*e.get()),
            Entry::Vacant(e) => {
                let radius = size * world.topology.cell_size() * size_ratio / 2.0;
                let graph = native.build_graph(
                    world.obstacles.walls(),
                    radius,
                    mover.elevation,
                    height_aware,
                )?;
                tracing::debug!(level = level.0, size, radius, "built native graph");
                Ok(*e.insert(graph))
            }
        }
    }
}

/// Ask the collision oracle about every in-bounds neighbor of `cell`.
fn build_node(
    world: &World<'_>,
    cell: Cell,
    mover: &Mover,
    scratch: &mut Vec<Cell>,
) -> GraphResult<Node> {
    scratch.clear();
    world.topology.neighbors(cell, scratch);

    let mut neighbors = Vec::with_capacity(scratch.len());
    for &candidate in scratch.iter() {
        if !world.topology.in_bounds(candidate) {
            continue;
        }
        if world.collision.step_blocked(world.topology, cell, candidate, mover)? {
            continue;
        }
        neighbors.push(Neighbor {
            cell: candidate,
            diagonal: world.topology.is_diagonal(cell, candidate),
        });
    }
    tracing::trace!(%cell, neighbors = neighbors.len(), "built node");
    Ok(Node { cell, neighbors })
}
