//! Deduplicating min-priority frontier.
//!
//! # Dedup rule
//!
//! The frontier is a priority queue over *cells*, not over entries.  Pushing
//! an entry for a cell that already has a live entry keeps whichever of the
//! two has the lower `estimated` value (the existing one on ties).
//!
//! # Layout
//!
//! A `BinaryHeap` of lightweight `(estimated, seq, cell)` slots plus a map
//! from cell to its single live entry.  Superseded slots stay in the heap and
//! are skipped when popped (their `seq` no longer matches the live one), so
//! both push and pop are `O(log n)` amortized.
//!
//! Among equal `estimated` values the most recently pushed entry pops first.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::collections::hash_map::Entry;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use route_core::Cell;

// ── FrontierEntry ─────────────────────────────────────────────────────────────

/// A discovered cell and the cheapest known way to reach it.
///
/// `previous` links form a tree rooted at the start entry; walking them from
/// the goal entry yields the path in reverse.
#[derive(Debug)]
pub struct FrontierEntry {
    pub cell: Cell,
    /// Accumulated cost from the start, in cells.
    pub cost: f64,
    /// `cost` plus the heuristic to the goal.
    pub estimated: f64,
    pub previous: Option<Rc<FrontierEntry>>,
}

impl FrontierEntry {
    /// Root entry of a search.
    pub fn root(cell: Cell, cost: f64, estimated: f64) -> Self {
        Self { cell, cost, estimated, previous: None }
    }

    /// Iterate from this entry back to the root.
    pub fn ancestry(&self) -> impl Iterator<Item = &FrontierEntry> {
        std::iter::successors(Some(self), |e| e.previous.as_deref())
    }
}

// ── Heap slot ─────────────────────────────────────────────────────────────────

struct Slot {
    estimated: f64,
    seq: u64,
    cell: Cell,
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Slot {}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Slot {
    /// `BinaryHeap` is a max-heap: the *lowest* estimate, then the *newest*
    /// seq, must compare greatest.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimated
            .total_cmp(&self.estimated)
            .then(self.seq.cmp(&other.seq))
    }
}

// ── Frontier ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Frontier {
    heap: BinaryHeap<Slot>,
    live: FxHashMap<Cell, (u64, Rc<FrontierEntry>)>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Live entry for `cell`, if any.
    pub fn get(&self, cell: Cell) -> Option<&FrontierEntry> {
        self.live.get(&cell).map(|(_, e)| e.as_ref())
    }

    /// Push `entry`, superseding a costlier live entry for the same cell.
    ///
    /// Returns `false` if an existing entry was kept instead.
    pub fn push(&mut self, entry: FrontierEntry) -> bool {
        let seq = self.next_seq;
        let slot = Slot { estimated: entry.estimated, seq, cell: entry.cell };
        match self.live.entry(entry.cell) {
            Entry::Occupied(mut e) => {
                if entry.estimated >= e.get().1.estimated {
                    return false;
                }
                e.insert((seq, Rc::new(entry)));
            }
            Entry::Vacant(e) => {
                e.insert((seq, Rc::new(entry)));
            }
        }
        self.next_seq += 1;
        self.heap.push(slot);
        true
    }

    /// Remove and return the live entry with the lowest `estimated`.
    pub fn pop(&mut self) -> Option<Rc<FrontierEntry>> {
        while let Some(slot) = self.heap.pop() {
            if let Entry::Occupied(e) = self.live.entry(slot.cell) {
                if e.get().0 == slot.seq {
                    return Some(e.remove().1);
                }
            }
        }
        None
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
    }
}
