//! A single grid cube and its staged membership changes.

use indexmap::IndexSet;
use quark_core::CellCoord;

/// One cube of the cell list.
///
/// `members` is the authoritative set of particle indices inside the cube.
/// Moves are never applied to it directly: they are staged in
/// `pending_remove` / `pending_insert` and merged by [`flush`](Self::flush),
/// so a pass that iterates `members` can relocate particles without
/// invalidating its own iteration.
///
/// Sets are insertion-ordered so iteration, and therefore force summation
/// order, is deterministic across runs.
#[derive(Clone, Debug)]
pub struct Cell<const D: usize> {
    coord: CellCoord<D>,
    members: IndexSet<usize>,
    pending_remove: IndexSet<usize>,
    pending_insert: IndexSet<usize>,
}

impl<const D: usize> Cell<D> {
    /// An empty cell at grid coordinate `coord`.
    pub fn new(coord: CellCoord<D>) -> Self {
        Self {
            coord,
            members: IndexSet::new(),
            pending_remove: IndexSet::new(),
            pending_insert: IndexSet::new(),
        }
    }

    /// Grid coordinate of this cell.
    pub fn coord(&self) -> CellCoord<D> {
        self.coord
    }

    /// Particle indices currently in the cell.
    pub fn members(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().copied()
    }

    /// The `n`-th member in iteration order.
    ///
    /// Staging never touches `members`, so positional access stays valid
    /// for the whole of a repair pass.
    pub fn member_at(&self, n: usize) -> Option<usize> {
        self.members.get_index(n).copied()
    }

    /// Whether `particle` is a committed member.
    pub fn contains(&self, particle: usize) -> bool {
        self.members.contains(&particle)
    }

    /// Number of committed members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the cell has no committed members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether any insertion or removal is waiting for a flush.
    pub fn has_pending(&self) -> bool {
        !self.pending_remove.is_empty() || !self.pending_insert.is_empty()
    }

    /// Schedule `particle` to join the cell at the next flush.
    pub fn stage_insert(&mut self, particle: usize) {
        self.pending_insert.insert(particle);
    }

    /// Schedule `particle` to leave the cell at the next flush.
    pub fn stage_remove(&mut self, particle: usize) {
        self.pending_remove.insert(particle);
    }

    /// Merge staged changes into `members` and clear both staging sets.
    ///
    /// Removals are applied before insertions. With nothing staged this is
    /// a no-op.
    pub fn flush(&mut self) {
        for particle in self.pending_remove.drain(..) {
            self.members.swap_remove(&particle);
        }
        self.members.extend(self.pending_insert.drain(..));
    }
}
