//! Weighted union-find over a [`SnapshotArray`] of [`VarValue`] nodes.
//!
//! Union picks the surviving root by rank; find compresses paths. Both kinds
//! of write go through the array's journaling pathway, so a rollback restores
//! the *exact* forest shape, compressed paths included. The table itself is
//! stateless above the array: snapshot operations delegate straight down.

mod types;

pub use crate::snapshot_array::Snapshot;
pub use types::{VarIndex, VarValue};

use crate::snapshot_array::SnapshotArray;

use core::fmt;

/// A union-find forest carrying a per-class payload, stored in a
/// [`SnapshotArray`] so every mutation can be rolled back.
///
/// Payloads are *assigned*, not merged: `union(a, b, v)` leaves exactly `v`
/// at the surviving root and discards both previous payloads. Callers who
/// want to combine them compute the merged payload before unioning.
///
/// ```
/// use snapshot_unify::unify::UnificationTable;
///
/// let mut table = UnificationTable::new();
/// let a = table.push("left");
/// let b = table.push("right");
///
/// let snapshot = table.start_snapshot();
/// table.union(a, b, "both");
/// assert!(table.unioned(a, b));
///
/// table.rollback_to(snapshot);
/// assert!(!table.unioned(a, b));
/// ```
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnificationTable<T> {
    values: SnapshotArray<VarValue<T>>,
}

impl<T> UnificationTable<T> {
    pub fn new() -> Self {
        UnificationTable {
            values: SnapshotArray::new(),
        }
    }

    /// Like [`UnificationTable::new`], with an advisory capacity hint.
    pub fn with_capacity(capacity: usize) -> Self {
        UnificationTable {
            values: SnapshotArray::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Append a fresh singleton root carrying `value`, returning its index.
    pub fn push(&mut self, value: T) -> VarIndex {
        let index = VarIndex::new(self.values.len());
        self.values.push(VarValue::new_root(value, index.index));
        index
    }

    /// Append a node verbatim, returning its index.
    ///
    /// An escape hatch for deserialization and testing: the caller is
    /// responsible for keeping parent links in range and acyclic.
    pub fn push_var(&mut self, node: VarValue<T>) -> VarIndex {
        let index = VarIndex::new(self.values.len());
        self.values.push(node);
        index
    }

    /// A copy of the node at position `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<VarValue<T>>
    where
        T: Clone,
    {
        self.values.get(index)
    }

    /// The node at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is out of range.
    pub fn value(&self, index: VarIndex) -> &VarValue<T> {
        assert!(
            index.index < self.values.len(),
            "no node at index {} in a table of {} nodes",
            index.index,
            self.values.len()
        );
        &self.values[index.index]
    }

    /// The stored parent link of the node at position `index`. For roots this
    /// is the node's own index.
    ///
    /// A coarse accessor: it exposes the current forest shape, which both
    /// `union` and path compression rewrite. Downstream code uses it only as
    /// a convenient producer of [`VarIndex`] values.
    ///
    /// # Panics
    ///
    /// If `index` is out of range.
    pub fn index(&self, index: usize) -> VarIndex {
        assert!(
            index < self.values.len(),
            "no node at index {} in a table of {} nodes",
            index,
            self.values.len()
        );
        self.values[index].parent
    }

    /// Overwrite the node at `index` through the journaling pathway.
    ///
    /// # Panics
    ///
    /// If `index` is out of range.
    pub fn set(&mut self, index: VarIndex, node: VarValue<T>) {
        self.values.set(index.index, node);
    }

    pub fn in_snapshot(&self) -> bool {
        self.values.in_snapshot()
    }

    /// Open a snapshot on the underlying array.
    pub fn start_snapshot(&mut self) -> Snapshot {
        self.values.start_snapshot()
    }

    /// Undo every table operation since `snapshot`: unions, payload
    /// overwrites, appended nodes and compressed paths alike.
    ///
    /// # Panics
    ///
    /// As [`SnapshotArray::rollback_to`].
    pub fn rollback_to(&mut self, snapshot: Snapshot) {
        self.values.rollback_to(snapshot);
    }

    /// Declare everything since `snapshot` permanent.
    ///
    /// # Panics
    ///
    /// As [`SnapshotArray::commit`].
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.values.commit(snapshot);
    }

    /// Forget the journal without touching nodes; any outstanding snapshot
    /// becomes meaningless.
    pub fn commit_all(&mut self) {
        self.values.commit_all();
    }
}

impl<T: Clone> UnificationTable<T> {
    /// Read, transform and write back the node at `index` through the journaling
    /// pathway.
    ///
    /// # Panics
    ///
    /// If `index` is out of range.
    pub fn update(&mut self, index: VarIndex, f: impl FnOnce(&mut VarValue<T>)) {
        self.values.update(index.index, f);
    }

    /// The representative of the class containing `index`.
    ///
    /// Compresses the path as it returns: every node visited is redirected to
    /// point straight at the root. Those writes are journaled like any other,
    /// so a later rollback restores the uncompressed tree.
    pub fn find(&mut self, index: VarIndex) -> VarIndex {
        let parent = self.value(index).parent;
        if parent == index {
            return index;
        }
        let root = self.find(parent);
        if root != parent {
            self.update(index, |node| node.redirect(root));
        }
        root
    }

    /// Merge the classes of `a` and `b`, assigning `new_value` to the
    /// surviving root, and return that root.
    ///
    /// The shallower tree is hung below the deeper one; on a tie the rank of
    /// the survivor grows by one. If `a` and `b` are already unioned the
    /// table is untouched and `new_value` is dropped.
    pub fn union(&mut self, a: VarIndex, b: VarIndex, new_value: T) -> VarIndex {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return root_a;
        }

        let rank_a = self.value(root_a).rank;
        let rank_b = self.value(root_b).rank;
        if rank_a < rank_b {
            self.redirect_root(rank_b, root_a, root_b, new_value);
            root_b
        } else if rank_a > rank_b {
            self.redirect_root(rank_a, root_b, root_a, new_value);
            root_a
        } else {
            self.redirect_root(rank_a + 1, root_b, root_a, new_value);
            root_a
        }
    }

    /// Hang the root `old_root` below `new_root`, giving the survivor the
    /// rank `new_rank` and the payload `new_value`.
    ///
    /// Both writes are journaled. `old_root`'s stored payload and rank are
    /// left as they are; they stop being meaningful once it is not a root.
    pub fn redirect_root(
        &mut self,
        new_rank: u32,
        old_root: VarIndex,
        new_root: VarIndex,
        new_value: T,
    ) {
        self.update(old_root, |node| node.redirect(new_root));
        self.update(new_root, |node| node.root(new_rank, new_value));
    }

    /// True iff `a` and `b` are in the same equivalence class.
    pub fn unioned(&mut self, a: VarIndex, b: VarIndex) -> bool {
        self.find(a) == self.find(b)
    }

    /// The root node of the class containing `node`, resolved through its
    /// parent link.
    pub fn find_root(&mut self, node: &VarValue<T>) -> &VarValue<T> {
        let root = self.find(node.parent);
        self.value(root)
    }

    /// Reinitialize every node to a singleton root of rank 0, preserving its
    /// stored payload, and discard all pending undo state.
    ///
    /// Any outstanding snapshot becomes meaningless.
    pub fn reset(&mut self) {
        self.values.set_all(|index, node| {
            node.rank = 0;
            node.parent = VarIndex::new(index);
        });
        self.values.commit_all();
    }
}

impl<T> Default for UnificationTable<T> {
    fn default() -> Self {
        UnificationTable::new()
    }
}

impl<T> Extend<T> for UnificationTable<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for UnificationTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnificationTable[")?;
        for index in 0..self.values.len() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", self.values[index])?;
        }
        write!(f, "]")
    }
}
