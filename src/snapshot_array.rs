//! A growable array whose mutations are journaled while a snapshot is open.
//!
//! Every `push` and every overwrite is mirrored as an [`Undo`] record in an
//! owned [`UndoLog`], so the array can be restored bit-for-bit to any earlier
//! checkpoint. When no snapshot is open nothing is recorded and mutation is
//! as cheap as on a plain `Vec`.

use crate::undo_log::{Undo, UndoLog};

use core::fmt;
use core::mem;
use core::ops::Index;

/// A checkpoint into a [`SnapshotArray`]'s undo log.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Snapshot {
    pub(crate) length: usize,
}

/// An ordered sequence of values paired with an owned [`UndoLog`].
///
/// All mutation flows through [`SnapshotArray::push`], [`SnapshotArray::set`],
/// [`SnapshotArray::update`] and [`SnapshotArray::set_all`], so the journaling
/// invariant cannot be bypassed: there is no public write that skips the log.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapshotArray<T> {
    values: Vec<T>,
    log: UndoLog<T>,
}

impl<T> SnapshotArray<T> {
    /// The empty array with an empty log.
    pub fn new() -> Self {
        SnapshotArray {
            values: Vec::new(),
            log: UndoLog::new(),
        }
    }

    /// Like [`SnapshotArray::new`], with an advisory capacity hint for the
    /// value storage.
    pub fn with_capacity(capacity: usize) -> Self {
        SnapshotArray {
            values: Vec::with_capacity(capacity),
            log: UndoLog::new(),
        }
    }

    /// Reserve space for at least `additional` further values.
    ///
    /// This affects only allocation, so nothing is journaled.
    pub fn reserve(&mut self, additional: usize) {
        self.values.reserve(additional);
    }

    /// Number of values in the array.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Test if the array holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// A copy of the value at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<T>
    where
        T: Clone,
    {
        self.values.get(index).cloned()
    }

    /// True while at least one snapshot is open.
    pub fn in_snapshot(&self) -> bool {
        self.log.in_snapshot()
    }

    /// Append a value; journaled as `NewElem` while a snapshot is open.
    pub fn push(&mut self, value: T) {
        let index = self.values.len();
        self.values.push(value);
        if self.log.in_snapshot() {
            self.log.push(Undo::NewElem(index));
        }
    }

    /// Overwrite the value at `index`; the pre-image is journaled as
    /// `SetElem` while a snapshot is open.
    ///
    /// # Panics
    ///
    /// If `index` is out of range.
    pub fn set(&mut self, index: usize, value: T) {
        assert!(
            index < self.values.len(),
            "index {} out of range for array of length {}",
            index,
            self.values.len()
        );
        let old = mem::replace(&mut self.values[index], value);
        if self.log.in_snapshot() {
            self.log.push(Undo::SetElem(index, old));
        }
    }

    /// Read, transform and write back the value at `index` through the journaling
    /// pathway. A clone of the pre-image is taken only while a snapshot is
    /// open.
    ///
    /// # Panics
    ///
    /// If `index` is out of range.
    pub fn update(&mut self, index: usize, f: impl FnOnce(&mut T))
    where
        T: Clone,
    {
        if self.log.in_snapshot() {
            let old = self.values[index].clone();
            self.log.push(Undo::SetElem(index, old));
        }
        f(&mut self.values[index]);
    }

    /// Apply `f` to every value in index order, journaling each pre-image
    /// while a snapshot is open.
    pub fn set_all(&mut self, mut f: impl FnMut(usize, &mut T))
    where
        T: Clone,
    {
        let SnapshotArray { values, log } = self;
        let in_snapshot = log.in_snapshot();
        for (index, value) in values.iter_mut().enumerate() {
            if in_snapshot {
                log.push(Undo::SetElem(index, value.clone()));
            }
            f(index, value);
        }
    }

    /// Append a record to the log verbatim, returning whether it was kept.
    ///
    /// While no snapshot is open the record is dropped and `false` is
    /// returned. Callers layering custom state on top of the array use this
    /// to embed their own rollback actions.
    pub fn record(&mut self, undo: Undo<T>) -> bool {
        if self.log.in_snapshot() {
            self.log.push(undo);
            true
        } else {
            false
        }
    }

    /// Clear both values and log.
    ///
    /// Any outstanding [`Snapshot`] becomes meaningless; callers must not mix
    /// `reset` with pending snapshots.
    pub fn reset(&mut self) {
        self.values.clear();
        self.log.clear();
    }

    /// Open a snapshot on the underlying log.
    pub fn start_snapshot(&mut self) -> Snapshot {
        Snapshot {
            length: self.log.start_snapshot(),
        }
    }

    /// The records journaled since `snapshot`, oldest first.
    ///
    /// A short-lived borrow of the log's storage; invalidated by any mutation.
    pub fn actions_since(&self, snapshot: Snapshot) -> &[Undo<T>] {
        self.log.actions_since(snapshot.length)
    }

    /// True if anything was journaled since `snapshot`.
    pub fn has_changes(&self, snapshot: Snapshot) -> bool {
        self.log.has_changes(snapshot.length)
    }

    /// Undo every mutation journaled since `snapshot`, newest first.
    ///
    /// Afterwards the array is identical to its state when the snapshot was
    /// opened and the log is truncated to the checkpoint. The open-snapshot
    /// count is unchanged, matching [`UndoLog::rollback_to`].
    ///
    /// # Panics
    ///
    /// If no snapshot is open, if `snapshot` points past the end of the log,
    /// or if a `NewElem` record does not match the array's tail (which
    /// indicates the log and array went out of sync earlier).
    pub fn rollback_to(&mut self, snapshot: Snapshot) {
        for record in self.log.rollback_to(snapshot.length) {
            match record {
                Undo::NewElem(index) => {
                    self.values
                        .pop()
                        .expect("undo log records an append the array does not have");
                    assert_eq!(
                        self.values.len(),
                        index,
                        "NewElem reversal does not match the array tail"
                    );
                }
                Undo::SetElem(index, old) => self.values[index] = old,
            }
        }
    }

    /// Declare everything since `snapshot` permanent; delegates to
    /// [`UndoLog::commit`], so records are discarded only on a root commit.
    ///
    /// # Panics
    ///
    /// As [`UndoLog::commit`].
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.log.commit(snapshot.length);
    }

    /// Clear the log without touching values: forget everything was being
    /// recorded. Any outstanding snapshot becomes meaningless.
    pub fn commit_all(&mut self) {
        self.log.clear();
    }
}

impl<T> Default for SnapshotArray<T> {
    fn default() -> Self {
        SnapshotArray::new()
    }
}

impl<T> Index<usize> for SnapshotArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.values[index]
    }
}

impl<T> Extend<T> for SnapshotArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SnapshotArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SnapshotArray[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", value)?;
        }
        write!(f, "]")
    }
}
