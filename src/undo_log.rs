//! An append-only log of reversible edits with nested snapshots.
//!
//! The log records element-level mutations of a [`crate::snapshot_array::SnapshotArray`]
//! so they can be unwound in LIFO order. It knows nothing about the array
//! itself: it only stores [`Undo`] records and counts how many snapshots are
//! currently open.

use core::fmt;

/// A single reversible edit.
///
/// Reversal of `NewElem(i)` removes the element appended at index `i`;
/// reversal of `SetElem(i, old)` writes the pre-image `old` back to index `i`.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Undo<T> {
    /// An element was appended at this index (the tail at recording time).
    NewElem(usize),

    /// The element at this index was overwritten; the pre-image is kept.
    SetElem(usize, T),
}

/// An ordered sequence of [`Undo`] records plus a count of open snapshots.
///
/// While `open_snapshots == 0` the owner of the log is free to skip recording
/// entirely: there is no checkpoint anything could be rolled back to.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UndoLog<T> {
    records: Vec<Undo<T>>,
    open_snapshots: usize,
}

impl<T> UndoLog<T> {
    /// The empty log with no open snapshots.
    pub fn new() -> Self {
        UndoLog {
            records: Vec::new(),
            open_snapshots: 0,
        }
    }

    /// True while at least one snapshot is open.
    pub fn in_snapshot(&self) -> bool {
        self.open_snapshots > 0
    }

    /// The number of snapshots opened and not yet committed.
    ///
    /// Only the count is tracked; the log does not remember checkpoint
    /// identities and cannot tell whether callers close them in LIFO order.
    pub fn open_snapshots(&self) -> usize {
        self.open_snapshots
    }

    /// Number of records in the log.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Test if the log holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record unconditionally.
    pub fn push(&mut self, record: Undo<T>) {
        self.records.push(record);
    }

    /// Drop all records and close every open snapshot.
    pub fn clear(&mut self) {
        self.records.clear();
        self.open_snapshots = 0;
    }

    /// Remove and return the newest record.
    pub fn pop(&mut self) -> Option<Undo<T>> {
        self.records.pop()
    }

    /// Peek at the newest record.
    pub fn last(&self) -> Option<&Undo<T>> {
        self.records.last()
    }

    /// Open a snapshot, returning the current log length as its checkpoint.
    pub fn start_snapshot(&mut self) -> usize {
        self.open_snapshots += 1;
        self.records.len()
    }

    /// The records appended since the checkpoint `snapshot`, oldest first.
    ///
    /// The slice borrows the log's backing storage; any mutation of the log
    /// invalidates it.
    pub fn actions_since(&self, snapshot: usize) -> &[Undo<T>] {
        &self.records[snapshot..]
    }

    /// True if anything was recorded since the checkpoint `snapshot`.
    pub fn has_changes(&self, snapshot: usize) -> bool {
        !self.actions_since(snapshot).is_empty()
    }

    /// Declare everything since the checkpoint `snapshot` permanent.
    ///
    /// Closes one snapshot. Committing the sole remaining snapshot must cover
    /// the whole log (`snapshot == 0`): no outer checkpoint can still demand
    /// the records, so the log is cleared.
    ///
    /// # Panics
    ///
    /// If no snapshot is open, if `snapshot` points past the end of the log,
    /// or if a root commit is attempted from a nonzero checkpoint.
    pub fn commit(&mut self, snapshot: usize) {
        self.assert_valid_snapshot(snapshot);
        if self.open_snapshots == 1 {
            assert!(
                snapshot == 0,
                "root commit must cover the whole log, got checkpoint {}",
                snapshot
            );
            self.clear();
        } else {
            self.open_snapshots -= 1;
        }
    }

    /// Remove every record newer than the checkpoint `snapshot`, returning
    /// them newest first.
    ///
    /// The open-snapshot count is left unchanged: rolling back restores data
    /// without closing the checkpoint. Callers who want to undo *and* close
    /// follow up with [`UndoLog::commit`].
    ///
    /// # Panics
    ///
    /// If no snapshot is open or `snapshot` points past the end of the log.
    pub fn rollback_to(&mut self, snapshot: usize) -> Vec<Undo<T>> {
        self.assert_valid_snapshot(snapshot);
        self.records.drain(snapshot..).rev().collect()
    }

    fn assert_valid_snapshot(&self, snapshot: usize) {
        assert!(
            self.open_snapshots > 0,
            "no open snapshot: nothing to commit or roll back"
        );
        assert!(
            snapshot <= self.records.len(),
            "checkpoint {} points past the end of the log ({} records)",
            snapshot,
            self.records.len()
        );
    }
}

impl<T> Default for UndoLog<T> {
    fn default() -> Self {
        UndoLog::new()
    }
}

impl<T> Extend<Undo<T>> for UndoLog<T> {
    fn extend<I: IntoIterator<Item = Undo<T>>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl<T: fmt::Debug> fmt::Debug for UndoLog<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UndoLogs[")?;
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", record)?;
        }
        write!(f, "]")
    }
}
