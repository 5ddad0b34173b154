//! # Snapshot Unify
//!
//! A transactional union-find: equivalence classes with a per-class payload,
//! where *every* mutation can be rolled back to an earlier snapshot, and
//! snapshots nest.
//!
//! Three layers cooperate, leaf first:
//!
//! ```text
//!   ┌───────────────────────────────┐
//!   │   UnificationTable<T>         │   union by rank, find with
//!   │                               │   path compression, payloads
//!   ├───────────────────────────────┤
//!   │   SnapshotArray<VarValue<T>>  │   journals every push/overwrite
//!   ├───────────────────────────────┤
//!   │   UndoLog<VarValue<T>>        │   reversible records, nesting
//!   └───────────────────────────────┘
//! ```
//!
//! The interesting constraint lives in the interaction: path compression
//! rewrites nodes that union-by-rank never logically changed, and those
//! rewrites must still participate in rollback. The table therefore routes
//! all mutation, user-initiated and heuristic alike, through the array's
//! single journaled write pathway; above the array it keeps no state at all,
//! so restoring the array restores the table.
//!
//! ```
//! use snapshot_unify::unify::UnificationTable;
//!
//! let mut table = UnificationTable::new();
//! let keys: Vec<_> = (0..5).map(|i| table.push(i)).collect();
//!
//! let snapshot = table.start_snapshot();
//! table.union(keys[1], keys[2], 8);
//! assert!(table.unioned(keys[1], keys[2]));
//!
//! table.rollback_to(snapshot);
//! assert!(!table.unioned(keys[1], keys[2]));
//! table.commit(snapshot);
//! ```
//!
//! All operations are synchronous and single-threaded; misuse (out-of-range
//! indices, committing without an open snapshot) is a programmer error and
//! panics.

pub mod snapshot_array;
pub mod undo_log;
pub mod unify;
