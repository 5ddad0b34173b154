use snapshot_unify::unify::UnificationTable;

use super::strategy::{apply, exact_state, key, table_ops_strategy};

use proptest::{prop_assert, prop_assert_eq, proptest};

#[test]
fn rollback_undoes_a_union() {
    let mut table = UnificationTable::new();
    let keys: Vec<_> = (0..5i64).map(|v| table.push(v)).collect();

    let snapshot = table.start_snapshot();
    table.union(keys[1], keys[2], 8);
    assert!(table.unioned(keys[1], keys[2]));

    table.rollback_to(snapshot);
    assert!(!table.unioned(keys[1], keys[2]));
    assert!(!table.unioned(keys[2], keys[1]));
    assert!(!table.unioned(keys[1], keys[3]));
    table.commit(snapshot);
}

#[test]
fn commit_preserves_growth() {
    let mut table = UnificationTable::new();
    table.push(42i64);
    let snapshot = table.start_snapshot();
    table.push(100);
    table.commit(snapshot);
    assert_eq!(table.len(), 2);
}

#[test]
fn rollback_discards_growth() {
    let mut table = UnificationTable::new();
    table.push(42i64);
    let snapshot = table.start_snapshot();
    table.push(100);
    table.rollback_to(snapshot);
    assert_eq!(table.len(), 1);
    table.commit(snapshot);
}

#[test]
fn rollback_leaves_the_snapshot_open() {
    let mut table = UnificationTable::new();
    let a = table.push(1i64);
    let b = table.push(2);

    let snapshot = table.start_snapshot();
    table.union(a, b, 3);
    table.rollback_to(snapshot);

    // Undo-and-close is rollback followed by commit.
    assert!(table.in_snapshot());
    table.commit(snapshot);
    assert!(!table.in_snapshot());
}

#[test]
fn records_survive_until_the_root_commit() {
    let mut table = UnificationTable::new();
    let keys: Vec<_> = (0..6i64).map(|v| table.push(v)).collect();

    let s1 = table.start_snapshot();
    table.union(keys[0], keys[1], 10);
    let s2 = table.start_snapshot();
    table.union(keys[2], keys[3], 20);
    let s3 = table.start_snapshot();
    table.union(keys[4], keys[5], 30);

    // Committing inner frames must not discard records the outermost frame
    // may still roll back to.
    table.commit(s3);
    table.commit(s2);
    table.rollback_to(s1);

    assert!(!table.unioned(keys[0], keys[1]));
    assert!(!table.unioned(keys[2], keys[3]));
    assert!(!table.unioned(keys[4], keys[5]));
    table.commit(s1);
}

proptest! {
    #[test]
    fn snapshot_round_trip(
        initial in proptest::collection::vec(0i64..100, 1..8),
        ops in table_ops_strategy(24),
    ) {
        let mut table = UnificationTable::new();
        table.extend(initial);
        let before = exact_state(&table);

        let snapshot = table.start_snapshot();
        apply(&mut table, &ops);
        table.rollback_to(snapshot);

        // Bit-for-bit: unions, payload overwrites, appended nodes and
        // compressed paths are all unwound.
        prop_assert_eq!(exact_state(&table), before);
        table.commit(snapshot);
    }

    #[test]
    fn nested_commit_neutrality(
        initial in proptest::collection::vec(0i64..100, 1..8),
        outer_ops in table_ops_strategy(12),
        inner_ops in table_ops_strategy(12),
    ) {
        let mut table = UnificationTable::new();
        table.extend(initial.clone());
        let before = exact_state(&table);

        let outer = table.start_snapshot();
        apply(&mut table, &outer_ops);
        let inner = table.start_snapshot();
        apply(&mut table, &inner_ops);
        table.commit(inner);
        table.rollback_to(outer);
        prop_assert_eq!(&exact_state(&table), &before);

        // Same outcome as rolling back the outer frame directly, with no
        // inner snapshot in between.
        let mut direct = UnificationTable::new();
        direct.extend(initial);
        let snapshot = direct.start_snapshot();
        apply(&mut direct, &outer_ops);
        apply(&mut direct, &inner_ops);
        direct.rollback_to(snapshot);
        prop_assert_eq!(&exact_state(&direct), &before);

        table.commit(outer);
        direct.commit(snapshot);
    }

    #[test]
    fn unrelated_find_preserves_representatives(
        initial in proptest::collection::vec(0i64..100, 1..8),
        ops in table_ops_strategy(24),
        x in 0usize..32,
        y in 0usize..32,
    ) {
        let mut table = UnificationTable::new();
        table.extend(initial);
        apply(&mut table, &ops);

        let x = key(&table, x);
        let y = key(&table, y);
        let before = table.find(x);
        table.find(y);
        prop_assert_eq!(table.find(x), before);
    }

    #[test]
    fn rollback_then_continue_behaves_like_a_fresh_start(
        initial in proptest::collection::vec(0i64..100, 2..8),
        discarded in table_ops_strategy(16),
        raw in (0usize..32, 0usize..32),
        value in 0i64..100,
    ) {
        let mut table = UnificationTable::new();
        table.extend(initial);

        let snapshot = table.start_snapshot();
        apply(&mut table, &discarded);
        table.rollback_to(snapshot);

        // The rolled-back frame is still open and fully usable.
        let a = key(&table, raw.0);
        let b = key(&table, raw.1);
        if a != b {
            table.union(a, b, value);
            prop_assert!(table.unioned(a, b));
            let root = table.find(a);
            prop_assert_eq!(table.value(root).value, value);
        }

        table.rollback_to(snapshot);
        table.commit(snapshot);
    }
}
