use {
    proptest::prelude::Strategy,
    snapshot_unify::snapshot_array::SnapshotArray,
};

/// A mutation of a `SnapshotArray<i64>`. Indices are resolved modulo the
/// array's current length when applied, so any generated sequence is valid.
#[derive(Clone, Debug)]
pub(crate) enum ArrayOp {
    Push(i64),
    Set(usize, i64),
}

pub(crate) fn array_ops_strategy(max_ops: usize) -> impl Strategy<Value = Vec<ArrayOp>> {
    proptest::collection::vec(
        proptest::prop_oneof![
            (0i64..100).prop_map(ArrayOp::Push),
            (0usize..32, 0i64..100).prop_map(|(i, v)| ArrayOp::Set(i, v)),
        ],
        0..max_ops,
    )
}

pub(crate) fn apply(array: &mut SnapshotArray<i64>, ops: &[ArrayOp]) {
    for op in ops {
        match *op {
            ArrayOp::Push(value) => array.push(value),
            ArrayOp::Set(index, value) => {
                if !array.is_empty() {
                    array.set(index % array.len(), value);
                }
            }
        }
    }
}

/// The observable state: a copy of every element in index order.
pub(crate) fn observable(array: &SnapshotArray<i64>) -> Vec<i64> {
    (0..array.len()).map(|i| array.get(i).unwrap()).collect()
}
