/// Identifies a node by its position in a [`crate::unify::UnificationTable`].
///
/// Two indices are equal iff their integers are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarIndex {
    pub index: usize,
}

impl VarIndex {
    pub fn new(index: usize) -> Self {
        VarIndex { index }
    }
}

impl From<usize> for VarIndex {
    fn from(index: usize) -> Self {
        VarIndex { index }
    }
}

/// A union-find node: a user payload, a rank and a parent link.
///
/// A node is a *root* iff its parent link equals its own index. `rank` is an
/// upper bound on the height of the subtree below a root; at non-roots it is
/// left as stored and carries no meaning.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarValue<T> {
    /// Payload of the equivalence class this node belongs to. Meaningful at
    /// the root; stale at non-roots.
    pub value: T,

    /// Height bound used by union to pick the surviving root.
    pub rank: u32,

    /// Parent link. Roots point at themselves.
    pub parent: VarIndex,
}

impl<T> VarValue<T> {
    pub fn new(value: T, rank: u32, parent: VarIndex) -> Self {
        VarValue {
            value,
            rank,
            parent,
        }
    }

    /// A fresh singleton root at position `index`.
    pub fn new_root(value: T, index: usize) -> Self {
        VarValue::new(value, 0, VarIndex { index })
    }

    /// Demote this node to a child of `to`.
    pub(crate) fn redirect(&mut self, to: VarIndex) {
        self.parent = to;
    }

    /// Re-root this node with a new rank and payload.
    pub(crate) fn root(&mut self, rank: u32, value: T) {
        self.rank = rank;
        self.value = value;
    }
}

/// Equality compares `value` and `parent` only. `rank` is a balancing
/// heuristic, not part of the observable state: path compression and union
/// may perturb ranks without changing which nodes are equivalent.
impl<T: PartialEq> PartialEq for VarValue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.parent == other.parent
    }
}

impl<T: Eq> Eq for VarValue<T> {}
