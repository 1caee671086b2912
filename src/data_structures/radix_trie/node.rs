//! Node storage for the radix trie.
//!
//! Nodes live in three parallel vectors (left child, right child, value) addressed
//! by a node index. Index 0 is the root and always exists. Nodes are never freed,
//! so an index stays valid for the lifetime of the store.

use tracing::trace;

/// Index of a node inside a [`NodeStore`].
pub type NodeIndex = usize;

/// Index of the root node.
pub const ROOT: NodeIndex = 0;

/// Index-addressed arena of trie nodes with doubling growth.
#[derive(Debug, Clone)]
pub struct NodeStore<V> {
    /// Child taken when the next key bit is 0
    lefts: Vec<Option<NodeIndex>>,

    /// Child taken when the next key bit is 1
    rights: Vec<Option<NodeIndex>>,

    /// Payload stored for the exact prefix ending at each node
    values: Vec<Option<V>>,

    /// Number of slots reserved before the next growth
    allocated_size: usize,
}

impl<V> NodeStore<V> {
    /// Creates a store with room for `allocated_size` nodes and a valueless root.
    ///
    /// A capacity of zero is promoted to one so the root always fits.
    pub fn with_capacity(allocated_size: usize) -> Self {
        let allocated_size = allocated_size.max(1);

        let mut store = Self {
            lefts: Vec::with_capacity(allocated_size),
            rights: Vec::with_capacity(allocated_size),
            values: Vec::with_capacity(allocated_size),
            allocated_size,
        };
        store.push_empty();
        store
    }

    /// Returns the next free node index, growing the backing storage first when full.
    ///
    /// The new node has no children and no value.
    pub fn allocate(&mut self) -> NodeIndex {
        if self.size() == self.allocated_size {
            self.grow();
        }
        self.push_empty()
    }

    /// Left child of `index`, if any.
    #[inline]
    pub fn left(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.lefts[index]
    }

    /// Right child of `index`, if any.
    #[inline]
    pub fn right(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.rights[index]
    }

    /// Value stored at `index`, if any.
    #[inline]
    pub fn value(&self, index: NodeIndex) -> Option<&V> {
        self.values[index].as_ref()
    }

    /// Sets the left child of `index`.
    #[inline]
    pub fn set_left(&mut self, index: NodeIndex, child: NodeIndex) {
        self.lefts[index] = Some(child);
    }

    /// Sets the right child of `index`.
    #[inline]
    pub fn set_right(&mut self, index: NodeIndex, child: NodeIndex) {
        self.rights[index] = Some(child);
    }

    /// Stores `value` at `index`, returning the previous value.
    #[inline]
    pub fn set_value(&mut self, index: NodeIndex, value: V) -> Option<V> {
        self.values[index].replace(value)
    }

    /// Number of allocated nodes, root included.
    ///
    /// This is a node count for capacity planning, not the number of stored prefixes.
    #[inline]
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Number of node slots currently reserved.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.allocated_size
    }

    fn push_empty(&mut self) -> NodeIndex {
        let index = self.values.len();
        self.lefts.push(None);
        self.rights.push(None);
        self.values.push(None);
        index
    }

    /// Doubles the reserved capacity of all three arrays.
    fn grow(&mut self) {
        let old_size = self.allocated_size;
        self.allocated_size = old_size * 2;

        let additional = self.allocated_size - self.size();
        self.lefts.reserve_exact(additional);
        self.rights.reserve_exact(additional);
        self.values.reserve_exact(additional);

        trace!(from = old_size, to = self.allocated_size, "Grew radix trie node store");
    }
}
