//! The trie node layer of the simplex tree.
//!
//! Each [`Node`] represents one simplex: the vertex path from the virtual
//! root down to the node spells out the simplex's vertices in increasing
//! order. Nodes live in an arena keyed by [`SimplexKey`] and hold a parent
//! back-reference as an arena key rather than a pointer, so path
//! reconstruction is an O(depth) walk with no lifetime hazards.

use std::collections::BTreeMap;
use std::fmt::Debug;

use num_traits::float::FloatCore;
use slotmap::new_key_type;

/// A vertex label: a totally ordered integer identifier, unique within the
/// complex.
pub type Vertex = u32;

/// Scalar type for filtration values.
///
/// Blanket-implemented for every floating-point type that satisfies
/// `num_traits::float::FloatCore` (in particular `f32` and `f64`). The
/// filtration value of a simplex is the "time" at which it enters the
/// complex; the tree maintains the monotonicity invariant
/// `filtration(face) <= filtration(coface)`.
pub trait FiltrationValue: FloatCore + Debug + Default + Send + Sync + 'static {}

impl<T> FiltrationValue for T where T: FloatCore + Debug + Default + Send + Sync + 'static {}

new_key_type! {
    /// Opaque handle identifying one simplex in the tree.
    ///
    /// A `SimplexKey` is the arena key of the trie node at which the
    /// simplex's vertex path ends. Keys remain stable for the lifetime of
    /// the tree (no deletion is exposed), and a key from one tree is never
    /// valid in another: lookups with stale or foreign keys fail with a
    /// bounds error instead of returning unrelated data.
    pub struct SimplexKey;
}

/// One trie node: the extension of its parent's simplex by a single vertex.
///
/// The child dictionary is ordered by vertex label, which the expansion
/// algorithm relies on for sibling/neighbor intersection and which makes
/// depth-first traversal deterministic.
#[derive(Clone, Debug)]
pub struct Node<T: FiltrationValue> {
    vertex: Vertex,
    parent: Option<SimplexKey>,
    filtration: T,
    insertion_key: Option<u64>,
    children: BTreeMap<Vertex, SimplexKey>,
}

impl<T: FiltrationValue> Node<T> {
    /// Creates a node with an empty child dictionary.
    #[must_use]
    pub(crate) fn new(
        vertex: Vertex,
        parent: Option<SimplexKey>,
        filtration: T,
        insertion_key: Option<u64>,
    ) -> Self {
        Self {
            vertex,
            parent,
            filtration,
            insertion_key,
            children: BTreeMap::new(),
        }
    }

    /// The last vertex of this node's simplex (the label of the trie edge
    /// leading here).
    #[inline]
    #[must_use]
    pub const fn vertex(&self) -> Vertex {
        self.vertex
    }

    /// The parent node's key, or `None` for children of the virtual root
    /// (0-simplices).
    #[inline]
    #[must_use]
    pub const fn parent(&self) -> Option<SimplexKey> {
        self.parent
    }

    /// The filtration value of the simplex ending at this node.
    #[inline]
    #[must_use]
    pub const fn filtration(&self) -> T {
        self.filtration
    }

    /// The monotonically-assigned insertion key, present only when the tree
    /// was constructed with `store_keys` (zigzag mode).
    #[inline]
    #[must_use]
    pub const fn insertion_key(&self) -> Option<u64> {
        self.insertion_key
    }

    /// The ordered child dictionary: next vertex → child node key.
    #[inline]
    #[must_use]
    pub const fn children(&self) -> &BTreeMap<Vertex, SimplexKey> {
        &self.children
    }

    #[inline]
    pub(crate) fn children_mut(&mut self) -> &mut BTreeMap<Vertex, SimplexKey> {
        &mut self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn node_accessors_report_construction_values() {
        let mut arena: SlotMap<SimplexKey, ()> = SlotMap::with_key();
        let parent_key = arena.insert(());

        let node: Node<f64> = Node::new(5, Some(parent_key), 1.25, Some(3));
        assert_eq!(node.vertex(), 5);
        assert_eq!(node.parent(), Some(parent_key));
        assert_eq!(node.filtration(), 1.25);
        assert_eq!(node.insertion_key(), Some(3));
        assert!(node.children().is_empty());
    }

    #[test]
    fn root_children_have_no_parent() {
        let node: Node<f32> = Node::new(0, None, 0.0, None);
        assert_eq!(node.parent(), None);
        assert_eq!(node.insertion_key(), None);
    }

    #[test]
    fn child_dictionary_is_ordered_by_vertex() {
        let mut arena: SlotMap<SimplexKey, ()> = SlotMap::with_key();
        let mut node: Node<f64> = Node::new(0, None, 0.0, None);

        for v in [7, 2, 9, 4] {
            let k = arena.insert(());
            node.children_mut().insert(v, k);
        }

        let order: Vec<Vertex> = node.children().keys().copied().collect();
        assert_eq!(order, vec![2, 4, 7, 9]);
    }

    #[test]
    fn simplex_key_is_send_sync_unpin() {
        fn assert_auto_traits<T: Send + Sync + Unpin>() {}
        assert_auto_traits::<SimplexKey>();
        assert_auto_traits::<Node<f64>>();
    }
}
