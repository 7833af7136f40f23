//! The simplex tree core: insertion, expansion, and O(1) bookkeeping.
//!
//! A simplex tree stores an abstract simplicial complex as a compressed
//! trie. Every simplex corresponds to exactly one trie node, reached from
//! the virtual root by reading the simplex's vertices in increasing order.
//! Nodes live in a [`slotmap`] arena keyed by [`SimplexKey`], so simplex
//! handles are cheap, copyable, and stable for the lifetime of the tree.
//!
//! The intended lifecycle is write-once-then-query:
//!
//! 1. [`SimplexTree::insert_graph`] loads a weighted 1-skeleton,
//! 2. [`SimplexTree::expansion`] synthesizes the flag complex up to a
//!    target dimension,
//! 3. the `*_range` traversal methods answer read-only queries, and may run
//!    concurrently once construction is finished.
//!
//! # Examples
//!
//! ```rust
//! use simplex_tree::prelude::*;
//!
//! // Triangle 1-skeleton: three vertices, three unit-weight edges.
//! let graph = Graph::from_edges([(0, 1, 1.0), (0, 2, 1.0), (1, 2, 1.0)]).unwrap();
//!
//! let mut st = SimplexTree::default();
//! st.insert_graph(&graph).unwrap();
//! st.expansion(2).unwrap();
//!
//! // 3 vertices + 3 edges + 1 triangle.
//! assert_eq!(st.num_vertices(), 3);
//! assert_eq!(st.num_simplices(), 7);
//! assert_eq!(st.dimension(), Some(2));
//!
//! let triangle = st.find([0, 1, 2]).unwrap();
//! assert_eq!(st.filtration(triangle).unwrap(), 1.0);
//! ```

use std::collections::BTreeMap;
use std::ops::Bound;

use num_traits::float::FloatCore;
use slotmap::SlotMap;
use thiserror::Error;

use super::collections::{LabelIndexMap, SmallBuffer, VertexWord};
use super::graph::Graph;
use super::node::{FiltrationValue, Node, SimplexKey, Vertex};
use super::options::SimplexTreeOptions;
use super::traversal::{
    BoundaryIter, CofacesIter, ComplexSimplexIter, FiltrationSimplexIter, SimplexVertexIter,
};

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised by [`SimplexTree::insert_graph`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphInsertionError {
    /// The tree already contains simplices; graph insertion is only defined
    /// on an empty tree.
    #[error("insert_graph requires an empty tree, but it already holds {num_simplices} simplices")]
    TreeNotEmpty {
        /// Number of simplices already stored.
        num_simplices: usize,
    },
}

/// Errors raised by [`SimplexTree::expansion`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExpansionError {
    /// Expansion targets dimensions strictly above the 1-skeleton.
    #[error("expansion requires a maximum dimension of at least 1, got {max_dim}")]
    InvalidMaximumDimension {
        /// The rejected target dimension.
        max_dim: usize,
    },
}

/// Errors raised by [`SimplexTree::insert_simplex_and_subfaces`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SimplexInsertionError {
    /// The vertex list was empty after deduplication.
    #[error("cannot insert a simplex with an empty vertex set")]
    EmptyVertexSet,
    /// The requested filtration value is NaN or infinite.
    #[error("cannot insert a simplex with non-finite filtration value {filtration}")]
    NonFiniteFiltration {
        /// Debug rendering of the rejected value.
        filtration: String,
    },
    /// The requested filtration value is below an already-stored face's
    /// value, which would break monotonicity.
    #[error(
        "filtration value {requested} is below the value {face} of an existing face; \
         this would violate filtration monotonicity"
    )]
    BelowFaceFiltration {
        /// Debug rendering of the requested value.
        requested: String,
        /// Debug rendering of the conflicting face value.
        face: String,
    },
}

/// Errors raised when a [`SimplexKey`] does not refer to a simplex of this
/// tree (stale key, or a key from a different tree).
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SimplexAccessError {
    /// The key is not present in this tree's arena.
    #[error("simplex key is stale or belongs to a different tree")]
    UnknownSimplex,
}

// =============================================================================
// SIMPLEX TREE
// =============================================================================

/// A compressed-trie simplicial complex with filtration values.
///
/// Generic over the filtration scalar `T` (default `f64`). Construction is
/// single-threaded; all traversal methods take `&self`, allocate only local
/// state, and are safe to run concurrently once construction is complete.
#[derive(Clone, Debug)]
pub struct SimplexTree<T: FiltrationValue = f64> {
    nodes: SlotMap<SimplexKey, Node<T>>,
    root_children: BTreeMap<Vertex, SimplexKey>,
    options: SimplexTreeOptions,
    label_index: LabelIndexMap,
    num_vertices: usize,
    num_simplices: usize,
    dimension: Option<usize>,
    next_insertion_key: u64,
}

impl<T: FiltrationValue> Default for SimplexTree<T> {
    fn default() -> Self {
        Self::new(SimplexTreeOptions::DEFAULT)
    }
}

impl<T: FiltrationValue> SimplexTree<T> {
    /// Creates an empty tree with the given construction-time options.
    #[must_use]
    pub fn new(options: SimplexTreeOptions) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_children: BTreeMap::new(),
            options,
            label_index: LabelIndexMap::default(),
            num_vertices: 0,
            num_simplices: 0,
            dimension: None,
            next_insertion_key: 0,
        }
    }

    /// The options this tree was constructed with.
    #[inline]
    #[must_use]
    pub const fn options(&self) -> SimplexTreeOptions {
        self.options
    }

    /// `true` if the complex holds no simplices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_simplices == 0
    }

    /// Number of 0-simplices. O(1).
    #[inline]
    #[must_use]
    pub const fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Total number of simplices of every dimension. O(1).
    #[inline]
    #[must_use]
    pub const fn num_simplices(&self) -> usize {
        self.num_simplices
    }

    /// Largest dimension of any stored simplex, or `None` for the empty
    /// complex.
    #[inline]
    #[must_use]
    pub const fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Inserts a weighted 1-skeleton into an empty tree.
    ///
    /// Creates one 0-simplex per vertex (filtration = vertex weight) and one
    /// 1-simplex per edge (filtration = edge weight), stored under the
    /// lower-indexed endpoint. The [`Graph`] has already validated edge
    /// canonicality and weight monotonicity.
    ///
    /// # Errors
    ///
    /// [`GraphInsertionError::TreeNotEmpty`] if the tree already holds
    /// simplices; the tree is left untouched.
    pub fn insert_graph(&mut self, graph: &Graph<T>) -> Result<(), GraphInsertionError> {
        if !self.is_empty() {
            return Err(GraphInsertionError::TreeNotEmpty {
                num_simplices: self.num_simplices,
            });
        }

        for &(vertex, weight) in graph.vertices() {
            self.attach_node(None, 0, vertex, weight);
        }
        for &(u, v, weight) in graph.edges() {
            // Graph guarantees u < v and that both endpoints are declared.
            let parent = self.root_children[&u];
            self.attach_node(Some(parent), 1, v, weight);
        }
        Ok(())
    }

    /// Expands the 1-skeleton into its flag complex up to `max_dim`.
    ///
    /// A set of k+1 vertices spans a k-simplex iff all its pairs are edges
    /// of the inserted graph. New simplices receive the maximum filtration
    /// value over their codimension-1 faces, preserving monotonicity.
    ///
    /// Calling `expansion` again with a larger `max_dim` extends a
    /// previously expanded tree; already-present simplices are untouched.
    ///
    /// # Errors
    ///
    /// [`ExpansionError::InvalidMaximumDimension`] when `max_dim == 0`.
    pub fn expansion(&mut self, max_dim: usize) -> Result<(), ExpansionError> {
        if max_dim == 0 {
            return Err(ExpansionError::InvalidMaximumDimension { max_dim });
        }
        if max_dim == 1 {
            return Ok(());
        }
        let roots: Vec<SimplexKey> = self.root_children.values().copied().collect();
        for key in roots {
            self.expand_subtree(key, 1, max_dim);
        }
        Ok(())
    }

    /// Extends the simplex at `key` (depth `depth`) by every admissible
    /// vertex, then recurses while the dimension budget allows.
    ///
    /// Candidates are the intersection of the node's later siblings with the
    /// neighbors of its own vertex: `σ ∪ {w}` is a flag simplex iff
    /// `(σ \ {u}) ∪ {w}` is (a later sibling of the node) and `{u, w}` is an
    /// edge (a child of `w`'s root entry, where `u` is the node's vertex).
    fn expand_subtree(&mut self, key: SimplexKey, depth: usize, max_dim: usize) {
        debug_assert!(depth <= max_dim);

        let u = self.nodes[key].vertex();
        // Exclusive lower bound instead of `u + 1..`: `u` may be the
        // largest representable label, where the increment would overflow.
        let above_u = (Bound::Excluded(u), Bound::Unbounded);
        let siblings: Vec<(Vertex, SimplexKey)> = match self.nodes[key].parent() {
            Some(parent) => self.nodes[parent]
                .children()
                .range(above_u)
                .map(|(&w, &k)| (w, k))
                .collect(),
            None => self
                .root_children
                .range(above_u)
                .map(|(&w, &k)| (w, k))
                .collect(),
        };

        // Extending a node of word length d creates children of dimension d,
        // so nodes at depth == max_dim still extend; only deeper ones stop.
        if depth <= max_dim && !siblings.is_empty() {
            let own_filtration = self.nodes[key].filtration();
            let root_u = self.root_children[&u];
            for (w, sibling) in siblings {
                let Some(&edge) = self.nodes[root_u].children().get(&w) else {
                    continue; // {u, w} is not an edge: not a flag simplex
                };
                if self.nodes[key].children().contains_key(&w) {
                    continue; // already created by an earlier expansion pass
                }
                let filtration = FloatCore::max(
                    own_filtration,
                    FloatCore::max(
                        self.nodes[sibling].filtration(),
                        self.nodes[edge].filtration(),
                    ),
                );
                self.attach_node(Some(key), depth, w, filtration);
            }
        }

        if depth < max_dim {
            let children: Vec<SimplexKey> = self.nodes[key].children().values().copied().collect();
            for child in children {
                self.expand_subtree(child, depth + 1, max_dim);
            }
        }
    }

    /// Inserts a simplex together with every missing face, all at the given
    /// filtration value. Already-present faces keep their stored value.
    ///
    /// Returns the key of the (possibly pre-existing) top simplex. Vertices
    /// may be given in any order and are deduplicated.
    ///
    /// # Errors
    ///
    /// - [`SimplexInsertionError::EmptyVertexSet`] for an empty vertex list,
    /// - [`SimplexInsertionError::NonFiniteFiltration`] for NaN/infinite
    ///   values,
    /// - [`SimplexInsertionError::BelowFaceFiltration`] when an existing
    ///   face already has a larger filtration value; nothing is inserted.
    pub fn insert_simplex_and_subfaces<I>(
        &mut self,
        vertices: I,
        filtration: T,
    ) -> Result<SimplexKey, SimplexInsertionError>
    where
        I: IntoIterator<Item = Vertex>,
    {
        if !filtration.is_finite() {
            return Err(SimplexInsertionError::NonFiniteFiltration {
                filtration: format!("{filtration:?}"),
            });
        }
        let mut word: VertexWord = vertices.into_iter().collect();
        word.sort_unstable();
        word.dedup();
        if word.is_empty() {
            return Err(SimplexInsertionError::EmptyVertexSet);
        }

        if let Some(face_value) = self.max_existing_subface_filtration(&word) {
            if face_value > filtration {
                return Err(SimplexInsertionError::BelowFaceFiltration {
                    requested: format!("{filtration:?}"),
                    face: format!("{face_value:?}"),
                });
            }
        }

        self.insert_subfaces_rec(None, 0, &word, filtration);
        let key = self
            .find_sorted(&word)
            .unwrap_or_else(|| unreachable!("top simplex was just inserted"));
        Ok(key)
    }

    /// Inserts every subword of `word` below `parent` (each subset of the
    /// simplex is a downward path choosing a subsequence of the word).
    fn insert_subfaces_rec(
        &mut self,
        parent: Option<SimplexKey>,
        depth: usize,
        word: &[Vertex],
        filtration: T,
    ) {
        for (i, &vertex) in word.iter().enumerate() {
            let existing = match parent {
                Some(p) => self.nodes[p].children().get(&vertex).copied(),
                None => self.root_children.get(&vertex).copied(),
            };
            let child =
                existing.unwrap_or_else(|| self.attach_node(parent, depth, vertex, filtration));
            self.insert_subfaces_rec(Some(child), depth + 1, &word[i + 1..], filtration);
        }
    }

    /// Maximum filtration value over the already-stored subfaces of `word`
    /// (the word itself included), or `None` when no subface exists yet.
    fn max_existing_subface_filtration(&self, word: &[Vertex]) -> Option<T> {
        fn walk<T: FiltrationValue>(
            tree: &SimplexTree<T>,
            parent: Option<SimplexKey>,
            word: &[Vertex],
            best: &mut Option<T>,
        ) {
            for (i, &vertex) in word.iter().enumerate() {
                let child = match parent {
                    Some(p) => tree.nodes[p].children().get(&vertex).copied(),
                    None => tree.root_children.get(&vertex).copied(),
                };
                if let Some(child) = child {
                    let value = tree.nodes[child].filtration();
                    *best = Some(match *best {
                        Some(b) => FloatCore::max(b, value),
                        None => value,
                    });
                    walk(tree, Some(child), &word[i + 1..], best);
                }
            }
        }
        let mut best = None;
        walk(self, None, word, &mut best);
        best
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Locates a simplex by its vertex set, given in any order.
    #[must_use]
    pub fn find<I>(&self, vertices: I) -> Option<SimplexKey>
    where
        I: IntoIterator<Item = Vertex>,
    {
        let mut word: VertexWord = vertices.into_iter().collect();
        word.sort_unstable();
        word.dedup();
        if word.is_empty() {
            return None;
        }
        self.find_sorted(&word)
    }

    /// The filtration value of a simplex. O(1).
    ///
    /// # Errors
    ///
    /// [`SimplexAccessError::UnknownSimplex`] for stale or foreign keys.
    pub fn filtration(&self, key: SimplexKey) -> Result<T, SimplexAccessError> {
        self.node(key).map(Node::filtration)
    }

    /// The zigzag insertion key of a simplex, or `None` when the tree was
    /// built without `store_keys`. O(1).
    ///
    /// Keys are assigned in strictly increasing node-creation order, so
    /// zigzag persistence can recover relative insertion order independent
    /// of the filtration values. Within a single bulk operation
    /// ([`SimplexTree::expansion`] or
    /// [`SimplexTree::insert_simplex_and_subfaces`]) nodes are created in
    /// the trie's depth-first enumeration, which is not face-monotone: a
    /// coface created in the same call may receive a smaller key than a
    /// face created later (inserting `{0, 1, 2}` keys it before `{1}`).
    /// Keys are therefore an insertion log, not a filtration;
    /// [`SimplexTree::filtration_simplex_range`] stays face-monotone
    /// regardless, because dimension breaks filtration ties before keys.
    ///
    /// # Errors
    ///
    /// [`SimplexAccessError::UnknownSimplex`] for stale or foreign keys.
    pub fn insertion_key(&self, key: SimplexKey) -> Result<Option<u64>, SimplexAccessError> {
        self.node(key).map(Node::insertion_key)
    }

    /// The last (largest) vertex of a simplex. O(1).
    ///
    /// # Errors
    ///
    /// [`SimplexAccessError::UnknownSimplex`] for stale or foreign keys.
    pub fn vertex_of(&self, key: SimplexKey) -> Result<Vertex, SimplexAccessError> {
        self.node(key).map(Node::vertex)
    }

    /// The dimension of a simplex (number of vertices minus one). O(depth).
    ///
    /// # Errors
    ///
    /// [`SimplexAccessError::UnknownSimplex`] for stale or foreign keys.
    pub fn dimension_of(&self, key: SimplexKey) -> Result<usize, SimplexAccessError> {
        self.depth_of(key).map(|depth| depth - 1)
    }

    // -------------------------------------------------------------------------
    // Traversal ranges
    // -------------------------------------------------------------------------

    /// All vertex labels of the complex, in increasing order.
    #[must_use = "this iterator is lazy and does nothing unless consumed"]
    pub fn complex_vertex_range(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.root_children.keys().copied()
    }

    /// Every simplex exactly once, in depth-first pre-order over the trie.
    /// No filtration order is guaranteed.
    #[must_use = "this iterator is lazy and does nothing unless consumed"]
    pub fn complex_simplex_range(&self) -> ComplexSimplexIter<'_, T> {
        ComplexSimplexIter::new(self)
    }

    /// Every simplex, sorted by non-decreasing filtration value with ties
    /// broken by dimension (faces precede their cofaces), then by insertion
    /// key (zigzag mode) or vertex word. O(n log n).
    #[must_use = "this iterator is lazy and does nothing unless consumed"]
    pub fn filtration_simplex_range(&self) -> FiltrationSimplexIter {
        FiltrationSimplexIter::new(self)
    }

    /// The vertex path of a simplex, walked node → root, so vertices are
    /// produced in decreasing order. Reverse and collect for the sorted word.
    ///
    /// # Errors
    ///
    /// [`SimplexAccessError::UnknownSimplex`] for stale or foreign keys.
    pub fn simplex_vertex_range(
        &self,
        key: SimplexKey,
    ) -> Result<SimplexVertexIter<'_, T>, SimplexAccessError> {
        self.node(key)?;
        Ok(SimplexVertexIter::new(self, key))
    }

    /// The codimension-1 faces of a simplex.
    ///
    /// Fixed order convention for boundary-operator sign computation: the
    /// i-th face omits the i-th **largest** vertex, so the face omitting the
    /// smallest vertex comes last. A 0-simplex has an empty boundary.
    ///
    /// # Errors
    ///
    /// [`SimplexAccessError::UnknownSimplex`] for stale or foreign keys.
    pub fn boundary_simplex_range(
        &self,
        key: SimplexKey,
    ) -> Result<BoundaryIter<'_, T>, SimplexAccessError> {
        let word = self.word_of(key)?;
        Ok(BoundaryIter::new(self, word))
    }

    /// The cofaces of a simplex: every simplex containing it as a face.
    ///
    /// `codim == 0` yields the whole star, the simplex itself included;
    /// `codim == c > 0` yields only cofaces of dimension `dim + c`. With the
    /// `fast_cofaces` option the search is seeded from the vertex-label
    /// index instead of scanning the trie. No order is guaranteed.
    ///
    /// # Errors
    ///
    /// [`SimplexAccessError::UnknownSimplex`] for stale or foreign keys.
    pub fn cofaces_simplex_range(
        &self,
        key: SimplexKey,
        codim: usize,
    ) -> Result<CofacesIter<'_, T>, SimplexAccessError> {
        let word = self.word_of(key)?;
        Ok(CofacesIter::new(self, word, codim))
    }

    /// The coboundary: cofaces of codimension exactly 1.
    ///
    /// # Errors
    ///
    /// [`SimplexAccessError::UnknownSimplex`] for stale or foreign keys.
    pub fn coboundary_simplex_range(
        &self,
        key: SimplexKey,
    ) -> Result<CofacesIter<'_, T>, SimplexAccessError> {
        self.cofaces_simplex_range(key, 1)
    }

    // -------------------------------------------------------------------------
    // Internal plumbing
    // -------------------------------------------------------------------------

    pub(crate) fn node(&self, key: SimplexKey) -> Result<&Node<T>, SimplexAccessError> {
        self.nodes.get(key).ok_or(SimplexAccessError::UnknownSimplex)
    }

    pub(crate) fn arena(&self) -> &SlotMap<SimplexKey, Node<T>> {
        &self.nodes
    }

    pub(crate) fn roots(&self) -> &BTreeMap<Vertex, SimplexKey> {
        &self.root_children
    }

    pub(crate) fn label_index(&self, vertex: Vertex) -> &[SimplexKey] {
        self.label_index.get(&vertex).map_or(&[], Vec::as_slice)
    }

    /// Walks the trie along a sorted vertex word.
    pub(crate) fn find_sorted(&self, word: &[Vertex]) -> Option<SimplexKey> {
        let (&first, rest) = word.split_first()?;
        let mut key = *self.root_children.get(&first)?;
        for vertex in rest {
            key = *self.nodes[key].children().get(vertex)?;
        }
        Some(key)
    }

    /// Depth of a node: word length of its simplex (dimension + 1).
    pub(crate) fn depth_of(&self, key: SimplexKey) -> Result<usize, SimplexAccessError> {
        let mut node = self.node(key)?;
        let mut depth = 1;
        while let Some(parent) = node.parent() {
            node = &self.nodes[parent];
            depth += 1;
        }
        Ok(depth)
    }

    /// Ascending vertex word of a simplex (path reversed).
    pub(crate) fn word_of(&self, key: SimplexKey) -> Result<VertexWord, SimplexAccessError> {
        let mut word: VertexWord = SmallBuffer::new();
        let mut node = self.node(key)?;
        word.push(node.vertex());
        while let Some(parent) = node.parent() {
            node = &self.nodes[parent];
            word.push(node.vertex());
        }
        word.reverse();
        Ok(word)
    }

    /// Creates a node and wires every piece of bookkeeping: parent/root
    /// child dictionary, counters, dimension, label index, insertion key.
    ///
    /// `parent_depth` is the parent's word length (0 for the virtual root).
    /// The caller guarantees the child does not exist yet.
    fn attach_node(
        &mut self,
        parent: Option<SimplexKey>,
        parent_depth: usize,
        vertex: Vertex,
        filtration: T,
    ) -> SimplexKey {
        let insertion_key = self.options.store_keys.then(|| {
            let k = self.next_insertion_key;
            self.next_insertion_key += 1;
            k
        });
        let key = self
            .nodes
            .insert(Node::new(vertex, parent, filtration, insertion_key));

        let previous = match parent {
            Some(p) => self.nodes[p].children_mut().insert(vertex, key),
            None => {
                self.num_vertices += 1;
                self.root_children.insert(vertex, key)
            }
        };
        debug_assert!(previous.is_none(), "attach_node overwrote an existing child");

        self.num_simplices += 1;
        let dim = parent_depth; // word length is parent_depth + 1
        self.dimension = Some(self.dimension.map_or(dim, |d| d.max(dim)));
        if self.options.fast_cofaces {
            self.label_index.entry(vertex).or_default().push(key);
        }
        key
    }
}

// =============================================================================
// TESTS
// =============================================================================
