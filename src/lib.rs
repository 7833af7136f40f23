//! # simplex-tree
//!
//! A compressed-trie **simplex tree** for filtered
//! [simplicial complexes](https://en.wikipedia.org/wiki/Simplicial_complex):
//! the core data structure behind persistent-homology pipelines.
//!
//! Every simplex is one trie node, reached from a virtual root by reading
//! the simplex's vertices in increasing order. Nodes live in an arena and
//! are addressed by stable, copyable [`SimplexKey`](core::node::SimplexKey)
//! handles, so boundary, coboundary, and filtration-order traversal never
//! touch raw pointers.
//!
//! # Features
//!
//! - Weighted 1-skeleton insertion ([`SimplexTree::insert_graph`](core::simplex_tree::SimplexTree::insert_graph))
//! - Flag-complex expansion to any dimension ([`SimplexTree::expansion`](core::simplex_tree::SimplexTree::expansion)),
//!   with the standard flag-filtration rule (a new simplex receives the
//!   maximum filtration value over its faces)
//! - Lazy, restartable traversal of vertices, simplices, filtration order,
//!   boundaries, and cofaces
//! - O(1) vertex/simplex counters and filtration lookup
//! - Construction-time policies: a fast-coface label index and zigzag
//!   insertion keys ([`SimplexTreeOptions`](core::options::SimplexTreeOptions))
//! - Generic filtration scalars (`f32`, `f64`, or any
//!   [`FiltrationValue`](core::node::FiltrationValue))
//!
//! # Basic usage
//!
//! ```rust
//! use simplex_tree::prelude::*;
//!
//! // A triangle with unit-weight edges (vertex weights default to 0).
//! let graph = Graph::from_edges([(0, 1, 1.0), (0, 2, 1.0), (1, 2, 1.0)]).unwrap();
//!
//! let mut st = SimplexTree::default();
//! st.insert_graph(&graph).unwrap();
//! st.expansion(2).unwrap();
//!
//! // 3 vertices + 3 edges + 1 triangle.
//! assert_eq!(st.num_simplices(), 7);
//!
//! // Process simplices the way a persistence algorithm would: in
//! // non-decreasing filtration order, faces before cofaces.
//! for key in st.filtration_simplex_range() {
//!     let word: Vec<u32> = {
//!         let mut w: Vec<u32> = st.simplex_vertex_range(key).unwrap().collect();
//!         w.reverse();
//!         w
//!     };
//!     let value = st.filtration(key).unwrap();
//!     println!("[{value}] {word:?}");
//!     for face in st.boundary_simplex_range(key).unwrap() {
//!         assert!(st.filtration(face).unwrap() <= value);
//!     }
//! }
//! ```
//!
//! # Construction and queries
//!
//! Construction is single-threaded and write-once: load the 1-skeleton,
//! expand, then query. All `*_range` methods take `&self`, allocate only
//! local iterator state, and may run concurrently from multiple threads
//! once construction is finished. Stale or foreign simplex keys are
//! reported as errors, never as silently wrong data.

// Forbid unsafe code throughout the entire crate
#![forbid(unsafe_code)]

/// The `core` module contains the trie layers and algorithms of the
/// simplex tree: node arena, input graph, options, the tree itself, and
/// the traversal iterators.
pub mod core {
    pub mod collections;
    pub mod graph;
    pub mod node;
    pub mod options;
    pub mod simplex_tree;
    pub mod traversal;

    pub use graph::*;
    pub use node::*;
    pub use options::*;
    pub use simplex_tree::*;
    pub use traversal::*;
}

/// A prelude re-exporting the types almost every user needs.
pub mod prelude {
    pub use crate::core::collections::{FastHashMap, FastHashSet, SmallBuffer, VertexWord};
    pub use crate::core::graph::{Graph, GraphError};
    pub use crate::core::node::{FiltrationValue, SimplexKey, Vertex};
    pub use crate::core::options::SimplexTreeOptions;
    pub use crate::core::simplex_tree::{
        ExpansionError, GraphInsertionError, SimplexAccessError, SimplexInsertionError,
        SimplexTree,
    };
    pub use crate::core::traversal::{
        BoundaryIter, CofacesIter, ComplexSimplexIter, FiltrationSimplexIter, SimplexVertexIter,
    };
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}
