//! Weighted 1-skeleton input for [`SimplexTree::insert_graph`].
//!
//! Graph reading (files, point clouds, distance matrices) is out of scope;
//! collaborators hand this module already-parsed vertex and edge lists. The
//! constructor validates everything a malformed input could smuggle into the
//! tree — self-loops, duplicate or dangling edges, non-finite weights, and
//! edge weights below their endpoints' weights — so that construction fails
//! fast instead of producing a silently-corrupt complex.
//!
//! [`SimplexTree::insert_graph`]: crate::core::simplex_tree::SimplexTree::insert_graph

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::collections::{FastHashMap, FastHashSet};
use super::node::{FiltrationValue, Vertex};

/// Errors detected while validating a weighted 1-skeleton.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    /// The same vertex label was declared more than once.
    #[error("Vertex {vertex} is declared more than once")]
    DuplicateVertex {
        /// The repeated vertex label.
        vertex: Vertex,
    },
    /// An edge connects a vertex to itself.
    #[error("Edge ({vertex}, {vertex}) is a self-loop")]
    SelfLoop {
        /// The offending vertex label.
        vertex: Vertex,
    },
    /// The same undirected edge appears more than once.
    #[error("Edge ({u}, {v}) is declared more than once")]
    DuplicateEdge {
        /// Lower endpoint (canonical order).
        u: Vertex,
        /// Upper endpoint (canonical order).
        v: Vertex,
    },
    /// An edge references a vertex that was not declared.
    #[error("Edge ({u}, {v}) references undeclared vertex {vertex}")]
    UndeclaredEndpoint {
        /// Lower endpoint (canonical order).
        u: Vertex,
        /// Upper endpoint (canonical order).
        v: Vertex,
        /// The endpoint missing from the vertex list.
        vertex: Vertex,
    },
    /// A vertex weight is NaN or infinite.
    #[error("Vertex {vertex} has non-finite weight {weight}")]
    NonFiniteVertexWeight {
        /// The offending vertex label.
        vertex: Vertex,
        /// Debug rendering of the rejected weight.
        weight: String,
    },
    /// An edge weight is NaN or infinite.
    #[error("Edge ({u}, {v}) has non-finite weight {weight}")]
    NonFiniteEdgeWeight {
        /// Lower endpoint (canonical order).
        u: Vertex,
        /// Upper endpoint (canonical order).
        v: Vertex,
        /// Debug rendering of the rejected weight.
        weight: String,
    },
    /// An edge weight is below one of its endpoint weights, which would
    /// violate filtration monotonicity in the tree.
    #[error(
        "Edge ({u}, {v}) has weight {edge_weight}, below endpoint weight {vertex_weight} of vertex {vertex}"
    )]
    EdgeBelowEndpoint {
        /// Lower endpoint (canonical order).
        u: Vertex,
        /// Upper endpoint (canonical order).
        v: Vertex,
        /// The endpoint whose weight exceeds the edge weight.
        vertex: Vertex,
        /// Debug rendering of the edge weight.
        edge_weight: String,
        /// Debug rendering of the endpoint weight.
        vertex_weight: String,
    },
}

/// A validated, weighted 1-skeleton: vertex weights plus undirected weighted
/// edges, with every edge stored in canonical `(u, v)` order with `u < v`.
///
/// # Examples
///
/// ```rust
/// use simplex_tree::prelude::*;
///
/// // A triangle with vertex weight 0 and unit edge weights.
/// let graph = Graph::from_edges([(0, 1, 1.0), (0, 2, 1.0), (1, 2, 1.0)]).unwrap();
/// assert_eq!(graph.num_vertices(), 3);
/// assert_eq!(graph.num_edges(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Graph<T: FiltrationValue> {
    vertices: Vec<(Vertex, T)>,
    edges: Vec<(Vertex, Vertex, T)>,
}

impl<T: FiltrationValue> Graph<T> {
    /// Validates and canonicalizes a weighted 1-skeleton.
    ///
    /// Edges may be given in either endpoint order; they are stored with
    /// `u < v`. Vertices and edges are sorted by label.
    ///
    /// # Errors
    ///
    /// Returns a [`GraphError`] for duplicate vertices, self-loops,
    /// duplicate or dangling edges, non-finite weights, or an edge weight
    /// below an endpoint weight.
    pub fn new(
        vertices: Vec<(Vertex, T)>,
        edges: Vec<(Vertex, Vertex, T)>,
    ) -> Result<Self, GraphError> {
        let mut weight_of: FastHashMap<Vertex, T> = FastHashMap::default();
        for &(vertex, weight) in &vertices {
            if !weight.is_finite() {
                return Err(GraphError::NonFiniteVertexWeight {
                    vertex,
                    weight: format!("{weight:?}"),
                });
            }
            if weight_of.insert(vertex, weight).is_some() {
                return Err(GraphError::DuplicateVertex { vertex });
            }
        }

        let mut canonical: Vec<(Vertex, Vertex, T)> = Vec::with_capacity(edges.len());
        let mut seen: FastHashSet<(Vertex, Vertex)> = FastHashSet::default();
        for &(a, b, weight) in &edges {
            if a == b {
                return Err(GraphError::SelfLoop { vertex: a });
            }
            let (u, v) = if a < b { (a, b) } else { (b, a) };
            if !weight.is_finite() {
                return Err(GraphError::NonFiniteEdgeWeight {
                    u,
                    v,
                    weight: format!("{weight:?}"),
                });
            }
            if !seen.insert((u, v)) {
                return Err(GraphError::DuplicateEdge { u, v });
            }
            for endpoint in [u, v] {
                match weight_of.get(&endpoint) {
                    None => {
                        return Err(GraphError::UndeclaredEndpoint {
                            u,
                            v,
                            vertex: endpoint,
                        });
                    }
                    Some(&vertex_weight) if weight < vertex_weight => {
                        return Err(GraphError::EdgeBelowEndpoint {
                            u,
                            v,
                            vertex: endpoint,
                            edge_weight: format!("{weight:?}"),
                            vertex_weight: format!("{vertex_weight:?}"),
                        });
                    }
                    Some(_) => {}
                }
            }
            canonical.push((u, v, weight));
        }

        let mut vertices = vertices;
        vertices.sort_unstable_by_key(|&(vertex, _)| vertex);
        canonical.sort_unstable_by_key(|&(u, v, _)| (u, v));

        Ok(Self {
            vertices,
            edges: canonical,
        })
    }

    /// Builds a graph from edges alone; every endpoint becomes a vertex
    /// with weight zero.
    ///
    /// This is the common shape of a Vietoris–Rips 1-skeleton, where vertex
    /// filtrations are zero and edge weights are pairwise distances.
    ///
    /// # Errors
    ///
    /// Same validation as [`Graph::new`].
    pub fn from_edges<I>(edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (Vertex, Vertex, T)>,
    {
        let edges: Vec<(Vertex, Vertex, T)> = edges.into_iter().collect();
        let mut labels: FastHashSet<Vertex> = FastHashSet::default();
        for &(a, b, _) in &edges {
            labels.insert(a);
            labels.insert(b);
        }
        let vertices = labels.into_iter().map(|v| (v, T::zero())).collect();
        Self::new(vertices, edges)
    }

    /// Vertex labels with their weights, sorted by label.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[(Vertex, T)] {
        &self.vertices
    }

    /// Canonicalized edges `(u, v, weight)` with `u < v`, sorted.
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[(Vertex, Vertex, T)] {
        &self.edges
    }

    /// Number of declared vertices.
    #[inline]
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of undirected edges.
    #[inline]
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
}
