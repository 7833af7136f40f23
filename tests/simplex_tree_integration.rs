//! End-to-end scenarios exercising the full construction-then-query
//! lifecycle: graph insertion, flag expansion, and every traversal range,
//! on complexes large enough that the inline unit tests do not cover them.

use simplex_tree::prelude::*;

/// Ascending vertex word of a simplex.
fn word_of(st: &SimplexTree<f64>, key: SimplexKey) -> Vec<Vertex> {
    let mut word: Vec<Vertex> = st.simplex_vertex_range(key).unwrap().collect();
    word.reverse();
    word
}

/// Complete graph on `n` vertices with unit edge weights.
fn complete_graph(n: u32) -> Graph<f64> {
    let mut edges = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            edges.push((u, v, 1.0));
        }
    }
    Graph::from_edges(edges).unwrap()
}

fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    (1..=k).fold(1, |acc, i| acc * (n - k + i) / i)
}

#[test]
fn complete_graph_expansion_counts_match_binomials() {
    for n in 2..=6u32 {
        let mut st: SimplexTree = SimplexTree::default();
        st.insert_graph(&complete_graph(n)).unwrap();
        st.expansion(n as usize - 1).unwrap();

        // K_n expands to the full (n-1)-simplex: 2^n - 1 faces.
        assert_eq!(st.num_simplices(), (1 << n) - 1, "K_{n}");
        assert_eq!(st.dimension(), Some(n as usize - 1));

        // Per-dimension counts are binomial coefficients.
        let mut per_dim = vec![0usize; n as usize];
        for key in st.complex_simplex_range() {
            per_dim[st.dimension_of(key).unwrap()] += 1;
        }
        for (dim, &count) in per_dim.iter().enumerate() {
            assert_eq!(count, binomial(n as usize, dim + 1), "K_{n}, dim {dim}");
        }
    }
}

#[test]
fn two_triangles_sharing_an_edge() {
    // Vertices {0,1,2} and {1,2,3} each span a triangle; {0,3} is no edge.
    let graph = Graph::from_edges([
        (0, 1, 0.1),
        (0, 2, 0.2),
        (1, 2, 0.3),
        (1, 3, 0.4),
        (2, 3, 0.5),
    ])
    .unwrap();
    let mut st: SimplexTree = SimplexTree::default();
    st.insert_graph(&graph).unwrap();
    st.expansion(3).unwrap();

    // 4 vertices + 5 edges + 2 triangles, and no tetrahedron.
    assert_eq!(st.num_simplices(), 11);
    assert_eq!(st.dimension(), Some(2));
    assert!(st.find([0, 1, 2]).is_some());
    assert!(st.find([1, 2, 3]).is_some());
    assert!(st.find([0, 1, 2, 3]).is_none());

    // Flag filtration: each triangle carries the max over its edges.
    let left = st.find([0, 1, 2]).unwrap();
    let right = st.find([1, 2, 3]).unwrap();
    assert_eq!(st.filtration(left).unwrap(), 0.3);
    assert_eq!(st.filtration(right).unwrap(), 0.5);

    // The shared edge {1,2} has both triangles in its coboundary.
    let shared = st.find([1, 2]).unwrap();
    let mut cob: Vec<Vec<Vertex>> = st
        .coboundary_simplex_range(shared)
        .unwrap()
        .map(|k| word_of(&st, k))
        .collect();
    cob.sort();
    assert_eq!(cob, vec![vec![0, 1, 2], vec![1, 2, 3]]);
}

#[test]
fn filtration_order_is_a_valid_filtration_of_k5() {
    // Distinct edge weights so ties only occur between dimensions.
    let mut edges = Vec::new();
    let mut w = 0.0f64;
    for u in 0..5u32 {
        for v in (u + 1)..5 {
            w += 0.125;
            edges.push((u, v, w));
        }
    }
    let graph = Graph::from_edges(edges).unwrap();
    let mut st: SimplexTree = SimplexTree::default();
    st.insert_graph(&graph).unwrap();
    st.expansion(4).unwrap();
    assert_eq!(st.num_simplices(), 31);

    let order: Vec<SimplexKey> = st.filtration_simplex_range().collect();
    assert_eq!(order.len(), 31);

    let position: std::collections::HashMap<SimplexKey, usize> =
        order.iter().copied().enumerate().map(|(i, k)| (k, i)).collect();

    let mut previous = f64::NEG_INFINITY;
    for &key in &order {
        let value = st.filtration(key).unwrap();
        assert!(value >= previous);
        previous = value;

        // Every face (not just codimension 1) precedes the simplex.
        for face in st.boundary_simplex_range(key).unwrap() {
            assert!(position[&face] < position[&key]);
        }
    }

    // Indexed access agrees with iteration.
    let range = st.filtration_simplex_range();
    for (i, &key) in order.iter().enumerate() {
        assert_eq!(range.get(i), Some(key));
    }
    assert_eq!(range.get(order.len()), None);
}

#[test]
fn star_and_link_shaped_queries_on_k4() {
    for options in [SimplexTreeOptions::DEFAULT, SimplexTreeOptions::FAST_COFACES] {
        let mut st: SimplexTree = SimplexTree::new(options);
        st.insert_graph(&complete_graph(4)).unwrap();
        st.expansion(3).unwrap();

        // The star of a vertex in the full tetrahedron is everything
        // containing it: 2^3 = 8 simplices.
        let v0 = st.find([0]).unwrap();
        let star: Vec<SimplexKey> = st.cofaces_simplex_range(v0, 0).unwrap().collect();
        assert_eq!(star.len(), 8);
        for &key in &star {
            assert!(word_of(&st, key).contains(&0));
        }

        // Codimension-1 cofaces of an edge: the two triangles through it.
        let edge = st.find([1, 2]).unwrap();
        let mut cob: Vec<Vec<Vertex>> = st
            .coboundary_simplex_range(edge)
            .unwrap()
            .map(|k| word_of(&st, k))
            .collect();
        cob.sort();
        assert_eq!(cob, vec![vec![0, 1, 2], vec![1, 2, 3]]);

        // Codimension-2 coface of an edge: the tetrahedron itself.
        let cofaces2: Vec<Vec<Vertex>> = st
            .cofaces_simplex_range(edge, 2)
            .unwrap()
            .map(|k| word_of(&st, k))
            .collect();
        assert_eq!(cofaces2, vec![vec![0, 1, 2, 3]]);

        // Codimension past the top dimension yields nothing.
        assert_eq!(st.cofaces_simplex_range(edge, 3).unwrap().count(), 0);
    }
}

#[test]
fn boundary_order_supports_alternating_signs() {
    let mut st: SimplexTree = SimplexTree::default();
    st.insert_graph(&complete_graph(4)).unwrap();
    st.expansion(3).unwrap();

    // For the tetrahedron [0,1,2,3] the i-th boundary face omits the i-th
    // largest vertex, so the sequence of omitted vertices is 3, 2, 1, 0.
    let tet = st.find([0, 1, 2, 3]).unwrap();
    let faces: Vec<Vec<Vertex>> = st
        .boundary_simplex_range(tet)
        .unwrap()
        .map(|k| word_of(&st, k))
        .collect();
    assert_eq!(
        faces,
        vec![
            vec![0, 1, 2],
            vec![0, 1, 3],
            vec![0, 2, 3],
            vec![1, 2, 3],
        ]
    );

    // ∂∂ = 0 over Z/2: each codimension-2 face appears an even number of
    // times among the boundaries of the boundary.
    let mut multiplicity: std::collections::HashMap<SimplexKey, usize> =
        std::collections::HashMap::new();
    for face in st.boundary_simplex_range(tet).unwrap() {
        for sub in st.boundary_simplex_range(face).unwrap() {
            *multiplicity.entry(sub).or_default() += 1;
        }
    }
    assert!(multiplicity.values().all(|&m| m == 2));
}

#[test]
fn zigzag_tree_orders_ties_by_insertion_key() {
    let mut st: SimplexTree = SimplexTree::new(SimplexTreeOptions::ZIGZAG);
    st.insert_graph(&complete_graph(4)).unwrap();
    st.expansion(3).unwrap();

    // All 15 simplices exist and carry unique increasing keys.
    let mut keys: Vec<u64> = st
        .complex_simplex_range()
        .map(|k| st.insertion_key(k).unwrap().unwrap())
        .collect();
    keys.sort_unstable();
    assert_eq!(keys, (0..15).collect::<Vec<u64>>());

    // Everything here shares filtration value 0.0 (vertices) or 1.0
    // (the rest), so within each tie class the filtration order must be
    // sorted by dimension first and insertion key second.
    let order: Vec<SimplexKey> = st.filtration_simplex_range().collect();
    for pair in order.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let fa = st.filtration(a).unwrap();
        let fb = st.filtration(b).unwrap();
        if fa == fb {
            let da = st.dimension_of(a).unwrap();
            let db = st.dimension_of(b).unwrap();
            assert!(da <= db);
            if da == db {
                let ka = st.insertion_key(a).unwrap().unwrap();
                let kb = st.insertion_key(b).unwrap().unwrap();
                assert!(ka < kb);
            }
        }
    }
}

#[test]
fn manual_insertion_then_expansion_interop() {
    // Build the 1-skeleton by hand, then expand: the two construction
    // paths must produce a tree that answers queries identically.
    let mut manual: SimplexTree = SimplexTree::default();
    for v in 0..3 {
        manual.insert_simplex_and_subfaces([v], 0.0).unwrap();
    }
    manual.insert_simplex_and_subfaces([0, 1], 1.0).unwrap();
    manual.insert_simplex_and_subfaces([0, 2], 2.0).unwrap();
    manual.insert_simplex_and_subfaces([1, 2], 3.0).unwrap();
    manual.expansion(2).unwrap();

    let graph = Graph::from_edges([(0, 1, 1.0), (0, 2, 2.0), (1, 2, 3.0)]).unwrap();
    let mut from_graph: SimplexTree = SimplexTree::default();
    from_graph.insert_graph(&graph).unwrap();
    from_graph.expansion(2).unwrap();

    assert_eq!(manual.num_simplices(), from_graph.num_simplices());
    for key in manual.complex_simplex_range() {
        let word = word_of(&manual, key);
        let other = from_graph.find(word.iter().copied()).unwrap();
        assert_eq!(
            manual.filtration(key).unwrap(),
            from_graph.filtration(other).unwrap(),
            "filtration of {word:?}"
        );
    }
}

#[test]
fn vertex_range_and_accessors_agree_with_the_trie() {
    let mut st: SimplexTree = SimplexTree::new(SimplexTreeOptions::FAST_COFACES);
    st.insert_graph(&complete_graph(5)).unwrap();
    st.expansion(2).unwrap();

    let vertices: Vec<Vertex> = st.complex_vertex_range().collect();
    assert_eq!(vertices, vec![0, 1, 2, 3, 4]);

    for key in st.complex_simplex_range() {
        let word = word_of(&st, key);
        assert_eq!(st.vertex_of(key).unwrap(), *word.last().unwrap());
        assert_eq!(st.dimension_of(key).unwrap(), word.len() - 1);
        assert_eq!(st.find(word.iter().copied()), Some(key));
    }
}
