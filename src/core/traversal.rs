//! Iterator state machines over the trie.
//!
//! Every range is a lazy, finite sequence of [`SimplexKey`]s backed by an
//! explicit stack (or a pre-sorted buffer), never by call-stack recursion,
//! so deep complexes cannot overflow and each iterator's allocation is
//! bounded by the trie depth. None of the iterators mutate the tree;
//! disjoint read-only traversals of the same tree may run concurrently.

use ordered_float::OrderedFloat;

use super::collections::VertexWord;
use super::node::{FiltrationValue, SimplexKey, Vertex};
use super::simplex_tree::SimplexTree;

// =============================================================================
// DEPTH-FIRST COMPLEX TRAVERSAL
// =============================================================================

/// Depth-first pre-order traversal of every simplex in the complex.
///
/// Produced by [`SimplexTree::complex_simplex_range`]. Each simplex appears
/// exactly once; children are visited in increasing vertex order, so the
/// order is deterministic but unrelated to filtration values.
#[derive(Clone, Debug)]
pub struct ComplexSimplexIter<'a, T: FiltrationValue> {
    tree: &'a SimplexTree<T>,
    stack: Vec<SimplexKey>,
}

impl<'a, T: FiltrationValue> ComplexSimplexIter<'a, T> {
    pub(crate) fn new(tree: &'a SimplexTree<T>) -> Self {
        let stack = tree.roots().values().rev().copied().collect();
        Self { tree, stack }
    }
}

impl<T: FiltrationValue> Iterator for ComplexSimplexIter<'_, T> {
    type Item = SimplexKey;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.stack.pop()?;
        // Reverse push order keeps the smallest child on top of the stack.
        if let Ok(node) = self.tree.node(key) {
            self.stack.extend(node.children().values().rev().copied());
        }
        Some(key)
    }
}

// =============================================================================
// FILTRATION ORDER
// =============================================================================

/// All simplices sorted by non-decreasing filtration value.
///
/// Produced by [`SimplexTree::filtration_simplex_range`]. Ties are broken by
/// dimension (lower first, so faces precede their cofaces), then by zigzag
/// insertion key when present, then by the ascending vertex word; the order
/// is therefore total and deterministic.
#[derive(Clone, Debug)]
pub struct FiltrationSimplexIter {
    ordered: Vec<SimplexKey>,
    cursor: usize,
}

impl FiltrationSimplexIter {
    pub(crate) fn new<T: FiltrationValue>(tree: &SimplexTree<T>) -> Self {
        let mut entries: Vec<(OrderedFloat<T>, usize, Option<u64>, VertexWord, SimplexKey)> =
            Vec::with_capacity(tree.num_simplices());
        for (key, node) in tree.arena() {
            let word = tree.word_of(key).unwrap_or_default();
            entries.push((
                OrderedFloat(node.filtration()),
                word.len(),
                node.insertion_key(),
                word,
                key,
            ));
        }
        entries.sort_unstable_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| a.1.cmp(&b.1))
                .then_with(|| a.2.cmp(&b.2))
                .then_with(|| a.3.cmp(&b.3))
        });
        Self {
            ordered: entries.into_iter().map(|entry| entry.4).collect(),
            cursor: 0,
        }
    }

    /// The simplex at `index` in filtration order, or `None` past the end.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<SimplexKey> {
        self.ordered.get(index).copied()
    }
}

impl Iterator for FiltrationSimplexIter {
    type Item = SimplexKey;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.ordered.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ordered.len() - self.cursor;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FiltrationSimplexIter {}

// =============================================================================
// VERTEX PATH
// =============================================================================

/// The vertex path of one simplex, walked node → root.
///
/// Produced by [`SimplexTree::simplex_vertex_range`]. Vertices arrive in
/// decreasing order (last-inserted vertex first); reverse for the sorted
/// word.
#[derive(Clone, Debug)]
pub struct SimplexVertexIter<'a, T: FiltrationValue> {
    tree: &'a SimplexTree<T>,
    cursor: Option<SimplexKey>,
}

impl<'a, T: FiltrationValue> SimplexVertexIter<'a, T> {
    pub(crate) fn new(tree: &'a SimplexTree<T>, key: SimplexKey) -> Self {
        Self {
            tree,
            cursor: Some(key),
        }
    }
}

impl<T: FiltrationValue> Iterator for SimplexVertexIter<'_, T> {
    type Item = Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.node(self.cursor?).ok()?;
        self.cursor = node.parent();
        Some(node.vertex())
    }
}

// =============================================================================
// BOUNDARY
// =============================================================================

/// The codimension-1 faces of one simplex.
///
/// Produced by [`SimplexTree::boundary_simplex_range`]. The i-th face omits
/// the i-th largest vertex; the face omitting the smallest vertex comes
/// last. Downstream boundary-operator sign computation relies on this order
/// being fixed, so it is part of the API contract.
#[derive(Clone, Debug)]
pub struct BoundaryIter<'a, T: FiltrationValue> {
    tree: &'a SimplexTree<T>,
    word: VertexWord,
    remaining: usize,
}

impl<'a, T: FiltrationValue> BoundaryIter<'a, T> {
    pub(crate) fn new(tree: &'a SimplexTree<T>, word: VertexWord) -> Self {
        // A 0-simplex has an empty boundary (the empty simplex is virtual).
        let remaining = if word.len() == 1 { 0 } else { word.len() };
        Self {
            tree,
            word,
            remaining,
        }
    }
}

impl<T: FiltrationValue> Iterator for BoundaryIter<'_, T> {
    type Item = SimplexKey;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let omit = self.remaining - 1;
        self.remaining -= 1;

        let mut face: VertexWord = self.word.clone();
        face.remove(omit);
        let key = self.tree.find_sorted(&face);
        debug_assert!(key.is_some(), "complex is not closed under faces");
        key
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: FiltrationValue> ExactSizeIterator for BoundaryIter<'_, T> {}

// =============================================================================
// COFACES / STAR
// =============================================================================

/// The cofaces (star) of one simplex.
///
/// Produced by [`SimplexTree::cofaces_simplex_range`] and
/// [`SimplexTree::coboundary_simplex_range`]. With codimension 0 the star
/// includes the simplex itself. Enumeration order is unspecified and may
/// differ between the scanning and the label-indexed strategies.
#[derive(Clone, Debug)]
pub struct CofacesIter<'a, T: FiltrationValue> {
    tree: &'a SimplexTree<T>,
    word: VertexWord,
    /// Word length of the targeted cofaces; `None` means the whole star.
    target_depth: Option<usize>,
    mode: CofacesMode,
}

#[derive(Clone, Debug)]
enum CofacesMode {
    /// Pruned depth-first scan matching the vertex word as a subsequence.
    /// Frames carry (node, matched word prefix, depth).
    Scan { stack: Vec<(SimplexKey, usize, usize)> },
    /// Seeded from the vertex-label index (`fast_cofaces` option): every
    /// stack node is already known to be a coface. Frames carry
    /// (node, depth).
    Indexed { stack: Vec<(SimplexKey, usize)> },
}

impl<'a, T: FiltrationValue> CofacesIter<'a, T> {
    pub(crate) fn new(tree: &'a SimplexTree<T>, word: VertexWord, codim: usize) -> Self {
        let target_depth = (codim > 0).then(|| word.len() + codim);

        let mode = if tree.options().fast_cofaces {
            // Every node labeled with the simplex's largest vertex whose
            // root path contains the whole word is a coface, and so is its
            // entire subtree (descendant paths extend the ancestor path).
            let last = *word.last().unwrap_or(&0);
            let mut stack = Vec::new();
            for &candidate in tree.label_index(last) {
                if let Some(depth) = candidate_depth(tree, candidate, &word) {
                    if target_depth.map_or(true, |target| depth <= target) {
                        stack.push((candidate, depth));
                    }
                }
            }
            CofacesMode::Indexed { stack }
        } else {
            let stack = tree
                .roots()
                .values()
                .rev()
                .map(|&key| (key, 0, 1))
                .collect();
            CofacesMode::Scan { stack }
        };

        Self {
            tree,
            word,
            target_depth,
            mode,
        }
    }

    fn next_scan(&mut self) -> Option<SimplexKey> {
        let CofacesMode::Scan { stack } = &mut self.mode else {
            return None;
        };
        while let Some((key, matched, depth)) = stack.pop() {
            let node = self.tree.node(key).ok()?;
            let vertex = node.vertex();
            let matched = match self.word.get(matched) {
                Some(&needed) if vertex == needed => matched + 1,
                // Labels only grow deeper in the trie, so once the current
                // label passes the next needed vertex the branch is dead.
                Some(&needed) if vertex > needed => continue,
                _ => matched,
            };
            if self
                .target_depth
                .map_or(true, |target| depth + 1 <= target)
            {
                stack.extend(
                    node.children()
                        .values()
                        .rev()
                        .map(|&child| (child, matched, depth + 1)),
                );
            }
            let is_coface = matched == self.word.len();
            let depth_matches = self.target_depth.map_or(true, |target| depth == target);
            if is_coface && depth_matches {
                return Some(key);
            }
        }
        None
    }

    fn next_indexed(&mut self) -> Option<SimplexKey> {
        let CofacesMode::Indexed { stack } = &mut self.mode else {
            return None;
        };
        while let Some((key, depth)) = stack.pop() {
            let node = self.tree.node(key).ok()?;
            if self
                .target_depth
                .map_or(true, |target| depth + 1 <= target)
            {
                stack.extend(node.children().values().rev().map(|&child| (child, depth + 1)));
            }
            if self.target_depth.map_or(true, |target| depth == target) {
                return Some(key);
            }
        }
        None
    }
}

impl<T: FiltrationValue> Iterator for CofacesIter<'_, T> {
    type Item = SimplexKey;

    fn next(&mut self) -> Option<Self::Item> {
        match self.mode {
            CofacesMode::Scan { .. } => self.next_scan(),
            CofacesMode::Indexed { .. } => self.next_indexed(),
        }
    }
}

/// Walks `key`'s root path once, returning its depth when the path contains
/// every vertex of `word` (matched from the largest down, since labels
/// decrease while ascending).
fn candidate_depth<T: FiltrationValue>(
    tree: &SimplexTree<T>,
    key: SimplexKey,
    word: &[Vertex],
) -> Option<usize> {
    let mut unmatched = word.len();
    let mut cursor = Some(key);
    let mut depth = 0;
    while let Some(current) = cursor {
        let node = tree.node(current).ok()?;
        depth += 1;
        if unmatched > 0 {
            let needed = word[unmatched - 1];
            if node.vertex() == needed {
                unmatched -= 1;
            } else if node.vertex() < needed {
                // Ancestor labels only get smaller: `needed` cannot appear.
                return None;
            }
        }
        cursor = node.parent();
    }
    (unmatched == 0).then_some(depth)
}

// =============================================================================
// TESTS
// =============================================================================
