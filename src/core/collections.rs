//! Optimized collection aliases for combinatorial traversal.
//!
//! All internal maps and sets key on small integers or arena keys, so the
//! crate uses `rustc_hash`'s non-cryptographic hasher throughout, plus
//! stack-allocated buffers for the short vertex words that dominate
//! simplex-tree traversal.

use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use smallvec::SmallVec;

use super::node::{SimplexKey, Vertex};

/// Optimized `HashMap` for internal, non-adversarial keys.
///
/// Backed by `rustc_hash::FxHashMap`. Do not use with attacker-controlled
/// keys; all keys in this crate are vertex labels or arena keys.
pub type FastHashMap<K, V> = FxHashMap<K, V>;

/// Optimized `HashSet` counterpart of [`FastHashMap`].
pub type FastHashSet<T> = FxHashSet<T>;

/// Build hasher used by [`FastHashMap`] and [`FastHashSet`].
pub type FastBuildHasher = FxBuildHasher;

/// Small-optimized buffer with heap fallback.
///
/// Used for vertex words, boundary faces, and traversal frames, which stay
/// within the inline capacity for all practical complex dimensions.
pub type SmallBuffer<T, const N: usize> = SmallVec<[T; N]>;

/// Inline capacity for vertex-word buffers.
///
/// A word of length N describes an (N-1)-simplex; flag complexes built for
/// persistence rarely exceed dimension 7, so 8 keeps the common case on the
/// stack while still spilling gracefully for deeper trees.
pub const MAX_PRACTICAL_WORD_LEN: usize = 8;

/// A simplex's vertex word (its vertices in a fixed order).
pub type VertexWord = SmallBuffer<Vertex, MAX_PRACTICAL_WORD_LEN>;

/// Label index used by the fast-coface option: vertex label → every trie
/// node carrying that label.
pub type LabelIndexMap = FastHashMap<Vertex, Vec<SimplexKey>>;

/// Creates a [`FastHashMap`] with pre-allocated capacity.
#[inline]
#[must_use]
pub fn fast_hash_map_with_capacity<K, V>(capacity: usize) -> FastHashMap<K, V> {
    FastHashMap::with_capacity_and_hasher(capacity, FastBuildHasher::default())
}

/// Creates a [`FastHashSet`] with pre-allocated capacity.
#[inline]
#[must_use]
pub fn fast_hash_set_with_capacity<T>(capacity: usize) -> FastHashSet<T> {
    FastHashSet::with_capacity_and_hasher(capacity, FastBuildHasher::default())
}
