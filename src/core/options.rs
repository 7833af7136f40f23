//! Construction-time configuration of auxiliary bookkeeping.
//!
//! Two orthogonal policy axes are fixed once, when the tree is created, and
//! never mutated afterwards. The core algorithms branch on the stored
//! options; there is no per-policy recompilation.

use serde::{Deserialize, Serialize};

/// Configuration selected at tree construction.
///
/// - `fast_cofaces` trades memory for query time: the tree maintains a
///   vertex-label index so coface enumeration starts from direct lookups
///   instead of a full subtree scan.
/// - `store_keys` (zigzag mode) attaches a monotonically-assigned insertion
///   key to every simplex, so zigzag-persistence algorithms can recover
///   relative insertion order independent of filtration values.
///
/// # Examples
///
/// ```rust
/// use simplex_tree::prelude::*;
///
/// let st: SimplexTree<f64> = SimplexTree::new(SimplexTreeOptions::ZIGZAG);
/// assert!(st.options().store_keys);
/// assert!(!st.options().fast_cofaces);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimplexTreeOptions {
    /// Maintain the vertex-label index for fast coface queries.
    pub fast_cofaces: bool,
    /// Attach insertion keys for zigzag persistence.
    pub store_keys: bool,
}

impl SimplexTreeOptions {
    /// No auxiliary bookkeeping; smallest memory footprint.
    pub const DEFAULT: Self = Self {
        fast_cofaces: false,
        store_keys: false,
    };

    /// Fast coface queries via the vertex-label index.
    pub const FAST_COFACES: Self = Self {
        fast_cofaces: true,
        store_keys: false,
    };

    /// Zigzag persistence support: insertion keys on every simplex.
    ///
    /// Combine with `fast_cofaces: true` when the zigzag algorithm also
    /// performs repeated coface queries.
    pub const ZIGZAG: Self = Self {
        fast_cofaces: false,
        store_keys: true,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_disables_all_bookkeeping() {
        let options = SimplexTreeOptions::default();
        assert!(!options.fast_cofaces);
        assert!(!options.store_keys);
        assert_eq!(options, SimplexTreeOptions::DEFAULT);
    }

    #[test]
    fn presets_are_orthogonal() {
        assert!(SimplexTreeOptions::FAST_COFACES.fast_cofaces);
        assert!(!SimplexTreeOptions::FAST_COFACES.store_keys);
        assert!(SimplexTreeOptions::ZIGZAG.store_keys);
    }

    #[test]
    fn options_round_trip_through_serde() {
        let options = SimplexTreeOptions {
            fast_cofaces: true,
            store_keys: true,
        };
        let json = serde_json::to_string(&options).unwrap();
        let back: SimplexTreeOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(options, back);
    }
}
