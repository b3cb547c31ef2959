//! Mention value type.
//!
//! A mention is a candidate referring/referred expression rooted at one
//! head token, optionally extended with its coordinated siblings
//! ("Richard et Christine" as one plural mention). Mentions are created
//! transiently per comparison; deduplication is the chain-builder's
//! business, not the analyzer's.

use serde::{Deserialize, Serialize};

/// A candidate mention: one root token plus optional coordinated siblings.
///
/// # Invariants
///
/// - `token_indexes` is non-empty, sorted and duplicate-free
/// - `root_index` is always a member of `token_indexes`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mention {
    /// Head token position.
    pub root_index: usize,
    /// Root plus any included coordinated siblings, sorted by position.
    pub token_indexes: Vec<usize>,
}

impl Mention {
    /// Mention covering only the root token.
    #[must_use]
    pub fn single(root_index: usize) -> Self {
        Self {
            root_index,
            token_indexes: vec![root_index],
        }
    }

    /// Mention covering the root and its coordinated siblings.
    ///
    /// Siblings equal to the root are ignored; the result is sorted.
    #[must_use]
    pub fn with_siblings(root_index: usize, siblings: &[usize]) -> Self {
        let mut token_indexes = vec![root_index];
        token_indexes.extend(siblings.iter().copied().filter(|&s| s != root_index));
        token_indexes.sort_unstable();
        token_indexes.dedup();
        Self {
            root_index,
            token_indexes,
        }
    }

    /// True if the mention spans more than its root.
    #[must_use]
    pub fn is_coordinated(&self) -> bool {
        self.token_indexes.len() > 1
    }

    /// Membership test on the covered head positions.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.token_indexes.binary_search(&index).is_ok()
    }

    /// Number of covered head positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.token_indexes.len()
    }

    /// Always false: a mention covers at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.token_indexes.is_empty()
    }

    /// Last covered position (the rightmost conjunct).
    #[must_use]
    pub fn last_index(&self) -> usize {
        *self.token_indexes.last().unwrap_or(&self.root_index)
    }
}

impl std::fmt::Display for Mention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_coordinated() {
            let joined: Vec<String> = self.token_indexes.iter().map(ToString::to_string).collect();
            write!(f, "[{}]({})", joined.join("; "), self.root_index)
        } else {
            write!(f, "({})", self.root_index)
        }
    }
}
