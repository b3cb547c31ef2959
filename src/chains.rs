//! Document-level chain construction.
//!
//! Runs the [`FrenchRules`] analyzer over every token pair worth
//! considering and assembles the accepted links into coreference chains
//! with a union-find pass. Resolution is greedy nearest-first: a
//! confident antecedent beats an uncertain one, a closer one beats a
//! farther one, and cataphora is only attempted when no backward
//! antecedent exists.

use crate::analyzer::{Compatibility, FrenchRules};
use crate::document::Document;
use crate::mention::Mention;
use serde::{Deserialize, Serialize};

/// Tunables for [`ChainBuilder`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Maximum backward distance, in sentences, when searching for an
    /// antecedent.
    pub max_sentence_distance: usize,
    /// Emit chains containing a single mention.
    pub include_singletons: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            max_sentence_distance: 5,
            include_singletons: false,
        }
    }
}

/// One coreference chain: mentions in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    /// Member mentions, sorted by root position.
    pub mentions: Vec<Mention>,
}

impl Chain {
    /// Root indexes of the member mentions.
    #[must_use]
    pub fn roots(&self) -> Vec<usize> {
        self.mentions.iter().map(|m| m.root_index).collect()
    }

    /// Number of mentions in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mentions.len()
    }

    /// True for an empty chain (never produced by the builder).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }
}

/// Greedy rule-driven chain builder.
#[derive(Debug, Clone, Default)]
pub struct ChainBuilder {
    config: BuilderConfig,
}

/// Internal candidate kind; anaphors and noun phrases resolve differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MentionKind {
    Noun,
    Anaphor,
}

impl ChainBuilder {
    /// Builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with explicit configuration.
    #[must_use]
    pub fn with_config(config: BuilderConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Build the coreference chains of a document.
    #[must_use]
    pub fn build(&self, doc: &Document) -> Vec<Chain> {
        let rules = FrenchRules::new(doc);

        // Mention inventory: coordinated noun groups are one mention rooted
        // at the leftmost conjunct; anaphors are always single tokens.
        let mut mentions: Vec<(Mention, MentionKind)> = Vec::new();
        for index in 0..doc.len() {
            if rules.is_potential_anaphor(index) {
                mentions.push((rules.mention(index, false), MentionKind::Anaphor));
            } else if rules.is_independent_noun(index)
                && rules.governing_sibling(index).is_none()
            {
                mentions.push((rules.mention(index, true), MentionKind::Noun));
            }
        }

        let mut union = UnionFind::new(mentions.len());

        // Anaphor resolution, left to right.
        for (pos, (mention, kind)) in mentions.iter().enumerate() {
            if *kind != MentionKind::Anaphor {
                continue;
            }
            let referring = mention.root_index;
            let mut best: Option<(Compatibility, usize)> = None;
            for (candidate_pos, (candidate, _)) in mentions.iter().enumerate().take(pos).rev()
            {
                if !self.within_distance(doc, candidate.root_index, referring) {
                    break;
                }
                let verdict = rules.anaphoric_pair(candidate, referring, true);
                if verdict == Compatibility::Compatible {
                    best = Some((verdict, candidate_pos));
                    break;
                }
                if verdict == Compatibility::Uncertain && best.is_none() {
                    best = Some((verdict, candidate_pos));
                }
            }
            // No backward antecedent: try cataphora within the sentence.
            if best.is_none() {
                for (candidate_pos, (candidate, candidate_kind)) in
                    mentions.iter().enumerate().skip(pos + 1)
                {
                    if *candidate_kind != MentionKind::Noun {
                        continue;
                    }
                    if !doc.same_sentence(referring, candidate.root_index) {
                        break;
                    }
                    if rules.cataphoric_pair(candidate, referring)
                        && rules
                            .anaphoric_pair(candidate, referring, true)
                            .is_possible()
                    {
                        best = Some((Compatibility::Compatible, candidate_pos));
                        break;
                    }
                }
            }
            if let Some((_, antecedent_pos)) = best {
                union.merge(antecedent_pos, pos);
            }
        }

        // Noun-noun coreference.
        for (later_pos, (later, later_kind)) in mentions.iter().enumerate() {
            if *later_kind != MentionKind::Noun {
                continue;
            }
            for (earlier_pos, (earlier, earlier_kind)) in
                mentions.iter().enumerate().take(later_pos)
            {
                if *earlier_kind != MentionKind::Noun {
                    continue;
                }
                if !self.within_distance(doc, earlier.root_index, later.root_index) {
                    continue;
                }
                let linked = earlier.token_indexes.iter().any(|&referred| {
                    rules.coreferring_noun_pair(referred, later.root_index)
                });
                if linked {
                    union.merge(earlier_pos, later_pos);
                }
            }
        }

        // Assemble chains in document order.
        let mut groups: Vec<Vec<usize>> = vec![Vec::new(); mentions.len()];
        for pos in 0..mentions.len() {
            groups[union.find(pos)].push(pos);
        }
        let mut chains: Vec<Chain> = groups
            .into_iter()
            .filter(|members| {
                members.len() > 1 || (self.config.include_singletons && !members.is_empty())
            })
            .map(|members| Chain {
                mentions: members
                    .into_iter()
                    .map(|pos| mentions[pos].0.clone())
                    .collect(),
            })
            .collect();
        chains.sort_by_key(|c| c.mentions[0].root_index);
        chains
    }

    fn within_distance(&self, doc: &Document, a: usize, b: usize) -> bool {
        let (sa, sb) = (doc.sentence_id(a), doc.sentence_id(b));
        sa.abs_diff(sb) <= self.config.max_sentence_distance
    }
}

/// Array-backed union-find with path compression.
#[derive(Debug)]
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge so the representative is the smaller index (earliest mention).
    fn merge(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        let (keep, fold) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[fold] = keep;
    }
}
