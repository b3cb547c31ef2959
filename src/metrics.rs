//! Coreference evaluation metrics.
//!
//! Scores a response chain set against a key (gold) chain set using the
//! standard shared-task metrics: MUC, B³, pairwise link F1 and BLANC.
//! Mentions are identified by their root index; before scoring, both
//! sides are restricted to the mentions they have in common, so mention
//! detection differences do not leak into the linking scores.

use crate::chains::Chain;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Precision/recall/F1 triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    /// Precision in `[0, 1]`.
    pub precision: f64,
    /// Recall in `[0, 1]`.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
}

impl Scores {
    /// Derive the triple from numerator/denominator pairs; empty
    /// denominators score zero rather than dividing by zero.
    #[must_use]
    pub fn new(p_num: f64, p_den: f64, r_num: f64, r_den: f64) -> Self {
        let precision = if p_den > 0.0 { p_num / p_den } else { 0.0 };
        let recall = if r_den > 0.0 { r_num / r_den } else { 0.0 };
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self {
            precision,
            recall,
            f1,
        }
    }
}

/// All metric results for one key/response comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// MUC link-based score.
    pub muc: Scores,
    /// B³ mention-based score.
    pub b_cubed: Scores,
    /// Pairwise coreference-link score.
    pub pairwise: Scores,
    /// BLANC (average of coreference and non-coreference link F1).
    pub blanc: Scores,
}

impl Evaluation {
    /// Score `response` chains against `key` chains.
    ///
    /// Fails if either side contains a duplicated mention.
    pub fn compute(key: &[Chain], response: &[Chain]) -> Result<Self> {
        let key_sets = chain_sets(key)?;
        let response_sets = chain_sets(response)?;
        let common: HashSet<usize> = key_sets
            .iter()
            .flatten()
            .copied()
            .filter(|m| response_sets.iter().any(|c| c.contains(m)))
            .collect();
        let key_sets = restrict(&key_sets, &common);
        let response_sets = restrict(&response_sets, &common);
        Ok(Self {
            muc: muc(&key_sets, &response_sets),
            b_cubed: b_cubed(&key_sets, &response_sets),
            pairwise: pairwise(&key_sets, &response_sets),
            blanc: blanc(&key_sets, &response_sets, &common),
        })
    }

    /// CoNLL-style average of MUC, B³ and pairwise F1.
    #[must_use]
    pub fn conll_f1(&self) -> f64 {
        (self.muc.f1 + self.b_cubed.f1 + self.pairwise.f1) / 3.0
    }
}

/// Chains as mention-root sets, rejecting duplicates across chains.
fn chain_sets(chains: &[Chain]) -> Result<Vec<HashSet<usize>>> {
    let mut seen = HashSet::new();
    let mut sets = Vec::with_capacity(chains.len());
    for chain in chains {
        let mut set = HashSet::new();
        for mention in &chain.mentions {
            if !seen.insert(mention.root_index) {
                return Err(Error::evaluation(format!(
                    "mention {} appears in more than one chain",
                    mention.root_index
                )));
            }
            set.insert(mention.root_index);
        }
        if !set.is_empty() {
            sets.push(set);
        }
    }
    Ok(sets)
}

fn restrict(sets: &[HashSet<usize>], common: &HashSet<usize>) -> Vec<HashSet<usize>> {
    sets.iter()
        .map(|s| s.intersection(common).copied().collect::<HashSet<usize>>())
        .filter(|s| !s.is_empty())
        .collect()
}

/// MUC: recall counts, per key chain, the links not recoverable from the
/// response partition of that chain; precision swaps the roles.
fn muc(key: &[HashSet<usize>], response: &[HashSet<usize>]) -> Scores {
    fn side(reference: &[HashSet<usize>], other: &[HashSet<usize>]) -> (f64, f64) {
        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for chain in reference {
            if chain.len() < 2 {
                continue;
            }
            let mut partitions = 0usize;
            let mut covered = 0usize;
            for other_chain in other {
                let overlap = chain.intersection(other_chain).count();
                if overlap > 0 {
                    partitions += 1;
                    covered += overlap;
                }
            }
            // Mentions absent from the other side each form their own
            // partition cell.
            partitions += chain.len() - covered;
            numerator += (chain.len() - partitions) as f64;
            denominator += (chain.len() - 1) as f64;
        }
        (numerator, denominator)
    }
    let (r_num, r_den) = side(key, response);
    let (p_num, p_den) = side(response, key);
    Scores::new(p_num, p_den, r_num, r_den)
}

/// B³: per-mention overlap mass between the chains containing it.
fn b_cubed(key: &[HashSet<usize>], response: &[HashSet<usize>]) -> Scores {
    fn side(reference: &[HashSet<usize>], other: &[HashSet<usize>]) -> (f64, f64) {
        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for chain in reference {
            denominator += chain.len() as f64;
            for other_chain in other {
                let overlap = chain.intersection(other_chain).count() as f64;
                if overlap > 0.0 {
                    numerator += overlap * overlap / chain.len() as f64;
                }
            }
        }
        (numerator, denominator)
    }
    let (r_num, r_den) = side(key, response);
    let (p_num, p_den) = side(response, key);
    Scores::new(p_num, p_den, r_num, r_den)
}

fn link_set(sets: &[HashSet<usize>]) -> HashSet<(usize, usize)> {
    let mut links = HashSet::new();
    for chain in sets {
        let mut members: Vec<usize> = chain.iter().copied().collect();
        members.sort_unstable();
        for (k, &a) in members.iter().enumerate() {
            for &b in &members[k + 1..] {
                links.insert((a, b));
            }
        }
    }
    links
}

/// Pairwise: precision/recall over the sets of coreference links.
fn pairwise(key: &[HashSet<usize>], response: &[HashSet<usize>]) -> Scores {
    let key_links = link_set(key);
    let response_links = link_set(response);
    let common = key_links.intersection(&response_links).count() as f64;
    Scores::new(
        common,
        response_links.len() as f64,
        common,
        key_links.len() as f64,
    )
}

/// BLANC: mean of the coreference-link F1 and the non-coreference-link F1
/// over all mention pairs. When one side has no links of a class, the
/// other class carries the whole score.
fn blanc(
    key: &[HashSet<usize>],
    response: &[HashSet<usize>],
    mentions: &HashSet<usize>,
) -> Scores {
    let key_links = link_set(key);
    let response_links = link_set(response);

    let mut ordered: Vec<usize> = mentions.iter().copied().collect();
    ordered.sort_unstable();

    // rc/wc: right and wrong coreference links; wn/rn: the same for
    // non-coreference links.
    let (mut rc, mut wc, mut wn, mut rn) = (0.0, 0.0, 0.0, 0.0);
    for (i, &a) in ordered.iter().enumerate() {
        for &b in &ordered[i + 1..] {
            match (key_links.contains(&(a, b)), response_links.contains(&(a, b))) {
                (true, true) => rc += 1.0,
                (false, true) => wc += 1.0,
                (true, false) => wn += 1.0,
                (false, false) => rn += 1.0,
            }
        }
    }

    let coref = Scores::new(rc, rc + wc, rc, rc + wn);
    let non = Scores::new(rn, rn + wn, rn, rn + wc);
    let no_coref_pairs = rc + wc + wn == 0.0;
    let no_non_pairs = rn + wn + wc == 0.0;
    if no_coref_pairs && no_non_pairs {
        return Scores::new(0.0, 0.0, 0.0, 0.0);
    }
    if no_coref_pairs {
        return non;
    }
    if no_non_pairs {
        return coref;
    }
    Scores {
        precision: (coref.precision + non.precision) / 2.0,
        recall: (coref.recall + non.recall) / 2.0,
        f1: (coref.f1 + non.f1) / 2.0,
    }
}
