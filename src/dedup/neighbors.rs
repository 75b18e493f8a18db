//! Top-K candidate edges between documents.
//!
//! Restricting every document to its K most similar neighbors bounds the
//! edge list handed to clustering at O(N·K). A true duplicate pair can still
//! be missed if both documents already have K closer neighbors; K is a
//! tunable, not a recall guarantee.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::tfidf::{cosine_from_parts, dot, DocumentVector, SparseVector, TermId};
use crate::TARGET_DEDUP;

/// Candidate edge between two document indices, `i < j`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborPair {
    pub i: usize,
    pub j: usize,
    pub similarity: f64,
}

/// How candidate neighbors are generated before top-K truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborSearch {
    /// Score every pair of documents.
    #[default]
    Exhaustive,
    /// Score only pairs that share at least one weighted n-gram.
    Indexed,
}

impl fmt::Display for NeighborSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NeighborSearch::Exhaustive => write!(f, "exhaustive"),
            NeighborSearch::Indexed => write!(f, "indexed"),
        }
    }
}

impl FromStr for NeighborSearch {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exhaustive" | "full" => Ok(NeighborSearch::Exhaustive),
            "indexed" | "inverted" | "inverted-index" => Ok(NeighborSearch::Indexed),
            other => Err(anyhow::anyhow!("Unknown neighbor search strategy: {}", other)),
        }
    }
}

/// Find candidate edges with the given strategy.
pub fn find_neighbors(
    docs: &[DocumentVector<'_>],
    top_k: usize,
    strategy: NeighborSearch,
) -> Vec<NeighborPair> {
    let vectors: Vec<&SparseVector> = docs.iter().map(|d| &d.tfidf).collect();
    let pairs = match strategy {
        NeighborSearch::Exhaustive => find_top_k_neighbors(&vectors, top_k),
        NeighborSearch::Indexed => find_top_k_neighbors_indexed(&vectors, top_k),
    };

    debug!(
        target: TARGET_DEDUP,
        "Neighbor search ({}, K={}) produced {} candidate edges for {} documents",
        strategy,
        top_k,
        pairs.len(),
        docs.len()
    );

    pairs
}

/// Compare every document with every other one and keep each document's
/// `top_k` most similar neighbors.
///
/// A pair retained from either side is emitted once, as `(min, max)`.
pub fn find_top_k_neighbors(vectors: &[&SparseVector], top_k: usize) -> Vec<NeighborPair> {
    let norms: Vec<f64> = vectors.iter().map(|v| v.norm()).collect();
    let mut collector = EdgeCollector::default();

    for i in 0..vectors.len() {
        let mut similarities: Vec<(usize, f64)> = (0..vectors.len())
            .filter(|&j| j != i)
            .map(|j| {
                let sim = cosine_from_parts(dot(vectors[i], vectors[j]), norms[i], norms[j]);
                (j, sim)
            })
            .collect();

        retain_top_k(&mut similarities, top_k);
        collector.extend(i, &similarities);
    }

    collector.into_pairs()
}

/// Same top-K semantics as [`find_top_k_neighbors`] for every pair with
/// positive similarity, but only pairs sharing a weighted n-gram are scored.
///
/// Pairs with no shared n-gram have similarity 0 and can never reach a
/// clustering threshold, so skipping them loses no merges.
pub fn find_top_k_neighbors_indexed(
    vectors: &[&SparseVector],
    top_k: usize,
) -> Vec<NeighborPair> {
    let norms: Vec<f64> = vectors.iter().map(|v| v.norm()).collect();

    let mut postings: HashMap<TermId, Vec<(usize, f64)>> = HashMap::new();
    for (doc, vector) in vectors.iter().enumerate() {
        for &(term, weight) in vector.entries() {
            postings.entry(term).or_default().push((doc, weight));
        }
    }

    let mut accumulator = vec![0.0_f64; vectors.len()];
    let mut visited = vec![false; vectors.len()];
    let mut touched: Vec<usize> = Vec::new();
    let mut collector = EdgeCollector::default();

    for i in 0..vectors.len() {
        // Terms are visited in id order, the same order the merge-join uses,
        // so the accumulated dot products match the exhaustive search exactly.
        for &(term, weight) in vectors[i].entries() {
            if let Some(list) = postings.get(&term) {
                for &(j, other_weight) in list {
                    if j == i {
                        continue;
                    }
                    if !visited[j] {
                        visited[j] = true;
                        touched.push(j);
                    }
                    accumulator[j] += weight * other_weight;
                }
            }
        }

        let mut similarities: Vec<(usize, f64)> = touched
            .iter()
            .map(|&j| (j, cosine_from_parts(accumulator[j], norms[i], norms[j])))
            .filter(|(_, sim)| *sim > 0.0)
            .collect();

        for &j in &touched {
            accumulator[j] = 0.0;
            visited[j] = false;
        }
        touched.clear();

        retain_top_k(&mut similarities, top_k);
        collector.extend(i, &similarities);
    }

    collector.into_pairs()
}

/// Sort by similarity descending (ties by index ascending) and truncate.
fn retain_top_k(similarities: &mut Vec<(usize, f64)>, top_k: usize) {
    similarities.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    similarities.truncate(top_k);
}

#[derive(Default)]
struct EdgeCollector {
    seen: HashSet<(usize, usize)>,
    pairs: Vec<NeighborPair>,
}

impl EdgeCollector {
    fn extend(&mut self, i: usize, neighbors: &[(usize, f64)]) {
        for &(j, similarity) in neighbors {
            let key = (i.min(j), i.max(j));
            if self.seen.insert(key) {
                self.pairs.push(NeighborPair {
                    i: key.0,
                    j: key.1,
                    similarity,
                });
            }
        }
    }

    fn into_pairs(self) -> Vec<NeighborPair> {
        self.pairs
    }
}
