//! Near-duplicate detection for news batches.
//!
//! Two tiers run over each batch:
//!
//! 1. [`deduplicate_news`] drops re-posts whose normalized titles contain one
//!    another. It is cheap and runs before the relevance filters.
//! 2. [`cluster_dedup`] catches rewrites and wire copies: each article becomes
//!    a TF-IDF vector of character n-grams (robust to Korean compounds that
//!    lack word boundaries), each article is linked to its top-K most similar
//!    neighbors, linked pairs above the similarity threshold are merged
//!    transitively with union-find, and a few representatives per cluster are
//!    kept, favoring trusted publishers and publisher diversity.
//!
//! Both tiers are synchronous, allocation-local and infallible.

mod cluster;
mod config;
mod exact;
mod neighbors;
mod ngram;
mod preprocess;
mod representatives;
mod tfidf;
mod union_find;

#[cfg(test)]
mod tests;

pub use cluster::{
    cluster_dedup, deduplicate_with_clustering, find_clusters, ClusterDedupOutcome, DedupStats,
};
pub use config::{
    parse_ngram_range, parse_threshold, DedupConfig, ThresholdPreset, DEFAULT_MAX_PER_CLUSTER,
    DEFAULT_NGRAM_MAX, DEFAULT_NGRAM_MIN, DEFAULT_TOP_K,
};
pub use exact::deduplicate_news;
pub use neighbors::{
    find_neighbors, find_top_k_neighbors, find_top_k_neighbors_indexed, NeighborPair,
    NeighborSearch,
};
pub use ngram::{extract_char_ngrams, NgramCounts};
pub use preprocess::{comparison_text, preprocess_text, GLOBAL_MARKER};
pub use representatives::{
    publisher_trust_score, representative_score, select_representatives, ClusterSelection,
    DEFAULT_TRUST_SCORE, TRUSTED_SOURCES,
};
pub use tfidf::{build_tfidf_vectors, cosine_similarity, DocumentVector, SparseVector, TermId};
pub use union_find::{cluster_by_union_find, UnionFind};
