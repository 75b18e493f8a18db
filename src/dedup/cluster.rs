//! Batch-level clustering deduplication.
//!
//! Wires the pipeline together: TF-IDF vectors, top-K neighbor edges,
//! union-find clusters and per-cluster representative selection. The pass is
//! pure and synchronous; independent batches can run on separate threads.

use std::collections::BTreeMap;

use tracing::{debug, info};

use super::config::DedupConfig;
use super::neighbors::find_neighbors;
use super::representatives::select_representatives;
use super::tfidf::build_tfidf_vectors;
use super::union_find::cluster_by_union_find;
use crate::news::NewsItem;
use crate::TARGET_DEDUP;

/// Diagnostic counts for one clustering run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupStats {
    pub input: usize,
    pub output: usize,
    pub clusters: usize,
    pub singleton_clusters: usize,
    pub multi_clusters: usize,
    pub dropped: usize,
    /// Cluster size -> number of clusters of that size.
    pub cluster_sizes: BTreeMap<usize, usize>,
    pub largest_cluster: usize,
}

impl DedupStats {
    fn from_clusters(clusters: &[Vec<usize>], input: usize, output: usize) -> Self {
        let mut cluster_sizes: BTreeMap<usize, usize> = BTreeMap::new();
        for cluster in clusters {
            *cluster_sizes.entry(cluster.len()).or_insert(0) += 1;
        }
        let singleton_clusters = cluster_sizes.get(&1).copied().unwrap_or(0);

        Self {
            input,
            output,
            clusters: clusters.len(),
            singleton_clusters,
            multi_clusters: clusters.len() - singleton_clusters,
            dropped: input - output,
            largest_cluster: cluster_sizes.keys().next_back().copied().unwrap_or(0),
            cluster_sizes,
        }
    }
}

/// Kept and dropped articles of one run, plus its diagnostics.
#[derive(Debug, Clone, Default)]
pub struct ClusterDedupOutcome {
    /// Kept articles, grouped by cluster in order of each cluster's first member.
    pub representatives: Vec<NewsItem>,
    pub dropped: Vec<NewsItem>,
    pub stats: DedupStats,
}

/// Group a batch into clusters of near-duplicates, as indices into `items`.
///
/// Every index appears in exactly one cluster. Batches of fewer than two
/// items are returned as singletons without vectorizing.
pub fn find_clusters(items: &[NewsItem], config: &DedupConfig) -> Vec<Vec<usize>> {
    if items.len() <= 1 {
        return (0..items.len()).map(|i| vec![i]).collect();
    }

    let docs = build_tfidf_vectors(items, config.ngram_min, config.ngram_max);
    let pairs = find_neighbors(&docs, config.top_k.max(1), config.neighbor_search);
    let clusters = cluster_by_union_find(items.len(), &pairs, config.threshold);

    debug!(
        target: TARGET_DEDUP,
        "{} candidate edges at threshold {:.2} gave {} clusters",
        pairs.len(),
        config.threshold,
        clusters.len()
    );

    clusters
}

/// Cluster `items` and keep at most `max_per_cluster` articles per cluster.
///
/// Output never exceeds the input and contains only input articles, unmodified.
pub fn cluster_dedup(items: Vec<NewsItem>, config: &DedupConfig) -> ClusterDedupOutcome {
    let input = items.len();
    let max_per_cluster = config.max_per_cluster.max(1);
    let clusters = find_clusters(&items, config);

    let mut kept_indices: Vec<usize> = Vec::with_capacity(input);
    let mut dropped_indices: Vec<usize> = Vec::new();
    for cluster in &clusters {
        if cluster.len() == 1 {
            kept_indices.push(cluster[0]);
            continue;
        }
        let selection = select_representatives(cluster, &items, max_per_cluster);
        kept_indices.extend(selection.representatives);
        dropped_indices.extend(selection.dropped);
    }

    // Every index occurs exactly once across kept and dropped, so each take
    // moves a distinct item out.
    let mut slots: Vec<Option<NewsItem>> = items.into_iter().map(Some).collect();
    let representatives: Vec<NewsItem> = kept_indices
        .iter()
        .filter_map(|&idx| slots[idx].take())
        .collect();
    let dropped: Vec<NewsItem> = dropped_indices
        .iter()
        .filter_map(|&idx| slots[idx].take())
        .collect();

    let stats = DedupStats::from_clusters(&clusters, input, representatives.len());
    info!(
        target: TARGET_DEDUP,
        "Cluster dedup: {} -> {} (clusters: {}, singletons: {}, multi: {}, dropped: {}, largest: {}, sizes: {:?})",
        stats.input,
        stats.output,
        stats.clusters,
        stats.singleton_clusters,
        stats.multi_clusters,
        stats.dropped,
        stats.largest_cluster,
        stats.cluster_sizes
    );

    ClusterDedupOutcome {
        representatives,
        dropped,
        stats,
    }
}

/// Convenience wrapper over [`cluster_dedup`] returning only kept articles.
pub fn deduplicate_with_clustering(items: Vec<NewsItem>, config: &DedupConfig) -> Vec<NewsItem> {
    cluster_dedup(items, config).representatives
}
