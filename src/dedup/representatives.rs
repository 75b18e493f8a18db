//! Choosing which members of a duplicate cluster survive.

use std::collections::HashSet;

use crate::news::NewsItem;

/// Trust score for articles from publishers not in [`TRUSTED_SOURCES`].
pub const DEFAULT_TRUST_SCORE: u32 = 1;

/// Established outlets, keyed by domain or name. Named outlets should survive
/// deduplication ahead of syndicated copies.
pub const TRUSTED_SOURCES: &[(&str, u32)] = &[
    ("yonhapnews", 10),
    ("yna.co.kr", 10),
    ("연합뉴스", 10),
    ("hankyung.com", 9),
    ("한국경제", 9),
    ("한경", 9),
    ("mk.co.kr", 9),
    ("매일경제", 9),
    ("매경", 9),
    ("sedaily.com", 8),
    ("서울경제", 8),
    ("chosun.com", 8),
    ("조선일보", 8),
    ("donga.com", 8),
    ("동아일보", 8),
    ("joongang.co.kr", 8),
    ("중앙일보", 8),
    ("mt.co.kr", 7),
    ("머니투데이", 7),
    ("biz.chosun.com", 7),
    ("조선비즈", 7),
    ("etnews.com", 7),
    ("전자신문", 7),
];

const TRUST_WEIGHT: f64 = 3.0;
const DESCRIPTION_CHARS_PER_POINT: f64 = 50.0;
const MAX_INFORMATION_SCORE: f64 = 5.0;
const DATED_BONUS: f64 = 2.0;

/// Result of representative selection, as indices into the batch.
///
/// `representatives` is in selection order; `dropped` keeps cluster order.
/// Together they partition the cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterSelection {
    pub representatives: Vec<usize>,
    pub dropped: Vec<usize>,
}

/// Look up the trust score by publisher name or link.
///
/// The first table entry contained in either the lowercased publisher or the
/// lowercased link wins.
pub fn publisher_trust_score(item: &NewsItem) -> u32 {
    let publisher = item.publisher.as_deref().unwrap_or_default().to_lowercase();
    let link = item.link.to_lowercase();

    TRUSTED_SOURCES
        .iter()
        .find(|(source, _)| {
            (!publisher.is_empty() && publisher.contains(source)) || link.contains(source)
        })
        .map(|(_, score)| *score)
        .unwrap_or(DEFAULT_TRUST_SCORE)
}

/// `3 × trust + min(description chars / 50, 5) + (2 if dated)`.
pub fn representative_score(item: &NewsItem) -> f64 {
    let trust = publisher_trust_score(item) as f64 * TRUST_WEIGHT;
    let information = (item.description.chars().count() as f64 / DESCRIPTION_CHARS_PER_POINT)
        .min(MAX_INFORMATION_SCORE);
    let dated = if item.pub_date.is_some() { DATED_BONUS } else { 0.0 };
    trust + information + dated
}

/// Key used for publisher diversity; articles without one share "unknown".
fn publisher_key(item: &NewsItem) -> String {
    item.publisher_or_lookup()
        .map(|p| p.to_lowercase())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Pick up to `max_count` members of `cluster` to keep.
///
/// Small clusters are kept whole. Otherwise members are ranked by
/// [`representative_score`]; the best is always kept, then publishers not yet
/// represented are preferred over higher-scored repeats, and any slots still
/// open are filled from the remaining ranking regardless of publisher.
pub fn select_representatives(
    cluster: &[usize],
    items: &[NewsItem],
    max_count: usize,
) -> ClusterSelection {
    if cluster.len() <= max_count {
        return ClusterSelection {
            representatives: cluster.to_vec(),
            dropped: Vec::new(),
        };
    }

    let mut ranked: Vec<(usize, f64)> = cluster
        .iter()
        .map(|&idx| (idx, representative_score(&items[idx])))
        .collect();
    // Stable: equal scores keep cluster order
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut selected: Vec<usize> = Vec::with_capacity(max_count);
    let mut used_publishers: HashSet<String> = HashSet::new();

    for &(idx, _) in &ranked {
        if selected.len() >= max_count {
            break;
        }
        let publisher = publisher_key(&items[idx]);
        if selected.is_empty() || !used_publishers.contains(&publisher) {
            used_publishers.insert(publisher);
            selected.push(idx);
        }
    }

    for &(idx, _) in &ranked {
        if selected.len() >= max_count {
            break;
        }
        if !selected.contains(&idx) {
            selected.push(idx);
        }
    }

    let kept: HashSet<usize> = selected.iter().copied().collect();
    ClusterSelection {
        dropped: cluster.iter().copied().filter(|idx| !kept.contains(idx)).collect(),
        representatives: selected,
    }
}
