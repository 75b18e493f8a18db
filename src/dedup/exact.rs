//! Cheap first-tier deduplication by normalized-title containment.
//!
//! Runs before the relevance filters so that obvious re-posts never reach the
//! more expensive clustering pass.

use std::cmp::Ordering;

use tracing::info;

use super::preprocess::preprocess_text;
use crate::news::NewsItem;
use crate::TARGET_DEDUP;

/// Remove items whose normalized title contains, or is contained in, the
/// normalized title of an item already kept.
///
/// When two items conflict the survivor is the domestic one over a global
/// one, then the newer one, then the one with the longer title; it takes the
/// slot of the first-seen member. Items whose title normalizes to nothing
/// never conflict with anything.
pub fn deduplicate_news(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let before = items.len();
    let mut kept: Vec<(String, NewsItem)> = Vec::with_capacity(items.len());

    for item in items {
        let title = preprocess_text(&item.title);
        if title.is_empty() {
            kept.push((title, item));
            continue;
        }

        let existing = kept.iter().position(|(seen, _)| {
            !seen.is_empty() && (title.contains(seen.as_str()) || seen.contains(title.as_str()))
        });

        match existing {
            Some(slot) => {
                let (seen_title, seen_item) = &kept[slot];
                if prefer(&item, &title, seen_item, seen_title) {
                    kept[slot] = (title, item);
                }
            }
            None => kept.push((title, item)),
        }
    }

    let unique: Vec<NewsItem> = kept.into_iter().map(|(_, item)| item).collect();
    let global = unique.iter().filter(|item| item.is_global).count();
    info!(
        target: TARGET_DEDUP,
        "Exact dedup: {} -> {} (domestic: {}, global: {})",
        before,
        unique.len(),
        unique.len() - global,
        global
    );

    unique
}

/// Whether `candidate` should replace `incumbent`.
fn prefer(
    candidate: &NewsItem,
    candidate_title: &str,
    incumbent: &NewsItem,
    incumbent_title: &str,
) -> bool {
    if candidate.is_global != incumbent.is_global {
        return !candidate.is_global;
    }

    match candidate.pub_date.cmp(&incumbent.pub_date) {
        // None sorts before Some, so a dated item beats an undated one
        Ordering::Greater => return true,
        Ordering::Less => return false,
        Ordering::Equal => {}
    }

    candidate_title.chars().count() > incumbent_title.chars().count()
}
