use std::time::Duration;

use serde::Serialize;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::backend::{complete_with_fallback, CompletionBackend, RetryPolicy};
use super::response::parse_score_response;
use super::rotation::ProviderRotation;
use crate::news::NewsItem;
use crate::prompts::{importance_prompt, screening_prompt};
use crate::TARGET_CLASSIFY;

/// Screening scores at or below this are dropped.
pub const SCREENING_CUTOFF: u8 = 4;
/// Importance scores at or above this are critical.
pub const CRITICAL_THRESHOLD: u8 = 7;
/// Score assumed when a model call or its answer fails.
pub const FALLBACK_SCORE: u8 = 5;
/// Descriptions shorter than this (in characters) are flagged for review.
pub const MIN_DESCRIPTION_CHARS: usize = 10;
pub const NEEDS_REVIEW_KEYWORD: &str = "needs-review";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Critical,
    Reference,
}

impl Tier {
    pub fn from_score(score: u8) -> Self {
        if score >= CRITICAL_THRESHOLD {
            Tier::Critical
        } else {
            Tier::Reference
        }
    }
}

/// An article with its importance rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedItem {
    #[serde(flatten)]
    pub item: NewsItem,
    pub score: u8,
    pub keywords: Vec<String>,
    pub tier: Tier,
}

/// Rate-limit pacing and retry behaviour for [`classify_items`].
#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    pub retry: RetryPolicy,
    /// Pause after each screening call.
    pub screening_pacing: Duration,
    /// Pause after each importance call.
    pub importance_pacing: Duration,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            screening_pacing: Duration::from_secs(1),
            importance_pacing: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClassificationOutcome {
    /// Sorted by score, highest first.
    pub critical: Vec<ClassifiedItem>,
    /// Sorted by score, highest first.
    pub reference: Vec<ClassifiedItem>,
    pub screened_out: Vec<NewsItem>,
}

/// Two-stage rating of deduplicated articles.
///
/// Screening drops articles scored 4 or lower; a failed screening call lets
/// the article through. Survivors are rated for importance and split into
/// critical (7+) and reference tiers; a failed rating files the article as
/// reference with score 5.
pub async fn classify_items<B>(
    backend: &B,
    rotation: &mut ProviderRotation,
    items: Vec<NewsItem>,
    options: &ClassifyOptions,
) -> ClassificationOutcome
where
    B: CompletionBackend + ?Sized,
{
    let total = items.len();
    let mut outcome = ClassificationOutcome::default();

    let mut passed: Vec<NewsItem> = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let prompt = screening_prompt(&item.title, &item.description);
        let score = match complete_with_fallback(backend, rotation, &prompt, &options.retry).await
        {
            Ok(text) => parse_score_response(&text).map(|r| r.score),
            Err(e) => {
                warn!(target: TARGET_CLASSIFY, "Screening failed for {:?}: {}", item.title, e);
                None
            }
        }
        .unwrap_or(FALLBACK_SCORE);

        if score > SCREENING_CUTOFF {
            passed.push(item);
        } else {
            debug!(target: TARGET_CLASSIFY, "Screened out ({}): {}", score, item.title);
            outcome.screened_out.push(item);
        }

        if (index + 1) % 30 == 0 {
            debug!(
                target: TARGET_CLASSIFY,
                "Screening {}/{} (passed: {}, dropped: {})",
                index + 1,
                total,
                passed.len(),
                outcome.screened_out.len()
            );
        }
        sleep(options.screening_pacing).await;
    }

    info!(
        target: TARGET_CLASSIFY,
        "Screening: {} -> {} ({} dropped)",
        total,
        passed.len(),
        outcome.screened_out.len()
    );

    let rated_total = passed.len();
    for (index, item) in passed.into_iter().enumerate() {
        let prompt = importance_prompt(&item.title, &item.description);
        let rating = match complete_with_fallback(backend, rotation, &prompt, &options.retry).await
        {
            Ok(text) => parse_score_response(&text),
            Err(e) => {
                warn!(target: TARGET_CLASSIFY, "Rating failed for {:?}: {}", item.title, e);
                None
            }
        };
        let (score, mut keywords) = rating
            .map(|r| (r.score, r.keywords))
            .unwrap_or((FALLBACK_SCORE, Vec::new()));

        if item.description.trim().chars().count() < MIN_DESCRIPTION_CHARS {
            keywords.push(NEEDS_REVIEW_KEYWORD.to_string());
        }

        let tier = Tier::from_score(score);
        let classified = ClassifiedItem {
            item,
            score,
            keywords,
            tier,
        };
        match tier {
            Tier::Critical => outcome.critical.push(classified),
            Tier::Reference => outcome.reference.push(classified),
        }

        if (index + 1) % 20 == 0 {
            debug!(
                target: TARGET_CLASSIFY,
                "Rating {}/{} (critical: {}, reference: {})",
                index + 1,
                rated_total,
                outcome.critical.len(),
                outcome.reference.len()
            );
        }
        sleep(options.importance_pacing).await;
    }

    // Stable, so equal scores keep batch order
    outcome.critical.sort_by(|a, b| b.score.cmp(&a.score));
    outcome.reference.sort_by(|a, b| b.score.cmp(&a.score));

    info!(
        target: TARGET_CLASSIFY,
        "Classification: {} in, {} critical, {} reference",
        total,
        outcome.critical.len(),
        outcome.reference.len()
    );

    outcome
}
