use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use tracing::{debug, info};

use crate::news::NewsItem;
use crate::TARGET_FILTER;

/// Why [`NoiseFilter`] rejected an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoiseVerdict {
    Keep,
    /// Matched an exclusion pattern (advertising, entertainment, sports...).
    Excluded(String),
    /// Domestic article with neither a business keyword nor a company mention.
    NoBusinessContent,
}

/// Last tier of the relevance filters: advertising and off-topic removal.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    patterns: Vec<Regex>,
    business_keywords: Vec<String>,
}

impl NoiseFilter {
    /// Compile the exclusion patterns; all of them match case-insensitively.
    pub fn new(patterns: &[String], business_keywords: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .with_context(|| format!("Invalid exclusion pattern {:?}", pattern))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            patterns,
            business_keywords: business_keywords
                .iter()
                .filter(|k| !k.is_empty())
                .map(|k| k.to_lowercase())
                .collect(),
        })
    }

    pub fn check(&self, item: &NewsItem) -> NoiseVerdict {
        let text = format!("{} {}", item.title, item.description);

        if let Some(pattern) = self.patterns.iter().find(|p| p.is_match(&text)) {
            return NoiseVerdict::Excluded(pattern.as_str().to_string());
        }

        if !item.is_global && item.companies.is_empty() {
            let lowered = text.to_lowercase();
            if !self.business_keywords.iter().any(|k| lowered.contains(k.as_str())) {
                return NoiseVerdict::NoBusinessContent;
            }
        }

        NoiseVerdict::Keep
    }

    pub fn apply(&self, items: Vec<NewsItem>) -> Vec<NewsItem> {
        let before = items.len();
        let mut excluded = 0;
        let mut no_business = 0;

        let kept: Vec<NewsItem> = items
            .into_iter()
            .filter(|item| match self.check(item) {
                NoiseVerdict::Keep => true,
                NoiseVerdict::Excluded(pattern) => {
                    debug!(target: TARGET_FILTER, "Excluded by {}: {}", pattern, item.title);
                    excluded += 1;
                    false
                }
                NoiseVerdict::NoBusinessContent => {
                    debug!(target: TARGET_FILTER, "No business content: {}", item.title);
                    no_business += 1;
                    false
                }
            })
            .collect();

        info!(
            target: TARGET_FILTER,
            "Noise filter: {} -> {} (excluded: {}, no business content: {})",
            before,
            kept.len(),
            excluded,
            no_business
        );

        kept
    }
}
