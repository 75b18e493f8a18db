//! Relevance filters applied between exact deduplication and clustering.
//!
//! Articles flow through three tiers, each annotating or dropping them:
//! industry keywords, company mentions, then advertising and off-topic noise.
//! All tables come from a [`FilterConfig`].

mod company;
mod config;
mod keyword;
mod noise;

use anyhow::Result;
use tracing::info;

pub use company::{CompanyFilter, CompanyMention, SPORTS_CONTEXT_MIN_HITS};
pub use config::{
    CompanyEntry, FilterConfig, IndustryKeywords, DEFAULT_BUSINESS_KEYWORDS,
    DEFAULT_EXCLUSION_CONTEXTS, DEFAULT_EXCLUSION_PATTERNS, DEFAULT_INDUSTRY_KEYWORDS,
};
pub use keyword::{KeywordFilter, GLOBAL_INDUSTRY};
pub use noise::{NoiseFilter, NoiseVerdict};

use crate::news::NewsItem;
use crate::TARGET_FILTER;

/// The three filter tiers, built once per run.
#[derive(Debug, Clone)]
pub struct RelevancePipeline {
    keyword: KeywordFilter,
    company: CompanyFilter,
    noise: NoiseFilter,
}

impl RelevancePipeline {
    pub fn from_config(config: &FilterConfig) -> Result<Self> {
        Ok(Self {
            keyword: KeywordFilter::new(&config.industries),
            company: CompanyFilter::new(
                &config.companies,
                &config.exclusion_contexts,
                config.require_company,
            ),
            noise: NoiseFilter::new(&config.exclusion_patterns, &config.business_keywords)?,
        })
    }

    /// Keyword, then company, then noise filtering.
    pub fn apply(&self, items: Vec<NewsItem>) -> Vec<NewsItem> {
        let before = items.len();
        let items = self.keyword.apply(items);
        let items = self.company.apply(items);
        let items = self.noise.apply(items);

        info!(
            target: TARGET_FILTER,
            "Relevance filters: {} -> {}",
            before,
            items.len()
        );
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_order() {
        let pipeline = RelevancePipeline::from_config(&FilterConfig::default()).unwrap();
        let items = vec![
            // Keyword and company, kept
            NewsItem::new("한화오션, LNG운반선 2척 수주", "총 5천억원 규모"),
            // No industry keyword
            NewsItem::new("주말 나들이 명소 소개", ""),
            // Industry keyword, but advertising
            NewsItem::new("[광고] 최신 냉장고 특가 행사", ""),
            // Global articles skip the keyword and business checks
            NewsItem::new("Tesla recalls Cybertruck", "").with_global(true),
        ];

        let kept = pipeline.apply(items);
        let titles: Vec<&str> = kept.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["한화오션, LNG운반선 2척 수주", "Tesla recalls Cybertruck"]);
        assert_eq!(kept[0].companies, vec!["한화오션"]);
        assert_eq!(kept[1].companies, vec!["Tesla"]);
    }
}
