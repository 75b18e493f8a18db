use tracing::info;

use super::config::IndustryKeywords;
use crate::news::NewsItem;
use crate::TARGET_FILTER;

/// Industry for global articles collected without one.
pub const GLOBAL_INDUSTRY: &str = "Global";

/// First tier of the relevance filters: industry keyword matching.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    // (industry, [(keyword, lowercased keyword)])
    industries: Vec<(String, Vec<(String, String)>)>,
}

impl KeywordFilter {
    pub fn new(industries: &[IndustryKeywords]) -> Self {
        Self {
            industries: industries
                .iter()
                .map(|entry| {
                    let keywords = entry
                        .keywords
                        .iter()
                        .filter(|k| !k.trim().is_empty())
                        .map(|k| (k.clone(), k.to_lowercase()))
                        .collect();
                    (entry.industry.clone(), keywords)
                })
                .collect(),
        }
    }

    /// `(industry, keyword)` for every industry with a keyword in the title or
    /// description. Only the first matching keyword per industry is reported.
    pub fn match_industries(&self, item: &NewsItem) -> Vec<(String, String)> {
        let text = format!("{} {}", item.title, item.description).to_lowercase();

        self.industries
            .iter()
            .filter_map(|(industry, keywords)| {
                keywords
                    .iter()
                    .find(|(_, lowered)| text.contains(lowered.as_str()))
                    .map(|(keyword, _)| (industry.clone(), keyword.clone()))
            })
            .collect()
    }

    /// Keep domestic articles matching at least one industry and annotate them.
    ///
    /// Global articles were collected by company name already, so they pass
    /// unconditionally, tagged with their collection industry.
    pub fn apply(&self, items: Vec<NewsItem>) -> Vec<NewsItem> {
        let before = items.len();

        let kept: Vec<NewsItem> = items
            .into_iter()
            .filter_map(|mut item| {
                if item.is_global {
                    let industry = item
                        .industry
                        .clone()
                        .unwrap_or_else(|| GLOBAL_INDUSTRY.to_string());
                    item.matched_industries = vec![industry];
                    item.matched_keywords = item.search_keyword.clone().into_iter().collect();
                    return Some(item);
                }

                let matches = self.match_industries(&item);
                if matches.is_empty() {
                    return None;
                }
                let (industries, keywords): (Vec<String>, Vec<String>) = matches.into_iter().unzip();
                item.matched_industries = industries;
                item.matched_keywords = keywords;
                Some(item)
            })
            .collect();

        let global = kept.iter().filter(|item| item.is_global).count();
        info!(
            target: TARGET_FILTER,
            "Keyword filter: {} -> {} (domestic: {}, global: {})",
            before,
            kept.len(),
            kept.len() - global,
            global
        );

        kept
    }
}
