use std::collections::HashSet;

use tracing::info;

use super::config::CompanyEntry;
use crate::news::NewsItem;
use crate::TARGET_FILTER;

/// Distinct sports terms needed before an article counts as sports coverage.
pub const SPORTS_CONTEXT_MIN_HITS: usize = 2;

/// A tracked company mentioned in an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyMention {
    pub name: String,
    pub industry: String,
    pub major: bool,
    pub global: bool,
}

#[derive(Debug, Clone)]
struct AliasEntry {
    alias: String,
    // ASCII aliases such as "GM" or "MS" must not match inside longer words
    ascii_word: bool,
    company: usize,
}

/// Second tier of the relevance filters: company-name annotation.
#[derive(Debug, Clone)]
pub struct CompanyFilter {
    companies: Vec<CompanyEntry>,
    aliases: Vec<AliasEntry>,
    exclusion_contexts: Vec<String>,
    require_company: bool,
}

impl CompanyFilter {
    pub fn new(
        companies: &[CompanyEntry],
        exclusion_contexts: &[String],
        require_company: bool,
    ) -> Self {
        let aliases = companies
            .iter()
            .enumerate()
            .flat_map(|(company, entry)| {
                entry
                    .aliases
                    .iter()
                    .filter(|alias| !alias.is_empty())
                    .map(move |alias| AliasEntry {
                        alias: alias.clone(),
                        ascii_word: alias.chars().all(|c| c.is_ascii_alphanumeric()),
                        company,
                    })
            })
            .collect();

        Self {
            companies: companies.to_vec(),
            aliases,
            exclusion_contexts: exclusion_contexts
                .iter()
                .filter(|c| !c.is_empty())
                .cloned()
                .collect(),
            require_company,
        }
    }

    /// Companies mentioned in the title or description, in table order and
    /// deduplicated by name. Sports coverage mentions no companies.
    pub fn find_mentioned_companies(&self, item: &NewsItem) -> Vec<CompanyMention> {
        let text = format!("{} {}", item.title, item.description);
        if self.is_sports_context(&text) {
            return Vec::new();
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut mentions = Vec::new();
        for entry in &self.aliases {
            let company = &self.companies[entry.company];
            if seen.contains(company.name.as_str()) {
                continue;
            }
            if contains_alias(&text, &entry.alias, entry.ascii_word) {
                seen.insert(company.name.as_str());
                mentions.push(CompanyMention {
                    name: company.name.clone(),
                    industry: company.industry.clone(),
                    major: company.major,
                    global: company.global,
                });
            }
        }
        mentions
    }

    fn is_sports_context(&self, text: &str) -> bool {
        self.exclusion_contexts
            .iter()
            .filter(|context| text.contains(context.as_str()))
            .take(SPORTS_CONTEXT_MIN_HITS)
            .count()
            >= SPORTS_CONTEXT_MIN_HITS
    }

    /// Annotate articles with their company mentions. When a company is
    /// required, articles without one are dropped.
    pub fn apply(&self, items: Vec<NewsItem>) -> Vec<NewsItem> {
        let before = items.len();
        let mut with_major = 0;

        let kept: Vec<NewsItem> = items
            .into_iter()
            .filter_map(|mut item| {
                let mentions = self.find_mentioned_companies(&item);
                if mentions.is_empty() && self.require_company {
                    return None;
                }
                if mentions.iter().any(|m| m.major) {
                    with_major += 1;
                }
                item.companies = mentions.into_iter().map(|m| m.name).collect();
                Some(item)
            })
            .collect();

        info!(
            target: TARGET_FILTER,
            "Company filter: {} -> {} ({} mention a major company)",
            before,
            kept.len(),
            with_major
        );

        kept
    }
}

fn contains_alias(text: &str, alias: &str, ascii_word: bool) -> bool {
    if !ascii_word {
        return text.contains(alias);
    }

    text.match_indices(alias).any(|(start, matched)| {
        let before = text[..start].chars().next_back();
        let after = text[start + matched.len()..].chars().next();
        !before.is_some_and(|c| c.is_ascii_alphanumeric())
            && !after.is_some_and(|c| c.is_ascii_alphanumeric())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterConfig;

    fn filter(require_company: bool) -> CompanyFilter {
        let config = FilterConfig::default();
        CompanyFilter::new(&config.companies, &config.exclusion_contexts, require_company)
    }

    fn names(mentions: &[CompanyMention]) -> Vec<&str> {
        mentions.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_aliases_map_to_canonical_names() {
        let item = NewsItem::new("현대차·기아차, 美 관세 대응", "엔비디아와 자율주행 협력");
        let mentions = filter(false).find_mentioned_companies(&item);
        assert_eq!(names(&mentions), vec!["현대자동차", "기아", "NVIDIA"]);
        assert!(mentions[2].global);
    }

    #[test]
    fn test_deduplicated_by_name() {
        let item = NewsItem::new("현대차그룹 현대자동차 현대차", "");
        assert_eq!(filter(false).find_mentioned_companies(&item).len(), 1);
    }

    #[test]
    fn test_ascii_aliases_need_word_boundaries() {
        let filter = filter(false);
        let inside = NewsItem::new("MSCI 지수 편입 기대감", "GMO 논란");
        assert!(filter.find_mentioned_companies(&inside).is_empty());

        let standalone = NewsItem::new("GM, 한국 공장 물량 확대", "");
        assert_eq!(names(&filter.find_mentioned_companies(&standalone)), vec!["GM"]);
    }

    #[test]
    fn test_sports_coverage_ignored() {
        let item = NewsItem::new("한화에어로스페이스 후원 이글스, 홈런 3방으로 승리", "");
        assert!(filter(false).find_mentioned_companies(&item).is_empty());

        // One ambiguous term alone is not sports coverage
        let business = NewsItem::new("네이버, 춘천 데이터센터 증설", "");
        assert_eq!(names(&filter(false).find_mentioned_companies(&business)), vec!["네이버"]);
    }

    #[test]
    fn test_require_company() {
        let items = vec![
            NewsItem::new("SK하이닉스 HBM4 양산", ""),
            NewsItem::new("반도체 수출 3개월 연속 증가", ""),
        ];
        let annotated = filter(false).apply(items.clone());
        assert_eq!(annotated.len(), 2);
        assert_eq!(annotated[0].companies, vec!["SK하이닉스"]);
        assert!(annotated[1].companies.is_empty());

        let required = filter(true).apply(items);
        assert_eq!(required.len(), 1);
    }
}
