//! Domain-based publisher lookup for items whose collector did not supply one.

use url::Url;

// Ordered: more specific hosts come before the domains they are a suffix of.
pub const DOMAIN_PUBLISHERS: &[(&str, &str)] = &[
    // Economic dailies
    ("hankyung.com", "한국경제"),
    ("mk.co.kr", "매일경제"),
    ("sedaily.com", "서울경제"),
    ("yonhapnewstv.co.kr", "연합뉴스TV"),
    ("yonhapnews.co.kr", "연합뉴스"),
    ("yna.co.kr", "연합뉴스"),
    // IT / industry press
    ("etnews.com", "전자신문"),
    ("thelec.kr", "더일렉"),
    ("zdnet.co.kr", "지디넷코리아"),
    ("mt.co.kr", "머니투데이"),
    ("asiae.co.kr", "아시아경제"),
    ("biz.chosun.com", "조선비즈"),
    ("heraldcorp.com", "헤럴드경제"),
    ("fnnews.com", "파이낸셜뉴스"),
    ("edaily.co.kr", "이데일리"),
    ("ddaily.co.kr", "디지털데일리"),
    ("irobotnews.com", "로봇신문"),
    ("donga.com", "동아일보"),
    // Broadcasters
    ("kbs.co.kr", "KBS"),
    ("imnews.imbc.com", "MBC"),
    ("sbs.co.kr", "SBS"),
    ("jtbc.co.kr", "JTBC"),
    ("ytn.co.kr", "YTN"),
    // Global outlets
    ("bloomberg.com", "Bloomberg"),
    ("reuters.com", "Reuters"),
    ("wsj.com", "WSJ"),
    ("ft.com", "Financial Times"),
    ("cnbc.com", "CNBC"),
    ("techcrunch.com", "TechCrunch"),
    ("theverge.com", "The Verge"),
];

/// Map an article link to a known publisher name.
///
/// Parsed hosts are matched on domain boundaries (`news.mk.co.kr` is 매일경제,
/// `newsmk.co.kr` is not). Links that don't parse fall back to a substring
/// check so that scheme-less links from some feeds still resolve.
pub fn publisher_from_url(link: &str) -> Option<&'static str> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }

    match Url::parse(link).ok().and_then(|u| u.host_str().map(str::to_lowercase)) {
        Some(host) => DOMAIN_PUBLISHERS
            .iter()
            .find(|(domain, _)| host == *domain || host.ends_with(&format!(".{}", domain)))
            .map(|(_, name)| *name),
        None => {
            let lower = link.to_lowercase();
            DOMAIN_PUBLISHERS
                .iter()
                .find(|(domain, _)| lower.contains(domain))
                .map(|(_, name)| *name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_domains() {
        assert_eq!(
            publisher_from_url("https://www.hankyung.com/article/2024101512345"),
            Some("한국경제")
        );
        assert_eq!(
            publisher_from_url("https://news.mk.co.kr/newsRead.php?no=1"),
            Some("매일경제")
        );
        assert_eq!(
            publisher_from_url("https://www.reuters.com/technology/foo"),
            Some("Reuters")
        );
    }

    #[test]
    fn test_subdomain_precedence() {
        assert_eq!(
            publisher_from_url("https://biz.chosun.com/it-science/1"),
            Some("조선비즈")
        );
        assert_eq!(
            publisher_from_url("https://www.yonhapnewstv.co.kr/news/1"),
            Some("연합뉴스TV")
        );
    }

    #[test]
    fn test_unknown_and_malformed() {
        assert_eq!(publisher_from_url("https://example.com/a"), None);
        assert_eq!(publisher_from_url("https://newsmk.co.kr/a"), None);
        assert_eq!(publisher_from_url(""), None);
        assert_eq!(publisher_from_url("www.etnews.com/2024"), Some("전자신문"));
    }
}
