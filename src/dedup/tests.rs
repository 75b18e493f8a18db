use std::collections::HashSet;

use super::*;
use crate::news::NewsItem;

fn fillers() -> Vec<NewsItem> {
    vec![
        NewsItem::new(
            "Local festival features singer X",
            "Thousands gathered downtown for the weekend concert",
        ),
        NewsItem::new("기상청, 주말 전국에 강한 비 예보", "남부지방은 시간당 30mm 폭우가 내릴 전망"),
        NewsItem::new("프로야구 개막전 입장권 매진", "전 구장 티켓이 10분 만에 동났다"),
        NewsItem::new("서울 지하철 요금 150원 인상", "출퇴근 시민 부담 커질 듯"),
        NewsItem::new("국립중앙박물관 고려청자 특별전", "80여 점을 처음 선보인다"),
    ]
}

fn wire_copy(publisher: &str) -> NewsItem {
    NewsItem::new(
        "삼성전자 3분기 영업이익 9조 돌파",
        "반도체 업황 회복에 힘입어 시장 예상치를 웃돌았다",
    )
    .with_publisher(publisher)
}

/// Rewrites of one story with decreasing overlap, then an unrelated batch.
fn graded_batch() -> Vec<NewsItem> {
    let mut items = vec![
        NewsItem::new(
            "현대차, 美 조지아 전기차 공장 준공",
            "현대차그룹이 조지아주에 전기차 전용 공장을 준공하고 본격 생산에 들어갔다",
        ),
        NewsItem::new(
            "[속보] 현대차, 美 조지아 전기차 공장 준공",
            "현대차그룹이 조지아주에 전기차 전용 공장을 준공했다",
        ),
        NewsItem::new(
            "현대차 조지아 전기차 공장 준공…연 30만대 생산",
            "현대차그룹이 미국 조지아주 전기차 공장에서 본격 생산에 들어갔다",
        ),
        NewsItem::new("현대차그룹 미국 전기차 공장 가동", "조지아주 신공장에서 아이오닉 생산 시작"),
        NewsItem::new(
            "LG엔솔, 현대차와 합작 배터리 공장 착공",
            "조지아주에 배터리 셀 합작 공장을 짓는다",
        ),
    ];
    items.extend(fillers());
    items
}

fn titles(items: &[NewsItem]) -> Vec<String> {
    items.iter().map(|item| item.title.clone()).collect()
}

#[test]
fn test_identical_pair_keeps_trusted_publisher() {
    let items = vec![
        NewsItem::new("Samsung Electronics Q3 profit up 20%", "Memory prices recovered")
            .with_publisher("어딘가뉴스"),
        NewsItem::new("Samsung Electronics Q3 profit up 20%", "Memory prices recovered")
            .with_publisher("연합뉴스"),
    ];
    let config = DedupConfig::default().with_max_per_cluster(1);
    let outcome = cluster_dedup(items, &config);

    assert_eq!(outcome.representatives.len(), 1);
    assert_eq!(outcome.dropped.len(), 1);
    assert_eq!(outcome.representatives[0].publisher.as_deref(), Some("연합뉴스"));
    assert_eq!(outcome.stats.multi_clusters, 1);
}

#[test]
fn test_unrelated_pair_both_kept() {
    let items = vec![
        NewsItem::new("Samsung Electronics Q3 profit up 20%", ""),
        NewsItem::new("Local festival features singer X", ""),
    ];
    let clusters = find_clusters(&items, &DedupConfig::default());
    assert_eq!(clusters, vec![vec![0], vec![1]]);
    assert_eq!(deduplicate_with_clustering(items, &DedupConfig::default()).len(), 2);
}

#[test]
fn test_wire_copies_capped_with_publisher_diversity() {
    let mut items: Vec<NewsItem> = ["어딘가뉴스", "머니투데이", "한국경제", "연합뉴스", "서울경제"]
        .iter()
        .map(|publisher| wire_copy(publisher))
        .collect();
    items.extend(fillers());

    let config = DedupConfig::default().with_max_per_cluster(2);
    let outcome = cluster_dedup(items, &config);

    assert_eq!(outcome.stats.input, 10);
    assert_eq!(outcome.stats.multi_clusters, 1);
    assert_eq!(outcome.stats.largest_cluster, 5);
    assert_eq!(outcome.dropped.len(), 3);
    assert_eq!(outcome.representatives.len(), 7);

    let kept_publishers: Vec<&str> = outcome
        .representatives
        .iter()
        .filter_map(|item| item.publisher.as_deref())
        .collect();
    assert_eq!(kept_publishers, vec!["연합뉴스", "한국경제"]);
}

#[test]
fn test_single_item_returned_unchanged() {
    let item = NewsItem::new("[단독] 카카오 새 대표 내정", "").with_publisher("머니투데이");
    let outcome = cluster_dedup(vec![item.clone()], &DedupConfig::default());
    assert_eq!(outcome.representatives, vec![item]);
    assert_eq!(outcome.stats.clusters, 1);
    assert!(outcome.dropped.is_empty());
}

#[test]
fn test_empty_titles_compare_by_description() {
    let items = vec![
        NewsItem::new("", "삼성전자 3분기 영업이익 9조 돌파"),
        NewsItem::new("", "반도체 업황 회복에 힘입어 시장 예상치를 웃돌았다"),
        NewsItem::new("", "삼성전자 3분기 영업이익 9조 돌파"),
        NewsItem::new("", "기상청 주말 폭우 예보"),
    ];
    let clusters = find_clusters(&items, &DedupConfig::default());
    assert_eq!(clusters, vec![vec![0, 2], vec![1], vec![3]]);
}

#[test]
fn test_all_empty_items_do_not_merge() {
    let items = vec![NewsItem::default(), NewsItem::default(), NewsItem::default()];
    let outcome = cluster_dedup(items, &DedupConfig::default());
    assert_eq!(outcome.representatives.len(), 3);
    assert_eq!(outcome.stats.singleton_clusters, 3);
}

#[test]
fn test_partition_and_output_bound() {
    let items = graded_batch();
    let input = titles(&items);
    let config = DedupConfig::default()
        .with_preset(ThresholdPreset::Loose)
        .with_max_per_cluster(1);
    let outcome = cluster_dedup(items, &config);

    assert!(outcome.representatives.len() <= input.len());
    assert_eq!(
        outcome.representatives.len() + outcome.dropped.len(),
        input.len()
    );
    assert_eq!(outcome.stats.dropped, outcome.dropped.len());

    let mut seen: Vec<String> = titles(&outcome.representatives);
    seen.extend(titles(&outcome.dropped));
    seen.sort();
    let mut expected = input;
    expected.sort();
    assert_eq!(seen, expected);
}

#[test]
fn test_threshold_presets_are_monotonic() {
    let items = graded_batch();
    let count = |preset: ThresholdPreset| {
        find_clusters(&items, &DedupConfig::default().with_preset(preset)).len()
    };

    let strict = count(ThresholdPreset::Strict);
    let normal = count(ThresholdPreset::Normal);
    let loose = count(ThresholdPreset::Loose);
    assert!(strict >= normal && normal >= loose);
    // The two headline variants merge at every preset; looser rewrites only at loose
    assert_eq!(normal, 9);
    assert_eq!(loose, 7);
}

#[test]
fn test_threshold_one_merges_nothing_among_distinct_texts() {
    let items = graded_batch();
    let n = items.len();
    let config = DedupConfig::default().with_threshold(1.0);
    assert_eq!(deduplicate_with_clustering(items, &config).len(), n);
}

#[test]
fn test_threshold_one_keeps_identical_copies() {
    let mut items = vec![wire_copy("연합뉴스"), wire_copy("한국경제")];
    items.extend(fillers());
    let n = items.len();
    let config = DedupConfig::default()
        .with_threshold(1.0)
        .with_max_per_cluster(1);

    let outcome = cluster_dedup(items, &config);
    assert_eq!(outcome.representatives.len(), n);
    assert!(outcome.dropped.is_empty());
    assert_eq!(outcome.stats.multi_clusters, 0);
}

#[test]
fn test_indexed_search_matches_exhaustive() {
    let items = graded_batch();
    // Zero included: unrelated pairs must not merge under either strategy
    for threshold in [0.0, 0.5, 0.65, 0.8] {
        let exhaustive = DedupConfig::default().with_threshold(threshold);
        let indexed = exhaustive.clone().with_neighbor_search(NeighborSearch::Indexed);
        assert_eq!(
            find_clusters(&items, &exhaustive),
            find_clusters(&items, &indexed),
            "threshold {}",
            threshold
        );
    }
}

#[test]
fn test_small_top_k_still_chains_rewrites() {
    // With K = 2 no rewrite keeps an edge to every other one, but the edges
    // retained from either side still chain all four together.
    let items = graded_batch();
    let config = DedupConfig::default()
        .with_preset(ThresholdPreset::Loose)
        .with_top_k(2);
    let clusters = find_clusters(&items, &config);
    assert_eq!(clusters[0], vec![0, 1, 2, 3]);
}

#[test]
fn test_pipeline_tiers_compose() {
    let mut items = vec![
        NewsItem::new("[속보] 현대차, 美 조지아 전기차 공장 준공", "a").with_publisher("연합뉴스"),
        NewsItem::new("현대차, 美 조지아 전기차 공장 준공", "b").with_publisher("한국경제"),
    ];
    items.extend(graded_batch());

    let exact = deduplicate_news(items);
    let kept = deduplicate_with_clustering(exact.clone(), &DedupConfig::default());
    assert!(kept.len() <= exact.len());

    let unique: HashSet<String> = titles(&kept).into_iter().collect();
    assert_eq!(unique.len(), kept.len(), "clustering must not duplicate items");
}
