use std::collections::{BTreeMap, HashSet};

use creatorscout_youtube::FixedDelay;

use super::*;
use crate::testing::{gaming_category, targets, FakePlatform};

const GAMING: &str = "Gaming Content Creators";

fn finder(platform: FakePlatform) -> Finder<FakePlatform, FixedDelay> {
    Finder::new(
        platform,
        FixedDelay::none(),
        FixedDelay::none(),
        FinderSettings::default(),
    )
}

/// Six keywords, five distinct Nano channels each.
fn six_keyword_platform() -> (FakePlatform, Vec<String>) {
    let mut platform = FakePlatform::new();
    let mut keywords = Vec::new();
    for k in 0..6 {
        let keyword = format!("gaming {k}");
        let ids: Vec<String> = (0..5).map(|i| format!("UC{k}-{i}")).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        platform = platform.page(&keyword, &id_refs);
        for id in &ids {
            platform = platform.channel(id, 5_000, 600);
        }
        keywords.push(keyword);
    }
    (platform, keywords)
}

fn keyword_refs(keywords: &[String]) -> Vec<&str> {
    keywords.iter().map(String::as_str).collect()
}

#[tokio::test]
async fn thirty_nano_gaming_creators_are_accepted() {
    let (platform, keywords) = six_keyword_platform();
    let config = targets(vec![gaming_category(&keyword_refs(&keywords), 30)]);

    let outcome = finder(platform).run(&config).await;

    assert_eq!(outcome.records.len(), 30);
    assert!(outcome.records.iter().all(|r| r.tier == "Nano"));
    assert!(outcome.records.iter().all(|r| r.category == GAMING));
    assert!(outcome
        .records
        .iter()
        .all(|r| r.why_reason.contains("Very high engagement")));
    assert_eq!(outcome.summary.accepted, 30);
    assert_eq!(outcome.summary.keywords_searched, 6);
}

#[tokio::test]
async fn channel_found_by_two_keywords_is_recorded_once() {
    let platform = FakePlatform::new()
        .page("gaming 0", &["UCshared", "UCa"])
        .page("gaming 1", &["UCb", "UCshared"])
        .channel("UCshared", 5_000, 600)
        .channel("UCa", 5_000, 600)
        .channel("UCb", 5_000, 600);
    let config = targets(vec![gaming_category(&["gaming 0", "gaming 1"], 30)]);

    let outcome = finder(platform).run(&config).await;

    let shared = outcome
        .records
        .iter()
        .filter(|r| r.channel_id == "UCshared")
        .count();
    assert_eq!(shared, 1);
    assert_eq!(outcome.records.len(), 3);
    assert_eq!(outcome.summary.tiers[0].accepted, 3);
}

#[tokio::test]
async fn channel_shared_across_categories_is_recorded_once() {
    let platform = FakePlatform::new()
        .page("gaming", &["UCshared"])
        .page("vfx", &["UCshared", "UCv"])
        .channel("UCshared", 5_000, 600)
        .channel("UCv", 5_000, 600);
    let mut vfx = gaming_category(&["vfx"], 10);
    vfx.name = "VFX Artists".to_string();
    vfx.reason = None;
    let config = targets(vec![gaming_category(&["gaming"], 10), vfx]);

    let outcome = finder(platform).run(&config).await;

    let ids: Vec<(&str, &str)> = outcome
        .records
        .iter()
        .map(|r| (r.channel_id.as_str(), r.category.as_str()))
        .collect();
    assert_eq!(ids, vec![("UCshared", GAMING), ("UCv", "VFX Artists")]);
    let unique: HashSet<&str> = outcome.records.iter().map(|r| r.channel_id.as_str()).collect();
    assert_eq!(unique.len(), outcome.records.len());
}

#[tokio::test]
async fn channel_below_global_minimum_is_rejected() {
    let platform = FakePlatform::new()
        .page("gaming", &["UCtiny", "UCok"])
        .channel("UCtiny", 50, 5_000)
        .channel("UCok", 5_000, 600);
    let config = targets(vec![gaming_category(&["gaming"], 30)]);
    let finder = finder(platform);

    let outcome = finder.run(&config).await;

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].channel_id, "UCok");
    assert_eq!(outcome.summary.rejections.get("out_of_range"), Some(&1));
    // Out-of-range channels are screened before any upload lookup.
    assert_eq!(finder.platform().recent_lookups.get(), 1);
}

#[tokio::test]
async fn satisfied_category_stops_searching() {
    let platform = FakePlatform::new()
        .page("first", &["UC1", "UC2", "UC3", "UC4", "UC5"])
        .page("second", &["UC6", "UC7"])
        .channel("UC1", 5_000, 600)
        .channel("UC2", 5_000, 600)
        .channel("UC3", 5_000, 600)
        .channel("UC4", 5_000, 600)
        .channel("UC5", 5_000, 600)
        .channel("UC6", 5_000, 600)
        .channel("UC7", 5_000, 600);
    let config = targets(vec![gaming_category(&["first", "second"], 3)]);
    let finder = finder(platform);

    let outcome = finder.run(&config).await;

    assert_eq!(outcome.records.len(), 3);
    assert_eq!(*finder.platform().searched_keywords.borrow(), vec!["first"]);
    assert_eq!(finder.platform().recent_lookups.get(), 3);
    assert_eq!(outcome.summary.keywords_searched, 1);
    assert_eq!(outcome.summary.keywords_skipped, 1);
}

#[tokio::test]
async fn per_tier_quotas_are_never_exceeded() {
    let platform = FakePlatform::new()
        .page("gaming", &["UCn1", "UCn2", "UCn3", "UCm1", "UCm2"])
        .channel("UCn1", 5_000, 600)
        .channel("UCn2", 5_000, 600)
        .channel("UCn3", 5_000, 600)
        .channel("UCm1", 50_000, 6_000)
        .channel("UCm2", 50_000, 6_000);
    let mut category = gaming_category(&["gaming"], 0);
    category.target = None;
    category.target_per_tier = Some(BTreeMap::from([
        ("Nano".to_string(), 2),
        ("Micro".to_string(), 1),
    ]));
    let config = targets(vec![category]);

    let outcome = finder(platform).run(&config).await;

    let tiers: Vec<&str> = outcome.records.iter().map(|r| r.tier.as_str()).collect();
    assert_eq!(tiers, vec!["Nano", "Nano", "Micro"]);
    assert_eq!(outcome.summary.rejections.get("quota_met"), Some(&1));
    let gaming = &outcome.summary.categories[0];
    assert_eq!(gaming.target, 3);
    assert_eq!(
        gaming.per_tier,
        vec![
            ("Nano".to_string(), 2),
            ("Micro".to_string(), 1),
            ("Macro".to_string(), 0),
        ]
    );
}

#[tokio::test]
async fn low_engagement_channels_are_never_accepted() {
    let platform = FakePlatform::new()
        .page("gaming", &["UCquiet", "UCloud"])
        .channel("UCquiet", 5_000, 40)
        .channel("UCloud", 5_000, 600);
    let config = targets(vec![gaming_category(&["gaming"], 30)]);

    let outcome = finder(platform).run(&config).await;

    let ids: Vec<&str> = outcome.records.iter().map(|r| r.channel_id.as_str()).collect();
    assert_eq!(ids, vec!["UCloud"]);
    assert_eq!(outcome.summary.rejections.get("low_engagement"), Some(&1));
}

#[tokio::test]
async fn channel_without_uploads_fails_the_engagement_floor() {
    let platform = FakePlatform::new()
        .page("gaming", &["UCempty"])
        .channel_without_uploads("UCempty", 5_000);
    let config = targets(vec![gaming_category(&["gaming"], 30)]);

    let outcome = finder(platform).run(&config).await;

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.summary.rejections.get("low_engagement"), Some(&1));
}

#[tokio::test]
async fn failing_search_page_keeps_earlier_pages() {
    let platform = FakePlatform::new()
        .page("gaming", &["UC1", "UC2"])
        .page("gaming", &["UC3"])
        .fail_page("gaming", 1)
        .channel("UC1", 5_000, 600)
        .channel("UC2", 5_000, 600)
        .channel("UC3", 5_000, 600);
    let config = targets(vec![gaming_category(&["gaming"], 30)]);

    let outcome = finder(platform).run(&config).await;

    let ids: Vec<&str> = outcome.records.iter().map(|r| r.channel_id.as_str()).collect();
    assert_eq!(ids, vec!["UC1", "UC2"]);
}

#[tokio::test]
async fn failing_stats_drops_candidates_without_aborting() {
    let platform = FakePlatform::new()
        .page("gaming", &["UC1", "UC2"])
        .channel("UC1", 5_000, 600)
        .channel("UC2", 5_000, 600)
        .fail_stats();
    let config = targets(vec![gaming_category(&["gaming"], 30)]);

    let outcome = finder(platform).run(&config).await;

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.summary.rejections.get("unresolvable"), Some(&2));
    assert_eq!(outcome.summary.candidates_found, 2);
}

#[tokio::test]
async fn unresolved_channel_is_dropped() {
    let platform = FakePlatform::new()
        .page("gaming", &["UCgone", "UCok"])
        .channel("UCok", 5_000, 600);
    let config = targets(vec![gaming_category(&["gaming"], 30)]);

    let outcome = finder(platform).run(&config).await;

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.summary.rejections.get("unresolvable"), Some(&1));
}

#[tokio::test]
async fn summary_lists_categories_that_found_nothing() {
    let mut empty = gaming_category(&["nothing here"], 5);
    empty.name = "Empty".to_string();
    let config = targets(vec![empty]);

    let outcome = finder(FakePlatform::new()).run(&config).await;

    assert_eq!(outcome.summary.categories.len(), 1);
    assert_eq!(outcome.summary.categories[0].name, "Empty");
    assert_eq!(outcome.summary.categories[0].accepted, 0);
    assert_eq!(outcome.summary.tiers.len(), 3);
    assert!(outcome.summary.tiers.iter().all(|t| t.accepted == 0));
}

#[tokio::test]
async fn repeated_runs_are_independent() {
    let (platform, keywords) = six_keyword_platform();
    let config = targets(vec![gaming_category(&keyword_refs(&keywords), 10)]);
    let finder = finder(platform);

    let first = finder.run(&config).await;
    let second = finder.run(&config).await;

    assert_eq!(first.records, second.records);
    assert_eq!(first.summary, second.summary);
}
