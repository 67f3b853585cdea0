use chrono::Utc;
use std::collections::HashMap;
use trend_hunter::cache::ReportCache;
use trend_hunter::types::{RankedKeyword, TrendReport};

fn sample_report(total_items: usize) -> TrendReport {
    TrendReport {
        ranking: vec![RankedKeyword {
            keyword: "basement".to_string(),
            count: 2,
        }],
        index: HashMap::from([(
            "basement".to_string(),
            vec!["The basement door".to_string(), "A basement light".to_string()],
        )]),
        total_items,
        failures: Vec::new(),
        generated_at: Utc::now(),
    }
}

fn sources(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_fresh_entry_is_returned() {
    let mut cache = ReportCache::new(600);
    let key = sources(&["nosleep", "shortscarystories"]);

    assert!(cache.get(&key).is_none());
    cache.insert(&key, sample_report(40));

    let cached = cache.get(&key).expect("fresh entry should hit");
    assert_eq!(cached.total_items, 40);
    assert_eq!(cached.ranking[0].keyword, "basement");
}

#[test]
fn test_expired_entry_is_ignored() {
    // Zero TTL expires entries immediately.
    let mut cache = ReportCache::new(0);
    let key = sources(&["nosleep"]);

    cache.insert(&key, sample_report(10));
    assert!(cache.get(&key).is_none());
    // The stale entry stays until invalidation, it just never hits.
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_keyed_by_source_list() {
    let mut cache = ReportCache::new(600);
    cache.insert(&sources(&["nosleep"]), sample_report(10));

    assert!(cache.get(&sources(&["relationships"])).is_none());
    assert!(cache.get(&sources(&["nosleep", "ruleshorror"])).is_none());
    assert!(cache.get(&sources(&["nosleep"])).is_some());
}

#[test]
fn test_invalidate_all_clears_everything() {
    let mut cache = ReportCache::new(600);
    cache.insert(&sources(&["nosleep"]), sample_report(10));
    cache.insert(&sources(&["relationships"]), sample_report(20));
    assert_eq!(cache.len(), 2);

    cache.invalidate_all();
    assert!(cache.is_empty());
    assert!(cache.get(&sources(&["nosleep"])).is_none());
}

#[test]
fn test_saturation_pct_guards_zero_items() {
    let empty = sample_report(0);
    assert_eq!(empty.saturation_pct(2), None);

    let populated = sample_report(40);
    let pct = populated.saturation_pct(2).expect("non-zero total");
    assert!((pct - 5.0).abs() < f64::EPSILON);
}
