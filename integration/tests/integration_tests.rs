//! End-to-end integration tests for the duplicate tab detector
//!
//! These tests verify that configuration, logging and the engine work
//! together correctly

use integration::*;
use std::io::Write;
use tab_dedup_core::types::*;
use tempfile::NamedTempFile;

/// Helper to create a test application with a given threshold
fn setup_test_app(threshold: u8) -> Application {
    let mut config = AppConfig::default();
    config.analyzer.threshold = threshold;
    config.log_level = "debug".to_string();
    Application::new(config).unwrap()
}

/// Helper to create a titled tab
fn create_test_tab(id: i64, url: &str, title: &str) -> TabRecord {
    TabRecord::new(id, url).with_title(title)
}

/// A snapshot mixing every kind of duplicate
fn mixed_snapshot() -> Vec<TabRecord> {
    vec![
        create_test_tab(1, "https://news.example.com/story/42", "Story"),
        create_test_tab(2, "https://news.example.com/story/42/#comments", "Story"),
        create_test_tab(3, "https://docs.google.com/spreadsheets/d/Q1/edit", "Budget"),
        create_test_tab(4, "https://docs.google.com/spreadsheets/d/Q1/edit#gid=7", "Budget"),
        create_test_tab(5, "https://docs.google.com/spreadsheets/d/Q1/view", "Budget"),
        create_test_tab(6, "https://shop.com/item?id=9&utm_campaign=sale", "Item"),
        create_test_tab(7, "https://shop.com/item?id=9", "Item"),
        create_test_tab(8, "chrome://newtab", "New Tab"),
        create_test_tab(9, "chrome://newtab", "New Tab"),
        create_test_tab(10, "https://unrelated.org/", "Unrelated"),
    ]
}

// ============================================================================
// 1. Configuration Tests
// ============================================================================

#[test]
fn test_config_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"analyzer": {{"threshold": 65, "max_comparison_pool": 40}}, "log_level": "warn"}}"#
    )
    .unwrap();

    let config = AppConfig::load(file.path()).unwrap();
    assert_eq!(config.analyzer.threshold, 65);
    assert_eq!(config.analyzer.max_comparison_pool, 40);
    assert_eq!(config.log_level, "warn");
}

#[test]
fn test_config_load_rejects_out_of_range_threshold() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"analyzer": {{"threshold": 120}}}}"#).unwrap();

    let err = AppConfig::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("threshold"));
}

#[test]
fn test_config_load_missing_file() {
    let err = AppConfig::load("/nonexistent/tab-dedup.json").unwrap_err();
    assert!(err.to_string().starts_with("System error"));
}

// ============================================================================
// 2. End-to-end Analysis Tests
// ============================================================================

#[tokio::test]
async fn test_mixed_snapshot() {
    let app = setup_test_app(80);
    let report = app.analyze(mixed_snapshot()).await.unwrap();
    let result = &report.result;

    assert_eq!(report.tab_count, 10);
    assert_eq!(result.duplicate_groups.len(), 2);

    // Document identity groups come first
    let sheet = &result.duplicate_groups[0];
    assert_eq!(sheet.key, "gdoc:sheet:Q1");
    assert_eq!(sheet.count, 3);

    let story = &result.duplicate_groups[1];
    assert_eq!(story.key, "https://news.example.com/story/42");
    assert_eq!(story.count, 2);

    assert_eq!(result.total_duplicate_tab_count, 3);
    assert_eq!(
        result.redundant_tab_ids(),
        vec![TabId::from(4), TabId::from(5), TabId::from(2)]
    );

    assert_eq!(result.total_similar_pair_count, 1);
    let pair = &result.similar_pairs[0];
    assert_eq!((pair.a.id.as_str(), pair.b.id.as_str()), ("6", "7"));
    assert_eq!(pair.score, 95);
    assert_eq!(pair.reason, "Same page with tracking parameters");
}

#[tokio::test]
async fn test_threshold_change_applies_to_later_analyses() {
    let app = setup_test_app(80);
    let tabs = vec![
        create_test_tab(1, "https://a.com/guide/intro", "Intro"),
        create_test_tab(2, "https://a.com/guide/setup", "Setup"),
    ];

    let strict = app.analyze(tabs.clone()).await.unwrap();

    app.set_threshold(50).await.unwrap();
    let lenient = app.analyze(tabs).await.unwrap();

    // path similarity 67, composite 71
    assert_eq!(strict.result.total_similar_pair_count, 0);
    assert_eq!(lenient.result.total_similar_pair_count, 1);
    assert_eq!(lenient.result.similar_pairs[0].reason, "Similar page paths (67% match)");
}

#[tokio::test]
async fn test_json_round_trip_of_report() {
    let app = setup_test_app(80);
    let report = app.analyze(mixed_snapshot()).await.unwrap();

    let json = serde_json::to_string(&report).unwrap();
    let decoded: AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded.result, report.result);
}

#[tokio::test]
async fn test_concurrent_analyses_are_independent() {
    let app = setup_test_app(80);

    let first = {
        let app = app.clone();
        tokio::spawn(async move { app.analyze(mixed_snapshot()).await })
    };
    let second = {
        let app = app.clone();
        tokio::spawn(async move {
            app.analyze(vec![create_test_tab(1, "https://solo.com", "Solo")])
                .await
        })
    };

    let first = first.await.unwrap().unwrap();
    let second = second.await.unwrap().unwrap();

    assert_eq!(first.result.total_duplicate_tab_count, 3);
    assert!(second.result.is_empty());
}
