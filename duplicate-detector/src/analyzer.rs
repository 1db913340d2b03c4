//! Tab Analyzer
//!
//! Turns an unordered tab snapshot into exact-duplicate groups and ranked
//! near-duplicate pairs.
//!
//! 1. Drop tabs without a URL and browser-internal pages
//! 2. Group by normalized URL and, independently, by document identity
//! 3. Merge, letting document-identity groups claim their tabs first
//! 4. Classify every pair of the remaining comparable tabs, capped at
//!    [`AnalyzerConfig::max_comparison_pool`] tabs
//! 5. Rank similar pairs by score

use crate::classifier::{classify_parsed, PairContext};
use crate::config::AnalyzerConfig;
use crate::document_identity;
use crate::scheme_filter;
use crate::url_normalizer::{self, ParsedUrl};
use std::collections::{HashMap, HashSet};
use tab_dedup_core::{
    AnalysisResult, DocumentIdentity, DuplicateGroup, GroupKind, SimilarPair, TabId, TabRecord,
};
use tracing::{debug, trace, warn};

/// A tab with everything derived from its URL
struct AnalyzedTab<'a> {
    tab: &'a TabRecord,
    url: Option<ParsedUrl>,
    identity: Option<DocumentIdentity>,
}

impl<'a> AnalyzedTab<'a> {
    fn new(tab: &'a TabRecord) -> Self {
        match url_normalizer::parse(&tab.url) {
            Ok(url) => {
                let identity = document_identity::extract(&url.host, &url.path);
                Self {
                    tab,
                    url: Some(url),
                    identity,
                }
            }
            Err(e) => {
                trace!("Excluding tab {} from analysis: {}", tab.id, e);
                Self {
                    tab,
                    url: None,
                    identity: None,
                }
            }
        }
    }
}

/// Duplicate and near-duplicate tab analyzer
///
/// Holds only configuration, so one instance can serve any number of
/// concurrent analyses.
#[derive(Debug, Clone, Default)]
pub struct TabAnalyzer {
    config: AnalyzerConfig,
}

impl TabAnalyzer {
    /// Create a new analyzer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new analyzer with custom configuration
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a tab snapshot
    ///
    /// Never fails: unparseable URLs are excluded, missing titles score 0.
    pub fn analyze(&self, tabs: &[TabRecord]) -> AnalysisResult {
        let analyzed: Vec<AnalyzedTab<'_>> = scheme_filter::filter_tabs(tabs)
            .into_iter()
            .map(AnalyzedTab::new)
            .collect();

        let identity_groups =
            group_in_order(&analyzed, |t| t.identity.as_ref().map(DocumentIdentity::key));
        let url_groups = group_in_order(&analyzed, |t| t.url.as_ref().map(ParsedUrl::full_form));

        let mut claimed: HashSet<&TabId> = HashSet::new();
        let mut duplicate_groups = Vec::new();

        for (key, members) in identity_groups {
            claimed.extend(members.iter().copied().map(|t| &t.id));
            duplicate_groups.push(DuplicateGroup::new(
                key,
                GroupKind::DocumentIdentity,
                members.into_iter().cloned().collect(),
            ));
        }

        for (key, members) in url_groups {
            let remaining: Vec<&TabRecord> = members
                .into_iter()
                .filter(|t| !claimed.contains(&t.id))
                .collect();
            if remaining.len() < 2 {
                continue;
            }
            claimed.extend(remaining.iter().copied().map(|t| &t.id));
            duplicate_groups.push(DuplicateGroup::new(
                key,
                GroupKind::NormalizedUrl,
                remaining.into_iter().cloned().collect(),
            ));
        }

        // Document-platform tabs are settled by identity matching alone
        let comparable: Vec<&AnalyzedTab<'_>> = analyzed
            .iter()
            .filter(|t| t.url.is_some() && t.identity.is_none() && !claimed.contains(&t.tab.id))
            .collect();

        let pool_size = comparable.len().min(self.config.max_comparison_pool);
        let uncompared_tab_count = comparable.len() - pool_size;
        if uncompared_tab_count > 0 {
            warn!(
                "Comparison pool capped at {} tabs, {} tabs not compared",
                pool_size, uncompared_tab_count
            );
        }

        let similar_pairs = self.find_similar_pairs(&comparable[..pool_size]);

        let total_duplicate_tab_count = duplicate_groups.iter().map(|g| g.count - 1).sum();
        let total_similar_pair_count = similar_pairs.len();

        debug!(
            "Analyzed {} tabs: {} duplicate groups, {} similar pairs",
            tabs.len(),
            duplicate_groups.len(),
            total_similar_pair_count
        );

        AnalysisResult {
            duplicate_groups,
            similar_pairs,
            total_duplicate_tab_count,
            total_similar_pair_count,
            uncompared_tab_count,
        }
    }

    /// Classify each unordered pair once (`i < j`) and rank the similar ones
    fn find_similar_pairs(&self, pool: &[&AnalyzedTab<'_>]) -> Vec<SimilarPair> {
        let mut pairs = Vec::new();

        for (i, first) in pool.iter().enumerate() {
            for second in &pool[i + 1..] {
                let (Some(first_url), Some(second_url)) = (&first.url, &second.url) else {
                    continue;
                };
                let ctx = PairContext::new(first.tab, first_url, second.tab, second_url);
                let verdict = classify_parsed(&ctx, self.config.threshold);

                if verdict.is_similar {
                    pairs.push(SimilarPair {
                        a: first.tab.clone(),
                        b: second.tab.clone(),
                        score: verdict.score,
                        reason: verdict.reason.unwrap_or_default(),
                    });
                }
            }
        }

        // stable: ties keep encounter order
        pairs.sort_by(|a, b| b.score.cmp(&a.score));
        pairs
    }
}

/// Analyze `tabs` with the given threshold and default pool cap
pub fn analyze(tabs: &[TabRecord], threshold: u8) -> AnalysisResult {
    TabAnalyzer::with_config(AnalyzerConfig::with_threshold(threshold)).analyze(tabs)
}

/// Group tabs by key in first-encounter order, keeping groups of two or more
fn group_in_order<'a, F>(tabs: &[AnalyzedTab<'a>], key_of: F) -> Vec<(String, Vec<&'a TabRecord>)>
where
    F: Fn(&AnalyzedTab<'a>) -> Option<String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&'a TabRecord>)> = Vec::new();

    for analyzed in tabs {
        let Some(key) = key_of(analyzed) else {
            continue;
        };
        match index.get(&key) {
            Some(&i) => groups[i].1.push(analyzed.tab),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![analyzed.tab]));
            }
        }
    }

    groups.retain(|(_, members)| members.len() > 1);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(id: &str, url: &str) -> TabRecord {
        TabRecord::new(id, url)
    }

    fn ids(tabs: &[TabRecord]) -> Vec<&str> {
        tabs.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        let result = analyze(&[], 80);
        assert!(result.is_empty());
        assert_eq!(result.total_duplicate_tab_count, 0);
        assert_eq!(result.total_similar_pair_count, 0);
    }

    #[test]
    fn test_exact_duplicates_grouped() {
        let tabs = vec![
            tab("1", "https://example.com/page"),
            tab("2", "https://www.example.com/page/"),
            tab("3", "https://example.com/page#comments"),
            tab("4", "https://other.com/"),
        ];

        let result = analyze(&tabs, 80);
        assert_eq!(result.duplicate_groups.len(), 1);

        let group = &result.duplicate_groups[0];
        assert_eq!(group.key, "https://example.com/page");
        assert_eq!(group.kind, GroupKind::NormalizedUrl);
        assert_eq!(group.count, 3);
        assert_eq!(ids(&group.tabs), vec!["1", "2", "3"]);
        assert_eq!(result.total_duplicate_tab_count, 2);
        assert!(result.similar_pairs.is_empty());
    }

    #[test]
    fn test_document_identity_groups() {
        let tabs = vec![
            tab("1", "https://docs.google.com/document/d/ABC123/edit"),
            tab("2", "https://docs.google.com/document/d/ABC123/view"),
        ];

        let result = analyze(&tabs, 80);
        assert_eq!(result.duplicate_groups.len(), 1);

        let group = &result.duplicate_groups[0];
        assert_eq!(group.key, "gdoc:doc:ABC123");
        assert_eq!(group.kind, GroupKind::DocumentIdentity);
        assert_eq!(group.count, 2);
        assert_eq!(result.total_duplicate_tab_count, 1);
    }

    #[test]
    fn test_document_identity_takes_priority() {
        let tabs = vec![
            tab("1", "https://docs.google.com/document/d/ABC/edit"),
            tab("2", "https://docs.google.com/document/d/ABC/edit"),
            tab("3", "https://docs.google.com/document/d/ABC/view"),
        ];

        let result = analyze(&tabs, 80);
        assert_eq!(result.duplicate_groups.len(), 1);
        assert_eq!(result.duplicate_groups[0].kind, GroupKind::DocumentIdentity);
        assert_eq!(ids(&result.duplicate_groups[0].tabs), vec!["1", "2", "3"]);
        assert_eq!(result.total_duplicate_tab_count, 2);
    }

    #[test]
    fn test_document_tabs_not_compared_pairwise() {
        let tabs = vec![
            tab("1", "https://docs.google.com/document/d/AAA/edit"),
            tab("2", "https://docs.google.com/document/d/AAB/edit"),
        ];

        let result = analyze(&tabs, 0);
        assert!(result.duplicate_groups.is_empty());
        assert!(result.similar_pairs.is_empty());
    }

    #[test]
    fn test_internal_and_invalid_urls_excluded() {
        let tabs = vec![
            tab("1", "chrome://settings"),
            tab("2", "chrome://settings"),
            tab("3", "not a url"),
            tab("4", "not a url"),
            tab("5", ""),
        ];

        let result = analyze(&tabs, 0);
        assert!(result.is_empty());
    }

    #[test]
    fn test_similar_pairs_ranked_by_score() {
        let tabs = vec![
            tab("1", "https://a.com/blog/post-1"),
            tab("2", "https://a.com/blog/post-2"),
            tab("3", "https://b.com/page?utm_source=mail"),
            tab("4", "https://b.com/page"),
        ];

        let result = analyze(&tabs, 80);
        assert_eq!(result.total_similar_pair_count, 2);

        let first = &result.similar_pairs[0];
        assert_eq!((first.a.id.as_str(), first.b.id.as_str()), ("3", "4"));
        assert_eq!(first.score, 95);
        assert_eq!(first.reason, "Same page with tracking parameters");

        let second = &result.similar_pairs[1];
        assert_eq!((second.a.id.as_str(), second.b.id.as_str()), ("1", "2"));
        assert_eq!(second.reason, "Similar page paths (92% match)");
    }

    #[test]
    fn test_ties_keep_encounter_order() {
        let tabs = vec![
            tab("1", "https://a.com/x?utm_source=feed"),
            tab("2", "https://a.com/x"),
            tab("3", "https://b.com/y?fbclid=abc"),
            tab("4", "https://b.com/y"),
        ];

        let result = analyze(&tabs, 80);
        assert!(result.similar_pairs.iter().all(|p| p.score == 95));
        let order: Vec<(&str, &str)> = result
            .similar_pairs
            .iter()
            .map(|p| (p.a.id.as_str(), p.b.id.as_str()))
            .collect();
        assert_eq!(order, vec![("1", "2"), ("3", "4")]);
    }

    #[test]
    fn test_grouped_tabs_not_reported_as_pairs() {
        let tabs = vec![
            tab("1", "https://a.com/page"),
            tab("2", "https://a.com/page"),
            tab("3", "https://a.com/page#top"),
        ];

        let result = analyze(&tabs, 0);
        assert_eq!(result.duplicate_groups.len(), 1);
        assert!(result.similar_pairs.is_empty());
    }

    #[test]
    fn test_comparison_pool_cap() {
        let tabs: Vec<TabRecord> = (0..5)
            .map(|i| tab(&i.to_string(), &format!("https://a.com/item-{}", i)))
            .collect();

        let analyzer = TabAnalyzer::with_config(AnalyzerConfig {
            threshold: 80,
            max_comparison_pool: 3,
        });
        let result = analyzer.analyze(&tabs);

        assert_eq!(result.uncompared_tab_count, 2);
        // only the first three tabs are compared: 3 pairs
        assert_eq!(result.total_similar_pair_count, 3);
        assert!(result
            .similar_pairs
            .iter()
            .all(|p| ["0", "1", "2"].contains(&p.a.id.as_str())
                && ["0", "1", "2"].contains(&p.b.id.as_str())));
    }

    #[test]
    fn test_analyzer_is_reusable() {
        let analyzer = TabAnalyzer::new();
        let tabs = vec![tab("1", "https://a.com"), tab("2", "https://a.com/")];
        assert_eq!(analyzer.analyze(&tabs), analyzer.analyze(&tabs));
        assert_eq!(analyzer.config().threshold, 80);
    }
}
