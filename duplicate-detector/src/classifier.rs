//! Pairwise near-duplicate classification
//!
//! A pair of tabs runs through [`ClassificationRule::ORDER`] and the first
//! rule that produces a verdict decides the outcome. The order matters: the
//! cross-domain check sits after the subdomain check so that `www.` variants
//! are still recognised, and the composite score is only reached when every
//! structural rule has declined.

use crate::similarity::similarity;
use crate::tracking::without_tracking;
use crate::url_normalizer::{self, ParsedUrl};
use crate::config::DEFAULT_THRESHOLD;
use tab_dedup_core::{SimilarityVerdict, TabRecord};

const SUBDOMAIN_VARIANT_SCORE: u8 = 95;
const FRAGMENT_ONLY_SCORE: u8 = 90;
const TRACKING_ONLY_SCORE: u8 = 95;
const DIFFERENT_PARAMETERS_SCORE: u8 = 85;

/// Composite weights in percent: domain, path, title
const DOMAIN_WEIGHT: u32 = 40;
const PATH_WEIGHT: u32 = 40;
const TITLE_WEIGHT: u32 = 20;

/// Two tabs with their parsed URLs
#[derive(Debug, Clone, Copy)]
pub struct PairContext<'a> {
    pub first: &'a TabRecord,
    pub second: &'a TabRecord,
    pub first_url: &'a ParsedUrl,
    pub second_url: &'a ParsedUrl,
}

impl<'a> PairContext<'a> {
    pub fn new(
        first: &'a TabRecord,
        first_url: &'a ParsedUrl,
        second: &'a TabRecord,
        second_url: &'a ParsedUrl,
    ) -> Self {
        Self {
            first,
            second,
            first_url,
            second_url,
        }
    }

    fn same_base_host(&self) -> bool {
        self.first_url.base_host() == self.second_url.base_host()
    }

    fn same_path(&self) -> bool {
        self.first_url.path == self.second_url.path
    }

    fn same_query(&self) -> bool {
        self.first_url.query == self.second_url.query
    }

    fn path_similarity(&self) -> u8 {
        similarity(&self.first_url.path, &self.second_url.path)
    }

    fn title_similarity(&self) -> u8 {
        match (self.first.non_empty_title(), self.second.non_empty_title()) {
            (Some(a), Some(b)) => similarity(a, b),
            _ => 0,
        }
    }
}

/// Heuristics applied to a pair, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationRule {
    /// `www.example.com/a` vs `example.com/a`
    SubdomainVariant,
    /// Different sites are never similar
    CrossDomain,
    /// Same page, only the `#fragment` differs
    FragmentOnly,
    /// Same path, different query parameters
    QueryDifference,
    /// Paths close by edit distance
    SimilarPath,
    /// Weighted domain, path and title score
    WeightedComposite,
}

impl ClassificationRule {
    pub const ORDER: [ClassificationRule; 6] = [
        ClassificationRule::SubdomainVariant,
        ClassificationRule::CrossDomain,
        ClassificationRule::FragmentOnly,
        ClassificationRule::QueryDifference,
        ClassificationRule::SimilarPath,
        ClassificationRule::WeightedComposite,
    ];

    /// Apply this rule; `Some` ends classification with that verdict
    pub fn evaluate(self, ctx: &PairContext<'_>, threshold: u8) -> Option<SimilarityVerdict> {
        match self {
            ClassificationRule::SubdomainVariant => {
                let variant = ctx.first_url.host != ctx.second_url.host
                    && ctx.same_base_host()
                    && ctx.same_path()
                    && ctx.same_query();
                variant.then(|| {
                    SimilarityVerdict::similar(
                        SUBDOMAIN_VARIANT_SCORE,
                        "Same page on different subdomain",
                    )
                })
            }
            ClassificationRule::CrossDomain => {
                (!ctx.same_base_host()).then(|| SimilarityVerdict::not_similar(0))
            }
            ClassificationRule::FragmentOnly => {
                let fragment_only = ctx.same_path()
                    && ctx.same_query()
                    && ctx.first_url.fragment != ctx.second_url.fragment;
                fragment_only.then(|| {
                    SimilarityVerdict::similar(FRAGMENT_ONLY_SCORE, "Same page, different section")
                })
            }
            ClassificationRule::QueryDifference => {
                if !ctx.same_path() || ctx.same_query() {
                    return None;
                }
                let verdict = if without_tracking(&ctx.first_url.query)
                    == without_tracking(&ctx.second_url.query)
                {
                    SimilarityVerdict::similar(
                        TRACKING_ONLY_SCORE,
                        "Same page with tracking parameters",
                    )
                } else {
                    SimilarityVerdict::similar(
                        DIFFERENT_PARAMETERS_SCORE,
                        "Same page, different parameters",
                    )
                };
                Some(verdict)
            }
            ClassificationRule::SimilarPath => {
                let score = ctx.path_similarity();
                (score >= threshold && score < 100).then(|| {
                    SimilarityVerdict::similar(score, format!("Similar page paths ({}% match)", score))
                })
            }
            ClassificationRule::WeightedComposite => {
                let domain_score: u32 = if ctx.same_base_host() { 100 } else { 0 };
                let weighted = DOMAIN_WEIGHT * domain_score
                    + PATH_WEIGHT * ctx.path_similarity() as u32
                    + TITLE_WEIGHT * ctx.title_similarity() as u32;
                // weights sum to 100, so this is round_half_up(weighted / 100)
                let score = ((weighted + 50) / 100) as u8;

                if score >= threshold {
                    Some(SimilarityVerdict::similar(
                        score,
                        format!("{}% overall similarity", score),
                    ))
                } else {
                    Some(SimilarityVerdict::not_similar(score))
                }
            }
        }
    }
}

/// Run the ordered rule chain over a pre-parsed pair
pub fn classify_parsed(ctx: &PairContext<'_>, threshold: u8) -> SimilarityVerdict {
    ClassificationRule::ORDER
        .iter()
        .find_map(|rule| rule.evaluate(ctx, threshold))
        .unwrap_or_else(|| SimilarityVerdict::not_similar(0))
}

/// Decide whether two tabs are near-duplicates
///
/// A tab whose URL cannot be parsed is never similar to anything.
pub fn classify(first: &TabRecord, second: &TabRecord, threshold: u8) -> SimilarityVerdict {
    let (first_url, second_url) = match (
        url_normalizer::parse(&first.url),
        url_normalizer::parse(&second.url),
    ) {
        (Ok(a), Ok(b)) => (a, b),
        _ => return SimilarityVerdict::not_similar(0),
    };

    classify_parsed(
        &PairContext::new(first, &first_url, second, &second_url),
        threshold,
    )
}

/// Classifier bound to a fixed threshold
#[derive(Debug, Clone, Copy)]
pub struct TabClassifier {
    threshold: u8,
}

impl TabClassifier {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn classify(&self, first: &TabRecord, second: &TabRecord) -> SimilarityVerdict {
        classify(first, second, self.threshold)
    }
}

impl Default for TabClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
