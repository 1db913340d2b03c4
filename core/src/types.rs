//! Data model shared between the detection engine and its host.
//!
//! Every value here lives for the duration of a single analysis call. Nothing
//! is cached or identified across calls.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque tab identifier supplied by the host
///
/// Browsers hand out integer tab ids while other hosts use strings, so both
/// shapes are accepted on input and normalized to a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawTabId", into = "String")]
pub struct TabId(pub String);

impl TabId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TabId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TabId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for TabId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<TabId> for String {
    fn from(value: TabId) -> Self {
        value.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTabId {
    Number(i64),
    Text(String),
}

impl From<RawTabId> for TabId {
    fn from(raw: RawTabId) -> Self {
        match raw {
            RawTabId::Number(n) => TabId::from(n),
            RawTabId::Text(s) => TabId(s),
        }
    }
}

/// A tab as reported by the host tab-management API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabRecord {
    pub id: TabId,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Carried through for the presentation layer, never inspected
    #[serde(default, alias = "favIconUrl")]
    pub favicon: Option<String>,
}

impl TabRecord {
    pub fn new(id: impl Into<TabId>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            title: None,
            favicon: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Title if present and not empty
    pub fn non_empty_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}

/// Document platforms recognised by the identity extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformType {
    Doc,
    Sheet,
    Slides,
}

impl PlatformType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformType::Doc => "doc",
            PlatformType::Sheet => "sheet",
            PlatformType::Slides => "slides",
        }
    }
}

impl fmt::Display for PlatformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable logical document behind a URL on a known document platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentIdentity {
    pub platform_type: PlatformType,
    pub document_id: String,
}

impl DocumentIdentity {
    /// Grouping key, e.g. `gdoc:doc:ABC123`
    pub fn key(&self) -> String {
        format!("gdoc:{}:{}", self.platform_type, self.document_id)
    }
}

/// Outcome of comparing two tabs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityVerdict {
    pub is_similar: bool,
    /// 0 - 100
    pub score: u8,
    /// Present iff `is_similar`
    pub reason: Option<String>,
}

impl SimilarityVerdict {
    pub fn similar(score: u8, reason: impl Into<String>) -> Self {
        Self {
            is_similar: true,
            score,
            reason: Some(reason.into()),
        }
    }

    pub fn not_similar(score: u8) -> Self {
        Self {
            is_similar: false,
            score,
            reason: None,
        }
    }
}

/// Which grouping pass produced a duplicate group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    NormalizedUrl,
    DocumentIdentity,
}

/// Tabs that are exact duplicates of each other
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Normalized URL or document identity key
    pub key: String,
    pub kind: GroupKind,
    pub tabs: Vec<TabRecord>,
    pub count: usize,
}

impl DuplicateGroup {
    pub fn new(key: impl Into<String>, kind: GroupKind, tabs: Vec<TabRecord>) -> Self {
        let count = tabs.len();
        Self {
            key: key.into(),
            kind,
            tabs,
            count,
        }
    }

    /// Members other than the first, i.e. the ones a cleanup would close
    pub fn redundant_tabs(&self) -> &[TabRecord] {
        self.tabs.get(1..).unwrap_or(&[])
    }
}

/// Two tabs judged near-duplicates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarPair {
    pub a: TabRecord,
    pub b: TabRecord,
    pub score: u8,
    pub reason: String,
}

/// Result of one analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub duplicate_groups: Vec<DuplicateGroup>,
    /// Sorted by score descending, ties in encounter order
    pub similar_pairs: Vec<SimilarPair>,
    /// Sum of `count - 1` over all groups
    pub total_duplicate_tab_count: usize,
    pub total_similar_pair_count: usize,
    /// Comparable tabs left out of the pairwise pass by the pool cap
    #[serde(default)]
    pub uncompared_tab_count: usize,
}

impl AnalysisResult {
    pub fn is_empty(&self) -> bool {
        self.duplicate_groups.is_empty() && self.similar_pairs.is_empty()
    }

    /// Ids of every tab that would be closed if each group kept its first member
    pub fn redundant_tab_ids(&self) -> Vec<TabId> {
        self.duplicate_groups
            .iter()
            .flat_map(|g| g.redundant_tabs().iter().map(|t| t.id.clone()))
            .collect()
    }
}
