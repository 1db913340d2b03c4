//! Duplicate Detector for open browser tabs
//!
//! Finds exact duplicate and near-duplicate tabs in a snapshot supplied by
//! the host and recommends which ones are redundant. Nothing here performs
//! I/O, keeps state between calls or closes tabs.
//!
//! # Pipeline
//! - [`url_normalizer`]: URL parsing and canonical forms
//! - [`document_identity`]: stable ids for known document platforms
//! - [`similarity`]: edit-distance string similarity (0 - 100)
//! - [`classifier`]: ordered first-match-wins pair heuristics
//! - [`analyzer`]: grouping, pairwise pass and ranking

pub mod url_normalizer;
pub mod document_identity;
pub mod similarity;
pub mod tracking;
pub mod scheme_filter;
pub mod classifier;
pub mod analyzer;
pub mod config;

pub use analyzer::{analyze, TabAnalyzer};
pub use classifier::{classify, ClassificationRule, PairContext, TabClassifier};
pub use config::{AnalyzerConfig, DEFAULT_THRESHOLD, MAX_COMPARISON_POOL};
pub use similarity::{edit_distance, similarity};
pub use url_normalizer::{normalize_base, normalize_full, ParsedUrl, UrlParseError};

// Re-export commonly used types
pub use tab_dedup_core::*;
