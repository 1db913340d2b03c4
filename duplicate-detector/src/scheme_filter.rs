//! Filter for browser-internal and extension pages
//!
//! Settings pages, new-tab pages and extension UIs are never duplicates
//! worth reporting, so they are dropped before any comparison.

use tab_dedup_core::TabRecord;

/// URL prefixes of internal browser pages (lower-case)
pub const EXCLUDED_SCHEMES: &[&str] = &[
    "chrome:",
    "chrome-extension:",
    "chrome-search:",
    "chrome-untrusted:",
    "edge:",
    "brave:",
    "opera:",
    "vivaldi:",
    "about:",
    "moz-extension:",
    "devtools:",
    "view-source:",
];

/// Check if a URL points at a browser-internal page
pub fn is_internal_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    EXCLUDED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}

/// Check if a tab takes part in analysis at all
pub fn is_analyzable(tab: &TabRecord) -> bool {
    !tab.url.trim().is_empty() && !is_internal_url(&tab.url)
}

/// Keep analyzable tabs, preserving input order
pub fn filter_tabs(tabs: &[TabRecord]) -> Vec<&TabRecord> {
    tabs.iter().filter(|tab| is_analyzable(tab)).collect()
}
