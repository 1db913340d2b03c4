//! Marketing and analytics query parameters
//!
//! These keys describe how a visitor arrived at a page, not which page it is,
//! so they are ignored when deciding whether two URLs point at the same page.

use std::collections::BTreeMap;

/// Known tracking parameter names (lower-case)
pub const TRACKING_PARAMETERS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "utm_id",
    "fbclid",
    "gclid",
    "gclsrc",
    "dclid",
    "msclkid",
    "yclid",
    "twclid",
    "igshid",
    "mc_cid",
    "mc_eid",
    "_ga",
    "_gl",
    "_hsenc",
    "_hsmi",
    "mkt_tok",
    "ref",
];

/// Case-insensitive membership test
pub fn is_tracking_parameter(key: &str) -> bool {
    TRACKING_PARAMETERS
        .iter()
        .any(|p| p.eq_ignore_ascii_case(key))
}

/// Copy of `query` without tracking parameters
pub fn without_tracking(query: &BTreeMap<String, String>) -> BTreeMap<&str, &str> {
    query
        .iter()
        .filter(|(k, _)| !is_tracking_parameter(k))
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}
