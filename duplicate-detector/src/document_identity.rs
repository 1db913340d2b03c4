//! Document identity extraction for multi-view document platforms
//!
//! Some platforms keep a stable document id in the path and append volatile
//! parts (`/edit`, `/view`, comment anchors, sharing tokens) around it. Tabs
//! on such a platform are matched by the extracted id instead of by URL.

use crate::url_normalizer;
use once_cell::sync::Lazy;
use regex::Regex;
use tab_dedup_core::{DocumentIdentity, PlatformType};

/// One row of the platform table, matched against `host + path`
#[derive(Debug, Clone, Copy)]
pub struct PlatformPattern {
    /// Must contain one capture group holding the document id
    pub pattern: &'static str,
    pub platform_type: PlatformType,
}

/// Known platforms, in match priority order
pub const PLATFORM_PATTERNS: &[PlatformPattern] = &[
    PlatformPattern {
        pattern: r"^docs\.google\.com/document/d/([A-Za-z0-9_-]+)",
        platform_type: PlatformType::Doc,
    },
    PlatformPattern {
        pattern: r"^docs\.google\.com/spreadsheets/d/([A-Za-z0-9_-]+)",
        platform_type: PlatformType::Sheet,
    },
    PlatformPattern {
        pattern: r"^docs\.google\.com/presentation/d/([A-Za-z0-9_-]+)",
        platform_type: PlatformType::Slides,
    },
];

static COMPILED_PATTERNS: Lazy<Vec<(Regex, PlatformType)>> = Lazy::new(|| {
    PLATFORM_PATTERNS
        .iter()
        .filter_map(|p| match Regex::new(p.pattern) {
            Ok(re) => Some((re, p.platform_type)),
            Err(e) => {
                tracing::error!("Invalid platform pattern {}: {}", p.pattern, e);
                None
            }
        })
        .collect()
});

/// Extract the document identity for a host and path, first match wins
pub fn extract(host: &str, path: &str) -> Option<DocumentIdentity> {
    let subject = format!("{}{}", host, path);

    COMPILED_PATTERNS.iter().find_map(|(re, platform_type)| {
        re.captures(&subject)
            .and_then(|caps| caps.get(1))
            .map(|id| DocumentIdentity {
                platform_type: *platform_type,
                document_id: id.as_str().to_string(),
            })
    })
}

/// Parse a URL and extract its document identity
pub fn extract_from_url(url: &str) -> Option<DocumentIdentity> {
    let parsed = url_normalizer::parse(url).ok()?;
    extract(&parsed.host, &parsed.path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(COMPILED_PATTERNS.len(), PLATFORM_PATTERNS.len());
    }

    #[test]
    fn test_extract_document() {
        let identity = extract("docs.google.com", "/document/d/ABC123/edit").unwrap();
        assert_eq!(identity.platform_type, PlatformType::Doc);
        assert_eq!(identity.document_id, "ABC123");
        assert_eq!(identity.key(), "gdoc:doc:ABC123");
    }

    #[test]
    fn test_extract_sheet_and_slides() {
        let sheet = extract_from_url("https://docs.google.com/spreadsheets/d/s_1-x/edit#gid=0").unwrap();
        assert_eq!(sheet.key(), "gdoc:sheet:s_1-x");

        let slides = extract_from_url("https://docs.google.com/presentation/d/P9/present").unwrap();
        assert_eq!(slides.key(), "gdoc:slides:P9");
    }

    #[test]
    fn test_view_modes_share_identity() {
        assert_eq!(
            extract_from_url("https://docs.google.com/document/d/ABC123/edit"),
            extract_from_url("https://docs.google.com/document/d/ABC123/view?usp=sharing"),
        );
    }

    #[test]
    fn test_non_platform_urls() {
        assert!(extract("example.com", "/document/d/ABC123").is_none());
        assert!(extract("docs.google.com", "/forms/d/ABC123").is_none());
        assert!(extract("docs.google.com", "/document/u/0").is_none());
        assert!(extract_from_url("not a url").is_none());
    }

    #[test]
    fn test_host_must_start_the_subject() {
        assert!(extract("evil.docs.google.com", "/document/d/ABC").is_none());
    }
}
