//! URL parsing and canonical forms
//!
//! Two tabs are exact duplicates when their [`normalize_full`] forms are
//! equal: same scheme, host (ignoring a leading `www.`), port, path (ignoring
//! trailing slashes) and query parameters (ignoring order). Fragments never
//! take part in the canonical form.

use std::collections::BTreeMap;
use thiserror::Error;
use url::{form_urlencoded, Url};

/// Error produced when a tab URL cannot be parsed
#[derive(Debug, Error)]
pub enum UrlParseError {
    #[error("Empty URL")]
    Empty,

    #[error("Invalid URL {url}: {source}")]
    Invalid {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Structured view of a URL, recomputed for every comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub scheme: String,
    /// Lower-cased, empty for host-less URLs
    pub host: String,
    /// Only non-default ports are kept
    pub port: Option<u16>,
    /// Trailing slashes stripped, never empty
    pub path: String,
    /// Decoded parameters, the last occurrence of a repeated key wins
    pub query: BTreeMap<String, String>,
    pub fragment: Option<String>,
}

impl ParsedUrl {
    /// Host with a single leading `www.` label removed
    pub fn base_host(&self) -> &str {
        strip_www(&self.host)
    }

    /// `scheme://host[:port]path` with the host's `www.` removed
    pub fn base_form(&self) -> String {
        let mut out = format!("{}://{}", self.scheme, self.base_host());
        if let Some(port) = self.port {
            out.push_str(&format!(":{}", port));
        }
        out.push_str(&self.path);
        out
    }

    /// Base form plus the query sorted by key
    pub fn full_form(&self) -> String {
        let mut out = self.base_form();
        if !self.query.is_empty() {
            out.push('?');
            out.push_str(&serialize_query(&self.query));
        }
        out
    }
}

/// Parse a URL string into its components
pub fn parse(input: &str) -> Result<ParsedUrl, UrlParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlParseError::Empty);
    }

    let url = Url::parse(input).map_err(|source| UrlParseError::Invalid {
        url: input.to_string(),
        source,
    })?;

    let host = url.host_str().unwrap_or("").to_lowercase();

    let trimmed = url.path().trim_end_matches('/');
    let path = if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    };

    let query = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect::<BTreeMap<_, _>>();

    let fragment = url
        .fragment()
        .filter(|f| !f.is_empty())
        .map(str::to_string);

    Ok(ParsedUrl {
        scheme: url.scheme().to_string(),
        host,
        port: url.port(),
        path,
        query,
        fragment,
    })
}

/// Canonical form used for exact-duplicate grouping, `None` if unparseable
pub fn normalize_full(input: &str) -> Option<String> {
    parse(input).ok().map(|parsed| parsed.full_form())
}

/// Canonical form without the query string, `None` if unparseable
pub fn normalize_base(input: &str) -> Option<String> {
    parse(input).ok().map(|parsed| parsed.base_form())
}

/// Remove one leading `www.` label
pub fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

fn serialize_query(query: &BTreeMap<String, String>) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query.iter())
        .finish()
}
