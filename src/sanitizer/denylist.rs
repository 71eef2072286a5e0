//! Substring denylists checked against the lowercased URL.

use url::Url;

use super::{RejectReason, UrlRule};

const DANGEROUS_SCHEMES: &[&str] = &[
    "javascript:",
    "data:",
    "vbscript:",
    "file:",
    "ftp:",
    "ws:",
    "wss:",
    "about:",
    "blob:",
    "magnet:",
];

const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "malware", "virus", "trojan", "phishing", "hack", "crack", "keygen", "warez", "pirate",
    "torrent", "exploit", "payload", "attack",
];

fn first_match(needles: &[String], lowered: &str) -> Option<String> {
    needles.iter().find(|n| lowered.contains(n.as_str())).cloned()
}

fn lowercase_all(needles: Vec<&str>) -> Vec<String> {
    needles.into_iter().map(str::to_lowercase).collect()
}

/// Rejects URLs that mention a dangerous pseudo-scheme anywhere, e.g. a
/// `javascript:` payload smuggled into a query string.
///
/// # Example
///
/// ```
/// use energy_directory::{SchemeDenylist, UrlPolicy};
///
/// let policy = UrlPolicy::new().with_rule(SchemeDenylist::default());
/// assert_eq!(policy.sanitize("https://example.com/?go=javascript:void(0)"), "#");
/// ```
pub struct SchemeDenylist {
    schemes: Vec<String>,
}

impl SchemeDenylist {
    /// Create a denylist from scheme markers such as `"javascript:"`.
    pub fn new(schemes: Vec<&str>) -> Self {
        Self {
            schemes: lowercase_all(schemes),
        }
    }
}

impl Default for SchemeDenylist {
    fn default() -> Self {
        Self::new(DANGEROUS_SCHEMES.to_vec())
    }
}

impl UrlRule for SchemeDenylist {
    fn check(&self, _url: &Url, lowered: &str) -> Option<RejectReason> {
        first_match(&self.schemes, lowered).map(RejectReason::DangerousScheme)
    }
}

/// Rejects URLs containing a suspicious keyword anywhere.
pub struct KeywordDenylist {
    keywords: Vec<String>,
}

impl KeywordDenylist {
    /// Create a denylist from keywords, matched case-insensitively.
    pub fn new(keywords: Vec<&str>) -> Self {
        Self {
            keywords: lowercase_all(keywords),
        }
    }
}

impl Default for KeywordDenylist {
    fn default() -> Self {
        Self::new(SUSPICIOUS_KEYWORDS.to_vec())
    }
}

impl UrlRule for KeywordDenylist {
    fn check(&self, _url: &Url, lowered: &str) -> Option<RejectReason> {
        first_match(&self.keywords, lowered).map(RejectReason::Keyword)
    }
}
