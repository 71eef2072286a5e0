//! URL sanitizer pipeline for untrusted links in source data.
//!
//! Every candidate URL is trimmed, given an `https://` prefix when it lacks
//! an `http(s)://` one, parsed, and then run through an ordered list of
//! [`UrlRule`]s collected in a [`UrlPolicy`]. The first rule that objects
//! rejects the URL.
//!
//! Built-in rules:
//!
//! - [`SchemeDenylist`] -- dangerous pseudo-schemes anywhere in the URL.
//! - [`KeywordDenylist`] -- suspicious keywords anywhere in the URL.
//! - [`ExtensionRule`] -- executable/archive extensions at the end of the path.

mod denylist;
mod extension;

pub use denylist::{KeywordDenylist, SchemeDenylist};
pub use extension::ExtensionRule;

use url::Url;

/// Placeholder stored in place of a missing or unsafe URL.
pub const SENTINEL: &str = "#";

/// Why a URL was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("not a valid URL")]
    Unparseable,
    #[error("scheme {0:?} is not allowed")]
    Scheme(String),
    #[error("contains dangerous scheme {0:?}")]
    DangerousScheme(String),
    #[error("contains suspicious keyword {0:?}")]
    Keyword(String),
    #[error("path ends with blocked extension {0:?}")]
    Extension(String),
}

/// Result of validating one candidate URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UrlVerdict {
    /// The normalized URL passed every rule.
    Safe(String),
    /// The input was empty or whitespace-only.
    Empty,
    /// The input was present but failed validation.
    Rejected(RejectReason),
}

impl UrlVerdict {
    /// The safe URL, or [`SENTINEL`] for anything else.
    pub fn into_url(self) -> String {
        match self {
            UrlVerdict::Safe(url) => url,
            UrlVerdict::Empty | UrlVerdict::Rejected(_) => SENTINEL.to_string(),
        }
    }

    /// Returns `true` for [`UrlVerdict::Safe`].
    pub fn is_safe(&self) -> bool {
        matches!(self, UrlVerdict::Safe(_))
    }

    /// Returns `true` if a present URL failed validation. Empty input is not a rejection.
    pub fn is_rejected(&self) -> bool {
        matches!(self, UrlVerdict::Rejected(_))
    }
}

/// A single check applied to a normalized, parsed URL.
///
/// `lowered` is the formatted URL string in lowercase, for substring
/// checks. Implementations must be `Send + Sync` so a policy can live
/// inside a shared fetcher.
pub trait UrlRule: Send + Sync {
    /// Return `Some(reason)` to reject the URL.
    fn check(&self, url: &Url, lowered: &str) -> Option<RejectReason>;
}

/// An ordered chain of [`UrlRule`]s.
///
/// [`UrlPolicy::default`] carries the standard scheme, keyword and
/// extension rules. [`UrlPolicy::new`] starts empty, which still enforces
/// the `http`/`https` scheme and URL syntax.
///
/// ```
/// use energy_directory::UrlPolicy;
///
/// let policy = UrlPolicy::default();
/// assert_eq!(policy.sanitize("example.com/about"), "https://example.com/about");
/// assert_eq!(policy.sanitize("javascript:alert(1)"), "#");
/// assert_eq!(policy.sanitize("https://example.com/setup.exe"), "#");
/// ```
pub struct UrlPolicy {
    rules: Vec<Box<dyn UrlRule>>,
}

impl UrlPolicy {
    /// Create a policy with no extra rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The default rules with [`ExtensionRule::strict`] in place of the
    /// standard extension list.
    pub fn strict() -> Self {
        Self::new()
            .with_rule(SchemeDenylist::default())
            .with_rule(KeywordDenylist::default())
            .with_rule(ExtensionRule::strict())
    }

    /// Append a rule to the end of the chain.
    pub fn add(&mut self, rule: impl UrlRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// Builder-style [`add`](Self::add).
    pub fn with_rule(mut self, rule: impl UrlRule + 'static) -> Self {
        self.add(rule);
        self
    }

    /// Returns `true` if no rules have been added.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Validate and normalize a candidate URL. Never panics.
    pub fn validate(&self, raw: &str) -> UrlVerdict {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return UrlVerdict::Empty;
        }

        let formatted = format_url(trimmed);
        let parsed = match Url::parse(&formatted) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(url = raw, error = %e, "Invalid URL");
                return UrlVerdict::Rejected(RejectReason::Unparseable);
            }
        };

        if !matches!(parsed.scheme(), "http" | "https") {
            let reason = RejectReason::Scheme(parsed.scheme().to_string());
            tracing::warn!(url = raw, %reason, "Potentially unsafe URL blocked");
            return UrlVerdict::Rejected(reason);
        }

        let lowered = formatted.to_lowercase();
        for rule in &self.rules {
            if let Some(reason) = rule.check(&parsed, &lowered) {
                tracing::warn!(url = raw, %reason, "Potentially unsafe URL blocked");
                return UrlVerdict::Rejected(reason);
            }
        }

        UrlVerdict::Safe(formatted)
    }

    /// Validate a candidate URL, returning it normalized or [`SENTINEL`].
    pub fn sanitize(&self, raw: &str) -> String {
        self.validate(raw).into_url()
    }
}

impl Default for UrlPolicy {
    fn default() -> Self {
        Self::new()
            .with_rule(SchemeDenylist::default())
            .with_rule(KeywordDenylist::default())
            .with_rule(ExtensionRule::standard())
    }
}

/// Validate a URL with the default policy, returning it or [`SENTINEL`].
pub fn validate_url(raw: &str) -> String {
    UrlPolicy::default().sanitize(raw)
}

/// Prefix `https://` unless the input already starts with `http://` or
/// `https://` (in any case).
fn format_url(trimmed: &str) -> String {
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}
