//! Regex-based check for executable and archive downloads.

use regex::Regex;
use url::Url;

use super::{RejectReason, UrlRule};

const STANDARD_EXTENSIONS: &[&str] = &[
    "exe", "bat", "cmd", "msi", "vbs", "js", "jar", "dll", "sh", "app", "dmg", "apk", "deb", "rpm",
];

const STRICT_EXTRA_EXTENSIONS: &[&str] = &["bin", "php"];

/// Rule that rejects URLs whose path ends with a blocked file extension.
///
/// Only the parsed path is inspected, so a host such as `my.app` is not
/// mistaken for a download, while `/setup.exe?v=2` still is.
///
/// # Example
///
/// ```
/// use energy_directory::{ExtensionRule, UrlPolicy};
///
/// let policy = UrlPolicy::new().with_rule(ExtensionRule::standard());
/// assert_eq!(policy.sanitize("https://example.com/setup.EXE"), "#");
/// assert_eq!(policy.sanitize("https://example.com/setup.html"), "https://example.com/setup.html");
/// ```
pub struct ExtensionRule {
    pattern: Regex,
}

impl ExtensionRule {
    /// Create a rule from bare extensions (without the leading dot).
    ///
    /// # Panics
    ///
    /// Panics if the combined pattern exceeds the regex size limit, which
    /// cannot happen for any realistic extension list.
    pub fn new(extensions: &[&str]) -> Self {
        let alternation = extensions
            .iter()
            .map(|ext| regex::escape(&ext.to_lowercase()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"\.(?:{alternation})$"))
            .expect("invalid extension pattern");
        Self { pattern }
    }

    /// Executables, scripts and installer packages.
    pub fn standard() -> Self {
        Self::new(STANDARD_EXTENSIONS)
    }

    /// [`standard`](Self::standard) plus raw binaries and server scripts.
    pub fn strict() -> Self {
        let extensions: Vec<&str> = STANDARD_EXTENSIONS
            .iter()
            .chain(STRICT_EXTRA_EXTENSIONS)
            .copied()
            .collect();
        Self::new(&extensions)
    }
}

impl UrlRule for ExtensionRule {
    fn check(&self, url: &Url, _lowered: &str) -> Option<RejectReason> {
        let path = url.path().to_lowercase();
        self.pattern
            .find(&path)
            .map(|m| RejectReason::Extension(m.as_str().to_string()))
    }
}
