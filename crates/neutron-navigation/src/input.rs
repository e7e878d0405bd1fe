//! Input resolution for the address bar
//!
//! First matching rule wins:
//! 1. Empty or whitespace-only input → nothing to load
//! 2. Qualified `http`/`https` URL → unchanged
//! 3. Contains whitespace → search
//! 4. Single token of letters, digits and dashes → `https://www.<input>.com`
//! 5. `localhost[:port]` or anything with a dot → `https://<input>`
//! 6. Everything else → search

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::NavigationError;
use crate::Result;

/// Address of the internal new-tab page.
pub const NEW_TAB_URL: &str = "about:blank";

pub const DEFAULT_SEARCH_PREFIX: &str = "https://www.google.com/search?q=";

/// Characters `encodeURIComponent` leaves alone: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Result of resolving address bar input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "lowercase")]
pub enum InputResolution {
    /// Navigate to a URL
    Navigate(String),
    /// Perform a search
    Search(String),
    /// Nothing to load
    Empty,
}

impl InputResolution {
    /// The URL to load, or an empty string when there is nothing to load.
    pub fn into_url(self) -> String {
        match self {
            InputResolution::Navigate(url) | InputResolution::Search(url) => url,
            InputResolution::Empty => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, InputResolution::Empty)
    }
}

#[derive(Debug, Clone)]
pub struct InputResolver {
    /// Search prefix; the encoded query is appended, or substituted for `%s` if present
    search_prefix: String,
}

impl InputResolver {
    pub fn new() -> Self {
        Self {
            search_prefix: DEFAULT_SEARCH_PREFIX.to_string(),
        }
    }

    pub fn with_search_prefix(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        Self::validate_prefix(&prefix)?;
        Ok(Self {
            search_prefix: prefix,
        })
    }

    pub fn set_search_prefix(&mut self, prefix: impl Into<String>) -> Result<()> {
        let prefix = prefix.into();
        Self::validate_prefix(&prefix)?;
        tracing::debug!(prefix = %prefix, "Search prefix changed");
        self.search_prefix = prefix;
        Ok(())
    }

    pub fn search_prefix(&self) -> &str {
        &self.search_prefix
    }

    /// Resolve user input into an action
    pub fn resolve(&self, input: &str) -> InputResolution {
        if input.trim().is_empty() {
            return InputResolution::Empty;
        }

        if Self::is_qualified_url(input) {
            return InputResolution::Navigate(input.to_string());
        }

        if input.chars().any(char::is_whitespace) {
            return InputResolution::Search(self.build_search_url(input));
        }

        if Self::is_bare_name(input) {
            return InputResolution::Navigate(format!("https://www.{}.com", input));
        }

        if Self::looks_like_host(input) {
            return InputResolution::Navigate(format!("https://{}", input));
        }

        InputResolution::Search(self.build_search_url(input))
    }

    /// Resolve input straight to a loadable URL; empty when there is nothing to load.
    pub fn format(&self, input: &str) -> String {
        self.resolve(input).into_url()
    }

    fn is_qualified_url(input: &str) -> bool {
        Url::parse(input)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false)
    }

    fn is_bare_name(input: &str) -> bool {
        input
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
    }

    fn looks_like_host(input: &str) -> bool {
        input.contains('.') || Self::is_localhost(input)
    }

    /// `localhost` or `localhost:<port>`, optionally followed by a path, query or fragment.
    fn is_localhost(input: &str) -> bool {
        let host = input
            .split(|c| matches!(c, '/' | '?' | '#'))
            .next()
            .unwrap_or(input);

        match host.strip_prefix("localhost") {
            Some("") => true,
            Some(rest) => rest
                .strip_prefix(':')
                .map(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
                .unwrap_or(false),
            None => false,
        }
    }

    fn build_search_url(&self, query: &str) -> String {
        let encoded = utf8_percent_encode(query, QUERY_COMPONENT).to_string();
        if self.search_prefix.contains("%s") {
            self.search_prefix.replace("%s", &encoded)
        } else {
            format!("{}{}", self.search_prefix, encoded)
        }
    }

    fn validate_prefix(prefix: &str) -> Result<()> {
        match Url::parse(&prefix.replace("%s", "")) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            _ => {
                tracing::warn!(prefix = %prefix, "Rejected search prefix");
                Err(NavigationError::InvalidSearchPrefix(prefix.to_string()))
            }
        }
    }
}

impl Default for InputResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn free-form address bar text into a loadable URL using the default search prefix.
///
/// Returns an empty string for blank input; callers must not navigate in that case.
pub fn format_url(input: &str) -> String {
    InputResolver::new().format(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_urls_unchanged() {
        assert_eq!(format_url("https://x.com/page"), "https://x.com/page");
        assert_eq!(format_url("http://example.com"), "http://example.com");
        assert_eq!(
            format_url("https://example.com/a?b=c#d"),
            "https://example.com/a?b=c#d"
        );
    }

    #[test]
    fn test_bare_name_guess() {
        assert_eq!(format_url("netflix"), "https://www.netflix.com");
        assert_eq!(format_url("my-site"), "https://www.my-site.com");
    }

    #[test]
    fn test_surrounding_whitespace_is_searched() {
        assert_eq!(
            format_url(" netflix"),
            format!("{}%20netflix", DEFAULT_SEARCH_PREFIX)
        );
        assert_eq!(
            format_url("hello "),
            format!("{}hello%20", DEFAULT_SEARCH_PREFIX)
        );
    }

    #[test]
    fn test_domain_like() {
        assert_eq!(format_url("openai.com"), "https://openai.com");
        assert_eq!(format_url("docs.rs/url"), "https://docs.rs/url");
        assert_eq!(format_url("192.168.1.1"), "https://192.168.1.1");
        assert_eq!(format_url("localhost:8080"), "https://localhost:8080");
        assert_eq!(format_url("localhost:3000/api"), "https://localhost:3000/api");
    }

    #[test]
    fn test_search() {
        assert_eq!(
            format_url("hello world"),
            format!("{}hello%20world", DEFAULT_SEARCH_PREFIX)
        );
        assert_eq!(
            format_url("what's new?"),
            format!("{}what's%20new%3F", DEFAULT_SEARCH_PREFIX)
        );
        // Neither a bare name nor host-like
        assert_eq!(
            format_url("c++"),
            format!("{}c%2B%2B", DEFAULT_SEARCH_PREFIX)
        );
        assert_eq!(
            format_url("localhost:abc"),
            format!("{}localhost%3Aabc", DEFAULT_SEARCH_PREFIX)
        );
    }

    #[test]
    fn test_non_web_schemes_are_searched() {
        match InputResolver::new().resolve("about:blank") {
            InputResolution::Search(url) => assert!(url.ends_with("about%3Ablank")),
            other => panic!("Expected Search, got {:?}", other),
        }
    }

    #[test]
    fn test_search_encodes_utf8() {
        assert_eq!(
            format_url("café au lait"),
            format!("{}caf%C3%A9%20au%20lait", DEFAULT_SEARCH_PREFIX)
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(format_url(""), "");
        assert_eq!(format_url("   "), "");
        assert!(InputResolver::new().resolve("\t").is_empty());
    }

    #[test]
    fn test_resolution_kind() {
        let resolver = InputResolver::new();

        match resolver.resolve("rust programming") {
            InputResolution::Search(url) => {
                assert!(url.contains("google.com"));
                assert!(url.contains("rust%20programming"));
            }
            _ => panic!("Expected Search"),
        }

        match resolver.resolve("example.com") {
            InputResolution::Navigate(url) => assert_eq!(url, "https://example.com"),
            _ => panic!("Expected Navigate"),
        }
    }

    #[test]
    fn test_custom_search_prefix() {
        let resolver = InputResolver::with_search_prefix("https://duckduckgo.com/?q=").unwrap();
        assert_eq!(resolver.format("a b"), "https://duckduckgo.com/?q=a%20b");

        let template = InputResolver::with_search_prefix("https://search.example/?q=%s&ia=web")
            .unwrap();
        assert_eq!(template.format("a b"), "https://search.example/?q=a%20b&ia=web");
    }

    #[test]
    fn test_invalid_search_prefix() {
        assert!(InputResolver::with_search_prefix("not a url").is_err());
        assert!(InputResolver::with_search_prefix("ftp://files.example/?q=").is_err());

        let mut resolver = InputResolver::new();
        assert!(resolver.set_search_prefix("").is_err());
        assert_eq!(resolver.search_prefix(), DEFAULT_SEARCH_PREFIX);
    }
}
