//! Tab strip labels derived from a tab's URL

use url::Url;

use crate::input::NEW_TAB_URL;

pub const NEW_TAB_TITLE: &str = "New Tab";

/// Hosts that get a fixed label instead of the derived one.
const FRIENDLY_NAMES: &[(&str, &str)] = &[
    ("wikipedia.org", "Wikipedia"),
    ("www.wikipedia.org", "Wikipedia"),
];

/// Derive a short tab label from a URL.
///
/// `https://www.github.com` becomes `Github`; the new-tab sentinel and
/// host-less URLs become `New Tab`; unparseable text is shown as typed.
pub fn display_title(url: &str) -> String {
    if url == NEW_TAB_URL {
        return NEW_TAB_TITLE.to_string();
    }

    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) if url.is_empty() => return NEW_TAB_TITLE.to_string(),
        Err(_) => return url.to_string(),
    };

    let host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => return NEW_TAB_TITLE.to_string(),
    };

    if let Some((_, name)) = FRIENDLY_NAMES.iter().find(|(h, _)| *h == host) {
        return (*name).to_string();
    }

    let name = host.strip_prefix("www.").unwrap_or(host);
    let name = name.strip_suffix(".com").filter(|n| !n.is_empty()).unwrap_or(name);

    capitalize(name)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel() {
        assert_eq!(display_title(NEW_TAB_URL), "New Tab");
    }

    #[test]
    fn test_derived_from_host() {
        assert_eq!(display_title("https://www.github.com"), "Github");
        assert_eq!(display_title("https://openai.com/research"), "Openai");
        assert_eq!(display_title("https://docs.rs/url"), "Docs.rs");
        assert_eq!(display_title("http://localhost:3000"), "Localhost");
    }

    #[test]
    fn test_friendly_names() {
        assert_eq!(display_title("https://www.wikipedia.org"), "Wikipedia");
        assert_eq!(display_title("https://wikipedia.org/wiki/Rust"), "Wikipedia");
        assert_eq!(display_title("https://en.wikipedia.org/wiki/Rust"), "En.wikipedia.org");
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(display_title(""), "New Tab");
        assert_eq!(display_title("not a url"), "not a url");
    }

    #[test]
    fn test_no_host() {
        assert_eq!(display_title("data:text/plain,hello"), "New Tab");
        assert_eq!(display_title("about:config"), "New Tab");
    }
}
