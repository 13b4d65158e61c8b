//! String format grammars: e-mail addresses and absolute URLs.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("BUG: invalid EMAIL_RE regex literal")
});

static URL_SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):(.+)$").expect("BUG: invalid URL_SCHEME_RE regex literal")
});

/// Schemes that only make sense with an authority component (`scheme://host`).
const HIERARCHICAL_SCHEMES: &[&str] = &["http", "https", "ftp", "ws", "wss"];

/// Local part may not start with a dot or contain consecutive dots; the regex
/// covers the character classes and the domain.
pub fn is_valid_email(s: &str) -> bool {
    if s.starts_with('.') || s.contains("..") {
        return false;
    }
    EMAIL_RE.is_match(s)
}

pub fn is_valid_url(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some(caps) = URL_SCHEME_RE.captures(s) else {
        return false;
    };
    let scheme = caps[1].to_ascii_lowercase();
    let rest = &caps[2];

    if !HIERARCHICAL_SCHEMES.contains(&scheme.as_str()) {
        return true;
    }

    let Some(authority_and_path) = rest.strip_prefix("//") else {
        return false;
    };
    let authority = authority_and_path
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host_and_port = authority.rsplit('@').next().unwrap_or_default();
    let host = if host_and_port.starts_with('[') {
        // IPv6 literal: keep the bracketed part.
        host_and_port.split(']').next().unwrap_or_default()
    } else {
        host_and_port.split(':').next().unwrap_or_default()
    };
    !host.is_empty()
}
