//! Link classification and resolution
//!
//! Counting and verification deliberately disagree about trivial hrefs:
//! an empty or fragment-only href is *counted* as internal, but never
//! *probed*. This mirrors the analyzer's established behavior; callers must
//! use [`classify_href`] for counting and [`should_probe`] for verification.

use url::{ParseError, Url};

/// Whether a counted link points at the page's own host or elsewhere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkScope {
    Internal,
    External,
}

/// Classifies a raw href against the page's base URL
///
/// Internal: empty or fragment-only hrefs, absolute paths, relative
/// references, and absolute URLs whose host matches the base (or that have
/// no host at all, e.g. `mailto:`). External: URLs on a different host.
/// Hrefs that are malformed beyond parsing are classified external rather
/// than failing the crawl.
pub fn classify_href(href: &str, base: &Url) -> LinkScope {
    if href.is_empty() || href.starts_with('#') {
        return LinkScope::Internal;
    }

    if href.starts_with('/') {
        return LinkScope::Internal;
    }

    match Url::parse(href) {
        Ok(parsed) => match parsed.host_str() {
            None => LinkScope::Internal,
            Some(host) => {
                if Some(host) == base.host_str() {
                    LinkScope::Internal
                } else {
                    LinkScope::External
                }
            }
        },
        // A relative reference has no host component
        Err(ParseError::RelativeUrlWithoutBase) => LinkScope::Internal,
        Err(_) => LinkScope::External,
    }
}

/// Returns true if a raw href is worth a liveness probe
///
/// Empty, fragment-only, `mailto:`, and `tel:` hrefs are skipped.
pub fn should_probe(href: &str) -> bool {
    !(href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:"))
}

/// Resolves a raw href to an absolute URL string
///
/// Already-absolute `http`/`https` hrefs pass through unchanged; everything
/// else is joined against the base URL. Returns None when the reference
/// cannot be resolved, dropping it from verification silently.
pub fn resolve_href(href: &str, base: &Url) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }

    base.join(href).ok().map(|resolved| resolved.to_string())
}
