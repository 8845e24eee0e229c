use crate::UrlError;
use url::Url;

/// Resolves an href found on a page to an absolute URL, or rejects it
///
/// Returns None for links the harvester should never follow:
/// - `javascript:`, `mailto:`, `tel:` schemes
/// - `data:` URIs
/// - fragment-only links (same page anchors)
/// - anything that is not HTTP(S) after resolution
pub fn resolve_reference(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base.join(href) {
        Ok(absolute) => {
            if absolute.scheme() == "http" || absolute.scheme() == "https" {
                Some(comparable_locator(absolute))
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

/// Reduces a URL to the comparable form used for visited-set identity
/// and sink natural keys
///
/// The url crate already lowercases the host during parsing, so this only
/// needs to strip the fragment and collapse trailing slashes. Query strings
/// are kept: eMuseum pagination is query-driven and stripping them would
/// collapse distinct list pages into one locator.
pub fn comparable_locator(mut url: Url) -> Url {
    url.set_fragment(None);

    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path.trim_end_matches('/').to_string();
        url.set_path(&trimmed);
    }

    url
}

/// Parses and normalizes a caller-supplied locator string (e.g. the
/// configured start URL)
pub fn parse_locator(s: &str) -> Result<Url, UrlError> {
    let url = Url::parse(s).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(comparable_locator(url))
}
