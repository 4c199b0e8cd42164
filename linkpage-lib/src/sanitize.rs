//! URL normalization. Sanitizing never fails; deciding whether the result is a
//! usable URL is left to [`is_valid_url`] and the schema rules.

use url::Url;

/// Trim and make a URL absolute by prefixing `https://` when no http scheme is present.
///
/// Empty or whitespace-only input yields an empty string. The result is not parsed.
pub fn sanitize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Parse the sanitized form of `url`, keeping only http and https URLs
fn parse_http_url(url: &str) -> Option<Url> {
    let parsed = Url::parse(&sanitize_url(url)).ok()?;
    matches!(parsed.scheme(), "http" | "https").then_some(parsed)
}

/// Strict format check: the value must resolve to an http(s) URL. Empty input is invalid.
pub fn is_valid_url_format(url: &str) -> bool {
    parse_http_url(url).is_some()
}

/// Format check for optional URL fields: empty input means "no link" and is valid.
pub fn is_valid_url(url: &str) -> bool {
    if url.trim().is_empty() {
        return true;
    }
    is_valid_url_format(url)
}

/// Canonical href of a URL for display, or the raw input when it does not parse
pub fn format_url_for_display(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    match Url::parse(&sanitize_url(url)) {
        Ok(parsed) => parsed.to_string(),
        Err(_) => url.to_string(),
    }
}
