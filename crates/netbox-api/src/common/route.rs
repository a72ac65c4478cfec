//! URL and route helpers
//!
//! A route is a path relative to the API root, e.g. `dcim/devices/`.
//! NetBox expects collection and object URLs to end with a slash.

use reqwest::Url;

/// Scheme used when the base URL does not carry one
pub const DEFAULT_SCHEME: &str = "http";

/// Normalize an API base URL.
///
/// The result always carries a scheme (`http://` when none was given) and
/// ends with exactly one slash. Normalizing twice yields the same value.
///
/// ```
/// use netbox_api::common::route::normalize_base_url;
///
/// assert_eq!(normalize_base_url("netbox.local/api"), "http://netbox.local/api/");
/// assert_eq!(normalize_base_url("https://netbox.local/api//"), "https://netbox.local/api/");
/// ```
pub fn normalize_base_url(url: &str) -> String {
    let url = url.trim();
    let (scheme, rest) = match url.split_once("://") {
        Some((scheme, rest)) if is_scheme(scheme) => (scheme, rest),
        _ => (DEFAULT_SCHEME, url),
    };
    format!("{}://{}/", scheme, rest.trim_end_matches('/'))
}

/// RFC 3986 scheme: a letter followed by letters, digits, `+`, `-` or `.`
fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Route of a model collection, e.g. `("dcim", "devices")` -> `dcim/devices/`
///
/// Empty segments are skipped, so the route never starts with a slash.
pub fn build_model_route(app: &str, model: &str) -> String {
    [app, model]
        .iter()
        .map(|segment| segment.trim_matches('/'))
        .filter(|segment| !segment.is_empty())
        .map(|segment| format!("{segment}/"))
        .collect()
}

/// Resolve a route against a normalized base URL.
///
/// Absolute URLs (as returned in NetBox pagination links) pass through unchanged.
pub fn join(base_url: &str, route: &str) -> String {
    if is_absolute(route) {
        route.to_string()
    } else {
        format!("{}{}", base_url, route.trim_start_matches('/'))
    }
}

fn is_absolute(route: &str) -> bool {
    route.starts_with("http://") || route.starts_with("https://")
}

/// Resolve a server-provided link (e.g. a pagination `next` URL) so it
/// stays on the origin of `base_url`.
///
/// An absolute link pointing at another scheme, host or port keeps only its
/// path and query, moved onto the base origin. Returns `None` when either
/// URL cannot be parsed.
pub fn rebase_link(base_url: &str, link: &str) -> Option<String> {
    if !is_absolute(link) {
        return Some(join(base_url, link));
    }
    let base = Url::parse(base_url).ok()?;
    let link = Url::parse(link).ok()?;
    if base.origin() == link.origin() {
        return Some(link.into());
    }
    let mut rebased = base;
    rebased.set_path(link.path());
    rebased.set_query(link.query());
    Some(rebased.into())
}

/// Build query string from filters
pub fn build_query_string(filters: &[(&str, &str)]) -> String {
    filters
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Append a query string to a URL, respecting any query it already has
pub fn with_query(url: &str, filters: &[(&str, &str)]) -> String {
    if filters.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, build_query_string(filters))
}
