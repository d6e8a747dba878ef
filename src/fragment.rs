//! Fragment normalization.
//!
//! A fragment is whatever follows the application's root in the URL. Before
//! matching, it goes through the same cleanup the dashboard's browser router
//! applies:
//!
//! 1. **One** leading `#` or `/` is dropped (`"/"` and `""` are both the root).
//! 2. Everything from the next `#` on is dropped, so an in-page anchor never
//!    reaches a route (`"edx#top"` is `"edx"`).
//! 3. Trailing whitespace is dropped.
//!
//! Nothing else is touched: `"username/"` keeps its trailing slash because
//! routes decide whether they accept one, and `"//x"` keeps its second slash
//! and so lands on the not-found page.
//!
//! # Examples
//!
//! ```
//! use learners_router::{normalize_fragment, split_query};
//!
//! assert_eq!(normalize_fragment("/"), "");
//! assert_eq!(normalize_fragment("#edx/?page=2 "), "edx/?page=2");
//! assert_eq!(split_query("edx/?page=2"), ("edx/", Some("page=2")));
//! ```

use std::borrow::Cow;

/// Strip one leading `#` or `/`, any trailing `#anchor`, and trailing
/// whitespace.
///
/// Returns a borrowed slice; the input is never reallocated.
#[must_use]
pub fn normalize_fragment(fragment: &str) -> &str {
    let fragment = fragment
        .strip_prefix('#')
        .or_else(|| fragment.strip_prefix('/'))
        .unwrap_or(fragment);
    let fragment = fragment
        .split_once('#')
        .map_or(fragment, |(before, _)| before);
    fragment.trim_end()
}

/// Split a fragment at its first `?` into path and query string.
///
/// An empty query string (`"edx?"`) is reported as absent.
#[must_use]
pub fn split_query(fragment: &str) -> (&str, Option<&str>) {
    match fragment.split_once('?') {
        Some((path, query)) if !query.is_empty() => (path, Some(query)),
        Some((path, _)) => (path, None),
        None => (fragment, None),
    }
}

/// Normalize a base path so it starts and ends with exactly one `/`.
///
/// ```
/// use learners_router::normalize_root;
///
/// assert_eq!(normalize_root(""), "/");
/// assert_eq!(normalize_root("courses/demo/learners"), "/courses/demo/learners/");
/// assert_eq!(normalize_root("//learners//"), "/learners/");
/// ```
#[must_use]
pub fn normalize_root(root: &str) -> Cow<'_, str> {
    let trimmed = root.trim_matches('/');
    if trimmed.is_empty() {
        return Cow::Borrowed("/");
    }
    if root.len() == trimmed.len() + 2 && root.starts_with('/') && root.ends_with('/') {
        return Cow::Borrowed(root);
    }
    Cow::Owned(format!("/{}/", trimmed))
}

/// Remove `root` from the front of a URL path, returning the fragment.
///
/// `root` must already be normalized (see [`normalize_root`]). The root
/// without its trailing slash counts as the root itself, so both
/// `"/learners"` and `"/learners/"` yield `""`. Returns `None` when `path`
/// lives outside the root.
#[must_use]
pub fn strip_root<'a>(path: &'a str, root: &str) -> Option<&'a str> {
    if let Some(rest) = path.strip_prefix(root) {
        return Some(rest);
    }
    let bare_root = root.trim_end_matches('/');
    let rest = path.strip_prefix(bare_root)?;
    if rest.is_empty() || rest.starts_with('?') || rest.starts_with('#') {
        Some(rest)
    } else {
        None
    }
}

/// The path, query and fragment of a URL, without scheme and authority.
///
/// ```
/// use learners_router::fragment::url_path;
///
/// assert_eq!(url_path("https://insights.example.org/learners/edx?a=1"), "/learners/edx?a=1");
/// assert_eq!(url_path("https://insights.example.org"), "/");
/// assert_eq!(url_path("/learners/"), "/learners/");
/// ```
#[must_use]
pub fn url_path(url: &str) -> &str {
    let Some((_, after_scheme)) = url.split_once("://") else {
        return url;
    };
    match after_scheme.find(['/', '?', '#']) {
        Some(index) if after_scheme[index..].starts_with('/') => &after_scheme[index..],
        _ => "/",
    }
}
