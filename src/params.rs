//! Percent decoding and query string parsing.
//!
//! Two decoders live here because two different things get decoded:
//!
//! - [`decode_component`] handles captured path parameters (`:username`,
//!   `*notFound`). It follows URI-component rules: `%XX` escapes only, `+`
//!   stays a plus, and malformed input is returned untouched.
//! - [`decode_uri`] handles query strings captured by a route. It decodes
//!   like [`decode_component`] but leaves escaped reserved characters
//!   (`%26`, `%3D`, ...) alone, so the result still parses as a query.
//! - [`QueryParams`] parses a raw query string into key/value pairs using
//!   form rules, so `+` also means space. Controllers that want structured
//!   access to the query string they were handed parse it with this type.
//!
//! # Example
//!
//! ```
//! use learners_router::{decode_component, QueryParams};
//!
//! assert_eq!(decode_component("j%C3%BCrgen"), "jürgen");
//!
//! let query = QueryParams::from_query_string("order_by=problems_attempted&page=2");
//! assert_eq!(query.get("order_by"), Some(&"problems_attempted".to_string()));
//! assert_eq!(query.get_as::<u32>("page"), Some(2));
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

/// Decode `%XX` escapes in a captured path parameter.
///
/// Returns the input borrowed when it holds no escapes. Input with a
/// truncated or non-hex escape, or escapes that do not form valid UTF-8, is
/// also returned unchanged.
#[must_use]
pub fn decode_component(raw: &str) -> Cow<'_, str> {
    decode_strict(raw, &[])
}

/// Decode `%XX` escapes in a query string, keeping reserved characters
/// escaped.
///
/// Escapes of `; / ? : @ & = + $ , #` survive as written, so `%26` and `%3D`
/// still separate nothing once decoded and [`QueryParams`] can parse the
/// result. Malformed input is returned unchanged, as with
/// [`decode_component`].
///
/// ```
/// use learners_router::decode_uri;
///
/// assert_eq!(decode_uri("q=a%20b"), "q=a b");
/// assert_eq!(decode_uri("q=a%26b%3Dc"), "q=a%26b%3Dc");
/// ```
#[must_use]
pub fn decode_uri(raw: &str) -> Cow<'_, str> {
    decode_strict(raw, URI_RESERVED)
}

const URI_RESERVED: &[u8] = b";/?:@&=+$,#";

fn decode_strict<'a>(raw: &'a str, reserved: &[u8]) -> Cow<'a, str> {
    if !raw.contains('%') {
        return Cow::Borrowed(raw);
    }
    match percent_decode(raw.as_bytes(), reserved) {
        Some(bytes) => match String::from_utf8(bytes) {
            Ok(decoded) => Cow::Owned(decoded),
            Err(_) => Cow::Borrowed(raw),
        },
        None => Cow::Borrowed(raw),
    }
}

/// Decode a query-string key or value, treating `+` as space.
///
/// A malformed escape keeps its `%` literally; the escapes around it still
/// decode.
fn decode_form_component(raw: &str) -> String {
    let input = raw.as_bytes();
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        match input[i] {
            b'%' => match escape_at(input, i) {
                Some(byte) => {
                    out.push(byte);
                    i += 3;
                }
                None => {
                    out.push(b'%');
                    i += 1;
                }
            },
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Decode every escape, failing on the first malformed one. Escapes that
/// decode to a byte in `reserved` are copied through untouched.
fn percent_decode(input: &[u8], reserved: &[u8]) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        if input[i] == b'%' {
            let byte = escape_at(input, i)?;
            if reserved.contains(&byte) {
                out.extend_from_slice(&input[i..i + 3]);
            } else {
                out.push(byte);
            }
            i += 3;
        } else {
            out.push(input[i]);
            i += 1;
        }
    }
    Some(out)
}

/// The byte encoded by the `%XX` escape starting at `i`.
fn escape_at(input: &[u8], i: usize) -> Option<u8> {
    let hi = hex_value(*input.get(i + 1)?)?;
    let lo = hex_value(*input.get(i + 2)?)?;
    Some((hi << 4) | lo)
}

const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

fn encode_form_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            b' ' => out.push_str("%20"),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters parsed from a fragment's query string.
///
/// Keys may repeat (`?course=a&course=b`); insertion order of values is kept
/// per key. A pair without `=` is stored with an empty value.
///
/// # Example
///
/// ```
/// use learners_router::QueryParams;
///
/// let query = QueryParams::from_query_string("text_search=some+user&ignore_segments=inactive&ignore_segments=unenrolled");
///
/// assert_eq!(query.get("text_search"), Some(&"some user".to_string()));
/// assert_eq!(query.get_all("ignore_segments").unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: HashMap<String, Vec<String>>,
}

impl QueryParams {
    /// Create empty query parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string (without the leading `?`).
    pub fn from_query_string(query: &str) -> Self {
        let mut params: HashMap<String, Vec<String>> = HashMap::new();

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            params
                .entry(decode_form_component(key))
                .or_default()
                .push(decode_form_component(value));
        }

        Self { params }
    }

    /// Get the first value for a key.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)?.first()
    }

    /// Get every value recorded for a key.
    pub fn get_all(&self, key: &str) -> Option<&Vec<String>> {
        self.params.get(key)
    }

    /// Get the first value for a key, parsed as `T`.
    ///
    /// Returns `None` if the key is missing or the value does not parse.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.get(key)?.parse().ok()
    }

    /// Append a value for `key`; existing values are kept.
    pub fn insert(&mut self, key: String, value: String) {
        self.params.entry(key).or_default().push(value);
    }

    /// Return `true` if the key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Serialize back into a query string, keys sorted for stable output.
    ///
    /// ```
    /// use learners_router::QueryParams;
    ///
    /// let mut query = QueryParams::new();
    /// query.insert("page".to_string(), "2".to_string());
    /// query.insert("order_by".to_string(), "username".to_string());
    /// assert_eq!(query.to_query_string(), "order_by=username&page=2");
    /// ```
    pub fn to_query_string(&self) -> String {
        let mut keys: Vec<&String> = self.params.keys().collect();
        keys.sort();

        keys.into_iter()
            .flat_map(|key| {
                self.params[key].iter().map(move |value| {
                    format!(
                        "{}={}",
                        encode_form_component(key),
                        encode_form_component(value)
                    )
                })
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Return the number of distinct keys.
    pub fn len(&self) -> usize {
        self.params.len()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_component_plain_is_borrowed() {
        assert!(matches!(decode_component("username"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_decode_component_escapes() {
        assert_eq!(decode_component("some%20user"), "some user");
        assert_eq!(decode_component("a%2Fb"), "a/b");
        assert_eq!(decode_component("a+b"), "a+b");
    }

    #[test]
    fn test_decode_component_malformed_kept() {
        assert_eq!(decode_component("100%"), "100%");
        assert_eq!(decode_component("%zz"), "%zz");
        assert_eq!(decode_component("%FF"), "%FF");
    }

    #[test]
    fn test_decode_uri_keeps_reserved_escapes() {
        assert_eq!(decode_uri("q=a%20b"), "q=a b");
        assert_eq!(decode_uri("q=a%26b%3Dc%2Fd"), "q=a%26b%3Dc%2Fd");
        assert_eq!(decode_uri("name=j%C3%BCrgen"), "name=jürgen");
        assert!(matches!(decode_uri("page=2"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_decode_uri_malformed_kept() {
        assert_eq!(decode_uri("q=100%"), "q=100%");
        assert_eq!(decode_uri("q=%20%zz"), "q=%20%zz");
    }

    #[test]
    fn test_form_decoding_keeps_only_bad_escape() {
        let query = QueryParams::from_query_string("a%40b%G1=x%20y%&k=100%25");
        assert_eq!(query.get("a@b%G1"), Some(&"x y%".to_string()));
        assert_eq!(query.get("k"), Some(&"100%".to_string()));
    }

    #[test]
    fn test_query_params_basic() {
        let query = QueryParams::from_query_string("text_search=some_username&page=3");

        assert_eq!(query.get("text_search"), Some(&"some_username".to_string()));
        assert_eq!(query.get_as::<u32>("page"), Some(3));
        assert_eq!(query.get("missing"), None);
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_query_params_form_decoding() {
        let query = QueryParams::from_query_string("q=jane+doe&email=a%40b.org&bad=%G1");

        assert_eq!(query.get("q"), Some(&"jane doe".to_string()));
        assert_eq!(query.get("email"), Some(&"a@b.org".to_string()));
        assert_eq!(query.get("bad"), Some(&"%G1".to_string()));
    }

    #[test]
    fn test_query_params_flag_without_value() {
        let query = QueryParams::from_query_string("active&&page=1");

        assert!(query.contains("active"));
        assert_eq!(query.get("active"), Some(&String::new()));
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_query_params_repeated_keys() {
        let query = QueryParams::from_query_string("segment=a&segment=b");

        assert_eq!(
            query.get_all("segment"),
            Some(&vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(query.get("segment"), Some(&"a".to_string()));
    }

    #[test]
    fn test_to_query_string_encodes() {
        let mut query = QueryParams::new();
        query.insert("text_search".to_string(), "jane doe".to_string());
        query.insert("email".to_string(), "a@b".to_string());

        assert_eq!(query.to_query_string(), "email=a%40b&text_search=jane%20doe");
    }

    #[test]
    fn test_empty_query_string() {
        assert!(QueryParams::from_query_string("").is_empty());
    }
}
