//! Helpers for splitting a raw URL string into the pieces the `Router` matches on.

pub mod path;
pub mod query_string;
pub mod scheme;

use log::trace;
use percent_encoding::percent_decode_str;

use crate::helpers::url::path::UrlPathSegments;
use crate::helpers::url::query_string::QueryStringMapping;

const SCHEME_SEPARATOR: &str = "://";

/// Represents data that has been successfully percent decoded and is valid UTF-8
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct PercentDecoded {
    val: String,
}

impl PercentDecoded {
    /// Attempt to decode data that has been provided in a percent encoded format and ensure that
    /// the result is valid UTF-8.
    ///
    /// Unlike form decoding, a `+` is kept as a literal `+`.
    pub fn new(raw: &str) -> Option<Self> {
        match percent_decode_str(raw).decode_utf8() {
            Ok(pd) => {
                trace!("percent_decode: {}, src: {}", pd, raw);
                Some(PercentDecoded {
                    val: pd.into_owned(),
                })
            }
            Err(_) => {
                trace!("percent_decode: error, src: {}", raw);
                None
            }
        }
    }

    /// Consumes the wrapper, yielding the decoded `String`.
    pub fn into_string(self) -> String {
        self.val
    }
}

impl AsRef<str> for PercentDecoded {
    fn as_ref(&self) -> &str {
        &self.val
    }
}

/// A URL taken apart into scheme, path segments and query parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct UrlParts {
    scheme: String,
    segments: UrlPathSegments,
    query: QueryStringMapping,
}

impl UrlParts {
    /// The scheme of the URL, or the default scheme for scheme-relative URLs.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The non-empty path segments, in order. The host of an absolute URL is the first segment.
    pub fn segments(&self) -> &[String] {
        self.segments.segments()
    }

    /// The query parameters of the URL.
    pub fn query(&self) -> &QueryStringMapping {
        &self.query
    }

    /// Splits into owned parts.
    pub fn into_parts(self) -> (String, Vec<String>, QueryStringMapping) {
        (self.scheme, self.segments.into_segments(), self.query)
    }
}

/// Splits `url` into its scheme, path segments and query parameters.
///
/// When `url` carries no `://` separator it is treated as scheme-relative and
/// `default_scheme` (which may be empty) is used. A `#fragment` suffix is ignored.
///
/// ```rust
/// use navigator::helpers::url::split;
///
/// let parts = split("myapp://search/?query=Hello#top", "");
/// assert_eq!(parts.scheme(), "myapp");
/// assert_eq!(parts.segments(), ["search"]);
/// assert_eq!(parts.query().get("query").map(String::as_str), Some("Hello"));
///
/// let parts = split("/user/1", "myapp");
/// assert_eq!(parts.scheme(), "myapp");
/// assert_eq!(parts.segments(), ["user", "1"]);
/// ```
pub fn split(url: &str, default_scheme: &str) -> UrlParts {
    let (scheme, rest) = split_scheme(url);
    let scheme = scheme.unwrap_or(default_scheme);

    let rest = match rest.find('#') {
        Some(n) => &rest[..n],
        None => rest,
    };

    let (path, query) = match rest.find('?') {
        Some(n) => (&rest[..n], Some(&rest[n + 1..])),
        None => (rest, None),
    };

    trace!(
        "split url `{}`: scheme `{}`, path `{}`, query `{:?}`",
        url,
        scheme,
        path,
        query
    );

    UrlParts {
        scheme: scheme.to_owned(),
        segments: UrlPathSegments::new(path),
        query: query_string::split(query),
    }
}

/// Provides the query parameters of `url`, ignoring everything else.
///
/// Useful to factories which receive the raw URL alongside the matched values.
pub fn query_parameters(url: &str) -> QueryStringMapping {
    split(url, "").query
}

/// Separates an explicit scheme from the remainder of `s`, splitting at the first `://`.
pub(crate) fn split_scheme(s: &str) -> (Option<&str>, &str) {
    match s.find(SCHEME_SEPARATOR) {
        Some(n) => (Some(&s[..n]), &s[n + SCHEME_SEPARATOR.len()..]),
        None => (None, s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_valid_percent_decode() {
        let pd = PercentDecoded::new("%41+%42%2B%63%20%64").unwrap();
        assert_eq!("A+B+c d", pd.as_ref());
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert!(PercentDecoded::new("%ff%fe").is_none());
    }

    #[test]
    fn splits_absolute_urls() {
        let parts = split("http://google.com/search/?q=URLNavigator", "myapp");
        assert_eq!(parts.scheme(), "http");
        assert_eq!(parts.segments(), ["google.com", "search"]);
        assert_eq!(parts.query().get("q").unwrap(), "URLNavigator");

        let parts = split("http://", "");
        assert_eq!(parts.scheme(), "http");
        assert!(parts.segments().is_empty());
        assert!(parts.query().is_empty());
    }

    #[test]
    fn trailing_slash_does_not_change_segments() {
        let with = split("http://google.com/search/?q=x", "");
        let without = split("http://google.com/search?q=x", "");
        assert_eq!(with, without);
    }

    #[test]
    fn scheme_relative_urls_use_default_scheme() {
        let parts = split("/post/hello-world", "myapp");
        assert_eq!(parts.scheme(), "myapp");
        assert_eq!(parts.segments(), ["post", "hello-world"]);

        let parts = split("/post/hello-world", "");
        assert_eq!(parts.scheme(), "");
    }

    #[test]
    fn only_first_separator_splits_scheme() {
        let parts = split("myapp://a://b", "");
        assert_eq!(parts.scheme(), "myapp");
        assert_eq!(parts.segments(), ["a:", "", "b"]);
    }

    #[test]
    fn query_marker_edge_cases() {
        assert!(split("myapp://search", "").query().is_empty());
        assert!(split("myapp://search?", "").query().is_empty());
        assert!(split("myapp://search?query", "").query().is_empty());

        let parts = split("myapp://search?query=", "");
        assert_eq!(parts.query().get("query").unwrap(), "");
        assert_eq!(parts.segments(), ["search"]);
    }

    #[test]
    fn fragment_is_ignored() {
        let parts = split("myapp://post/1?a=b#comments", "");
        assert_eq!(parts.segments(), ["post", "1"]);
        assert_eq!(parts.query().get("a").unwrap(), "b");
        assert_eq!(parts.query().len(), 1);
    }

    #[test]
    fn empty_query_key_is_a_parameter() {
        let parts = split("myapp://search?=x&query=", "");
        assert_eq!(parts.query().get("").map(String::as_str), Some("x"));
        assert_eq!(parts.query().get("query").map(String::as_str), Some(""));
    }

    #[test]
    fn query_parameters_helper() {
        let q = query_parameters("myapp://search?query=Hello%20World&page=2");
        assert_eq!(q.get("query").unwrap(), "Hello World");
        assert_eq!(q.get("page").unwrap(), "2");
    }
}
