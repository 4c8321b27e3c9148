//! Defines the compiled `Pattern` a route is matched with.
//!
//! Pattern strings follow this grammar:
//!
//! ```plain
//! pattern  := [scheme "://"] path
//! path     := segment ("/" segment)*
//! segment  := literal | "<" ["int:"|"path:"] name ">"
//! ```

pub mod segment;

use std::collections::HashSet;
use std::fmt::{self, Display};
use std::str::FromStr;

use log::trace;

use crate::error::{PatternError, Result};
use crate::helpers::url::path::UrlPathSegments;
use crate::helpers::url::split_scheme;
use crate::router::pattern::segment::{SegmentMapping, SegmentMatcher};
use crate::router::values::Value;

/// A compiled route pattern.
///
/// Created once when a route is registered and immutable afterwards.
///
/// # Examples
///
/// ```rust
/// use navigator::router::pattern::Pattern;
///
/// let pattern = Pattern::compile("myapp://user/<int:id>").unwrap();
/// assert_eq!(pattern.scheme(), Some("myapp"));
/// assert_eq!(pattern.segments().len(), 2);
///
/// let segments = vec!["user".to_owned(), "42".to_owned()];
/// let captured = pattern.match_segments(&segments).unwrap();
/// assert_eq!(captured["id"].as_int(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    scheme: Option<String>,
    segments: Vec<SegmentMatcher>,
}

impl Pattern {
    /// Compiles a pattern string.
    ///
    /// The text before the first `://`, if any, is the scheme the pattern requires. The rest is
    /// split on `/` with leading and trailing slashes ignored, and each token is classified by
    /// `SegmentMatcher::parse`.
    ///
    /// Fails if a `<path:name>` placeholder is not the final segment, or if two placeholders
    /// share a name.
    pub fn compile(source: &str) -> Result<Pattern> {
        trace!("compiling pattern `{}`", source);

        let (scheme, path) = split_scheme(source);

        let segments: Vec<SegmentMatcher> = UrlPathSegments::new(path)
            .segments()
            .iter()
            .map(|token| SegmentMatcher::parse(token))
            .collect();

        let mut names = HashSet::new();
        for (i, segment) in segments.iter().enumerate() {
            if let Some(name) = segment.name() {
                if segment.is_path() && i + 1 != segments.len() {
                    trace!("path capture `{}` is not last in `{}`", name, source);
                    return Err(PatternError::MisplacedPathCapture(name.to_owned()));
                }

                if !names.insert(name) {
                    trace!("capture `{}` repeated in `{}`", name, source);
                    return Err(PatternError::DuplicateCapture(name.to_owned()));
                }
            }
        }

        Ok(Pattern {
            source: source.to_owned(),
            scheme: scheme.map(String::from),
            segments,
        })
    }

    /// Assigns `scheme` to a pattern that was compiled without one. An empty `scheme` leaves the
    /// pattern matching any scheme.
    pub(crate) fn or_scheme(mut self, scheme: &str) -> Pattern {
        if self.scheme.is_none() && !scheme.is_empty() {
            trace!("assigning scheme `{}` to `{}`", scheme, self.source);
            self.scheme = Some(scheme.to_owned());
        }
        self
    }

    /// The pattern string this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The scheme this pattern requires, or `None` if it matches any scheme.
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// The compiled segments, in order.
    pub fn segments(&self) -> &[SegmentMatcher] {
        &self.segments
    }

    /// True if URLs with `scheme` are considered by this pattern at all.
    pub fn accepts_scheme(&self, scheme: &str) -> bool {
        match self.scheme {
            Some(ref s) => s == scheme,
            None => true,
        }
    }

    /// Walks the compiled segments against URL path segments, pairwise.
    ///
    /// Returns the captured values when every segment matches and no URL segment is left over,
    /// otherwise `None`. A trailing `<path:name>` absorbs all remaining URL segments, including
    /// none.
    pub fn match_segments(&self, segments: &[String]) -> Option<SegmentMapping> {
        let mut sm = SegmentMapping::new();
        let mut rest = segments;

        for matcher in &self.segments {
            match *matcher {
                SegmentMatcher::Path { ref name } => {
                    trace!("path capture `{}` takes {} segment(s)", name, rest.len());
                    sm.insert(name.clone(), Value::Str(rest.join("/")));
                    return Some(sm);
                }
                SegmentMatcher::Literal(ref text) => match rest.split_first() {
                    Some((s, xs)) if s == text => rest = xs,
                    _ => return None,
                },
                SegmentMatcher::Capture { ref name, kind } => {
                    let (s, xs) = rest.split_first()?;
                    let value = kind.convert(s)?;
                    sm.insert(name.clone(), value);
                    rest = xs;
                }
            }
        }

        if rest.is_empty() {
            Some(sm)
        } else {
            trace!("{} url segment(s) left over", rest.len());
            None
        }
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Pattern> {
        Pattern::compile(s)
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::router::pattern::segment::CaptureKind;

    fn segs(path: &str) -> Vec<String> {
        UrlPathSegments::new(path).into_segments()
    }

    #[test]
    fn compiles_scheme_and_segments() {
        let p = Pattern::compile("myapp://user/<int:id>").unwrap();
        assert_eq!(p.scheme(), Some("myapp"));
        assert_eq!(
            p.segments(),
            &[
                SegmentMatcher::Literal("user".to_owned()),
                SegmentMatcher::Capture {
                    name: "id".to_owned(),
                    kind: CaptureKind::Int,
                },
            ]
        );

        let p = Pattern::compile("/post/<title>/").unwrap();
        assert_eq!(p.scheme(), None);
        assert_eq!(p.segments().len(), 2);

        let p = Pattern::compile("http://<path:_>").unwrap();
        assert_eq!(p.scheme(), Some("http"));
        assert!(p.segments()[0].is_path());

        let p = Pattern::compile("myapp://").unwrap();
        assert!(p.segments().is_empty());
    }

    #[test]
    fn rejects_misplaced_path_capture() {
        assert_eq!(
            Pattern::compile("myapp://<path:rest>/tail"),
            Err(PatternError::MisplacedPathCapture("rest".to_owned()))
        );
    }

    #[test]
    fn rejects_duplicate_captures() {
        assert_eq!(
            Pattern::compile("/a/<id>/b/<int:id>"),
            Err(PatternError::DuplicateCapture("id".to_owned()))
        );
        assert_eq!(
            Pattern::compile("/a/<id>/<path:id>"),
            Err(PatternError::DuplicateCapture("id".to_owned()))
        );
    }

    #[test]
    fn repeated_literals_are_fine() {
        assert!(Pattern::compile("/a/a/<x>/a").is_ok());
    }

    #[test]
    fn matches_int_captures() {
        let p = Pattern::compile("myapp://user/<int:id>").unwrap();
        let sm = p.match_segments(&segs("user/1")).unwrap();
        assert_eq!(sm["id"], Value::Int(1));

        assert!(p.match_segments(&segs("user/")).is_none());
        assert!(p.match_segments(&segs("user/awesome")).is_none());
        assert!(p.match_segments(&segs("user/1/extra")).is_none());
        assert!(p.match_segments(&segs("users/1")).is_none());
    }

    #[test]
    fn string_captures_do_not_coerce() {
        let p = Pattern::compile("myapp://post/<title>").unwrap();
        let sm = p.match_segments(&segs("post/123")).unwrap();
        assert_eq!(sm["title"], Value::Str("123".to_owned()));

        let sm = p.match_segments(&segs("post/hello-world")).unwrap();
        assert_eq!(sm["title"], Value::Str("hello-world".to_owned()));

        assert!(p.match_segments(&segs("post")).is_none());
    }

    #[test]
    fn literals_are_case_sensitive() {
        let p = Pattern::compile("myapp://search").unwrap();
        assert!(p.match_segments(&segs("search")).is_some());
        assert!(p.match_segments(&segs("Search")).is_none());
    }

    #[test]
    fn path_capture_takes_zero_or_more_segments() {
        let p = Pattern::compile("http://<path:_>").unwrap();
        assert_eq!(p.match_segments(&segs("")).unwrap()["_"], Value::from(""));
        assert_eq!(
            p.match_segments(&segs("xoul.kr")).unwrap()["_"],
            Value::from("xoul.kr")
        );
        assert_eq!(
            p.match_segments(&segs("google.com/search/")).unwrap()["_"],
            Value::from("google.com/search")
        );

        let p = Pattern::compile("myapp://files/<path:file>").unwrap();
        assert_eq!(
            p.match_segments(&segs("files")).unwrap()["file"],
            Value::from("")
        );
        assert_eq!(
            p.match_segments(&segs("files/a/b.txt")).unwrap()["file"],
            Value::from("a/b.txt")
        );
        assert!(p.match_segments(&segs("other/a")).is_none());
    }

    #[test]
    fn accepts_scheme() {
        let p = Pattern::compile("myapp://ping").unwrap();
        assert!(p.accepts_scheme("myapp"));
        assert!(!p.accepts_scheme("http"));

        let p = Pattern::compile("/ping").unwrap();
        assert!(p.accepts_scheme("anything"));
        assert!(p.accepts_scheme(""));

        let p = Pattern::compile("/ping").unwrap().or_scheme("myapp");
        assert_eq!(p.scheme(), Some("myapp"));
        assert!(!p.accepts_scheme("http"));

        let p = Pattern::compile("/ping").unwrap().or_scheme("");
        assert_eq!(p.scheme(), None);

        let p = Pattern::compile("http://x").unwrap().or_scheme("myapp");
        assert_eq!(p.scheme(), Some("http"));
    }

    #[test]
    fn parses_from_str() {
        let p: Pattern = "myapp://post/<title>".parse().unwrap();
        assert_eq!(p.to_string(), "myapp://post/<title>");
        assert_eq!(p.as_str(), "myapp://post/<title>");
    }
}
