//! Defines `SegmentMatcher` for `Pattern`.
use std::collections::HashMap;
use std::fmt::{self, Display};

use crate::router::values::Value;

/// Mapping of capture names to the values captured for them while walking a pattern.
pub type SegmentMapping = HashMap<String, Value>;

/// The type a `<kind:name>` placeholder converts its segment into.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CaptureKind {
    /// `<name>`: any non-empty segment, captured verbatim.
    String,
    /// `<int:name>`: a non-empty segment that fully parses as a base-10 `i64`.
    Int,
}

impl CaptureKind {
    /// Converts `segment` into a `Value`, or `None` if it cannot be represented as this kind.
    pub fn convert(self, segment: &str) -> Option<Value> {
        if segment.is_empty() {
            return None;
        }

        match self {
            CaptureKind::String => Some(Value::Str(segment.to_owned())),
            CaptureKind::Int => segment.parse::<i64>().ok().map(Value::Int),
        }
    }
}

/// Indicates how a single token of a pattern is matched against URL path segments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SegmentMatcher {
    /// Is matched exactly (string equality, no case folding) to the corresponding URL segment.
    ///
    /// Unlike all other variants, nothing is captured for this segment.
    Literal(String),

    /// Matches a single non-empty URL segment that converts to the given `CaptureKind`.
    Capture {
        /// Name the converted value is stored under.
        name: String,
        /// Conversion applied to the segment.
        kind: CaptureKind,
    },

    /// Matches all remaining URL segments, including none at all, and captures them joined
    /// with `/`. Only valid as the final segment of a pattern.
    Path {
        /// Name the joined segments are stored under.
        name: String,
    },
}

impl SegmentMatcher {
    /// Classifies a single pattern token.
    ///
    /// `<name>` is a string capture, `<int:name>` an integer capture and `<path:name>` a path
    /// capture. Any other token, including malformed placeholders such as `<>` or `<float:x>`,
    /// is a literal.
    pub fn parse(token: &str) -> Self {
        let inner = match token
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
        {
            Some(inner) if is_name(inner) => {
                return SegmentMatcher::Capture {
                    name: inner.to_owned(),
                    kind: CaptureKind::String,
                }
            }
            Some(inner) => inner,
            None => return SegmentMatcher::Literal(token.to_owned()),
        };

        match inner.split_once(':') {
            Some(("int", name)) if is_name(name) => SegmentMatcher::Capture {
                name: name.to_owned(),
                kind: CaptureKind::Int,
            },
            Some(("path", name)) if is_name(name) => SegmentMatcher::Path {
                name: name.to_owned(),
            },
            _ => SegmentMatcher::Literal(token.to_owned()),
        }
    }

    /// Provides the capture name, if this segment captures anything.
    pub fn name(&self) -> Option<&str> {
        match *self {
            SegmentMatcher::Literal(_) => None,
            SegmentMatcher::Capture { ref name, .. } | SegmentMatcher::Path { ref name } => {
                Some(name.as_str())
            }
        }
    }

    /// True for the `Path` variant.
    pub fn is_path(&self) -> bool {
        matches!(*self, SegmentMatcher::Path { .. })
    }
}

impl Display for SegmentMatcher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SegmentMatcher::Literal(ref text) => f.write_str(text),
            SegmentMatcher::Capture {
                ref name,
                kind: CaptureKind::String,
            } => write!(f, "<{}>", name),
            SegmentMatcher::Capture {
                ref name,
                kind: CaptureKind::Int,
            } => write!(f, "<int:{}>", name),
            SegmentMatcher::Path { ref name } => write!(f, "<path:{}>", name),
        }
    }
}

// A placeholder name is non-empty and cannot itself contain placeholder syntax.
fn is_name(s: &str) -> bool {
    !s.is_empty() && !s.contains(|c: char| c == '<' || c == '>' || c == ':')
}
