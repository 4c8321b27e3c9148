//! Errors raised while compiling route patterns.
//!
//! Only registration can fail. Failing to match a URL is an ordinary outcome and is reported
//! through `Option` or `router::non_match::NonMatch` instead.

use thiserror::Error;

/// Reasons a pattern string is rejected by the pattern compiler.
///
/// A rejected pattern is never added to the `Router`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    /// Two placeholders in the same pattern share a name, e.g. `/a/<id>/b/<int:id>`.
    #[error("capture name `{0}` is used more than once in the pattern")]
    DuplicateCapture(String),

    /// A `<path:name>` placeholder appears before the final segment of the pattern.
    #[error("path capture `{0}` must be the last segment of the pattern")]
    MisplacedPathCapture(String),
}

/// An implementation of the single-parameter Result pattern for pattern compilation.
pub type Result<T> = ::std::result::Result<T, PatternError>;
