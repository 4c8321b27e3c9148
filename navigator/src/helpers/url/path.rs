//! Defines helper functions for processing the URL path

/// Holder for URL path segments that have been split into individual segments.
///
/// Used by the `Router` when walking compiled patterns, and by the pattern compiler to
/// tokenize the path portion of a pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct UrlPathSegments {
    segments: Vec<String>,
}

impl UrlPathSegments {
    /// Creates a new `UrlPathSegments` instance by splitting a URL path.
    ///
    /// Empty segments produced by leading or trailing slashes are skipped, while empty
    /// segments in the interior of the path are kept. So, a path of `/some/path//to/` will be
    /// split into segments:
    ///
    /// ```plain
    /// ["some", "path", "", "to"]
    /// ```
    ///
    /// An empty path yields no segments at all.
    pub fn new(path: &str) -> Self {
        let trimmed = path.trim_matches('/');

        let segments = if trimmed.is_empty() {
            vec![]
        } else {
            trimmed.split('/').map(String::from).collect()
        };

        UrlPathSegments { segments }
    }

    /// Provides the segments, in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub(crate) fn into_segments(self) -> Vec<String> {
        self.segments
    }
}
