//! Normalization of user supplied scheme strings.

use crate::helpers::url::split_scheme;

/// Reduces `raw` to a bare scheme token.
///
/// Only the text before the first `://` is kept; anything after it is discarded, however many
/// further separators it contains. Trailing `:` characters are trimmed from what remains.
/// Normalizing an already normalized scheme is a no-op.
///
/// ```rust
/// use navigator::helpers::url::scheme::normalize;
///
/// assert_eq!(normalize("myapp"), "myapp");
/// assert_eq!(normalize("myapp:"), "myapp");
/// assert_eq!(normalize("myapp://"), "myapp");
/// assert_eq!(normalize("myapp://://://123123"), "myapp");
/// ```
pub fn normalize(raw: &str) -> String {
    let scheme = match split_scheme(raw) {
        (Some(scheme), _) => scheme,
        (None, s) => s,
    };

    scheme.trim_end_matches(':').to_owned()
}
