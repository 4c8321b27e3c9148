//! Defines the `Router` and supporting types.

pub mod builder;
pub mod dispatch;
pub mod non_match;
pub mod pattern;
pub mod route;
pub mod values;

use std::fmt;

use log::{debug, trace};
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::extractor::ExtractorError;
use crate::helpers::url::{self as url_parts, scheme};
use crate::router::pattern::Pattern;
use crate::router::route::{Action, Route};
use crate::router::values::Values;
use crate::state::UserInfo;

/// Registry of routes, matched in the order they were registered.
///
/// Each route pairs a compiled `Pattern` with an `Action`. When a URL is matched, routes are
/// tried from the first registered to the last, and the **first** route whose pattern matches
/// wins. There is no "most specific match" ranking: a catch-all such as `http://<path:_>`
/// registered before `http://example.com/about` will shadow it. Register specific patterns
/// before general ones.
///
/// A default scheme can be set with `set_scheme`. Patterns registered afterwards without a
/// scheme of their own (`/user/<int:id>`) require that scheme, and URLs without a scheme
/// (`/user/1`) are matched as if they carried it.
///
/// `T` is the type produced by `Action::Factory` routes.
///
/// # Examples
///
/// ```rust
/// use navigator::router::Router;
///
/// let mut router: Router<String> = Router::new();
/// router.set_scheme("myapp://");
///
/// router
///     .map_factory("/post/<title>", |_url, values, _info| {
///         values.get_str("title").map(String::from)
///     })
///     .unwrap();
/// router.map_open("/ping", |_url, _values| true).unwrap();
///
/// assert_eq!(
///     router.dispatch_factory("myapp://post/hello-world", None),
///     Some("hello-world".to_owned())
/// );
/// assert_eq!(
///     router.dispatch_factory("/post/hello-world", None),
///     Some("hello-world".to_owned())
/// );
/// assert!(router.dispatch_open("/ping"));
/// assert!(!router.dispatch_open("/post/hello-world"));
/// ```
pub struct Router<T> {
    scheme: String,
    routes: Vec<Route<T>>,
}

impl<T> Router<T> {
    /// Creates an empty `Router` with no default scheme.
    pub fn new() -> Self {
        trace!("creating new router");
        Router {
            scheme: String::new(),
            routes: vec![],
        }
    }

    /// Creates an empty `Router` with the given default scheme, normalized as by `set_scheme`.
    pub fn with_scheme(raw: &str) -> Self {
        let mut router = Router::new();
        router.set_scheme(raw);
        router
    }

    /// Sets the default scheme, after normalizing it with `helpers::url::scheme::normalize`.
    ///
    /// The scheme applies to routes registered after this call and to all subsequent lookups
    /// of URLs that carry no scheme.
    pub fn set_scheme(&mut self, raw: &str) {
        self.scheme = scheme::normalize(raw);
        debug!("default scheme set to `{}` from `{}`", self.scheme, raw);
    }

    /// The current default scheme; empty if none was set.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Compiles `pattern` and appends it with `action` to the registry.
    ///
    /// A pattern without a scheme is bound to the current default scheme, if there is one.
    /// Otherwise it matches URLs of any scheme.
    ///
    /// On error nothing is registered.
    pub fn register(&mut self, pattern: &str, action: Action<T>) -> Result<()> {
        let pattern = Pattern::compile(pattern)?.or_scheme(&self.scheme);
        debug!(
            "registering route #{} `{}` ({:?})",
            self.routes.len(),
            pattern,
            action
        );
        self.routes.push(Route::new(pattern, action));
        Ok(())
    }

    /// Registers an `Action::Factory` route.
    pub fn map_factory<F>(&mut self, pattern: &str, f: F) -> Result<()>
    where
        F: Fn(&str, &Values, Option<&UserInfo>) -> Option<T> + Send + Sync + 'static,
    {
        self.register(pattern, Action::factory(f))
    }

    /// Registers an `Action::Open` route.
    pub fn map_open<F>(&mut self, pattern: &str, f: F) -> Result<()>
    where
        F: Fn(&str, &Values) -> bool + Send + Sync + 'static,
    {
        self.register(pattern, Action::open(f))
    }

    /// Finds the first registered route matching `url`.
    ///
    /// The URL is split with the current default scheme. Only routes whose pattern accepts the
    /// URL's scheme are considered. The returned values hold the URL's query parameters
    /// overlaid with the pattern's captures.
    pub fn match_url<'a>(&'a self, url: &str) -> Option<RouteMatch<'a, T>> {
        let parts = url_parts::split(url, &self.scheme);

        for (i, route) in self.routes.iter().enumerate() {
            let pattern = route.pattern();
            if !pattern.accepts_scheme(parts.scheme()) {
                continue;
            }

            trace!("trying route #{} `{}` for `{}`", i, pattern, url);
            if let Some(captures) = pattern.match_segments(parts.segments()) {
                debug!("`{}` matched route #{} `{}`", url, i, pattern);
                let (_, _, query) = parts.into_parts();
                return Some(RouteMatch {
                    route,
                    url: url.to_owned(),
                    values: Values::combine(query, captures),
                });
            }
        }

        trace!("no route matched `{}`", url);
        None
    }

    /// The registered routes, in registration order.
    pub fn routes(&self) -> &[Route<T>] {
        &self.routes
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Router::new()
    }
}

impl<T> fmt::Debug for Router<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Router")
            .field("scheme", &self.scheme)
            .field(
                "routes",
                &self.routes.iter().map(|r| r.pattern().as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// The outcome of a successful `Router::match_url`.
pub struct RouteMatch<'a, T> {
    route: &'a Route<T>,
    url: String,
    values: Values,
}

impl<'a, T> RouteMatch<'a, T> {
    /// The route that matched.
    pub fn route(&self) -> &'a Route<T> {
        self.route
    }

    /// The matched route's action.
    pub fn action(&self) -> &'a Action<T> {
        self.route.action()
    }

    /// The URL as it was passed in.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Captured values overlaid on the query parameters.
    pub fn values(&self) -> &Values {
        &self.values
    }

    /// Deserializes the values into `V`. See the `extractor` module.
    pub fn extract<V>(&self) -> ::std::result::Result<V, ExtractorError>
    where
        V: DeserializeOwned,
    {
        self.values.extract()
    }
}

impl<'a, T> fmt::Debug for RouteMatch<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("pattern", &self.route.pattern().as_str())
            .field("url", &self.url)
            .field("values", &self.values)
            .finish()
    }
}
