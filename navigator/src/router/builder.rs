//! Defines a builder API for constructing a `Router`.

use log::{debug, trace};

use crate::error::{PatternError, Result};
use crate::router::route::Action;
use crate::router::values::Values;
use crate::router::Router;
use crate::state::UserInfo;

/// Builds a `Router` using the provided closure. Routes are defined using the `RouterBuilder`
/// value passed to the closure, and the `Router` is constructed before returning.
///
/// Building stops at the first pattern which fails to compile, and that error is returned.
///
/// ```rust
/// use navigator::build_router;
/// use navigator::router::builder::DrawRoutes;
///
/// let router = build_router(|route| {
///     route.scheme("myapp");
///
///     route.scope("/user", |route| {
///         route
///             .map("/<int:id>")
///             .to_factory(|_url, values, _info| values.get_int("id").map(|id| id.to_string()));
///         route.map("/<name>").to_factory(|_url, values, _info| {
///             values.get_str("name").map(String::from)
///         });
///     });
///
///     route.map("/ping").to_open(|_url, _values| true);
/// })
/// .unwrap();
///
/// assert_eq!(router.dispatch_factory("/user/10", None), Some("10".to_owned()));
/// assert_eq!(router.dispatch_factory("myapp://user/bob", None), Some("bob".to_owned()));
/// assert!(router.dispatch_open("/ping"));
/// ```
pub fn build_router<T, F>(f: F) -> Result<Router<T>>
where
    F: FnOnce(&mut RouterBuilder<T>),
{
    let mut builder = RouterBuilder {
        router: Router::new(),
        error: None,
    };

    f(&mut builder);

    match builder.error {
        Some(e) => Err(e),
        None => {
            trace!("built router with {} routes", builder.router.len());
            Ok(builder.router)
        }
    }
}

/// The top-level builder which is created by `build_router` and passed to the provided closure.
/// See the `build_router` function and the `DrawRoutes` trait for usage.
pub struct RouterBuilder<T> {
    router: Router<T>,
    error: Option<PatternError>,
}

impl<T> RouterBuilder<T> {
    fn register(&mut self, pattern: &str, action: Action<T>) {
        if self.error.is_some() {
            trace!("skipping `{}` after an earlier pattern error", pattern);
            return;
        }

        if let Err(e) = self.router.register(pattern, action) {
            debug!("pattern `{}` rejected: {}", pattern, e);
            self.error = Some(e);
        }
    }
}

/// A scoped builder, which is created by `DrawRoutes::scope` and passed to the provided closure.
/// Every pattern mapped through it is prefixed with the scope's prefix.
pub struct ScopeBuilder<'a, T> {
    builder: &'a mut RouterBuilder<T>,
    prefix: String,
}

/// Builds a single route, created by `DrawRoutes::map` and finished by giving it an action.
pub struct SingleRouteBuilder<'a, T> {
    builder: &'a mut RouterBuilder<T>,
    pattern: String,
}

impl<'a, T> SingleRouteBuilder<'a, T> {
    /// Finishes the route with an `Action::Factory`.
    pub fn to_factory<F>(self, f: F)
    where
        F: Fn(&str, &Values, Option<&UserInfo>) -> Option<T> + Send + Sync + 'static,
    {
        self.to(Action::factory(f))
    }

    /// Finishes the route with an `Action::Open`.
    pub fn to_open<F>(self, f: F)
    where
        F: Fn(&str, &Values) -> bool + Send + Sync + 'static,
    {
        self.to(Action::open(f))
    }

    /// Finishes the route with the given `Action`.
    pub fn to(self, action: Action<T>) {
        self.builder.register(&self.pattern, action)
    }

    /// The full pattern this route will be registered with, including any scope prefixes.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Defines functions used by a builder to add routes to the `Router`. This trait is implemented
/// by the top-level `RouterBuilder`, and also the `ScopeBuilder` created by `DrawRoutes::scope`.
pub trait DrawRoutes<T> {
    /// Sets the router's default scheme. Applies to routes mapped after this call.
    fn scheme(&mut self, raw: &str) {
        let (builder, _) = self.component_refs();
        builder.router.set_scheme(raw);
    }

    /// Begins a route for `pattern`, prefixed with the current scope.
    ///
    /// The route is only added once `to_factory`, `to_open` or `to` is called.
    fn map(&mut self, pattern: &str) -> SingleRouteBuilder<'_, T> {
        let (builder, prefix) = self.component_refs();
        let pattern = join(prefix, pattern);
        SingleRouteBuilder { builder, pattern }
    }

    /// Begins a new scope at `prefix`. Scopes nest, and the prefix may carry a scheme
    /// (`myapp://`) which every pattern in the scope then shares.
    ///
    /// ```rust
    /// use navigator::build_router;
    /// use navigator::router::builder::DrawRoutes;
    ///
    /// let router = build_router(|route| {
    ///     route.scope("myapp://", |route| {
    ///         route.scope("/post", |route| {
    ///             route.map("/<title>").to_factory(|_url, values, _info| {
    ///                 values.get_str("title").map(String::from)
    ///             });
    ///         });
    ///     });
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(router.routes()[0].pattern().as_str(), "myapp://post/<title>");
    /// ```
    fn scope<F>(&mut self, prefix: &str, f: F)
    where
        F: FnOnce(&mut ScopeBuilder<'_, T>),
    {
        let (builder, parent) = self.component_refs();
        let prefix = join(parent, prefix);
        trace!("entering scope `{}`", prefix);
        let mut scope = ScopeBuilder { builder, prefix };
        f(&mut scope)
    }

    /// Return the components that comprise this builder. For internal use only.
    #[doc(hidden)]
    fn component_refs(&mut self) -> (&mut RouterBuilder<T>, &str);
}

impl<T> DrawRoutes<T> for RouterBuilder<T> {
    fn component_refs(&mut self) -> (&mut RouterBuilder<T>, &str) {
        (self, "")
    }
}

impl<'a, T> DrawRoutes<T> for ScopeBuilder<'a, T> {
    fn component_refs(&mut self) -> (&mut RouterBuilder<T>, &str) {
        (&mut *self.builder, &self.prefix)
    }
}

fn join(prefix: &str, pattern: &str) -> String {
    if prefix.is_empty() {
        pattern.to_owned()
    } else if prefix.ends_with("://") {
        format!("{}{}", prefix, pattern.trim_start_matches('/'))
    } else {
        format!(
            "{}/{}",
            prefix.trim_end_matches('/'),
            pattern.trim_start_matches('/')
        )
    }
}
