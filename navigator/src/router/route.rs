//! Defines `Route` entries and the `Action` they invoke.

use std::fmt;

use crate::router::pattern::Pattern;
use crate::router::values::Values;
use crate::state::UserInfo;

/// Constructs a result for a matched URL. Returning `None` declines the match.
pub type FactoryFn<T> = dyn Fn(&str, &Values, Option<&UserInfo>) -> Option<T> + Send + Sync;

/// Handles a matched URL directly. The return value reports whether it was handled.
pub type OpenFn = dyn Fn(&str, &Values) -> bool + Send + Sync;

/// What a `Route` does once its pattern matches a URL.
pub enum Action<T> {
    /// Builds a `T` from the URL, the matched values and caller supplied `UserInfo`.
    ///
    /// The factory may still decline a matching URL by returning `None`, for example when a
    /// query parameter it needs is missing.
    Factory(Box<FactoryFn<T>>),

    /// Handles the URL in place and reports success.
    Open(Box<OpenFn>),
}

impl<T> Action<T> {
    /// Wraps a factory closure.
    pub fn factory<F>(f: F) -> Self
    where
        F: Fn(&str, &Values, Option<&UserInfo>) -> Option<T> + Send + Sync + 'static,
    {
        Action::Factory(Box::new(f))
    }

    /// Wraps an open handler closure.
    pub fn open<F>(f: F) -> Self
    where
        F: Fn(&str, &Values) -> bool + Send + Sync + 'static,
    {
        Action::Open(Box::new(f))
    }

    /// True for `Action::Factory`.
    pub fn is_factory(&self) -> bool {
        match *self {
            Action::Factory(_) => true,
            Action::Open(_) => false,
        }
    }

    /// True for `Action::Open`.
    pub fn is_open(&self) -> bool {
        !self.is_factory()
    }
}

impl<T> fmt::Debug for Action<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Action::Factory(_) => f.write_str("Action::Factory(..)"),
            Action::Open(_) => f.write_str("Action::Open(..)"),
        }
    }
}

/// A registered pairing of a compiled `Pattern` with its `Action`.
#[derive(Debug)]
pub struct Route<T> {
    pattern: Pattern,
    action: Action<T>,
}

impl<T> Route<T> {
    pub(crate) fn new(pattern: Pattern, action: Action<T>) -> Self {
        Route { pattern, action }
    }

    /// The compiled pattern of this route.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The action of this route.
    pub fn action(&self) -> &Action<T> {
        &self.action
    }
}
