//! Defines the reasons a dispatched URL produced nothing.

use thiserror::Error;

/// Why a URL did not produce a result when dispatched.
///
/// None of these are failures of the router itself. They let callers tell apart "nothing is
/// registered for this URL" from "something is registered, but it did not take the URL".
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum NonMatch {
    /// No registered pattern matches the URL.
    #[error("no route matches the url")]
    NoRoute,

    /// The first matching route has a different kind of `Action` than was dispatched for.
    #[error("the matching route has a different kind of action")]
    WrongAction,

    /// The matching route's factory returned `None`, or its open handler returned `false`.
    #[error("the matching route declined the url")]
    Declined,
}
