//! Navigator &ndash; URL pattern routing for deep links and in-app navigation.
//!
//! Patterns such as `myapp://user/<int:id>` or `http://<path:_>` are registered against a
//! `Router` together with an action. Incoming URLs are matched against the registered patterns
//! in registration order and the first one that matches wins. Captured values and query
//! parameters are handed to the action.
//!
//! ```rust
//! use navigator::router::Router;
//!
//! let mut router: Router<i64> = Router::new();
//! router
//!     .map_factory("myapp://user/<int:id>", |_url, values, _info| values.get_int("id"))
//!     .unwrap();
//!
//! assert_eq!(router.dispatch_factory("myapp://user/42", None), Some(42));
//! assert_eq!(router.dispatch_factory("myapp://user/awesome", None), None);
//! ```
#![warn(missing_docs, deprecated)]
// Stricter requirements once we get to pull request stage, all warnings must be resolved.
#![cfg_attr(feature = "ci", deny(warnings))]
#![doc(test(no_crate_inject, attr(deny(warnings))))]

pub mod error;
pub mod extractor;
pub mod helpers;
pub mod router;
#[cfg(feature = "shared")]
pub mod shared;
pub mod state;

pub use crate::error::PatternError;
pub use crate::router::builder::build_router;
pub use crate::router::route::Action;
pub use crate::router::values::{Value, Values};
pub use crate::router::{RouteMatch, Router};
pub use crate::state::UserInfo;
