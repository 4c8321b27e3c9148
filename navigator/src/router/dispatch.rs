//! Dispatches matched URLs into their route's `Action`.
//!
//! Matching only decides *which* route a URL belongs to. Whether anything useful happens is
//! decided here by the route's action: a factory may decline to build a result and an open
//! handler reports whether it handled the URL.

use log::trace;

use crate::router::non_match::NonMatch;
use crate::router::route::Action;
use crate::router::{RouteMatch, Router};
use crate::state::UserInfo;

impl<'a, T> RouteMatch<'a, T> {
    /// Invokes the matched route's open handler with the URL and values.
    pub fn open(&self) -> Result<(), NonMatch> {
        match *self.action() {
            Action::Open(ref handler) => {
                if handler(self.url(), self.values()) {
                    trace!("open handler took `{}`", self.url());
                    Ok(())
                } else {
                    trace!("open handler declined `{}`", self.url());
                    Err(NonMatch::Declined)
                }
            }
            Action::Factory(_) => {
                trace!("`{}` matched a factory route, not an open handler", self.url());
                Err(NonMatch::WrongAction)
            }
        }
    }

    /// Invokes the matched route's factory with the URL, values and `user_info`.
    pub fn build(&self, user_info: Option<&UserInfo>) -> Result<T, NonMatch> {
        match *self.action() {
            Action::Factory(ref factory) => match factory(self.url(), self.values(), user_info) {
                Some(t) => {
                    trace!("factory built a result for `{}`", self.url());
                    Ok(t)
                }
                None => {
                    trace!("factory declined `{}`", self.url());
                    Err(NonMatch::Declined)
                }
            },
            Action::Open(_) => {
                trace!("`{}` matched an open handler, not a factory", self.url());
                Err(NonMatch::WrongAction)
            }
        }
    }
}

impl<T> Router<T> {
    /// Matches `url` and invokes the route's open handler.
    ///
    /// Returns `false` when nothing matches, when the first matching route is a factory, or
    /// when the handler itself returns `false`.
    pub fn dispatch_open(&self, url: &str) -> bool {
        self.try_dispatch_open(url).is_ok()
    }

    /// Like `dispatch_open`, reporting why nothing was opened.
    pub fn try_dispatch_open(&self, url: &str) -> Result<(), NonMatch> {
        self.match_url(url).ok_or(NonMatch::NoRoute)?.open()
    }

    /// Matches `url` and invokes the route's factory with `user_info`.
    ///
    /// Returns `None` when nothing matches, when the first matching route is an open handler,
    /// or when the factory declines.
    pub fn dispatch_factory(&self, url: &str, user_info: Option<&UserInfo>) -> Option<T> {
        self.try_dispatch_factory(url, user_info).ok()
    }

    /// Like `dispatch_factory`, reporting why no result was built.
    pub fn try_dispatch_factory(
        &self,
        url: &str,
        user_info: Option<&UserInfo>,
    ) -> Result<T, NonMatch> {
        self.match_url(url)
            .ok_or(NonMatch::NoRoute)?
            .build(user_info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug, PartialEq)]
    struct Search {
        query: String,
    }

    fn router() -> Router<Search> {
        let mut router = Router::new();
        router
            .map_factory("myapp://search", |_, values, _| {
                values.get_str("query").map(|q| Search {
                    query: q.to_owned(),
                })
            })
            .unwrap();
        router.map_open("myapp://ping", |_, _| true).unwrap();
        router.map_open("myapp://nope", |_, _| false).unwrap();
        router
    }

    #[test]
    fn factory_outcomes_are_distinguishable() {
        let router = router();

        assert_eq!(
            router.try_dispatch_factory("myapp://search?query=Hello", None),
            Ok(Search {
                query: "Hello".to_owned()
            })
        );
        assert_eq!(
            router.try_dispatch_factory("myapp://search?query=", None),
            Ok(Search {
                query: String::new()
            })
        );
        assert_eq!(
            router.try_dispatch_factory("myapp://search?query", None),
            Err(NonMatch::Declined)
        );
        assert_eq!(
            router.try_dispatch_factory("myapp://search?", None),
            Err(NonMatch::Declined)
        );
        assert_eq!(
            router.try_dispatch_factory("myapp://ping", None),
            Err(NonMatch::WrongAction)
        );
        assert_eq!(
            router.try_dispatch_factory("myapp://unknown", None),
            Err(NonMatch::NoRoute)
        );
        assert_eq!(router.dispatch_factory("myapp://search", None), None);
    }

    #[test]
    fn open_outcomes_are_distinguishable() {
        let router = router();

        assert_eq!(router.try_dispatch_open("myapp://ping"), Ok(()));
        assert_eq!(router.try_dispatch_open("myapp://nope"), Err(NonMatch::Declined));
        assert_eq!(
            router.try_dispatch_open("myapp://search?query=x"),
            Err(NonMatch::WrongAction)
        );
        assert_eq!(router.try_dispatch_open("myapp://pong"), Err(NonMatch::NoRoute));

        assert!(router.dispatch_open("myapp://ping"));
        assert!(!router.dispatch_open("myapp://nope"));
    }

    #[test]
    fn open_handler_sees_url_and_values() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();

        let mut router: Router<()> = Router::with_scheme("myapp");
        router
            .map_open("/user/<int:id>", move |url, values| {
                assert_eq!(url, "/user/5?tab=likes");
                assert_eq!(values.get_int("id"), Some(5));
                assert_eq!(values.get_str("tab"), Some("likes"));
                seen.fetch_add(1, Ordering::SeqCst);
                true
            })
            .unwrap();

        assert!(router.dispatch_open("/user/5?tab=likes"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
