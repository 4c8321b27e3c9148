//! A process-wide `Router`, for applications which route from many places and do not want to
//! thread a router through every call.
//!
//! The shared router is created explicitly with `init`. Until then `read` and `write` return
//! `None`. Factories registered on it produce `Boxed` values, which callers downcast to the
//! type they expect.
//!
//! ```rust
//! use navigator::router::Router;
//! use navigator::shared::{self, Boxed};
//!
//! let mut router: Router<Boxed> = Router::with_scheme("myapp");
//! router
//!     .map_factory("/user/<name>", |_url, values, _info| {
//!         values
//!             .get_str("name")
//!             .map(|n| Box::new(n.to_owned()) as Boxed)
//!     })
//!     .unwrap();
//!
//! shared::init(router).unwrap();
//!
//! let built = shared::read(|r| r.dispatch_factory("/user/ada", None)).unwrap();
//! let name = built.and_then(|b| b.downcast::<String>().ok());
//! assert_eq!(name.map(|n| *n), Some("ada".to_owned()));
//! ```

use std::any::Any;
use std::sync::{PoisonError, RwLock};

use log::debug;
use once_cell::sync::OnceCell;

use crate::router::Router;

/// The result type of factories on the shared router.
pub type Boxed = Box<dyn Any + Send>;

static SHARED: OnceCell<RwLock<Router<Boxed>>> = OnceCell::new();

/// Installs `router` as the shared router.
///
/// Fails, handing `router` back, if the shared router has already been initialized.
pub fn init(router: Router<Boxed>) -> Result<(), Router<Boxed>> {
    SHARED
        .set(RwLock::new(router))
        .map(|()| debug!("shared router initialized"))
        .map_err(|lock| lock.into_inner().unwrap_or_else(PoisonError::into_inner))
}

/// True once `init` has succeeded.
pub fn is_initialized() -> bool {
    SHARED.get().is_some()
}

/// Runs `f` with shared access to the shared router, or returns `None` if it has not been
/// initialized.
pub fn read<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&Router<Boxed>) -> R,
{
    SHARED.get().map(|lock| {
        let router = lock.read().unwrap_or_else(PoisonError::into_inner);
        f(&router)
    })
}

/// Runs `f` with exclusive access to the shared router, or returns `None` if it has not been
/// initialized.
pub fn write<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut Router<Boxed>) -> R,
{
    SHARED.get().map(|lock| {
        let mut router = lock.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut router)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // The shared router lives for the whole test binary, so its lifecycle is exercised in a
    // single test.
    #[test]
    fn shared_router_lifecycle() {
        assert!(!is_initialized());
        assert!(read(|r| r.len()).is_none());
        assert!(write(|r| r.set_scheme("myapp")).is_none());

        let mut router: Router<Boxed> = Router::with_scheme("myapp");
        router
            .map_factory("/user/<int:id>", |_, values, _| {
                values.get_int("id").map(|id| Box::new(id) as Boxed)
            })
            .unwrap();
        assert!(init(router).is_ok());
        assert!(is_initialized());

        let rejected = init(Router::with_scheme("other")).unwrap_err();
        assert_eq!(rejected.scheme(), "other");
        assert_eq!(read(|r| r.scheme().to_owned()), Some("myapp".to_owned()));

        let id = read(|r| r.dispatch_factory("/user/7", None))
            .and_then(|built| built)
            .and_then(|b| b.downcast::<i64>().ok());
        assert_eq!(id.map(|b| *b), Some(7));

        write(|r| r.map_open("/ping", |_, _| true)).unwrap().unwrap();
        assert_eq!(read(|r| r.dispatch_open("myapp://ping")), Some(true));
        assert_eq!(read(|r| r.len()), Some(2));
    }
}
