//! Defines `UserInfo`, the side-channel data passed to factories alongside a matched URL.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use log::trace;

/// Marker for types which can be stored in `UserInfo`.
///
/// Implemented for every `'static + Send` type.
pub trait UserInfoData: Any + Send {}

impl<T> UserInfoData for T where T: Any + Send {}

/// Provides storage for side-channel data handed to factories, and stores one item of each
/// type.
///
/// The router never looks inside; it only forwards a `UserInfo` from the caller of
/// `Router::dispatch_factory` to the factory of the matching route.
///
/// # Examples
///
/// ```rust
/// use navigator::state::UserInfo;
///
/// struct Referrer(&'static str);
///
/// let mut info = UserInfo::new();
/// info.put(Referrer("push-notification"));
/// info.put(42u32);
///
/// assert_eq!(info.borrow::<Referrer>().0, "push-notification");
/// assert_eq!(*info.borrow::<u32>(), 42);
/// assert!(!info.has::<String>());
/// ```
#[derive(Default)]
pub struct UserInfo {
    data: HashMap<TypeId, Box<dyn Any + Send>>,
}

impl UserInfo {
    /// Creates a new, empty `UserInfo` container.
    pub fn new() -> UserInfo {
        UserInfo::default()
    }

    /// Puts a value into the `UserInfo` storage. One value of each type is retained. Successive
    /// calls to `put` will overwrite the existing value of the same type.
    pub fn put<T>(&mut self, t: T)
    where
        T: UserInfoData,
    {
        let type_id = TypeId::of::<T>();
        trace!("inserting record to user info for type_id `{:?}`", type_id);
        self.data.insert(type_id, Box::new(t));
    }

    /// Determines if the current value exists in `UserInfo` storage.
    pub fn has<T>(&self) -> bool
    where
        T: UserInfoData,
    {
        let type_id = TypeId::of::<T>();
        self.data.contains_key(&type_id)
    }

    /// Tries to borrow a value from the `UserInfo` storage.
    pub fn try_borrow<T>(&self) -> Option<&T>
    where
        T: UserInfoData,
    {
        let type_id = TypeId::of::<T>();
        trace!("borrowing user info for type_id `{:?}`", type_id);
        self.data.get(&type_id).and_then(|b| b.downcast_ref::<T>())
    }

    /// Borrows a value from the `UserInfo` storage.
    ///
    /// # Panics
    ///
    /// If a value of type `T` is not present in `UserInfo`.
    pub fn borrow<T>(&self) -> &T
    where
        T: UserInfoData,
    {
        self.try_borrow()
            .expect("required type is not present in UserInfo container")
    }

    /// Tries to mutably borrow a value from the `UserInfo` storage.
    pub fn try_borrow_mut<T>(&mut self) -> Option<&mut T>
    where
        T: UserInfoData,
    {
        let type_id = TypeId::of::<T>();
        trace!("mutably borrowing user info for type_id `{:?}`", type_id);
        self.data.get_mut(&type_id).and_then(|b| b.downcast_mut::<T>())
    }

    /// Mutably borrows a value from the `UserInfo` storage.
    ///
    /// # Panics
    ///
    /// If a value of type `T` is not present in `UserInfo`.
    pub fn borrow_mut<T>(&mut self) -> &mut T
    where
        T: UserInfoData,
    {
        self.try_borrow_mut()
            .expect("required type is not present in UserInfo container")
    }

    /// Tries to move a value out of the `UserInfo` storage and return ownership.
    pub fn try_take<T>(&mut self) -> Option<T>
    where
        T: UserInfoData,
    {
        let type_id = TypeId::of::<T>();
        trace!("taking user info for type_id `{:?}`", type_id);
        self.data
            .remove(&type_id)
            .and_then(|b| b.downcast::<T>().ok())
            .map(|b| *b)
    }

    /// Moves a value out of the `UserInfo` storage and returns ownership.
    ///
    /// # Panics
    ///
    /// If a value of type `T` is not present in `UserInfo`.
    pub fn take<T>(&mut self) -> T
    where
        T: UserInfoData,
    {
        self.try_take()
            .expect("required type is not present in UserInfo container")
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("UserInfo")
            .field("len", &self.data.len())
            .finish()
    }
}
