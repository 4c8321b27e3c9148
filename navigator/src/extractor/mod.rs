//! Extracts matched values into type-safe structs using Serde.
//!
//! Any struct implementing `serde::Deserialize` can be filled from the `Values` of a match.
//! Integer captures feed integer fields directly; string values are parsed when a field asks
//! for a number or a `bool`; `Option<T>` fields may be absent; enums with unit variants are read
//! from their variant name.
//!
//! ```rust
//! use navigator::router::Router;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct UserParams {
//!     id: u32,
//!     tab: Option<String>,
//!     page: Option<u16>,
//! }
//!
//! let mut router: Router<UserParams> = Router::new();
//! router
//!     .map_factory("myapp://user/<int:id>", |_url, values, _info| values.extract().ok())
//!     .unwrap();
//!
//! assert_eq!(
//!     router.dispatch_factory("myapp://user/7?page=3", None),
//!     Some(UserParams { id: 7, tab: None, page: Some(3) })
//! );
//! ```

mod internal;

use serde::de::DeserializeOwned;

pub use self::internal::ExtractorError;
use self::internal::ValuesDeserializer;
use crate::router::values::Values;

/// Deserializes `values` into `T`.
pub fn extract<T>(values: &Values) -> Result<T, ExtractorError>
where
    T: DeserializeOwned,
{
    T::deserialize(ValuesDeserializer::new(values))
}
