//! Fields where an explicit `null` and an absent key mean different things.
//!
//! A [`Nullable`] is `None` when the key was absent, `Some(None)` for `null`
//! and `Some(Some(v))` for a value. Pair [`deserialize`] with
//! `#[serde(default)]` and `skip_serializing_if = "Option::is_none"` so both
//! shapes survive a round trip.

use serde::{Deserialize, Deserializer};

pub type Nullable<T> = Option<Option<T>>;

/// Reads a present key, keeping `null` as `Some(None)`.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Nullable<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Transforms a present value, leaving absent and `null` untouched.
pub fn map<T, U>(value: Nullable<T>, f: impl FnOnce(T) -> U) -> Nullable<U> {
    value.map(|inner| inner.map(f))
}
