//! The storage side of the OSV model: persist any record, or any of its
//! nested entities, as a single opaque column value.
//!
//! The column encoding is the document encoding. The one deliberate
//! difference is the treatment of empty sequences: they are written as
//! the "no value" marker instead of an empty-array byte string, so that
//! absent and empty stay distinguishable in storage.

pub mod error;
pub mod value;

pub use error::{Error, ScanError};
pub use value::StoreValue;

use serde::{de::DeserializeOwned, Serialize};

/// Encode an entity into a single opaque storage column.
pub trait ToStoreValue {
    fn to_store_value(&self) -> Result<StoreValue, Error>;
}

/// Decode an entity back out of a single opaque storage column.
pub trait FromStoreValue: Sized {
    fn from_store_value(value: &StoreValue) -> Result<Self, Error>;
}

/// Encode a scalar entity as its document encoding.
pub fn encode<T>(value: &T) -> Result<StoreValue, Error>
where
    T: Serialize + ?Sized,
{
    Ok(StoreValue::Bytes(serde_json::to_vec(value)?))
}

/// Encode a sequence entity. An empty sequence turns into the "no value"
/// marker, never an empty-array byte string.
pub fn encode_seq<T>(items: &[T]) -> Result<StoreValue, Error>
where
    T: Serialize,
{
    if items.is_empty() {
        return Ok(StoreValue::Null);
    }
    encode(items)
}

/// Decode a column value as the document encoding of `T`.
///
/// The "no value" marker and empty byte strings yield the zero value of
/// `T`. A non-byte-like representation fails with a [`ScanError`] naming
/// both the offending representation and the target entity.
pub fn decode<T>(value: &StoreValue, expected: &'static str) -> Result<T, Error>
where
    T: DeserializeOwned + Default,
{
    match value {
        StoreValue::Null => Ok(T::default()),
        other => match other.as_bytes() {
            Some(bytes) if bytes.is_empty() => Ok(T::default()),
            Some(bytes) => Ok(serde_json::from_slice(bytes)?),
            None => Err(ScanError {
                actual: other.type_name(),
                expected,
            }
            .into()),
        },
    }
}
