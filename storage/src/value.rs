use std::fmt::{Display, Formatter};

/// A single column value exchanged with a storage backend.
///
/// The model does not assume SQL, a document database, or any concrete
/// driver. This is the byte-oriented contract it expects a backend to
/// speak: [`StoreValue::Null`] is the backend's "no value" marker, and
/// only the byte-like representations can carry an encoded entity. The
/// remaining variants exist so a backend handing over the wrong column
/// can be rejected with a proper error instead of a panic.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreValue {
    /// The backend's "no value" marker.
    Null,
    Bytes(Vec<u8>),
    Text(String),
    BigInt(i64),
    Double(f64),
    Bool(bool),
}

impl StoreValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The byte content, for the byte-like representations.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::Text(text) => Some(text.as_bytes()),
            _ => None,
        }
    }

    /// A short name of the representation, used in scan errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bytes(_) => "bytes",
            Self::Text(_) => "text",
            Self::BigInt(_) => "bigint",
            Self::Double(_) => "double",
            Self::Bool(_) => "bool",
        }
    }
}

impl Display for StoreValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

impl From<Vec<u8>> for StoreValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<&[u8]> for StoreValue {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<String> for StoreValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for StoreValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for StoreValue {
    fn from(value: i64) -> Self {
        Self::BigInt(value)
    }
}

impl From<f64> for StoreValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<bool> for StoreValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T> From<Option<T>> for StoreValue
where
    T: Into<StoreValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Self::Null,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn byte_like() {
        assert_eq!(
            StoreValue::from("{}".as_bytes()).as_bytes(),
            Some("{}".as_bytes())
        );
        assert_eq!(StoreValue::from("{}").as_bytes(), Some("{}".as_bytes()));
        assert_eq!(StoreValue::from(42i64).as_bytes(), None);
        assert_eq!(StoreValue::Null.as_bytes(), None);
    }

    #[test]
    fn from_option() {
        assert_eq!(StoreValue::from(None::<String>), StoreValue::Null);
        assert!(StoreValue::from(None::<String>).is_null());
        assert_eq!(
            StoreValue::from(Some("x".to_string())),
            StoreValue::Text("x".into())
        );
    }
}
