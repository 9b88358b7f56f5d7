use osv_storage::{FromStoreValue, StoreValue, ToStoreValue};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::ops::{Deref, DerefMut};

/// What an external citation points at.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceType {
    #[serde(rename = "ADVISORY")]
    Advisory,
    #[serde(rename = "ARTICLE")]
    Article,
    #[serde(rename = "DETECTION")]
    Detection,
    #[serde(rename = "DISCUSSION")]
    Discussion,
    #[serde(rename = "REPORT")]
    Report,
    #[serde(rename = "FIX")]
    Fix,
    #[serde(rename = "INTRODUCED")]
    Introduced,
    #[serde(rename = "PACKAGE")]
    Package,
    #[serde(rename = "EVIDENCE")]
    Evidence,
    #[serde(rename = "WEB")]
    Web,
    #[serde(untagged)]
    Other(String),
}

impl ReferenceType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Advisory => "ADVISORY",
            Self::Article => "ARTICLE",
            Self::Detection => "DETECTION",
            Self::Discussion => "DISCUSSION",
            Self::Report => "REPORT",
            Self::Fix => "FIX",
            Self::Introduced => "INTRODUCED",
            Self::Package => "PACKAGE",
            Self::Evidence => "EVIDENCE",
            Self::Web => "WEB",
            Self::Other(inner) => inner,
        }
    }
}

impl Default for ReferenceType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl Display for ReferenceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ReferenceType {
    fn from(value: &str) -> Self {
        match value {
            "ADVISORY" => Self::Advisory,
            "ARTICLE" => Self::Article,
            "DETECTION" => Self::Detection,
            "DISCUSSION" => Self::Discussion,
            "REPORT" => Self::Report,
            "FIX" => Self::Fix,
            "INTRODUCED" => Self::Introduced,
            "PACKAGE" => Self::Package,
            "EVIDENCE" => Self::Evidence,
            "WEB" => Self::Web,
            other => Self::Other(other.to_string()),
        }
    }
}

/// One external citation attached to a record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "type", default)]
    pub reference_type: ReferenceType,
    #[serde(default)]
    pub url: String,
}

impl ToStoreValue for Reference {
    fn to_store_value(&self) -> Result<StoreValue, osv_storage::Error> {
        osv_storage::encode(self)
    }
}

impl FromStoreValue for Reference {
    fn from_store_value(value: &StoreValue) -> Result<Self, osv_storage::Error> {
        osv_storage::decode(value, "Reference")
    }
}

/// An ordered list of citations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct References(pub Vec<Reference>);

impl References {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The references whose type is in the requested set, preserving order.
    ///
    /// Requesting no types at all returns `None`, keeping "nothing
    /// requested" apart from "nothing matched" (an empty list).
    pub fn filter_by_type(&self, types: &[ReferenceType]) -> Option<References> {
        if types.is_empty() {
            return None;
        }
        Some(Self(
            self.0
                .iter()
                .filter(|reference| types.contains(&reference.reference_type))
                .cloned()
                .collect(),
        ))
    }

    /// The first reference of the given type.
    pub fn first_of_type(&self, reference_type: &ReferenceType) -> Option<&Reference> {
        self.0
            .iter()
            .find(|reference| &reference.reference_type == reference_type)
    }
}

impl Deref for References {
    type Target = Vec<Reference>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for References {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Reference>> for References {
    fn from(value: Vec<Reference>) -> Self {
        Self(value)
    }
}

impl FromIterator<Reference> for References {
    fn from_iter<T: IntoIterator<Item = Reference>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl ToStoreValue for References {
    fn to_store_value(&self) -> Result<StoreValue, osv_storage::Error> {
        osv_storage::encode_seq(&self.0)
    }
}

impl FromStoreValue for References {
    fn from_store_value(value: &StoreValue) -> Result<Self, osv_storage::Error> {
        osv_storage::decode(value, "References")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn references() -> References {
        References(vec![
            Reference {
                reference_type: ReferenceType::Web,
                url: "https://example.com/a".to_string(),
            },
            Reference {
                reference_type: ReferenceType::Advisory,
                url: "https://example.com/b".to_string(),
            },
            Reference {
                reference_type: ReferenceType::Web,
                url: "https://example.com/c".to_string(),
            },
        ])
    }

    #[test]
    fn nothing_requested_is_not_nothing_matched() {
        let references = references();

        assert!(references.filter_by_type(&[]).is_none());

        let matched = references
            .filter_by_type(&[ReferenceType::Fix])
            .expect("types were requested");
        assert!(matched.is_empty());
    }

    #[test]
    fn filter_preserves_order() {
        let matched = references()
            .filter_by_type(&[ReferenceType::Web, ReferenceType::Advisory])
            .expect("types were requested");
        assert_eq!(matched.len(), 3);

        let matched = references()
            .filter_by_type(&[ReferenceType::Web])
            .expect("types were requested");
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].url, "https://example.com/a");
        assert_eq!(matched[1].url, "https://example.com/c");
    }

    #[test]
    fn first_of_type() {
        let references = references();
        assert_eq!(
            references
                .first_of_type(&ReferenceType::Web)
                .map(|reference| reference.url.as_str()),
            Some("https://example.com/a")
        );
        assert!(references.first_of_type(&ReferenceType::Fix).is_none());
    }

    #[test]
    fn unknown_type_round_trips() {
        let reference: Reference = serde_json::from_value(serde_json::json!({
            "type": "UPSTREAM",
            "url": "https://example.com",
        }))
        .expect("must parse");
        assert_eq!(
            reference.reference_type,
            ReferenceType::Other("UPSTREAM".to_string())
        );
        assert_eq!(reference.reference_type.to_string(), "UPSTREAM");
    }
}
