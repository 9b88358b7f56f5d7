use crate::event::Event;
use osv_storage::{FromStoreValue, StoreValue, ToStoreValue};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// How the events of a [`Range`] are ordered.
///
/// The three tags select mutually exclusive ordering semantics. The model
/// carries the tag but does not evaluate containment itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeType {
    /// Events are semantic versions, ordered by SemVer precedence.
    #[serde(rename = "SEMVER")]
    Semver,
    /// Events are ordered by an ecosystem-specific string comparison.
    /// Containment can not be decided without ecosystem knowledge, so an
    /// explicit `versions` enumeration is the recommended supplement.
    #[serde(rename = "ECOSYSTEM")]
    Ecosystem,
    /// Events are commit identifiers. "Less than" means "is an ancestor
    /// of" and requires an external commit graph.
    #[serde(rename = "GIT")]
    Git,
    #[serde(untagged)]
    Other(String),
}

impl RangeType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Semver => "SEMVER",
            Self::Ecosystem => "ECOSYSTEM",
            Self::Git => "GIT",
            Self::Other(inner) => inner,
        }
    }
}

impl Default for RangeType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl Display for RangeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RangeType {
    fn from(value: &str) -> Self {
        match value {
            "SEMVER" => Self::Semver,
            "ECOSYSTEM" => Self::Ecosystem,
            "GIT" => Self::Git,
            other => Self::Other(other.to_string()),
        }
    }
}

/// One version-range definition of an [`Affected`](crate::affected::Affected)
/// entry. Events keep their document order.
///
/// `D` is the payload owned by the hosting database implementation; it is
/// carried through both serialization paths without being inspected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "D: serde::Deserialize<'de>"))]
pub struct Range<D = Value> {
    #[serde(rename = "type", default)]
    pub range_type: RangeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_specific: Option<D>,
}

impl<D> Default for Range<D> {
    fn default() -> Self {
        Self {
            range_type: RangeType::default(),
            repo: None,
            events: Vec::new(),
            database_specific: None,
        }
    }
}

impl<D> ToStoreValue for Range<D>
where
    D: Serialize,
{
    fn to_store_value(&self) -> Result<StoreValue, osv_storage::Error> {
        osv_storage::encode(self)
    }
}

impl<D> FromStoreValue for Range<D>
where
    D: DeserializeOwned,
{
    fn from_store_value(value: &StoreValue) -> Result<Self, osv_storage::Error> {
        osv_storage::decode(value, "Range")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trip() {
        let doc = json!({
            "type": "ECOSYSTEM",
            "events": [
                { "introduced": "0" },
                { "last_affected": "0.7.246" },
            ],
        });

        let range: Range = serde_json::from_value(doc.clone()).expect("must parse");
        assert_eq!(range.range_type, RangeType::Ecosystem);
        assert!(range.repo.is_none());
        assert_eq!(range.events.len(), 2);
        assert!(range.events[0].is_introduced());
        assert!(range.events[1].is_last_affected());

        assert_eq!(serde_json::to_value(&range).expect("must serialize"), doc);
    }

    #[test]
    fn unknown_type_round_trips() {
        let range: Range = serde_json::from_value(json!({ "type": "DISTRO" }))
            .expect("must parse");
        assert_eq!(range.range_type, RangeType::Other("DISTRO".to_string()));
        assert_eq!(
            serde_json::to_value(&range).expect("must serialize"),
            json!({ "type": "DISTRO" })
        );
    }

    #[test]
    fn extension_payload_is_carried() {
        let doc = json!({
            "type": "GIT",
            "repo": "https://github.com/example/example",
            "events": [{ "introduced": "d9521f2" }],
            "database_specific": { "cursor": { "page": 3 } },
        });

        let range: Range = serde_json::from_value(doc.clone()).expect("must parse");
        assert_eq!(
            range.database_specific,
            Some(json!({ "cursor": { "page": 3 } }))
        );
        assert_eq!(serde_json::to_value(&range).expect("must serialize"), doc);
    }
}
