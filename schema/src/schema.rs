use crate::affected::AffectedSlice;
use crate::aliases::Aliases;
use crate::credit::Credit;
use crate::package::Ecosystem;
use crate::reference::References;
use crate::related::Related;
use crate::severity::SeveritySlice;
use chrono::{DateTime, Utc};
use osv_storage::{FromStoreValue, StoreValue, ToStoreValue};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// A full OSV vulnerability record.
///
/// See <https://ossf.github.io/osv-schema/> for the document format.
///
/// `E` is the payload controlled by the package ecosystem, `D` the payload
/// controlled by the hosting database implementation. Both default to an
/// open JSON document and are carried through both serialization paths
/// without being inspected. Records are value-typed snapshots: they are
/// fully populated by decoding or by field assignment, and never mutated
/// in place by the model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "E: serde::Deserialize<'de>, D: serde::Deserialize<'de>"))]
pub struct OsvSchema<E = Value, D = Value> {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub schema_version: String,
    #[serde(default)]
    pub id: String,
    pub modified: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
    /// Opaque withdrawal marker. The upstream format leaves its semantics
    /// underspecified; the model carries it without interpreting it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawn: Option<String>,
    #[serde(default, skip_serializing_if = "Aliases::is_empty")]
    pub aliases: Aliases,
    #[serde(default, skip_serializing_if = "Related::is_empty")]
    pub related: Related,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "SeveritySlice::is_empty")]
    pub severity: SeveritySlice,
    #[serde(default, skip_serializing_if = "AffectedSlice::is_empty")]
    pub affected: AffectedSlice<E, D>,
    #[serde(default, skip_serializing_if = "References::is_empty")]
    pub references: References,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub credits: Vec<Credit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_specific: Option<D>,
}

impl<E, D> OsvSchema<E, D> {
    /// Whether any affected entry's package belongs to the given
    /// ecosystem. Commonly used to filter a feed down to one ecosystem.
    pub fn has_affected_ecosystem(&self, ecosystem: &Ecosystem) -> bool {
        self.affected.has_ecosystem(ecosystem)
    }

    /// The CVE number of this record, taken from the aliases.
    pub fn cve(&self) -> Option<String> {
        self.aliases.get_cve()
    }

    pub fn is_withdrawn(&self) -> bool {
        self.withdrawn.as_deref().is_some_and(|value| !value.is_empty())
    }
}

impl<E, D> Default for OsvSchema<E, D> {
    fn default() -> Self {
        Self {
            schema_version: String::new(),
            id: String::new(),
            modified: DateTime::UNIX_EPOCH,
            published: None,
            withdrawn: None,
            aliases: Aliases::default(),
            related: Related::default(),
            summary: None,
            details: None,
            severity: SeveritySlice::default(),
            affected: AffectedSlice::default(),
            references: References::default(),
            credits: Vec::new(),
            database_specific: None,
        }
    }
}

impl<E, D> ToStoreValue for OsvSchema<E, D>
where
    E: Serialize,
    D: Serialize,
{
    fn to_store_value(&self) -> Result<StoreValue, osv_storage::Error> {
        osv_storage::encode(self)
    }
}

impl<E, D> FromStoreValue for OsvSchema<E, D>
where
    E: DeserializeOwned,
    D: DeserializeOwned,
{
    fn from_store_value(value: &StoreValue) -> Result<Self, osv_storage::Error> {
        osv_storage::decode(value, "OsvSchema")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::severity::{Severity, SeverityType};
    use serde_json::json;

    fn record() -> Value {
        json!({
            "schema_version": "1.4.0",
            "id": "RUSTSEC-2021-0079",
            "modified": "2021-08-25T21:59:54Z",
            "published": "2021-07-07T12:00:00Z",
            "aliases": ["CVE-2021-32714", "GHSA-5h46-h7hh-c6x9"],
            "summary": "Integer overflow in hyper's parsing of the Transfer-Encoding header",
            "severity": [{ "type": "CVSS_V3", "score": "9.1" }],
            "affected": [{
                "package": {
                    "ecosystem": "crates.io",
                    "name": "hyper",
                    "purl": "pkg:cargo/hyper",
                },
                "ranges": [{
                    "type": "SEMVER",
                    "events": [
                        { "introduced": "0.0.0-0" },
                        { "fixed": "0.14.10" },
                    ],
                }],
            }],
            "references": [{
                "type": "ADVISORY",
                "url": "https://rustsec.org/advisories/RUSTSEC-2021-0079.html",
            }],
        })
    }

    #[test]
    fn round_trip() {
        let doc = record();
        let osv: OsvSchema = serde_json::from_value(doc.clone()).expect("must parse");

        assert_eq!(osv.id, "RUSTSEC-2021-0079");
        assert_eq!(osv.cve(), Some("CVE-2021-32714".to_string()));
        assert!(osv.has_affected_ecosystem(&Ecosystem::CratesIo));
        assert!(!osv.has_affected_ecosystem(&Ecosystem::Npm));
        assert!(!osv.is_withdrawn());

        assert_eq!(serde_json::to_value(&osv).expect("must serialize"), doc);
    }

    #[test]
    fn decoding_is_symmetric_to_encoding() {
        let osv: OsvSchema = serde_json::from_value(record()).expect("must parse");
        let encoded = serde_json::to_vec(&osv).expect("must serialize");
        let decoded: OsvSchema = serde_json::from_slice(&encoded).expect("must parse");
        assert_eq!(osv, decoded);
    }

    #[test]
    fn withdrawn_is_carried_opaquely() {
        let mut doc = record();
        doc["withdrawn"] = json!("2022-01-01T00:00:00Z");

        let osv: OsvSchema = serde_json::from_value(doc).expect("must parse");
        assert!(osv.is_withdrawn());
        assert_eq!(osv.withdrawn.as_deref(), Some("2022-01-01T00:00:00Z"));
    }

    #[test]
    fn duplicates_round_trip() {
        let osv = OsvSchema::<Value, Value> {
            id: "TEST-0001".to_string(),
            severity: SeveritySlice(vec![
                Severity::new(SeverityType::CvssV3, "7.5"),
                Severity::new(SeverityType::CvssV3, "7.5"),
            ]),
            ..Default::default()
        };

        let encoded = serde_json::to_vec(&osv).expect("must serialize");
        let decoded: OsvSchema = serde_json::from_slice(&encoded).expect("must parse");
        assert_eq!(decoded.severity.len(), 2);
        assert_eq!(osv, decoded);
    }
}
