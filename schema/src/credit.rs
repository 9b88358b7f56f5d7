use osv_storage::{FromStoreValue, StoreValue, ToStoreValue};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The role a credited party played. `OTHER` is a defined upstream value;
/// values outside the defined set are carried in [`CreditType::Unknown`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreditType {
    #[serde(rename = "FINDER")]
    Finder,
    #[serde(rename = "REPORTER")]
    Reporter,
    #[serde(rename = "ANALYST")]
    Analyst,
    #[serde(rename = "COORDINATOR")]
    Coordinator,
    #[serde(rename = "REMEDIATION_DEVELOPER")]
    RemediationDeveloper,
    #[serde(rename = "REMEDIATION_REVIEWER")]
    RemediationReviewer,
    #[serde(rename = "REMEDIATION_VERIFIER")]
    RemediationVerifier,
    #[serde(rename = "TOOL")]
    Tool,
    #[serde(rename = "SPONSOR")]
    Sponsor,
    #[serde(rename = "OTHER")]
    Other,
    #[serde(untagged)]
    Unknown(String),
}

impl CreditType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Finder => "FINDER",
            Self::Reporter => "REPORTER",
            Self::Analyst => "ANALYST",
            Self::Coordinator => "COORDINATOR",
            Self::RemediationDeveloper => "REMEDIATION_DEVELOPER",
            Self::RemediationReviewer => "REMEDIATION_REVIEWER",
            Self::RemediationVerifier => "REMEDIATION_VERIFIER",
            Self::Tool => "TOOL",
            Self::Sponsor => "SPONSOR",
            Self::Other => "OTHER",
            Self::Unknown(inner) => inner,
        }
    }
}

impl Display for CreditType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for CreditType {
    fn from(value: &str) -> Self {
        match value {
            "FINDER" => Self::Finder,
            "REPORTER" => Self::Reporter,
            "ANALYST" => Self::Analyst,
            "COORDINATOR" => Self::Coordinator,
            "REMEDIATION_DEVELOPER" => Self::RemediationDeveloper,
            "REMEDIATION_REVIEWER" => Self::RemediationReviewer,
            "REMEDIATION_VERIFIER" => Self::RemediationVerifier,
            "TOOL" => Self::Tool,
            "SPONSOR" => Self::Sponsor,
            "OTHER" => Self::Other,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// One acknowledgement attached to a record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contact: Vec<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub credit_type: Option<CreditType>,
}

impl ToStoreValue for Credit {
    fn to_store_value(&self) -> Result<StoreValue, osv_storage::Error> {
        osv_storage::encode(self)
    }
}

impl FromStoreValue for Credit {
    fn from_store_value(value: &StoreValue) -> Result<Self, osv_storage::Error> {
        osv_storage::decode(value, "Credit")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trip() {
        let doc = json!({
            "name": "Yakun Zhang",
            "contact": ["https://twitter.com/example"],
            "type": "FINDER",
        });

        let credit: Credit = serde_json::from_value(doc.clone()).expect("must parse");
        assert_eq!(credit.credit_type, Some(CreditType::Finder));
        assert_eq!(serde_json::to_value(&credit).expect("must serialize"), doc);
    }

    #[test]
    fn unknown_role_round_trips() {
        let credit: Credit = serde_json::from_value(json!({
            "name": "anon",
            "type": "MAINTAINER",
        }))
        .expect("must parse");
        assert_eq!(
            credit.credit_type,
            Some(CreditType::Unknown("MAINTAINER".to_string()))
        );
    }
}
