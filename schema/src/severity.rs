use osv_storage::{FromStoreValue, StoreValue, ToStoreValue};
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::fmt::{Display, Formatter};
use std::num::ParseFloatError;
use std::ops::{Deref, DerefMut};

/// The scale a [`Severity`] score is expressed in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeverityType {
    #[serde(rename = "CVSS_V2")]
    CvssV2,
    #[serde(rename = "CVSS_V3")]
    CvssV3,
    #[serde(untagged)]
    Other(String),
}

impl SeverityType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::CvssV2 => "CVSS_V2",
            Self::CvssV3 => "CVSS_V3",
            Self::Other(inner) => inner,
        }
    }
}

impl Default for SeverityType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl Display for SeverityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for SeverityType {
    fn from(value: &str) -> Self {
        match value {
            "CVSS_V2" => Self::CvssV2,
            "CVSS_V3" => Self::CvssV3,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A severity score could not be turned into a number.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    #[error("empty score")]
    Empty,
    #[error("invalid score: {0}")]
    Invalid(#[from] ParseFloatError),
}

/// One severity rating of a vulnerability.
///
/// The numeric value of `score` is parsed on first access and memoized,
/// including a failed parse: replacing `score` afterwards does not
/// invalidate the cache. Build a fresh instance to re-derive the value.
/// The cache cell is not synchronized; callers sharing one instance
/// across threads must serialize the first access.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Severity {
    #[serde(rename = "type", default)]
    pub severity_type: SeverityType,
    #[serde(default)]
    pub score: String,
    #[serde(skip)]
    parsed: OnceCell<Result<f64, ScoreError>>,
}

impl Severity {
    pub fn new(severity_type: SeverityType, score: impl Into<String>) -> Self {
        Self {
            severity_type,
            score: score.into(),
            parsed: OnceCell::new(),
        }
    }

    /// The numeric score.
    ///
    /// Parsed once; later calls return the memoized outcome, success or
    /// failure. An empty score is a failure, not zero.
    pub fn score_value(&self) -> Result<f64, ScoreError> {
        self.parsed
            .get_or_init(|| {
                if self.score.is_empty() {
                    return Err(ScoreError::Empty);
                }
                Ok(self.score.parse::<f64>()?)
            })
            .clone()
    }

    /// The numeric score, with parse failures folded into `None`.
    pub fn score_value_opt(&self) -> Option<f64> {
        self.score_value().ok()
    }

    /// The qualitative rating of the numeric score.
    pub fn rating(&self) -> Option<Rating> {
        self.score_value().ok().map(Rating::from_f64)
    }
}

impl PartialEq for Severity {
    fn eq(&self, other: &Self) -> bool {
        self.severity_type == other.severity_type && self.score == other.score
    }
}

impl Eq for Severity {}

impl ToStoreValue for Severity {
    fn to_store_value(&self) -> Result<StoreValue, osv_storage::Error> {
        osv_storage::encode(self)
    }
}

impl FromStoreValue for Severity {
    fn from_store_value(value: &StoreValue) -> Result<Self, osv_storage::Error> {
        osv_storage::decode(value, "Severity")
    }
}

/// Qualitative rating scale for a numeric severity score.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rating {
    /// Score 0.0
    None,
    /// Score 0.1 - 3.9
    Low,
    /// Score 4.0 - 6.9
    Medium,
    /// Score 7.0 - 8.9
    High,
    /// Score 9.0 - 10.0
    Critical,
}

impl Rating {
    pub fn as_str(self) -> &'static str {
        match self {
            Rating::None => "none",
            Rating::Low => "low",
            Rating::Medium => "medium",
            Rating::High => "high",
            Rating::Critical => "critical",
        }
    }

    pub fn from_f64(value: f64) -> Rating {
        match value {
            x if x < 0.1 => Rating::None,
            x if x < 4.0 => Rating::Low,
            x if x < 7.0 => Rating::Medium,
            x if x < 9.0 => Rating::High,
            _ => Rating::Critical,
        }
    }
}

impl From<f64> for Rating {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered list of severity ratings. Duplicates are legal and kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeveritySlice(pub Vec<Severity>);

impl SeveritySlice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The first rating expressed in the given scale.
    pub fn find_by_type(&self, severity_type: &SeverityType) -> Option<&Severity> {
        self.0
            .iter()
            .find(|severity| &severity.severity_type == severity_type)
    }
}

impl Deref for SeveritySlice {
    type Target = Vec<Severity>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SeveritySlice {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Severity>> for SeveritySlice {
    fn from(value: Vec<Severity>) -> Self {
        Self(value)
    }
}

impl FromIterator<Severity> for SeveritySlice {
    fn from_iter<T: IntoIterator<Item = Severity>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl ToStoreValue for SeveritySlice {
    fn to_store_value(&self) -> Result<StoreValue, osv_storage::Error> {
        osv_storage::encode_seq(&self.0)
    }
}

impl FromStoreValue for SeveritySlice {
    fn from_store_value(value: &StoreValue) -> Result<Self, osv_storage::Error> {
        osv_storage::decode(value, "SeveritySlice")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_once() {
        let mut severity = Severity::new(SeverityType::CvssV3, "7.5");
        assert_eq!(severity.score_value(), Ok(7.5));

        // the memoized outcome survives a replaced score
        severity.score = "9.8".to_string();
        assert_eq!(severity.score_value(), Ok(7.5));
        assert_eq!(severity.score_value_opt(), Some(7.5));
    }

    #[test]
    fn failure_is_memoized() {
        let mut severity = Severity::new(
            SeverityType::CvssV3,
            "CVSS:3.1/AV:N/AC:H/PR:N/UI:N/S:U/C:N/I:N/A:H",
        );
        let first = severity.score_value();
        assert!(matches!(first, Err(ScoreError::Invalid(_))));

        severity.score = "5.0".to_string();
        assert_eq!(severity.score_value(), first);
        assert_eq!(severity.score_value_opt(), None);
    }

    #[test]
    fn empty_score_is_an_error() {
        let severity = Severity::new(SeverityType::CvssV2, "");
        assert_eq!(severity.score_value(), Err(ScoreError::Empty));
        assert_eq!(severity.score_value(), Err(ScoreError::Empty));
    }

    #[test]
    fn fresh_instance_re_derives() {
        let severity = Severity::new(SeverityType::CvssV3, "x");
        assert!(severity.score_value().is_err());

        let severity = Severity::new(severity.severity_type.clone(), "4.2");
        assert_eq!(severity.score_value(), Ok(4.2));
    }

    #[test_log::test(rstest::rstest)]
    #[case(0.0, Rating::None)]
    #[case(0.1, Rating::Low)]
    #[case(3.9, Rating::Low)]
    #[case(4.0, Rating::Medium)]
    #[case(6.9, Rating::Medium)]
    #[case(7.0, Rating::High)]
    #[case(8.9, Rating::High)]
    #[case(9.0, Rating::Critical)]
    #[case(10.0, Rating::Critical)]
    fn rating_cut_offs(#[case] score: f64, #[case] expected: Rating) {
        assert_eq!(Rating::from_f64(score), expected);
    }

    #[test]
    fn rating_from_score() {
        let severity = Severity::new(SeverityType::CvssV3, "7.1");
        assert_eq!(severity.rating(), Some(Rating::High));

        let severity = Severity::new(SeverityType::CvssV3, "");
        assert_eq!(severity.rating(), None);
    }

    #[test]
    fn equality_ignores_the_cache() {
        let cached = Severity::new(SeverityType::CvssV3, "7.1");
        let _ = cached.score_value();

        assert_eq!(cached, Severity::new(SeverityType::CvssV3, "7.1"));
    }

    #[test]
    fn find_by_type() {
        let slice = SeveritySlice::from(vec![
            Severity::new(SeverityType::CvssV2, "5.0"),
            Severity::new(SeverityType::CvssV3, "7.1"),
            Severity::new(SeverityType::CvssV3, "9.8"),
        ]);

        let found = slice.find_by_type(&SeverityType::CvssV3).expect("must find");
        assert_eq!(found.score, "7.1");
        assert!(slice
            .find_by_type(&SeverityType::Other("CVSS_V4".to_string()))
            .is_none());
    }
}
