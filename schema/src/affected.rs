use crate::package::{Ecosystem, Package};
use crate::range::Range;
use crate::severity::SeveritySlice;
use osv_storage::{FromStoreValue, StoreValue, ToStoreValue};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::ops::{Deref, DerefMut};

/// One impact statement: a package plus the ranges and versions affected.
///
/// `E` is the payload controlled by the package ecosystem, `D` the payload
/// controlled by the hosting database implementation. Neither is inspected
/// by the model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "E: serde::Deserialize<'de>, D: serde::Deserialize<'de>"))]
pub struct Affected<E = Value, D = Value> {
    /// Absent in malformed input; the helpers below tolerate that.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<Package>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<Range<D>>,
    #[serde(default, skip_serializing_if = "SeveritySlice::is_empty")]
    pub severity: SeveritySlice,
    /// Explicit version enumeration, the recommended supplement for
    /// `ECOSYSTEM` ranges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecosystem_specific: Option<E>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_specific: Option<D>,
}

impl<E, D> Affected<E, D> {
    /// The ecosystem of the affected package, if a package is present.
    pub fn ecosystem(&self) -> Option<&Ecosystem> {
        self.package.as_ref().map(|package| &package.ecosystem)
    }

    /// Whether the affected package belongs to the given ecosystem. A
    /// missing package never matches.
    pub fn matches_ecosystem(&self, ecosystem: &Ecosystem) -> bool {
        self.ecosystem() == Some(ecosystem)
    }
}

impl<E, D> Default for Affected<E, D> {
    fn default() -> Self {
        Self {
            package: None,
            ranges: Vec::new(),
            severity: SeveritySlice::default(),
            versions: Vec::new(),
            ecosystem_specific: None,
            database_specific: None,
        }
    }
}

impl<E, D> ToStoreValue for Affected<E, D>
where
    E: Serialize,
    D: Serialize,
{
    fn to_store_value(&self) -> Result<StoreValue, osv_storage::Error> {
        osv_storage::encode(self)
    }
}

impl<E, D> FromStoreValue for Affected<E, D>
where
    E: DeserializeOwned,
    D: DeserializeOwned,
{
    fn from_store_value(value: &StoreValue) -> Result<Self, osv_storage::Error> {
        osv_storage::decode(value, "Affected")
    }
}

/// An ordered list of impact statements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(deserialize = "E: serde::Deserialize<'de>, D: serde::Deserialize<'de>"))]
pub struct AffectedSlice<E = Value, D = Value>(pub Vec<Affected<E, D>>);

impl<E, D> AffectedSlice<E, D> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether any entry's package belongs to the given ecosystem.
    /// Entries without a package are skipped, not an error.
    pub fn has_ecosystem(&self, ecosystem: &Ecosystem) -> bool {
        self.0
            .iter()
            .any(|affected| affected.matches_ecosystem(ecosystem))
    }
}

impl<E, D> AffectedSlice<E, D>
where
    E: Clone,
    D: Clone,
{
    /// Keep the entries matching the predicate, preserving order.
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Affected<E, D>) -> bool,
    {
        Self(
            self.0
                .iter()
                .filter(|affected| predicate(affected))
                .cloned()
                .collect(),
        )
    }

    /// Keep the entries affecting the given ecosystem, preserving order.
    pub fn filter_by_ecosystem(&self, ecosystem: &Ecosystem) -> Self {
        self.filter(|affected| affected.matches_ecosystem(ecosystem))
    }
}

impl<E, D> Default for AffectedSlice<E, D> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<E, D> Deref for AffectedSlice<E, D> {
    type Target = Vec<Affected<E, D>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<E, D> DerefMut for AffectedSlice<E, D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<E, D> From<Vec<Affected<E, D>>> for AffectedSlice<E, D> {
    fn from(value: Vec<Affected<E, D>>) -> Self {
        Self(value)
    }
}

impl<E, D> FromIterator<Affected<E, D>> for AffectedSlice<E, D> {
    fn from_iter<T: IntoIterator<Item = Affected<E, D>>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<E, D> ToStoreValue for AffectedSlice<E, D>
where
    E: Serialize,
    D: Serialize,
{
    fn to_store_value(&self) -> Result<StoreValue, osv_storage::Error> {
        osv_storage::encode_seq(&self.0)
    }
}

impl<E, D> FromStoreValue for AffectedSlice<E, D>
where
    E: DeserializeOwned,
    D: DeserializeOwned,
{
    fn from_store_value(value: &StoreValue) -> Result<Self, osv_storage::Error> {
        osv_storage::decode(value, "AffectedSlice")
    }
}
