use osv_storage::{FromStoreValue, StoreValue, ToStoreValue};
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// Alternative identifiers of the same vulnerability (CVE, GHSA, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Aliases(pub Vec<String>);

impl Aliases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The first alias carrying a CVE number, upper-cased.
    pub fn get_cve(&self) -> Option<String> {
        self.0
            .iter()
            .map(|alias| alias.to_uppercase())
            .find(|alias| alias.starts_with("CVE-"))
    }

    /// Keep the aliases matching the predicate, preserving order.
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&str) -> bool,
    {
        Self(
            self.0
                .iter()
                .filter(|alias| predicate(alias))
                .cloned()
                .collect(),
        )
    }
}

impl Deref for Aliases {
    type Target = Vec<String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Aliases {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<String>> for Aliases {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}

impl FromIterator<String> for Aliases {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for Aliases {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self(iter.into_iter().map(|alias| alias.to_string()).collect())
    }
}

impl ToStoreValue for Aliases {
    fn to_store_value(&self) -> Result<StoreValue, osv_storage::Error> {
        osv_storage::encode_seq(&self.0)
    }
}

impl FromStoreValue for Aliases {
    fn from_store_value(value: &StoreValue) -> Result<Self, osv_storage::Error> {
        osv_storage::decode(value, "Aliases")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test_log::test(rstest::rstest)]
    #[case(&["GHSA-vxv8-r8q2-63xw", "cve-2023-0001"], Some("CVE-2023-0001"))]
    #[case(&["GHSA-vxv8-r8q2-63xw", "CVE-2021-37635"], Some("CVE-2021-37635"))]
    #[case(&["CVE-2021-37635", "CVE-2024-0001"], Some("CVE-2021-37635"))]
    #[case(&["GHSA-vxv8-r8q2-63xw"], None)]
    #[case(&[], None)]
    fn get_cve(#[case] aliases: &[&str], #[case] expected: Option<&str>) {
        let aliases = aliases.iter().copied().collect::<Aliases>();
        assert_eq!(aliases.get_cve().as_deref(), expected);
    }

    #[test]
    fn filter() {
        let aliases = ["GHSA-1", "CVE-1", "GHSA-2"].into_iter().collect::<Aliases>();
        let ghsa = aliases.filter(|alias| alias.starts_with("GHSA-"));
        assert_eq!(ghsa.0, vec!["GHSA-1".to_string(), "GHSA-2".to_string()]);
    }
}
