use osv_storage::{FromStoreValue, StoreValue, ToStoreValue};
use packageurl::PackageUrl;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A package-manager namespace, as used by the `ecosystem` field.
///
/// The upstream format is explicitly extensible: values not known here are
/// carried in [`Ecosystem::Other`] and round-trip unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ecosystem {
    #[serde(rename = "Alpine")]
    Alpine,
    #[serde(rename = "Android")]
    Android,
    #[serde(rename = "Bitnami")]
    Bitnami,
    #[serde(rename = "CRAN")]
    Cran,
    #[serde(rename = "crates.io")]
    CratesIo,
    #[serde(rename = "Debian")]
    Debian,
    #[serde(rename = "Go")]
    Go,
    #[serde(rename = "Hackage")]
    Hackage,
    #[serde(rename = "Hex")]
    Hex,
    #[serde(rename = "Linux")]
    Linux,
    #[serde(rename = "Maven")]
    Maven,
    #[serde(rename = "npm")]
    Npm,
    #[serde(rename = "NuGet")]
    NuGet,
    #[serde(rename = "OSS-Fuzz")]
    OssFuzz,
    #[serde(rename = "Packagist")]
    Packagist,
    #[serde(rename = "Pub")]
    Pub,
    #[serde(rename = "PyPI")]
    PyPi,
    #[serde(rename = "RubyGems")]
    RubyGems,
    #[serde(rename = "SwiftURL")]
    SwiftUrl,
    #[serde(untagged)]
    Other(String),
}

impl Ecosystem {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Alpine => "Alpine",
            Self::Android => "Android",
            Self::Bitnami => "Bitnami",
            Self::Cran => "CRAN",
            Self::CratesIo => "crates.io",
            Self::Debian => "Debian",
            Self::Go => "Go",
            Self::Hackage => "Hackage",
            Self::Hex => "Hex",
            Self::Linux => "Linux",
            Self::Maven => "Maven",
            Self::Npm => "npm",
            Self::NuGet => "NuGet",
            Self::OssFuzz => "OSS-Fuzz",
            Self::Packagist => "Packagist",
            Self::Pub => "Pub",
            Self::PyPi => "PyPI",
            Self::RubyGems => "RubyGems",
            Self::SwiftUrl => "SwiftURL",
            Self::Other(inner) => inner,
        }
    }
}

impl Default for Ecosystem {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl Display for Ecosystem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Ecosystem {
    fn from(value: &str) -> Self {
        match value {
            "Alpine" => Self::Alpine,
            "Android" => Self::Android,
            "Bitnami" => Self::Bitnami,
            "CRAN" => Self::Cran,
            "crates.io" => Self::CratesIo,
            "Debian" => Self::Debian,
            "Go" => Self::Go,
            "Hackage" => Self::Hackage,
            "Hex" => Self::Hex,
            "Linux" => Self::Linux,
            "Maven" => Self::Maven,
            "npm" => Self::Npm,
            "NuGet" => Self::NuGet,
            "OSS-Fuzz" => Self::OssFuzz,
            "Packagist" => Self::Packagist,
            "Pub" => Self::Pub,
            "PyPI" => Self::PyPi,
            "RubyGems" => Self::RubyGems,
            "SwiftURL" => Self::SwiftUrl,
            other => Self::Other(other.to_string()),
        }
    }
}

/// The affected software package.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    #[serde(default)]
    pub ecosystem: Ecosystem,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
}

impl Package {
    /// The group part of a Maven `group:artifact` coordinate, taken from
    /// everything before the first `:` of the name.
    pub fn group_id(&self) -> Option<&str> {
        self.name.split_once(':').map(|(group, _)| group)
    }

    /// The artifact part of a Maven `group:artifact` coordinate.
    pub fn artifact_id(&self) -> Option<&str> {
        self.name.split_once(':').map(|(_, artifact)| artifact)
    }

    /// Parse the `purl` field, if present and well-formed.
    pub fn package_url(&self) -> Option<PackageUrl<'static>> {
        self.purl
            .as_deref()
            .and_then(|purl| PackageUrl::from_str(purl).ok())
    }
}

impl ToStoreValue for Package {
    fn to_store_value(&self) -> Result<StoreValue, osv_storage::Error> {
        osv_storage::encode(self)
    }
}

impl FromStoreValue for Package {
    fn from_store_value(value: &StoreValue) -> Result<Self, osv_storage::Error> {
        osv_storage::decode(value, "Package")
    }
}
