//! A storage-agnostic model of the Open Source Vulnerability (OSV) record
//! format, for vulnerability-database implementations to build on.
//!
//! The record hierarchy ([`OsvSchema`] → [`affected::Affected`] →
//! [`range::Range`] → [`event::Event`]) is parameterized over two opaque
//! extension payloads: one controlled by the package ecosystem, one by the
//! hosting database implementation. Every node supports two serialization
//! paths: the JSON/YAML document format, and a single opaque storage
//! column through the [`osv_storage`] traits.

pub mod affected;
pub mod aliases;
pub mod credit;
pub mod error;
pub mod event;
pub mod package;
pub mod range;
pub mod reference;
pub mod related;
pub mod schema;
pub mod severity;

pub use error::Error;
pub use schema::OsvSchema;

use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

/// Parse an OSV document from JSON.
pub fn from_json<E, D>(data: &[u8]) -> Result<OsvSchema<E, D>, Error>
where
    E: DeserializeOwned,
    D: DeserializeOwned,
{
    Ok(serde_json::from_slice(data)?)
}

/// Parse an OSV document from YAML.
pub fn from_yaml<E, D>(data: &[u8]) -> Result<OsvSchema<E, D>, Error>
where
    E: DeserializeOwned,
    D: DeserializeOwned,
{
    Ok(serde_yml::from_slice(data)?)
}

/// Parse an OSV document, trying JSON first and YAML second.
pub fn parse<E, D>(buffer: &[u8]) -> Result<OsvSchema<E, D>, Error>
where
    E: DeserializeOwned,
    D: DeserializeOwned,
{
    from_json(buffer).or_else(|_| from_yaml(buffer))
}

/// Read a file and parse it as an OSV document.
pub fn from_file<E, D>(path: impl AsRef<Path>) -> Result<OsvSchema<E, D>, Error>
where
    E: DeserializeOwned,
    D: DeserializeOwned,
{
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    log::debug!("read {} bytes from {}", data.len(), path.display());
    parse(&data)
}

/// Serialize an OSV document as JSON.
pub fn to_json<E, D>(schema: &OsvSchema<E, D>) -> Result<Vec<u8>, Error>
where
    E: Serialize,
    D: Serialize,
{
    Ok(serde_json::to_vec(schema)?)
}

/// Serialize an OSV document as YAML.
pub fn to_yaml<E, D>(schema: &OsvSchema<E, D>) -> Result<String, Error>
where
    E: Serialize,
    D: Serialize,
{
    Ok(serde_yml::to_string(schema)?)
}
