/// The storage layer handed over a value of an incompatible representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("can not scan {actual} into {expected}")]
pub struct ScanError {
    /// The representation actually handed over by the backend.
    pub actual: &'static str,
    /// The entity the value was supposed to decode into.
    pub expected: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
}
