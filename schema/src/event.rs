use osv_storage::{FromStoreValue, StoreValue, ToStoreValue};
use serde::{Deserialize, Serialize};

/// One version boundary inside a [`Range`](crate::range::Range).
///
/// A well-formed event carries exactly one of the four fields. The model
/// does not reject events carrying more (or none); consumers check
/// presence through the predicates, which treat a missing field and an
/// empty string the same way.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduced: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_affected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

impl Event {
    pub fn is_introduced(&self) -> bool {
        present(&self.introduced)
    }

    pub fn is_fixed(&self) -> bool {
        present(&self.fixed)
    }

    pub fn is_last_affected(&self) -> bool {
        present(&self.last_affected)
    }

    pub fn is_limit(&self) -> bool {
        present(&self.limit)
    }
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|value| !value.is_empty())
}

impl ToStoreValue for Event {
    fn to_store_value(&self) -> Result<StoreValue, osv_storage::Error> {
        osv_storage::encode(self)
    }
}

impl FromStoreValue for Event {
    fn from_store_value(value: &StoreValue) -> Result<Self, osv_storage::Error> {
        osv_storage::decode(value, "Event")
    }
}
