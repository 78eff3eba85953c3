use crate::app::state::{RootState, SliceKey};
use crate::persist::error::PersistError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The durable projection of [`RootState`]: a schema version plus the
/// whitelisted slices, each under its camelCase key.
///
/// ```json
/// {"version": 1, "auth": {"userId": "u1", "status": "authenticated", ...}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub version: u32,
    #[serde(flatten)]
    pub slices: BTreeMap<String, Value>,
}

impl PersistedRecord {
    /// Capture the whitelisted slices of `state`.
    pub fn capture(
        state: &RootState,
        whitelist: &[SliceKey],
        version: u32,
    ) -> Result<Self, serde_json::Error> {
        let mut slices = BTreeMap::new();
        for key in whitelist {
            slices.insert(key.as_str().to_string(), state.slice_json(*key)?);
        }
        Ok(Self { version, slices })
    }

    pub fn slice(&self, key: SliceKey) -> Option<&Value> {
        self.slices.get(key.as_str())
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        serde_json::to_string(self).map_err(PersistError::Encode)
    }

    pub fn from_json(key: &str, raw: &str) -> Result<Self, PersistError> {
        serde_json::from_str(raw).map_err(|source| PersistError::Corrupt {
            key: key.to_string(),
            source,
        })
    }
}
