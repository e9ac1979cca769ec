//! Persisted parameter state.
//!
//! A [`PersistedState`] is the session snapshot hosts save with a project.
//! It serializes to a small JSON document:
//!
//! ```text
//! {"format":"dfm1-filter-state","version":1,
//!  "parameters":[{"key":"cutoff","value":1000.0}, ...]}
//! ```
//!
//! Entries keep declaration order and `serde_json` writes `f64` in shortest
//! round-trip form, so snapshot -> bytes -> restore -> snapshot reproduces the
//! same bytes.

use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::types::ParameterValue;

/// Format tag written into every snapshot.
pub const STATE_FORMAT: &str = "dfm1-filter-state";

/// Current schema version.
pub const STATE_VERSION: u32 = 1;

/// One parameter value within a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterEntry {
    pub key: String,
    pub value: ParameterValue,
}

impl ParameterEntry {
    pub fn new(key: impl Into<String>, value: ParameterValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Serialized snapshot of every parameter value plus a format tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersistedState {
    pub format: String,
    pub version: u32,
    pub parameters: Vec<ParameterEntry>,
}

impl PersistedState {
    /// Create a snapshot with the current format tag and version.
    pub fn new(parameters: Vec<ParameterEntry>) -> Self {
        Self {
            format: STATE_FORMAT.to_string(),
            version: STATE_VERSION,
            parameters,
        }
    }

    /// Encode as JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StateError> {
        serde_json::to_vec(self).map_err(|e| StateError::Malformed(e.to_string()))
    }

    /// Decode JSON bytes and check the header.
    ///
    /// Entry-level validation needs the declared parameters and happens in
    /// [`ParameterStore::restore`](crate::ParameterStore::restore).
    pub fn from_bytes(data: &[u8]) -> Result<Self, StateError> {
        let state: Self =
            serde_json::from_slice(data).map_err(|e| StateError::Malformed(e.to_string()))?;
        state.check_header()?;
        Ok(state)
    }

    /// Validate the format tag and version.
    pub fn check_header(&self) -> Result<(), StateError> {
        if self.format != STATE_FORMAT {
            return Err(StateError::WrongFormat(self.format.clone()));
        }
        if self.version != STATE_VERSION {
            return Err(StateError::UnsupportedVersion(self.version));
        }
        Ok(())
    }

    /// Look up an entry's value by key.
    pub fn value(&self, key: &str) -> Option<ParameterValue> {
        self.parameters
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value)
    }
}
