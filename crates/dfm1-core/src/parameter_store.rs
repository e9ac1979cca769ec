//! The canonical parameter set shared by the audio and UI threads.
//!
//! # Lifecycle
//!
//! Parameters are declared through `&mut self` while the store is privately
//! owned. Once it is wrapped in an `Arc` and handed to other threads, no
//! `&mut` access remains, so the set of keys cannot change while values
//! keep moving.
//!
//! ```ignore
//! let mut store = ParameterStore::new();
//! store.declare("mix", "Mix", ParameterRange::new(0.0, 1.0), 1.0)?;
//! let store = Arc::new(store);
//!
//! // UI thread
//! store.set("mix", 0.5)?;
//! // audio thread
//! let mix = store.value(mix_id);
//! ```
//!
//! # Change tracking
//!
//! Every committed write bumps a store-wide revision counter. Observers
//! (see [`ControlSurface`](crate::ControlSurface)) poll it to find out when
//! displayed values may be stale.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{ParameterError, StateError};
use crate::parameter_range::ParameterRange;
use crate::parameter_types::FloatParameter;
use crate::state::{ParameterEntry, PersistedState};
use crate::types::{ParameterId, ParameterValue};

/// Ordered, keyed collection of [`FloatParameter`]s.
#[derive(Debug, Default)]
pub struct ParameterStore {
    parameters: Vec<FloatParameter>,
    index: HashMap<&'static str, ParameterId>,
    revision: AtomicU64,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Declaration
    // =========================================================================

    /// Declare a generic float parameter.
    pub fn declare(
        &mut self,
        key: &'static str,
        label: &'static str,
        range: ParameterRange,
        default: ParameterValue,
    ) -> Result<ParameterId, ParameterError> {
        self.declare_parameter(FloatParameter::new(key, label, range, default))
    }

    /// Declare a fully configured parameter (formatter, units, automation).
    ///
    /// Fails if the key is taken, the range is degenerate or the default lies
    /// outside the range.
    pub fn declare_parameter(
        &mut self,
        parameter: FloatParameter,
    ) -> Result<ParameterId, ParameterError> {
        let key = parameter.key();
        if self.index.contains_key(key) {
            return Err(ParameterError::DuplicateKey(key.to_string()));
        }
        parameter.validate()?;

        let id = self.parameters.len();
        self.index.insert(key, id);
        self.parameters.push(parameter.with_id(id));
        Ok(id)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Resolve a key to its dense id.
    pub fn id_of(&self, key: &str) -> Option<ParameterId> {
        self.index.get(key).copied()
    }

    pub fn parameter(&self, key: &str) -> Option<&FloatParameter> {
        self.id_of(key).map(|id| &self.parameters[id])
    }

    pub fn by_id(&self, id: ParameterId) -> Option<&FloatParameter> {
        self.parameters.get(id)
    }

    /// Parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FloatParameter> {
        self.parameters.iter()
    }

    // =========================================================================
    // Value access
    // =========================================================================

    /// Most recently committed plain value. Never blocks, never allocates.
    pub fn get(&self, key: &str) -> Option<ParameterValue> {
        self.parameter(key).map(FloatParameter::get)
    }

    /// Audio-thread read by dense id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not returned by this store.
    #[inline]
    pub fn value(&self, id: ParameterId) -> ParameterValue {
        self.parameters[id].get()
    }

    /// Clamp and commit a plain value. Non-finite values are ignored.
    pub fn set(&self, key: &str, value: ParameterValue) -> Result<(), ParameterError> {
        let parameter = self
            .parameter(key)
            .ok_or_else(|| ParameterError::UnknownKey(key.to_string()))?;
        self.commit(parameter, parameter.set(value), value);
        Ok(())
    }

    /// Clamp and commit a plain value by dense id.
    pub fn set_by_id(&self, id: ParameterId, value: ParameterValue) {
        if let Some(parameter) = self.parameters.get(id) {
            self.commit(parameter, parameter.set(value), value);
        }
    }

    pub fn get_normalized(&self, key: &str) -> Option<ParameterValue> {
        self.parameter(key).map(FloatParameter::get_normalized)
    }

    /// Commit a normalized `[0, 1]` value (host automation).
    pub fn set_normalized(
        &self,
        key: &str,
        normalized: ParameterValue,
    ) -> Result<(), ParameterError> {
        let parameter = self
            .parameter(key)
            .ok_or_else(|| ParameterError::UnknownKey(key.to_string()))?;
        self.commit(parameter, parameter.set_normalized(normalized), normalized);
        Ok(())
    }

    /// Write every parameter's default value.
    pub fn reset_to_defaults(&self) {
        for parameter in &self.parameters {
            parameter.reset();
        }
        self.bump_revision();
    }

    /// Counter incremented by every committed write.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    fn commit(&self, parameter: &FloatParameter, committed: bool, requested: ParameterValue) {
        if committed {
            self.bump_revision();
        } else {
            log::debug!(
                "Ignoring non-finite value {} for parameter '{}'",
                requested,
                parameter.key()
            );
        }
    }

    fn bump_revision(&self) {
        self.revision.fetch_add(1, Ordering::AcqRel);
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Capture every current value, in declaration order.
    pub fn snapshot(&self) -> PersistedState {
        PersistedState::new(
            self.parameters
                .iter()
                .map(|p| ParameterEntry::new(p.key(), p.get()))
                .collect(),
        )
    }

    /// Replace every value from a snapshot, or change nothing.
    ///
    /// The format tag, version, every key and every value are validated
    /// before the first write. Unknown, duplicate and missing keys are
    /// rejected, as are values that are not finite or lie outside the
    /// declared range.
    ///
    /// # Ordering requirement
    ///
    /// Each parameter is written atomically but the set as a whole is not.
    /// Call this only while the host has suspended audio processing, or a
    /// block in flight may observe a mix of old and new values.
    pub fn restore(&self, state: &PersistedState) -> Result<(), StateError> {
        state.check_header()?;

        let mut staged: Vec<Option<ParameterValue>> = vec![None; self.parameters.len()];
        for entry in &state.parameters {
            let id = self
                .id_of(&entry.key)
                .ok_or_else(|| StateError::UnknownKey(entry.key.clone()))?;
            let parameter = &self.parameters[id];
            if !entry.value.is_finite() || !parameter.range().contains(entry.value) {
                return Err(StateError::InvalidValue {
                    key: entry.key.clone(),
                    value: entry.value,
                });
            }
            if staged[id].replace(entry.value).is_some() {
                return Err(StateError::DuplicateKey(entry.key.clone()));
            }
        }

        if let Some(missing) = staged.iter().position(Option::is_none) {
            return Err(StateError::MissingKey(
                self.parameters[missing].key().to_string(),
            ));
        }

        for (parameter, value) in self.parameters.iter().zip(staged.into_iter().flatten()) {
            parameter.store(value);
        }
        self.bump_revision();
        Ok(())
    }
}
