//! Float parameter with encapsulated atomic storage.
//!
//! [`FloatParameter`] owns the metadata, range and formatter of one control
//! plus the atomic cell that carries its current value between threads.
//!
//! # Memory ordering
//!
//! The plain value is stored as `f64` bits in an `AtomicU64`. Writers publish
//! with `Ordering::Release` and readers load with `Ordering::Acquire`, so a
//! reader sees either the previous or the new value in full, and anything the
//! writer did before the store is visible to a reader that observes it.
//!
//! ```ignore
//! let cutoff = FloatParameter::hz("cutoff", "Cutoff", ParameterRange::new(20.0, 20000.0), 1000.0);
//! cutoff.set(25_000.0);
//! assert_eq!(cutoff.get(), 20_000.0); // clamped
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ParameterError;
use crate::parameter_format::Formatter;
use crate::parameter_info::ParameterInfo;
use crate::parameter_range::ParameterRange;
use crate::types::{ParameterId, ParameterValue};

/// Float parameter with atomic storage and automatic formatting.
pub struct FloatParameter {
    /// Parameter metadata (key, label, units, automation)
    info: ParameterInfo,
    /// Allowed plain range and its normalization curve
    range: ParameterRange,
    /// Formatter for display string conversion
    formatter: Formatter,
    /// Current plain value as `f64` bits
    value: AtomicU64,
}

impl FloatParameter {
    /// Create a generic float parameter.
    ///
    /// The range and default are validated when the parameter is declared
    /// on a [`ParameterStore`](crate::ParameterStore).
    pub fn new(
        key: &'static str,
        label: &'static str,
        range: ParameterRange,
        default: ParameterValue,
    ) -> Self {
        let formatter = Formatter::default();
        Self {
            info: ParameterInfo::new(key, label, default)
                .with_units(formatter.unit())
                .with_step_count(range.step_count()),
            range,
            formatter,
            value: AtomicU64::new(default.to_bits()),
        }
    }

    /// Create a frequency parameter displayed in Hz/kHz.
    pub fn hz(
        key: &'static str,
        label: &'static str,
        range: ParameterRange,
        default_hz: ParameterValue,
    ) -> Self {
        Self::new(key, label, range, default_hz).with_formatter(Formatter::Frequency)
    }

    /// Create a 0.0-1.0 parameter displayed as 0-100%.
    pub fn percent(key: &'static str, label: &'static str, default: ParameterValue) -> Self {
        Self::new(key, label, ParameterRange::new(0.0, 1.0), default)
            .with_formatter(Formatter::Percent { precision: 0 })
    }

    // === Builder methods ===

    /// Replace the formatter. The unit label follows the new formatter.
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.info.units = formatter.unit();
        self.formatter = formatter;
        self
    }

    /// Set the display precision of the current formatter.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.formatter = self.formatter.with_precision(precision);
        self
    }

    /// Disable automation for this parameter.
    pub fn non_automatable(mut self) -> Self {
        self.info = self.info.without_automation();
        self
    }

    pub(crate) fn with_id(mut self, id: ParameterId) -> Self {
        self.info.id = id;
        self
    }

    /// Check range and default before the parameter joins a store.
    pub(crate) fn validate(&self) -> Result<(), ParameterError> {
        self.range.validate(self.info.key)?;
        if !self.info.default.is_finite() || !self.range.contains(self.info.default) {
            return Err(ParameterError::DefaultOutOfRange {
                key: self.info.key.to_string(),
                default: self.info.default,
            });
        }
        Ok(())
    }

    // === Metadata ===

    pub fn info(&self) -> &ParameterInfo {
        &self.info
    }

    pub fn id(&self) -> ParameterId {
        self.info.id
    }

    pub fn key(&self) -> &'static str {
        self.info.key
    }

    pub fn label(&self) -> &'static str {
        self.info.label
    }

    pub fn default_value(&self) -> ParameterValue {
        self.info.default
    }

    pub fn range(&self) -> &ParameterRange {
        &self.range
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    // === Value access ===

    /// Current plain value. Lock-free, wait-free, allocation-free.
    #[inline]
    pub fn get(&self) -> ParameterValue {
        f64::from_bits(self.value.load(Ordering::Acquire))
    }

    /// Clamp and commit a plain value.
    ///
    /// Returns `false` (and keeps the current value) if `value` is not finite.
    #[inline]
    pub fn set(&self, value: ParameterValue) -> bool {
        if !value.is_finite() {
            return false;
        }
        self.store(self.range.clamp(value));
        true
    }

    /// Current value mapped to `[0, 1]` through the range's skew.
    #[inline]
    pub fn get_normalized(&self) -> ParameterValue {
        self.range.normalize(self.get())
    }

    /// Commit a normalized value. Returns `false` if it is not finite.
    #[inline]
    pub fn set_normalized(&self, normalized: ParameterValue) -> bool {
        if !normalized.is_finite() {
            return false;
        }
        self.store(self.range.denormalize(normalized));
        true
    }

    /// Restore the default value.
    pub fn reset(&self) {
        self.store(self.info.default);
    }

    /// Raw commit of an already validated plain value.
    #[inline]
    pub(crate) fn store(&self, plain: ParameterValue) {
        self.value.store(plain.to_bits(), Ordering::Release);
    }

    // === Display ===

    /// Format the current value with its unit (e.g. "1.00k Hz").
    pub fn display(&self) -> String {
        self.formatter.display(self.get())
    }

    /// Format an arbitrary plain value with this parameter's formatter.
    pub fn display_value(&self, plain: ParameterValue) -> String {
        self.formatter.display(plain)
    }

    /// Parse a display string to a clamped plain value.
    pub fn parse(&self, s: &str) -> Option<ParameterValue> {
        let plain = self.formatter.parse(s)?;
        plain.is_finite().then(|| self.range.clamp(plain))
    }
}

impl std::fmt::Debug for FloatParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloatParameter")
            .field("key", &self.info.key)
            .field("value", &self.get())
            .field("range", &self.range)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive() -> FloatParameter {
        FloatParameter::new("drive", "Drive", ParameterRange::new(0.0, 10.0).with_step(0.1), 1.0)
            .with_precision(1)
    }

    #[test]
    fn test_set_inside_range_is_exact() {
        let param = drive();
        assert!(param.set(3.37));
        assert_eq!(param.get(), 3.37);
    }

    #[test]
    fn test_set_clamps() {
        let param = drive();
        param.set(-2.0);
        assert_eq!(param.get(), 0.0);
        param.set(42.0);
        assert_eq!(param.get(), 10.0);
    }

    #[test]
    fn test_non_finite_is_ignored() {
        let param = drive();
        param.set(4.0);
        assert!(!param.set(f64::NAN));
        assert!(!param.set(f64::INFINITY));
        assert_eq!(param.get(), 4.0);
    }

    #[test]
    fn test_normalized_access() {
        let param = drive();
        param.set_normalized(0.5);
        assert!((param.get() - 5.0).abs() < 1e-10);
        assert!((param.get_normalized() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_reset_and_step_count() {
        let param = drive();
        param.set(9.0);
        param.reset();
        assert_eq!(param.get(), 1.0);
        assert_eq!(param.info().step_count, 100);
    }

    #[test]
    fn test_display_and_parse() {
        let range = ParameterRange::new(20.0, 20000.0);
        let cutoff = FloatParameter::hz("cutoff", "Cutoff", range, 1000.0);
        assert_eq!(cutoff.display(), "1.00k Hz");
        assert_eq!(cutoff.info().units, "Hz");
        assert_eq!(cutoff.parse("50 kHz"), Some(20000.0));

        let mix = FloatParameter::percent("mix", "Mix", 1.0);
        assert_eq!(mix.display(), "100 %");
    }

    #[test]
    fn test_validate_default() {
        let param = FloatParameter::new("x", "X", ParameterRange::new(0.0, 1.0), 2.0);
        assert!(matches!(
            param.validate(),
            Err(ParameterError::DefaultOutOfRange { .. })
        ));
    }

    #[test]
    fn test_automation_flag() {
        assert!(drive().info().automatable);
        assert!(!drive().non_automatable().info().automatable);
    }
}
