//! Numeric parameter ranges with skewed normalization.
//!
//! A [`ParameterRange`] maps plain values in `[min, max]` to the normalized
//! `[0, 1]` space hosts automate in. The skew factor bends that mapping:
//!
//! - `skew == 1.0` is linear
//! - `skew < 1.0` spends more of the normalized range on low values (cutoff)
//! - `skew > 1.0` spends more of it on high values
//!
//! The optional step is an interval hint for hosts and controls. Stored
//! values are never snapped to it, so a value set inside the range reads
//! back exactly.

use crate::error::ParameterError;

/// Inclusive numeric range with optional step and skew.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    min: f64,
    max: f64,
    step: Option<f64>,
    skew: f64,
}

impl ParameterRange {
    /// Create a continuous linear range.
    ///
    /// The range is validated when it is declared on a store, see
    /// [`validate`](Self::validate).
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            step: None,
            skew: 1.0,
        }
    }

    /// Set the step interval.
    pub const fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Set the skew factor.
    pub const fn with_skew(mut self, skew: f64) -> Self {
        self.skew = skew;
        self
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> Option<f64> {
        self.step
    }

    pub fn skew(&self) -> f64 {
        self.skew
    }

    /// Check that the range can hold a parameter.
    pub fn validate(&self, key: &str) -> Result<(), ParameterError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(ParameterError::DegenerateRange {
                key: key.to_string(),
                min: self.min,
                max: self.max,
            });
        }
        if !(self.skew.is_finite() && self.skew > 0.0) {
            return Err(ParameterError::InvalidRange {
                key: key.to_string(),
                reason: "skew must be positive",
            });
        }
        if let Some(step) = self.step {
            if !(step.is_finite() && step > 0.0) {
                return Err(ParameterError::InvalidRange {
                    key: key.to_string(),
                    reason: "step must be positive",
                });
            }
        }
        Ok(())
    }

    /// Whether `value` lies inside `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp a plain value into the range.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Map a plain value to `[0, 1]`.
    #[inline]
    pub fn normalize(&self, plain: f64) -> f64 {
        let proportion = (self.clamp(plain) - self.min) / (self.max - self.min);
        if self.skew == 1.0 {
            proportion
        } else {
            proportion.powf(self.skew)
        }
    }

    /// Map a normalized value in `[0, 1]` back to the plain range.
    #[inline]
    pub fn denormalize(&self, normalized: f64) -> f64 {
        let normalized = normalized.clamp(0.0, 1.0);
        let proportion = if self.skew == 1.0 {
            normalized
        } else {
            normalized.powf(1.0 / self.skew)
        };
        self.clamp(self.min + (self.max - self.min) * proportion)
    }

    /// Number of discrete intervals for hosts. 0 = continuous.
    pub fn step_count(&self) -> u32 {
        match self.step {
            Some(step) if step >= self.max - self.min => 1,
            Some(step) => ((self.max - self.min) / step).round() as u32,
            None => 0,
        }
    }
}
