//! Processor lifecycle state machine.
//!
//! ```text
//! Uninitialized --prepare--> Prepared --process--> Processing --+
//!                               ^                      ^        | process
//!                               |                      +--------+
//!        Released <--release----+----------------------+
//!           |
//!           +--prepare--> Prepared
//! ```
//!
//! `prepare` is accepted from every state so hosts can re-prepare after a
//! sample-rate change or after `release`. `release` is idempotent. Calling
//! `process` outside `Prepared`/`Processing` breaks the host contract and is
//! caught by a debug assertion, not recovered from.

use crate::error::LifecycleError;

/// Settings recorded by `prepare`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSetup {
    pub sample_rate: f64,
    pub max_block_size: usize,
}

impl ProcessSetup {
    pub fn new(sample_rate: f64, max_block_size: usize) -> Result<Self, LifecycleError> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(LifecycleError::InvalidSampleRate(sample_rate));
        }
        if max_block_size == 0 {
            return Err(LifecycleError::InvalidBlockSize(max_block_size));
        }
        Ok(Self {
            sample_rate,
            max_block_size,
        })
    }
}

/// Lifecycle states of a processor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Lifecycle {
    /// Constructed, never prepared.
    #[default]
    Uninitialized,
    /// Prepared, no block processed since.
    Prepared(ProcessSetup),
    /// At least one block processed since the last prepare.
    Processing(ProcessSetup),
    /// Resources released.
    Released,
}

impl Lifecycle {
    /// Enter `Prepared` with new settings.
    pub fn prepare(&mut self, setup: ProcessSetup) {
        log::debug!(
            "Preparing processor ({} Hz, max {} samples) from {:?}",
            setup.sample_rate,
            setup.max_block_size,
            self
        );
        *self = Self::Prepared(setup);
    }

    /// Record that a block is being processed. Real-time safe.
    #[inline]
    pub fn begin_block(&mut self) {
        if let Self::Prepared(setup) = *self {
            *self = Self::Processing(setup);
        }
    }

    /// Enter `Released`. Returns `false` if already released.
    pub fn release(&mut self) -> bool {
        if matches!(self, Self::Released) {
            return false;
        }
        log::debug!("Releasing processor from {:?}", self);
        *self = Self::Released;
        true
    }

    #[inline]
    pub fn can_process(&self) -> bool {
        matches!(self, Self::Prepared(_) | Self::Processing(_))
    }

    pub fn setup(&self) -> Option<ProcessSetup> {
        match self {
            Self::Prepared(setup) | Self::Processing(setup) => Some(*setup),
            _ => None,
        }
    }

    pub fn sample_rate(&self) -> Option<f64> {
        self.setup().map(|s| s.sample_rate)
    }

    pub fn max_block_size(&self) -> Option<usize> {
        self.setup().map(|s| s.max_block_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_validation() {
        assert!(ProcessSetup::new(48_000.0, 512).is_ok());
        assert_eq!(
            ProcessSetup::new(0.0, 512),
            Err(LifecycleError::InvalidSampleRate(0.0))
        );
        assert!(ProcessSetup::new(f64::NAN, 512).is_err());
        assert_eq!(
            ProcessSetup::new(44_100.0, 0),
            Err(LifecycleError::InvalidBlockSize(0))
        );
    }

    #[test]
    fn test_transitions() {
        let setup = ProcessSetup::new(48_000.0, 256).unwrap();
        let mut state = Lifecycle::default();
        assert!(!state.can_process());

        state.prepare(setup);
        assert_eq!(state, Lifecycle::Prepared(setup));
        assert!(state.can_process());

        state.begin_block();
        assert_eq!(state, Lifecycle::Processing(setup));
        state.begin_block();
        assert_eq!(state, Lifecycle::Processing(setup));

        assert!(state.release());
        assert!(!state.release());
        assert!(!state.can_process());
        assert_eq!(state.sample_rate(), None);
    }

    #[test]
    fn test_prepare_is_idempotent_and_reenterable() {
        let first = ProcessSetup::new(44_100.0, 128).unwrap();
        let second = ProcessSetup::new(96_000.0, 1024).unwrap();
        let mut state = Lifecycle::default();

        state.prepare(first);
        state.prepare(first);
        assert_eq!(state, Lifecycle::Prepared(first));

        state.begin_block();
        state.prepare(second);
        assert_eq!(state.max_block_size(), Some(1024));

        state.release();
        state.prepare(first);
        assert_eq!(state.sample_rate(), Some(44_100.0));
    }

    #[test]
    fn test_begin_block_outside_prepared_is_inert() {
        let mut state = Lifecycle::Uninitialized;
        state.begin_block();
        assert_eq!(state, Lifecycle::Uninitialized);
    }
}
