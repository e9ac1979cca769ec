//! Static description of a parameter, as reported to hosts.

use crate::types::{ParameterId, ParameterValue};

/// What a host needs to list and automate one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInfo {
    /// Declaration index, assigned when the parameter joins a store.
    pub id: ParameterId,
    /// Stable identity written into persisted state.
    pub key: &'static str,
    pub label: &'static str,
    /// Unit shown after the value ("Hz", "%", or empty).
    pub units: &'static str,
    pub default: ParameterValue,
    /// Discrete intervals across the range, 0 for continuous.
    pub step_count: u32,
    /// Hosts may record and play back automation.
    pub automatable: bool,
}

impl ParameterInfo {
    pub const fn new(key: &'static str, label: &'static str, default: ParameterValue) -> Self {
        Self {
            id: 0,
            key,
            label,
            units: "",
            default,
            step_count: 0,
            automatable: true,
        }
    }

    pub const fn with_units(mut self, units: &'static str) -> Self {
        self.units = units;
        self
    }

    pub const fn with_step_count(mut self, step_count: u32) -> Self {
        self.step_count = step_count;
        self
    }

    pub const fn without_automation(mut self) -> Self {
        self.automatable = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let info = ParameterInfo::new("cutoff", "Cutoff", 1000.0)
            .with_units("Hz")
            .with_step_count(19_980);
        assert_eq!(info.units, "Hz");
        assert_eq!(info.step_count, 19_980);
        assert!(info.automatable);
        assert!(!info.without_automation().automatable);
    }
}
