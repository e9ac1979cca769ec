//! Channel layouts and layout negotiation.
//!
//! Hosts propose a [`BusLayout`] before processing starts. The filter only
//! accepts mono or stereo main buses; anything else is refused here so that
//! `process` never has to handle an unexpected channel count.

use crate::error::LayoutError;
use crate::types::MAX_CHANNELS;

/// Channel set of one bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelSet {
    /// Bus is switched off.
    Disabled,
    Mono,
    #[default]
    Stereo,
    /// Any other arrangement, by channel count (e.g. 4 for quadraphonic).
    Discrete(u32),
}

impl ChannelSet {
    /// Channel set with the given count.
    pub const fn from_channel_count(count: u32) -> Self {
        match count {
            0 => Self::Disabled,
            1 => Self::Mono,
            2 => Self::Stereo,
            n => Self::Discrete(n),
        }
    }

    pub const fn quadraphonic() -> Self {
        Self::Discrete(4)
    }

    pub const fn channel_count(&self) -> u32 {
        match self {
            Self::Disabled => 0,
            Self::Mono => 1,
            Self::Stereo => 2,
            Self::Discrete(n) => *n,
        }
    }

    /// Mono or stereo.
    pub const fn is_supported(&self) -> bool {
        matches!(self.channel_count(), 1 | 2)
    }
}

/// Main bus layout proposed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BusLayout {
    pub main_input: ChannelSet,
    pub main_output: ChannelSet,
}

impl BusLayout {
    pub const fn new(main_input: ChannelSet, main_output: ChannelSet) -> Self {
        Self {
            main_input,
            main_output,
        }
    }

    pub const fn mono() -> Self {
        Self::new(ChannelSet::Mono, ChannelSet::Mono)
    }

    pub const fn stereo() -> Self {
        Self::new(ChannelSet::Stereo, ChannelSet::Stereo)
    }

    pub fn main_input_channels(&self) -> usize {
        self.main_input.channel_count() as usize
    }

    pub fn main_output_channels(&self) -> usize {
        self.main_output.channel_count() as usize
    }

    /// Accept mono or stereo on both main buses.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.main_output.is_supported() {
            return Err(LayoutError::UnsupportedOutput(self.main_output.channel_count()));
        }
        if !self.main_input.is_supported() {
            return Err(LayoutError::UnsupportedInput(self.main_input.channel_count()));
        }
        debug_assert!(self.main_output_channels() <= MAX_CHANNELS);
        Ok(())
    }

    pub fn is_supported(&self) -> bool {
        self.validate().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stereo() {
        let layout = BusLayout::default();
        assert_eq!(layout, BusLayout::stereo());
        assert_eq!(layout.main_input_channels(), 2);
        assert_eq!(layout.main_output_channels(), 2);
    }

    #[test]
    fn test_accepts_mono_and_stereo() {
        assert!(BusLayout::mono().is_supported());
        assert!(BusLayout::stereo().is_supported());
        assert!(BusLayout::new(ChannelSet::Mono, ChannelSet::Stereo).is_supported());
    }

    #[test]
    fn test_rejects_other_layouts() {
        let quad = BusLayout::new(ChannelSet::quadraphonic(), ChannelSet::quadraphonic());
        assert_eq!(quad.validate(), Err(LayoutError::UnsupportedOutput(4)));

        let surround_in = BusLayout::new(ChannelSet::Discrete(6), ChannelSet::Stereo);
        assert_eq!(surround_in.validate(), Err(LayoutError::UnsupportedInput(6)));

        let silent = BusLayout::new(ChannelSet::Stereo, ChannelSet::Disabled);
        assert!(!silent.is_supported());
    }

    #[test]
    fn test_from_channel_count() {
        assert_eq!(ChannelSet::from_channel_count(0), ChannelSet::Disabled);
        assert_eq!(ChannelSet::from_channel_count(1), ChannelSet::Mono);
        assert_eq!(ChannelSet::from_channel_count(2), ChannelSet::Stereo);
        assert_eq!(ChannelSet::from_channel_count(4), ChannelSet::quadraphonic());
    }
}
