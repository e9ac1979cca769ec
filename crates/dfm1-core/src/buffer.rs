//! Audio block passed to the processor for one host callback.
//!
//! The block borrows the host's channel slices for exactly one `process`
//! call and is processed in place. Constructing a block never allocates.

use crate::types::Sample;

/// Per-channel audio samples, processed in place.
///
/// All channels are viewed with the same length: the shortest slice the
/// host supplied.
pub struct AudioBlock<'a, 'b> {
    channels: &'a mut [&'b mut [Sample]],
    num_samples: usize,
}

impl<'a, 'b> AudioBlock<'a, 'b> {
    pub fn new(channels: &'a mut [&'b mut [Sample]]) -> Self {
        let num_samples = channels.iter().map(|c| c.len()).min().unwrap_or(0);
        Self {
            channels,
            num_samples,
        }
    }

    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    #[inline]
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_samples == 0 || self.channels.is_empty()
    }

    pub fn channel(&self, index: usize) -> Option<&[Sample]> {
        let n = self.num_samples;
        self.channels.get(index).map(|c| &c[..n])
    }

    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> Option<&mut [Sample]> {
        let n = self.num_samples;
        self.channels.get_mut(index).map(|c| &mut c[..n])
    }

    /// Iterate mutably over every channel.
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut [Sample]> + use<'_, 'a, 'b> {
        let n = self.num_samples;
        self.channels.iter_mut().map(move |c| &mut c[..n])
    }

    /// Zero one channel. Out-of-range indices are ignored.
    pub fn clear_channel(&mut self, index: usize) {
        if let Some(channel) = self.channel_mut(index) {
            channel.fill(0.0);
        }
    }
}
