//! Per-block sample pipeline.
//!
//! For every block the processor reads the four parameters once, clears the
//! output channels that have no matching input, feeds channel 0 through the
//! transform and scales every channel by `mix`. The audio path neither
//! allocates nor locks.

use std::sync::Arc;

use dfm1_core::{
    AudioBlock, BusLayout, LayoutError, Lifecycle, LifecycleError, ParameterError, ParameterId,
    ParameterStore, ProcessSetup, TransformProvider,
};

use crate::parameters::{CUTOFF, DRIVE, MIX, RESONANCE};

/// Dense ids of the four parameters, resolved once at construction.
#[derive(Debug, Clone, Copy)]
struct ParameterIds {
    cutoff: ParameterId,
    resonance: ParameterId,
    drive: ParameterId,
    mix: ParameterId,
}

impl ParameterIds {
    fn resolve(store: &ParameterStore) -> Result<Self, ParameterError> {
        let id = |key: &str| {
            store
                .id_of(key)
                .ok_or_else(|| ParameterError::UnknownKey(key.to_string()))
        };
        Ok(Self {
            cutoff: id(CUTOFF)?,
            resonance: id(RESONANCE)?,
            drive: id(DRIVE)?,
            mix: id(MIX)?,
        })
    }
}

/// The filter's audio processor.
pub struct FilterProcessor<T> {
    store: Arc<ParameterStore>,
    transform: T,
    ids: ParameterIds,
    layout: BusLayout,
    lifecycle: Lifecycle,
}

impl<T: TransformProvider> FilterProcessor<T> {
    /// Create a processor reading from `store`, which must declare the four
    /// filter parameters.
    pub fn new(store: Arc<ParameterStore>, transform: T) -> Result<Self, ParameterError> {
        let ids = ParameterIds::resolve(&store)?;
        Ok(Self {
            store,
            transform,
            ids,
            layout: BusLayout::default(),
            lifecycle: Lifecycle::default(),
        })
    }

    /// Record the processing settings. Valid in every state.
    pub fn prepare(
        &mut self,
        sample_rate: f64,
        max_block_size: usize,
    ) -> Result<(), LifecycleError> {
        let setup = ProcessSetup::new(sample_rate, max_block_size)?;
        self.lifecycle.prepare(setup);
        Ok(())
    }

    /// Process one block in place.
    ///
    /// Must only be called between `prepare` and `release`.
    pub fn process(&mut self, block: &mut AudioBlock<'_, '_>) {
        debug_assert!(
            self.lifecycle.can_process(),
            "process called in state {:?}",
            self.lifecycle
        );
        self.lifecycle.begin_block();

        let cutoff = self.store.value(self.ids.cutoff);
        let resonance = self.store.value(self.ids.resonance);
        let drive = self.store.value(self.ids.drive);
        let mix = self.store.value(self.ids.mix) as f32;

        for channel in self.layout.main_input_channels()..block.num_channels() {
            block.clear_channel(channel);
        }

        if let Some(channel) = block.channel_mut(0) {
            for sample in channel.iter_mut() {
                *sample = self
                    .transform
                    .apply(f64::from(*sample), cutoff, resonance, drive) as f32;
            }
        }

        for channel in block.channels_mut() {
            for sample in channel.iter_mut() {
                *sample *= mix;
            }
        }
    }

    /// Free processing resources. Idempotent.
    pub fn release(&mut self) {
        self.lifecycle.release();
    }

    /// Accept a mono or stereo layout on both main buses.
    pub fn set_layout(&mut self, layout: BusLayout) -> Result<(), LayoutError> {
        if let Err(e) = layout.validate() {
            log::warn!("Rejecting bus layout {:?}: {e}", layout);
            return Err(e);
        }
        self.layout = layout;
        Ok(())
    }

    pub fn layout(&self) -> BusLayout {
        self.layout
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }

    pub fn parameters(&self) -> &Arc<ParameterStore> {
        &self.store
    }
}
