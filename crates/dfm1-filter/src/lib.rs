//! # DFM1 Filter
//!
//! Audio effect that runs every sample of the first channel through an
//! external filter transform, controlled by cutoff, resonance, drive and mix.
//!
//! ```text
//! host --> Dfm1Filter --> FilterProcessor --> TransformProvider
//!              |                 |               (shared library)
//!              |                 +-- reads --+
//!              +-- FilterEditor --> ParameterStore
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dfm1_filter::{AudioBlock, Dfm1Filter};
//!
//! let mut plugin = Dfm1Filter::new()?;
//! plugin.prepare(48_000.0, 512)?;
//! plugin.process(&mut AudioBlock::new(&mut channels));
//! let session = plugin.save_state()?;
//! ```

pub mod editor;
pub mod parameters;
pub mod plugin;
pub mod processor;

pub use editor::{FilterEditor, RotaryControl};
pub use plugin::{Dfm1Filter, PluginError, CONFIG};
pub use processor::FilterProcessor;

pub use dfm1_core::{AudioBlock, BusLayout, ChannelSet, ParameterStore, StateError};
pub use dfm1_transform::{LibraryTransform, TransformConfig};
