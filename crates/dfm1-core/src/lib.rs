//! Core abstractions for the DFM1 filter plugin.
//!
//! This crate holds everything that does not depend on the external filter
//! library:
//!
//! - [`ParameterStore`]: named, range-checked parameters shared between the
//!   UI/host thread and the audio thread through atomics
//! - [`PersistedState`]: the serialized parameter snapshot hosts store in
//!   their sessions
//! - [`ControlSurface`]: two-way binding of UI controls to the store
//! - [`TransformProvider`]: the seam to the per-sample transform
//! - layouts, audio blocks, lifecycle and static plugin configuration
//!
//! ## Threading
//!
//! ```text
//! UI / host thread                     audio thread
//!   ControlSurface --set--> ParameterStore <--get-- processor
//!        ^                    |  (one atomic cell per parameter)
//!        +------sync----------+
//! ```

pub mod binding;
pub mod buffer;
pub mod bus_config;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod parameter_format;
pub mod parameter_info;
pub mod parameter_range;
pub mod parameter_store;
pub mod parameter_types;
pub mod state;
pub mod transform;
pub mod types;

pub use binding::{Control, ControlSurface, HostEditNotifier};
pub use buffer::AudioBlock;
pub use bus_config::{BusLayout, ChannelSet};
pub use config::{Category, PluginConfig};
pub use error::{BindingError, LayoutError, LifecycleError, ParameterError, StateError};
pub use lifecycle::{Lifecycle, ProcessSetup};
pub use parameter_format::Formatter;
pub use parameter_info::ParameterInfo;
pub use parameter_range::ParameterRange;
pub use parameter_store::ParameterStore;
pub use parameter_types::FloatParameter;
pub use state::{ParameterEntry, PersistedState, STATE_FORMAT, STATE_VERSION};
pub use transform::{TransformError, TransformProvider};
pub use types::{ParameterId, ParameterValue, Rect, Sample, Size, MAX_CHANNELS};
