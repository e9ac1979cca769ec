//! Host-facing plugin: construction, metadata, programs and state.

use std::fmt;
use std::sync::Arc;

use dfm1_core::{
    AudioBlock, BindingError, BusLayout, Category, LayoutError, LifecycleError, ParameterError,
    ParameterStore, PersistedState, PluginConfig, StateError, TransformError, TransformProvider,
};
use dfm1_transform::{LibraryTransform, TransformConfig};

use crate::editor::FilterEditor;
use crate::parameters::create_layout;
use crate::processor::FilterProcessor;

/// Plugin metadata.
pub static CONFIG: PluginConfig = PluginConfig::new("DFM1 Filter")
    .with_vendor("DFM1")
    .with_version(env!("CARGO_PKG_VERSION"))
    .with_category(Category::Effect);

/// Errors that prevent a plugin instance from being created.
#[derive(Debug, Clone, PartialEq)]
pub enum PluginError {
    /// The external transform could not be resolved.
    Transform(TransformError),
    /// The parameter layout is invalid.
    Parameter(ParameterError),
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transform(e) => write!(f, "transform unavailable: {e}"),
            Self::Parameter(e) => write!(f, "invalid parameter layout: {e}"),
        }
    }
}

impl std::error::Error for PluginError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transform(e) => Some(e),
            Self::Parameter(e) => Some(e),
        }
    }
}

impl From<TransformError> for PluginError {
    fn from(e: TransformError) -> Self {
        Self::Transform(e)
    }
}

impl From<ParameterError> for PluginError {
    fn from(e: ParameterError) -> Self {
        Self::Parameter(e)
    }
}

/// The DFM1 filter plugin instance.
pub struct Dfm1Filter<T: TransformProvider = LibraryTransform> {
    store: Arc<ParameterStore>,
    processor: FilterProcessor<T>,
}

impl Dfm1Filter<LibraryTransform> {
    /// Create an instance bound to the library named by the environment
    /// (or the default location).
    pub fn new() -> Result<Self, PluginError> {
        Self::with_config(&TransformConfig::from_env())
    }

    pub fn with_config(config: &TransformConfig) -> Result<Self, PluginError> {
        Self::with_resolver(|| LibraryTransform::load(config))
    }
}

impl<T: TransformProvider> Dfm1Filter<T> {
    /// Declare the parameters, then resolve the transform.
    ///
    /// No instance is created when either step fails.
    pub fn with_resolver<F>(resolve: F) -> Result<Self, PluginError>
    where
        F: FnOnce() -> Result<T, TransformError>,
    {
        let store = Arc::new(create_layout()?);
        let transform = resolve()?;
        let processor = FilterProcessor::new(Arc::clone(&store), transform)?;
        Ok(Self { store, processor })
    }

    /// Create an instance around an already-resolved transform.
    pub fn with_transform(transform: T) -> Result<Self, PluginError> {
        Self::with_resolver(|| Ok(transform))
    }

    // =========================================================================
    // Processing
    // =========================================================================

    pub fn prepare(
        &mut self,
        sample_rate: f64,
        max_block_size: usize,
    ) -> Result<(), LifecycleError> {
        self.processor.prepare(sample_rate, max_block_size)
    }

    /// Process one block in place. Real-time safe.
    #[inline]
    pub fn process(&mut self, block: &mut AudioBlock<'_, '_>) {
        self.processor.process(block);
    }

    pub fn release(&mut self) {
        self.processor.release();
    }

    pub fn is_layout_supported(&self, layout: &BusLayout) -> bool {
        layout.is_supported()
    }

    pub fn set_layout(&mut self, layout: BusLayout) -> Result<(), LayoutError> {
        self.processor.set_layout(layout)
    }

    pub fn layout(&self) -> BusLayout {
        self.processor.layout()
    }

    pub fn processor(&self) -> &FilterProcessor<T> {
        &self.processor
    }

    // =========================================================================
    // Metadata
    // =========================================================================

    pub fn config(&self) -> &'static PluginConfig {
        &CONFIG
    }

    pub fn name(&self) -> &'static str {
        CONFIG.name
    }

    pub fn accepts_midi(&self) -> bool {
        CONFIG.category.accepts_midi()
    }

    pub fn produces_midi(&self) -> bool {
        CONFIG.category.produces_midi()
    }

    pub fn is_midi_effect(&self) -> bool {
        CONFIG.category.is_midi_effect()
    }

    pub fn tail_length_seconds(&self) -> f64 {
        CONFIG.tail_length_seconds
    }

    pub fn has_editor(&self) -> bool {
        CONFIG.has_editor
    }

    // =========================================================================
    // Programs
    // =========================================================================

    /// A single, unnamed program.
    pub fn num_programs(&self) -> usize {
        1
    }

    pub fn current_program(&self) -> usize {
        0
    }

    /// Ignored: there is only one program.
    pub fn set_current_program(&mut self, _index: usize) {}

    pub fn program_name(&self, _index: usize) -> &'static str {
        ""
    }

    /// Ignored: the program name is fixed.
    pub fn change_program_name(&mut self, _index: usize, _name: &str) {}

    // =========================================================================
    // State
    // =========================================================================

    /// Serialize every parameter value for the host session.
    pub fn save_state(&self) -> Result<Vec<u8>, StateError> {
        self.store.snapshot().to_bytes()
    }

    /// Restore a session saved by [`save_state`](Self::save_state).
    ///
    /// On error nothing changes. Call only while processing is suspended.
    pub fn load_state(&self, data: &[u8]) -> Result<(), StateError> {
        PersistedState::from_bytes(data)
            .and_then(|state| self.store.restore(&state))
            .map_err(|e| {
                log::warn!("Rejecting saved state ({} bytes): {e}", data.len());
                e
            })
    }

    // =========================================================================
    // Parameters and editor
    // =========================================================================

    pub fn parameters(&self) -> &Arc<ParameterStore> {
        &self.store
    }

    /// Create the editor model bound to this instance's parameters.
    pub fn create_editor(&self) -> Result<FilterEditor, BindingError> {
        FilterEditor::new(Arc::clone(&self.store), CONFIG.editor_size)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::parameters::{CUTOFF, MIX, RESONANCE};
    use dfm1_core::{ChannelSet, Sample, Size};

    type Identity = fn(f64, f64, f64, f64) -> f64;

    fn identity(sample: f64, _cutoff: f64, _resonance: f64, _drive: f64) -> f64 {
        sample
    }

    fn plugin() -> Dfm1Filter<Identity> {
        Dfm1Filter::with_transform(identity as Identity).unwrap()
    }

    #[test]
    fn test_processes_block_end_to_end() {
        let mut plugin = plugin();
        plugin.prepare(44_100.0, 4).unwrap();
        plugin.parameters().set(MIX, 0.5).unwrap();

        let mut left = [1.0; 4];
        let mut right = [1.0; 4];
        let mut channels: [&mut [Sample]; 2] = [&mut left, &mut right];
        plugin.process(&mut AudioBlock::new(&mut channels));

        assert_eq!(left, [0.5; 4]);
        assert_eq!(right, [0.5; 4]);
    }

    #[test]
    fn test_failed_resolution_creates_no_instance() {
        let result = Dfm1Filter::<Identity>::with_resolver(|| {
            Err(TransformError::SymbolNotFound {
                symbol: "process_sample".to_string(),
                reason: "not exported".to_string(),
            })
        });
        assert!(matches!(
            result.err(),
            Some(PluginError::Transform(TransformError::SymbolNotFound { .. }))
        ));
    }

    #[test]
    fn test_resolver_runs_once() {
        let calls = Cell::new(0);
        let plugin = Dfm1Filter::with_resolver(|| {
            calls.set(calls.get() + 1);
            Ok(identity as Identity)
        });
        assert!(plugin.is_ok());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_missing_library_is_fatal() {
        let config = TransformConfig::new("libs/missing/libdfm1.so", "process_sample");
        assert!(matches!(
            Dfm1Filter::with_config(&config).err(),
            Some(PluginError::Transform(TransformError::LibraryNotFound { .. }))
        ));
    }

    #[test]
    fn test_metadata() {
        let plugin = plugin();
        assert_eq!(plugin.name(), "DFM1 Filter");
        assert!(!plugin.accepts_midi());
        assert!(!plugin.produces_midi());
        assert!(!plugin.is_midi_effect());
        assert_eq!(plugin.tail_length_seconds(), 0.0);
        assert!(plugin.has_editor());
    }

    #[test]
    fn test_single_program() {
        let mut plugin = plugin();
        assert_eq!(plugin.num_programs(), 1);
        plugin.set_current_program(3);
        assert_eq!(plugin.current_program(), 0);
        plugin.change_program_name(0, "Lead");
        assert_eq!(plugin.program_name(0), "");
    }

    #[test]
    fn test_layout_negotiation() {
        let mut plugin = plugin();
        assert!(plugin.is_layout_supported(&BusLayout::mono()));
        assert!(plugin.is_layout_supported(&BusLayout::stereo()));

        let surround = BusLayout::new(ChannelSet::Stereo, ChannelSet::Discrete(6));
        assert!(!plugin.is_layout_supported(&surround));
        assert_eq!(
            plugin.set_layout(surround),
            Err(LayoutError::UnsupportedOutput(6))
        );

        plugin.set_layout(BusLayout::mono()).unwrap();
        assert_eq!(plugin.layout(), BusLayout::mono());
    }

    #[test]
    fn test_state_round_trip() {
        let source = plugin();
        source.parameters().set(CUTOFF, 440.0).unwrap();
        source.parameters().set(RESONANCE, 2.5).unwrap();
        let bytes = source.save_state().unwrap();

        let target = plugin();
        target.load_state(&bytes).unwrap();
        assert_eq!(target.parameters().get(CUTOFF), Some(440.0));
        assert_eq!(target.parameters().get(RESONANCE), Some(2.5));
        assert_eq!(target.save_state().unwrap(), bytes);
    }

    #[test]
    fn test_garbage_state_changes_nothing() {
        let plugin = plugin();
        plugin.parameters().set(MIX, 0.3).unwrap();
        let before = plugin.save_state().unwrap();

        assert!(matches!(
            plugin.load_state(b"\x00\x01not json"),
            Err(StateError::Malformed(_))
        ));
        assert!(plugin.load_state(br#"{"format":"other","version":1,"parameters":[]}"#).is_err());
        assert_eq!(plugin.save_state().unwrap(), before);
    }

    #[test]
    fn test_editor_is_bound_to_parameters() {
        let plugin = plugin();
        let mut editor = plugin.create_editor().unwrap();
        assert_eq!(editor.size(), Size::new(400, 300));

        plugin.parameters().set(MIX, 0.25).unwrap();
        assert_eq!(editor.on_timer(), 1);
        assert_eq!(editor.control(MIX).unwrap().text(), "25 %");
    }
}
