//! Transform bound from a shared library.

use dfm1_core::{TransformError, TransformProvider};
use libloading::Library;

use crate::config::TransformConfig;

/// C signature of the exported transform.
type ProcessSampleFn = unsafe extern "C" fn(f64, f64, f64, f64) -> f64;

/// A loaded library and its bound transform.
///
/// The library stays open for the lifetime of this value and is closed once
/// when it drops. The function pointer never leaves this type.
pub struct LibraryTransform {
    process: ProcessSampleFn,
    symbol: String,
    _library: Library,
}

impl LibraryTransform {
    /// Open the configured library and bind its transform symbol.
    pub fn load(config: &TransformConfig) -> Result<Self, TransformError> {
        let path = config.library_path();

        // SAFETY: Opening the library runs its initializers. The transform
        // library ships with the plugin and has no initialization side
        // effects we depend on.
        let library = unsafe { Library::new(path) }.map_err(|e| {
            log::error!("Failed to load transform library {}: {e}", path.display());
            TransformError::LibraryNotFound {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        // SAFETY: The symbol is exported with the `ProcessSampleFn` C
        // signature. The copied pointer is stored next to `library`, so it
        // cannot be called after the library is closed.
        let process = unsafe { library.get::<ProcessSampleFn>(config.symbol().as_bytes()) }
            .map(|symbol| *symbol)
            .map_err(|e| {
                log::error!(
                    "Transform symbol '{}' not found in {}: {e}",
                    config.symbol(),
                    path.display()
                );
                TransformError::SymbolNotFound {
                    symbol: config.symbol().to_string(),
                    reason: e.to_string(),
                }
            })?;

        log::info!(
            "Bound transform '{}' from {}",
            config.symbol(),
            path.display()
        );

        Ok(Self {
            process,
            symbol: config.symbol().to_string(),
            _library: library,
        })
    }

    /// Name of the bound symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl TransformProvider for LibraryTransform {
    #[inline]
    fn apply(&self, sample: f64, cutoff: f64, resonance: f64, drive: f64) -> f64 {
        // SAFETY: `process` was bound from `_library`, which is still open.
        // The function takes and returns plain doubles.
        unsafe { (self.process)(sample, cutoff, resonance, drive) }
    }
}

impl std::fmt::Debug for LibraryTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryTransform")
            .field("symbol", &self.symbol)
            .finish_non_exhaustive()
    }
}
