//! Where to find the transform library.

use std::path::{Path, PathBuf};

/// Environment variable overriding the library path.
pub const LIBRARY_ENV: &str = "DFM1_TRANSFORM_LIBRARY";

/// Environment variable overriding the exported symbol name.
pub const SYMBOL_ENV: &str = "DFM1_TRANSFORM_SYMBOL";

/// Exported entry point: `double process_sample(double, double, double, double)`.
pub const DEFAULT_SYMBOL: &str = "process_sample";

/// Library path relative to the host's working directory.
#[cfg(target_os = "macos")]
pub const DEFAULT_LIBRARY: &str = "libs/libdfm1.dylib";
#[cfg(target_os = "windows")]
pub const DEFAULT_LIBRARY: &str = "libs/dfm1.dll";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub const DEFAULT_LIBRARY: &str = "libs/libdfm1.so";

/// Library path and symbol name used to resolve the transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformConfig {
    library_path: PathBuf,
    symbol: String,
}

impl TransformConfig {
    pub fn new(library_path: impl Into<PathBuf>, symbol: impl Into<String>) -> Self {
        Self {
            library_path: library_path.into(),
            symbol: symbol.into(),
        }
    }

    /// Defaults, overridden by `DFM1_TRANSFORM_LIBRARY` and
    /// `DFM1_TRANSFORM_SYMBOL` when set and non-empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = lookup(LIBRARY_ENV).filter(|v| !v.is_empty()) {
            config.library_path = PathBuf::from(path);
        }
        if let Some(symbol) = lookup(SYMBOL_ENV).filter(|v| !v.is_empty()) {
            config.symbol = symbol;
        }
        config
    }

    pub fn library_path(&self) -> &Path {
        &self.library_path
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LIBRARY, DEFAULT_SYMBOL)
    }
}
