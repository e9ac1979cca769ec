//! The per-sample filter transform, as seen by the processor.
//!
//! The filter's transfer function lives outside this workspace. The
//! processor only depends on [`TransformProvider`]; the one production
//! implementation binds it from a shared library (`dfm1-transform`), and
//! tests pass closures.
//!
//! ```ignore
//! let identity = |sample: f64, _cutoff: f64, _resonance: f64, _drive: f64| sample;
//! assert_eq!(identity.apply(0.5, 1000.0, 1.0, 1.0), 0.5);
//! ```

use std::fmt;
use std::path::PathBuf;

/// Per-sample transform with the fixed four-argument signature.
///
/// Implementations are read-only after construction and are called from the
/// audio thread, so they must be `Send + Sync` and must not block.
pub trait TransformProvider: Send + Sync {
    fn apply(&self, sample: f64, cutoff: f64, resonance: f64, drive: f64) -> f64;
}

impl<F> TransformProvider for F
where
    F: Fn(f64, f64, f64, f64) -> f64 + Send + Sync,
{
    #[inline]
    fn apply(&self, sample: f64, cutoff: f64, resonance: f64, drive: f64) -> f64 {
        self(sample, cutoff, resonance, drive)
    }
}

/// Errors raised while resolving the external transform.
///
/// Both are fatal: the plugin has no degraded mode without its transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// The shared library could not be opened.
    LibraryNotFound { path: PathBuf, reason: String },
    /// The library does not export the entry point.
    SymbolNotFound { symbol: String, reason: String },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LibraryNotFound { path, reason } => {
                write!(f, "failed to load transform library {}: {reason}", path.display())
            }
            Self::SymbolNotFound { symbol, reason } => {
                write!(f, "failed to bind transform symbol '{symbol}': {reason}")
            }
        }
    }
}

impl std::error::Error for TransformError {}
