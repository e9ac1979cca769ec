//! External transform resolution for the DFM1 filter.
//!
//! The filter's per-sample transfer function is exported by a shared library
//! as `double process_sample(double sample, double cutoff, double resonance,
//! double drive)`. [`LibraryTransform::load`] opens the library named by a
//! [`TransformConfig`] and exposes the symbol as a
//! [`TransformProvider`](dfm1_core::TransformProvider).
//!
//! ```ignore
//! let transform = LibraryTransform::load(&TransformConfig::from_env())?;
//! let y = transform.apply(0.5, 1000.0, 1.0, 1.0);
//! ```

mod config;
mod library;

pub use config::{
    TransformConfig, DEFAULT_LIBRARY, DEFAULT_SYMBOL, LIBRARY_ENV, SYMBOL_ENV,
};
pub use dfm1_core::TransformError;
pub use library::LibraryTransform;
