//! Error types for parameter, state, layout and lifecycle operations.

use std::fmt;

/// Errors raised while declaring or addressing parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter with this key was already declared.
    DuplicateKey(String),
    /// No parameter with this key exists.
    UnknownKey(String),
    /// `min >= max`, or a bound is not finite.
    DegenerateRange { key: String, min: f64, max: f64 },
    /// Step or skew is not strictly positive.
    InvalidRange { key: String, reason: &'static str },
    /// The default value lies outside the declared range.
    DefaultOutOfRange { key: String, default: f64 },
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey(key) => write!(f, "parameter '{key}' is already declared"),
            Self::UnknownKey(key) => write!(f, "unknown parameter '{key}'"),
            Self::DegenerateRange { key, min, max } => {
                write!(f, "parameter '{key}' has degenerate range [{min}, {max}]")
            }
            Self::InvalidRange { key, reason } => {
                write!(f, "parameter '{key}' has invalid range: {reason}")
            }
            Self::DefaultOutOfRange { key, default } => {
                write!(f, "default {default} of parameter '{key}' is outside its range")
            }
        }
    }
}

impl std::error::Error for ParameterError {}

/// Errors raised while decoding or restoring persisted state.
#[derive(Debug, Clone, PartialEq)]
pub enum StateError {
    /// The bytes are not a valid state document.
    Malformed(String),
    /// The format tag does not belong to this plugin.
    WrongFormat(String),
    /// The document was written by an unsupported schema version.
    UnsupportedVersion(u32),
    /// The document names a parameter that is not declared.
    UnknownKey(String),
    /// The document names the same parameter twice.
    DuplicateKey(String),
    /// A declared parameter has no entry in the document.
    MissingKey(String),
    /// The value is not finite or lies outside the declared range.
    InvalidValue { key: String, value: f64 },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(msg) => write!(f, "malformed state: {msg}"),
            Self::WrongFormat(tag) => write!(f, "unexpected state format '{tag}'"),
            Self::UnsupportedVersion(v) => write!(f, "unsupported state version {v}"),
            Self::UnknownKey(key) => write!(f, "state names unknown parameter '{key}'"),
            Self::DuplicateKey(key) => write!(f, "state names parameter '{key}' twice"),
            Self::MissingKey(key) => write!(f, "state has no value for parameter '{key}'"),
            Self::InvalidValue { key, value } => {
                write!(f, "state value {value} for parameter '{key}' is invalid")
            }
        }
    }
}

impl std::error::Error for StateError {}

/// Errors raised during channel layout negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// The main input bus uses a channel set other than mono or stereo.
    UnsupportedInput(u32),
    /// The main output bus uses a channel set other than mono or stereo.
    UnsupportedOutput(u32),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedInput(n) => {
                write!(f, "unsupported input layout with {n} channels (mono or stereo only)")
            }
            Self::UnsupportedOutput(n) => {
                write!(f, "unsupported output layout with {n} channels (mono or stereo only)")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Errors raised by processor lifecycle transitions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LifecycleError {
    /// Sample rate must be finite and positive.
    InvalidSampleRate(f64),
    /// Maximum block size must be at least one sample.
    InvalidBlockSize(usize),
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSampleRate(sr) => write!(f, "invalid sample rate {sr}"),
            Self::InvalidBlockSize(n) => write!(f, "invalid maximum block size {n}"),
        }
    }
}

impl std::error::Error for LifecycleError {}

/// Errors raised while binding controls to parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// No parameter with this key exists.
    UnknownKey(String),
    /// A control is already bound to this parameter.
    AlreadyBound(String),
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKey(key) => write!(f, "cannot bind unknown parameter '{key}'"),
            Self::AlreadyBound(key) => write!(f, "parameter '{key}' already has a control"),
        }
    }
}

impl std::error::Error for BindingError {}
