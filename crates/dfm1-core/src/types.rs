//! Shared primitive types and limits.

/// Plain or normalized parameter value.
pub type ParameterValue = f64;

/// Dense parameter identifier: the declaration index inside a
/// [`ParameterStore`](crate::ParameterStore).
pub type ParameterId = usize;

/// Audio sample type delivered by the host.
pub type Sample = f32;

/// Maximum number of channels on a main bus (stereo).
pub const MAX_CHANNELS: usize = 2;

/// Width and height of an editor surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in editor coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}
