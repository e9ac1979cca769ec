//! Plugin configuration.
//!
//! Static metadata shared by every instance of a plugin, built with `const`
//! builder methods so it can live in a `static`.
//!
//! # Example
//!
//! ```ignore
//! use dfm1_core::config::{Category, PluginConfig};
//!
//! pub static CONFIG: PluginConfig = PluginConfig::new("My Filter")
//!     .with_vendor("My Company")
//!     .with_version("1.0.0")
//!     .with_category(Category::Effect);
//! ```

use crate::types::Size;

/// Plugin category, as hosts group plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    /// Audio in, audio out.
    #[default]
    Effect,
    Instrument,
    MidiEffect,
    Generator,
}

impl Category {
    pub const fn accepts_midi(&self) -> bool {
        matches!(self, Category::Instrument | Category::MidiEffect)
    }

    pub const fn produces_midi(&self) -> bool {
        matches!(self, Category::MidiEffect)
    }

    pub const fn is_midi_effect(&self) -> bool {
        matches!(self, Category::MidiEffect)
    }
}

/// Default editor size.
pub const DEFAULT_EDITOR_SIZE: Size = Size::new(400, 300);

/// Static plugin metadata.
#[derive(Debug, Clone)]
pub struct PluginConfig {
    /// Display name shown in hosts.
    pub name: &'static str,

    pub category: Category,

    pub vendor: &'static str,

    pub version: &'static str,

    /// Tail length after input stops, in seconds.
    pub tail_length_seconds: f64,

    pub has_editor: bool,

    pub editor_size: Size,
}

impl PluginConfig {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            category: Category::Effect,
            vendor: "",
            version: env!("CARGO_PKG_VERSION"),
            tail_length_seconds: 0.0,
            has_editor: true,
            editor_size: DEFAULT_EDITOR_SIZE,
        }
    }

    pub const fn with_vendor(mut self, vendor: &'static str) -> Self {
        self.vendor = vendor;
        self
    }

    pub const fn with_version(mut self, version: &'static str) -> Self {
        self.version = version;
        self
    }

    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub const fn with_tail_length(mut self, seconds: f64) -> Self {
        self.tail_length_seconds = seconds;
        self
    }

    /// Declare the plugin headless.
    pub const fn without_editor(mut self) -> Self {
        self.has_editor = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_CONFIG: PluginConfig = PluginConfig::new("Test Filter")
        .with_vendor("Test Vendor")
        .with_version("2.1.0")
        .with_category(Category::Effect);

    #[test]
    fn test_const_builder() {
        assert_eq!(TEST_CONFIG.name, "Test Filter");
        assert_eq!(TEST_CONFIG.vendor, "Test Vendor");
        assert_eq!(TEST_CONFIG.version, "2.1.0");
        assert_eq!(TEST_CONFIG.category, Category::Effect);
        assert_eq!(TEST_CONFIG.tail_length_seconds, 0.0);
        assert!(TEST_CONFIG.has_editor);
        assert_eq!(TEST_CONFIG.editor_size, Size::new(400, 300));
    }

    #[test]
    fn test_headless_config() {
        let config = PluginConfig::new("Headless")
            .without_editor()
            .with_tail_length(1.5);
        assert!(!config.has_editor);
        assert_eq!(config.tail_length_seconds, 1.5);
    }

    #[test]
    fn test_category_midi_flags() {
        assert!(!Category::Effect.accepts_midi());
        assert!(!Category::Effect.produces_midi());
        assert!(!Category::Effect.is_midi_effect());
        assert!(Category::Instrument.accepts_midi());
        assert!(!Category::Instrument.produces_midi());
        assert!(Category::MidiEffect.is_midi_effect());
    }
}
