//! Editor model: four rotary controls and a title on a fixed surface.
//!
//! Painting is left to the host's UI toolkit. This model keeps what each
//! widget shows and where it sits, and routes gestures through a
//! [`ControlSurface`].

use std::sync::Arc;

use dfm1_core::{
    BindingError, Control, ControlSurface, HostEditNotifier, ParameterStore, ParameterValue, Rect,
    Size,
};

use crate::parameters::{CUTOFF, DRIVE, MIX, RESONANCE};

/// Title drawn at the top of the surface.
pub const TITLE: &str = "DFM1 Filter";

const CONTROL_SIZE: u32 = 100;
const MARGIN: u32 = 20;

/// Rotary knob bound to one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct RotaryControl {
    key: &'static str,
    bounds: Rect,
    value: ParameterValue,
    text: String,
}

impl RotaryControl {
    pub fn new(key: &'static str, bounds: Rect) -> Self {
        Self {
            key,
            bounds,
            value: 0.0,
            text: String::new(),
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Value currently shown.
    pub fn value(&self) -> ParameterValue {
        self.value
    }

    /// Text box below the knob, e.g. "50 %".
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Control for RotaryControl {
    fn refresh(&mut self, value: ParameterValue, text: &str) {
        self.value = value;
        self.text.clear();
        self.text.push_str(text);
    }
}

/// Static text label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: &'static str,
    pub bounds: Rect,
}

/// The filter editor.
pub struct FilterEditor {
    size: Size,
    title: Label,
    surface: ControlSurface<RotaryControl>,
}

impl FilterEditor {
    /// Build the editor and bind its controls to `store`.
    pub fn new(store: Arc<ParameterStore>, size: Size) -> Result<Self, BindingError> {
        let mut surface = ControlSurface::new(store);
        for (index, key) in [CUTOFF, RESONANCE, DRIVE, MIX].into_iter().enumerate() {
            surface.attach(key, RotaryControl::new(key, grid_cell(index)))?;
        }
        Ok(Self {
            size,
            title: Label {
                text: TITLE,
                bounds: Rect::new(0, 0, size.width, size.height),
            },
            surface,
        })
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn HostEditNotifier>) -> Self {
        self.surface.set_notifier(Some(notifier));
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn title(&self) -> &Label {
        &self.title
    }

    pub fn control(&self, key: &str) -> Option<&RotaryControl> {
        self.surface.control(key)
    }

    /// Controls in layout order.
    pub fn controls(&self) -> impl Iterator<Item = &RotaryControl> {
        self.surface.controls()
    }

    /// UI timer tick: pull external parameter changes into the controls.
    pub fn on_timer(&mut self) -> usize {
        self.surface.sync()
    }

    /// Gesture routing for the host's widget callbacks.
    pub fn surface_mut(&mut self) -> &mut ControlSurface<RotaryControl> {
        &mut self.surface
    }
}

/// Two columns, two rows, `MARGIN` around and between cells.
fn grid_cell(index: usize) -> Rect {
    let column = (index % 2) as u32;
    let row = (index / 2) as u32;
    let x = MARGIN + column * (CONTROL_SIZE + MARGIN);
    let y = MARGIN + row * (CONTROL_SIZE + MARGIN);
    Rect::new(x as i32, y as i32, CONTROL_SIZE, CONTROL_SIZE)
}
