//! Two-way binding between UI controls and the parameter store.
//!
//! A [`ControlSurface`] lives on the UI thread and owns one binding per
//! control. Traffic in both directions goes through the store's atomics:
//!
//! - **User gestures** (`begin_gesture`, `user_changed`, `end_gesture`) write
//!   through to the store and notify the host so it can record automation.
//! - **External changes** (host automation, state restore) are picked up by
//!   [`ControlSurface::sync`], called from the editor's UI timer. It checks
//!   the store revision and refreshes only the controls whose value moved.
//!
//! # Loop prevention
//!
//! Refreshing a control never writes to the store. A refresh leaves the
//! control showing the stored value, so a `user_changed` that carries
//! exactly the stored value (a widget echoing its own refresh) is dropped.

use std::sync::Arc;

use crate::error::BindingError;
use crate::parameter_store::ParameterStore;
use crate::types::{ParameterId, ParameterValue};

/// A UI control that displays one parameter.
pub trait Control {
    /// Show a value coming from the store. Must not write back to the store.
    fn refresh(&mut self, value: ParameterValue, text: &str);
}

/// Host-side edit notifications, so user gestures are recorded as automation.
///
/// Values are normalized to `[0, 1]` as hosts expect.
pub trait HostEditNotifier: Send + Sync {
    fn begin_edit(&self, id: ParameterId);
    fn perform_edit(&self, id: ParameterId, normalized: ParameterValue);
    fn end_edit(&self, id: ParameterId);
}

struct Binding<C> {
    id: ParameterId,
    control: C,
    displayed: ParameterValue,
    in_gesture: bool,
}

/// The set of control bindings of one editor.
pub struct ControlSurface<C: Control> {
    store: Arc<ParameterStore>,
    bindings: Vec<Binding<C>>,
    seen_revision: u64,
    notifier: Option<Arc<dyn HostEditNotifier>>,
}

impl<C: Control> ControlSurface<C> {
    pub fn new(store: Arc<ParameterStore>) -> Self {
        let seen_revision = store.revision();
        Self {
            store,
            bindings: Vec::new(),
            seen_revision,
            notifier: None,
        }
    }

    /// Attach a host edit notifier.
    pub fn with_notifier(mut self, notifier: Arc<dyn HostEditNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn set_notifier(&mut self, notifier: Option<Arc<dyn HostEditNotifier>>) {
        self.notifier = notifier;
    }

    pub fn store(&self) -> &Arc<ParameterStore> {
        &self.store
    }

    /// Bind `control` to the parameter `key` and show its current value.
    pub fn attach(&mut self, key: &str, mut control: C) -> Result<(), BindingError> {
        let id = self
            .store
            .id_of(key)
            .ok_or_else(|| BindingError::UnknownKey(key.to_string()))?;
        if self.bindings.iter().any(|b| b.id == id) {
            return Err(BindingError::AlreadyBound(key.to_string()));
        }

        let value = self.store.value(id);
        control.refresh(value, &self.text_for(id, value));
        self.bindings.push(Binding {
            id,
            control,
            displayed: value,
            in_gesture: false,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn control(&self, key: &str) -> Option<&C> {
        let id = self.store.id_of(key)?;
        self.bindings.iter().find(|b| b.id == id).map(|b| &b.control)
    }

    /// Bound controls in attach order.
    pub fn controls(&self) -> impl Iterator<Item = &C> {
        self.bindings.iter().map(|b| &b.control)
    }

    // =========================================================================
    // User gestures (UI -> store)
    // =========================================================================

    /// The user grabbed the control bound to `key`.
    pub fn begin_gesture(&mut self, key: &str) -> Result<(), BindingError> {
        let index = self.binding_index(key)?;
        let binding = &mut self.bindings[index];
        if !binding.in_gesture {
            binding.in_gesture = true;
            if let Some(notifier) = &self.notifier {
                notifier.begin_edit(binding.id);
            }
        }
        Ok(())
    }

    /// The user moved the control bound to `key` to `value`.
    ///
    /// Returns `Ok(false)` if the store already holds `value` (nothing is
    /// written), `Ok(true)` after a write-through.
    pub fn user_changed(
        &mut self,
        key: &str,
        value: ParameterValue,
    ) -> Result<bool, BindingError> {
        let index = self.binding_index(key)?;
        let id = self.bindings[index].id;
        // Compare with the store, not the display: automation may have moved
        // the value since the last sync.
        if value == self.store.value(id) {
            return Ok(false);
        }

        self.store.set_by_id(id, value);
        // Clamped or ignored writes leave the store with a different value
        // than requested; the control shows what was committed.
        let committed = self.store.value(id);
        let text = self.text_for(id, committed);
        let binding = &mut self.bindings[index];
        binding.control.refresh(committed, &text);
        binding.displayed = committed;

        if let Some(notifier) = &self.notifier {
            let normalized = self
                .store
                .by_id(id)
                .map(|p| p.range().normalize(committed))
                .unwrap_or_default();
            notifier.perform_edit(id, normalized);
        }
        Ok(true)
    }

    /// The user released the control bound to `key`.
    pub fn end_gesture(&mut self, key: &str) -> Result<(), BindingError> {
        let index = self.binding_index(key)?;
        let binding = &mut self.bindings[index];
        if binding.in_gesture {
            binding.in_gesture = false;
            if let Some(notifier) = &self.notifier {
                notifier.end_edit(binding.id);
            }
        }
        Ok(())
    }

    // =========================================================================
    // External changes (store -> UI)
    // =========================================================================

    /// Refresh controls whose parameter changed since the last sync.
    ///
    /// Returns the number of refreshed controls.
    pub fn sync(&mut self) -> usize {
        let revision = self.store.revision();
        if revision == self.seen_revision {
            return 0;
        }
        self.seen_revision = revision;

        let mut refreshed = 0;
        for index in 0..self.bindings.len() {
            let id = self.bindings[index].id;
            let value = self.store.value(id);
            if value != self.bindings[index].displayed {
                let text = self.text_for(id, value);
                let binding = &mut self.bindings[index];
                binding.control.refresh(value, &text);
                binding.displayed = value;
                refreshed += 1;
            }
        }
        refreshed
    }

    fn binding_index(&self, key: &str) -> Result<usize, BindingError> {
        let id = self
            .store
            .id_of(key)
            .ok_or_else(|| BindingError::UnknownKey(key.to_string()))?;
        // A declared parameter without a control is reported as unknown to
        // this surface.
        self.bindings
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| BindingError::UnknownKey(key.to_string()))
    }

    fn text_for(&self, id: ParameterId, value: ParameterValue) -> String {
        self.store
            .by_id(id)
            .map(|p| p.display_value(value))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::parameter_range::ParameterRange;
    use crate::parameter_types::FloatParameter;

    #[derive(Default)]
    struct Knob {
        value: f64,
        text: String,
        refreshes: usize,
    }

    impl Control for Knob {
        fn refresh(&mut self, value: f64, text: &str) {
            self.value = value;
            self.text = text.to_string();
            self.refreshes += 1;
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        events: Mutex<Vec<String>>,
    }

    impl HostEditNotifier for RecordingHost {
        fn begin_edit(&self, id: ParameterId) {
            self.events.lock().unwrap().push(format!("begin {id}"));
        }
        fn perform_edit(&self, id: ParameterId, normalized: f64) {
            self.events.lock().unwrap().push(format!("perform {id} {normalized}"));
        }
        fn end_edit(&self, id: ParameterId) {
            self.events.lock().unwrap().push(format!("end {id}"));
        }
    }

    fn store() -> Arc<ParameterStore> {
        let mut store = ParameterStore::new();
        store
            .declare("drive", "Drive", ParameterRange::new(0.0, 10.0), 1.0)
            .unwrap();
        store
            .declare_parameter(FloatParameter::percent("mix", "Mix", 1.0))
            .unwrap();
        Arc::new(store)
    }

    fn surface(store: &Arc<ParameterStore>) -> ControlSurface<Knob> {
        let mut surface = ControlSurface::new(Arc::clone(store));
        surface.attach("drive", Knob::default()).unwrap();
        surface.attach("mix", Knob::default()).unwrap();
        surface
    }

    #[test]
    fn test_attach_shows_current_value() {
        let store = store();
        let surface = surface(&store);
        let mix = surface.control("mix").unwrap();
        assert_eq!(mix.value, 1.0);
        assert_eq!(mix.text, "100 %");
        assert_eq!(surface.len(), 2);
    }

    #[test]
    fn test_attach_errors() {
        let store = store();
        let mut surface = surface(&store);
        assert_eq!(
            surface.attach("mix", Knob::default()),
            Err(BindingError::AlreadyBound("mix".to_string()))
        );
        assert_eq!(
            surface.attach("cutoff", Knob::default()),
            Err(BindingError::UnknownKey("cutoff".to_string()))
        );
    }

    #[test]
    fn test_user_change_writes_through() {
        let store = store();
        let mut surface = surface(&store);
        assert_eq!(surface.user_changed("mix", 0.5), Ok(true));
        assert_eq!(store.get("mix"), Some(0.5));

        let mix = surface.control("mix").unwrap();
        assert_eq!(mix.text, "50 %");
        assert_eq!(mix.refreshes, 2);

        // Our own write is already displayed, nothing to refresh.
        assert_eq!(surface.sync(), 0);
        assert_eq!(surface.control("mix").unwrap().refreshes, 2);
    }

    #[test]
    fn test_echo_is_dropped() {
        let store = store();
        let mut surface = surface(&store);
        store.set("drive", 4.0).unwrap();
        assert_eq!(surface.sync(), 1);

        let revision = store.revision();
        // A widget reporting the value it was just refreshed to.
        assert_eq!(surface.user_changed("drive", 4.0), Ok(false));
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_gesture_back_to_stale_display_is_written() {
        let store = store();
        let host = Arc::new(RecordingHost::default());
        let mut surface = surface(&store).with_notifier(host.clone());

        // Automation moves drive, no sync yet: the knob still shows 1.0.
        store.set("drive", 6.0).unwrap();
        assert_eq!(surface.control("drive").unwrap().value, 1.0);

        assert_eq!(surface.user_changed("drive", 1.0), Ok(true));
        assert_eq!(store.get("drive"), Some(1.0));
        assert_eq!(*host.events.lock().unwrap(), vec!["perform 0 0.1"]);

        // The knob stays where the user put it.
        assert_eq!(surface.sync(), 0);
        assert_eq!(surface.control("drive").unwrap().value, 1.0);
    }

    #[test]
    fn test_clamped_user_change_refreshes_control() {
        let store = store();
        let mut surface = surface(&store);
        surface.user_changed("drive", 50.0).unwrap();
        assert_eq!(store.get("drive"), Some(10.0));
        assert_eq!(surface.control("drive").unwrap().value, 10.0);
    }

    #[test]
    fn test_sync_refreshes_only_changed_controls() {
        let store = store();
        let mut surface = surface(&store);
        assert_eq!(surface.sync(), 0);

        store.set("drive", 2.5).unwrap();
        assert_eq!(surface.sync(), 1);
        assert_eq!(surface.control("drive").unwrap().value, 2.5);
        assert_eq!(surface.control("mix").unwrap().refreshes, 1);

        // No further writes, nothing to do.
        assert_eq!(surface.sync(), 0);
    }

    #[test]
    fn test_restore_propagates_to_controls() {
        let store = store();
        let mut surface = surface(&store);
        let mut state = store.snapshot();
        state.parameters[0].value = 7.0;
        state.parameters[1].value = 0.25;
        store.restore(&state).unwrap();

        assert_eq!(surface.sync(), 2);
        assert_eq!(surface.control("drive").unwrap().value, 7.0);
        assert_eq!(surface.control("mix").unwrap().text, "25 %");
    }

    #[test]
    fn test_gestures_notify_host() {
        let store = store();
        let host = Arc::new(RecordingHost::default());
        let mut surface = surface(&store).with_notifier(host.clone());

        surface.begin_gesture("drive").unwrap();
        surface.begin_gesture("drive").unwrap();
        surface.user_changed("drive", 5.0).unwrap();
        surface.end_gesture("drive").unwrap();
        surface.end_gesture("drive").unwrap();

        let events = host.events.lock().unwrap();
        assert_eq!(*events, vec!["begin 0", "perform 0 0.5", "end 0"]);
    }

    #[test]
    fn test_updates_from_other_thread() {
        let store = store();
        let mut surface = surface(&store);
        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || store.set("mix", 0.75).unwrap())
        };
        writer.join().unwrap();
        assert_eq!(surface.sync(), 1);
        assert_eq!(surface.control("mix").unwrap().value, 0.75);
    }
}
