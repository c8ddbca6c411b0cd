//! JsSelectionTracker - selection tracking wrapper for JavaScript.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use excerpt_browser::{
    DomSelection, SelectionListeners, SelectionState, SelectionTracker, SharedTracker,
    update_and_notify,
};
use wasm_bindgen::prelude::*;

use crate::types::{JsAnchor, JsSelectionState};

type Notify = Rc<dyn Fn(&SelectionState)>;

/// Tracks the text selection inside a container and reports it to JS.
///
/// Call `dispose()` (or let the object be freed) on unmount to remove the
/// DOM listeners.
#[wasm_bindgen]
pub struct JsSelectionTracker {
    tracker: SharedTracker,
    listeners: Option<SelectionListeners>,
    disabled: Rc<Cell<bool>>,
    notify: Notify,
}

#[wasm_bindgen]
impl JsSelectionTracker {
    /// Start tracking. `container` limits tracking to selections inside it;
    /// `on_change` receives the new state whenever it changes, including
    /// changes made through this object.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: Option<web_sys::Element>,
        on_change: Option<js_sys::Function>,
    ) -> Result<JsSelectionTracker, JsError> {
        let tracker: SharedTracker =
            Rc::new(RefCell::new(SelectionTracker::new(DomSelection::new(container))));
        let disabled = Rc::new(Cell::new(false));

        let notify: Notify = {
            let disabled = disabled.clone();
            Rc::new(move |state: &SelectionState| {
                let Some(callback) = on_change.as_ref() else {
                    return;
                };
                let js_state = JsSelectionState::from_state(state, disabled.get());
                match serde_wasm_bindgen::to_value(&js_state) {
                    Ok(value) => {
                        if let Err(err) = callback.call1(&JsValue::NULL, &value) {
                            tracing::warn!("selection onChange callback threw: {:?}", err);
                        }
                    }
                    Err(err) => tracing::warn!("failed to serialize selection state: {}", err),
                }
            })
        };

        let listeners = {
            let notify = notify.clone();
            SelectionListeners::attach(tracker.clone(), move |state| notify(state))
                .map_err(|e| JsError::new(&e.to_string()))?
        };

        Ok(Self {
            tracker,
            listeners: Some(listeners),
            disabled,
            notify,
        })
    }

    /// Current selection state.
    #[wasm_bindgen]
    pub fn state(&self) -> Result<JsValue, JsError> {
        let tracker = self.tracker.borrow();
        let state = JsSelectionState::from_state(tracker.state(), self.disabled.get());
        serde_wasm_bindgen::to_value(&state)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Recompute from the live selection (e.g. after re-rendering the container).
    #[wasm_bindgen]
    pub fn refresh(&self) -> Result<JsValue, JsError> {
        update_and_notify(&self.tracker, &*self.notify, |tracker| {
            tracker.refresh();
        })
        .ok_or_else(|| JsError::new("selection tracker is busy"))?;
        self.state()
    }

    /// CSS position for the "add excerpt" affordance, or undefined.
    #[wasm_bindgen]
    pub fn anchor(&self) -> Result<JsValue, JsError> {
        let tracker = self.tracker.borrow();
        let anchor = tracker
            .platform()
            .anchor_for(tracker.state())
            .map(JsAnchor::from);
        serde_wasm_bindgen::to_value(&anchor)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Hide the affordance regardless of the selection.
    ///
    /// `on_change` fires when this flips `canAdd`'s input.
    #[wasm_bindgen(js_name = setDisabled)]
    pub fn set_disabled(&self, disabled: bool) {
        if self.disabled.replace(disabled) == disabled {
            return;
        }
        let state = self.tracker.borrow().state().clone();
        (self.notify)(&state);
    }

    /// Take the selected text for a new excerpt and clear the selection.
    #[wasm_bindgen(js_name = takeSelectedText)]
    pub fn take_selected_text(&self) -> Result<Option<String>, JsError> {
        if self.disabled.get() {
            return Ok(None);
        }
        update_and_notify(&self.tracker, &*self.notify, |tracker| {
            tracker.take_selected_text()
        })
        .ok_or_else(|| JsError::new("selection tracker is busy"))?
        .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Remove all DOM listeners. The last state stays readable.
    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        self.listeners = None;
    }

    #[wasm_bindgen(js_name = isDisposed)]
    pub fn is_disposed(&self) -> bool {
        self.listeners.is_none()
    }
}
