//! Browser event wiring for the selection tracker.
//!
//! `selectionchange`, `keydown` and `keyup` are observed on the document and
//! `resize` on the window. Each event recomputes the tracker state from the
//! live selection. Dropping [`SelectionListeners`] removes every listener.

use std::cell::RefCell;
use std::rc::Rc;

use excerpt_core::{PlatformError, SelectionState, SelectionTracker, TriggerEvent};
use gloo_events::EventListener;

use crate::dom::DomSelection;

/// Tracker shared between event callbacks and the owning component.
pub type SharedTracker = Rc<RefCell<SelectionTracker<DomSelection>>>;

/// Registered DOM listeners for one tracker.
pub struct SelectionListeners {
    listeners: Vec<EventListener>,
}

impl SelectionListeners {
    /// Register listeners that drive `tracker`.
    ///
    /// `on_change` runs after an event whenever the resulting state differs
    /// from the state before it (see [`update_and_notify`]).
    pub fn attach<F>(tracker: SharedTracker, on_change: F) -> Result<Self, PlatformError>
    where
        F: Fn(&SelectionState) + 'static,
    {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let on_change = Rc::new(on_change);

        let mut listeners = Vec::with_capacity(
            TriggerEvent::DOCUMENT_EVENTS.len() + TriggerEvent::WINDOW_EVENTS.len(),
        );
        for event in TriggerEvent::DOCUMENT_EVENTS {
            listeners.push(listen(&document, event, tracker.clone(), on_change.clone()));
        }
        for event in TriggerEvent::WINDOW_EVENTS {
            listeners.push(listen(&window, event, tracker.clone(), on_change.clone()));
        }

        tracing::debug!(
            target: "excerpt::selection",
            count = listeners.len(),
            "selection listeners attached"
        );
        Ok(Self { listeners })
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Remove every listener. Equivalent to dropping.
    pub fn detach(self) {
        drop(self);
    }
}

impl Drop for SelectionListeners {
    fn drop(&mut self) {
        tracing::debug!(
            target: "excerpt::selection",
            count = self.listeners.len(),
            "selection listeners detached"
        );
    }
}

/// Run `op` on the tracker and report the resulting state to `on_change` if
/// it differs from the state before.
///
/// Event listeners and explicit calls (refresh, taking the selected text) go
/// through here so the observer never holds a stale state. `on_change` runs
/// after the tracker borrow is released. Returns `None` without running `op`
/// when the tracker is already borrowed.
pub fn update_and_notify<F, R>(
    tracker: &SharedTracker,
    on_change: &F,
    op: impl FnOnce(&mut SelectionTracker<DomSelection>) -> R,
) -> Option<R>
where
    F: Fn(&SelectionState) + ?Sized,
{
    let (result, changed) = {
        let mut guard = tracker.try_borrow_mut().ok()?;
        let previous = guard.state().clone();
        let result = op(&mut guard);
        let state = guard.state();
        let changed = (*state != previous).then(|| state.clone());
        (result, changed)
    };
    if let Some(state) = changed {
        on_change(&state);
    }
    Some(result)
}

fn listen<F>(
    target: &web_sys::EventTarget,
    event: TriggerEvent,
    tracker: SharedTracker,
    on_change: Rc<F>,
) -> EventListener
where
    F: Fn(&SelectionState) + 'static,
{
    EventListener::new(target, event.as_str(), move |_| {
        // Events dispatched while the tracker is borrowed elsewhere are
        // skipped; the borrower already works from the live selection.
        let handled = update_and_notify(&tracker, &*on_change, |tracker| {
            tracker.handle(event);
        });
        if handled.is_none() {
            tracing::trace!(target: "excerpt::selection", event = event.as_str(), "tracker busy");
        }
    })
}
