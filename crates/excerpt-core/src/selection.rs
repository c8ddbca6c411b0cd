//! Selection tracking: a projection of the platform selection into plain state.
//!
//! Every trigger recomputes the state from a fresh snapshot, nothing is
//! accumulated between events. The only thing carried over is the bounding
//! rect, which keeps its identity while the geometry is unchanged so
//! consumers comparing by pointer can skip work.

use std::rc::Rc;

use crate::anchor::AnchorPosition;
use crate::platform::{PlatformError, SelectionPlatform, SelectionSnapshot, TriggerEvent};
use crate::types::Rect;

/// Current selection as seen by the tracker. All fields are `None` when
/// nothing (trackable) is selected.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionState {
    /// Last client rect of the range, or the common-ancestor rect when the
    /// range has no client rects.
    pub bounding_rect: Option<Rc<Rect>>,
    pub is_collapsed: Option<bool>,
    pub selected_text: Option<String>,
}

impl SelectionState {
    /// Whether every field is unset.
    pub fn is_empty(&self) -> bool {
        self.bounding_rect.is_none() && self.is_collapsed.is_none() && self.selected_text.is_none()
    }

    /// Whether the "add excerpt" affordance should be offered.
    pub fn can_add_excerpt(&self, disabled: bool) -> bool {
        !disabled
            && self.is_collapsed == Some(false)
            && self.selected_text.as_deref().is_some_and(|text| !text.is_empty())
    }

    /// Anchor for the affordance relative to the given container geometry.
    pub fn anchor(&self, container: &Rect, scroll_top: f64) -> Option<AnchorPosition> {
        self.bounding_rect
            .as_deref()
            .map(|rect| AnchorPosition::compute(rect, container, scroll_top))
    }
}

/// Owns the selection state and recomputes it from a [`SelectionPlatform`].
pub struct SelectionTracker<P> {
    platform: P,
    state: SelectionState,
}

impl<P: SelectionPlatform> SelectionTracker<P> {
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            state: SelectionState::default(),
        }
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn into_platform(self) -> P {
        self.platform
    }

    /// Recompute the state in response to a trigger event.
    pub fn handle(&mut self, event: TriggerEvent) -> &SelectionState {
        tracing::trace!(target: "excerpt::selection", event = event.as_str(), "selection trigger");
        self.refresh()
    }

    /// Recompute the state from the live platform selection.
    pub fn refresh(&mut self) -> &SelectionState {
        match self.platform.selection_snapshot() {
            Ok(Some(snapshot)) if snapshot.within_container => self.apply(snapshot),
            Ok(Some(_)) => {
                tracing::trace!(target: "excerpt::selection", "selection outside container");
                self.reset();
            }
            Ok(None) => self.reset(),
            Err(err) => {
                tracing::debug!(target: "excerpt::selection", error = %err, "selection snapshot failed");
                self.reset();
            }
        }
        &self.state
    }

    /// Take the selected text for a new excerpt, clearing the platform selection.
    ///
    /// Returns `None` if the affordance wouldn't be offered for the current state.
    pub fn take_selected_text(&mut self) -> Result<Option<String>, PlatformError> {
        if !self.state.can_add_excerpt(false) {
            return Ok(None);
        }
        self.platform.clear_selection()?;
        let text = self.state.selected_text.take();
        self.reset();
        Ok(text)
    }

    fn apply(&mut self, snapshot: SelectionSnapshot) {
        let rect = snapshot.rects.last().copied().or(snapshot.ancestor_rect);
        if self.state.bounding_rect.as_deref() != rect.as_ref() {
            self.state.bounding_rect = rect.map(Rc::new);
        }
        self.state.is_collapsed = Some(snapshot.collapsed);
        self.state.selected_text = Some(snapshot.text);
    }

    fn reset(&mut self) {
        if !self.state.is_empty() {
            tracing::debug!(target: "excerpt::selection", "selection state reset");
        }
        self.state = SelectionState::default();
    }
}
