//! Platform abstraction for reading the user's text selection.
//!
//! The selection tracker never touches the DOM itself. The browser crate
//! implements [`SelectionPlatform`] on top of `window.getSelection()`; tests
//! implement it with a plain struct.

use crate::types::Rect;

/// Error type for platform operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct PlatformError(pub String);

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// What the platform reports about the first range of the current selection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionSnapshot {
    /// Client rects of the range, one per line box.
    pub rects: Vec<Rect>,
    /// Plain text of the range's cloned contents.
    pub text: String,
    pub collapsed: bool,
    /// Bounding rect of the range's common-ancestor element.
    pub ancestor_rect: Option<Rect>,
    /// Whether the common ancestor lies inside the tracked container.
    /// Always true when no container is tracked.
    pub within_container: bool,
}

/// Read access to the platform's live selection.
pub trait SelectionPlatform {
    /// Snapshot of the first selection range.
    ///
    /// Returns `Ok(None)` when there is no selection or it has zero ranges.
    fn selection_snapshot(&self) -> Result<Option<SelectionSnapshot>, PlatformError>;

    /// Remove every range from the platform selection.
    fn clear_selection(&self) -> Result<(), PlatformError>;
}

impl<T: SelectionPlatform> SelectionPlatform for &T {
    fn selection_snapshot(&self) -> Result<Option<SelectionSnapshot>, PlatformError> {
        (*self).selection_snapshot()
    }

    fn clear_selection(&self) -> Result<(), PlatformError> {
        (*self).clear_selection()
    }
}

/// Events that make the tracker recompute its state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriggerEvent {
    SelectionChange,
    KeyDown,
    KeyUp,
    Resize,
}

impl TriggerEvent {
    /// Events dispatched on the document.
    pub const DOCUMENT_EVENTS: [TriggerEvent; 3] = [
        TriggerEvent::SelectionChange,
        TriggerEvent::KeyDown,
        TriggerEvent::KeyUp,
    ];

    /// Events dispatched on the window.
    pub const WINDOW_EVENTS: [TriggerEvent; 1] = [TriggerEvent::Resize];

    /// DOM event type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerEvent::SelectionChange => "selectionchange",
            TriggerEvent::KeyDown => "keydown",
            TriggerEvent::KeyUp => "keyup",
            TriggerEvent::Resize => "resize",
        }
    }
}
