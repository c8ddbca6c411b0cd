//! Placement of the "add excerpt" affordance next to a selection.

use serde::{Deserialize, Serialize};

use crate::types::Rect;

/// Which container edge the affordance is offset from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "edge", content = "offset")]
pub enum AnchorSide {
    Left(f64),
    Right(f64),
}

/// Position of the affordance in container coordinates (CSS `top` plus
/// either `left` or `right`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorPosition {
    pub top: f64,
    pub side: AnchorSide,
}

impl AnchorPosition {
    /// Place the affordance just below the selection rect.
    ///
    /// Selections ending left of the container's midpoint get a `left` offset
    /// at the selection's right edge; others get a `right` offset so the
    /// affordance stays inside the container. `scroll_top` is the container's
    /// scroll offset, since both rects are viewport-relative.
    pub fn compute(selection: &Rect, container: &Rect, scroll_top: f64) -> Self {
        let top = selection.top() - container.top() + scroll_top + selection.height;
        let midpoint = (container.left() + container.width) / 2.0;

        let side = if selection.right() < midpoint {
            AnchorSide::Left(selection.right() - container.left())
        } else {
            AnchorSide::Right(container.width - selection.width - selection.left() + container.left())
        };

        Self { top, side }
    }

    pub fn left(&self) -> Option<f64> {
        match self.side {
            AnchorSide::Left(offset) => Some(offset),
            AnchorSide::Right(_) => None,
        }
    }

    pub fn right(&self) -> Option<f64> {
        match self.side {
            AnchorSide::Right(offset) => Some(offset),
            AnchorSide::Left(_) => None,
        }
    }
}
