//! Types exposed to JavaScript via wasm-bindgen.

use excerpt_core::{AnchorPosition, ExcerptRecord, Rect, Segment, SelectionState, SourceText};
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

/// Excerpt as supplied by the entry data layer.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsExcerpt {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

impl From<JsExcerpt> for ExcerptRecord {
    fn from(excerpt: JsExcerpt) -> Self {
        ExcerptRecord {
            id: excerpt.id.into(),
            raw_excerpt: excerpt.raw_excerpt,
            display_excerpt: excerpt.display_excerpt,
            entry_type: excerpt.entry_type.map(Into::into),
            deleted: excerpt.deleted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "lowercase")]
pub enum JsSegmentKind {
    Plain,
    Tagged,
}

/// One render segment. Offsets are UTF-16 code units, as JS strings count.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsSegment {
    pub kind: JsSegmentKind,
    pub start: usize,
    pub end: usize,
    /// Source text covered by the segment.
    pub text: String,
    /// Text to render (the display excerpt for tagged segments).
    pub display_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<String>,
    pub deleted: bool,
    pub active: bool,
}

impl JsSegment {
    pub fn from_segment(source: &SourceText, segment: &Segment, active_id: Option<&str>) -> Self {
        let range = source.utf16_range(segment.char_range());
        let excerpt = segment.excerpt();
        Self {
            kind: if segment.is_tagged() {
                JsSegmentKind::Tagged
            } else {
                JsSegmentKind::Plain
            },
            start: range.start,
            end: range.end,
            text: segment.text().to_string(),
            display_text: segment.display_text().to_string(),
            excerpt_id: excerpt.map(|e| e.id.to_string()),
            entry_type: excerpt.and_then(|e| e.entry_type.as_ref().map(|t| t.to_string())),
            deleted: excerpt.is_some_and(|e| e.deleted),
            active: segment.is_active(active_id),
        }
    }
}

/// Convert a segment list for JS.
pub fn js_segments(source: Option<&str>, segments: &[Segment], active_id: Option<&str>) -> Vec<JsSegment> {
    let source = SourceText::new(source.unwrap_or_default());
    segments
        .iter()
        .map(|segment| JsSegment::from_segment(&source, segment, active_id))
        .collect()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct JsRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl From<&Rect> for JsRect {
    fn from(rect: &Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            top: rect.top(),
            right: rect.right(),
            bottom: rect.bottom(),
            left: rect.left(),
        }
    }
}

/// Selection state as seen from JS.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsSelectionState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_rect: Option<JsRect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_collapsed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_text: Option<String>,
    /// Whether the "add excerpt" affordance should be shown.
    pub can_add: bool,
}

impl JsSelectionState {
    pub fn from_state(state: &SelectionState, disabled: bool) -> Self {
        Self {
            bounding_rect: state.bounding_rect.as_deref().map(JsRect::from),
            is_collapsed: state.is_collapsed,
            selected_text: state.selected_text.clone(),
            can_add: state.can_add_excerpt(disabled),
        }
    }
}

/// CSS position for the affordance: `top` plus one of `left` / `right`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct JsAnchor {
    pub top: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
}

impl From<AnchorPosition> for JsAnchor {
    fn from(anchor: AnchorPosition) -> Self {
        Self {
            top: anchor.top,
            left: anchor.left(),
            right: anchor.right(),
        }
    }
}
