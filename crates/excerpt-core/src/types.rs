//! Core alignment types: excerpt records, located spans, render segments and geometry.
//!
//! These types are platform-agnostic and carry no references into the DOM.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::text::SourceText;

/// One existing tagged excerpt.
///
/// `raw_excerpt` is the normalised text used to find the excerpt in the
/// source. `display_excerpt` is what gets rendered and may have been edited.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcerptRecord {
    /// Opaque stable identifier, unique within one call.
    pub id: SmolStr,
    #[serde(default)]
    pub raw_excerpt: Option<String>,
    #[serde(default)]
    pub display_excerpt: Option<String>,
    /// Free-form entry type tag, passed through to tagged segments.
    #[serde(default)]
    pub entry_type: Option<SmolStr>,
    #[serde(default)]
    pub deleted: bool,
}

impl ExcerptRecord {
    /// Create a record whose display text equals its raw text.
    pub fn new(id: impl Into<SmolStr>, raw_excerpt: impl Into<String>) -> Self {
        let raw = raw_excerpt.into();
        Self {
            id: id.into(),
            display_excerpt: Some(raw.clone()),
            raw_excerpt: Some(raw),
            ..Default::default()
        }
    }

    /// Set a display text that differs from the raw text.
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display_excerpt = Some(display.into());
        self
    }

    /// The raw text to locate, if present and non-empty.
    pub fn locatable_text(&self) -> Option<&str> {
        self.raw_excerpt.as_deref().filter(|raw| !raw.is_empty())
    }

    /// Text to render: the display excerpt, falling back to the raw excerpt.
    pub fn display_text(&self) -> &str {
        self.display_excerpt
            .as_deref()
            .or(self.raw_excerpt.as_deref())
            .unwrap_or_default()
    }
}

/// Error constructing a [`Span`] from an explicit byte range.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SpanError {
    #[error("empty span {start}..{end}")]
    Empty { start: usize, end: usize },
    #[error("span end {end} past source length {len}")]
    OutOfBounds { end: usize, len: usize },
    #[error("span offset {0} is not on a char boundary")]
    NotCharBoundary(usize),
}

/// Location of an excerpt within the source text.
///
/// Ranges are half-open. `char_range` is the canonical position; `byte_range`
/// is kept alongside so slicing the source doesn't need another scan.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    /// Back-reference to the owning excerpt (lookup only).
    pub excerpt_id: SmolStr,
    /// Char offsets (Unicode scalar values, NOT bytes).
    pub char_range: Range<usize>,
    /// Byte offsets into the UTF-8 source.
    pub byte_range: Range<usize>,
}

impl Span {
    /// Create a span from a byte range, validating it against the source.
    pub fn new(
        excerpt_id: impl Into<SmolStr>,
        source: &str,
        byte_range: Range<usize>,
    ) -> Result<Self, SpanError> {
        if byte_range.start >= byte_range.end {
            return Err(SpanError::Empty {
                start: byte_range.start,
                end: byte_range.end,
            });
        }
        if byte_range.end > source.len() {
            return Err(SpanError::OutOfBounds {
                end: byte_range.end,
                len: source.len(),
            });
        }
        for offset in [byte_range.start, byte_range.end] {
            if !source.is_char_boundary(offset) {
                return Err(SpanError::NotCharBoundary(offset));
            }
        }
        Ok(Self::from_valid_bytes(
            excerpt_id.into(),
            &SourceText::new(source),
            byte_range,
        ))
    }

    /// Build from a byte range already known to be valid (e.g. a search match).
    pub(crate) fn from_valid_bytes(
        excerpt_id: SmolStr,
        text: &SourceText,
        byte_range: Range<usize>,
    ) -> Self {
        Self {
            excerpt_id,
            char_range: text.char_range(byte_range.clone()),
            byte_range,
        }
    }

    /// Start char offset.
    pub fn start(&self) -> usize {
        self.char_range.start
    }

    /// End char offset (exclusive).
    pub fn end(&self) -> usize {
        self.char_range.end
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.char_range.len()
    }

    /// Spans are never empty once constructed.
    pub fn is_empty(&self) -> bool {
        self.char_range.is_empty()
    }

    /// Check whether two spans share at least one char.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start() < other.end() && other.start() < self.end()
    }

    /// The same range expressed in UTF-16 code units, as the DOM counts.
    pub fn utf16_range(&self, text: &SourceText) -> Range<usize> {
        text.utf16_range(self.char_range.clone())
    }
}

/// One render unit: untagged text or a tagged excerpt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Plain {
        char_range: Range<usize>,
        byte_range: Range<usize>,
        text: SmolStr,
    },
    Tagged {
        span: Span,
        /// Source text covered by the span.
        text: SmolStr,
        excerpt: ExcerptRecord,
    },
}

impl Segment {
    /// Source text covered by this segment.
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain { text, .. } | Segment::Tagged { text, .. } => text,
        }
    }

    /// Text the caller should render: plain text as-is, tagged excerpts by display text.
    pub fn display_text(&self) -> &str {
        match self {
            Segment::Plain { text, .. } => text,
            Segment::Tagged { excerpt, .. } => excerpt.display_text(),
        }
    }

    pub fn char_range(&self) -> Range<usize> {
        match self {
            Segment::Plain { char_range, .. } => char_range.clone(),
            Segment::Tagged { span, .. } => span.char_range.clone(),
        }
    }

    pub fn byte_range(&self) -> Range<usize> {
        match self {
            Segment::Plain { byte_range, .. } => byte_range.clone(),
            Segment::Tagged { span, .. } => span.byte_range.clone(),
        }
    }

    /// The owning excerpt for tagged segments.
    pub fn excerpt(&self) -> Option<&ExcerptRecord> {
        match self {
            Segment::Plain { .. } => None,
            Segment::Tagged { excerpt, .. } => Some(excerpt),
        }
    }

    pub fn is_tagged(&self) -> bool {
        matches!(self, Segment::Tagged { .. })
    }

    /// Whether this segment renders the caller's currently active excerpt.
    pub fn is_active(&self, active_id: Option<&str>) -> bool {
        match (self.excerpt(), active_id) {
            (Some(excerpt), Some(active)) => excerpt.id == active,
            _ => false,
        }
    }
}

/// Viewport-relative rectangle, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}
