//! excerpt-core: Pure Rust excerpt alignment without DOM dependencies.
//!
//! This crate provides:
//! - `locate` / `reconcile` / `sequence` - the three stages that turn a source
//!   text plus tagged excerpts into an ordered list of render segments
//! - `ExcerptAligner` - the memoised pipeline
//! - `SelectionTracker<P>` - selection state projection, generic over a
//!   `SelectionPlatform` (browser DOM, test fakes)
//! - `AnchorPosition` - where to place the "add excerpt" affordance

pub mod align;
pub mod anchor;
pub mod locate;
pub mod options;
pub mod platform;
pub mod reconcile;
pub mod selection;
pub mod sequence;
pub mod text;
pub mod types;

pub use align::{ExcerptAligner, align, fingerprint};
pub use anchor::{AnchorPosition, AnchorSide};
pub use locate::{locate, locate_with};
pub use options::{AlignOptions, MatchStrategy, OptionsError, OverlapPolicy};
pub use platform::{PlatformError, SelectionPlatform, SelectionSnapshot, TriggerEvent};
pub use reconcile::reconcile;
pub use selection::{SelectionState, SelectionTracker};
pub use sequence::sequence;
pub use smol_str::SmolStr;
pub use text::SourceText;
pub use types::{ExcerptRecord, Rect, Segment, Span, SpanError};
