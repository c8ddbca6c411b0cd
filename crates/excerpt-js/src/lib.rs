//! WASM bindings for excerpt alignment and selection tracking.
//!
//! Provides `alignExcerpts` / `JsExcerptAligner` for splitting a source text
//! into plain and tagged segments, and `JsSelectionTracker` for anchoring an
//! "add excerpt" action at the user's selection.

mod aligner;
mod tracker;
mod types;

pub use aligner::*;
pub use tracker::*;
pub use types::*;

use wasm_bindgen::prelude::*;

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    excerpt_browser::telemetry::init();
}
