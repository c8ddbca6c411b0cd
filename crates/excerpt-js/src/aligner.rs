//! Excerpt alignment for JavaScript callers.

use excerpt_core::{AlignOptions, ExcerptAligner, ExcerptRecord, align};
use wasm_bindgen::prelude::*;

use crate::types::{JsExcerpt, js_segments};

fn parse_excerpts(excerpts: JsValue) -> Result<Option<Vec<ExcerptRecord>>, JsError> {
    if excerpts.is_undefined() || excerpts.is_null() {
        return Ok(None);
    }
    let parsed: Vec<JsExcerpt> = serde_wasm_bindgen::from_value(excerpts)
        .map_err(|e| JsError::new(&format!("Invalid excerpts: {}", e)))?;
    Ok(Some(parsed.into_iter().map(ExcerptRecord::from).collect()))
}

fn parse_options(options: JsValue) -> Result<AlignOptions, JsError> {
    if options.is_undefined() || options.is_null() {
        return Ok(AlignOptions::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))
}

/// Split `text` into plain and tagged segments for rendering.
///
/// `excerpts` is an array of `{ id, rawExcerpt, displayExcerpt?, entryType?, deleted? }`;
/// `options` is `{ overlap?: "strict" | "permissive", matching?: "firstOccurrence" | "nextUnclaimed" }`.
#[wasm_bindgen(js_name = alignExcerpts)]
pub fn align_excerpts(
    text: Option<String>,
    excerpts: JsValue,
    options: JsValue,
    active_id: Option<String>,
) -> Result<JsValue, JsError> {
    let excerpts = parse_excerpts(excerpts)?;
    let options = parse_options(options)?;
    let segments = align(text.as_deref(), excerpts.as_deref(), &options);
    serde_wasm_bindgen::to_value(&js_segments(
        text.as_deref(),
        &segments,
        active_id.as_deref(),
    ))
    .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Memoising aligner: keep one per rendered text view.
#[wasm_bindgen]
pub struct JsExcerptAligner {
    inner: ExcerptAligner,
}

#[wasm_bindgen]
impl JsExcerptAligner {
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<JsExcerptAligner, JsError> {
        Ok(Self {
            inner: ExcerptAligner::new(parse_options(options)?),
        })
    }

    /// Segments for the current inputs. Recomputed only when they changed.
    #[wasm_bindgen]
    pub fn segments(
        &mut self,
        text: Option<String>,
        excerpts: JsValue,
        active_id: Option<String>,
    ) -> Result<JsValue, JsError> {
        let excerpts = parse_excerpts(excerpts)?;
        let segments = self.inner.segments(text.as_deref(), excerpts.as_deref());
        serde_wasm_bindgen::to_value(&js_segments(
            text.as_deref(),
            segments,
            active_id.as_deref(),
        ))
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(js_name = setOptions)]
    pub fn set_options(&mut self, options: JsValue) -> Result<(), JsError> {
        self.inner.set_options(parse_options(options)?);
        Ok(())
    }

    /// Forget the cached segments.
    #[wasm_bindgen]
    pub fn invalidate(&mut self) {
        self.inner.invalidate();
    }
}
