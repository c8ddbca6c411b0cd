//! Render sequencing: interleave plain gaps and tagged spans.

use std::collections::HashMap;
use std::ops::Range;

use smol_str::SmolStr;

use crate::text::SourceText;
use crate::types::{ExcerptRecord, Segment, Span};

/// Turn ordered spans into a flat segment list covering the source.
///
/// - `None` source renders nothing.
/// - No spans (or an empty source) renders the whole text as one plain segment.
/// - Otherwise: leading gap, each span followed by the gap to the next span's
///   start when there is one, and a trailing gap.
///
/// Gaps are measured from the previous span's end, so with non-overlapping
/// spans the segment texts concatenate back to the source exactly. Spans whose
/// excerpt id isn't in `excerpts` are skipped.
pub fn sequence(source: Option<&str>, ordered: &[Span], excerpts: &[ExcerptRecord]) -> Vec<Segment> {
    let Some(source) = source else {
        return Vec::new();
    };

    let text = SourceText::new(source);

    if source.is_empty() || ordered.is_empty() {
        return vec![plain(source, 0..text.len_chars(), 0..source.len())];
    }

    let mut by_id: HashMap<&str, &ExcerptRecord> = HashMap::with_capacity(excerpts.len());
    for excerpt in excerpts {
        by_id.entry(excerpt.id.as_str()).or_insert(excerpt);
    }

    let spans: Vec<(&Span, &ExcerptRecord)> = ordered
        .iter()
        .filter_map(|span| match by_id.get(span.excerpt_id.as_str()) {
            Some(excerpt) => Some((span, *excerpt)),
            None => {
                tracing::debug!(
                    target: "excerpt::sequence",
                    excerpt_id = %span.excerpt_id,
                    "span has no matching excerpt, skipping"
                );
                None
            }
        })
        .collect();

    let (Some((first, _)), Some((last, _))) = (spans.first(), spans.last()) else {
        return vec![plain(source, 0..text.len_chars(), 0..source.len())];
    };

    let mut segments = Vec::with_capacity(spans.len() * 2 + 1);

    if first.start() > 0 {
        segments.push(plain(source, 0..first.start(), 0..first.byte_range.start));
    }

    let mut previous: Option<&Span> = None;
    for (span, excerpt) in &spans {
        if let Some(previous) = previous {
            if previous.end() < span.start() {
                segments.push(plain(
                    source,
                    previous.end()..span.start(),
                    previous.byte_range.end..span.byte_range.start,
                ));
            }
        }
        segments.push(Segment::Tagged {
            span: (*span).clone(),
            text: SmolStr::new(&source[span.byte_range.clone()]),
            excerpt: (*excerpt).clone(),
        });
        previous = Some(*span);
    }

    if last.byte_range.end < source.len() {
        segments.push(plain(
            source,
            last.end()..text.len_chars(),
            last.byte_range.end..source.len(),
        ));
    }

    segments
}

fn plain(source: &str, char_range: Range<usize>, byte_range: Range<usize>) -> Segment {
    Segment::Plain {
        text: SmolStr::new(&source[byte_range.clone()]),
        char_range,
        byte_range,
    }
}
