//! Span location: find each excerpt's raw text within the source.

use std::ops::Range;

use crate::options::MatchStrategy;
use crate::text::SourceText;
use crate::types::{ExcerptRecord, Span};

/// Locate excerpts by first occurrence.
///
/// Records with a missing or empty raw excerpt, or whose raw excerpt doesn't
/// occur in the source, produce no span. Repeated phrases always resolve to
/// their first occurrence.
pub fn locate(source: &str, excerpts: &[ExcerptRecord]) -> Vec<Span> {
    locate_with(source, excerpts, MatchStrategy::FirstOccurrence)
}

/// Locate excerpts with an explicit match strategy.
///
/// Output is in input order; the reconciler sorts.
pub fn locate_with(source: &str, excerpts: &[ExcerptRecord], strategy: MatchStrategy) -> Vec<Span> {
    let mut spans = Vec::with_capacity(excerpts.len());
    if source.is_empty() {
        return spans;
    }
    let text = SourceText::new(source);

    for excerpt in excerpts {
        let Some(raw) = excerpt.locatable_text() else {
            tracing::trace!(
                target: "excerpt::locate",
                excerpt_id = %excerpt.id,
                "skipping excerpt without raw text"
            );
            continue;
        };

        let found = match strategy {
            MatchStrategy::FirstOccurrence => first_match(source, raw),
            MatchStrategy::NextUnclaimed => {
                unclaimed_match(&text, source, raw, &spans).or_else(|| first_match(source, raw))
            }
        };

        match found {
            Some(byte_range) => {
                let span = Span::from_valid_bytes(excerpt.id.clone(), &text, byte_range);
                tracing::trace!(
                    target: "excerpt::locate",
                    excerpt_id = %excerpt.id,
                    range = ?span.char_range,
                    "located excerpt"
                );
                spans.push(span);
            }
            None => {
                tracing::debug!(
                    target: "excerpt::locate",
                    excerpt_id = %excerpt.id,
                    "excerpt not found in source, dropping"
                );
            }
        }
    }

    spans
}

fn first_match(source: &str, raw: &str) -> Option<Range<usize>> {
    source.find(raw).map(|start| start..start + raw.len())
}

/// First occurrence of `raw` that doesn't overlap any already-located span.
fn unclaimed_match(
    text: &SourceText,
    source: &str,
    raw: &str,
    claimed: &[Span],
) -> Option<Range<usize>> {
    let mut from = 0;
    while from < source.len() {
        let start = from + source[from..].find(raw)?;
        let candidate = start..start + raw.len();
        let taken = claimed.iter().any(|span| {
            candidate.start < span.byte_range.end && span.byte_range.start < candidate.end
        });
        if !taken {
            return Some(candidate);
        }
        from = text.next_char_boundary(start);
    }
    None
}
