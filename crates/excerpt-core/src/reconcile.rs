//! Span reconciliation: order located spans and apply the overlap policy.

use crate::options::OverlapPolicy;
use crate::types::Span;

/// Sort spans by start offset and apply the overlap policy.
///
/// The sort is stable, so spans sharing a start offset keep their input order.
/// Under [`OverlapPolicy::Strict`] a span is dropped when it starts before the
/// end of the last span kept; the first span of a tie therefore wins.
pub fn reconcile(mut spans: Vec<Span>, policy: OverlapPolicy) -> Vec<Span> {
    spans.sort_by_key(Span::start);

    if policy == OverlapPolicy::Permissive {
        return spans;
    }

    let mut retained: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        if let Some(previous) = retained.last() {
            if span.start() < previous.end() {
                tracing::debug!(
                    target: "excerpt::reconcile",
                    excerpt_id = %span.excerpt_id,
                    overlaps = %previous.excerpt_id,
                    "dropping overlapping span"
                );
                continue;
            }
        }
        retained.push(span);
    }
    retained
}
