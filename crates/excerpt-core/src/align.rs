//! The full locate → reconcile → sequence pipeline, with memoisation.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::locate::locate_with;
use crate::options::AlignOptions;
use crate::reconcile::reconcile;
use crate::sequence::sequence;
use crate::types::{ExcerptRecord, Segment};

/// Run the whole pipeline once.
///
/// Missing excerpts behave like an empty list; a missing source renders nothing.
pub fn align(
    source: Option<&str>,
    excerpts: Option<&[ExcerptRecord]>,
    options: &AlignOptions,
) -> Vec<Segment> {
    let excerpts = excerpts.unwrap_or_default();
    let spans = match source {
        Some(text) => reconcile(locate_with(text, excerpts, options.matching), options.overlap),
        None => Vec::new(),
    };
    sequence(source, &spans, excerpts)
}

/// Hash of everything the pipeline output depends on.
///
/// Used to detect when cached segments are stale.
pub fn fingerprint(
    source: Option<&str>,
    excerpts: Option<&[ExcerptRecord]>,
    options: &AlignOptions,
) -> u64 {
    let mut hasher = DefaultHasher::new();
    source.hash(&mut hasher);
    excerpts.hash(&mut hasher);
    options.hash(&mut hasher);
    hasher.finish()
}

/// Inputs and output of the last pipeline run.
#[derive(Debug)]
struct CachedRun {
    key: u64,
    source: Option<String>,
    excerpts: Option<Vec<ExcerptRecord>>,
    options: AlignOptions,
    segments: Vec<Segment>,
}

impl CachedRun {
    /// Fingerprint first, then the inputs themselves, so a hash collision
    /// can't serve stale segments.
    fn matches(
        &self,
        key: u64,
        source: Option<&str>,
        excerpts: Option<&[ExcerptRecord]>,
        options: &AlignOptions,
    ) -> bool {
        self.key == key
            && self.options == *options
            && self.source.as_deref() == source
            && self.excerpts.as_deref() == excerpts
    }
}

/// Pipeline with a single-entry cache.
///
/// Re-renders call [`ExcerptAligner::segments`] with the current inputs; the
/// pipeline only reruns when the source, the excerpts or the options changed.
#[derive(Debug, Default)]
pub struct ExcerptAligner {
    options: AlignOptions,
    cached: Option<CachedRun>,
}

impl ExcerptAligner {
    pub fn new(options: AlignOptions) -> Self {
        Self {
            options,
            cached: None,
        }
    }

    pub fn options(&self) -> &AlignOptions {
        &self.options
    }

    /// Change options. The next call recomputes if they differ.
    pub fn set_options(&mut self, options: AlignOptions) {
        self.options = options;
    }

    /// Segments for the given inputs, recomputed only when they changed.
    pub fn segments(
        &mut self,
        source: Option<&str>,
        excerpts: Option<&[ExcerptRecord]>,
    ) -> &[Segment] {
        let key = fingerprint(source, excerpts, &self.options);
        let fresh = self
            .cached
            .as_ref()
            .is_some_and(|run| run.matches(key, source, excerpts, &self.options));
        if !fresh {
            tracing::trace!(target: "excerpt::align", key, "recomputing segments");
            self.cached = Some(CachedRun {
                key,
                source: source.map(str::to_owned),
                excerpts: excerpts.map(<[ExcerptRecord]>::to_vec),
                options: self.options,
                segments: align(source, excerpts, &self.options),
            });
        }
        self.cached
            .as_ref()
            .map(|run| run.segments.as_slice())
            .unwrap_or_default()
    }

    /// Drop the cached segments.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OverlapPolicy;

    const FOX: &str = "The quick brown fox jumps.";

    #[test]
    fn test_align_example() {
        let excerpts = vec![ExcerptRecord::new("a", "quick brown").with_display("QUICK BROWN")];
        let segments = align(Some(FOX), Some(excerpts.as_slice()), &AlignOptions::default());
        let texts: Vec<_> = segments.iter().map(Segment::display_text).collect();
        assert_eq!(texts, ["The ", "QUICK BROWN", " fox jumps."]);
    }

    #[test]
    fn test_align_degenerate_inputs() {
        let options = AlignOptions::default();
        assert!(align(None, Some(&[][..]), &options).is_empty());
        assert!(align(None, None, &options).is_empty());

        let segments = align(Some("abc"), None, &options);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text(), "abc");
    }

    #[test]
    fn test_align_is_idempotent() {
        let excerpts = vec![
            ExcerptRecord::new("fox", "fox"),
            ExcerptRecord::new("brown_fox", "brown fox"),
            ExcerptRecord::new("the", "The"),
        ];
        for options in [AlignOptions::strict(), AlignOptions::permissive()] {
            let first = align(Some(FOX), Some(excerpts.as_slice()), &options);
            let second = align(Some(FOX), Some(excerpts.as_slice()), &options);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_fingerprint_tracks_every_input() {
        let excerpts = vec![ExcerptRecord::new("a", "fox")];
        let base = fingerprint(Some(FOX), Some(excerpts.as_slice()), &AlignOptions::default());
        assert_eq!(base, fingerprint(Some(FOX), Some(excerpts.as_slice()), &AlignOptions::default()));
        assert_ne!(base, fingerprint(Some("other"), Some(excerpts.as_slice()), &AlignOptions::default()));
        assert_ne!(base, fingerprint(Some(FOX), Some(&[][..]), &AlignOptions::default()));
        assert_ne!(base, fingerprint(Some(FOX), Some(excerpts.as_slice()), &AlignOptions::permissive()));
    }

    #[test]
    fn test_aligner_caches_until_inputs_change() {
        let mut aligner = ExcerptAligner::default();
        let excerpts = vec![ExcerptRecord::new("a", "fox")];

        let first_ptr = aligner.segments(Some(FOX), Some(excerpts.as_slice())).as_ptr();
        let second_ptr = aligner.segments(Some(FOX), Some(excerpts.as_slice())).as_ptr();
        assert_eq!(first_ptr, second_ptr);

        let edited = vec![ExcerptRecord::new("a", "jumps")];
        let segments = aligner.segments(Some(FOX), Some(edited.as_slice()));
        assert_eq!(segments[1].text(), "jumps");
    }

    #[test]
    fn test_aligner_option_change_recomputes() {
        let excerpts = vec![
            ExcerptRecord::new("fox", "fox"),
            ExcerptRecord::new("brown_fox", "brown fox"),
        ];
        let mut aligner = ExcerptAligner::new(AlignOptions::strict());
        assert_eq!(aligner.segments(Some(FOX), Some(excerpts.as_slice())).len(), 3);

        aligner.set_options(AlignOptions::permissive());
        assert_eq!(aligner.options().overlap, OverlapPolicy::Permissive);
        assert_eq!(aligner.segments(Some(FOX), Some(excerpts.as_slice())).len(), 4);
    }

    #[test]
    fn test_aligner_checks_inputs_not_just_fingerprint() {
        let excerpts = vec![ExcerptRecord::new("a", "fox")];
        let mut aligner = ExcerptAligner::default();
        let key = fingerprint(Some(FOX), Some(excerpts.as_slice()), aligner.options());

        // A cached run under the same key but for other inputs, as a
        // fingerprint collision would leave behind.
        aligner.cached = Some(CachedRun {
            key,
            source: Some("unrelated".into()),
            excerpts: Some(Vec::new()),
            options: AlignOptions::default(),
            segments: align(Some("unrelated"), None, &AlignOptions::default()),
        });

        let segments = aligner.segments(Some(FOX), Some(excerpts.as_slice()));
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].text(), "fox");
    }

    #[test]
    fn test_aligner_invalidate_recomputes() {
        let excerpts = vec![ExcerptRecord::new("a", "fox")];
        let mut aligner = ExcerptAligner::default();
        aligner.segments(Some(FOX), Some(excerpts.as_slice()));
        aligner.invalidate();
        assert!(aligner.cached.is_none());
        assert_eq!(aligner.segments(Some(FOX), Some(excerpts.as_slice())).len(), 3);
    }
}
