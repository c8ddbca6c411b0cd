//! Alignment options.
//!
//! Two knobs cover the places where excerpt placement is ambiguous: what to do
//! with overlapping spans, and which occurrence of a repeated phrase to use.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};

/// How the reconciler treats spans that overlap an earlier span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Drop any span starting before the previous retained span ends.
    /// Segments then reproduce the source text exactly.
    #[default]
    Strict,
    /// Keep every span. Overlapping text is rendered more than once.
    Permissive,
}

/// Which occurrence of an excerpt's raw text the locator uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchStrategy {
    /// Always the first occurrence in the source, even if an earlier excerpt
    /// already sits there.
    #[default]
    FirstOccurrence,
    /// The first occurrence not already claimed by an earlier excerpt (input
    /// order). Falls back to the first occurrence when every one is claimed.
    NextUnclaimed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlignOptions {
    pub overlap: OverlapPolicy,
    pub matching: MatchStrategy,
}

impl AlignOptions {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn permissive() -> Self {
        Self {
            overlap: OverlapPolicy::Permissive,
            ..Self::default()
        }
    }

    pub fn with_matching(mut self, matching: MatchStrategy) -> Self {
        self.matching = matching;
        self
    }

    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        serde_json::from_str(json).map_err(|source| OptionsError::Json {
            line: source.line(),
            column: source.column(),
            source,
        })
    }
}

#[derive(thiserror::Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum OptionsError {
    #[error("invalid alignment options at {line}:{column}")]
    #[diagnostic(
        code(excerpt::options),
        help(
            "expected {{\"overlap\": \"strict\" | \"permissive\", \"matching\": \"firstOccurrence\" | \"nextUnclaimed\"}}"
        )
    )]
    Json {
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },
}
