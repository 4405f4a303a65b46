use thiserror::Error;

use crate::kind::FieldKind;

/// Errors surfaced by the extractor.
///
/// A text that yields no matches, or only matches rejected by a validator,
/// is not an error: it is represented by an empty sequence in the result.
#[derive(Debug, Clone, Error)]
pub enum ExtractError {
    /// Unknown field kind name, or a kind the bound rule table has no rule for.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A built-in pattern failed to compile. This is a defect in the rule table.
    #[error("pattern for {kind} failed to compile: {source}")]
    PatternCompilation {
        kind: FieldKind,
        #[source]
        source: regex::Error,
    },

    /// A caller-supplied ad-hoc pattern failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[source] regex::Error),
}

impl ExtractError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
