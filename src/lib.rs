pub mod cleaner;
pub mod config;
pub mod error;
pub mod extractor;
pub mod kind;
pub mod ner;
pub mod patterns;
pub mod report;
pub mod stats;

pub use error::ExtractError;
pub use extractor::{extract_custom, ExtractionResult, Extractor, Match};
pub use kind::FieldKind;
pub use patterns::{PatternMatcher, PatternRule, RuleTable};

use lazy_static::lazy_static;

lazy_static! {
    // Compiled once on first use and never mutated afterwards.
    static ref BUILTIN_RULES: Result<RuleTable, ExtractError> = RuleTable::builtin();
}

/// The process-wide built-in rule table.
pub fn builtin_rules() -> Result<&'static RuleTable, ExtractError> {
    BUILTIN_RULES.as_ref().map_err(Clone::clone)
}

/// Extracts the requested field kinds from `text` with the built-in rules.
pub fn extract(
    text: &str,
    kinds: impl IntoIterator<Item = FieldKind>,
) -> Result<ExtractionResult, ExtractError> {
    Extractor::builtin()?.extract(text, kinds)
}

/// Field kinds that the whole `value` matches, e.g. `[FieldKind::IpAddress]` for `"10.0.0.1"`.
pub fn classify(value: &str) -> Result<Vec<FieldKind>, ExtractError> {
    Ok(Extractor::builtin()?.classify(value))
}
