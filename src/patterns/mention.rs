use super::PatternRule;
use crate::error::ExtractError;
use crate::kind::FieldKind;

pub const PATTERN: &str = r"@\w+";

pub fn rule() -> Result<PatternRule, ExtractError> {
    Ok(PatternRule::new(FieldKind::Mention, PATTERN)?.with_left_boundary())
}
