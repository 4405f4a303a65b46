use super::PatternRule;
use crate::error::ExtractError;
use crate::kind::FieldKind;

// Octet ranges are left to the validator so "999.1.1.1" is rejected as a
// whole instead of matching a shorter tail.
pub const PATTERN: &str = r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b";

pub fn rule() -> Result<PatternRule, ExtractError> {
    Ok(PatternRule::new(FieldKind::IpAddress, PATTERN)?.with_validator(is_valid))
}

pub fn is_valid(value: &str) -> bool {
    let octets: Vec<&str> = value.split('.').collect();
    octets.len() == 4 && octets.iter().all(|octet| octet.parse::<u8>().is_ok())
}
