use super::PatternRule;
use crate::error::ExtractError;
use crate::kind::FieldKind;

pub const PATTERN: &str = concat!(
    r"\b[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}\b",
    r"|\b[0-9]{1,2}/[0-9]{1,2}/(?:[0-9]{4}|[0-9]{2})\b",
    r"|\b[0-9]{1,2}-[0-9]{1,2}-(?:[0-9]{4}|[0-9]{2})\b",
);

pub fn rule() -> Result<PatternRule, ExtractError> {
    Ok(PatternRule::new(FieldKind::Date, PATTERN)?.with_validator(is_valid))
}

fn is_month(value: u32) -> bool {
    (1..=12).contains(&value)
}

fn is_day(value: u32) -> bool {
    (1..=31).contains(&value)
}

/// Accepts a date that is plausible as year-month-day (ISO form), or as
/// either day-month-year or month-day-year. Which of the two numeric
/// orderings was meant is not decided here: `03/04/2024` is kept verbatim.
pub fn is_valid(value: &str) -> bool {
    let parts: Vec<&str> = value.split(|c| c == '/' || c == '-').collect();
    let [first, second, third] = parts.as_slice() else {
        return false;
    };
    let (Ok(a), Ok(b), Ok(c)) = (first.parse::<u32>(), second.parse::<u32>(), third.parse::<u32>())
    else {
        return false;
    };

    if first.len() == 4 {
        return is_month(b) && is_day(c);
    }
    (is_month(a) && is_day(b)) || (is_month(b) && is_day(a))
}
