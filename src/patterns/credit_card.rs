use super::PatternRule;
use crate::error::ExtractError;
use crate::kind::FieldKind;

/// Grouped 4-4-4-4 and 4-6-5 layouts are tried before the free form, so a
/// trailing security code is not taken as part of the number.
pub const PATTERN: &str = concat!(
    r"\b[0-9]{4}(?:[ -][0-9]{4}){3}\b",
    r"|\b[0-9]{4}[ -][0-9]{6}[ -][0-9]{5}\b",
    r"|\b[0-9](?:[ -]?[0-9]){12,18}\b",
);

pub const MASK_CHAR: char = '*';

const MIN_DIGITS: usize = 13;
const MAX_DIGITS: usize = 19;
const VISIBLE_DIGITS: usize = 4;

pub fn rule() -> Result<PatternRule, ExtractError> {
    Ok(PatternRule::new(FieldKind::CreditCard, PATTERN)?
        .with_validator(is_valid)
        .with_formatter(mask))
}

fn digits(value: &str) -> Vec<u32> {
    value.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// Luhn checksum over the ASCII digits of `value`; other characters are ignored.
pub fn luhn(value: &str) -> bool {
    let digits = digits(value);
    if digits.is_empty() {
        return false;
    }
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(idx, &d)| {
            if idx % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

pub fn is_valid(value: &str) -> bool {
    let count = digits(value).len();
    (MIN_DIGITS..=MAX_DIGITS).contains(&count) && luhn(value)
}

/// Keeps the first and last four digits, masks the rest and drops separators:
/// `4111 1111 1111 1111` becomes `4111********1111`.
pub fn mask(value: &str) -> String {
    let digits: Vec<char> = value.chars().filter(char::is_ascii_digit).collect();
    let hidden = digits.len().saturating_sub(2 * VISIBLE_DIGITS);
    digits
        .iter()
        .enumerate()
        .map(|(idx, &c)| {
            if idx >= VISIBLE_DIGITS && idx < VISIBLE_DIGITS + hidden {
                MASK_CHAR
            } else {
                c
            }
        })
        .collect()
}
