use super::PatternRule;
use crate::error::ExtractError;
use crate::kind::FieldKind;

// International form first so "+1-800-555-0199" is not consumed as "800-555-0199".
pub const PATTERN: &str = concat!(
    r"\+[0-9]{1,3}[-. ]?[0-9]{3}[-. ][0-9]{3}[-. ][0-9]{4}\b",
    r"|\b1[-. ][0-9]{3}[-. ][0-9]{3}[-. ][0-9]{4}\b",
    r"|\([0-9]{3}\) ?[0-9]{3}[-.][0-9]{4}\b",
    r"|\b[0-9]{3}-[0-9]{3}-[0-9]{4}\b",
    r"|\b[0-9]{3}\.[0-9]{3}\.[0-9]{4}\b",
);

const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 15;

pub fn rule() -> Result<PatternRule, ExtractError> {
    Ok(PatternRule::new(FieldKind::Phone, PATTERN)?.with_validator(is_valid))
}

pub fn is_valid(value: &str) -> bool {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    (MIN_DIGITS..=MAX_DIGITS).contains(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{scan_values, PatternMatcher};

    #[test]
    fn test_valid_phone_numbers() {
        let rule = rule().unwrap();
        let valid_phones = vec![
            "(555) 123-4567",
            "(555)123-4567",
            "555-123-4567",
            "555.123.4567",
            "+1-800-555-0199",
            "+1 800 555 0199",
            "1-800-555-0199",
            "1 800 555 0199",
            "+966-555-123-4567",
        ];

        for phone in valid_phones {
            assert!(rule.matches(phone), "Should match: {}", phone);
        }
    }

    #[test]
    fn test_invalid_phone_numbers() {
        let rule = rule().unwrap();
        let invalid_phones = vec![
            "123-45-678",
            "1234",
            "555-1234",
            "abcd",
            "8.8.8.8",
            "192.168.1.1",
            "555/123/4567",
        ];

        for phone in invalid_phones {
            assert!(!rule.matches(phone), "Should not match: {}", phone);
        }
    }

    #[test]
    fn test_digit_count_bounds() {
        assert!(is_valid("555-1234"));
        assert!(is_valid("+966-555-123-4567"));
        assert!(!is_valid("12-34"));
        assert!(!is_valid("+1234-5678-9012-3456"));
    }

    #[test]
    fn test_trunk_prefix_is_kept() {
        let rule = rule().unwrap();
        assert_eq!(
            scan_values(&rule, "Toll free: 1-800-555-0199."),
            vec!["1-800-555-0199"]
        );
        assert_eq!(scan_values(&rule, "call 800-555-0199"), vec!["800-555-0199"]);
    }

    #[test]
    fn test_extract_phonenumbers() {
        let rule = rule().unwrap();
        let text = "Call (555) 123-4567 or +1-800-555-0199, fax 555.987.6543.";
        assert_eq!(
            scan_values(&rule, text),
            vec!["(555) 123-4567", "+1-800-555-0199", "555.987.6543"]
        );
    }
}
