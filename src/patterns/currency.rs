use super::PatternRule;
use crate::error::ExtractError;
use crate::kind::FieldKind;

pub const PATTERN: &str = concat!(
    r"(?:[$€£¥]|\b(?:USD|EUR|GBP|SAR|SR) ?)",
    r"(?:[0-9]{1,3}(?:,[0-9]{3})+|[0-9]+)",
    r"(?:\.[0-9]{1,2})?\b",
);

pub fn rule() -> Result<PatternRule, ExtractError> {
    PatternRule::new(FieldKind::Currency, PATTERN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{scan_values, PatternMatcher};

    #[test]
    fn test_valid_amounts() {
        let rule = rule().unwrap();
        let valid_amounts = vec![
            "$99.99",
            "$5",
            "$1,000,000.00",
            "€50",
            "£7.5",
            "¥1200",
            "SAR 375.50",
            "SR100",
            "USD 1,250",
        ];

        for amount in valid_amounts {
            assert!(rule.matches(amount), "Amount should be valid: {}", amount);
        }
    }

    #[test]
    fn test_invalid_amounts() {
        let rule = rule().unwrap();
        let invalid_amounts = vec!["99.99", "$", "$1,00", "SAR375.999", "USD", "$ 5"];

        for amount in invalid_amounts {
            assert!(!rule.matches(amount), "Amount should be invalid: {}", amount);
        }
    }

    #[test]
    fn test_extract_amounts() {
        let rule = rule().unwrap();
        let text = "Price: $99.99 or SAR 375.50 (was $1,200).";
        assert_eq!(scan_values(&rule, text), vec!["$99.99", "SAR 375.50", "$1,200"]);
    }
}
