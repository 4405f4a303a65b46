use super::PatternRule;
use crate::error::ExtractError;
use crate::kind::FieldKind;

// 12-hour form first: at the same start it must win over the bare 24-hour form.
pub const PATTERN: &str = concat!(
    r"(?i)\b[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})? ?[ap]m\b",
    r"|\b[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?\b",
);

pub fn rule() -> Result<PatternRule, ExtractError> {
    Ok(PatternRule::new(FieldKind::Time, PATTERN)?
        .with_validator(is_valid)
        .with_formatter(normalize))
}

/// Splits `"3:45 pm"` into `("3:45", Some("PM"))`.
fn split_meridiem(value: &str) -> (&str, Option<String>) {
    let lower = value.to_ascii_lowercase();
    if lower.ends_with("am") || lower.ends_with("pm") {
        let (clock, suffix) = value.split_at(value.len() - 2);
        (clock.trim_end(), Some(suffix.to_ascii_uppercase()))
    } else {
        (value, None)
    }
}

pub fn is_valid(value: &str) -> bool {
    let (clock, meridiem) = split_meridiem(value);
    let fields: Result<Vec<u32>, _> = clock.split(':').map(str::parse).collect();
    let Ok(fields) = fields else {
        return false;
    };

    let (hour, rest) = match fields.split_first() {
        Some((hour, rest)) if !rest.is_empty() => (*hour, rest),
        _ => return false,
    };
    let hour_ok = match meridiem {
        Some(_) => (1..=12).contains(&hour),
        None => hour <= 23,
    };
    hour_ok && rest.iter().all(|v| *v <= 59)
}

/// 12-hour times get a single space and an uppercase `AM`/`PM`.
pub fn normalize(value: &str) -> String {
    match split_meridiem(value) {
        (clock, Some(suffix)) => format!("{} {}", clock, suffix),
        (_, None) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{scan_values, PatternMatcher};

    #[test]
    fn test_valid_times() {
        let rule = rule().unwrap();
        let valid_times = vec![
            "14:30",
            "00:00",
            "1:23",
            "23:59:59",
            "3:45 PM",
            "3:45pm",
            "12:00 am",
            "11:59:59 PM",
        ];

        for time in valid_times {
            assert!(rule.matches(time), "Time should be valid: {}", time);
        }
    }

    #[test]
    fn test_invalid_times() {
        let rule = rule().unwrap();
        let invalid_times = vec![
            "24:00",    // hours out of range
            "12:60",    // minutes out of range
            "23:59:60", // seconds out of range
            "13:00 PM", // not a 12-hour value
            "0:30 AM",  // not a 12-hour value
            "12:34 ZM",
            "12-34",
            "1234",
        ];

        for time in invalid_times {
            assert!(!rule.matches(time), "Time should be invalid: {}", time);
        }
    }

    #[test]
    fn test_meridiem_is_normalized() {
        assert_eq!(normalize("3:45pm"), "3:45 PM");
        assert_eq!(normalize("10:05:30 Am"), "10:05:30 AM");
        assert_eq!(normalize("14:30"), "14:30");
    }

    #[test]
    fn test_extract_times() {
        let rule = rule().unwrap();
        let text = "Time: 14:30 or 3:45 pm, never 25:00.";
        assert_eq!(scan_values(&rule, text), vec!["14:30", "3:45 PM"]);
    }
}
