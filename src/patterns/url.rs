use super::PatternRule;
use crate::error::ExtractError;
use crate::kind::FieldKind;

// A scheme or a "www." prefix is required so bare file names and email
// domains are not reported as URLs. Trailing sentence punctuation is left out.
pub const PATTERN: &str = concat!(
    r"(?i)\b(?:https?://(?:www\.)?|www\.)",
    r"(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}",
    r"(?::[0-9]{1,5})?",
    r#"(?:[/?#](?:[^\s]*[^\s.,;:!?'")\]>])?)?"#,
);

pub fn rule() -> Result<PatternRule, ExtractError> {
    Ok(PatternRule::new(FieldKind::Url, PATTERN)?
        .with_validator(is_valid)
        .with_formatter(normalize))
}

const SCHEMES: [&str; 2] = ["https://", "http://"];

/// Length of a leading `http(s)://`. A `://` later in the value belongs to
/// the path or query.
fn scheme_len(value: &str) -> usize {
    SCHEMES
        .iter()
        .find(|scheme| {
            value
                .get(..scheme.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
        })
        .map_or(0, |scheme| scheme.len())
}

fn authority(value: &str) -> &str {
    let rest = &value[scheme_len(value)..];
    let end = rest
        .find(|c| matches!(c, '/' | '?' | '#'))
        .unwrap_or(rest.len());
    &rest[..end]
}

pub fn is_valid(value: &str) -> bool {
    match authority(value).rsplit_once(':') {
        Some((_, port)) => port.parse::<u16>().is_ok(),
        None => true,
    }
}

/// Lowercases scheme and host, leaving path and query untouched.
pub fn normalize(value: &str) -> String {
    let split = scheme_len(value) + authority(value).len();
    format!("{}{}", value[..split].to_ascii_lowercase(), &value[split..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{scan_values, PatternMatcher};

    #[test]
    fn test_valid_urls() {
        let rule = rule().unwrap();
        let valid_urls = vec![
            "http://example.com",
            "https://example.com",
            "http://www.example.com",
            "www.example.com",
            "http://example.com/path",
            "http://example.com/path?query=value",
            "http://example.com:8080",
            "https://sub.example.co.uk/a/b#frag",
        ];

        for url in valid_urls {
            assert!(rule.matches(url), "URL should be valid: {}", url);
        }
    }

    #[test]
    fn test_invalid_urls() {
        let rule = rule().unwrap();
        let invalid_urls = vec![
            "example.com",
            "http://",
            "http:/example.com",
            "http://example",
            "http://..com",
            "ftp://example.com",
            "http://example.com:99999",
        ];

        for url in invalid_urls {
            assert!(!rule.matches(url), "URL should be invalid: {}", url);
        }
    }

    #[test]
    fn test_host_is_lowercased() {
        assert_eq!(
            normalize("HTTPS://WWW.Example.COM/Some/Path?Q=1"),
            "https://www.example.com/Some/Path?Q=1"
        );
        assert_eq!(normalize("WWW.Test.com"), "www.test.com");
    }

    #[test]
    fn test_embedded_scheme_in_query() {
        let with_path = "www.Example.com/Path?next=http://X.org";
        assert_eq!(normalize(with_path), "www.example.com/Path?next=http://X.org");

        let with_port = "www.example.com/go?to=http://a.b:99999";
        assert!(is_valid(with_port));
        assert_eq!(authority(with_port), "www.example.com");

        let rule = rule().unwrap();
        assert_eq!(
            scan_values(&rule, "see www.Example.com/Path?next=http://X.org now"),
            vec!["www.example.com/Path?next=http://X.org"]
        );
        assert_eq!(
            scan_values(&rule, "see www.example.com/go?to=http://a.b:99999 now"),
            vec!["www.example.com/go?to=http://a.b:99999"]
        );
    }

    #[test]
    fn test_extract_urls() {
        let rule = rule().unwrap();
        let text = "Visit: https://example.com/docs. And www.Test.com, or (http://x.org/a?b=1).";
        assert_eq!(
            scan_values(&rule, text),
            vec!["https://example.com/docs", "www.test.com", "http://x.org/a?b=1"]
        );
    }

    #[test]
    fn test_email_domain_is_not_a_url() {
        let rule = rule().unwrap();
        assert!(scan_values(&rule, "mail support@example.com").is_empty());
    }
}
