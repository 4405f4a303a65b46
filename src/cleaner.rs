//! Fluent text cleaning.
//!
//! Every step consumes a [`CleanText`] and returns a new one with the step
//! recorded, so a pipeline reads as a chain:
//!
//! ```
//! use field_extractor::cleaner::CleanText;
//!
//! let cleaned = CleanText::new("<p>Hello   <b>World</b></p>")
//!     .remove_html_tags()
//!     .normalize_whitespace()
//!     .to_lowercase();
//! assert_eq!(cleaned.text(), "hello world");
//! ```

use deunicode::deunicode_char;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::config::CleanOptions;

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref HTTP_URL: Regex = Regex::new(r"https?://\S+").unwrap();
    static ref WWW_URL: Regex = Regex::new(r"www\.\S+").unwrap();
    static ref EMAIL: Regex = Regex::new(r"\S+@\S+").unwrap();
    static ref PHONE_PLAIN: Regex = Regex::new(r"[0-9]{3}[-.]?[0-9]{3}[-.]?[0-9]{4}").unwrap();
    static ref PHONE_PAREN: Regex = Regex::new(r"\([0-9]{3}\)\s*[0-9]{3}[-.]?[0-9]{4}").unwrap();
    static ref NUMBER: Regex = Regex::new(r"[0-9]+\.?[0-9]*").unwrap();
    static ref SPECIAL_KEEP_SPACES: Regex = Regex::new(r"[^a-zA-Z0-9\s]").unwrap();
    static ref SPECIAL: Regex = Regex::new(r"[^a-zA-Z0-9]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleaningStep {
    pub step: &'static str,
    pub chars_removed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleaningReport {
    pub original_length: usize,
    pub final_length: usize,
    pub chars_removed: usize,
    pub steps: Vec<CleaningStep>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanText {
    original: String,
    text: String,
    steps: Vec<CleaningStep>,
}

impl CleanText {
    pub fn new(text: impl Into<String>) -> Self {
        let original = text.into();
        Self {
            text: original.clone(),
            original,
            steps: Vec::new(),
        }
    }

    /// Runs the enabled steps of the default pipeline.
    pub fn pipeline(text: &str, options: &CleanOptions) -> Self {
        let mut cleaned = Self::new(text);
        if options.html {
            cleaned = cleaned.remove_html_tags();
        }
        if options.urls {
            cleaned = cleaned.remove_urls();
        }
        if options.emails {
            cleaned = cleaned.remove_emails();
        }
        if options.phones {
            cleaned = cleaned.remove_phone_numbers();
        }
        if options.special_characters {
            cleaned = cleaned.remove_special_characters(true);
        }
        if options.unicode {
            cleaned = cleaned.normalize_unicode();
        }
        if options.whitespace {
            cleaned = cleaned.normalize_whitespace();
        }
        if options.lowercase {
            cleaned = cleaned.to_lowercase();
        }
        cleaned
    }

    fn apply(self, step: &'static str, transform: impl FnOnce(&str) -> String) -> Self {
        let before = self.text.chars().count();
        let text = transform(&self.text);
        let chars_removed = before.saturating_sub(text.chars().count());

        let mut steps = self.steps;
        steps.push(CleaningStep { step, chars_removed });
        Self {
            original: self.original,
            text,
            steps,
        }
    }

    pub fn remove_html_tags(self) -> Self {
        self.apply("remove_html_tags", |t| HTML_TAG.replace_all(t, "").into_owned())
    }

    /// Removes `http(s)://` and `www.` URLs.
    pub fn remove_urls(self) -> Self {
        self.apply("remove_urls", |t| {
            let t = HTTP_URL.replace_all(t, "");
            WWW_URL.replace_all(&t, "").into_owned()
        })
    }

    /// Removes any whitespace-delimited token containing `@`.
    pub fn remove_emails(self) -> Self {
        self.apply("remove_emails", |t| EMAIL.replace_all(t, "").into_owned())
    }

    pub fn remove_phone_numbers(self) -> Self {
        self.apply("remove_phone_numbers", |t| {
            let t = PHONE_PLAIN.replace_all(t, "");
            PHONE_PAREN.replace_all(&t, "").into_owned()
        })
    }

    pub fn remove_numbers(self) -> Self {
        self.apply("remove_numbers", |t| NUMBER.replace_all(t, "").into_owned())
    }

    /// Keeps ASCII letters and digits, plus whitespace when `keep_spaces` is set.
    pub fn remove_special_characters(self, keep_spaces: bool) -> Self {
        let pattern: &Regex = if keep_spaces { &*SPECIAL_KEEP_SPACES } else { &*SPECIAL };
        self.apply("remove_special_characters", |t| {
            pattern.replace_all(t, "").into_owned()
        })
    }

    pub fn to_lowercase(self) -> Self {
        self.apply("to_lowercase", str::to_lowercase)
    }

    pub fn to_uppercase(self) -> Self {
        self.apply("to_uppercase", str::to_uppercase)
    }

    /// Collapses every whitespace run to one space and trims both ends.
    pub fn normalize_whitespace(self) -> Self {
        self.apply("normalize_whitespace", |t| {
            WHITESPACE.replace_all(t, " ").trim().to_string()
        })
    }

    /// Transliterates the text to ASCII (`café` becomes `cafe`).
    ///
    /// Typographic quotes, dashes, ellipses and non-breaking spaces fold to a
    /// single ASCII form, zero-width characters are dropped, and characters
    /// without a transliteration are removed.
    pub fn normalize_unicode(self) -> Self {
        self.apply("normalize_unicode", |t| {
            let mut out = String::with_capacity(t.len());
            for c in t.chars() {
                match c {
                    '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => out.push('\''),
                    '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => out.push('"'),
                    '\u{2010}'..='\u{2015}' | '\u{2212}' => out.push('-'),
                    '\u{2026}' => out.push_str("..."),
                    '\u{00A0}' | '\u{2007}' | '\u{202F}' => out.push(' '),
                    '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}' => {}
                    c if c.is_ascii() => out.push(c),
                    c => out.push_str(deunicode_char(c).unwrap_or("")),
                }
            }
            out
        })
    }

    pub fn remove_extra_spaces(self) -> Self {
        self.apply("remove_extra_spaces", |t| {
            t.split_whitespace().collect::<Vec<_>>().join(" ")
        })
    }

    /// Back to the original text with no recorded steps.
    pub fn reset(self) -> Self {
        Self::new(self.original)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn steps(&self) -> &[CleaningStep] {
        &self.steps
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn report(&self) -> CleaningReport {
        let original_length = self.original.chars().count();
        let final_length = self.text.chars().count();
        CleaningReport {
            original_length,
            final_length,
            chars_removed: original_length.saturating_sub(final_length),
            steps: self.steps.clone(),
        }
    }
}
