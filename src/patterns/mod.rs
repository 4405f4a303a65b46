pub mod credit_card;
pub mod currency;
pub mod date;
pub mod email;
pub mod hashtag;
pub mod ip;
pub mod mention;
pub mod phone;
pub mod time;
pub mod url;

use regex::Regex;
use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::error::ExtractError;
use crate::extractor::Match;
use crate::kind::FieldKind;

/// Rejects a syntactically matched value that is semantically invalid.
pub type Validator = fn(&str) -> bool;

/// Normalizes or masks an accepted value.
pub type Formatter = fn(&str) -> String;

pub trait PatternMatcher {
    /// True when the whole value is a single accepted match.
    fn matches(&self, value: &str) -> bool;
}

/// The immutable (pattern, validator, formatter) triple for one field kind.
#[derive(Debug, Clone)]
pub struct PatternRule {
    kind: FieldKind,
    regex: Regex,
    anchored: Regex,
    validator: Option<Validator>,
    formatter: Option<Formatter>,
    left_boundary: bool,
}

impl PatternRule {
    pub fn new(kind: FieldKind, pattern: &str) -> Result<Self, ExtractError> {
        let compile = |source: &str| {
            Regex::new(source).map_err(|source| ExtractError::PatternCompilation { kind, source })
        };

        Ok(Self {
            kind,
            regex: compile(pattern)?,
            anchored: compile(&format!("^(?:{})$", pattern))?,
            validator: None,
            formatter: None,
            left_boundary: false,
        })
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Require the character before a match to be a non-word character.
    /// Stands in for a look-behind, which the regex engine does not support.
    pub fn with_left_boundary(mut self) -> Self {
        self.left_boundary = true;
        self
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Boundary and validator checks for the candidate `text[start..end]`.
    pub fn accepts(&self, text: &str, start: usize, end: usize) -> bool {
        if self.left_boundary && text[..start].chars().next_back().is_some_and(is_word_char) {
            return false;
        }
        self.validator.map_or(true, |validate| validate(&text[start..end]))
    }

    pub fn format(&self, raw: &str) -> String {
        self.formatter.map_or_else(|| raw.to_string(), |format| format(raw))
    }

    /// Accepted, formatted matches in increasing start order.
    ///
    /// Characters consumed by a rejected candidate are not scanned again.
    pub fn scan<'t>(&'t self, text: &'t str) -> impl Iterator<Item = Match> + 't {
        self.regex.find_iter(text).filter_map(move |m| {
            if !self.accepts(text, m.start(), m.end()) {
                trace!(kind = %self.kind, start = m.start(), end = m.end(), "candidate rejected");
                return None;
            }
            Some(Match {
                kind: self.kind,
                start: m.start(),
                end: m.end(),
                raw: m.as_str().to_string(),
                normalized: self.format(m.as_str()),
            })
        })
    }
}

impl PatternMatcher for PatternRule {
    fn matches(&self, value: &str) -> bool {
        self.anchored.is_match(value) && self.accepts(value, 0, value.len())
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Read-only lookup table of pattern rules keyed by field kind.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: BTreeMap<FieldKind, PatternRule>,
}

impl RuleTable {
    /// Compiles the rule for every `FieldKind`.
    pub fn builtin() -> Result<Self, ExtractError> {
        let table = Self::from_rules([
            email::rule()?,
            phone::rule()?,
            url::rule()?,
            date::rule()?,
            time::rule()?,
            currency::rule()?,
            hashtag::rule()?,
            mention::rule()?,
            ip::rule()?,
            credit_card::rule()?,
        ]);
        debug!(rules = table.len(), "compiled built-in pattern rules");
        Ok(table)
    }

    /// Builds a table from the given rules. A later rule replaces an earlier
    /// one for the same kind.
    pub fn from_rules(rules: impl IntoIterator<Item = PatternRule>) -> Self {
        Self {
            rules: rules.into_iter().map(|rule| (rule.kind, rule)).collect(),
        }
    }

    pub fn get(&self, kind: FieldKind) -> Option<&PatternRule> {
        self.rules.get(&kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = FieldKind> + '_ {
        self.rules.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PatternRule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn scan_values(rule: &PatternRule, text: &str) -> Vec<String> {
    rule.scan(text).map(|m| m.normalized).collect()
}
