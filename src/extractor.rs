//! Structured field extraction over a fixed rule table.
//!
//! An [`Extractor`] borrows an immutable [`RuleTable`] and holds no other
//! state, so one table can serve any number of concurrent callers.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::debug;

use crate::error::ExtractError;
use crate::kind::FieldKind;
use crate::patterns::{PatternMatcher, PatternRule, RuleTable};

/// A position-tagged, accepted match. Offsets are byte offsets into the
/// scanned text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub kind: FieldKind,
    pub start: usize,
    pub end: usize,
    pub raw: String,
    pub normalized: String,
}

/// Normalized values per requested kind, in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractionResult {
    fields: BTreeMap<FieldKind, Vec<String>>,
}

impl ExtractionResult {
    /// Values for `kind`; empty when nothing matched or the kind was not requested.
    pub fn get(&self, kind: FieldKind) -> &[String] {
        self.fields.get(&kind).map_or(&[], Vec::as_slice)
    }

    pub fn contains_kind(&self, kind: FieldKind) -> bool {
        self.fields.contains_key(&kind)
    }

    /// Requested kinds, in `FieldKind` order.
    pub fn kinds(&self) -> impl Iterator<Item = FieldKind> + '_ {
        self.fields.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKind, &[String])> {
        self.fields.iter().map(|(kind, values)| (*kind, values.as_slice()))
    }

    /// Number of values across all kinds.
    pub fn total(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    /// True when no kind has any value.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn into_inner(self) -> BTreeMap<FieldKind, Vec<String>> {
        self.fields
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Extractor<'r> {
    rules: &'r RuleTable,
}

impl Extractor<'static> {
    /// Extractor over the process-wide built-in rule table.
    pub fn builtin() -> Result<Self, ExtractError> {
        Ok(Self::new(crate::builtin_rules()?))
    }
}

impl<'r> Extractor<'r> {
    pub fn new(rules: &'r RuleTable) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'r RuleTable {
        self.rules
    }

    fn rules_for(&self, kinds: &BTreeSet<FieldKind>) -> Result<Vec<&'r PatternRule>, ExtractError> {
        kinds
            .iter()
            .map(|kind| {
                self.rules.get(*kind).ok_or_else(|| {
                    ExtractError::invalid_argument(format!("no pattern rule for field kind '{}'", kind))
                })
            })
            .collect()
    }

    /// Every accepted match for the requested kinds, before deduplication.
    /// Grouped by kind in `FieldKind` order, each group by increasing start.
    pub fn find_matches(
        &self,
        text: &str,
        kinds: impl IntoIterator<Item = FieldKind>,
    ) -> Result<Vec<Match>, ExtractError> {
        let kinds: BTreeSet<FieldKind> = kinds.into_iter().collect();
        let rules = self.rules_for(&kinds)?;
        Ok(rules.into_iter().flat_map(|rule| rule.scan(text)).collect())
    }

    /// Extracts the requested kinds from `text`.
    ///
    /// Every requested kind is present in the result, possibly with no values.
    /// Requesting a kind the bound rule table has no rule for is an
    /// `InvalidArgument` error; an empty request yields an empty result.
    pub fn extract(
        &self,
        text: &str,
        kinds: impl IntoIterator<Item = FieldKind>,
    ) -> Result<ExtractionResult, ExtractError> {
        let kinds: BTreeSet<FieldKind> = kinds.into_iter().collect();
        let rules = self.rules_for(&kinds)?;

        let mut result = ExtractionResult::default();
        for rule in rules {
            let mut seen = HashSet::new();
            let values = result.fields.entry(rule.kind()).or_default();
            for m in rule.scan(text) {
                if seen.insert(m.normalized.clone()) {
                    values.push(m.normalized);
                }
            }
        }

        debug!(
            kinds = kinds.len(),
            values = result.total(),
            text_len = text.len(),
            "extraction finished"
        );
        Ok(result)
    }

    /// Like [`extract`](Self::extract), with kinds given by name.
    pub fn extract_named(&self, text: &str, names: &[&str]) -> Result<ExtractionResult, ExtractError> {
        let kinds = names
            .iter()
            .map(|name| name.parse::<FieldKind>())
            .collect::<Result<Vec<_>, _>>()?;
        self.extract(text, kinds)
    }

    /// Kinds for which the whole `value` is a single accepted match.
    pub fn classify(&self, value: &str) -> Vec<FieldKind> {
        if value.is_empty() {
            return vec![];
        }
        self.rules
            .iter()
            .filter(|rule| rule.matches(value))
            .map(PatternRule::kind)
            .collect()
    }
}

/// All non-overlapping matches of an ad-hoc `pattern`, in order.
pub fn extract_custom(text: &str, pattern: &str) -> Result<Vec<String>, ExtractError> {
    let regex = Regex::new(pattern).map_err(ExtractError::InvalidPattern)?;
    Ok(regex.find_iter(text).map(|m| m.as_str().to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> Extractor<'static> {
        Extractor::builtin().unwrap()
    }

    #[test]
    fn test_every_requested_kind_is_present() {
        let result = extractor()
            .extract("nothing here", [FieldKind::Email, FieldKind::IpAddress])
            .unwrap();
        assert_eq!(result.kinds().collect::<Vec<_>>(), vec![FieldKind::Email, FieldKind::IpAddress]);
        assert!(result.is_empty());
        assert!(!result.contains_kind(FieldKind::Phone));
        assert!(result.get(FieldKind::Phone).is_empty());
    }

    #[test]
    fn test_empty_request_gives_empty_result() {
        let result = extractor().extract("a@example.com", Vec::new()).unwrap();
        assert_eq!(result.kinds().count(), 0);
    }

    #[test]
    fn test_missing_rule_is_invalid_argument() {
        let table = RuleTable::from_rules([crate::patterns::email::rule().unwrap()]);
        let err = Extractor::new(&table)
            .extract("x", [FieldKind::Email, FieldKind::Phone])
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidArgument(_)));
    }

    #[test]
    fn test_deduplicates_after_normalization() {
        let text = "a@Example.com, then a@example.COM, then b@example.com, a@example.com";
        let result = extractor().extract(text, [FieldKind::Email]).unwrap();
        assert_eq!(result.get(FieldKind::Email), ["a@example.com", "b@example.com"]);
    }

    #[test]
    fn test_find_matches_keeps_offsets_and_duplicates() {
        let text = "#a #b #a";
        let matches = extractor().find_matches(text, [FieldKind::Hashtag]).unwrap();
        let spans: Vec<(usize, usize)> = matches.iter().map(|m| (m.start, m.end)).collect();
        assert_eq!(spans, vec![(0, 2), (3, 5), (6, 8)]);
        assert_eq!(&text[matches[2].start..matches[2].end], "#a");
    }

    #[test]
    fn test_find_matches_groups_by_kind() {
        let text = "10.0.0.1 user@example.com";
        let kinds: Vec<FieldKind> = extractor()
            .find_matches(text, [FieldKind::IpAddress, FieldKind::Email])
            .unwrap()
            .into_iter()
            .map(|m| m.kind)
            .collect();
        assert_eq!(kinds, vec![FieldKind::Email, FieldKind::IpAddress]);
    }

    #[test]
    fn test_extract_named() {
        let result = extractor()
            .extract_named("go to 192.168.0.1", &["ip", "email"])
            .unwrap();
        assert_eq!(result.get(FieldKind::IpAddress), ["192.168.0.1"]);

        let err = extractor().extract_named("text", &["email", "zip"]).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidArgument(_)));
    }

    #[test]
    fn test_classify() {
        let ex = extractor();
        assert_eq!(ex.classify("user@example.com"), vec![FieldKind::Email]);
        assert_eq!(ex.classify("192.168.1.1"), vec![FieldKind::IpAddress]);
        assert_eq!(ex.classify("4111 1111 1111 1111"), vec![FieldKind::CreditCard]);
        assert!(ex.classify("~~~~").is_empty());
        assert!(ex.classify("").is_empty());
    }

    #[test]
    fn test_extract_custom() {
        let invoices = extract_custom("Invoice: INV-12345, INV-67890", r"INV-\d{5}").unwrap();
        assert_eq!(invoices, vec!["INV-12345", "INV-67890"]);

        let err = extract_custom("text", r"(unclosed").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidPattern(_)));
    }

    #[test]
    fn test_result_serializes_by_kind_name() {
        let result = extractor()
            .extract("#rust @ferris", [FieldKind::Hashtag, FieldKind::Mention])
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"hashtag": ["#rust"], "mention": ["@ferris"]}));
    }
}
