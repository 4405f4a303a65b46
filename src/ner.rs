//! Named entity recognition as a capability.
//!
//! Recognition itself is delegated to an external model behind
//! [`EntityRecognizer`]; this module only defines the entity shape and the
//! grouping helpers over its output. The field extractor does not use it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
    Organization,
    Location,
    Date,
    Money,
    Other(String),
}

impl EntityLabel {
    /// Maps the tags common NER models emit (`PERSON`, `ORG`, `GPE`, ...).
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "PERSON" | "PER" => Self::Person,
            "ORG" | "ORGANIZATION" => Self::Organization,
            "GPE" | "LOC" | "LOCATION" => Self::Location,
            "DATE" => Self::Date,
            "MONEY" => Self::Money,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Self::Person => "PERSON",
            Self::Organization => "ORG",
            Self::Location => "GPE",
            Self::Date => "DATE",
            Self::Money => "MONEY",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// An entity span reported by a recognizer. Offsets are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Error)]
pub enum RecognizerError {
    #[error("model unavailable: {0}")]
    Unavailable(String),

    #[error("recognition failed: {0}")]
    Failed(String),
}

pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, RecognizerError>;
}

/// Texts of the entities carrying `label`, in input order.
pub fn by_label<'a>(entities: &'a [Entity], label: &EntityLabel) -> Vec<&'a str> {
    entities
        .iter()
        .filter(|e| &e.label == label)
        .map(|e| e.text.as_str())
        .collect()
}

/// Entity count per tag.
pub fn label_counts(entities: &[Entity]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for entity in entities {
        *counts.entry(entity.label.as_tag().to_string()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tags every occurrence of a fixed list of names.
    struct Gazetteer(Vec<(&'static str, &'static str)>);

    impl EntityRecognizer for Gazetteer {
        fn recognize(&self, text: &str) -> Result<Vec<Entity>, RecognizerError> {
            let mut entities = Vec::new();
            for &(name, tag) in &self.0 {
                for (start, matched) in text.match_indices(name) {
                    entities.push(Entity {
                        text: matched.to_string(),
                        label: EntityLabel::from_tag(tag),
                        start,
                        end: start + matched.len(),
                    });
                }
            }
            entities.sort_by_key(|e| e.start);
            Ok(entities)
        }
    }

    struct Offline;

    impl EntityRecognizer for Offline {
        fn recognize(&self, _text: &str) -> Result<Vec<Entity>, RecognizerError> {
            Err(RecognizerError::Unavailable("en_core_web_sm".to_string()))
        }
    }

    fn sample() -> Vec<Entity> {
        let recognizer = Gazetteer(vec![
            ("Apple", "ORG"),
            ("Cupertino", "GPE"),
            ("Tim Cook", "PERSON"),
            ("Google", "ORG"),
        ]);
        recognizer
            .recognize("Tim Cook runs Apple in Cupertino; Google is nearby. Apple again.")
            .unwrap()
    }

    #[test]
    fn test_label_from_tag() {
        assert_eq!(EntityLabel::from_tag("person"), EntityLabel::Person);
        assert_eq!(EntityLabel::from_tag("LOC"), EntityLabel::Location);
        assert_eq!(EntityLabel::from_tag("norp"), EntityLabel::Other("NORP".to_string()));
        assert_eq!(EntityLabel::Other("NORP".to_string()).to_string(), "NORP");
    }

    #[test]
    fn test_by_label() {
        let entities = sample();
        assert_eq!(
            by_label(&entities, &EntityLabel::Organization),
            vec!["Apple", "Google", "Apple"]
        );
        assert_eq!(by_label(&entities, &EntityLabel::Person), vec!["Tim Cook"]);
        assert!(by_label(&entities, &EntityLabel::Money).is_empty());
    }

    #[test]
    fn test_label_counts() {
        let counts = label_counts(&sample());
        assert_eq!(counts.get("ORG"), Some(&3));
        assert_eq!(counts.get("GPE"), Some(&1));
        assert_eq!(counts.get("PERSON"), Some(&1));
    }

    #[test]
    fn test_recognizer_errors_surface() {
        let recognizer: Box<dyn EntityRecognizer> = Box::new(Offline);
        let err = recognizer.recognize("text").unwrap_err();
        assert_eq!(err.to_string(), "model unavailable: en_core_web_sm");
    }
}
