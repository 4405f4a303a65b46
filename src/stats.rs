//! Word frequency and descriptive text statistics.
//!
//! Words and sentences follow the Unicode segmentation rules (UAX #29):
//! a word contains at least one alphanumeric character, so punctuation
//! tokens are counted as tokens but not as words.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStatistics {
    pub total_characters: usize,
    pub total_tokens: usize,
    pub total_words: usize,
    pub unique_words: usize,
    pub total_sentences: usize,
    pub avg_word_length: f64,
    pub avg_sentence_length: f64,
    pub lexical_diversity: f64,
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Words and punctuation, without whitespace.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_word_bounds().filter(|t| !t.trim().is_empty())
}

pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.unicode_words()
}

/// Sentences, trimmed; blank segments are skipped.
pub fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.unicode_sentences().map(str::trim).filter(|s| !s.is_empty())
}

/// Lowercased word counts, most frequent first. Ties keep the order in
/// which the words first appear.
pub fn word_frequency(text: &str) -> Vec<(String, usize)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for word in words(text) {
        let word = word.to_lowercase();
        match index.get(&word) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(word.clone(), counts.len());
                counts.push((word, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn statistics(text: &str) -> TextStatistics {
    let words: Vec<&str> = words(text).collect();
    let unique: HashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
    let total_sentences = sentences(text).count();
    let word_chars: usize = words.iter().map(|w| w.chars().count()).sum();

    TextStatistics {
        total_characters: text.chars().count(),
        total_tokens: tokens(text).count(),
        total_words: words.len(),
        unique_words: unique.len(),
        total_sentences,
        avg_word_length: round_to(ratio(word_chars, words.len()), 2),
        avg_sentence_length: round_to(ratio(words.len(), total_sentences), 2),
        lexical_diversity: round_to(ratio(unique.len(), words.len()), 3),
    }
}
