use std::collections::HashSet;

use itertools::Itertools;

use super::RawSignal;

/// Canonical comparable form of a label: lower-case, letters only, one trailing "s" removed.
///
/// The plural stripping is naive on purpose. "dresses" and "dress" both end up close to
/// "dresses", but so do unrelated pairs such as "bus" and "bu"; and a singular ending in
/// "s" loses its last letter ("dress" becomes "dres").
#[must_use]
pub fn normalize(token: &str) -> String {
    let mut word: String = token
        .chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_lowercase)
        .collect();
    if word.ends_with('s') {
        word.pop();
    }
    word
}

/// Concatenates labels, objects, OCR text and logos, in that order.
///
/// Only generic labels are filtered by confidence: a scored label must be strictly above
/// `min_label_score`. Objects, text and logos are always kept.
#[must_use]
pub fn flatten(signals: &RawSignal, min_label_score: f32) -> Vec<&str> {
    let [labels, objects, text, logos] = signals.channels();
    labels
        .iter()
        .filter(|label| label.is_confident(min_label_score))
        .chain(objects.iter().chain(text).chain(logos))
        .map(|annotation| annotation.text.as_str())
        .collect_vec()
}

/// Whole signals, lower-cased with whitespace collapsed, for exact membership tests.
#[must_use]
pub fn phrases(signals: &[&str]) -> HashSet<String> {
    signals
        .iter()
        .map(|signal| signal.split_whitespace().map(str::to_lowercase).join(" "))
        .filter(|phrase| !phrase.is_empty())
        .collect()
}

/// Normalized terms used for fuzzy matching.
///
/// Each signal contributes its whole normalized phrase and, when it has several words,
/// every normalized word, so "red shirt" yields "redshirt", "red" and "shirt".
#[must_use]
pub fn terms(signals: &[&str]) -> Vec<String> {
    signals
        .iter()
        .flat_map(|signal| {
            let words = signal.split_whitespace().collect_vec();
            let parts = if words.len() > 1 { words } else { vec![] };
            std::iter::once(normalize(signal)).chain(parts.into_iter().map(normalize))
        })
        .filter(|term| !term.is_empty())
        .unique()
        .collect_vec()
}

/// Lower-cased phrases and their words, for keyword tests that may hit part of a signal.
#[must_use]
pub fn keywords(signals: &[&str]) -> HashSet<String> {
    let mut keywords = HashSet::new();
    for signal in signals {
        let words = signal
            .split_whitespace()
            .map(|word| {
                word.trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase()
            })
            .filter(|word| !word.is_empty())
            .collect_vec();
        if words.is_empty() {
            continue;
        }
        keywords.insert(
            signal
                .split_whitespace()
                .map(str::to_lowercase)
                .join(" "),
        );
        keywords.extend(words);
    }
    keywords
}

/// The combined signal of one image, prepared once and shared by every dimension.
#[derive(Debug, Clone, Default)]
pub struct PreparedSignals {
    terms: Vec<String>,
    keywords: HashSet<String>,
    phrases: HashSet<String>,
}

impl PreparedSignals {
    #[must_use]
    pub fn new(signals: &RawSignal, min_label_score: f32) -> Self {
        let flat = flatten(signals, min_label_score);
        Self {
            terms: terms(&flat),
            keywords: keywords(&flat),
            phrases: phrases(&flat),
        }
    }

    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[must_use]
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }

    /// true only if a whole signal equals `phrase`
    #[must_use]
    pub fn has_phrase(&self, phrase: &str) -> bool {
        self.phrases.contains(phrase)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.keywords.is_empty()
    }
}
