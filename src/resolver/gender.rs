use crate::{config::GenderKeywords, record::Gender, signal::PreparedSignals};

#[derive(Debug, Clone)]
pub struct GenderDetector {
    male: Vec<String>,
    female: Vec<String>,
}

impl GenderDetector {
    #[must_use]
    pub fn new(keywords: &GenderKeywords) -> Self {
        let lower = |words: &[String]| -> Vec<String> {
            words
                .iter()
                .map(|word| word.trim().to_lowercase())
                .filter(|word| !word.is_empty())
                .collect()
        };
        Self {
            male: lower(&keywords.male),
            female: lower(&keywords.female),
        }
    }

    /// Exact match of whole signals against the keyword sets.
    ///
    /// A female hit overrides a male hit when both sets are present.
    #[must_use]
    pub fn detect(&self, signals: &PreparedSignals) -> Gender {
        let present = |words: &[String]| words.iter().any(|word| signals.has_phrase(word));
        if present(&self.female) {
            Gender::Woman
        } else if present(&self.male) {
            Gender::Man
        } else {
            Gender::Unisex
        }
    }
}
