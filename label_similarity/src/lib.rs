/*

String similarity scorers used to match free-text vision labels against a closed vocabulary.

Scores are in [0, 1]: identical strings score 1.0, strings without shared n-grams score 0.0.
Whitespace is ignored by every scorer, so "light gray" and "lightgray" are the same string.

*/

use std::collections::HashSet;

use itertools::Itertools;

/// Pairwise similarity between two strings.
///
/// Implementations must be deterministic and symmetric.
pub trait Similarity {
    fn score(&self, a: &str, b: &str) -> f64;

    /// highest score of `candidate` against any of `terms`; none if `terms` is empty
    fn best_score(&self, candidate: &str, terms: &[String]) -> Option<f64> {
        terms
            .iter()
            .map(|term| self.score(candidate, term))
            .filter(|score| !score.is_nan())
            .max_by(f64::total_cmp)
    }
}

impl<F> Similarity for F
where
    F: Fn(&str, &str) -> f64,
{
    fn score(&self, a: &str, b: &str) -> f64 {
        self(a, b)
    }
}

/// Sørensen–Dice coefficient over character bigrams
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SorensenDice;

impl Similarity for SorensenDice {
    fn score(&self, a: &str, b: &str) -> f64 {
        strsim::sorensen_dice(a, b)
    }
}

/// Jaccard index over padded character trigrams
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrigramJaccard;

impl Similarity for TrigramJaccard {
    fn score(&self, a: &str, b: &str) -> f64 {
        jaccard_similarity(&get_trigrams(a), &get_trigrams(b))
    }
}

fn jaccard_similarity(s1: &HashSet<String>, s2: &HashSet<String>) -> f64 {
    let i = s1.intersection(s2).count() as f64;
    let u = s1.union(s2).count() as f64;
    if u == 0.0 {
        1.0
    } else {
        i / u
    }
}

fn get_trigrams(s: &str) -> HashSet<String> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return HashSet::new();
    }
    format!("__{compact}__")
        .chars()
        .tuple_windows()
        .map(|(c0, c1, c2)| format!("{c0}{c1}{c2}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_dice_identity_and_disjoint() {
        assert_close(SorensenDice.score("summer", "summer"), 1.0);
        assert_close(SorensenDice.score("wool", "silk"), 0.0);
        assert_close(SorensenDice.score("night", "nacht"), 0.25);
    }

    #[test]
    fn test_dice_ignores_whitespace() {
        assert_close(SorensenDice.score("light gray", "lightgray"), 1.0);
    }

    #[test]
    fn test_scorers_are_symmetric() {
        let pairs = [
            ("dresses", "dresse"),
            ("polka dot", "polkadot"),
            ("shirts", "shirt"),
            ("denim", "jean"),
        ];
        for (a, b) in pairs {
            assert_close(SorensenDice.score(a, b), SorensenDice.score(b, a));
            assert_close(TrigramJaccard.score(a, b), TrigramJaccard.score(b, a));
        }
    }

    #[test]
    fn test_trigram_jaccard() {
        assert_close(TrigramJaccard.score("cotton", "cotton"), 1.0);
        assert_close(TrigramJaccard.score("abc", "xyz"), 0.0);
        let partial = TrigramJaccard.score("sweater", "sweaters");
        assert!(partial > 0.5 && partial < 1.0);
    }

    #[test]
    fn test_best_score() {
        let terms = vec!["redshirt".to_string(), "red".to_string(), "shirt".to_string()];
        assert_eq!(SorensenDice.best_score("red", &terms), Some(1.0));
        assert_eq!(SorensenDice.best_score("red", &[]), None);
    }

    #[test]
    fn test_closure_scorer() {
        let fixed = |_: &str, _: &str| 0.42;
        assert_close(fixed.score("a", "b"), 0.42);
        assert_eq!(fixed.best_score("a", &["b".to_string()]), Some(0.42));
    }
}
