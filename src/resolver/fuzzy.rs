use label_similarity::Similarity;

/// Every candidate whose best score against any term reaches `threshold` (inclusive).
///
/// Candidates are compared lower-cased but otherwise as written; terms are expected to be
/// normalized already. There is no cap on the number of matches.
#[tracing::instrument(level = "trace", skip(scorer, terms, candidates))]
pub fn fuzzy_match<S>(
    scorer: &S,
    terms: &[String],
    candidates: &[&'static str],
    threshold: f64,
) -> Vec<&'static str>
where
    S: Similarity + ?Sized,
{
    candidates
        .iter()
        .copied()
        .filter(|candidate| {
            scorer
                .best_score(&candidate.to_lowercase(), terms)
                .is_some_and(|best| best >= threshold)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use label_similarity::SorensenDice;

    use super::*;

    fn terms(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|term| (*term).to_string()).collect()
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let scorer = |candidate: &str, _: &str| match candidate {
            "exact" => 0.65,
            "below" => 0.649_999,
            _ => 0.0,
        };
        let matched = fuzzy_match(&scorer, &terms(&["anything"]), &["exact", "below", "other"], 0.65);
        assert_eq!(matched, vec!["exact"]);
    }

    #[test]
    fn test_no_terms_no_matches() {
        let matched = fuzzy_match(&SorensenDice, &[], &["summer", "winter"], 0.0);
        assert!(matched.is_empty());
    }

    #[test]
    fn test_keeps_every_candidate_over_threshold() {
        let matched = fuzzy_match(
            &SorensenDice,
            &terms(&["sportsjacket"]),
            &["sport", "sports jackets", "jacket", "sneakers"],
            0.6,
        );
        assert_eq!(matched, vec!["sports jackets", "jacket"]);
    }

    #[test]
    fn test_multi_word_candidates_match_compacted_terms() {
        let matched = fuzzy_match(&SorensenDice, &terms(&["polkadot"]), &["polka dot", "plaid"], 0.8);
        assert_eq!(matched, vec!["polka dot"]);
    }
}
