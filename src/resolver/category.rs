use label_similarity::Similarity;

use crate::vocabulary::Vocabulary;

use super::fuzzy::fuzzy_match;

/// Parent and children of one image, still borrowed from the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMatch {
    pub parent: &'static str,
    pub children: Vec<&'static str>,
}

/// Picks the first parent (in vocabulary order) that matches, or `fallback`, then matches only
/// that parent's children.
pub fn match_category<S>(
    scorer: &S,
    terms: &[String],
    vocabulary: &Vocabulary,
    parent_threshold: f64,
    child_threshold: f64,
    fallback: &'static str,
) -> CategoryMatch
where
    S: Similarity + ?Sized,
{
    let parent = fuzzy_match(scorer, terms, vocabulary.parents(), parent_threshold)
        .first()
        .copied()
        .unwrap_or(fallback);
    let children = fuzzy_match(scorer, terms, vocabulary.children_for(parent), child_threshold);
    CategoryMatch { parent, children }
}
