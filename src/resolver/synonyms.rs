use std::collections::HashMap;

use crate::{
    config::SynonymRule,
    error::ConfigError,
    signal::PreparedSignals,
    vocabulary::{AttributeDimension, Vocabulary},
};

/// Keywords that force a vocabulary value in, keyed by dimension.
///
/// Vision services rarely say "summer" but often say "sunny"; a literal keyword hit adds the
/// value regardless of what fuzzy matching decided.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    rules: HashMap<AttributeDimension, Vec<(&'static str, Vec<String>)>>,
}

impl SynonymTable {
    pub fn new(rules: &[SynonymRule], vocabulary: &Vocabulary) -> Result<Self, ConfigError> {
        let mut table = Self::default();
        for rule in rules {
            let value = vocabulary
                .values_for(rule.dimension)
                .iter()
                .copied()
                .find(|value| *value == rule.value)
                .filter(|_| rule.dimension != AttributeDimension::Gender)
                .ok_or_else(|| ConfigError::UnknownValue {
                    dimension: rule.dimension,
                    value: rule.value.clone(),
                })?;
            let keywords = rule
                .keywords
                .iter()
                .map(|keyword| keyword.trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect();
            table
                .rules
                .entry(rule.dimension)
                .or_default()
                .push((value, keywords));
        }
        Ok(table)
    }

    /// appends every value of `dimension` with a keyword present in `signals`
    pub fn expand(
        &self,
        dimension: AttributeDimension,
        signals: &PreparedSignals,
        matched: &mut Vec<&'static str>,
    ) {
        let Some(rules) = self.rules.get(&dimension) else {
            return;
        };
        for (value, keywords) in rules {
            if matched.contains(value) {
                continue;
            }
            if let Some(keyword) = keywords.iter().find(|keyword| signals.has_keyword(keyword)) {
                tracing::debug!(%dimension, value, keyword = keyword.as_str(), "added by synonym");
                matched.push(*value);
            }
        }
    }
}
