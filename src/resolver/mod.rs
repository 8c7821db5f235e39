mod category;
mod color;
mod fuzzy;
mod gender;
mod synonyms;

use label_similarity::{Similarity, SorensenDice};
use rayon::prelude::*;

use crate::{
    config::{ResolverConfig, Thresholds},
    error::ConfigError,
    record::{AttributeRecord, CategorySelection},
    signal::{terms, DominantColor, PreparedSignals, RawSignal, SignalBundle},
    vocabulary::{AttributeDimension, Vocabulary},
};

pub use category::match_category;
pub use color::ColorClassifier;
pub use fuzzy::fuzzy_match;
pub use gender::GenderDetector;
pub use synonyms::SynonymTable;

/// Maps the free-form signals of one image onto the vocabulary.
///
/// Built once from a validated [`ResolverConfig`]; after that resolving cannot fail and keeps no
/// state between calls, so one resolver can be shared by any number of threads.
#[derive(Debug, Clone)]
pub struct Resolver<S = SorensenDice> {
    vocabulary: &'static Vocabulary,
    scorer: S,
    thresholds: Thresholds,
    synonyms: SynonymTable,
    gender: GenderDetector,
    colors: ColorClassifier,
    fallback_parent: &'static str,
    min_label_score: f32,
}

impl Resolver {
    pub fn new(config: &ResolverConfig) -> Result<Self, ConfigError> {
        Self::with_scorer(config, SorensenDice)
    }
}

impl<S: Similarity> Resolver<S> {
    pub fn with_scorer(config: &ResolverConfig, scorer: S) -> Result<Self, ConfigError> {
        let vocabulary = Vocabulary::builtin();
        config.validate(vocabulary)?;

        let fallback_parent = vocabulary
            .parents()
            .iter()
            .copied()
            .find(|parent| *parent == config.fallback_parent)
            .ok_or_else(|| ConfigError::UnknownFallbackParent(config.fallback_parent.clone()))?;

        Ok(Self {
            vocabulary,
            scorer,
            thresholds: config.thresholds,
            synonyms: SynonymTable::new(&config.synonyms, vocabulary)?,
            gender: GenderDetector::new(&config.gender_keywords),
            colors: ColorClassifier::new(
                &config.reference_colors,
                vocabulary,
                config.min_color_weight,
                config.brightness_band,
            )?,
            fallback_parent,
            min_label_score: config.min_label_score,
        })
    }

    #[must_use]
    pub const fn vocabulary(&self) -> &'static Vocabulary {
        self.vocabulary
    }

    #[tracing::instrument(
        skip_all,
        fields(
            labels = signals.labels.len(),
            objects = signals.objects.len(),
            colors = dominant_colors.len()
        )
    )]
    pub fn resolve(&self, signals: &RawSignal, dominant_colors: &[DominantColor]) -> AttributeRecord {
        let prepared = PreparedSignals::new(signals, self.min_label_score);
        if prepared.is_empty() {
            tracing::debug!("no usable text signals");
        }

        let mut color = self.match_dimension(AttributeDimension::Color, &prepared);
        color.extend(self.colors.classify(dominant_colors));

        let category = match_category(
            &self.scorer,
            prepared.terms(),
            self.vocabulary,
            self.thresholds.category_parent,
            self.thresholds.category_child,
            self.fallback_parent,
        );

        let record = AttributeRecord {
            season: self.simple(AttributeDimension::Season, &prepared),
            occasion: self.simple(AttributeDimension::Occasion, &prepared),
            category: CategorySelection {
                parent: category.parent.to_string(),
                child: category.children.into_iter().map(str::to_string).collect(),
            },
            color: self.in_vocabulary_order(AttributeDimension::Color, &color),
            material: self.simple(AttributeDimension::Material, &prepared),
            pattern: self.simple(AttributeDimension::Pattern, &prepared),
            style: self.simple(AttributeDimension::Style, &prepared),
            gender: self.gender.detect(&prepared),
        };
        tracing::debug!(
            category = %record.category.parent,
            gender = %record.gender,
            colors = ?record.color,
            "resolved attributes"
        );
        record
    }

    pub fn resolve_bundle(&self, bundle: &SignalBundle) -> AttributeRecord {
        self.resolve(&bundle.signals, &bundle.dominant_colors)
    }

    /// Resolves every bundle independently; the output is in input order.
    pub fn resolve_all(&self, bundles: &[SignalBundle]) -> Vec<AttributeRecord>
    where
        S: Sync,
    {
        tracing::info!(count = bundles.len(), "resolving batch");
        bundles
            .par_iter()
            .map(|bundle| self.resolve_bundle(bundle))
            .collect()
    }

    /// Brings a record from elsewhere back into the vocabulary.
    ///
    /// Values are trimmed and lower-cased, unknown ones dropped and duplicates removed. An unknown
    /// parent is replaced by the closest parent or the fallback; children not under the final
    /// parent are dropped. Conforming a conformed record changes nothing.
    pub fn conform(&self, record: &AttributeRecord) -> AttributeRecord {
        let clean = |dimension: AttributeDimension, values: &[String]| {
            let values: Vec<String> = values.iter().map(|value| value.trim().to_lowercase()).collect();
            let values: Vec<&str> = values.iter().map(String::as_str).collect();
            self.in_vocabulary_order(dimension, &values)
        };

        let parent = self.conform_parent(&record.category.parent);
        let child = self
            .vocabulary
            .children_for(parent)
            .iter()
            .filter(|child| {
                record
                    .category
                    .child
                    .iter()
                    .any(|value| value.trim().to_lowercase() == **child)
            })
            .map(|child| (*child).to_string())
            .collect();

        AttributeRecord {
            season: clean(AttributeDimension::Season, &record.season),
            occasion: clean(AttributeDimension::Occasion, &record.occasion),
            category: CategorySelection {
                parent: parent.to_string(),
                child,
            },
            color: clean(AttributeDimension::Color, &record.color),
            material: clean(AttributeDimension::Material, &record.material),
            pattern: clean(AttributeDimension::Pattern, &record.pattern),
            style: clean(AttributeDimension::Style, &record.style),
            gender: record.gender,
        }
    }

    fn conform_parent(&self, parent: &str) -> &'static str {
        let wanted = parent.trim().to_lowercase();
        if let Some(known) = self.vocabulary.parents().iter().copied().find(|known| *known == wanted) {
            return known;
        }
        let repaired = fuzzy_match(
            &self.scorer,
            &terms(&[wanted.as_str()]),
            self.vocabulary.parents(),
            self.thresholds.category_parent,
        )
        .first()
        .copied()
        .unwrap_or(self.fallback_parent);
        tracing::debug!(from = parent, to = repaired, "replaced unknown category parent");
        repaired
    }

    fn match_dimension(
        &self,
        dimension: AttributeDimension,
        prepared: &PreparedSignals,
    ) -> Vec<&'static str> {
        let Some(threshold) = self.thresholds.for_dimension(dimension) else {
            return vec![];
        };
        let mut matched = fuzzy_match(
            &self.scorer,
            prepared.terms(),
            self.vocabulary.values_for(dimension),
            threshold,
        );
        self.synonyms.expand(dimension, prepared, &mut matched);
        matched
    }

    fn simple(&self, dimension: AttributeDimension, prepared: &PreparedSignals) -> Vec<String> {
        let matched = self.match_dimension(dimension, prepared);
        self.in_vocabulary_order(dimension, &matched)
    }

    /// the vocabulary values present in `values`, once each, in vocabulary order
    fn in_vocabulary_order(&self, dimension: AttributeDimension, values: &[&str]) -> Vec<String> {
        self.vocabulary
            .values_for(dimension)
            .iter()
            .copied()
            .filter(|value| values.contains(value))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use label_similarity::TrigramJaccard;

    use super::*;
    use crate::{record::Gender, signal::Annotation};

    fn resolver() -> anyhow::Result<Resolver> {
        Ok(Resolver::new(&ResolverConfig::default())?)
    }

    fn labels(labels: &[&str]) -> RawSignal {
        RawSignal::from_labels(labels.iter().copied())
    }

    fn assert_in_vocabulary(record: &AttributeRecord, vocabulary: &Vocabulary) {
        assert!(vocabulary.parents().contains(&record.category.parent.as_str()));
        for child in &record.category.child {
            assert!(vocabulary.is_child_of(&record.category.parent, child));
        }
        for (dimension, values) in [
            (AttributeDimension::Season, &record.season),
            (AttributeDimension::Occasion, &record.occasion),
            (AttributeDimension::Color, &record.color),
            (AttributeDimension::Material, &record.material),
            (AttributeDimension::Pattern, &record.pattern),
            (AttributeDimension::Style, &record.style),
        ] {
            for value in values {
                assert!(vocabulary.contains(dimension, value), "{value} is not a {dimension} value");
            }
        }
    }

    #[test]
    fn test_empty_input_gives_defaults() -> anyhow::Result<()> {
        let record = resolver()?.resolve(&RawSignal::default(), &[]);
        assert_eq!(
            record,
            AttributeRecord {
                category: CategorySelection {
                    parent: "tops".to_string(),
                    child: vec![],
                },
                ..AttributeRecord::default()
            }
        );
        assert_eq!(record.gender, Gender::Unisex);
        Ok(())
    }

    #[test]
    fn test_output_stays_in_vocabulary() -> anyhow::Result<()> {
        let resolver = resolver()?;
        for input in [
            &["Jeans", "Denim", "Pocket", "Blue"][..],
            &["Hoodie", "Sleeve", "Cotton", "Streetwear"],
            &["Dress", "Floral", "Pink", "Summer", "Woman"],
            &["Sneakers", "Shoe", "White", "Sportswear"],
            &["Ring", "Gold", "Jewellery"],
            &["!!!", "1234"],
        ] {
            let record = resolver.resolve(&labels(input), &[DominantColor::new(200, 30, 40)]);
            assert_in_vocabulary(&record, resolver.vocabulary());
        }
        Ok(())
    }

    #[test]
    fn test_resolving_is_deterministic() -> anyhow::Result<()> {
        let resolver = resolver()?;
        let signals = labels(&["Red Shirt", "Cotton", "Casual", "Man"]);
        let colors = [DominantColor::new(0, 0, 128), DominantColor::new(250, 250, 250)];
        assert_eq!(resolver.resolve(&signals, &colors), resolver.resolve(&signals, &colors));
        Ok(())
    }

    #[test]
    fn test_synonyms_force_values() -> anyhow::Result<()> {
        let record = resolver()?.resolve(&labels(&["hot", "sunny"]), &[]);
        assert!(record.season.contains(&"summer".to_string()));

        let record = resolver()?.resolve(&labels(&["Night out", "Gym"]), &[]);
        assert!(record.occasion.contains(&"party".to_string()));
        assert!(record.occasion.contains(&"sport".to_string()));
        Ok(())
    }

    #[test]
    fn test_female_keyword_wins() -> anyhow::Result<()> {
        let record = resolver()?.resolve(&labels(&["man", "woman"]), &[]);
        assert_eq!(record.gender, Gender::Woman);
        let record = resolver()?.resolve(&labels(&["man"]), &[]);
        assert_eq!(record.gender, Gender::Man);
        Ok(())
    }

    #[test]
    fn test_text_and_dominant_colors_are_merged() -> anyhow::Result<()> {
        let record = resolver()?.resolve(
            &labels(&["red shirt"]),
            &[DominantColor::new(0, 0, 128), DominantColor::new(0, 0, 130)],
        );
        assert!(record.color.contains(&"red".to_string()));
        assert!(record.color.contains(&"navy".to_string()));
        assert_eq!(record.color.iter().filter(|color| *color == "navy").count(), 1);
        Ok(())
    }

    #[test]
    fn test_low_confidence_annotations_are_ignored() -> anyhow::Result<()> {
        let resolver = resolver()?;
        let record = resolver.resolve(&RawSignal::from_labels([Annotation::scored("Winter", 0.5)]), &[]);
        assert!(record.season.is_empty());
        let record = resolver.resolve(&RawSignal::from_labels([Annotation::scored("Winter", 0.95)]), &[]);
        assert_eq!(record.season, vec!["winter".to_string()]);
        Ok(())
    }

    #[test]
    fn test_only_labels_are_confidence_filtered() -> anyhow::Result<()> {
        let signals = RawSignal {
            labels: vec![Annotation::scored("Winter", 0.7)],
            objects: vec![Annotation::scored("Pants", 0.6), Annotation::scored("Jeans", 0.6)],
            text: vec![],
            logos: vec![Annotation::scored("Leather", 0.5)],
        };
        let record = resolver()?.resolve(&signals, &[]);
        assert!(record.season.is_empty());
        assert_eq!(record.category.parent, "pants");
        assert_eq!(record.category.child, vec!["jeans".to_string()]);
        assert_eq!(record.material, vec!["leather".to_string()]);
        Ok(())
    }

    #[test]
    fn test_logo_containing_a_gender_word_stays_unisex() -> anyhow::Result<()> {
        let signals = RawSignal {
            labels: vec!["T-shirt".into()],
            logos: vec!["Iron Man".into()],
            ..RawSignal::default()
        };
        assert_eq!(resolver()?.resolve(&signals, &[]).gender, Gender::Unisex);
        Ok(())
    }

    #[test]
    fn test_white_backdrop_is_not_the_item_color() -> anyhow::Result<()> {
        let colors = [DominantColor::new(252, 252, 250), DominantColor::new(200, 20, 30)];
        let record = resolver()?.resolve(&labels(&["Skirt"]), &colors);
        assert_eq!(record.color, vec!["red".to_string()]);

        let mut config = ResolverConfig::default();
        config.brightness_band = None;
        let record = Resolver::new(&config)?.resolve(&labels(&["Skirt"]), &colors);
        assert_eq!(record.color, vec!["white".to_string(), "red".to_string()]);
        Ok(())
    }

    #[test]
    fn test_threshold_boundary() -> anyhow::Result<()> {
        let scorer = |candidate: &str, _: &str| if candidate == "summer" { 0.65 } else { 0.0 };

        let resolver = Resolver::with_scorer(&ResolverConfig::default(), scorer)?;
        let record = resolver.resolve(&labels(&["anything"]), &[]);
        assert_eq!(record.season, vec!["summer".to_string()]);

        let mut config = ResolverConfig::default();
        config.thresholds.season = 0.650_001;
        let resolver = Resolver::with_scorer(&config, scorer)?;
        assert!(resolver.resolve(&labels(&["anything"]), &[]).season.is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = ResolverConfig::default();
        config.thresholds.color = -0.1;
        assert!(matches!(
            Resolver::new(&config),
            Err(ConfigError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn test_alternative_scorer() -> anyhow::Result<()> {
        let resolver = Resolver::with_scorer(&ResolverConfig::default(), TrigramJaccard)?;
        let record = resolver.resolve(&labels(&["Leather", "Boots", "Jeans"]), &[]);
        assert_in_vocabulary(&record, resolver.vocabulary());
        assert_eq!(record.material, vec!["leather".to_string()]);
        Ok(())
    }

    #[test]
    fn test_resolve_all_keeps_order() -> anyhow::Result<()> {
        let resolver = resolver()?;
        let bundles = vec![
            SignalBundle::new(labels(&["Jeans", "Pants"]), vec![]),
            SignalBundle::new(labels(&["Hoodie"]), vec![DominantColor::new(0, 0, 0)]),
            SignalBundle::default(),
            SignalBundle::new(labels(&["Boots", "Leather"]), vec![]),
        ];
        let records = resolver.resolve_all(&bundles);
        assert_eq!(records.len(), bundles.len());
        for (bundle, record) in bundles.iter().zip(&records) {
            assert_eq!(&resolver.resolve_bundle(bundle), record);
        }
        assert_eq!(records[0].category.parent, "pants");
        Ok(())
    }

    #[test]
    fn test_conform() -> anyhow::Result<()> {
        let resolver = resolver()?;
        let record = AttributeRecord {
            season: vec![" Summer ".to_string(), "monsoon".to_string(), "summer".to_string()],
            color: vec!["teal".to_string(), "NAVY".to_string(), "black".to_string()],
            category: CategorySelection {
                parent: "orther".to_string(),
                child: vec!["jeans".to_string()],
            },
            gender: Gender::Woman,
            ..AttributeRecord::default()
        };
        let conformed = resolver.conform(&record);
        assert_eq!(conformed.season, vec!["summer".to_string()]);
        assert_eq!(conformed.color, vec!["black".to_string(), "navy".to_string()]);
        assert_eq!(conformed.category.parent, "other");
        assert!(conformed.category.child.is_empty());
        assert_eq!(conformed.gender, Gender::Woman);
        assert_eq!(resolver.conform(&conformed), conformed);
        Ok(())
    }

    #[test]
    fn test_conform_parent_and_children() -> anyhow::Result<()> {
        let resolver = resolver()?;
        let record = AttributeRecord {
            category: CategorySelection {
                parent: "Pants ".to_string(),
                child: vec!["Jeans".to_string(), "hoodies".to_string()],
            },
            ..AttributeRecord::default()
        };
        let conformed = resolver.conform(&record);
        assert_eq!(conformed.category.parent, "pants");
        assert_eq!(conformed.category.child, vec!["jeans".to_string()]);

        let conformed = resolver.conform(&AttributeRecord::default());
        assert_eq!(conformed.category.parent, "tops");
        Ok(())
    }
}
