use std::{collections::HashSet, path::Path};

use itertools::Itertools;
use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    vocabulary::{AttributeDimension, Vocabulary},
};

/// Tunables of the resolver. Every field has a default, so a config file only needs the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub thresholds: Thresholds,
    /// literal keywords that force a vocabulary value in even when fuzzy matching misses it
    pub synonyms: Vec<SynonymRule>,
    pub gender_keywords: GenderKeywords,
    /// category parent used when no parent matches
    pub fallback_parent: String,
    /// named colors dominant RGB values are snapped to
    pub reference_colors: Vec<ReferenceColor>,
    /// scored generic labels at or below this are ignored; other channels are never filtered
    pub min_label_score: f32,
    /// weighted dominant colors below this are ignored
    pub min_color_weight: f32,
    /// dominant colors outside this band are used only when no other color is left
    pub brightness_band: Option<BrightnessBand>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub season: f64,
    pub occasion: f64,
    pub color: f64,
    pub material: f64,
    pub pattern: f64,
    pub style: f64,
    pub category_parent: f64,
    pub category_child: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymRule {
    pub dimension: AttributeDimension,
    pub value: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenderKeywords {
    pub male: Vec<String>,
    pub female: Vec<String>,
}

/// Exclusive range of mean channel brightness (0..=255) that excludes near-black and
/// near-white backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrightnessBand {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceColor {
    pub name: String,
    pub rgb: [u8; 3],
}

impl Thresholds {
    /// gender is matched exactly and has no threshold
    #[must_use]
    pub const fn for_dimension(&self, dimension: AttributeDimension) -> Option<f64> {
        match dimension {
            AttributeDimension::Season => Some(self.season),
            AttributeDimension::Occasion => Some(self.occasion),
            AttributeDimension::Color => Some(self.color),
            AttributeDimension::Material => Some(self.material),
            AttributeDimension::Pattern => Some(self.pattern),
            AttributeDimension::Style => Some(self.style),
            AttributeDimension::CategoryParent => Some(self.category_parent),
            AttributeDimension::Gender => None,
        }
    }

    const fn named(&self) -> [(&'static str, f64); 8] {
        [
            ("season", self.season),
            ("occasion", self.occasion),
            ("color", self.color),
            ("material", self.material),
            ("pattern", self.pattern),
            ("style", self.style),
            ("category_parent", self.category_parent),
            ("category_child", self.category_child),
        ]
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            season: 0.65,
            occasion: 0.65,
            color: 0.8,
            material: 0.8,
            pattern: 0.7,
            style: 0.65,
            category_parent: 0.65,
            category_child: 0.65,
        }
    }
}

impl SynonymRule {
    #[must_use]
    pub fn new(dimension: AttributeDimension, value: &str, keywords: &[&str]) -> Self {
        Self {
            dimension,
            value: value.to_string(),
            keywords: keywords.iter().map(|keyword| (*keyword).to_string()).collect(),
        }
    }
}

impl Default for GenderKeywords {
    fn default() -> Self {
        let words = |words: &[&str]| words.iter().map(|word| (*word).to_string()).collect_vec();
        Self {
            male: words(&["man", "male", "masculine"]),
            female: words(&["woman", "female", "feminine", "girl"]),
        }
    }
}

impl BrightnessBand {
    #[must_use]
    pub fn admits(&self, color: Srgb<u8>) -> bool {
        let brightness =
            (f64::from(color.red) + f64::from(color.green) + f64::from(color.blue)) / 3.0;
        brightness > self.min && brightness < self.max
    }
}

impl Default for BrightnessBand {
    fn default() -> Self {
        Self {
            min: 40.0,
            max: 220.0,
        }
    }
}

impl ReferenceColor {
    #[must_use]
    pub fn new(name: &str, rgb: [u8; 3]) -> Self {
        Self {
            name: name.to_string(),
            rgb,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            synonyms: vec![
                SynonymRule::new(AttributeDimension::Season, "summer", &["hot", "sunny", "sleeveless"]),
                SynonymRule::new(AttributeDimension::Season, "winter", &["cold", "snow", "coat", "sweater"]),
                SynonymRule::new(AttributeDimension::Season, "spring", &["bloom", "flower", "fresh"]),
                SynonymRule::new(AttributeDimension::Occasion, "party", &["night out", "clubbing", "evening"]),
                SynonymRule::new(AttributeDimension::Occasion, "sport", &["athletic", "training", "gym"]),
                SynonymRule::new(AttributeDimension::Style, "casual", &["everyday", "basic", "normal"]),
            ],
            gender_keywords: GenderKeywords::default(),
            fallback_parent: "tops".to_string(),
            reference_colors: vec![
                ReferenceColor::new("black", [0, 0, 0]),
                ReferenceColor::new("white", [255, 255, 255]),
                ReferenceColor::new("red", [255, 0, 0]),
                ReferenceColor::new("green", [0, 128, 0]),
                ReferenceColor::new("blue", [0, 0, 255]),
                ReferenceColor::new("yellow", [255, 255, 0]),
                ReferenceColor::new("pink", [255, 192, 203]),
                ReferenceColor::new("purple", [128, 0, 128]),
                ReferenceColor::new("orange", [255, 165, 0]),
                ReferenceColor::new("brown", [139, 69, 19]),
                ReferenceColor::new("navy", [0, 0, 128]),
                ReferenceColor::new("light gray", [192, 192, 192]),
                ReferenceColor::new("dark gray", [96, 96, 96]),
                ReferenceColor::new("beige", [245, 245, 220]),
                ReferenceColor::new("sky blue", [135, 206, 235]),
                ReferenceColor::new("gold", [255, 215, 0]),
            ],
            min_label_score: 0.7,
            min_color_weight: 0.0,
            brightness_band: Some(BrightnessBand::default()),
        }
    }
}

impl ResolverConfig {
    /// Reads `path` (or `./wardrobe.json` if present) and `WARDROBE__*` environment overrides on
    /// top of the defaults, e.g. `WARDROBE__THRESHOLDS__MATERIAL=0.75`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => ::config::File::from(path).required(true),
            None => ::config::File::with_name("./wardrobe").required(false),
        };
        let settings = ::config::Config::builder()
            .add_source(file)
            .add_source(
                ::config::Environment::with_prefix("WARDROBE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let config: Self = settings.try_deserialize()?;
        config.validate(Vocabulary::builtin())?;
        Ok(config)
    }

    /// Checks that every value the configuration can inject exists in the vocabulary.
    pub fn validate(&self, vocabulary: &Vocabulary) -> Result<(), ConfigError> {
        for (name, value) in self.thresholds.named() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidThreshold {
                    name: name.to_string(),
                    value,
                });
            }
        }

        for rule in &self.synonyms {
            if rule.dimension == AttributeDimension::Gender
                || !vocabulary.contains(rule.dimension, &rule.value)
            {
                return Err(ConfigError::UnknownValue {
                    dimension: rule.dimension,
                    value: rule.value.clone(),
                });
            }
        }

        if let Some(band) = self.brightness_band {
            if !(0.0..=255.0).contains(&band.min)
                || !(0.0..=255.0).contains(&band.max)
                || band.min >= band.max
            {
                return Err(ConfigError::InvalidBrightnessBand {
                    min: band.min,
                    max: band.max,
                });
            }
        }

        if !vocabulary.contains(AttributeDimension::CategoryParent, &self.fallback_parent) {
            return Err(ConfigError::UnknownFallbackParent(self.fallback_parent.clone()));
        }

        for color in &self.reference_colors {
            if !vocabulary.contains(AttributeDimension::Color, &color.name) {
                return Err(ConfigError::UnknownValue {
                    dimension: AttributeDimension::Color,
                    value: color.name.clone(),
                });
            }
        }

        let male: HashSet<_> = self.gender_keywords.male.iter().map(|k| k.to_lowercase()).collect();
        let overlap = self
            .gender_keywords
            .female
            .iter()
            .map(|k| k.to_lowercase())
            .filter(|k| male.contains(k))
            .sorted()
            .collect_vec();
        if !overlap.is_empty() {
            return Err(ConfigError::OverlappingGenderKeywords(overlap));
        }

        Ok(())
    }
}
