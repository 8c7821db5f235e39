use std::collections::BTreeMap;

use serde::Serialize;

use super::AttributeDimension;

/// Bumped whenever a value is added, removed or renamed.
/// Persisted records were tagged against a specific revision.
pub const VOCABULARY_VERSION: u32 = 1;

const SEASON: &[&str] = &["spring", "summer", "autumn", "winter"];

const OCCASION: &[&str] = &[
    "daily", "school", "work", "party", "date", "formal", "travel", "wedding", "beach", "home",
    "sport", "special", "etc",
];

const COLOR: &[&str] = &[
    "black",
    "white",
    "red",
    "blue",
    "green",
    "yellow",
    "pink",
    "ivory",
    "beige",
    "light gray",
    "dark gray",
    "light yellow",
    "orange",
    "coral",
    "hot pink",
    "light green",
    "sky blue",
    "navy",
    "brown",
    "dark-brown",
    "gold",
    "silver",
    "purple",
    "camel",
    "colorful",
];

const MATERIAL: &[&str] = &[
    "denim",
    "linen",
    "cotton",
    "leather",
    "wool",
    "polyester",
    "nylon",
    "spandex",
    "acrylic",
    "silk",
    "rayon",
    "viscose",
    "other material",
];

const PATTERN: &[&str] = &[
    "solid",
    "striped",
    "plaid",
    "polka dot",
    "floral",
    "checkerboard",
    "argyle",
    "color-block",
    "gingham",
    "repeated",
    "geometric",
    "other pattern",
];

const STYLE: &[&str] = &[
    "casual",
    "sporty",
    "formal",
    "vintage",
    "streetwear",
    "comfortable",
    "business casual",
    "trendy",
    "modern",
    "classic",
    "minimalist",
    "bohemian",
    "luxury",
    "athleisure",
    "affordable",
    "premium",
    "kidcore",
    "basic",
    "artic",
    "dress-up",
    "hipster",
    "feminine",
    "chic",
    "punk",
    "kitsch",
    "etc",
];

const GENDER: &[&str] = &["man", "woman", "unisex"];

const CATEGORY_PARENT: &[&str] = &[
    "dresses", "tops", "pants", "skirts", "outerwear", "shoes", "bags", "headwear", "jewelry",
    "other",
];

const CATEGORY_TREE: &[(&str, &[&str])] = &[
    (
        "dresses",
        &[
            "mini dress",
            "maxi dress",
            "tshirt dresses",
            "sweater dresses",
            "jacket dresses",
            "party dresses",
            "jumpsuits",
            "etc",
        ],
    ),
    (
        "tops",
        &[
            "tshirt",
            "blouses",
            "sweater",
            "polo",
            "tee",
            "jersey",
            "tanks",
            "crop tops",
            "shirts",
            "hoodies",
            "cardigans",
            "sports tops",
            "bodysuits",
            "etc",
        ],
    ),
    ("pants", &["jeans", "shorts", "trousers", "leggings", "etc"]),
    ("skirts", &["mini skirts", "midi skirts", "maxi skirts", "etc"]),
    (
        "outerwear",
        &[
            "jacket",
            "coats",
            "varsity",
            "cardigans",
            "vests",
            "blazers",
            "biker",
            "sports jackets",
            "bomber",
            "etc",
        ],
    ),
    (
        "shoes",
        &[
            "sneakers",
            "boots",
            "heels",
            "slip-ons",
            "sports shoes",
            "sandals",
            "slides",
            "etc",
        ],
    ),
    (
        "bags",
        &[
            "tote",
            "crossbody",
            "shoulder",
            "waist",
            "canvas",
            "backpacks",
            "briefcases",
            "suitcases",
            "etc",
        ],
    ),
    (
        "headwear",
        &["cap", "hats", "beanies", "berets", "sun hats", "hijab", "etc"],
    ),
    (
        "jewelry",
        &["earrings", "necklaces", "bracelets", "rings", "brooches", "etc"],
    ),
    ("other", &[]),
];

const BUILTIN: Vocabulary = Vocabulary {
    season: SEASON,
    occasion: OCCASION,
    color: COLOR,
    material: MATERIAL,
    pattern: PATTERN,
    style: STYLE,
    gender: GENDER,
    category_parent: CATEGORY_PARENT,
    category_tree: CATEGORY_TREE,
};

/// The closed set of values a clothing item may be tagged with.
///
/// Every consumer reads the same static tables through [`Vocabulary::builtin`].
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    season: &'static [&'static str],
    occasion: &'static [&'static str],
    color: &'static [&'static str],
    material: &'static [&'static str],
    pattern: &'static [&'static str],
    style: &'static [&'static str],
    gender: &'static [&'static str],
    category_parent: &'static [&'static str],
    category_tree: &'static [(&'static str, &'static [&'static str])],
}

impl Vocabulary {
    #[must_use]
    pub const fn builtin() -> &'static Self {
        &BUILTIN
    }

    #[must_use]
    pub const fn version(&self) -> u32 {
        VOCABULARY_VERSION
    }

    /// allowed values of a dimension, in their canonical order
    #[must_use]
    pub const fn values_for(&self, dimension: AttributeDimension) -> &'static [&'static str] {
        match dimension {
            AttributeDimension::Season => self.season,
            AttributeDimension::Occasion => self.occasion,
            AttributeDimension::Color => self.color,
            AttributeDimension::Material => self.material,
            AttributeDimension::Pattern => self.pattern,
            AttributeDimension::Style => self.style,
            AttributeDimension::Gender => self.gender,
            AttributeDimension::CategoryParent => self.category_parent,
        }
    }

    #[must_use]
    pub const fn parents(&self) -> &'static [&'static str] {
        self.category_parent
    }

    /// children of a category parent; empty for parents without children and for unknown parents
    #[must_use]
    pub fn children_for(&self, parent: &str) -> &'static [&'static str] {
        self.category_tree
            .iter()
            .find(|(name, _)| *name == parent)
            .map(|(_, children)| *children)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn contains(&self, dimension: AttributeDimension, value: &str) -> bool {
        self.values_for(dimension).contains(&value)
    }

    #[must_use]
    pub fn is_child_of(&self, parent: &str, child: &str) -> bool {
        self.children_for(parent).contains(&child)
    }

    #[must_use]
    pub fn snapshot(&self) -> VocabularySnapshot {
        VocabularySnapshot {
            version: self.version(),
            season: self.season,
            occasion: self.occasion,
            color: self.color,
            material: self.material,
            pattern: self.pattern,
            style: self.style,
            gender: self.gender,
            category_parent: self.category_parent,
            category_child: self.category_tree.iter().copied().collect(),
        }
    }
}

/// Serializable view of the registry, shaped like the options table the editing screens bind to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularySnapshot {
    pub version: u32,
    pub season: &'static [&'static str],
    pub occasion: &'static [&'static str],
    pub color: &'static [&'static str],
    pub material: &'static [&'static str],
    pub pattern: &'static [&'static str],
    pub style: &'static [&'static str],
    pub gender: &'static [&'static str],
    pub category_parent: &'static [&'static str],
    pub category_child: BTreeMap<&'static str, &'static [&'static str]>,
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn test_every_parent_has_a_tree_entry() {
        let vocabulary = Vocabulary::builtin();
        let tree_parents = CATEGORY_TREE.iter().map(|(parent, _)| *parent).collect_vec();
        assert_eq!(vocabulary.parents(), tree_parents.as_slice());
    }

    #[test]
    fn test_values_are_unique_and_lowercase() {
        let vocabulary = Vocabulary::builtin();
        for dimension in AttributeDimension::ALL {
            let values = vocabulary.values_for(dimension);
            assert!(!values.is_empty(), "{dimension} has no values");
            assert_eq!(values.iter().unique().count(), values.len(), "{dimension} has duplicates");
            for value in values {
                assert_eq!(*value, value.to_lowercase());
            }
        }
    }

    #[test]
    fn test_children_lookup() {
        let vocabulary = Vocabulary::builtin();
        assert!(vocabulary.children_for("tops").contains(&"hoodies"));
        assert!(vocabulary.is_child_of("pants", "jeans"));
        assert!(!vocabulary.is_child_of("tops", "jeans"));
        assert!(vocabulary.children_for("other").is_empty());
        assert!(vocabulary.children_for("spaceship").is_empty());
    }

    #[test]
    fn test_gender_values() {
        assert_eq!(
            Vocabulary::builtin().values_for(AttributeDimension::Gender),
            &["man", "woman", "unisex"]
        );
    }

    #[test]
    fn test_snapshot_serializes_all_dimensions() -> anyhow::Result<()> {
        let json = serde_json::to_value(Vocabulary::builtin().snapshot())?;
        assert_eq!(json["version"], VOCABULARY_VERSION);
        assert_eq!(json["categoryParent"][0], "dresses");
        assert_eq!(json["categoryChild"]["pants"][0], "jeans");
        assert_eq!(json["categoryChild"]["other"].as_array().map(Vec::len), Some(0));
        Ok(())
    }
}
