use itertools::Itertools;

use crate::vocabulary::{AttributeDimension, Vocabulary};

use super::AttributeRecord;

const ENCODED_DIMENSIONS: [AttributeDimension; 8] = [
    AttributeDimension::Season,
    AttributeDimension::Occasion,
    AttributeDimension::Color,
    AttributeDimension::Material,
    AttributeDimension::Pattern,
    AttributeDimension::Style,
    AttributeDimension::Gender,
    AttributeDimension::CategoryParent,
];

/// One-hot encoding of a record as consumed by the outfit suggestion service.
///
/// Blocks follow `ENCODED_DIMENSIONS`, each as long as its vocabulary. Values outside the
/// vocabulary are ignored. Category children are not encoded.
#[must_use]
pub fn feature_vector(record: &AttributeRecord, vocabulary: &Vocabulary) -> Vec<f32> {
    let gender = [record.gender.as_str().to_string()];
    let parent = [record.category.parent.clone()];
    ENCODED_DIMENSIONS
        .into_iter()
        .flat_map(|dimension| {
            let selected: &[String] = match dimension {
                AttributeDimension::Season => record.season.as_slice(),
                AttributeDimension::Occasion => record.occasion.as_slice(),
                AttributeDimension::Color => record.color.as_slice(),
                AttributeDimension::Material => record.material.as_slice(),
                AttributeDimension::Pattern => record.pattern.as_slice(),
                AttributeDimension::Style => record.style.as_slice(),
                AttributeDimension::Gender => gender.as_slice(),
                AttributeDimension::CategoryParent => parent.as_slice(),
            };
            vocabulary
                .values_for(dimension)
                .iter()
                .map(|value| {
                    if selected.iter().any(|s| s == value) {
                        1.0
                    } else {
                        0.0
                    }
                })
                .collect_vec()
        })
        .collect()
}
