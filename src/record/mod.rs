mod encode;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use encode::feature_vector;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Gender {
    Man,
    Woman,
    #[default]
    Unisex,
}

impl Gender {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Man => "man",
            Self::Woman => "woman",
            Self::Unisex => "unisex",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored records sometimes carry the raw vision keyword or nothing at all; anything
/// unrecognized reads back as unisex.
impl From<String> for Gender {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "man" | "male" | "masculine" => Self::Man,
            "woman" | "female" | "feminine" | "girl" => Self::Woman,
            _ => Self::Unisex,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorySelection {
    pub parent: String,
    pub child: Vec<String>,
}

/// Attributes of one clothing item, shaped like the stored item document.
///
/// A freshly resolved record always has a category parent from the vocabulary and only
/// vocabulary values in its sets. Records decoded from elsewhere may not; run them through
/// `Resolver::conform` first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeRecord {
    pub season: Vec<String>,
    pub occasion: Vec<String>,
    pub category: CategorySelection,
    pub color: Vec<String>,
    pub material: Vec<String>,
    pub pattern: Vec<String>,
    pub style: Vec<String>,
    pub gender: Gender,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_shape() -> anyhow::Result<()> {
        let record = AttributeRecord {
            season: vec!["summer".to_string()],
            category: CategorySelection {
                parent: "tops".to_string(),
                child: vec!["shirts".to_string()],
            },
            gender: Gender::Woman,
            ..AttributeRecord::default()
        };
        let json = serde_json::to_value(&record)?;
        assert_eq!(
            json,
            serde_json::json!({
                "season": ["summer"],
                "occasion": [],
                "category": {"parent": "tops", "child": ["shirts"]},
                "color": [],
                "material": [],
                "pattern": [],
                "style": [],
                "gender": "woman"
            })
        );
        Ok(())
    }

    #[test]
    fn test_gender_decoding_is_lenient() -> anyhow::Result<()> {
        let record: AttributeRecord = serde_json::from_str(r#"{"gender": "Female"}"#)?;
        assert_eq!(record.gender, Gender::Woman);
        let record: AttributeRecord = serde_json::from_str(r#"{"gender": ""}"#)?;
        assert_eq!(record.gender, Gender::Unisex);
        let record: AttributeRecord = serde_json::from_str("{}")?;
        assert_eq!(record.gender, Gender::Unisex);
        Ok(())
    }
}
