use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeDimension {
    Season,
    Occasion,
    Color,
    Material,
    Pattern,
    Style,
    Gender,
    CategoryParent,
}

impl AttributeDimension {
    pub const ALL: [Self; 8] = [
        Self::Season,
        Self::Occasion,
        Self::Color,
        Self::Material,
        Self::Pattern,
        Self::Style,
        Self::Gender,
        Self::CategoryParent,
    ];

    #[must_use]
    pub const fn to_key(self) -> &'static str {
        match self {
            Self::Season => "season",
            Self::Occasion => "occasion",
            Self::Color => "color",
            Self::Material => "material",
            Self::Pattern => "pattern",
            Self::Style => "style",
            Self::Gender => "gender",
            Self::CategoryParent => "categoryParent",
        }
    }
}

impl fmt::Display for AttributeDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_key())
    }
}

impl FromStr for AttributeDimension {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['_', '-'], "").to_lowercase();
        Self::ALL
            .into_iter()
            .find(|dimension| dimension.to_key().to_lowercase() == wanted)
            .ok_or_else(|| ConfigError::UnknownDimension(s.to_string()))
    }
}
