use palette::Srgb;
use serde::{Deserialize, Deserializer, Serialize};

/// One piece of text reported by a vision service, with the service's confidence if it gave one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AnnotationRepr")]
pub struct Annotation {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl Annotation {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            score: None,
        }
    }

    #[must_use]
    pub fn scored(text: impl Into<String>, score: f32) -> Self {
        Self {
            text: text.into(),
            score: Some(score),
        }
    }

    /// unscored annotations always pass; scored ones must be strictly above `min_score`
    #[must_use]
    pub fn is_confident(&self, min_score: f32) -> bool {
        self.score.is_none_or(|score| score > min_score)
    }
}

impl From<&str> for Annotation {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Annotation {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnnotationRepr {
    Text(String),
    Scored {
        #[serde(alias = "description", alias = "name")]
        text: String,
        #[serde(default, alias = "value")]
        score: Option<f32>,
    },
}

impl From<AnnotationRepr> for Annotation {
    fn from(value: AnnotationRepr) -> Self {
        match value {
            AnnotationRepr::Text(text) => Self { text, score: None },
            AnnotationRepr::Scored { text, score } => Self { text, score },
        }
    }
}

/// Textual channels for one image. Any of them may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSignal {
    /// generic image labels
    pub labels: Vec<Annotation>,
    /// names of localized objects
    pub objects: Vec<Annotation>,
    /// OCR fragments
    pub text: Vec<Annotation>,
    pub logos: Vec<Annotation>,
}

impl RawSignal {
    #[must_use]
    pub fn from_labels<T: Into<Annotation>>(labels: impl IntoIterator<Item = T>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.objects.is_empty() && self.text.is_empty() && self.logos.is_empty()
    }

    /// channels in the order they are concatenated
    pub fn channels(&self) -> [&[Annotation]; 4] {
        [
            self.labels.as_slice(),
            self.objects.as_slice(),
            self.text.as_slice(),
            self.logos.as_slice(),
        ]
    }
}

/// A representative color of an image, ranked by the color service (first is most prominent).
///
/// Channels are kept as reported; [`DominantColor::rgb`] decides whether they form a usable color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DominantColor {
    pub red: Option<f64>,
    pub green: Option<f64>,
    pub blue: Option<f64>,
    #[serde(default, alias = "score", skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
}

impl DominantColor {
    #[must_use]
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: Some(f64::from(red)),
            green: Some(f64::from(green)),
            blue: Some(f64::from(blue)),
            weight: None,
        }
    }

    #[must_use]
    pub const fn with_weight(mut self, weight: f32) -> Self {
        self.weight = Some(weight);
        self
    }

    /// none if a channel is missing, not finite, or outside 0..=255
    #[must_use]
    pub fn rgb(&self) -> Option<Srgb<u8>> {
        let channel = |value: Option<f64>| {
            value
                .filter(|value| value.is_finite() && (0.0..=255.0).contains(value))
                .map(|value| value.round() as u8)
        };
        Some(Srgb::new(channel(self.red)?, channel(self.green)?, channel(self.blue)?))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Triple(Vec<f64>),
    Channels {
        red: Option<f64>,
        green: Option<f64>,
        blue: Option<f64>,
        #[serde(default, alias = "score")]
        weight: Option<f32>,
    },
}

/// Drops entries that are neither `[r, g, b]` nor `{red, green, blue}` instead of failing the
/// bundle; anything other than a list counts as no colors.
fn lenient_colors<'de, D>(deserializer: D) -> Result<Vec<DominantColor>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Array(entries)) => entries,
        Some(serde_json::Value::Null) | None => vec![],
        Some(other) => {
            tracing::debug!(%other, "dominant colors are not a list");
            vec![]
        }
    };
    Ok(raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<ColorRepr>(value.clone()) {
            Ok(ColorRepr::Triple(channels)) if channels.len() == 3 => {
                let [red, green, blue] = channels.as_slice() else {
                    return None;
                };
                Some(DominantColor {
                    red: Some(*red),
                    green: Some(*green),
                    blue: Some(*blue),
                    weight: None,
                })
            }
            Ok(ColorRepr::Channels {
                red,
                green,
                blue,
                weight,
            }) => Some(DominantColor {
                red,
                green,
                blue,
                weight,
            }),
            _ => {
                tracing::debug!(%value, "skipping malformed dominant color");
                None
            }
        })
        .collect())
}

/// Everything known about one image: the textual channels plus its ranked dominant colors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalBundle {
    #[serde(flatten)]
    pub signals: RawSignal,
    #[serde(default, deserialize_with = "lenient_colors")]
    pub dominant_colors: Vec<DominantColor>,
}

impl SignalBundle {
    #[must_use]
    pub const fn new(signals: RawSignal, dominant_colors: Vec<DominantColor>) -> Self {
        Self {
            signals,
            dominant_colors,
        }
    }
}
