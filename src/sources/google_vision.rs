use serde::Deserialize;

use crate::{
    error::SourceError,
    signal::{Annotation, DominantColor, RawSignal, SignalBundle},
};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope {
    Batch { responses: Vec<ImageResponse> },
    Single(Box<ImageResponse>),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ImageResponse {
    label_annotations: Vec<EntityAnnotation>,
    localized_object_annotations: Vec<ObjectAnnotation>,
    text_annotations: Vec<EntityAnnotation>,
    logo_annotations: Vec<EntityAnnotation>,
    image_properties_annotation: Option<ImageProperties>,
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct EntityAnnotation {
    #[serde(default)]
    description: String,
    score: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ObjectAnnotation {
    #[serde(default)]
    name: String,
    score: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageProperties {
    #[serde(default)]
    dominant_colors: ColorList,
}

#[derive(Debug, Default, Deserialize)]
struct ColorList {
    #[serde(default)]
    colors: Vec<ColorInfo>,
}

#[derive(Debug, Deserialize)]
struct ColorInfo {
    color: Option<Rgb>,
    score: Option<f32>,
}

/// Proto3 JSON leaves out zero channels.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Rgb {
    red: f64,
    green: f64,
    blue: f64,
}

#[derive(Debug, Deserialize)]
struct Status {
    code: Option<i64>,
    #[serde(default)]
    message: String,
}

fn entities(annotations: Vec<EntityAnnotation>) -> Vec<Annotation> {
    annotations
        .into_iter()
        .filter(|annotation| !annotation.description.trim().is_empty())
        .map(|annotation| Annotation {
            text: annotation.description,
            score: annotation.score,
        })
        .collect()
}

impl From<ImageResponse> for SignalBundle {
    fn from(response: ImageResponse) -> Self {
        let objects = response
            .localized_object_annotations
            .into_iter()
            .filter(|object| !object.name.trim().is_empty())
            .map(|object| Annotation {
                text: object.name,
                score: object.score,
            })
            .collect();
        let dominant_colors = response
            .image_properties_annotation
            .map(|properties| properties.dominant_colors.colors)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|info| {
                let rgb = info.color?;
                Some(DominantColor {
                    red: Some(rgb.red),
                    green: Some(rgb.green),
                    blue: Some(rgb.blue),
                    weight: info.score,
                })
            })
            .collect();
        Self::new(
            RawSignal {
                labels: entities(response.label_annotations),
                objects,
                text: entities(response.text_annotations),
                logos: entities(response.logo_annotations),
            },
            dominant_colors,
        )
    }
}

/// Decodes an `images:annotate` response, either a single `AnnotateImageResponse` or the
/// `{"responses": [...]}` envelope (only the first image is used).
pub fn parse_google_vision(json: &str) -> Result<SignalBundle, SourceError> {
    let response = match serde_json::from_str::<Envelope>(json)? {
        Envelope::Batch { responses } => responses
            .into_iter()
            .next()
            .ok_or(SourceError::EmptyResponse)?,
        Envelope::Single(response) => *response,
    };
    if let Some(status) = response.error {
        return Err(SourceError::Vendor {
            code: status.code,
            message: status.message,
        });
    }
    let bundle = SignalBundle::from(response);
    tracing::debug!(
        labels = bundle.signals.labels.len(),
        objects = bundle.signals.objects.len(),
        colors = bundle.dominant_colors.len(),
        "decoded google vision response"
    );
    Ok(bundle)
}
