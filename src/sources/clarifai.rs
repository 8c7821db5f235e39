use serde::Deserialize;

use crate::{
    error::SourceError,
    signal::{Annotation, RawSignal, SignalBundle},
};

const STATUS_SUCCESS: i64 = 10000;

#[derive(Debug, Deserialize)]
struct PredictResponse {
    status: Option<Status>,
    #[serde(default)]
    outputs: Vec<Output>,
}

#[derive(Debug, Deserialize)]
struct Status {
    code: i64,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct Output {
    #[serde(default)]
    data: OutputData,
}

#[derive(Debug, Default, Deserialize)]
struct OutputData {
    #[serde(default)]
    concepts: Vec<Concept>,
}

#[derive(Debug, Deserialize)]
struct Concept {
    name: String,
}

/// Decodes a model `outputs` response; concepts of the first output become labels.
///
/// Concept values are dropped so that every concept reaches the resolver, whatever its
/// confidence.
pub fn parse_clarifai(json: &str) -> Result<SignalBundle, SourceError> {
    let response: PredictResponse = serde_json::from_str(json)?;
    if let Some(status) = response.status.filter(|status| status.code != STATUS_SUCCESS) {
        return Err(SourceError::Vendor {
            code: Some(status.code),
            message: status.description,
        });
    }
    let output = response
        .outputs
        .into_iter()
        .next()
        .ok_or(SourceError::EmptyResponse)?;
    let labels = output
        .data
        .concepts
        .into_iter()
        .map(|concept| Annotation::new(concept.name))
        .collect();
    Ok(SignalBundle::new(
        RawSignal {
            labels,
            ..RawSignal::default()
        },
        vec![],
    ))
}
