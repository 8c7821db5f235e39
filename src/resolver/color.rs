use itertools::Itertools;
use palette::Srgb;

use crate::{
    config::{BrightnessBand, ReferenceColor},
    error::ConfigError,
    signal::DominantColor,
    vocabulary::{AttributeDimension, Vocabulary},
};

/// Snaps dominant RGB values to the nearest named reference color.
#[derive(Debug, Clone)]
pub struct ColorClassifier {
    references: Vec<(&'static str, Srgb<u8>)>,
    min_weight: f32,
    brightness: Option<BrightnessBand>,
}

impl ColorClassifier {
    pub fn new(
        references: &[ReferenceColor],
        vocabulary: &Vocabulary,
        min_weight: f32,
        brightness: Option<BrightnessBand>,
    ) -> Result<Self, ConfigError> {
        let references = references
            .iter()
            .map(|reference| {
                vocabulary
                    .values_for(AttributeDimension::Color)
                    .iter()
                    .find(|name| **name == reference.name)
                    .map(|name| {
                        let [red, green, blue] = reference.rgb;
                        (*name, Srgb::new(red, green, blue))
                    })
                    .ok_or_else(|| ConfigError::UnknownValue {
                        dimension: AttributeDimension::Color,
                        value: reference.name.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            references,
            min_weight,
            brightness,
        })
    }

    /// nearest reference by squared euclidean distance; the earlier reference wins a tie
    #[must_use]
    pub fn nearest(&self, color: Srgb<u8>) -> Option<&'static str> {
        self.references
            .iter()
            .min_by_key(|(_, reference)| distance(color, *reference))
            .map(|(name, _)| *name)
    }

    /// Names of the usable dominant colors, in input order, duplicates included.
    ///
    /// With a brightness band, colors outside it are dropped unless none are inside, in which
    /// case only the first usable color is classified.
    pub fn classify(&self, colors: &[DominantColor]) -> Vec<&'static str> {
        let usable = colors
            .iter()
            .filter(|color| color.weight.is_none_or(|weight| weight >= self.min_weight))
            .filter_map(|color| {
                let rgb = color.rgb();
                if rgb.is_none() {
                    tracing::debug!(?color, "skipping dominant color without usable channels");
                }
                rgb
            })
            .collect_vec();

        let kept = match self.brightness {
            Some(band) => {
                let inside = usable.iter().copied().filter(|rgb| band.admits(*rgb)).collect_vec();
                if inside.is_empty() {
                    usable.into_iter().take(1).collect_vec()
                } else {
                    inside
                }
            }
            None => usable,
        };
        kept.into_iter().filter_map(|rgb| self.nearest(rgb)).collect()
    }
}

fn distance(a: Srgb<u8>, b: Srgb<u8>) -> u32 {
    let channel = |a: u8, b: u8| u32::from(a.abs_diff(b)).pow(2);
    channel(a.red, b.red) + channel(a.green, b.green) + channel(a.blue, b.blue)
}
