//! Turns what image-recognition services say about a photo of a clothing item into a record of
//! wardrobe attributes (season, occasion, category, color, material, pattern, style, gender),
//! every value taken from one fixed vocabulary.

mod config;
mod error;
mod record;
mod resolver;
mod signal;
mod sources;
mod vocabulary;

pub use crate::config::{
    BrightnessBand, GenderKeywords, ReferenceColor, ResolverConfig, SynonymRule, Thresholds,
};
pub use error::{ConfigError, SourceError};
pub use label_similarity::{Similarity, SorensenDice, TrigramJaccard};
pub use record::{feature_vector, AttributeRecord, CategorySelection, Gender};
pub use resolver::{fuzzy_match, Resolver};
pub use signal::{
    flatten, keywords, normalize, phrases, terms, Annotation, DominantColor, PreparedSignals,
    RawSignal, SignalBundle,
};
pub use sources::{parse_clarifai, parse_google_vision};
pub use vocabulary::{AttributeDimension, Vocabulary, VocabularySnapshot, VOCABULARY_VERSION};
