mod dimension;
mod registry;

pub use dimension::AttributeDimension;
pub use registry::{Vocabulary, VocabularySnapshot, VOCABULARY_VERSION};
