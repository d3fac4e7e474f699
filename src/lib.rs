// Declare all modules that are part of this library
pub mod config;
pub mod types {
    pub mod annotation;
}
pub mod annotation {
    pub mod fixture;
    pub mod provider;
    pub mod rule_tagger;
}
pub mod engine {
    pub mod gloss;
}
pub mod conversation;
pub mod lexicon;
pub mod progress;

// Re-export the pieces external callers actually touch: the translation
// entry point, its data model, and the annotator seam.
pub use annotation::provider::{Annotator, AnnotatorError};
pub use engine::gloss::{translate, TranslateError};
pub use types::annotation::{AnnotatedToken, EntityCategory, FacialMarker, GlossResult};
