use crate::annotation::provider::{Annotator, AnnotatorError};
use crate::types::annotation::AnnotatedToken;
use std::collections::HashMap;

/// Deterministic annotator returning canned annotations for fixed sentences.
///
/// Gloss output is sensitive to the annotator's lemma and entity decisions,
/// so pipeline tests pin those decisions here instead of depending on a real
/// tagger's vocabulary. A sentence with no registered annotation yields an
/// empty token stream, which the pipeline turns into an empty gloss.
#[derive(Debug, Default)]
pub struct FixtureAnnotator {
    entries: HashMap<String, Vec<AnnotatedToken>>,
}

impl FixtureAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the exact annotation to return for `sentence`.
    pub fn insert(&mut self, sentence: &str, tokens: Vec<AnnotatedToken>) {
        self.entries.insert(sentence.to_string(), tokens);
    }
}

impl Annotator for FixtureAnnotator {
    fn annotate(&self, sentence: &str) -> Result<Vec<AnnotatedToken>, AnnotatorError> {
        Ok(self.entries.get(sentence).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::annotation::EntityCategory;

    #[test]
    fn returns_registered_tokens_verbatim() {
        let mut fixture = FixtureAnnotator::new();
        fixture.insert(
            "hello",
            vec![AnnotatedToken::new(
                "hello",
                "hello",
                false,
                EntityCategory::Other,
                0,
            )],
        );

        let tokens = fixture.annotate("hello").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].surface, "hello");
    }

    #[test]
    fn unknown_sentence_yields_empty_annotation() {
        let fixture = FixtureAnnotator::new();
        assert!(fixture.annotate("never registered").unwrap().is_empty());
    }
}
