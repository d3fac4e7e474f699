use crate::types::annotation::AnnotatedToken;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotatorError {
    /// The underlying annotation backend failed outright (model missing,
    /// backend panic, etc.). The pipeline propagates this unchanged.
    #[error("annotation backend failed: {0}")]
    Backend(String),
}

/// Contract consumed by the gloss pipeline: tokenize one sentence into
/// ordered annotated tokens, one entry per lexical token including
/// punctuation, original order preserved.
///
/// Implementations must be deterministic for a fixed sentence; the pipeline
/// is only as reproducible as its annotator. `Send` so a conversation relay
/// worker can own an annotator on a background thread.
pub trait Annotator: Send {
    fn annotate(&self, sentence: &str) -> Result<Vec<AnnotatedToken>, AnnotatorError>;
}

/// Checks the annotator contract on a returned token stream. Every token
/// must carry a non-empty lemma; a blank lemma means the backend skipped
/// lemmatization and the gloss output would silently degrade.
/// Returns the offending (surface, position) pair if violated.
pub fn find_contract_violation(tokens: &[AnnotatedToken]) -> Option<(String, usize)> {
    tokens
        .iter()
        .find(|t| t.lemma.trim().is_empty())
        .map(|t| (t.surface.clone(), t.position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::annotation::EntityCategory;

    #[test]
    fn blank_lemma_is_reported_with_surface_and_position() {
        let tokens = vec![
            AnnotatedToken::new("call", "call", false, EntityCategory::Other, 0),
            AnnotatedToken::new("police", "  ", false, EntityCategory::Other, 1),
        ];
        assert_eq!(
            find_contract_violation(&tokens),
            Some(("police".to_string(), 1))
        );
    }

    #[test]
    fn well_formed_tokens_pass() {
        let tokens = vec![AnnotatedToken::new(
            "call",
            "call",
            false,
            EntityCategory::Other,
            0,
        )];
        assert_eq!(find_contract_violation(&tokens), None);
    }
}
