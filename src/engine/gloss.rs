use crate::annotation::provider::{find_contract_violation, Annotator, AnnotatorError};
use crate::types::annotation::{
    AnnotatedToken, EntityCategory, FacialMarker, GlossResult, NOISE_LEMMAS, WH_WORDS,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslateError {
    /// The annotator returned a token with no lemma, breaking the contract
    /// the pipeline depends on. Surfaced to the caller, never patched over.
    #[error("annotator contract violation: token '{surface}' at position {position} has no lemma")]
    MissingLemma { surface: String, position: usize },

    #[error(transparent)]
    Annotator(#[from] AnnotatorError),
}

fn is_wh_word(surface: &str) -> bool {
    WH_WORDS.iter().any(|wh| surface.eq_ignore_ascii_case(wh))
}

fn is_noise_lemma(lemma: &str) -> bool {
    NOISE_LEMMAS.iter().any(|n| lemma.eq_ignore_ascii_case(n))
}

/// Converts an English sentence to a SASL gloss (Time + Topic + Comment
/// order) plus a facial marker, using the supplied annotator for
/// tokenization, lemmas and entity labels.
///
/// Rule stages, applied in this exact order:
/// 1. Time words (DATE/TIME entities) are fronted.
/// 2. A WH word is extracted and moved to the end. When a sentence contains
///    more than one WH word, the last one wins (overwrite on match).
/// 3. Noise lemmas (be/the/a/an) and punctuation are dropped.
/// 4. Remaining lemmas are uppercased and assembled in source order.
/// 5. Marker: WH word -> furrowed brows; trailing '?' -> raised brows;
///    otherwise neutral. The '?' check is a punctuation-only heuristic and
///    does not detect auxiliary inversion.
///
/// Pure and deterministic for a fixed (sentence, annotator) pair. Any
/// syntactically valid string is accepted; an empty or punctuation-only
/// sentence yields an empty gloss with a neutral marker.
pub fn translate(sentence: &str, annotator: &dyn Annotator) -> Result<GlossResult, TranslateError> {
    let tokens = annotator.annotate(sentence)?;

    if let Some((surface, position)) = find_contract_violation(&tokens) {
        return Err(TranslateError::MissingLemma { surface, position });
    }

    // Stage 1: stable partition, time words fronted.
    let mut time_bucket: Vec<String> = Vec::new();
    let mut remainder: Vec<&AnnotatedToken> = Vec::new();
    for token in &tokens {
        match token.entity_category {
            EntityCategory::Date | EntityCategory::Time => {
                time_bucket.push(token.lemma.to_uppercase());
            }
            EntityCategory::Other => remainder.push(token),
        }
    }

    // Stage 2: WH extraction. Later matches overwrite earlier ones.
    let mut wh_token: Option<&AnnotatedToken> = None;
    let mut filtered: Vec<&AnnotatedToken> = Vec::new();
    for token in remainder {
        if is_wh_word(&token.surface) {
            wh_token = Some(token);
        } else {
            filtered.push(token);
        }
    }

    // Stage 3: drop noise lemmas and punctuation, uppercase the survivors.
    let meaning_bucket: Vec<String> = filtered
        .iter()
        .filter(|t| !t.is_punctuation && !is_noise_lemma(&t.lemma))
        .map(|t| t.lemma.to_uppercase())
        .collect();

    // Stage 4: assembly.
    let mut gloss = time_bucket;
    gloss.extend(meaning_bucket);
    if let Some(wh) = wh_token {
        gloss.push(wh.lemma.to_uppercase());
    }

    // Stage 5: facial marker.
    let facial_marker = if wh_token.is_some() {
        FacialMarker::FurrowedBrows
    } else if sentence.trim().ends_with('?') {
        FacialMarker::RaisedBrows
    } else {
        FacialMarker::Neutral
    };

    Ok(GlossResult {
        gloss,
        facial_marker,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::fixture::FixtureAnnotator;
    use crate::types::annotation::EntityCategory::{Date, Other, Time};

    fn tok(surface: &str, lemma: &str, cat: EntityCategory, pos: usize) -> AnnotatedToken {
        AnnotatedToken::new(surface, lemma, false, cat, pos)
    }

    fn punct(surface: &str, pos: usize) -> AnnotatedToken {
        AnnotatedToken::new(surface, surface, true, Other, pos)
    }

    #[test]
    fn imperative_sentence_drops_noise_and_punctuation() {
        let mut fixture = FixtureAnnotator::new();
        fixture.insert(
            "Call the police.",
            vec![
                tok("Call", "call", Other, 0),
                tok("the", "the", Other, 1),
                tok("police", "police", Other, 2),
                punct(".", 3),
            ],
        );

        let result = translate("Call the police.", &fixture).unwrap();
        assert_eq!(result.gloss, vec!["CALL", "POLICE"]);
        assert_eq!(result.facial_marker, FacialMarker::Neutral);
    }

    #[test]
    fn wh_question_moves_wh_word_to_end_with_furrowed_brows() {
        let mut fixture = FixtureAnnotator::new();
        fixture.insert(
            "Where is the hospital?",
            vec![
                tok("Where", "where", Other, 0),
                tok("is", "be", Other, 1),
                tok("the", "the", Other, 2),
                tok("hospital", "hospital", Other, 3),
                punct("?", 4),
            ],
        );

        let result = translate("Where is the hospital?", &fixture).unwrap();
        assert_eq!(result.gloss, vec!["HOSPITAL", "WHERE"]);
        assert_eq!(result.facial_marker, FacialMarker::FurrowedBrows);
    }

    #[test]
    fn empty_sentence_yields_empty_gloss_and_neutral_marker() {
        let fixture = FixtureAnnotator::new();
        let result = translate("", &fixture).unwrap();
        assert!(result.gloss.is_empty());
        assert_eq!(result.facial_marker, FacialMarker::Neutral);
    }

    #[test]
    fn punctuation_only_sentence_yields_empty_gloss() {
        let mut fixture = FixtureAnnotator::new();
        fixture.insert("?!", vec![punct("?", 0), punct("!", 1)]);

        let result = translate("?!", &fixture).unwrap();
        assert!(result.gloss.is_empty());
        // No WH word was captured, so the trailing '!' leaves the '?'
        // heuristic unsatisfied and the marker neutral.
        assert_eq!(result.facial_marker, FacialMarker::Neutral);
    }

    #[test]
    fn time_word_is_fronted_from_anywhere_in_the_sentence() {
        let mut fixture = FixtureAnnotator::new();
        fixture.insert(
            "I am going to the shop tomorrow",
            vec![
                tok("I", "I", Other, 0),
                tok("am", "be", Other, 1),
                tok("going", "go", Other, 2),
                tok("to", "to", Other, 3),
                tok("the", "the", Other, 4),
                tok("shop", "shop", Other, 5),
                tok("tomorrow", "tomorrow", Date, 6),
            ],
        );

        let result = translate("I am going to the shop tomorrow", &fixture).unwrap();
        assert_eq!(result.gloss, vec!["TOMORROW", "I", "GO", "TO", "SHOP"]);
        assert_eq!(result.facial_marker, FacialMarker::Neutral);
    }

    #[test]
    fn multiple_time_words_keep_source_order_at_the_front() {
        let mut fixture = FixtureAnnotator::new();
        fixture.insert(
            "Tomorrow morning we leave",
            vec![
                tok("Tomorrow", "tomorrow", Date, 0),
                tok("morning", "morning", Time, 1),
                tok("we", "we", Other, 2),
                tok("leave", "leave", Other, 3),
            ],
        );

        let result = translate("Tomorrow morning we leave", &fixture).unwrap();
        assert_eq!(result.gloss, vec!["TOMORROW", "MORNING", "WE", "LEAVE"]);
    }

    #[test]
    fn last_wh_word_wins_when_two_are_present() {
        let mut fixture = FixtureAnnotator::new();
        fixture.insert(
            "Who knows where?",
            vec![
                tok("Who", "who", Other, 0),
                tok("knows", "know", Other, 1),
                tok("where", "where", Other, 2),
                punct("?", 3),
            ],
        );

        let result = translate("Who knows where?", &fixture).unwrap();
        // Overwrite-on-match: the earlier WH word is consumed by the scan
        // but only the later one is appended.
        assert_eq!(result.gloss, vec!["KNOW", "WHERE"]);
        assert_eq!(result.facial_marker, FacialMarker::FurrowedBrows);
    }

    #[test]
    fn yes_no_question_gets_raised_brows_from_trailing_question_mark() {
        let mut fixture = FixtureAnnotator::new();
        fixture.insert(
            "You need a doctor?",
            vec![
                tok("You", "you", Other, 0),
                tok("need", "need", Other, 1),
                tok("a", "a", Other, 2),
                tok("doctor", "doctor", Other, 3),
                punct("?", 4),
            ],
        );

        let result = translate("You need a doctor?", &fixture).unwrap();
        assert_eq!(result.gloss, vec!["YOU", "NEED", "DOCTOR"]);
        assert_eq!(result.facial_marker, FacialMarker::RaisedBrows);
    }

    #[test]
    fn every_gloss_token_is_uppercase() {
        let mut fixture = FixtureAnnotator::new();
        fixture.insert(
            "I am going to the shop tomorrow",
            vec![
                tok("I", "i", Other, 0),
                tok("am", "be", Other, 1),
                tok("going", "go", Other, 2),
                tok("shop", "shop", Other, 3),
                tok("tomorrow", "tomorrow", Date, 4),
            ],
        );

        let result = translate("I am going to the shop tomorrow", &fixture).unwrap();
        for token in &result.gloss {
            assert_eq!(token, &token.to_uppercase());
        }
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let mut fixture = FixtureAnnotator::new();
        fixture.insert(
            "Where is the hospital?",
            vec![
                tok("Where", "where", Other, 0),
                tok("is", "be", Other, 1),
                tok("the", "the", Other, 2),
                tok("hospital", "hospital", Other, 3),
                punct("?", 4),
            ],
        );

        let first = translate("Where is the hospital?", &fixture).unwrap();
        for _ in 0..5 {
            assert_eq!(translate("Where is the hospital?", &fixture).unwrap(), first);
        }
    }

    #[test]
    fn missing_lemma_surfaces_as_contract_violation() {
        let mut fixture = FixtureAnnotator::new();
        fixture.insert(
            "Call police",
            vec![
                tok("Call", "call", Other, 0),
                tok("police", "", Other, 1),
            ],
        );

        let err = translate("Call police", &fixture).unwrap_err();
        match err {
            TranslateError::MissingLemma { surface, position } => {
                assert_eq!(surface, "police");
                assert_eq!(position, 1);
            }
            other => panic!("expected MissingLemma, got {:?}", other),
        }
    }

    #[test]
    fn wh_surface_match_is_case_insensitive() {
        let mut fixture = FixtureAnnotator::new();
        fixture.insert(
            "WHERE hospital",
            vec![
                tok("WHERE", "where", Other, 0),
                tok("hospital", "hospital", Other, 1),
            ],
        );

        let result = translate("WHERE hospital", &fixture).unwrap();
        assert_eq!(result.gloss, vec!["HOSPITAL", "WHERE"]);
        assert_eq!(result.facial_marker, FacialMarker::FurrowedBrows);
    }

    #[test]
    fn noise_lemma_match_is_case_insensitive() {
        let mut fixture = FixtureAnnotator::new();
        fixture.insert(
            "The dog",
            vec![
                tok("The", "The", Other, 0),
                tok("dog", "dog", Other, 1),
            ],
        );

        let result = translate("The dog", &fixture).unwrap();
        assert_eq!(result.gloss, vec!["DOG"]);
    }
}
