use serde::{Deserialize, Serialize};

/// Entity label attached to a token by the annotator. Only DATE and TIME
/// influence gloss ordering; every other label collapses to Other.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityCategory {
    Date,
    Time,
    #[default]
    Other,
}

/// One lexical token as produced by an annotator, punctuation included.
/// `position` is the token's index in the original sentence.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct AnnotatedToken {
    pub surface: String,
    pub lemma: String,
    pub is_punctuation: bool,
    pub entity_category: EntityCategory,
    pub position: usize,
}

impl AnnotatedToken {
    pub fn new(
        surface: &str,
        lemma: &str,
        is_punctuation: bool,
        entity_category: EntityCategory,
        position: usize,
    ) -> Self {
        AnnotatedToken {
            surface: surface.to_string(),
            lemma: lemma.to_string(),
            is_punctuation,
            entity_category,
            position,
        }
    }
}

/// Non-manual facial marker accompanying a signed utterance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FacialMarker {
    #[default]
    Neutral,
    RaisedBrows,
    FurrowedBrows,
}

impl FacialMarker {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacialMarker::Neutral => "neutral",
            FacialMarker::RaisedBrows => "raised_brows",
            FacialMarker::FurrowedBrows => "furrowed_brows",
        }
    }
}

impl std::fmt::Display for FacialMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output of one translation request: uppercase gloss tokens in SASL order
/// (time words, then meaning words, then a trailing WH word if any) plus the
/// facial marker. Created once per call, never mutated afterward.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct GlossResult {
    pub gloss: Vec<String>,
    pub facial_marker: FacialMarker,
}

/// Interrogative words relocated to the end of a gloss. Matched against the
/// token's surface text, case-insensitively.
pub const WH_WORDS: [&str; 6] = ["who", "what", "where", "when", "why", "how"];

/// English grammatical words with no SASL manual correspondent, dropped
/// during translation. Matched against the token's lemma, case-insensitively.
/// "be" covers is/am/are/was/were via lemmatization.
pub const NOISE_LEMMAS: [&str; 4] = ["be", "the", "a", "an"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facial_marker_serializes_to_snake_case_strings() {
        assert_eq!(
            serde_json::to_string(&FacialMarker::RaisedBrows).unwrap(),
            "\"raised_brows\""
        );
        assert_eq!(
            serde_json::to_string(&FacialMarker::Neutral).unwrap(),
            "\"neutral\""
        );
        assert_eq!(FacialMarker::FurrowedBrows.to_string(), "furrowed_brows");
    }

    #[test]
    fn gloss_result_json_shape_matches_display_contract() {
        let result = GlossResult {
            gloss: vec!["CALL".to_string(), "POLICE".to_string()],
            facial_marker: FacialMarker::Neutral,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            "{\"gloss\":[\"CALL\",\"POLICE\"],\"facial_marker\":\"neutral\"}"
        );
    }
}
