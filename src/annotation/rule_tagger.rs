use crate::annotation::provider::{Annotator, AnnotatorError};
use crate::types::annotation::{AnnotatedToken, EntityCategory};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};

lazy_static! {
    // Words (with internal apostrophes), digit runs / clock times, or single
    // punctuation marks. Everything the annotator contract calls a token.
    static ref TOKEN_RE: Regex =
        Regex::new(r"[A-Za-z]+(?:'[A-Za-z]+)*|\d+(?::\d+)?|[^\sA-Za-z0-9]").unwrap();

    static ref CLOCK_RE: Regex = Regex::new(r"^\d{1,2}:\d{2}$").unwrap();

    static ref IRREGULAR_LEMMAS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        for form in ["am", "is", "are", "was", "were", "been", "being"] {
            m.insert(form, "be");
        }
        for (form, lemma) in [
            ("going", "go"), ("goes", "go"), ("went", "go"), ("gone", "go"),
            ("has", "have"), ("had", "have"), ("having", "have"),
            ("does", "do"), ("did", "do"), ("done", "do"), ("doing", "do"),
            ("saw", "see"), ("seen", "see"),
            ("came", "come"), ("coming", "come"),
            ("took", "take"), ("taken", "take"),
            ("got", "get"), ("gotten", "get"),
            ("made", "make"), ("making", "make"),
            ("said", "say"),
            ("felt", "feel"),
            ("met", "meet"),
            ("knew", "know"), ("known", "know"),
            ("bought", "buy"),
            ("brought", "bring"),
            ("thought", "think"),
            ("left", "leave"),
            ("children", "child"),
            ("men", "man"),
            ("women", "woman"),
            ("people", "person"),
        ] {
            m.insert(form, lemma);
        }
        m
    };

    // Words ending in 's' that are not plurals; keeps the naive stripper
    // from producing lemmas like "ye" or "new".
    static ref NON_PLURAL_S: HashSet<&'static str> = [
        "yes", "news", "always", "perhaps", "besides", "ours", "yours", "hers", "theirs",
    ]
    .into_iter()
    .collect();

    static ref DATE_WORDS: HashSet<&'static str> = [
        "today", "tomorrow", "yesterday",
        "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
        "january", "february", "march", "april", "may", "june", "july",
        "august", "september", "october", "november", "december",
        "week", "weekend", "month", "year",
    ]
    .into_iter()
    .collect();

    static ref TIME_WORDS: HashSet<&'static str> = [
        "now", "tonight", "morning", "afternoon", "evening", "noon", "midnight",
        "o'clock",
    ]
    .into_iter()
    .collect();
}

/// Self-contained rule-based annotator: regex tokenization, table-plus-suffix
/// lemmatization, word-list DATE/TIME tagging. This is the bundled production
/// adapter; anything it cannot classify is tagged Other, which the gloss
/// pipeline handles as an ordinary meaning word.
#[derive(Debug, Default)]
pub struct RuleTagger;

impl RuleTagger {
    pub fn new() -> Self {
        RuleTagger
    }
}

fn is_punctuation_token(surface: &str) -> bool {
    !surface.chars().any(|c| c.is_ascii_alphanumeric())
}

/// Undoubles the trailing consonant left by -ed/-ing stripping
/// ("stopped" -> "stopp" -> "stop"). Doubles that are part of the base
/// form (ll, ss, zz) are left alone.
fn undouble(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    if chars.len() >= 3 {
        let last = chars[chars.len() - 1];
        let prev = chars[chars.len() - 2];
        if last == prev && !matches!(last, 'l' | 's' | 'z') && !"aeiou".contains(last) {
            return stem[..stem.len() - 1].to_string();
        }
    }
    stem.to_string()
}

/// Lowercase base form of one word. Irregular table first, then plain
/// suffix stripping. Deliberately naive: unknown inflections fall through
/// unchanged rather than guessing.
fn lemmatize(surface: &str) -> String {
    let lower = surface.to_lowercase();
    if let Some(lemma) = IRREGULAR_LEMMAS.get(lower.as_str()) {
        return (*lemma).to_string();
    }

    if lower.len() > 5 && lower.ends_with("ing") {
        return undouble(&lower[..lower.len() - 3]);
    }
    if lower.len() > 4 && lower.ends_with("ied") {
        return format!("{}y", &lower[..lower.len() - 3]);
    }
    if lower.len() > 4 && lower.ends_with("ed") {
        return undouble(&lower[..lower.len() - 2]);
    }
    if lower.len() > 4 && lower.ends_with("ies") {
        return format!("{}y", &lower[..lower.len() - 3]);
    }
    if lower.len() > 3
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("is")
        && !lower.ends_with("us")
        && !NON_PLURAL_S.contains(lower.as_str())
    {
        return lower[..lower.len() - 1].to_string();
    }
    lower
}

fn tag_entity(lower: &str) -> EntityCategory {
    if DATE_WORDS.contains(lower) {
        EntityCategory::Date
    } else if TIME_WORDS.contains(lower) || CLOCK_RE.is_match(lower) {
        EntityCategory::Time
    } else {
        EntityCategory::Other
    }
}

impl Annotator for RuleTagger {
    fn annotate(&self, sentence: &str) -> Result<Vec<AnnotatedToken>, AnnotatorError> {
        let mut tokens = Vec::new();
        for (position, m) in TOKEN_RE.find_iter(sentence).enumerate() {
            let surface = m.as_str();
            if is_punctuation_token(surface) {
                tokens.push(AnnotatedToken::new(
                    surface,
                    surface,
                    true,
                    EntityCategory::Other,
                    position,
                ));
                continue;
            }
            let lower = surface.to_lowercase();
            let lemma = lemmatize(surface);
            tokens.push(AnnotatedToken::new(
                surface,
                &lemma,
                false,
                tag_entity(&lower),
                position,
            ));
        }
        Ok(tokens)
    }
}
