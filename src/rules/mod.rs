//! Phonetic rule tables and the similarity oracle built on them.

pub mod similarity;
pub mod tables;

pub use similarity::{classify_variant, similar, VariantClass};

use unicode_normalization::UnicodeNormalization;

/// Length and stress markers carried by synthesizer output; strippable
/// for comparison.
const STRIPPABLE_MARKERS: [char; 4] = ['ː', 'ˑ', 'ˈ', 'ˌ'];

/// NFC-normalizes a phoneme token.
pub fn nfc(token: &str) -> String {
    token.nfc().collect()
}

/// Removes length and stress markers from a token.
pub fn strip_markers(token: &str) -> String {
    token
        .chars()
        .filter(|ch| !STRIPPABLE_MARKERS.contains(ch))
        .collect()
}

/// True when the token starts with a vowel character.
pub fn is_vowel(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|ch| tables::VOWEL_ONSETS.contains(&ch))
}

/// True when a deletion of this phoneme should count against the word.
pub fn is_important(token: &str) -> bool {
    !tables::UNIMPORTANT_PHONEMES.contains(strip_markers(token).as_str())
}

/// True when the word scores in lenient mode.
pub fn is_function_word(word: &str) -> bool {
    tables::FUNCTION_WORDS.contains_key(word)
}
