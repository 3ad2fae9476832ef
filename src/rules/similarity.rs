//! Layered similarity oracle over phoneme tokens.
//!
//! The oracle is used twice: as a plain predicate while computing
//! alignment costs (non-strict, no word context), and after alignment to
//! classify the kind of acceptable variant so the scorer can pick a
//! credit band.

use super::tables::{
    CORE_EQUIVALENTS, FUNCTION_WORDS, GENERAL_EQUIVALENTS, REDUCTIONS, RHOTIC_PAIRS,
    VOICED_TO_VOICELESS, VOICING_PAIRS,
};
use super::{nfc, strip_markers};

/// The kind of accepted variant a replace was credited as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantClass {
    /// Tokens identical once length/stress markers are removed.
    StrippedEqual,
    /// Accepted per-word function-word reduction.
    FunctionWord,
    /// Rhotic vowel variant, including split or fused r-coloring.
    Rhotic,
    /// True cross-dialect category identity.
    CoreDialect,
    /// Unstressed vowel reduction.
    Reduction,
    /// Voiced target realized voiceless at the end of a word.
    WordFinalDevoicing,
    /// Remaining word-final voicing alternation.
    WordFinalVoicing,
    /// Voicing alternation away from a word edge.
    MidWordVoicing,
    /// Accepted only by the looser lenient-mode checks.
    OtherSimilar,
}

/// Layered yes/no similarity between a target and an actual phoneme.
///
/// Checks run in order and return at the first hit. Strict mode stops
/// after the word-final voicing layer; lenient mode additionally admits
/// the general equivalence table and bare trailing-r base forms.
pub fn similar(target: &str, actual: &str, word: Option<&str>, strict: bool, word_final: bool) -> bool {
    if nfc(target) == nfc(actual) {
        return true;
    }
    let target_base = strip_markers(target);
    let actual_base = strip_markers(actual);
    if target_base == actual_base {
        return true;
    }
    if let Some(word) = word {
        if word_variant(word, target, actual, &target_base, &actual_base) {
            return true;
        }
    }
    if rhotic_variant(target, actual, &target_base, &actual_base) {
        return true;
    }
    if core_equivalent(target, actual, &target_base, &actual_base) {
        return true;
    }
    if reduction(target, actual, &target_base, &actual_base) {
        return true;
    }
    if word_final && voicing_pair(&target_base, &actual_base) {
        return true;
    }
    if strict {
        return false;
    }
    if general_equivalent(&target_base, &actual_base) {
        return true;
    }
    trailing_r_base(&target_base) == trailing_r_base(&actual_base)
}

/// Classifies an accepted variant for credit assignment.
///
/// Layer order mirrors [`similar`]; callers invoke this only after the
/// oracle accepted the pair, so the lenient fallback is `OtherSimilar`.
pub fn classify_variant(
    target: &str,
    actual: &str,
    word: Option<&str>,
    word_final: bool,
) -> VariantClass {
    let target_base = strip_markers(target);
    let actual_base = strip_markers(actual);
    if target_base == actual_base {
        return VariantClass::StrippedEqual;
    }
    if let Some(word) = word {
        if word_variant(word, target, actual, &target_base, &actual_base) {
            return VariantClass::FunctionWord;
        }
    }
    if rhotic_variant(target, actual, &target_base, &actual_base) {
        return VariantClass::Rhotic;
    }
    if core_equivalent(target, actual, &target_base, &actual_base) {
        return VariantClass::CoreDialect;
    }
    if reduction(target, actual, &target_base, &actual_base) {
        return VariantClass::Reduction;
    }
    if voicing_pair(&target_base, &actual_base) {
        if !word_final {
            return VariantClass::MidWordVoicing;
        }
        if VOICED_TO_VOICELESS
            .get(target_base.as_str())
            .is_some_and(|set| set.contains(actual_base.as_str()))
        {
            return VariantClass::WordFinalDevoicing;
        }
        return VariantClass::WordFinalVoicing;
    }
    VariantClass::OtherSimilar
}

fn word_variant(word: &str, target: &str, actual: &str, target_base: &str, actual_base: &str) -> bool {
    let Some(map) = FUNCTION_WORDS.get(word) else {
        return false;
    };
    for key in [target, target_base] {
        if let Some(set) = map.get(key) {
            if set.contains(actual) || set.contains(actual_base) {
                return true;
            }
        }
    }
    false
}

fn rhotic_variant(target: &str, actual: &str, target_base: &str, actual_base: &str) -> bool {
    for (plain, rhotics) in RHOTIC_PAIRS.iter() {
        for (a, b) in [(target, actual), (target_base, actual_base)] {
            let a_in = a == *plain || rhotics.contains(a);
            let b_in = b == *plain || rhotics.contains(b);
            if a_in && b_in {
                return true;
            }
        }
    }
    // derived rule: x and x+ɹ are equivalent
    let appended = |base: &str, other: &str| {
        other.len() > base.len()
            && other.starts_with(base)
            && matches!(&other[base.len()..], "ɹ" | "r")
    };
    appended(target_base, actual_base) || appended(actual_base, target_base)
}

fn core_equivalent(target: &str, actual: &str, target_base: &str, actual_base: &str) -> bool {
    for (a, b) in [
        (target, actual),
        (actual, target),
        (target_base, actual_base),
        (actual_base, target_base),
    ] {
        if CORE_EQUIVALENTS.get(a).is_some_and(|set| set.contains(b)) {
            return true;
        }
    }
    false
}

fn reduction(target: &str, actual: &str, target_base: &str, actual_base: &str) -> bool {
    for (a, b) in [(target, actual), (target_base, actual_base)] {
        if REDUCTIONS.get(a).is_some_and(|set| set.contains(b)) {
            return true;
        }
    }
    false
}

fn voicing_pair(target_base: &str, actual_base: &str) -> bool {
    VOICING_PAIRS
        .get(target_base)
        .is_some_and(|set| set.contains(actual_base))
}

fn general_equivalent(target_base: &str, actual_base: &str) -> bool {
    GENERAL_EQUIVALENTS
        .get(target_base)
        .is_some_and(|set| set.contains(actual_base))
        || GENERAL_EQUIVALENTS
            .get(actual_base)
            .is_some_and(|set| set.contains(target_base))
}

fn trailing_r_base(base: &str) -> &str {
    base.strip_suffix('ɹ')
        .or_else(|| base.strip_suffix('r'))
        .unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_and_stripped_equality() {
        assert!(similar("ə", "ə", None, true, false));
        assert!(similar("ɔː", "ɔ", None, true, false));
        assert!(similar("ˈiː", "i", None, true, false));
    }

    #[test]
    fn goat_vowel_is_a_core_equivalent_both_ways() {
        assert!(similar("əʊ", "oʊ", None, true, false));
        assert!(similar("oʊ", "əʊ", None, true, false));
        assert_eq!(
            classify_variant("əʊ", "oʊ", None, false),
            VariantClass::CoreDialect
        );
    }

    #[test]
    fn lax_for_tense_is_not_similar_in_strict_mode() {
        assert!(!similar("uː", "ʊ", None, true, false));
        assert!(!similar("iː", "ɛ", None, true, false));
    }

    #[test]
    fn function_word_reduction_needs_word_context() {
        assert!(similar("uː", "ə", Some("to"), true, false));
        assert!(!similar("uː", "ə", None, true, false));
        assert_eq!(
            classify_variant("uː", "ə", Some("to"), false),
            VariantClass::FunctionWord
        );
    }

    #[test]
    fn rhotic_cluster_and_derived_rule() {
        assert!(similar("ɑː", "ɑːɹ", None, true, false));
        assert!(similar("ɪə", "ɪɹ", None, true, false));
        assert!(similar("ə", "ɚ", None, true, false));
        assert!(similar("ɛ", "ɛɹ", None, true, false));
        assert_eq!(
            classify_variant("ɪə", "ɪɹ", None, false),
            VariantClass::Rhotic
        );
    }

    #[test]
    fn word_final_voicing_gated_on_position() {
        assert!(similar("z", "s", None, true, true));
        assert!(!similar("z", "s", None, true, false));
        assert_eq!(
            classify_variant("z", "s", None, true),
            VariantClass::WordFinalDevoicing
        );
        assert_eq!(
            classify_variant("s", "z", None, true),
            VariantClass::WordFinalVoicing
        );
    }

    #[test]
    fn lenient_mode_admits_general_equivalents() {
        assert!(!similar("θ", "t", None, true, false));
        assert!(similar("θ", "t", None, false, false));
        assert_eq!(
            classify_variant("θ", "t", None, false),
            VariantClass::OtherSimilar
        );
    }

    #[test]
    fn unknown_tokens_only_match_exactly() {
        assert!(similar("ǂ", "ǂ", None, true, false));
        assert!(!similar("ǂ", "t", None, false, false));
    }
}
