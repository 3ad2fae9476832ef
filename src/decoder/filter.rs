//! Removes model-artifact duplicates from the collapsed token stream and
//! fuses split rhotic vowels.
//!
//! The heuristics overlap; their order is load-bearing and must not be
//! rearranged.

use crate::rules::is_vowel;
use crate::types::PhonemePrediction;

/// Filtered-prefix length under which a consonant duplicate is treated
/// as a word-start artifact.
pub const WORD_START_PREFIX_LEN: usize = 2;

/// Walks the predictions left to right, dropping artifacts.
pub fn filter_artifacts(predictions: &[PhonemePrediction]) -> Vec<PhonemePrediction> {
    let mut filtered: Vec<PhonemePrediction> = Vec::with_capacity(predictions.len());
    let mut i = 0;
    while i < predictions.len() {
        let current = &predictions[i];
        let next = predictions.get(i + 1);

        // Split rhotic: a vowel followed by a bare r fuses into one
        // r-colored prediction so it can align against a rhotic target.
        if let Some(next) = next {
            if is_vowel(&current.phoneme)
                && !ends_rhotic(&current.phoneme)
                && is_bare_r(&next.phoneme)
            {
                filtered.push(fuse_rhotic(current, next));
                i += 2;
                continue;
            }
        }

        if filtered.last().map(|p| p.phoneme.as_str()) == Some(current.phoneme.as_str()) {
            if keep_duplicate(&filtered, current, next) {
                filtered.push(current.clone());
            }
            i += 1;
            continue;
        }

        filtered.push(current.clone());
        i += 1;
    }
    filtered
}

/// Ordered duplicate heuristics; the only surviving duplicate is the
/// cross-word geminate V C C V pattern.
fn keep_duplicate(
    filtered: &[PhonemePrediction],
    current: &PhonemePrediction,
    next: Option<&PhonemePrediction>,
) -> bool {
    if is_vowel(&current.phoneme) {
        // English does not repeat vowels
        return false;
    }
    let before_pair = filtered
        .len()
        .checked_sub(2)
        .and_then(|idx| filtered.get(idx));
    let vowel_before = before_pair.is_some_and(|p| is_vowel(&p.phoneme));
    let vowel_after = next.is_some_and(|p| is_vowel(&p.phoneme));
    if vowel_before && vowel_after {
        return true;
    }
    if vowel_before && !vowel_after {
        return false;
    }
    if filtered.len() <= WORD_START_PREFIX_LEN {
        return false;
    }
    if next.is_none() {
        return false;
    }
    false
}

fn is_bare_r(token: &str) -> bool {
    matches!(token, "ɹ" | "r")
}

fn ends_rhotic(token: &str) -> bool {
    token.ends_with('ɹ') || token.ends_with('r') || token.ends_with('ɚ') || token.ends_with('ɝ')
}

fn fuse_rhotic(vowel: &PhonemePrediction, r: &PhonemePrediction) -> PhonemePrediction {
    PhonemePrediction {
        phoneme: format!("{}{}", vowel.phoneme, r.phoneme),
        confidence: vowel.confidence.min(r.confidence),
        top_k: vowel.top_k.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preds(tokens: &[&str]) -> Vec<PhonemePrediction> {
        tokens
            .iter()
            .map(|t| PhonemePrediction::new(*t, 0.9))
            .collect()
    }

    fn tokens(filtered: &[PhonemePrediction]) -> Vec<&str> {
        filtered.iter().map(|p| p.phoneme.as_str()).collect()
    }

    #[test]
    fn fuses_vowel_plus_bare_r() {
        let out = filter_artifacts(&[
            PhonemePrediction::new("h", 0.9),
            PhonemePrediction::new("ɪ", 0.8),
            PhonemePrediction::new("ɹ", 0.7),
        ]);
        assert_eq!(tokens(&out), vec!["h", "ɪɹ"]);
        assert!((out[1].confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn already_rhotic_vowel_does_not_fuse_again() {
        let out = filter_artifacts(&preds(&["k", "ɑːɹ", "ɹ"]));
        assert_eq!(tokens(&out), vec!["k", "ɑːɹ", "ɹ"]);
    }

    #[test]
    fn drops_duplicate_vowels() {
        let out = filter_artifacts(&preds(&["f", "uː", "uː", "d"]));
        assert_eq!(tokens(&out), vec!["f", "uː", "d"]);
    }

    #[test]
    fn keeps_cross_word_gemination_between_vowels() {
        // big goal: ... ɪ ɡ ɡ oʊ ...
        let out = filter_artifacts(&preds(&["b", "ɪ", "ɡ", "ɡ", "oʊ", "l"]));
        assert_eq!(tokens(&out), vec!["b", "ɪ", "ɡ", "ɡ", "oʊ", "l"]);
    }

    #[test]
    fn drops_consonant_duplicate_without_following_vowel() {
        let out = filter_artifacts(&preds(&["j", "ɛ", "s", "s", "t"]));
        assert_eq!(tokens(&out), vec!["j", "ɛ", "s", "t"]);
    }

    #[test]
    fn drops_word_start_stutter() {
        let out = filter_artifacts(&preds(&["t", "t", "uː"]));
        assert_eq!(tokens(&out), vec!["t", "uː"]);
    }

    #[test]
    fn drops_trailing_consonant_duplicate() {
        let out = filter_artifacts(&preds(&["j", "ɛ", "s", "s"]));
        assert_eq!(tokens(&out), vec!["j", "ɛ", "s"]);
    }
}
