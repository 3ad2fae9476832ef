//! End-to-end scoring scenarios over the bundled lexicon.

use std::sync::Arc;

use accentor::reference::LexiconSynthesizer;
use approx::assert_abs_diff_eq;
use accentor::score::{score_words, WordReference};
use accentor::types::{AlignedKind, PhonemePrediction};
use accentor::Evaluator;

fn evaluator() -> Evaluator {
    Evaluator::new(Arc::new(LexiconSynthesizer::bundled().unwrap()))
}

fn preds(entries: &[(&str, f32)]) -> Vec<PhonemePrediction> {
    entries
        .iter()
        .map(|(token, conf)| PhonemePrediction::new(*token, *conf))
        .collect()
}

#[test]
fn perfect_match_scores_one() {
    let decoded = preds(&[
        ("h", 1.0),
        ("ə", 1.0),
        ("l", 1.0),
        ("oʊ", 1.0),
        ("w", 1.0),
        ("ɜːɹ", 1.0),
        ("l", 1.0),
        ("d", 1.0),
    ]);
    let result = evaluator().evaluate("hello world", &decoded).unwrap();
    assert_abs_diff_eq!(result.total_score, 1.0, epsilon = 1e-6);
    assert_eq!(result.words.len(), 2);
    let aligned: Vec<_> = result.words.iter().flat_map(|w| w.aligned.iter()).collect();
    assert_eq!(aligned.len(), 8);
    for slot in aligned {
        assert_eq!(slot.kind, AlignedKind::Match);
        assert_abs_diff_eq!(slot.score, 1.0, epsilon = 1e-6);
    }
}

#[test]
fn function_words_reduce_without_losing_credit() {
    let decoded = preds(&[
        ("t", 0.9),
        ("ə", 0.9),
        ("ð", 0.9),
        ("ə", 0.9),
        ("s", 0.9),
        ("t", 0.9),
        ("ɔːɹ", 0.9),
    ]);
    let result = evaluator().evaluate("to the store", &decoded).unwrap();
    assert!(result.total_score >= 0.89, "got {}", result.total_score);
    for word in &result.words {
        assert!(word.score >= 0.85, "{} scored {}", word.word, word.score);
    }
}

#[test]
fn rhotic_speaker_wins_through_the_us_reference() {
    let decoded = preds(&[("k", 0.95), ("ɑːɹ", 0.95)]);
    let result = evaluator().evaluate("car", &decoded).unwrap();
    assert!(result.total_score >= 0.9499, "got {}", result.total_score);
}

#[test]
fn strict_vowel_mispronunciation_is_penalized() {
    let decoded = preds(&[("f", 0.9), ("ʊ", 0.9), ("d", 0.9)]);
    let result = evaluator().evaluate("food", &decoded).unwrap();
    let word = &result.words[0];
    assert!((word.score - 0.35).abs() < 0.01, "got {}", word.score);
    assert_eq!(word.aligned[1].kind, AlignedKind::Replace);
    assert_eq!(word.aligned[1].score, 0.0);
}

#[test]
fn split_rhotic_vowel_is_fused_and_credited() {
    let decoded = preds(&[("h", 0.9), ("ɪ", 0.8), ("ɹ", 0.7)]);
    let result = evaluator().evaluate("hear", &decoded).unwrap();
    assert!(result.total_score >= 0.75, "got {}", result.total_score);
}

#[test]
fn one_insertion_is_free_the_second_costs() {
    // scored below the artifact filter so the duplicate sibilant survives
    let reference = [WordReference::new("yes", &["j", "ɛ", "s"])];
    let words = score_words(
        &reference,
        &preds(&[("j", 1.0), ("ɛ", 1.0), ("s", 1.0), ("s", 1.0), ("h", 1.0)]),
    );
    assert_abs_diff_eq!(words[0].score, 0.95, epsilon = 1e-6);
}
