//! Invariants the scoring pipeline must hold for all inputs.

use std::collections::HashMap;
use std::sync::Arc;

use accentor::reference::{LexiconSynthesizer, PhonemeSynthesizer, ReferenceSet};
use accentor::score::{arbiter, score_words, WordReference};
use accentor::types::{AlignedKind, Dialect, PhonemePrediction};
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
fn scores_stay_in_unit_interval() {
    let cases: Vec<(&str, Vec<PhonemePrediction>)> = vec![
        ("hello world", preds(&[("h", 1.0), ("ə", 1.0)])),
        ("food", preds(&[("m", 0.99), ("m", 0.99), ("m", 0.99)])),
        ("the cat", preds(&[("ʒ", 0.4), ("ʒ", 0.4), ("ʒ", 0.4), ("ʒ", 0.4)])),
        ("yes", preds(&[("j", 1.0), ("ɛ", 1.0), ("s", 1.0), ("h", 1.0), ("h", 1.0)])),
        ("car", Vec::new()),
    ];
    for (sentence, decoded) in cases {
        let result = evaluator().evaluate(sentence, &decoded).unwrap();
        assert!(
            (0.0..=1.0).contains(&result.total_score),
            "{sentence}: total {}",
            result.total_score
        );
        for word in &result.words {
            assert!(
                (0.0..=1.0).contains(&word.score),
                "{sentence}/{}: {}",
                word.word,
                word.score
            );
        }
    }
}

#[test]
fn concatenated_alignment_is_opcode_consistent() {
    let reference = [
        WordReference::new("to", &["t", "uː"]),
        WordReference::new("the", &["ð", "iː"]),
        WordReference::new("store", &["s", "t", "ɔːɹ"]),
    ];
    let decoded = preds(&[
        ("t", 0.9),
        ("ə", 0.9),
        ("ð", 0.9),
        ("s", 0.9),
        ("t", 0.9),
        ("ɔːɹ", 0.9),
        ("s", 0.9),
    ]);
    let words = score_words(&reference, &decoded);

    let targets: Vec<String> = words
        .iter()
        .flat_map(|w| w.aligned.iter())
        .filter(|a| a.kind != AlignedKind::Insert)
        .filter_map(|a| a.target.clone())
        .collect();
    let expected_targets: Vec<String> = reference
        .iter()
        .flat_map(|w| w.phonemes.iter().cloned())
        .collect();
    assert_eq!(targets, expected_targets);

    let actuals: Vec<String> = words
        .iter()
        .flat_map(|w| w.aligned.iter())
        .filter(|a| a.kind != AlignedKind::Delete)
        .filter_map(|a| a.actual.clone())
        .collect();
    let expected_actuals: Vec<String> =
        decoded.iter().map(|p| p.phoneme.clone()).collect();
    assert_eq!(actuals, expected_actuals);
}

#[test]
fn reading_the_reference_perfectly_scores_one() {
    let synth = LexiconSynthesizer::bundled().unwrap();
    for sentence in ["hello world", "good morning", "the food"] {
        let us = synth.synthesize(sentence, "en-us").unwrap();
        let decoded: Vec<PhonemePrediction> = us
            .iter()
            .flatten()
            .map(|p| PhonemePrediction::new(p.clone(), 1.0))
            .collect();
        let result = evaluator().evaluate(sentence, &decoded).unwrap();
        assert!(
            (result.total_score - 1.0).abs() < 1e-6,
            "{sentence}: {}",
            result.total_score
        );
        for slot in result.words.iter().flat_map(|w| w.aligned.iter()) {
            assert_eq!(slot.kind, AlignedKind::Match);
            assert!((slot.score - 1.0).abs() < 1e-6);
        }
    }
}

#[test]
fn raising_confidence_never_lowers_the_total() {
    let low = evaluator()
        .evaluate("food", &preds(&[("f", 0.5), ("uː", 0.8), ("d", 0.8)]))
        .unwrap();
    let high = evaluator()
        .evaluate("food", &preds(&[("f", 0.9), ("uː", 0.8), ("d", 0.8)]))
        .unwrap();
    assert!(high.total_score >= low.total_score);
}

#[test]
fn adding_a_dialect_never_lowers_a_word_score() {
    let words = vec!["car".to_string()];
    let us_ref: Vec<Vec<String>> = vec![vec!["k".into(), "ɑːɹ".into()]];
    let uk_ref: Vec<Vec<String>> = vec![vec!["k".into(), "ɑː".into()]];
    let decoded = preds(&[("k", 0.9), ("ɑː", 0.9)]);

    let mut us_only = HashMap::new();
    us_only.insert(Dialect::UsEnglish, us_ref.clone());
    let base = arbiter::evaluate(
        &ReferenceSet {
            words: words.clone(),
            dialects: us_only,
        },
        &decoded,
    );

    let mut both = HashMap::new();
    both.insert(Dialect::UsEnglish, us_ref);
    both.insert(Dialect::UkEnglish, uk_ref);
    let merged = arbiter::evaluate(
        &ReferenceSet {
            words,
            dialects: both,
        },
        &decoded,
    );

    for (a, b) in base.words.iter().zip(&merged.words) {
        assert!(b.score >= a.score, "{} fell from {} to {}", a.word, a.score, b.score);
    }
    assert!(merged.total_score >= base.total_score);
}

#[test]
fn strict_mode_never_scores_above_lenient_for_the_same_tokens() {
    let decoded = preds(&[("t", 0.9), ("ə", 0.9)]);
    // "to" is in the function-word table; "two" carries the same phonemes
    // but scores strictly
    let lenient = score_words(&[WordReference::new("to", &["t", "uː"])], &decoded);
    let strict = score_words(&[WordReference::new("two", &["t", "uː"])], &decoded);
    assert!(strict[0].score <= lenient[0].score);
}
