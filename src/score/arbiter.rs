//! Scores the utterance against every reference dialect and merges the
//! per-word maxima, so speakers may mix dialect features freely.

use tracing::{debug, info};

use crate::reference::ReferenceSet;
use crate::score::{score_words, WordReference};
use crate::types::{AlignedPhoneme, Dialect, PhonemePrediction, PronunciationEvalResult, WordScore};

/// Merges per-dialect scoring into the final evaluation.
///
/// Dialects are visited in [`Dialect::ALL`] order and a later dialect
/// replaces a word only on a strictly greater score, so ties keep the
/// US variant. A dialect whose word count disagrees with the target
/// tokenization drops the merge to whole-sentence arbitration.
pub fn evaluate(reference: &ReferenceSet, decoded: &[PhonemePrediction]) -> PronunciationEvalResult {
    if reference.words.is_empty() {
        return PronunciationEvalResult::default();
    }
    if decoded.is_empty() {
        return silent_result(reference);
    }

    let aligned_dialects: Vec<(Dialect, Vec<WordReference>)> = Dialect::ALL
        .iter()
        .filter_map(|dialect| {
            let phonemes = reference.dialects.get(dialect)?;
            if phonemes.len() != reference.words.len() {
                return None;
            }
            Some((*dialect, word_references(&reference.words, phonemes)))
        })
        .collect();

    if aligned_dialects.len() != reference.dialects.len() {
        return whole_sentence_fallback(reference, decoded);
    }

    let mut merged: Vec<WordScore> = Vec::new();
    for (dialect, words) in &aligned_dialects {
        let scored = score_words(words, decoded);
        debug!(
            voice = dialect.voice(),
            total = mean_score(&scored),
            "scored dialect candidate"
        );
        if merged.is_empty() {
            merged = scored;
            continue;
        }
        for (slot, candidate) in merged.iter_mut().zip(scored) {
            if candidate.score > slot.score {
                *slot = candidate;
            }
        }
    }

    let result = PronunciationEvalResult::from_words(merged);
    info!(total_score = result.total_score, words = result.words.len(), "evaluation merged");
    result
}

/// Word counts disagree across dialects: score each dialect against its
/// own segmentation and keep the best whole sentence.
fn whole_sentence_fallback(
    reference: &ReferenceSet,
    decoded: &[PhonemePrediction],
) -> PronunciationEvalResult {
    debug!("dialect word counts disagree; falling back to whole-sentence arbitration");
    let mut best: Option<PronunciationEvalResult> = None;
    for dialect in Dialect::ALL {
        let Some(phonemes) = reference.dialects.get(&dialect) else {
            continue;
        };
        let words: Vec<WordReference> = phonemes
            .iter()
            .enumerate()
            .map(|(i, group)| WordReference {
                word: reference
                    .words
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| group.concat()),
                phonemes: group.clone(),
            })
            .collect();
        let candidate = PronunciationEvalResult::from_words(score_words(&words, decoded));
        let better = best
            .as_ref()
            .map_or(true, |b| candidate.total_score > b.total_score);
        if better {
            best = Some(candidate);
        }
    }
    best.unwrap_or_default()
}

/// No decoded audio: every target phoneme is a "no audio" deletion.
fn silent_result(reference: &ReferenceSet) -> PronunciationEvalResult {
    let phonemes = Dialect::ALL
        .iter()
        .find_map(|dialect| reference.dialects.get(dialect))
        .cloned()
        .unwrap_or_else(|| reference.words.iter().map(|_| Vec::new()).collect());
    let words = reference
        .words
        .iter()
        .zip(phonemes)
        .map(|(word, group)| WordScore {
            word: word.clone(),
            score: 0.0,
            aligned: group
                .iter()
                .map(|p| AlignedPhoneme::deleted(p.as_str()).with_note("no audio"))
                .collect(),
        })
        .collect();
    PronunciationEvalResult {
        total_score: 0.0,
        words,
    }
}

fn word_references(words: &[String], phonemes: &[Vec<String>]) -> Vec<WordReference> {
    words
        .iter()
        .zip(phonemes)
        .map(|(word, group)| WordReference {
            word: word.clone(),
            phonemes: group.clone(),
        })
        .collect()
}

fn mean_score(words: &[WordScore]) -> f32 {
    if words.is_empty() {
        return 0.0;
    }
    words.iter().map(|w| w.score).sum::<f32>() / words.len() as f32
}
