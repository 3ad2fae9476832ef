//! Walks alignment opcodes and turns them into per-word scores.

pub mod arbiter;

use tracing::trace;

use crate::align::{align, EditKind, EditOperation};
use crate::rules::tables::{COALESCENCE, VOICING_PAIRS};
use crate::rules::{classify_variant, is_function_word, is_important, is_vowel, similar,
    strip_markers, VariantClass};
use crate::types::{AlignedPhoneme, PhonemePrediction, WordScore};

const INSERTION_PENALTY: f32 = 0.05;
const STRICT_VOWEL_PENALTY: f32 = 0.25;
const STRICT_CONSONANT_PENALTY: f32 = 0.20;
const LENIENT_PENALTY: f32 = 0.15;
const COARTICULATION_CREDIT: f32 = 0.60;
const GEMINATION_CREDIT: f32 = 0.70;

/// Target phonemes for one orthographic word.
#[derive(Debug, Clone)]
pub struct WordReference {
    pub word: String,
    pub phonemes: Vec<String>,
}

impl WordReference {
    pub fn new(word: impl Into<String>, phonemes: &[&str]) -> Self {
        Self {
            word: word.into(),
            phonemes: phonemes.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Scores the decoded phoneme stream against one dialect reference.
pub fn score_words(reference: &[WordReference], decoded: &[PhonemePrediction]) -> Vec<WordScore> {
    if reference.is_empty() {
        return Vec::new();
    }
    let targets: Vec<String> = reference
        .iter()
        .flat_map(|w| w.phonemes.iter().cloned())
        .collect();
    let actuals: Vec<String> = decoded.iter().map(|p| p.phoneme.clone()).collect();
    let steps = expand_steps(&align(&targets, &actuals));
    Walker::new(reference, &targets, decoded).run(&steps)
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Equal(usize, usize),
    Replace(usize, usize),
    Delete(usize),
    Insert(usize),
}

fn expand_steps(ops: &[EditOperation]) -> Vec<Step> {
    let mut steps = Vec::new();
    for op in ops {
        match op.kind {
            EditKind::Equal => {
                for (ti, ai) in op.target_range.clone().zip(op.actual_range.clone()) {
                    steps.push(Step::Equal(ti, ai));
                }
            }
            EditKind::Replace => {
                for (ti, ai) in op.target_range.clone().zip(op.actual_range.clone()) {
                    steps.push(Step::Replace(ti, ai));
                }
            }
            EditKind::Delete => {
                for ti in op.target_range.clone() {
                    steps.push(Step::Delete(ti));
                }
            }
            EditKind::Insert => {
                for ai in op.actual_range.clone() {
                    steps.push(Step::Insert(ai));
                }
            }
        }
    }
    steps
}

struct Walker<'a> {
    reference: &'a [WordReference],
    targets: &'a [String],
    decoded: &'a [PhonemePrediction],
    boundaries: Vec<usize>,
    words: Vec<WordScore>,
    word_i: usize,
    target_i: usize,
    actual_i: usize,
    sum: f32,
    count: usize,
    insertions: usize,
    mispron_total: usize,
    mispron_vowel: usize,
    aligned: Vec<AlignedPhoneme>,
}

impl<'a> Walker<'a> {
    fn new(
        reference: &'a [WordReference],
        targets: &'a [String],
        decoded: &'a [PhonemePrediction],
    ) -> Self {
        let mut boundaries = Vec::with_capacity(reference.len());
        let mut cumulative = 0;
        for word in reference {
            cumulative += word.phonemes.len();
            boundaries.push(cumulative);
        }
        Self {
            reference,
            targets,
            decoded,
            boundaries,
            words: Vec::with_capacity(reference.len()),
            word_i: 0,
            target_i: 0,
            actual_i: 0,
            sum: 0.0,
            count: 0,
            insertions: 0,
            mispron_total: 0,
            mispron_vowel: 0,
            aligned: Vec::new(),
        }
    }

    fn run(mut self, steps: &[Step]) -> Vec<WordScore> {
        self.close_completed_words();
        let mut s = 0;
        while s < steps.len() {
            let consumed_target = self.apply(steps[s]);
            s += 1;
            if consumed_target && self.word_complete() {
                // trailing inserts belong to the word just finished
                while let Some(Step::Insert(ai)) = steps.get(s) {
                    self.apply(Step::Insert(*ai));
                    s += 1;
                }
                self.close_word();
                self.close_completed_words();
            }
        }
        while self.word_i < self.reference.len() {
            self.close_word();
        }
        self.words
    }

    /// Words with no target phonemes complete without consuming a step.
    fn close_completed_words(&mut self) {
        while self.word_i < self.reference.len() && self.word_complete() {
            self.close_word();
        }
    }

    fn apply(&mut self, step: Step) -> bool {
        match step {
            Step::Equal(ti, ai) => {
                let confidence = self.decoded[ai].confidence.clamp(0.0, 1.0);
                self.aligned.push(AlignedPhoneme::matched(
                    self.targets[ti].as_str(),
                    self.decoded[ai].phoneme.as_str(),
                    confidence,
                ));
                self.sum += confidence;
                self.count += 1;
                self.target_i += 1;
                self.actual_i += 1;
                true
            }
            Step::Replace(ti, ai) => {
                self.score_replace(ti, ai);
                self.target_i += 1;
                self.actual_i += 1;
                true
            }
            Step::Delete(ti) => {
                self.score_delete(ti);
                self.target_i += 1;
                true
            }
            Step::Insert(ai) => {
                let confidence = self.decoded[ai].confidence.clamp(0.0, 1.0);
                self.aligned.push(AlignedPhoneme::inserted(
                    self.decoded[ai].phoneme.as_str(),
                    confidence,
                ));
                self.insertions += 1;
                self.actual_i += 1;
                false
            }
        }
    }

    fn score_replace(&mut self, ti: usize, ai: usize) {
        let target = self.targets[ti].clone();
        let actual = self.decoded[ai].phoneme.clone();
        let confidence = self.decoded[ai].confidence.clamp(0.0, 1.0);
        let word = self.reference[self.word_i].word.to_lowercase();
        let strict = !is_function_word(&word);
        let word_final = self.target_i + 1 == self.boundaries[self.word_i];

        if similar(&target, &actual, Some(&word), strict, word_final) {
            let class = classify_variant(&target, &actual, Some(&word), word_final);
            let (min, max, threshold) = credit_band(class, strict);
            if confidence >= threshold {
                let credit = confidence.clamp(min, max);
                trace!(%target, %actual, class = ?class, credit, "credited variant");
                let mut record = AlignedPhoneme::matched(target, actual, credit);
                if let Some(note) = variant_note(class) {
                    record = record.with_note(note);
                }
                self.aligned.push(record);
                self.sum += credit;
                self.count += 1;
                return;
            }
        }
        self.record_mispronunciation(&target, &actual);
    }

    fn record_mispronunciation(&mut self, target: &str, actual: &str) {
        self.aligned.push(AlignedPhoneme::replaced(target, actual));
        self.count += 1;
        self.mispron_total += 1;
        if is_vowel(target) {
            self.mispron_vowel += 1;
        }
    }

    fn score_delete(&mut self, ti: usize) {
        let target = &self.targets[ti];
        let base = strip_markers(target);

        if let Some(coalesced) = COALESCENCE.get(base.as_str()) {
            let next_is_j = self
                .targets
                .get(ti + 1)
                .is_some_and(|next| strip_markers(next) == "j");
            if next_is_j && self.nearby_actual_in(coalesced) {
                self.aligned.push(
                    AlignedPhoneme::matched(target.as_str(), base.as_str(), COARTICULATION_CREDIT)
                        .with_note("coarticulation"),
                );
                self.sum += COARTICULATION_CREDIT;
                self.count += 1;
                return;
            }
        }

        if !is_vowel(target) {
            let geminate = self.targets.get(ti + 1).is_some_and(|next| {
                let next_base = strip_markers(next);
                next_base == base
                    || VOICING_PAIRS
                        .get(base.as_str())
                        .is_some_and(|set| set.contains(next_base.as_str()))
            });
            if geminate {
                self.aligned.push(
                    AlignedPhoneme::matched(target.as_str(), base.as_str(), GEMINATION_CREDIT)
                        .with_note("gemination"),
                );
                self.sum += GEMINATION_CREDIT;
                self.count += 1;
                return;
            }
        }

        self.aligned.push(AlignedPhoneme::deleted(target.as_str()));
        if is_important(target) {
            self.count += 1;
        }
    }

    fn nearby_actual_in(&self, coalesced: &crate::rules::tables::VariantSet) -> bool {
        let start = self.actual_i.saturating_sub(1);
        let end = (self.actual_i + 2).min(self.decoded.len());
        self.decoded[start..end]
            .iter()
            .any(|p| coalesced.contains(strip_markers(&p.phoneme).as_str()))
    }

    fn word_complete(&self) -> bool {
        self.target_i == self.boundaries[self.word_i]
    }

    fn close_word(&mut self) {
        let word = &self.reference[self.word_i].word;
        let strict = !is_function_word(&word.to_lowercase());
        let mut raw = if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f32
        };
        raw -= self.insertions.saturating_sub(1) as f32 * INSERTION_PENALTY;
        if strict {
            raw -= self.mispron_vowel as f32 * STRICT_VOWEL_PENALTY;
            raw -= (self.mispron_total - self.mispron_vowel) as f32 * STRICT_CONSONANT_PENALTY;
        } else {
            raw -= self.mispron_total as f32 * LENIENT_PENALTY;
        }
        self.words.push(WordScore {
            word: word.clone(),
            score: raw.clamp(0.0, 1.0),
            aligned: std::mem::take(&mut self.aligned),
        });
        self.word_i += 1;
        self.sum = 0.0;
        self.count = 0;
        self.insertions = 0;
        self.mispron_total = 0;
        self.mispron_vowel = 0;
    }
}

fn credit_band(class: VariantClass, strict: bool) -> (f32, f32, f32) {
    match class {
        VariantClass::StrippedEqual => (0.0, 1.0, 0.0),
        VariantClass::Rhotic | VariantClass::WordFinalDevoicing => (0.55, 0.85, 0.10),
        VariantClass::FunctionWord => (0.50, 0.85, 0.10),
        VariantClass::CoreDialect => (0.60, 0.90, 0.10),
        VariantClass::Reduction => (0.50, 0.80, 0.10),
        VariantClass::WordFinalVoicing => (0.45, 0.80, 0.10),
        VariantClass::MidWordVoicing => (0.35, 0.60, 0.10),
        VariantClass::OtherSimilar => {
            if strict {
                (0.30, 0.50, 0.30)
            } else {
                (0.40, 0.70, 0.30)
            }
        }
    }
}

fn variant_note(class: VariantClass) -> Option<&'static str> {
    match class {
        VariantClass::StrippedEqual => None,
        VariantClass::Rhotic => Some("rhotic variant"),
        VariantClass::FunctionWord => Some("function-word reduction"),
        VariantClass::CoreDialect => Some("dialect variant"),
        VariantClass::Reduction => Some("unstressed reduction"),
        VariantClass::WordFinalDevoicing => Some("word-final devoicing"),
        VariantClass::WordFinalVoicing | VariantClass::MidWordVoicing => Some("voicing variant"),
        VariantClass::OtherSimilar => Some("close variant"),
    }
}
