//! Core value types shared across the scoring pipeline.

use serde::{Deserialize, Serialize};

/// One candidate token with its softmax probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenCandidate {
    pub phoneme: String,
    pub confidence: f32,
}

/// A collapsed per-token prediction emitted by the CTC decoder.
///
/// `phoneme`/`confidence` are the argmax at the frame where the token's
/// run began; `top_k` holds the leading candidates at that frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhonemePrediction {
    pub phoneme: String,
    pub confidence: f32,
    #[serde(default)]
    pub top_k: Vec<TokenCandidate>,
}

impl PhonemePrediction {
    pub fn new(phoneme: impl Into<String>, confidence: f32) -> Self {
        Self {
            phoneme: phoneme.into(),
            confidence,
            top_k: Vec::new(),
        }
    }

    pub fn with_top_k(mut self, top_k: Vec<TokenCandidate>) -> Self {
        self.top_k = top_k;
        self
    }
}

/// How one aligned slot relates target and actual phonemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignedKind {
    /// Exact match or a credited variant (dialect, reduction, rhotic, ...).
    Match,
    /// A genuine mispronunciation.
    Replace,
    /// Target phoneme with no aligned actual.
    Delete,
    /// Extra actual phoneme with no target.
    Insert,
}

/// One slot of the explanatory alignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPhoneme {
    pub kind: AlignedKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    pub score: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AlignedPhoneme {
    pub fn matched(target: impl Into<String>, actual: impl Into<String>, score: f32) -> Self {
        Self {
            kind: AlignedKind::Match,
            target: Some(target.into()),
            actual: Some(actual.into()),
            score,
            note: None,
        }
    }

    pub fn replaced(target: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            kind: AlignedKind::Replace,
            target: Some(target.into()),
            actual: Some(actual.into()),
            score: 0.0,
            note: None,
        }
    }

    pub fn deleted(target: impl Into<String>) -> Self {
        Self {
            kind: AlignedKind::Delete,
            target: Some(target.into()),
            actual: None,
            score: 0.0,
            note: None,
        }
    }

    pub fn inserted(actual: impl Into<String>, score: f32) -> Self {
        Self {
            kind: AlignedKind::Insert,
            target: None,
            actual: Some(actual.into()),
            score,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Aggregate score for one orthographic word of the target sentence.
///
/// `aligned` covers exactly the word's target phonemes plus any trailing
/// inserts attributed to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordScore {
    pub word: String,
    pub score: f32,
    pub aligned: Vec<AlignedPhoneme>,
}

/// The full evaluation returned to callers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PronunciationEvalResult {
    pub total_score: f32,
    pub words: Vec<WordScore>,
}

impl PronunciationEvalResult {
    /// Builds a result whose total is the arithmetic mean of word scores.
    pub fn from_words(words: Vec<WordScore>) -> Self {
        let total_score = if words.is_empty() {
            0.0
        } else {
            words.iter().map(|w| w.score).sum::<f32>() / words.len() as f32
        };
        Self { total_score, words }
    }
}

/// Reference dialect variants the arbiter considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    UsEnglish,
    UkEnglish,
    Neutral,
}

impl Dialect {
    /// Arbitration order; earlier entries win per-word ties.
    pub const ALL: [Dialect; 3] = [Dialect::UsEnglish, Dialect::UkEnglish, Dialect::Neutral];

    /// Synthesizer voice identifier for this dialect.
    pub fn voice(self) -> &'static str {
        match self {
            Dialect::UsEnglish => "en-us",
            Dialect::UkEnglish => "en-gb",
            Dialect::Neutral => "en",
        }
    }
}
