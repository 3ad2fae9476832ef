//! Pronunciation scoring engine.
//!
//! Grades a speaker's rendition of a target sentence against reference
//! English dialect pronunciations. Frame-level acoustic-model output is
//! collapsed into phoneme predictions, aligned against per-dialect
//! references, and scored per phoneme, per word, and overall.

pub mod acoustic;
pub mod align;
pub mod cli;
pub mod config;
pub mod decoder;
pub mod engine;
pub mod reference;
pub mod rules;
pub mod score;
pub mod types;
pub mod vocab;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub use engine::Evaluator;
pub use types::{AlignedPhoneme, PhonemePrediction, PronunciationEvalResult, WordScore};

/// Convenient alias for results returned by the scoring pipeline.
pub type Result<T> = std::result::Result<T, EvalError>;

/// Errors that cross the engine boundary.
///
/// Empty audio and per-dialect reference word-count mismatches are not
/// errors; both degrade to a well-formed result inside the arbiter.
#[derive(Debug, Clone)]
pub enum EvalError {
    /// The acoustic model failed to produce logits for a chunk.
    ModelFailure(String),
    /// The reference generator produced no usable dialect transcription.
    G2pFailure(String),
    /// The CTC vocabulary could not be loaded or is malformed.
    VocabularyMissing(String),
}

impl Display for EvalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ModelFailure(msg) => write!(f, "acoustic model failure: {msg}"),
            Self::G2pFailure(msg) => write!(f, "reference generation failure: {msg}"),
            Self::VocabularyMissing(msg) => write!(f, "vocabulary unavailable: {msg}"),
        }
    }
}

impl Error for EvalError {}
