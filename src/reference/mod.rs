//! Dialect reference generation: text normalization, per-word G2P, and
//! context-sensitive function-word corrections.

pub mod g2p;

pub use g2p::{LexiconSynthesizer, PhonemeSynthesizer};

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::rules::is_vowel;
use crate::types::Dialect;
use crate::{EvalError, Result};

/// Word-aligned reference pronunciations for a target sentence.
#[derive(Debug, Clone)]
pub struct ReferenceSet {
    /// Normalized orthographic words, in sentence order.
    pub words: Vec<String>,
    /// Per-dialect phoneme lists; outer length matches `words` for every
    /// dialect the synthesizer produced.
    pub dialects: HashMap<Dialect, Vec<Vec<String>>>,
}

/// Produces per-dialect references through an injected synthesizer.
pub struct ReferenceGenerator {
    synthesizer: Arc<dyn PhonemeSynthesizer>,
}

impl ReferenceGenerator {
    pub fn new(synthesizer: Arc<dyn PhonemeSynthesizer>) -> Self {
        Self { synthesizer }
    }

    /// Generates all dialect variants for `sentence`.
    ///
    /// Individual dialect failures are tolerated; the call fails only
    /// when no dialect produced a transcription.
    pub fn generate(&self, sentence: &str) -> Result<ReferenceSet> {
        let normalized = normalize_sentence(sentence);
        let words: Vec<String> = normalized.split_whitespace().map(str::to_string).collect();
        if words.is_empty() {
            return Ok(ReferenceSet {
                words,
                dialects: HashMap::new(),
            });
        }

        let mut dialects = HashMap::new();
        for dialect in Dialect::ALL {
            match self.synthesizer.synthesize(&normalized, dialect.voice()) {
                Ok(raw) => {
                    let mut phonemes = strip_stress(raw);
                    if phonemes.len() == words.len() {
                        apply_context_rules(&words, &mut phonemes, dialect);
                    }
                    debug!(
                        voice = dialect.voice(),
                        words = phonemes.len(),
                        "generated dialect reference"
                    );
                    dialects.insert(dialect, phonemes);
                }
                Err(err) => {
                    warn!(voice = dialect.voice(), error = %err, "dialect synthesis failed");
                }
            }
        }

        if dialects.is_empty() {
            return Err(EvalError::G2pFailure(format!(
                "no dialect produced a reference for \"{normalized}\""
            )));
        }
        Ok(ReferenceSet { words, dialects })
    }
}

/// Lowercases and strips punctuation, keeping apostrophes and hyphens so
/// word boundaries stay aligned with the synthesizer's.
pub fn normalize_sentence(sentence: &str) -> String {
    sentence
        .chars()
        .filter(|ch| ch.is_alphanumeric() || ch.is_whitespace() || matches!(ch, '\'' | '-'))
        .collect::<String>()
        .to_lowercase()
}

fn strip_stress(raw: Vec<Vec<String>>) -> Vec<Vec<String>> {
    raw.into_iter()
        .map(|word| {
            word.into_iter()
                .map(|token| token.replace(['ˈ', 'ˌ'], ""))
                .filter(|token| !token.is_empty())
                .collect()
        })
        .collect()
}

/// Rewrites citation forms of a fixed list of function words according
/// to their neighbors. Sentence-initial and sentence-final words are
/// emphatic and keep their citation form.
fn apply_context_rules(words: &[String], phonemes: &mut [Vec<String>], dialect: Dialect) {
    let last = words.len() - 1;
    for i in 0..words.len() {
        if i == 0 || i == last {
            continue;
        }
        let next_starts_with_vowel = phonemes
            .get(i + 1)
            .and_then(|word| word.first())
            .is_some_and(|token| is_vowel(token));
        let replacement: Option<Vec<&str>> = match words[i].as_str() {
            "a" => Some(vec!["ə"]),
            "an" => Some(vec!["ə", "n"]),
            "the" => {
                if next_starts_with_vowel {
                    Some(vec!["ð", "iː"])
                } else {
                    Some(vec!["ð", "ə"])
                }
            }
            "to" => Some(vec!["t", "ə"]),
            "and" => Some(vec!["ə", "n", "d"]),
            "of" => Some(vec!["ə", "v"]),
            "at" => Some(vec!["ə", "t"]),
            "from" => Some(vec!["f", "ɹ", "ə", "m"]),
            "was" => Some(vec!["w", "ə", "z"]),
            "can" => Some(vec!["k", "ə", "n"]),
            "for" => {
                if dialect == Dialect::UsEnglish {
                    Some(vec!["f", "ɚ"])
                } else {
                    Some(vec!["f", "ə"])
                }
            }
            _ => None,
        };
        if let Some(replacement) = replacement {
            phonemes[i] = replacement.into_iter().map(str::to_string).collect();
        }
    }
}
