//! Grapheme-to-phoneme collaborators.
//!
//! The scoring core only depends on the [`PhonemeSynthesizer`] trait; an
//! embedded synthesizer binary can be wired in from the outside. The
//! bundled lexicon implementation backs tests and the CLI.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::{EvalError, Result};

const RAW_LEXICON_EN_US: &str = include_str!("../../assets/lexicon/en-us.txt");
const RAW_LEXICON_EN_GB: &str = include_str!("../../assets/lexicon/en-gb.txt");
const RAW_LEXICON_EN: &str = include_str!("../../assets/lexicon/en.txt");

/// Shared bundled synthesizer instance.
pub static BUNDLED_SYNTHESIZER: Lazy<LexiconSynthesizer> = Lazy::new(|| {
    LexiconSynthesizer::bundled()
        .unwrap_or_else(|err| panic!("failed to initialize bundled lexicon: {err}"))
});

/// Pure text-to-phonemes conversion for one dialect voice.
///
/// Implementations must return one phoneme list per whitespace-separated
/// word of `text`, in order. Stress markers may be included; the
/// reference generator strips them.
pub trait PhonemeSynthesizer: Send + Sync {
    fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<Vec<String>>>;
}

/// Lexicon-backed synthesizer over the bundled per-voice word lists.
#[derive(Debug, Clone)]
pub struct LexiconSynthesizer {
    voices: HashMap<&'static str, HashMap<String, Vec<String>>>,
}

impl LexiconSynthesizer {
    /// Parses the three bundled voice lexicons.
    pub fn bundled() -> Result<Self> {
        let mut voices = HashMap::new();
        voices.insert("en-us", parse_lexicon(RAW_LEXICON_EN_US)?);
        voices.insert("en-gb", parse_lexicon(RAW_LEXICON_EN_GB)?);
        voices.insert("en", parse_lexicon(RAW_LEXICON_EN)?);
        Ok(Self { voices })
    }

    /// Returns a handle to the globally shared bundled instance.
    pub fn shared() -> &'static Self {
        &BUNDLED_SYNTHESIZER
    }

    fn lookup(&self, voice: &str, word: &str) -> Result<Vec<String>> {
        let entries = self
            .voices
            .get(voice)
            .ok_or_else(|| EvalError::G2pFailure(format!("unknown voice \"{voice}\"")))?;
        entries
            .get(word)
            .cloned()
            .ok_or_else(|| EvalError::G2pFailure(format!("no entry for \"{word}\" ({voice})")))
    }
}

impl PhonemeSynthesizer for LexiconSynthesizer {
    fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<Vec<String>>> {
        text.split_whitespace()
            .map(|word| self.lookup(voice, word))
            .collect()
    }
}

fn parse_lexicon(data: &'static str) -> Result<HashMap<String, Vec<String>>> {
    let mut entries = HashMap::new();
    for (idx, line) in data.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') {
            continue;
        }
        let mut parts = trimmed.split_whitespace();
        let word = parts.next().ok_or_else(|| {
            EvalError::G2pFailure(format!("lexicon line {idx} missing word column"))
        })?;
        let phonemes: Vec<String> = parts.map(str::to_string).collect();
        if phonemes.is_empty() {
            return Err(EvalError::G2pFailure(format!(
                "lexicon line {idx} missing phonemes for {word}"
            )));
        }
        entries.insert(word.to_string(), phonemes);
    }
    if entries.is_empty() {
        return Err(EvalError::G2pFailure("bundled lexicon is empty".into()));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_voices_parse() {
        let synth = LexiconSynthesizer::bundled().unwrap();
        let us = synth.synthesize("hello world", "en-us").unwrap();
        assert_eq!(us.len(), 2);
        assert_eq!(us[0], vec!["h", "ə", "l", "oʊ"]);
        assert_eq!(us[1], vec!["w", "ɜːɹ", "l", "d"]);
    }

    #[test]
    fn voices_differ_on_rhoticity() {
        let synth = LexiconSynthesizer::shared();
        let us = synth.synthesize("car", "en-us").unwrap();
        let gb = synth.synthesize("car", "en-gb").unwrap();
        assert_eq!(us[0], vec!["k", "ɑːɹ"]);
        assert_eq!(gb[0], vec!["k", "ɑː"]);
    }

    #[test]
    fn unknown_word_is_a_g2p_failure() {
        let synth = LexiconSynthesizer::shared();
        assert!(matches!(
            synth.synthesize("zyzzyva", "en-us"),
            Err(EvalError::G2pFailure(_))
        ));
    }
}
