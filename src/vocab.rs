//! CTC vocabulary: an immutable bijection between token ids and
//! IPA-like phoneme strings, loaded once at startup.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::{EvalError, Result};

/// Id reserved for the CTC blank.
pub const BLANK_ID: usize = 0;

#[derive(Debug, Deserialize)]
struct VocabFile {
    vocab_size: usize,
    id_to_token: HashMap<String, String>,
    #[serde(default)]
    special_tokens: SpecialTokens,
}

#[derive(Debug, Default, Deserialize)]
struct SpecialTokens {
    #[serde(default)]
    pad: Option<String>,
    #[serde(default)]
    unk: Option<String>,
}

/// Immutable id↔token mapping for the acoustic model's output layer.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    tokens: Vec<String>,
    ids: HashMap<String, usize>,
    pad_token: Option<String>,
    unk_token: Option<String>,
}

impl Vocabulary {
    /// Loads the vocabulary from its JSON asset.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| {
            EvalError::VocabularyMissing(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    /// Parses the vocabulary from raw JSON.
    pub fn from_json(raw: &str) -> Result<Self> {
        let file: VocabFile = serde_json::from_str(raw)
            .map_err(|err| EvalError::VocabularyMissing(format!("malformed vocabulary: {err}")))?;

        if file.vocab_size == 0 {
            return Err(EvalError::VocabularyMissing(
                "vocabulary declares zero tokens".into(),
            ));
        }

        let mut tokens = vec![String::new(); file.vocab_size];
        for (key, token) in &file.id_to_token {
            let id: usize = key.parse().map_err(|_| {
                EvalError::VocabularyMissing(format!("non-numeric token id \"{key}\""))
            })?;
            if id >= file.vocab_size {
                return Err(EvalError::VocabularyMissing(format!(
                    "token id {id} exceeds declared vocab_size {}",
                    file.vocab_size
                )));
            }
            tokens[id] = token.clone();
        }

        let ids = tokens
            .iter()
            .enumerate()
            .map(|(id, token)| (token.clone(), id))
            .collect();

        Ok(Self {
            tokens,
            ids,
            pad_token: file.special_tokens.pad,
            unk_token: file.special_tokens.unk,
        })
    }

    pub fn vocab_size(&self) -> usize {
        self.tokens.len()
    }

    /// Token string for `id`, if in range.
    pub fn token(&self, id: usize) -> Option<&str> {
        self.tokens.get(id).map(String::as_str)
    }

    pub fn id_of(&self, token: &str) -> Option<usize> {
        self.ids.get(token).copied()
    }

    pub fn blank_id(&self) -> usize {
        BLANK_ID
    }

    /// True when `id` maps to the blank or a declared special token.
    pub fn is_special(&self, id: usize) -> bool {
        if id == BLANK_ID {
            return true;
        }
        match self.token(id) {
            Some(token) => {
                Some(token) == self.pad_token.as_deref()
                    || Some(token) == self.unk_token.as_deref()
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "vocab_size": 4,
        "id_to_token": {"0": "<pad>", "1": "ə", "2": "t", "3": "ɔː"},
        "special_tokens": {"pad": "<pad>", "unk": "<unk>", "bos": "<s>", "eos": "</s>"}
    }"#;

    #[test]
    fn parses_and_round_trips_ids() {
        let vocab = Vocabulary::from_json(SAMPLE).unwrap();
        assert_eq!(vocab.vocab_size(), 4);
        assert_eq!(vocab.token(3), Some("ɔː"));
        assert_eq!(vocab.id_of("t"), Some(2));
        assert_eq!(vocab.blank_id(), 0);
        assert!(vocab.is_special(0));
        assert!(!vocab.is_special(2));
    }

    #[test]
    fn rejects_out_of_range_ids() {
        let raw = r#"{"vocab_size": 1, "id_to_token": {"5": "x"}}"#;
        assert!(matches!(
            Vocabulary::from_json(raw),
            Err(EvalError::VocabularyMissing(_))
        ));
    }

    #[test]
    fn rejects_empty_vocabulary() {
        let raw = r#"{"vocab_size": 0, "id_to_token": {}}"#;
        assert!(Vocabulary::from_json(raw).is_err());
    }
}
