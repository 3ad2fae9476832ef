//! Greedy CTC collapse over spliced frame logits.
//!
//! Each frame's argmax is compared against the previous frame's id;
//! blanks are skipped and repeats collapse into one token. A collapsed
//! token's confidence is the softmax probability of the argmax at the
//! frame where its run began.

pub mod filter;

use ndarray::{Array2, ArrayView1};
use tracing::debug;

use crate::types::{PhonemePrediction, TokenCandidate};
use crate::vocab::Vocabulary;

/// Candidates retained per collapsed token.
pub const TOP_K: usize = 3;

/// Collapses a `[T, V]` logits tensor into per-token predictions.
pub fn decode(logits: &Array2<f32>, vocab: &Vocabulary) -> Vec<PhonemePrediction> {
    let mut predictions = Vec::new();
    let mut previous_id = vocab.blank_id();
    for frame in logits.rows() {
        let id = argmax(frame);
        if id != previous_id && !vocab.is_special(id) {
            if let Some(prediction) = prediction_at(frame, id, vocab) {
                predictions.push(prediction);
            }
        }
        previous_id = id;
    }
    debug!(
        frames = logits.nrows(),
        tokens = predictions.len(),
        "collapsed logits stream"
    );
    predictions
}

fn prediction_at(frame: ArrayView1<f32>, id: usize, vocab: &Vocabulary) -> Option<PhonemePrediction> {
    let token = vocab.token(id)?;
    let probs = softmax(frame);
    let top_k = top_candidates(&probs, vocab);
    Some(PhonemePrediction::new(token, probs[id]).with_top_k(top_k))
}

fn argmax(frame: ArrayView1<f32>) -> usize {
    let mut best = 0;
    let mut best_value = f32::NEG_INFINITY;
    for (id, &value) in frame.iter().enumerate() {
        if value > best_value {
            best = id;
            best_value = value;
        }
    }
    best
}

fn softmax(frame: ArrayView1<f32>) -> Vec<f32> {
    let max = frame.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = frame.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

fn top_candidates(probs: &[f32], vocab: &Vocabulary) -> Vec<TokenCandidate> {
    let mut ranked: Vec<(usize, f32)> = probs
        .iter()
        .copied()
        .enumerate()
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
        .into_iter()
        .filter_map(|(id, confidence)| {
            vocab.token(id).map(|token| TokenCandidate {
                phoneme: token.to_string(),
                confidence,
            })
        })
        .take(TOP_K)
        .collect()
}
