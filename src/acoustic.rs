//! Front-end for the external acoustic model: chunking, per-chunk
//! normalization, and overlap-aware logits assembly.
//!
//! The model itself is an injected collaborator. It consumes one
//! fixed-length window of 16 kHz mono samples and returns a `[T, V]`
//! logits tensor; everything around that call lives here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ndarray::{concatenate, Array2, Axis};
use tracing::debug;

use crate::Result;

pub const SAMPLE_RATE: u32 = 16_000;
/// Samples per model window (5 s at 16 kHz).
pub const CHUNK_SAMPLES: usize = 80_000;
/// Overlap between consecutive windows (0.5 s).
pub const OVERLAP_SAMPLES: usize = 8_000;
/// Input samples consumed per output frame by the reference model.
pub const FRAME_STRIDE: usize = 320;
/// Leading frames dropped from every chunk after the first.
pub const OVERLAP_FRAMES: usize = OVERLAP_SAMPLES / FRAME_STRIDE;

const NORM_EPSILON: f32 = 1e-5;

/// Pure prediction function over one sample window.
pub trait AcousticModel: Send + Sync {
    /// Maps `CHUNK_SAMPLES` normalized samples to a `[T, V]` logits
    /// tensor.
    fn predict(&self, samples: &[f32]) -> Result<Array2<f32>>;
}

/// Cooperative cancellation checked between chunk inferences.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Splits samples into overlapping windows, normalizing each to zero
/// mean and unit variance and zero-padding the tail window.
pub fn chunk_samples(samples: &[f32]) -> Vec<Vec<f32>> {
    if samples.is_empty() {
        return Vec::new();
    }
    let step = CHUNK_SAMPLES - OVERLAP_SAMPLES;
    let mut chunks = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + CHUNK_SAMPLES).min(samples.len());
        let mut chunk = normalize(&samples[start..end]);
        chunk.resize(CHUNK_SAMPLES, 0.0);
        chunks.push(chunk);
        if end == samples.len() {
            break;
        }
        start += step;
    }
    chunks
}

/// Runs the model over every chunk and splices the logits streams,
/// dropping each non-initial chunk's leading overlap frames.
///
/// Cancellation between chunks yields an empty logits tensor, which the
/// decoder turns into the empty-prediction degraded result.
pub fn infer_logits(
    model: &dyn AcousticModel,
    samples: &[f32],
    cancel: &CancelToken,
) -> Result<Array2<f32>> {
    let chunks = chunk_samples(samples);
    let mut pieces: Vec<Array2<f32>> = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        if cancel.is_cancelled() {
            debug!(chunks_done = index, "inference cancelled between chunks");
            return Ok(Array2::zeros((0, 0)));
        }
        let logits = model.predict(chunk)?;
        let piece = if index == 0 {
            logits
        } else {
            let skip = OVERLAP_FRAMES.min(logits.nrows());
            logits.slice_axis(Axis(0), ndarray::Slice::from(skip..)).to_owned()
        };
        pieces.push(piece);
    }
    if pieces.is_empty() {
        return Ok(Array2::zeros((0, 0)));
    }
    let views: Vec<_> = pieces.iter().map(|p| p.view()).collect();
    let joined = concatenate(Axis(0), &views).map_err(|err| {
        crate::EvalError::ModelFailure(format!("inconsistent chunk logits shapes: {err}"))
    })?;
    debug!(
        frames = joined.nrows(),
        vocab = joined.ncols(),
        "spliced chunk logits"
    );
    Ok(joined)
}

fn normalize(samples: &[f32]) -> Vec<f32> {
    let len = samples.len() as f32;
    let mean = samples.iter().copied().sum::<f32>() / len;
    let variance = samples
        .iter()
        .map(|s| {
            let d = s - mean;
            d * d
        })
        .sum::<f32>()
        / len;
    let scale = (variance + NORM_EPSILON).sqrt();
    samples.iter().map(|s| (s - mean) / scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_audio_yields_one_padded_chunk() {
        let samples = vec![0.25_f32; SAMPLE_RATE as usize];
        let chunks = chunk_samples(&samples);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), CHUNK_SAMPLES);
        assert_eq!(chunks[0][SAMPLE_RATE as usize], 0.0);
    }

    #[test]
    fn long_audio_overlaps_by_half_a_second() {
        let samples: Vec<f32> = (0..CHUNK_SAMPLES + 40_000)
            .map(|i| (i as f32 * 0.001).sin())
            .collect();
        let chunks = chunk_samples(&samples);
        assert_eq!(chunks.len(), 2);
    }

    #[test]
    fn normalization_is_zero_mean_unit_variance() {
        let samples: Vec<f32> = (0..1000).map(|i| (i % 7) as f32).collect();
        let normed = normalize(&samples);
        let mean = normed.iter().sum::<f32>() / normed.len() as f32;
        let var = normed.iter().map(|s| (s - mean) * (s - mean)).sum::<f32>()
            / normed.len() as f32;
        assert!(mean.abs() < 1e-4);
        assert!((var - 1.0).abs() < 1e-2);
    }

    #[test]
    fn overlap_frames_match_stride_arithmetic() {
        assert_eq!(OVERLAP_FRAMES, 25);
    }

    struct CountingModel;

    impl AcousticModel for CountingModel {
        fn predict(&self, samples: &[f32]) -> crate::Result<Array2<f32>> {
            assert_eq!(samples.len(), CHUNK_SAMPLES);
            Ok(Array2::zeros((249, 4)))
        }
    }

    #[test]
    fn splice_drops_leading_overlap_frames() {
        let samples = vec![0.1_f32; CHUNK_SAMPLES + 72_000];
        let logits = infer_logits(&CountingModel, &samples, &CancelToken::new()).unwrap();
        assert_eq!(logits.nrows(), 249 + 249 - OVERLAP_FRAMES);
    }

    #[test]
    fn cancellation_returns_empty_logits() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let samples = vec![0.1_f32; CHUNK_SAMPLES];
        let logits = infer_logits(&CountingModel, &samples, &cancel).unwrap();
        assert_eq!(logits.nrows(), 0);
    }
}
