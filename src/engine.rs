//! Evaluation entry points wiring the pipeline together.
//!
//! The evaluator owns injected handles to its collaborators and is
//! otherwise stateless; one instance may serve concurrent scoring calls.

use std::sync::Arc;

use ndarray::Array2;
use tracing::{debug, info};

use crate::acoustic::{self, AcousticModel, CancelToken};
use crate::decoder::{self, filter::filter_artifacts};
use crate::reference::{PhonemeSynthesizer, ReferenceGenerator};
use crate::score::arbiter;
use crate::types::{PhonemePrediction, PronunciationEvalResult};
use crate::vocab::Vocabulary;
use crate::{EvalError, Result};

/// Pronunciation evaluator over injected collaborator handles.
pub struct Evaluator {
    generator: ReferenceGenerator,
    vocab: Option<Arc<Vocabulary>>,
    model: Option<Arc<dyn AcousticModel>>,
}

impl Evaluator {
    /// Builds an evaluator that scores pre-decoded phoneme streams.
    pub fn new(synthesizer: Arc<dyn PhonemeSynthesizer>) -> Self {
        Self {
            generator: ReferenceGenerator::new(synthesizer),
            vocab: None,
            model: None,
        }
    }

    /// Enables the logits and raw-audio entry points.
    pub fn with_acoustic_model(
        mut self,
        vocab: Arc<Vocabulary>,
        model: Arc<dyn AcousticModel>,
    ) -> Self {
        self.vocab = Some(vocab);
        self.model = Some(model);
        self
    }

    /// Enables the logits entry point without a model handle.
    pub fn with_vocabulary(mut self, vocab: Arc<Vocabulary>) -> Self {
        self.vocab = Some(vocab);
        self
    }

    /// Scores an already-decoded phoneme stream against `sentence`.
    pub fn evaluate(
        &self,
        sentence: &str,
        decoded: &[PhonemePrediction],
    ) -> Result<PronunciationEvalResult> {
        let reference = self.generator.generate(sentence)?;
        if reference.words.is_empty() {
            return Ok(PronunciationEvalResult::default());
        }
        let filtered = filter_artifacts(decoded);
        debug!(
            raw = decoded.len(),
            filtered = filtered.len(),
            words = reference.words.len(),
            "scoring decoded stream"
        );
        let result = arbiter::evaluate(&reference, &filtered);
        info!(total_score = result.total_score, "evaluation complete");
        Ok(result)
    }

    /// Collapses a spliced `[T, V]` logits tensor, then scores it.
    pub fn evaluate_logits(
        &self,
        sentence: &str,
        logits: &Array2<f32>,
    ) -> Result<PronunciationEvalResult> {
        let vocab = self.vocab.as_ref().ok_or_else(|| {
            EvalError::VocabularyMissing("evaluator built without a vocabulary".into())
        })?;
        let decoded = decoder::decode(logits, vocab);
        self.evaluate(sentence, &decoded)
    }

    /// Runs the full audio path: chunked inference, CTC collapse,
    /// artifact filtering, and scoring.
    pub fn evaluate_samples(
        &self,
        sentence: &str,
        samples: &[f32],
        cancel: &CancelToken,
    ) -> Result<PronunciationEvalResult> {
        let model = self.model.as_ref().ok_or_else(|| {
            EvalError::ModelFailure("evaluator built without an acoustic model".into())
        })?;
        let logits = acoustic::infer_logits(model.as_ref(), samples, cancel)?;
        self.evaluate_logits(sentence, &logits)
    }
}
