use std::fs;
use std::path::Path;
use std::sync::Arc;

use accentor::cli::{Cli, Command, EvaluateArgs};
use accentor::config::AssetsConfig;
use accentor::decoder;
use accentor::reference::LexiconSynthesizer;
use accentor::types::{PhonemePrediction, PronunciationEvalResult};
use accentor::vocab::Vocabulary;
use accentor::Evaluator;
use anyhow::{Context, Result};
use clap::Parser;
use ndarray::Array2;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Evaluate(args) => handle_evaluate(&args),
    }
}

fn handle_evaluate(args: &EvaluateArgs) -> Result<()> {
    args.validate()?;
    let evaluator = Evaluator::new(Arc::new(LexiconSynthesizer::bundled()?));

    let result = if let Some(path) = &args.predictions {
        let decoded = load_predictions(path)?;
        evaluator.evaluate(&args.sentence, &decoded)?
    } else if let Some(path) = &args.logits {
        let logits = load_logits(path)?;
        let config = AssetsConfig::from_override(args.assets_path.clone())?;
        let vocab = Vocabulary::load(config.vocab_path())?;
        let decoded = decoder::decode(&logits, &vocab);
        evaluator.evaluate(&args.sentence, &decoded)?
    } else {
        anyhow::bail!("provide --predictions or --logits");
    };

    print_result(&result, args.pretty)
}

fn load_predictions(path: &Path) -> Result<Vec<PhonemePrediction>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read predictions from {:?}", path))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse predictions JSON at {:?}", path))
}

#[derive(Debug, Deserialize)]
struct LogitsFile {
    logits: Vec<Vec<f32>>,
}

fn load_logits(path: &Path) -> Result<Array2<f32>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read logits from {:?}", path))?;
    let file: LogitsFile = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse logits JSON at {:?}", path))?;
    let rows = file.logits.len();
    let cols = file.logits.first().map_or(0, Vec::len);
    let flat: Vec<f32> = file.logits.into_iter().flatten().collect();
    Array2::from_shape_vec((rows, cols), flat)
        .context("logits rows have inconsistent lengths")
}

fn print_result(result: &PronunciationEvalResult, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{rendered}");
    Ok(())
}
