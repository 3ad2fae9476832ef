use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "accentor",
    about = "Pronunciation scoring against reference English dialects"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score a decoded phoneme stream (or raw logits) against a sentence.
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    /// Target sentence the speaker was prompted to read.
    #[arg(long)]
    pub sentence: String,
    /// JSON file with decoded phoneme predictions.
    #[arg(long, value_name = "PATH", conflicts_with = "logits")]
    pub predictions: Option<PathBuf>,
    /// JSON file with a raw [T, V] logits matrix to collapse first.
    #[arg(long, value_name = "PATH")]
    pub logits: Option<PathBuf>,
    /// Optional override for the assets directory (vocabulary lookup).
    #[arg(long = "assets-path")]
    pub assets_path: Option<PathBuf>,
    /// Pretty-print the result JSON.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

impl EvaluateArgs {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.sentence.trim().is_empty(),
            "sentence must not be empty"
        );
        ensure!(
            self.predictions.is_some() || self.logits.is_some(),
            "provide --predictions or --logits"
        );
        Ok(())
    }
}
