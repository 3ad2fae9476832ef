//! Locates the on-disk assets backing the scoring pipeline.
//!
//! The per-voice lexicons are compiled into the binary, so the only
//! asset resolved at runtime is the CTC vocabulary JSON consumed by the
//! logits entry points. A directory only counts as an assets root when
//! it actually carries that file.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};

/// File name of the CTC vocabulary inside the assets root.
pub const VOCAB_FILE: &str = "vocab.json";

/// Resolved assets layout for one evaluator process.
#[derive(Debug, Clone)]
pub struct AssetsConfig {
    assets_root: PathBuf,
    vocab_path: PathBuf,
}

impl AssetsConfig {
    /// Resolves the assets root, preferring an explicit override over
    /// discovery relative to the running executable.
    pub fn from_override(path: Option<PathBuf>) -> Result<Self> {
        let root = match path {
            Some(custom) => custom
                .canonicalize()
                .with_context(|| format!("failed to resolve assets directory at {:?}", custom))?,
            None => discover_assets_root()?,
        };
        Self::from_root(root)
    }

    fn from_root(assets_root: PathBuf) -> Result<Self> {
        ensure!(
            assets_root.is_dir(),
            "assets path {:?} is not a directory",
            assets_root
        );
        let vocab_path = assets_root.join(VOCAB_FILE);
        ensure!(
            vocab_path.is_file(),
            "assets at {:?} do not contain the CTC vocabulary {}",
            assets_root,
            VOCAB_FILE
        );
        Ok(Self {
            assets_root,
            vocab_path,
        })
    }

    pub fn assets_root(&self) -> &Path {
        &self.assets_root
    }

    /// Path of the CTC vocabulary JSON.
    pub fn vocab_path(&self) -> &Path {
        &self.vocab_path
    }
}

/// Walks up from the executable and accepts the first `assets`
/// directory that carries the vocabulary file, so stray `assets`
/// folders along the path cannot shadow the real one.
fn discover_assets_root() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("unable to resolve current executable path")?;
    exe.ancestors()
        .map(|dir| dir.join("assets"))
        .find(|candidate| candidate.join(VOCAB_FILE).is_file())
        .with_context(|| {
            format!(
                "no assets directory with {} found alongside {:?}",
                VOCAB_FILE, exe
            )
        })
}

#[cfg(test)]
mod tests {
    use super::{discover_assets_root, AssetsConfig, VOCAB_FILE};

    #[test]
    fn discovery_requires_the_vocabulary_file() {
        let root = discover_assets_root().expect("assets directory should exist");
        assert!(root.ends_with("assets"));
        assert!(root.join(VOCAB_FILE).is_file());
    }

    #[test]
    fn accepts_an_explicit_override() {
        let config =
            AssetsConfig::from_override(Some(std::env::current_dir().unwrap().join("assets")))
                .unwrap();
        assert!(config.assets_root().ends_with("assets"));
        assert!(config.vocab_path().ends_with(VOCAB_FILE));
    }

    #[test]
    fn rejects_roots_without_a_vocabulary() {
        let dir = tempfile::tempdir().unwrap();
        let result = AssetsConfig::from_override(Some(dir.path().to_path_buf()));
        let message = result.unwrap_err().to_string();
        assert!(message.contains(VOCAB_FILE), "unexpected error: {message}");
    }
}
