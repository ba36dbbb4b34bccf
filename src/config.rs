// src/config.rs
//! Pipeline configuration: thresholds from `config/pipeline.toml` (optional,
//! defaults apply when absent) plus environment overrides for file locations.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "config/pipeline.toml";
pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

pub const ENV_CONFIG_PATH: &str = "TRUST_CONFIG_PATH";
pub const ENV_ARTIFACT_DIR: &str = "TRUST_ARTIFACT_DIR";
pub const ENV_LEXICON_PATH: &str = "TRUST_LEXICON_PATH";

/// Scoring thresholds. All fields optional in the TOML file; missing ones
/// keep their defaults.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    /// Model spam probability at or above this flags fraud.
    pub fraud_threshold: f32,
    /// Veracity argmax below this downgrades the label to unknown.
    pub min_confidence: f32,
    /// Title/description token overlap below this flags a mismatch.
    pub min_overlap_ratio: f32,
    /// Keyword hits another category needs before a category mismatch fires.
    pub other_category_hits: usize,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            fraud_threshold: crate::fraud::DEFAULT_FRAUD_THRESHOLD,
            min_confidence: crate::veracity::DEFAULT_MIN_CONFIDENCE,
            min_overlap_ratio: 0.15,
            other_category_hits: 2,
        }
    }
}

impl PipelineParams {
    /// Load from a TOML file; a missing file means defaults, a malformed
    /// file is reported and also means defaults (scoring must never be
    /// blocked by a bad config).
    pub fn from_file(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<PipelineParams>(&raw) {
                Ok(p) => {
                    info!(path = %path.display(), "loaded pipeline params");
                    p
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "bad pipeline config, using defaults");
                    PipelineParams::default()
                }
            },
            Err(_) => PipelineParams::default(),
        }
    }

    /// Resolve the config path from the environment and load.
    pub fn from_env() -> Self {
        let path = std::env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::from_file(&path)
    }
}

/// Artifact directory, `TRUST_ARTIFACT_DIR` or the default.
pub fn artifact_dir_from_env() -> PathBuf {
    std::env::var(ENV_ARTIFACT_DIR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_ARTIFACT_DIR))
}

/// Optional lexicon override path, `TRUST_LEXICON_PATH`.
pub fn lexicon_path_from_env() -> Option<PathBuf> {
    std::env::var(ENV_LEXICON_PATH).ok().map(PathBuf::from)
}
