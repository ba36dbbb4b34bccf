// src/model.rs
//! Trained-model artifact loading and inference.
//!
//! Each classifier family ships as two paired JSON files in the artifact
//! directory: `<stem>_vectorizer.json` (tf-idf vocabulary + idf weights) and
//! `<stem>_model.json` (linear classifier coefficients). The exporter on the
//! training side writes these from the fitted sklearn objects.
//!
//! Artifacts are loaded at most once per process and cached read-only; a
//! concurrent first use may race on the load, which is harmless (both
//! winners produce identical objects from the same files).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::normalize::tokens;

/// Errors at the classifier boundary. Neither variant ever reaches an HTTP
/// caller: fraud falls back to the heuristic, veracity is neutralized by its
/// safe wrapper.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifacts unavailable: {0}")]
    Unavailable(String),
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Tf-idf vectorizer state exported from training.
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfVectorizer {
    /// token -> column index
    pub vocabulary: HashMap<String, usize>,
    /// idf weight per column
    pub idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Sparse tf-idf vector (column, weight), L2-normalized.
    /// Unknown tokens are dropped; empty input yields an empty vector.
    pub fn transform(&self, text: &str) -> Vec<(usize, f32)> {
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for tok in tokens(text) {
            if let Some(&idx) = self.vocabulary.get(&tok) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut vec: Vec<(usize, f32)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf.get(idx).copied().unwrap_or(1.0)))
            .collect();

        let norm: f32 = vec.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in vec.iter_mut() {
                *w /= norm;
            }
        }
        vec.sort_by_key(|(idx, _)| *idx);
        vec
    }
}

/// Linear (logistic-regression) classifier: one coefficient row per class
/// for multiclass, a single row for binary.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearClassifier {
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f32>>,
    pub intercept: Vec<f32>,
}

impl LinearClassifier {
    /// Class probabilities for a sparse feature vector.
    /// Binary models use the sigmoid over the single score and return
    /// `[p_negative, p_positive]`; multiclass models use the softmax.
    pub fn predict_proba(&self, x: &[(usize, f32)]) -> Result<Vec<f32>, ModelError> {
        if self.coef.is_empty() || self.coef.len() != self.intercept.len() {
            return Err(ModelError::Inference(format!(
                "coefficient rows ({}) do not match intercepts ({})",
                self.coef.len(),
                self.intercept.len()
            )));
        }

        let scores: Vec<f32> = self
            .coef
            .iter()
            .zip(self.intercept.iter())
            .map(|(row, b)| {
                let dot: f32 = x
                    .iter()
                    .map(|(idx, w)| row.get(*idx).copied().unwrap_or(0.0) * w)
                    .sum();
                dot + b
            })
            .collect();

        if scores.len() == 1 {
            let p = sigmoid(scores[0]);
            return Ok(vec![1.0 - p, p]);
        }

        Ok(softmax(&scores))
    }
}

fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}

fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|e| e / sum).collect()
}

/// Paired vectorizer + classifier for one family ("fraud" or "veracity").
#[derive(Debug, Clone)]
pub struct ClassifierBundle {
    pub vectorizer: TfidfVectorizer,
    pub classifier: LinearClassifier,
}

impl ClassifierBundle {
    /// Load `<dir>/<stem>_vectorizer.json` + `<dir>/<stem>_model.json`,
    /// validating that the shapes agree. Any failure here is `Unavailable`:
    /// a bundle that cannot be trusted is a bundle we do not have.
    pub fn load(dir: &Path, stem: &str) -> Result<Self, ModelError> {
        let vect_path = dir.join(format!("{stem}_vectorizer.json"));
        let model_path = dir.join(format!("{stem}_model.json"));

        let vectorizer: TfidfVectorizer = read_json(&vect_path)?;
        let classifier: LinearClassifier = read_json(&model_path)?;

        if vectorizer.idf.len() != vectorizer.vocabulary.len() {
            return Err(ModelError::Unavailable(format!(
                "{}: idf length {} does not match vocabulary size {}",
                vect_path.display(),
                vectorizer.idf.len(),
                vectorizer.vocabulary.len()
            )));
        }
        let width = vectorizer.idf.len();
        if classifier.coef.iter().any(|row| row.len() != width) {
            return Err(ModelError::Unavailable(format!(
                "{}: coefficient width does not match vectorizer width {}",
                model_path.display(),
                width
            )));
        }
        if classifier.coef.len() != classifier.intercept.len() {
            return Err(ModelError::Unavailable(format!(
                "{}: {} coefficient rows vs {} intercepts",
                model_path.display(),
                classifier.coef.len(),
                classifier.intercept.len()
            )));
        }

        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Vectorize and score in one step.
    pub fn predict_proba(&self, text: &str) -> Result<Vec<f32>, ModelError> {
        let x = self.vectorizer.transform(text);
        self.classifier.predict_proba(&x)
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ModelError> {
    let bytes = fs::read(path)
        .map_err(|e| ModelError::Unavailable(format!("{}: {e}", path.display())))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ModelError::Unavailable(format!("{}: {e}", path.display())))
}

/// Explicit load-once cache for both classifier families. Constructed at
/// process start and shared; no hidden globals.
#[derive(Debug)]
pub struct ModelStore {
    dir: PathBuf,
    fraud: OnceCell<Arc<ClassifierBundle>>,
    veracity: OnceCell<Arc<ClassifierBundle>>,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            fraud: OnceCell::new(),
            veracity: OnceCell::new(),
        }
    }

    pub fn artifact_dir(&self) -> &Path {
        &self.dir
    }

    /// Binary fraud bundle. A failed load is not cached, so dropping fresh
    /// artifacts into the directory takes effect without a restart.
    pub fn fraud(&self) -> Result<&Arc<ClassifierBundle>, ModelError> {
        self.fraud.get_or_try_init(|| {
            let bundle = ClassifierBundle::load(&self.dir, "fraud")?;
            info!(dir = %self.dir.display(), "loaded fraud classifier artifacts");
            Ok(Arc::new(bundle))
        })
    }

    /// Three-class veracity bundle (legit / fake / spam).
    pub fn veracity(&self) -> Result<&Arc<ClassifierBundle>, ModelError> {
        self.veracity.get_or_try_init(|| {
            let bundle = ClassifierBundle::load(&self.dir, "veracity")?;
            info!(dir = %self.dir.display(), "loaded veracity classifier artifacts");
            Ok(Arc::new(bundle))
        })
    }
}
