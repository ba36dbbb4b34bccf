// src/pipeline.rs
//! The trust & veracity pipeline: one service object owning the model cache,
//! the category lexicon, and the thresholds. Constructed once at process
//! start and shared across requests; scoring itself is request-scoped with
//! no shared mutable state.

use std::path::Path;

use tracing::debug;

use crate::combine::combine;
use crate::config::PipelineParams;
use crate::fraud::score_fraud;
use crate::mismatch::{check_mismatch, CategoryLexicon, MismatchParams};
use crate::model::ModelStore;
use crate::veracity::score_veracity_safe;
use crate::verdict::{PipelineOutcome, TextSample};

#[derive(Debug)]
pub struct TrustPipeline {
    models: ModelStore,
    lexicon: CategoryLexicon,
    params: PipelineParams,
}

impl TrustPipeline {
    pub fn new(artifact_dir: impl AsRef<Path>, params: PipelineParams) -> Self {
        Self {
            models: ModelStore::new(artifact_dir.as_ref()),
            lexicon: CategoryLexicon::embedded().clone(),
            params,
        }
    }

    /// Swap in a lexicon loaded from disk (operator override).
    pub fn with_lexicon(mut self, lexicon: CategoryLexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    pub fn lexicon(&self) -> &CategoryLexicon {
        &self.lexicon
    }

    pub fn models(&self) -> &ModelStore {
        &self.models
    }

    /// Score one report. Total and deterministic: identical input yields an
    /// identical outcome, and no input can make this fail.
    pub fn score(&self, sample: &TextSample) -> PipelineOutcome {
        let veracity = score_veracity_safe(
            &self.models,
            &sample.title,
            &sample.description,
            self.params.min_confidence,
        );

        let fraud = score_fraud(
            &self.models,
            &sample.title,
            &sample.description,
            self.params.fraud_threshold,
        );

        let mismatch = check_mismatch(
            &sample.title,
            &sample.description,
            &sample.category,
            &self.lexicon,
            &MismatchParams {
                min_overlap_ratio: self.params.min_overlap_ratio,
                other_category_hits: self.params.other_category_hits,
            },
        );

        let outcome = combine(&veracity, &fraud, &mismatch);
        debug!(
            verdict = outcome.verdict.as_str(),
            suspicious = outcome.is_suspicious,
            reasons = outcome.reasons.len(),
            "scored report"
        );
        outcome
    }
}
