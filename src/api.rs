// src/api.rs
//! HTTP boundary for the trust pipeline. The contract with the pipeline is
//! one-way: plain strings in, a complete outcome out, never an error. Raw
//! report text is never logged; log lines carry a short sha2-derived id.

use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::dedupe::{DedupeParams, DuplicateGuard};
use crate::metrics::record_outcome;
use crate::mismatch::CategoryLexicon;
use crate::pipeline::TrustPipeline;
use crate::verdict::{PipelineOutcome, TextSample};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<TrustPipeline>,
    pub dedupe: Arc<Mutex<DuplicateGuard>>,
}

impl AppState {
    pub fn new(pipeline: TrustPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            dedupe: Arc::new(Mutex::new(DuplicateGuard::new(DedupeParams::default()))),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/reports/score", post(score_report))
        .route("/debug/lexicon", get(debug_lexicon))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Deserialize)]
struct ScoreReq {
    title: String,
    description: String,
    #[serde(default)]
    category: String,
}

#[derive(Serialize)]
struct ScoreResp {
    #[serde(flatten)]
    outcome: PipelineOutcome,
    /// Near-duplicate of a recently scored report (boundary signal, not part
    /// of the stored outcome).
    duplicate: bool,
}

async fn score_report(
    State(state): State<AppState>,
    Json(body): Json<ScoreReq>,
) -> Json<ScoreResp> {
    let sample = TextSample::new(body.title, body.description, body.category);

    let outcome = state.pipeline.score(&sample);

    let duplicate = {
        let mut guard = state.dedupe.lock().expect("dedupe mutex poisoned");
        guard.is_duplicate(SystemTime::now(), &sample.joined_text())
    };

    record_outcome(&outcome, duplicate);

    info!(
        id = %anon_hash(&sample.joined_text()),
        verdict = outcome.verdict.as_str(),
        suspicious = outcome.is_suspicious,
        duplicate,
        "report scored"
    );

    Json(ScoreResp { outcome, duplicate })
}

async fn debug_lexicon(State(state): State<AppState>) -> Json<CategoryLexicon> {
    Json(state.pipeline.lexicon().clone())
}

/// Short anonymized id for log correlation; never log the text itself.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anon_hash_is_short_and_stable() {
        let a = anon_hash("water pipe leaking");
        let b = anon_hash("water pipe leaking");
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
        assert_ne!(a, anon_hash("different text"));
    }
}
