// src/veracity.rs
//! Three-way veracity scoring (legit / fake / spam) backed by a trained
//! classifier. Unlike the fraud path there is no heuristic stand-in: without
//! artifacts the raw scorer fails with `ModelError::Unavailable`, and the
//! request-facing `score_veracity_safe` neutralizes that to an `Unknown`
//! signal. Operators running the raw function still see the failure.

use tracing::warn;

use crate::gibberish::{is_gibberish, STRICT};
use crate::model::{ModelError, ModelStore};
use crate::verdict::{VeracitySignal, Verdict};

pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.55;

/// Class layout of the trained veracity model.
const CLASS_LABELS: [Verdict; 3] = [Verdict::Legit, Verdict::Fake, Verdict::Spam];
const FAKE_CLASS: usize = 1;

/// Raw scorer. Requires the trained bundle; callers that must not crash use
/// `score_veracity_safe` instead.
pub fn score_veracity(
    store: &ModelStore,
    title: &str,
    description: &str,
    min_confidence: f32,
) -> Result<VeracitySignal, ModelError> {
    let bundle = store.veracity()?;
    let text = format!("{} {}", title, description).trim().to_string();

    let proba = bundle.predict_proba(&text)?;
    if proba.len() != CLASS_LABELS.len() {
        return Err(ModelError::Inference(format!(
            "veracity model returned {} classes, expected {}",
            proba.len(),
            CLASS_LABELS.len()
        )));
    }

    let (best_idx, best_prob) = proba
        .iter()
        .copied()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap_or((0, 0.0));

    let mut verdict = CLASS_LABELS[best_idx];
    if best_prob < min_confidence {
        verdict = Verdict::Unknown;
    }

    let score_false = proba[FAKE_CLASS];

    let mut is_suspicious = matches!(verdict, Verdict::Fake | Verdict::Spam);
    if is_gibberish(&text, &STRICT) {
        // Junk text is never confidently legit, whatever the model says.
        is_suspicious = true;
        if verdict == Verdict::Legit {
            verdict = Verdict::Unknown;
        }
    }

    Ok(VeracitySignal {
        verdict,
        score_false,
        is_suspicious,
    })
}

/// Request-facing wrapper: never fails. This is the single place where the
/// error-to-neutral policy lives; call sites must not duplicate it.
pub fn score_veracity_safe(
    store: &ModelStore,
    title: &str,
    description: &str,
    min_confidence: f32,
) -> VeracitySignal {
    match score_veracity(store, title, description, min_confidence) {
        Ok(signal) => signal,
        Err(err) => {
            warn!(error = %err, "veracity scoring unavailable, defaulting to unknown");
            VeracitySignal::neutral()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_scorer_fails_without_artifacts() {
        let store = ModelStore::new("no/artifacts/here");
        let err = score_veracity(&store, "title", "description", DEFAULT_MIN_CONFIDENCE)
            .expect_err("must fail without artifacts");
        assert!(matches!(err, ModelError::Unavailable(_)));
    }

    #[test]
    fn safe_wrapper_neutralizes_to_unknown() {
        let store = ModelStore::new("no/artifacts/here");
        let sig = score_veracity_safe(&store, "title", "description", DEFAULT_MIN_CONFIDENCE);
        assert_eq!(sig.verdict, Verdict::Unknown);
        assert_eq!(sig.score_false, 0.0);
        assert!(!sig.is_suspicious);
    }
}
