// src/fraud.rs
//! Fraud/spam scoring: heuristic first, optional trained binary classifier
//! on top. The heuristic can force a positive but never suppress one; the
//! asymmetry biases toward flagging over missing spam.

use tracing::debug;

use crate::model::{ModelError, ModelStore};
use crate::spam::looks_like_spam;
use crate::verdict::FraudSignal;

pub const DEFAULT_FRAUD_THRESHOLD: f32 = 0.65;

/// Index of the spam class in the binary model's probability vector.
const SPAM_CLASS: usize = 1;

/// Score `(title, description)` for spam. Never fails: missing artifacts or
/// a failed inference fall back to the heuristic with a 1.0/0.0 sentinel
/// probability.
pub fn score_fraud(
    store: &ModelStore,
    title: &str,
    description: &str,
    threshold: f32,
) -> FraudSignal {
    let text = format!("{} {}", title, description).trim().to_string();

    // The heuristic is always computed, model or not.
    let heuristic_hit = looks_like_spam(&text);

    match model_spam_probability(store, &text) {
        Ok(prob) => FraudSignal {
            is_spam: heuristic_hit || prob >= threshold,
            spam_prob: prob,
        },
        Err(err) => {
            debug!(error = %err, "fraud model unavailable, using heuristic only");
            FraudSignal {
                is_spam: heuristic_hit,
                spam_prob: if heuristic_hit { 1.0 } else { 0.0 },
            }
        }
    }
}

fn model_spam_probability(store: &ModelStore, text: &str) -> Result<f32, ModelError> {
    let bundle = store.fraud()?;
    let proba = bundle.predict_proba(text)?;
    proba.get(SPAM_CLASS).copied().ok_or_else(|| {
        ModelError::Inference(format!(
            "fraud model returned {} classes, expected at least 2",
            proba.len()
        ))
    })
}
