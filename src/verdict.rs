// src/verdict.rs
//! Core pipeline types: input sample, verdict enum, per-component signals,
//! and the final outcome handed to the HTTP/persistence collaborators.

use serde::{Deserialize, Serialize};

/// A raw citizen report as received from the boundary. Empty strings are
/// valid and treated as maximally suspicious downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSample {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: String,
}

impl TextSample {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
        }
    }

    /// `title + " " + description`, the joint text scored by both classifiers.
    pub fn joined_text(&self) -> String {
        format!("{} {}", self.title, self.description)
            .trim()
            .to_string()
    }
}

/// Final trust classification of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Legit,
    Fake,
    Spam,
    /// Safe default when no signal is confident.
    Unknown,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Legit => "legit",
            Verdict::Fake => "fake",
            Verdict::Spam => "spam",
            Verdict::Unknown => "unknown",
        }
    }
}

/// Output of the fraud classifier (model + heuristic, see `fraud.rs`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FraudSignal {
    pub is_spam: bool,
    /// Raw model spam probability; 1.0/0.0 when running heuristic-only.
    pub spam_prob: f32,
}

/// Output of the veracity classifier (see `veracity.rs`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VeracitySignal {
    pub verdict: Verdict,
    /// P(fake) in [0, 1].
    pub score_false: f32,
    pub is_suspicious: bool,
}

impl VeracitySignal {
    /// Neutral default applied when the veracity model cannot be used.
    pub fn neutral() -> Self {
        Self {
            verdict: Verdict::Unknown,
            score_false: 0.0,
            is_suspicious: false,
        }
    }
}

/// Output of the mismatch guard. Reasons accumulate and are never deduped:
/// several findings may legitimately co-occur.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MismatchFinding {
    pub reasons: Vec<String>,
    pub force_spam: bool,
}

impl MismatchFinding {
    pub fn is_mismatch(&self) -> bool {
        !self.reasons.is_empty()
    }
}

/// The one artifact persisted alongside an issue. Computed once per
/// submission attempt and never mutated afterwards; re-scoring produces a
/// fresh outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutcome {
    pub verdict: Verdict,
    pub is_suspicious: bool,
    /// P(fake) from the veracity model (0.0 when unavailable).
    pub score_false: f32,
    /// Spam probability from the fraud model (or the heuristic sentinel).
    pub spam_prob: f32,
    /// Mismatch-guard findings, kept even when fraud/spam logic overrode
    /// the verdict, so review tooling sees every fired signal.
    #[serde(default)]
    pub reasons: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Verdict::Legit).unwrap(), "legit");
        assert_eq!(serde_json::to_value(Verdict::Unknown).unwrap(), "unknown");
    }

    #[test]
    fn joined_text_trims_empty_parts() {
        let s = TextSample::new("", "only description", "");
        assert_eq!(s.joined_text(), "only description");
        let both = TextSample::new("a title", "a body", "Road");
        assert_eq!(both.joined_text(), "a title a body");
    }

    #[test]
    fn outcome_roundtrips_through_json() {
        let o = PipelineOutcome {
            verdict: Verdict::Spam,
            is_suspicious: true,
            score_false: 0.12,
            spam_prob: 0.91,
            reasons: vec!["gibberish_title_real_description".into()],
        };
        let v = serde_json::to_value(&o).unwrap();
        assert_eq!(v["verdict"], "spam");
        assert_eq!(v["is_suspicious"], true);
        let back: PipelineOutcome = serde_json::from_value(v).unwrap();
        assert_eq!(back, o);
    }
}
