// src/combine.rs
//! Pure verdict combiner: merges the veracity, fraud, and mismatch signals
//! into one `PipelineOutcome` under a fixed precedence order.
//!
//! Precedence, highest first:
//! 1. mismatch `force_spam`  -> spam, suspicious (overrides everything)
//! 2. fraud `is_spam`        -> spam, suspicious
//! 3. mismatch findings      -> legit downgrades to fake, suspicious
//! 4. veracity passes through unchanged
//!
//! Total: every input combination yields a fully-populated outcome. The
//! mismatch reasons ride along whichever branch wins, so review tooling can
//! see every fired signal.

use crate::verdict::{FraudSignal, MismatchFinding, PipelineOutcome, VeracitySignal, Verdict};

pub fn combine(
    veracity: &VeracitySignal,
    fraud: &FraudSignal,
    mismatch: &MismatchFinding,
) -> PipelineOutcome {
    let mut verdict = veracity.verdict;
    let mut is_suspicious = veracity.is_suspicious;

    if mismatch.force_spam {
        verdict = Verdict::Spam;
        is_suspicious = true;
    } else if fraud.is_spam {
        verdict = Verdict::Spam;
        is_suspicious = true;
    } else if mismatch.is_mismatch() {
        if verdict == Verdict::Legit {
            verdict = Verdict::Fake;
        }
        is_suspicious = true;
    }

    // A suspicious report is never confidently legit.
    if is_suspicious && verdict == Verdict::Legit {
        verdict = Verdict::Unknown;
    }

    PipelineOutcome {
        verdict,
        is_suspicious,
        score_false: veracity.score_false,
        spam_prob: fraud.spam_prob,
        reasons: mismatch.reasons.clone(),
    }
}
