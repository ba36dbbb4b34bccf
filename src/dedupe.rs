// src/dedupe.rs
//! Duplicate-report guard: a sliding time window of recently scored report
//! texts. A new report that is a near-duplicate of a remembered one (by
//! normalized Levenshtein similarity) is reported to the boundary as a
//! duplicate; the pipeline outcome itself is untouched.
//!
//! - Configure with `DedupeParams { window_size, similarity_threshold, time_window_secs }`
//! - Call `is_duplicate(ts, text)` per submission: returns `true` for a
//!   near-duplicate, otherwise `false` (and the item is remembered).

use std::collections::VecDeque;
use std::time::{Duration, SystemTime};

/// Configuration for the duplicate guard.
#[derive(Clone, Debug)]
pub struct DedupeParams {
    /// Max number of remembered items (capacity of the sliding window).
    pub window_size: usize,
    /// Similarity in [0.0, 1.0]. Items >= this threshold are near-duplicates.
    pub similarity_threshold: f64,
    /// Only items newer than (ts - time_window_secs) are considered.
    pub time_window_secs: u64,
}

impl Default for DedupeParams {
    fn default() -> Self {
        Self {
            window_size: 256,
            similarity_threshold: 0.90,
            time_window_secs: 60 * 60, // 1 hour
        }
    }
}

#[derive(Clone, Debug)]
struct SeenReport {
    ts: SystemTime,
    text: String,
}

/// In-memory sliding-window duplicate guard.
#[derive(Debug)]
pub struct DuplicateGuard {
    params: DedupeParams,
    window: VecDeque<SeenReport>,
}

impl DuplicateGuard {
    pub fn new(mut params: DedupeParams) -> Self {
        // Basic parameter hygiene
        if params.window_size == 0 {
            params.window_size = 1;
        }
        params.similarity_threshold = params.similarity_threshold.clamp(0.0, 1.0);
        if params.time_window_secs == 0 {
            params.time_window_secs = 1;
        }

        let ws = params.window_size;
        Self {
            params,
            window: VecDeque::with_capacity(ws),
        }
    }

    pub fn params(&self) -> &DedupeParams {
        &self.params
    }

    /// Clears the remembered sliding window.
    pub fn clear(&mut self) {
        self.window.clear();
    }

    /// Decide whether `text` observed at `ts` duplicates a recent report.
    /// Non-duplicates are remembered.
    pub fn is_duplicate(&mut self, ts: SystemTime, text: &str) -> bool {
        let norm = normalize(text);
        self.evict_old(ts);

        for item in self.window.iter().rev() {
            if strsim::normalized_levenshtein(&norm, &item.text)
                >= self.params.similarity_threshold
            {
                return true;
            }
        }

        self.remember(ts, norm);
        false
    }

    fn remember(&mut self, ts: SystemTime, text: String) {
        if self.window.len() == self.params.window_size {
            self.window.pop_front();
        }
        self.window.push_back(SeenReport { ts, text });
    }

    fn evict_old(&mut self, now: SystemTime) {
        let horizon = Duration::from_secs(self.params.time_window_secs);
        while let Some(front) = self.window.front() {
            if now
                .duration_since(front.ts)
                .unwrap_or_else(|_| Duration::from_secs(0))
                > horizon
            {
                self.window.pop_front();
            } else {
                break;
            }
        }
    }
}

/// Lowercase + condensed whitespace before similarity.
fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_was_space = false;
    for ch in s.chars() {
        let lc = ch.to_ascii_lowercase();
        if lc.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(lc);
            last_was_space = false;
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::UNIX_EPOCH;

    fn ts(sec: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(1_700_000_000 + sec)
    }

    #[test]
    fn exact_resubmission_is_a_duplicate() {
        let mut g = DuplicateGuard::new(DedupeParams::default());
        assert!(!g.is_duplicate(ts(0), "Water pipe leaking near the market"));
        assert!(g.is_duplicate(ts(10), "Water pipe leaking near the market"));
    }

    #[test]
    fn case_and_spacing_do_not_defeat_the_guard() {
        let mut g = DuplicateGuard::new(DedupeParams::default());
        assert!(!g.is_duplicate(ts(0), "Water pipe leaking near the market"));
        assert!(g.is_duplicate(ts(5), "  WATER   pipe leaking near the MARKET "));
    }

    #[test]
    fn different_reports_pass() {
        let mut g = DuplicateGuard::new(DedupeParams::default());
        assert!(!g.is_duplicate(ts(0), "Water pipe leaking near the market"));
        assert!(!g.is_duplicate(ts(1), "Streetlight broken on station road for two weeks"));
    }

    #[test]
    fn old_entries_fall_out_of_the_window() {
        let mut g = DuplicateGuard::new(DedupeParams {
            time_window_secs: 60,
            ..Default::default()
        });
        assert!(!g.is_duplicate(ts(0), "Water pipe leaking near the market"));
        // 2 minutes later the memory has expired.
        assert!(!g.is_duplicate(ts(120), "Water pipe leaking near the market"));
    }

    #[test]
    fn capacity_is_bounded() {
        let mut g = DuplicateGuard::new(DedupeParams {
            window_size: 2,
            ..Default::default()
        });
        assert!(!g.is_duplicate(ts(0), "first unique report text"));
        assert!(!g.is_duplicate(ts(1), "second unique report text"));
        assert!(!g.is_duplicate(ts(2), "third unique report text"));
        // "first" was evicted by capacity.
        assert!(!g.is_duplicate(ts(3), "first unique report text"));
    }
}
