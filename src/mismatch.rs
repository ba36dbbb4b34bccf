// src/mismatch.rs
//! Rule-based cross-checker for title/description/category disagreement.
//!
//! The highest-confidence bot signature (gibberish title over a coherent
//! description) short-circuits everything and forces a spam verdict. The
//! remaining checks only accumulate reasons for human review.
//!
//! Category keywords live in `category_lexicon.json` (embedded at build
//! time, overridable from disk) so the table can be extended without
//! touching the matching code.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::gibberish::{is_gibberish, LENIENT};
use crate::normalize::tokens;
use crate::verdict::MismatchFinding;

pub const REASON_GIBBERISH_TITLE: &str = "gibberish_title_real_description";
pub const REASON_TITLE_DESC: &str = "title_desc_mismatch";
pub const REASON_CATEGORY: &str = "category_mismatch";
pub const REASON_SHORT_DESC: &str = "description_too_short";

/// Versioned category -> keyword table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryLexicon {
    pub version: u32,
    pub categories: HashMap<String, HashSet<String>>,
}

static DEFAULT_LEXICON: Lazy<CategoryLexicon> = Lazy::new(|| {
    let raw = include_str!("../category_lexicon.json");
    serde_json::from_str(raw).expect("valid embedded category lexicon")
});

impl CategoryLexicon {
    /// The lexicon compiled into the binary.
    pub fn embedded() -> &'static CategoryLexicon {
        &DEFAULT_LEXICON
    }

    /// Load an override table from disk (same JSON shape as the embedded one).
    pub fn from_file(path: &Path) -> io::Result<CategoryLexicon> {
        let bytes = fs::read(path)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn keywords(&self, category: &str) -> Option<&HashSet<String>> {
        self.categories.get(category)
    }
}

/// Tunable constants of the guard. The other-category hit count is a
/// heuristic tie-break; treat it as a knob, not a law.
#[derive(Debug, Clone, Copy)]
pub struct MismatchParams {
    /// Title/description token overlap below this flags a mismatch.
    pub min_overlap_ratio: f32,
    /// Keyword hits some *other* category needs before we flag.
    pub other_category_hits: usize,
}

impl Default for MismatchParams {
    fn default() -> Self {
        Self {
            min_overlap_ratio: 0.15,
            other_category_hits: 2,
        }
    }
}

/// Run the guard. Reasons accumulate in check order and are never deduped;
/// `force_spam` short-circuits with only its own reason attached.
pub fn check_mismatch(
    title: &str,
    description: &str,
    category: &str,
    lexicon: &CategoryLexicon,
    params: &MismatchParams,
) -> MismatchFinding {
    let mut finding = MismatchFinding::default();

    let title_gib = is_gibberish(title, &LENIENT);
    let desc_gib = is_gibberish(description, &LENIENT);

    // 1) Gibberish title + real description: classic bot signature.
    if title_gib && !desc_gib {
        finding.reasons.push(REASON_GIBBERISH_TITLE.to_string());
        finding.force_spam = true;
        return finding;
    }

    // 2) Title and description disagree.
    if title_desc_mismatch(title, description, title_gib, desc_gib, params) {
        finding.reasons.push(REASON_TITLE_DESC.to_string());
    }

    // 3) Declared category does not match the content.
    if category_mismatch(title, description, category, lexicon, params) {
        finding.reasons.push(REASON_CATEGORY.to_string());
    }

    // 4) Non-blocking: coherent but nearly empty description.
    let desc_trim = description.trim();
    if !desc_gib && !desc_trim.is_empty() && desc_trim.chars().count() < 12 {
        finding.reasons.push(REASON_SHORT_DESC.to_string());
    }

    finding
}

fn title_desc_mismatch(
    title: &str,
    description: &str,
    title_gib: bool,
    desc_gib: bool,
    params: &MismatchParams,
) -> bool {
    // Title looks normal but the description is junk/empty.
    if !title_gib && desc_gib {
        return true;
    }

    let t_tokens: HashSet<String> = tokens(title).into_iter().collect();
    let d_tokens: HashSet<String> = tokens(description).into_iter().collect();

    // Only judge overlap when both sides carry enough signal.
    if t_tokens.len() >= 2 && d_tokens.len() >= 4 {
        let overlap = t_tokens.intersection(&d_tokens).count();
        if (overlap as f32) / (t_tokens.len() as f32) < params.min_overlap_ratio {
            return true;
        }
    }

    false
}

fn category_mismatch(
    title: &str,
    description: &str,
    category: &str,
    lexicon: &CategoryLexicon,
    params: &MismatchParams,
) -> bool {
    let cat = category.trim();
    let Some(own_keywords) = lexicon.keywords(cat) else {
        // Unknown/empty category: nothing to cross-check against.
        return false;
    };

    let text_tokens: HashSet<String> = tokens(&format!("{} {}", title, description))
        .into_iter()
        .collect();

    // Any hit for the declared category clears the report (avoids false
    // positives on short text).
    if text_tokens.intersection(own_keywords).count() >= 1 {
        return false;
    }

    let best_other = lexicon
        .categories
        .iter()
        .filter(|(name, _)| name.as_str() != cat)
        .map(|(_, kws)| text_tokens.intersection(kws).count())
        .max()
        .unwrap_or(0);

    best_other >= params.other_category_hits
}
