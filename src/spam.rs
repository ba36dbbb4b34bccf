// src/spam.rs
//! Keyword/pattern spam heuristic. Runs with or without trained models and
//! always produces a definite boolean: this is the unconditional fallback
//! when classifier artifacts are missing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalize::{alpha_words, has_repeat_run, letter_stream, longest_consonant_run};

/// Promotional phrases, links, and contact-bait seen in real spam reports.
static SPAM_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\bfree\s+money\b",
        r"\bclick\s+now\b",
        r"\bwin\s+\$?\d+\b",
        r"\bclaim\b",
        r"\bpromo\b",
        r"\bbonus\b",
        r"https?://",
        r"\bwhatsapp\b",
        r"\btelegram\b",
        r"\bcall\s+now\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("spam pattern regex"))
    .collect()
});

/// Checks in order; first hit wins. Empty text counts as spam.
pub fn looks_like_spam(text: &str) -> bool {
    let t = text.trim().to_lowercase();

    // 0) Empty or whitespace-only text
    if t.is_empty() {
        return true;
    }

    // 1) Explicit spam keywords / links
    if SPAM_PATTERNS.iter().any(|re| re.is_match(&t)) {
        return true;
    }

    // 2) Repeated characters like "aaaaaaa" or "!!!!!!"
    if has_repeat_run(&t, 6) {
        return true;
    }

    // 3) Gibberish over the full letter stream (consonant soup)
    let letters = letter_stream(&t);
    if letters.chars().count() >= 10 {
        let vowels = letters.chars().filter(|c| crate::normalize::is_vowel(*c)).count();
        let ratio = vowels as f32 / letters.chars().count() as f32;
        if ratio < 0.25 {
            return true;
        }
        if longest_consonant_run(&letters) >= 7 {
            return true;
        }
    }

    // 4) Single long meaningless word
    let words = alpha_words(&t);
    if words.len() == 1 && words[0].chars().count() >= 10 {
        return true;
    }

    // 5) Very short + no structure
    if t.chars().count() < 12 && words.len() <= 1 {
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_are_spam() {
        assert!(looks_like_spam(""));
        assert!(looks_like_spam("   \t "));
    }

    #[test]
    fn promotional_patterns_hit() {
        assert!(looks_like_spam("FREE MONEY claim your prize"));
        assert!(looks_like_spam("win $500 today, click now"));
        assert!(looks_like_spam("contact us on whatsapp for the promo"));
        assert!(looks_like_spam("see https://example.com/offer"));
    }

    #[test]
    fn repeated_run_hits_regardless_of_other_content() {
        assert!(looks_like_spam(
            "the water pipe is leaking aaaaaaa near the school"
        ));
        assert!(looks_like_spam("road broken !!!!!! please fix"));
    }

    #[test]
    fn consonant_soup_hits() {
        assert!(looks_like_spam("fsdhg fsdkj qwrtp zxcvb"));
    }

    #[test]
    fn single_long_word_hits() {
        assert!(looks_like_spam("asdfghjklqw"));
    }

    #[test]
    fn short_unstructured_hits_but_real_reports_pass() {
        assert!(looks_like_spam("fix"));
        assert!(!looks_like_spam(
            "The garbage near the park has not been collected for a week"
        ));
        assert!(!looks_like_spam("Water pipe leaking badly near the market"));
    }
}
