// src/normalize.rs
//! Text normalization primitives shared by every downstream heuristic:
//! tokenizer, letter/vowel counters, and repeated-run detection.
//!
//! All functions here are total: any input (empty, whitespace, unicode)
//! yields a well-defined result, never an error.

/// Lowercase, collapse punctuation to whitespace, keep alphanumeric tokens
/// of length >= 3, preserving order.
pub fn tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 3)
        .map(|t| t.to_string())
        .collect()
}

/// Purely alphabetic runs of the lowercased input (any length).
/// Used where digits must not count as word material.
pub fn alpha_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphabetic())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// The concatenated lowercase letter stream of the input (non-letters dropped).
pub fn letter_stream(text: &str) -> String {
    text.to_lowercase().chars().filter(|c| c.is_alphabetic()).collect()
}

#[inline]
pub fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Fraction of vowels among the letters of `word`; 0.0 for empty input.
pub fn vowel_ratio(word: &str) -> f32 {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return 0.0;
    }
    let vowels = letters.iter().filter(|c| is_vowel(**c)).count();
    vowels as f32 / letters.len() as f32
}

/// Longest run of consecutive ASCII consonants in `word`.
pub fn longest_consonant_run(word: &str) -> usize {
    let mut best = 0usize;
    let mut cur = 0usize;
    for c in word.to_lowercase().chars() {
        if c.is_ascii_alphabetic() && !is_vowel(c) {
            cur += 1;
            best = best.max(cur);
        } else {
            cur = 0;
        }
    }
    best
}

/// True when the text contains a run of at least `min_run` identical
/// characters (case-insensitive). The regex crate has no backreferences,
/// so this is a plain char scan.
pub fn has_repeat_run(text: &str, min_run: usize) -> bool {
    if min_run <= 1 {
        return !text.is_empty();
    }
    let mut prev: Option<char> = None;
    let mut run = 0usize;
    for c in text.chars().map(|c| c.to_ascii_lowercase()) {
        if Some(c) == prev {
            run += 1;
            if run >= min_run {
                return true;
            }
        } else {
            prev = Some(c);
            run = 1;
        }
    }
    false
}

/// Ratio of letters to non-whitespace characters; 0.0 for all-whitespace input.
pub fn letter_to_nonspace_ratio(text: &str) -> f32 {
    let mut letters = 0usize;
    let mut nonspace = 0usize;
    for c in text.chars() {
        if !c.is_whitespace() {
            nonspace += 1;
            if c.is_alphabetic() {
                letters += 1;
            }
        }
    }
    if nonspace == 0 {
        return 0.0;
    }
    letters as f32 / nonspace as f32
}
