// src/gibberish.rs
//! Statistical gibberish detection: flags random keyboard mash like
//! "fsdhgfsdeh" or "qwertyuiop" without flagging real sentences.
//!
//! Two named policies are kept deliberately separate. The veracity path and
//! the mismatch-guard path evolved with slightly different thresholds, and
//! unifying them would silently change flagging behavior on real data.

use crate::normalize::{
    alpha_words, has_repeat_run, letter_to_nonspace_ratio, longest_consonant_run, vowel_ratio,
};

/// Threshold set for one gibberish call-site.
#[derive(Debug, Clone, Copy)]
pub struct GibberishPolicy {
    /// Trimmed text shorter than this is gibberish.
    pub min_len: usize,
    /// A run of this many identical characters is gibberish.
    pub repeat_run: usize,
    /// Letters-to-nonspace ratio below this is gibberish (symbol soup).
    pub min_letter_ratio: f32,
    /// Optional single-long-token rule (vowel starvation / consonant streaks).
    pub single_token: Option<SingleTokenRule>,
}

#[derive(Debug, Clone, Copy)]
pub struct SingleTokenRule {
    /// Rule applies only when the text reduces to one word at least this long.
    pub min_word_len: usize,
    /// Vowel ratio below this is gibberish.
    pub min_vowel_ratio: f32,
    /// A consonant run of this length is gibberish.
    pub consonant_run: usize,
}

/// Standalone variant used by the veracity scorer.
pub const STRICT: GibberishPolicy = GibberishPolicy {
    min_len: 8,
    repeat_run: 6,
    min_letter_ratio: 0.35,
    single_token: None,
};

/// Variant used by the mismatch guard (title/description checks).
pub const LENIENT: GibberishPolicy = GibberishPolicy {
    min_len: 8,
    repeat_run: 6,
    min_letter_ratio: 0.55,
    single_token: Some(SingleTokenRule {
        min_word_len: 9,
        min_vowel_ratio: 0.22,
        consonant_run: 6,
    }),
};

/// Rules evaluated in order; any hit means gibberish. Total on all inputs,
/// empty text included (it fails the length rule).
pub fn is_gibberish(text: &str, policy: &GibberishPolicy) -> bool {
    let t = text.trim();
    if t.chars().count() < policy.min_len {
        return true;
    }
    if has_repeat_run(t, policy.repeat_run) {
        return true;
    }
    if letter_to_nonspace_ratio(t) < policy.min_letter_ratio {
        return true;
    }
    if let Some(rule) = &policy.single_token {
        let words = alpha_words(t);
        if words.len() == 1 && words[0].chars().count() >= rule.min_word_len {
            let w = &words[0];
            if vowel_ratio(w) < rule.min_vowel_ratio {
                return true;
            }
            if longest_consonant_run(w) >= rule.consonant_run {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_boundary_is_exact() {
        // 7 chars -> gibberish, 8 chars -> passes the length rule
        assert!(is_gibberish("zxqpfgh", &LENIENT));
        assert!(is_gibberish("zxqpfgh", &STRICT));
        assert!(!is_gibberish("nice day", &STRICT));
        assert!(!is_gibberish("pot hole", &LENIENT));
    }

    #[test]
    fn repeated_character_runs() {
        assert!(is_gibberish("aaaaaaaa fine text", &STRICT));
        assert!(is_gibberish("report !!!!!! here", &LENIENT));
    }

    #[test]
    fn symbol_soup_is_gibberish() {
        assert!(is_gibberish("#### $$$$ 1234 ++", &STRICT));
        assert!(is_gibberish("ab (1) [2] {3} 45", &LENIENT));
    }

    #[test]
    fn single_long_junk_word_lenient_only() {
        // One long consonant-heavy word: the LENIENT policy carries the
        // single-token rule, STRICT does not.
        assert!(is_gibberish("fsdhgfsdeh", &LENIENT));
        assert!(!is_gibberish("fsdhgfsdeh", &STRICT));
        // A real long word with normal vowel coverage passes.
        assert!(!is_gibberish("streetlight", &LENIENT));
    }

    #[test]
    fn real_sentences_pass_both() {
        let s = "The streetlight outside my house has been broken for two weeks";
        assert!(!is_gibberish(s, &STRICT));
        assert!(!is_gibberish(s, &LENIENT));
    }
}
