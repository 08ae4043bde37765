//! Normalizer: line-break cleanup and broken-word repair for extracted résumé text.
//!
//! Steps run in a fixed order. Dehyphenation must come before the two
//! hyphen-less joins, otherwise genuine compounds like "end-to-end" that
//! happen to wrap are corrupted by the lowercase join.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// Ordered rewrite table: (pattern, replacement). Order is significant.
static STEPS: LazyLock<[(Regex, &str); 5]> = LazyLock::new(|| {
    [
        (Regex::new(r"\r").expect("carriage return regex"), "\n"),
        (Regex::new(r"\n{2,}").expect("newline run regex"), "\n"),
        // "Tech-\nnical" → "Technical"
        (
            Regex::new(r"\b([A-Za-z]{2,})-\n([A-Za-z]{2,})\b").expect("hyphen wrap regex"),
            "${1}${2}",
        ),
        // "contai\nnerized" → "containerized"
        (
            Regex::new(r"\b([A-Za-z]{2,12})\n([a-z]{2,})\b").expect("mid-word break regex"),
            "${1}${2}",
        ),
        // "consistently\nturning" → "consistently turning"
        (
            Regex::new(r"([a-z])\n([a-z])").expect("lowercase wrap regex"),
            "${1} ${2}",
        ),
    ]
});

/// Normalizes raw extracted text. Lossy: two short unrelated lowercase words
/// split across lines can be falsely joined.
pub fn normalize(text: &str) -> String {
    let mut out = text.to_string();
    for (pattern, replacement) in STEPS.iter() {
        out = replace_until_stable(pattern, &out, replacement);
    }
    out
}

/// Normalizes and splits into lines.
pub fn normalized_lines(text: &str) -> Vec<String> {
    normalize(text).split('\n').map(str::to_string).collect()
}

// Non-overlapping replacement can leave a fresh match behind (e.g. "a\nb\nc"),
// so each step repeats until the text is a fixed point.
fn replace_until_stable(pattern: &Regex, text: &str, replacement: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = pattern.replace_all(&current, replacement).into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carriage_returns_fold_to_single_newline() {
        assert_eq!(normalize("Jane Doe\r\nEngineer"), "Jane Doe\nEngineer");
    }

    #[test]
    fn test_blank_line_runs_collapse() {
        assert_eq!(normalize("EDUCATION\n\n\n\nMIT"), "EDUCATION\nMIT");
    }

    #[test]
    fn test_hyphen_wrapped_word_is_rejoined() {
        assert_eq!(normalize("Strong Tech-\nnical skills"), "Strong Technical skills");
    }

    #[test]
    fn test_mid_word_break_is_rejoined() {
        assert_eq!(normalize("Deployed contai\nnerized apps"), "Deployed containerized apps");
    }

    #[test]
    fn test_wrapped_sentence_fragments_are_merged_with_space() {
        assert_eq!(
            normalize("consistently delivering features and\na reliable platform"),
            "consistently delivering features and a reliable platform"
        );
    }

    #[test]
    fn test_line_structure_before_capitalised_lines_is_kept() {
        let text = "Software Engineer Intern\nAcme Corp\n• Built X";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn test_chained_lowercase_wraps_all_merge() {
        assert_eq!(normalize("a\nb\nc"), "a b c");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "Jane Doe\r\n\r\nSoftware Engi-\nneer\nBuilt contai\nnerized apps\nand\nservices",
            "ab-\ncd-\nef",
            "a\nb\nc\nd",
            "ab-\nc\nde",
            "EXPERIENCE\n\n• Led team of 5\n  \nTech Stack: React, Node.js\r",
            "",
            "\n\n\n",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_normalized_lines_splits_on_newline() {
        assert_eq!(normalized_lines("A\r\nB"), vec!["A", "B"]);
    }
}
