#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

use crate::models::cv::EducationEntry;
use crate::parsing::experience::MONTH_NAME;

const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor", "master", "b.tech", "m.tech", "bsc", "msc", "phd", "diploma",
];

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("YEAR regex"));

static TRAILING_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b{MONTH_NAME}\.?$")).expect("TRAILING_MONTH regex")
});

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '–' | '—' | ',' | '|' | ':' | '/')
}

/// Trims separators and unmatched opening parens, e.g. "B.Tech in CSE (" →
/// "B.Tech in CSE". A closing paren is kept.
fn trim_tail(text: &str) -> &str {
    let mut rest = text;
    loop {
        let trimmed = rest.trim_end_matches(is_separator);
        let trimmed = trimmed.strip_suffix('(').unwrap_or(trimmed);
        if trimmed.len() == rest.len() {
            return trimmed;
        }
        rest = trimmed;
    }
}

pub fn is_degree_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    DEGREE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Removes trailing separators and a dangling month name, e.g.
/// "Bachelor of Science - May " → "Bachelor of Science".
fn clean_tail(text: &str) -> String {
    let without_month = TRAILING_MONTH.replace(trim_tail(text), "");
    trim_tail(&without_month).trim().to_string()
}

/// Splits a degree line into cleaned degree text and its first year.
pub fn parse_degree_line(line: &str) -> (String, String) {
    let line = line.trim();
    let Some(year) = YEAR.find(line) else {
        return (line.to_string(), String::new());
    };

    let before = clean_tail(&line[..year.start()]);
    let degree = if before.is_empty() {
        // "2019 – BSc Computer Science"
        line[year.end()..]
            .trim_start_matches(|c: char| is_separator(c) || c == ')')
            .trim()
            .to_string()
    } else {
        before
    };

    (degree, year.as_str().to_string())
}

fn is_grade_line(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with("CGPA") || line.starts_with("GPA")
}

/// Every degree line becomes an entry; the next line is its institution
/// unless it is a GPA line.
pub fn extract_education(text: &str) -> Vec<EducationEntry> {
    let lines: Vec<&str> = text.lines().collect();

    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_degree_line(line))
        .map(|(i, line)| {
            let (degree, year) = parse_degree_line(line);
            let institution = lines
                .get(i + 1)
                .filter(|next| !is_grade_line(next))
                .map(|next| next.trim().to_string())
                .unwrap_or_default();
            EducationEntry {
                degree,
                institution,
                year,
            }
        })
        .collect()
}
