//! Section segmentation: header classification and bucketing of normalized
//! lines into the EXPERIENCE and PROJECTS sections.

use crate::parsing::normalizer::normalized_lines;

/// Kind of section a header line opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Experience,
    Projects,
    /// Any other recognised section; ends the current bucket.
    Other,
}

const MAX_HEADER_WORDS: usize = 5;

/// Keyword table in precedence order. First kind with a matching keyword wins.
const HEADER_KEYWORDS: &[(SectionKind, &[&str])] = &[
    (
        SectionKind::Experience,
        &["experience", "employment", "work history", "internship"],
    ),
    (SectionKind::Projects, &["project"]),
    (
        SectionKind::Other,
        &[
            "education",
            "skill",
            "certification",
            "award",
            "honor",
            "achievement",
            "publication",
            "activity",
            "leadership",
            "volunteer",
            "interest",
            "language",
            "reference",
            "summary",
            "objective",
            "profile",
            "coursework",
        ],
    ),
];

/// Classifies one trimmed line as a section header, or `None` for content.
pub fn classify_header(line: &str) -> Option<SectionKind> {
    let line = line.trim();
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() || words.len() > MAX_HEADER_WORDS {
        return None;
    }
    if !looks_like_header(line, &words) {
        return None;
    }

    let clean = line
        .to_lowercase()
        .trim_end_matches(':')
        .trim_end_matches('.')
        .to_string();

    HEADER_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| clean.contains(kw)))
        .map(|(kind, _)| *kind)
}

fn looks_like_header(line: &str, words: &[&str]) -> bool {
    is_upper(line)
        || is_title(line)
        || line.ends_with(':')
        || (words.len() <= 2 && words.iter().all(|w| starts_uppercase(w)))
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// At least one cased character, and every cased character is upper-case.
fn is_upper(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Title case: upper-case letters only start a cased run, lower-case letters
/// only continue one. At least one cased character.
fn is_title(text: &str) -> bool {
    let mut cased = false;
    let mut previous_cased = false;
    for c in text.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            cased = true;
        } else {
            previous_cased = false;
        }
    }
    cased
}

/// Content lines bucketed under the two structured sections. Header lines are
/// never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMap {
    pub experience: Vec<String>,
    pub projects: Vec<String>,
}

impl SectionMap {
    fn push(&mut self, kind: SectionKind, line: &str) {
        match kind {
            SectionKind::Experience => self.experience.push(line.to_string()),
            SectionKind::Projects => self.projects.push(line.to_string()),
            SectionKind::Other => {}
        }
    }
}

/// Single left-to-right pass over already-normalized lines.
pub fn segment_lines<S: AsRef<str>>(lines: &[S]) -> SectionMap {
    let mut sections = SectionMap::default();
    let mut current: Option<SectionKind> = None;

    for line in lines {
        let stripped = line.as_ref().trim();
        if stripped.is_empty() {
            continue;
        }
        match classify_header(stripped) {
            Some(SectionKind::Other) => current = None,
            Some(kind) => current = Some(kind),
            None => {
                if let Some(kind) = current {
                    sections.push(kind, stripped);
                }
            }
        }
    }

    sections
}

/// Normalizes `text` and segments it.
pub fn segment(text: &str) -> SectionMap {
    segment_lines(&normalized_lines(text))
}
