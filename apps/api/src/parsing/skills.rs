//! Skill matching against a fixed, read-only vocabulary.
//!
//! The vocabulary is built once at startup and shared as `Arc<SkillVocabulary>`.
//! Matching is case-insensitive and word-boundary safe: "Go" is found in
//! "Go, Rust" but not in "Google" or "going". Reported casing always comes from
//! the vocabulary.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read skill vocabulary at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid skill vocabulary JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("skill vocabulary contains no skills")]
    Empty,
}

#[derive(Debug, Clone)]
struct SkillTerm {
    canonical: String,
    needle: String,
    category: String,
}

/// Category → canonical skill names, plus precomputed lowercase needles.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    categories: BTreeMap<String, Vec<String>>,
    terms: Vec<SkillTerm>,
}

const BUILTIN_SKILLS: &[(&str, &[&str])] = &[
    (
        "languages",
        &[
            "Python", "Java", "C++", "C#", "JavaScript", "TypeScript", "Go", "Rust", "Ruby",
            "PHP", "Kotlin", "Swift", "Scala", "SQL", "HTML", "CSS", "Bash",
        ],
    ),
    (
        "frameworks",
        &[
            "React", "Angular", "Vue.js", "Node.js", "Express", "Django", "Flask", "FastAPI",
            "Spring Boot", "Next.js", "TensorFlow", "PyTorch", "Keras", "scikit-learn", "Pandas",
            "NumPy",
        ],
    ),
    (
        "databases",
        &[
            "MySQL", "PostgreSQL", "MongoDB", "Redis", "SQLite", "Cassandra", "DynamoDB",
            "Elasticsearch",
        ],
    ),
    (
        "cloud_devops",
        &[
            "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Terraform", "Jenkins", "Git",
            "GitHub Actions", "Linux", "CI/CD",
        ],
    ),
    (
        "concepts",
        &[
            "Machine Learning", "Deep Learning", "NLP", "Computer Vision", "REST", "GraphQL",
            "Microservices", "Data Structures",
        ],
    ),
];

impl SkillVocabulary {
    /// Builds a vocabulary. Blank skills are dropped; a skill listed twice
    /// (case-insensitively, in any category) keeps its first occurrence.
    pub fn from_categories(
        categories: BTreeMap<String, Vec<String>>,
    ) -> Result<Self, VocabularyError> {
        let mut seen = HashSet::new();
        let mut kept: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut terms = Vec::new();

        for (category, skills) in categories {
            let bucket = kept.entry(category.clone()).or_default();
            for skill in skills {
                let canonical = skill.trim().to_string();
                if canonical.is_empty() {
                    continue;
                }
                let needle = canonical.to_lowercase();
                if !seen.insert(needle.clone()) {
                    continue;
                }
                bucket.push(canonical.clone());
                terms.push(SkillTerm {
                    canonical,
                    needle,
                    category: category.clone(),
                });
            }
        }

        if terms.is_empty() {
            return Err(VocabularyError::Empty);
        }

        Ok(Self {
            categories: kept,
            terms,
        })
    }

    /// Expects a JSON object of `{"category": ["Skill", ...]}`.
    pub fn from_json_str(json: &str) -> Result<Self, VocabularyError> {
        let categories: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Self::from_categories(categories)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// General software-engineering vocabulary used when no file is configured.
    pub fn builtin() -> Self {
        let categories = BUILTIN_SKILLS
            .iter()
            .map(|(category, skills)| {
                (
                    category.to_string(),
                    skills.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();
        match Self::from_categories(categories) {
            Ok(vocabulary) => vocabulary,
            Err(_) => unreachable!("builtin skill table is non-empty"),
        }
    }

    pub fn categories(&self) -> &BTreeMap<String, Vec<String>> {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

// "+" and "#" continue a token so "C" never matches inside "C++" or "C#".
fn continues_token(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '+' | '#')
}

/// Occurrences of `needle` in `haystack` not embedded in a larger token.
/// Both arguments must already be lowercase.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    let starts_in_token = needle.chars().next().is_some_and(continues_token);
    let ends_in_token = needle.chars().next_back().is_some_and(continues_token);

    haystack
        .match_indices(needle)
        .filter(|(idx, _)| {
            let before = haystack[..*idx].chars().next_back();
            let after = haystack[idx + needle.len()..].chars().next();
            !(starts_in_token && before.is_some_and(continues_token))
                && !(ends_in_token && after.is_some_and(continues_token))
        })
        .count()
}

fn term_counts<'v>(text: &str, vocabulary: &'v SkillVocabulary) -> Vec<(&'v SkillTerm, usize)> {
    let lower = text.to_lowercase();
    vocabulary
        .terms
        .iter()
        .map(|term| (term, count_occurrences(&lower, &term.needle)))
        .filter(|(_, count)| *count > 0)
        .collect()
}

/// Sorted, deduplicated canonical names found in `text`.
pub fn match_skills(text: &str, vocabulary: &SkillVocabulary) -> Vec<String> {
    let mut found: Vec<String> = term_counts(text, vocabulary)
        .into_iter()
        .map(|(term, _)| term.canonical.clone())
        .collect();
    found.sort();
    found.dedup();
    found
}

/// Canonical name → total occurrences, for frequency-aware consumers.
pub fn skill_frequencies(text: &str, vocabulary: &SkillVocabulary) -> BTreeMap<String, usize> {
    term_counts(text, vocabulary)
        .into_iter()
        .map(|(term, count)| (term.canonical.clone(), count))
        .collect()
}

/// Category → sorted canonical names found in `text`. Categories without a
/// match are omitted.
pub fn match_skills_by_category(
    text: &str,
    vocabulary: &SkillVocabulary,
) -> BTreeMap<String, Vec<String>> {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (term, _) in term_counts(text, vocabulary) {
        grouped
            .entry(term.category.clone())
            .or_default()
            .push(term.canonical.clone());
    }
    for skills in grouped.values_mut() {
        skills.sort();
    }
    grouped
}
