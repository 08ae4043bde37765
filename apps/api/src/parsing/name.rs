//! Name extraction via pluggable, trait-based strategies behind one contract.
//!
//! Default: `LexicalNameExtractor` (line-shape heuristic over the first lines).
//! Alternative: `EntityNameExtractor`, which delegates to an `EntityRecognizer`
//! and keeps person entities of 2–4 tokens.
//!
//! The two can disagree on ambiguous headers; neither is authoritative.
//! `AppState` holds an `Arc<dyn NameExtractor>`, picked at startup via config.

use std::collections::HashSet;
use std::str::FromStr;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

pub trait NameExtractor: Send + Sync {
    /// Returns the candidate's name, or an empty string.
    fn extract_name(&self, text: &str) -> String;

    /// Short identifier for logs.
    fn strategy(&self) -> NameStrategy;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameStrategy {
    #[default]
    Lexical,
    Entity,
}

impl FromStr for NameStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexical" => Ok(NameStrategy::Lexical),
            "entity" => Ok(NameStrategy::Entity),
            other => Err(format!("unknown name strategy '{other}' (expected 'lexical' or 'entity')")),
        }
    }
}

const MIN_NAME_TOKENS: usize = 2;
const MAX_NAME_TOKENS: usize = 4;

fn token_count_ok(candidate: &str) -> bool {
    let n = candidate.split_whitespace().count();
    (MIN_NAME_TOKENS..=MAX_NAME_TOKENS).contains(&n)
}

// ────────────────────────────────────────────────────────────────────────────
// LexicalNameExtractor (default)
// ────────────────────────────────────────────────────────────────────────────

/// Returns the first of the leading lines shaped like a personal name:
/// no `@`, digit or comma, 2–4 tokens, alphabetic tokens capitalised.
pub struct LexicalNameExtractor;

const LEXICAL_SCAN_LINES: usize = 8;

impl NameExtractor for LexicalNameExtractor {
    fn extract_name(&self, text: &str) -> String {
        text.lines()
            .take(LEXICAL_SCAN_LINES)
            .map(str::trim)
            .find(|line| is_name_shaped(line))
            .map(str::to_string)
            .unwrap_or_default()
    }

    fn strategy(&self) -> NameStrategy {
        NameStrategy::Lexical
    }
}

fn is_name_shaped(line: &str) -> bool {
    if line.is_empty()
        || line.contains('@')
        || line.contains(',')
        || line.chars().any(|c| c.is_ascii_digit())
    {
        return false;
    }
    token_count_ok(line)
        && line.split_whitespace().all(|token| {
            let first = token.chars().next();
            !first.is_some_and(char::is_alphabetic) || first.is_some_and(char::is_uppercase)
        })
}

// ────────────────────────────────────────────────────────────────────────────
// Entity recognition
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Person,
    Organization,
    Location,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
}

/// Anything that can tag entity spans in text: a rule engine, a pretrained model.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Vec<EntitySpan>;
}

/// Keeps the first `Person` entity of 2–4 tokens from the head of the text.
pub struct EntityNameExtractor<R> {
    recognizer: R,
}

/// Characters of leading text handed to the recognizer.
pub const ENTITY_SCAN_CHARS: usize = 1000;

impl<R: EntityRecognizer> EntityNameExtractor<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }
}

impl<R: EntityRecognizer> NameExtractor for EntityNameExtractor<R> {
    fn extract_name(&self, text: &str) -> String {
        let head = match text.char_indices().nth(ENTITY_SCAN_CHARS) {
            Some((idx, _)) => &text[..idx],
            None => text,
        };

        self.recognizer
            .recognize(head)
            .into_iter()
            .filter(|e| e.label == EntityLabel::Person)
            .map(|e| e.text.trim().to_string())
            .find(|name| token_count_ok(name))
            .unwrap_or_default()
    }

    fn strategy(&self) -> NameStrategy {
        NameStrategy::Entity
    }
}

// ────────────────────────────────────────────────────────────────────────────
// GazetteerRecognizer: rule-based recognizer shipped with the service
// ────────────────────────────────────────────────────────────────────────────

const DEFAULT_GIVEN_NAMES: &[&str] = &[
    "aarav", "aditya", "ahmed", "aisha", "alex", "alexander", "alice", "amit", "ana", "andrew",
    "anna", "arjun", "ben", "carlos", "charlotte", "chen", "daniel", "david", "deepak", "elena",
    "emily", "emma", "fatima", "george", "hannah", "harry", "isabella", "jack", "james", "jane",
    "jennifer", "john", "jose", "juan", "kavya", "kevin", "laura", "li", "lucas", "maria",
    "mark", "mary", "michael", "mohammed", "noah", "olivia", "omar", "priya", "rahul", "raj",
    "robert", "rohan", "sam", "sara", "sarah", "sofia", "sophie", "thomas", "wei",
    "william", "yuki", "zara",
];

/// Tags a run of capitalised tokens as a person when it starts with a known
/// given name. Runs stop at the first non-capitalised token or after
/// `MAX_NAME_TOKENS` tokens.
pub struct GazetteerRecognizer {
    given_names: HashSet<String>,
}

impl GazetteerRecognizer {
    pub fn new<I, S>(given_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            given_names: given_names
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }
}

impl Default for GazetteerRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_GIVEN_NAMES)
    }
}

impl EntityRecognizer for GazetteerRecognizer {
    fn recognize(&self, text: &str) -> Vec<EntitySpan> {
        let mut spans = Vec::new();

        for line in text.lines() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let mut i = 0;
            while i < tokens.len() {
                let word = strip_punctuation(tokens[i]);
                if !(is_capitalised(word) && self.given_names.contains(&word.to_lowercase())) {
                    i += 1;
                    continue;
                }

                let mut run = vec![word];
                let mut j = i + 1;
                let mut open = !closes_run(tokens[i]);
                while open && j < tokens.len() && run.len() < MAX_NAME_TOKENS {
                    let next = strip_punctuation(tokens[j]);
                    if !is_capitalised(next) {
                        break;
                    }
                    run.push(next);
                    open = !closes_run(tokens[j]);
                    j += 1;
                }

                spans.push(EntitySpan {
                    text: run.join(" "),
                    label: EntityLabel::Person,
                });
                i = j;
            }
        }

        spans
    }
}

fn strip_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-')
}

/// "Doe," ends the name even when the next token is capitalised.
fn closes_run(token: &str) -> bool {
    token.ends_with([',', ';', ':', '|', ')'])
}

fn is_capitalised(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next().is_some_and(char::is_uppercase) && chars.all(|c| c.is_alphabetic() || c == '\'' || c == '-')
}
