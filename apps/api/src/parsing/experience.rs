//! Experience builder: turns EXPERIENCE section lines into `JobEntry` values.
//!
//! State machine: `NoJob` until a work-role line opens a job, then `InJob`.
//! Inside a job each line is dispatched through `JOB_LINE_RULES`, first match wins.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

use crate::models::cv::JobEntry;

/// Glyphs that mark a line as a bullet point.
pub const BULLET_GLYPHS: &[char] = &[
    '•', '●', '○', '◦', '▪', '■', '►', '➢', '✓', '·', '-', '*', '–',
];

const WORK_TITLES: &[&str] = &[
    "intern",
    "developer",
    "engineer",
    "analyst",
    "consultant",
    "trainee",
    "programmer",
    "architect",
    "manager",
    "lead",
    "specialist",
    "coordinator",
    "associate",
    "scientist",
];

/// Extracurricular roles. "coordinator" is listed in both tables, so it never
/// qualifies on its own.
const EXCLUDED_ROLES: &[&str] = &[
    "president",
    "vice president",
    "secretary",
    "treasurer",
    "captain",
    "head",
    "coordinator",
    "member",
    "volunteer",
    "club",
    "society",
    "team",
];

/// En/em dashes anywhere, ASCII hyphen only with whitespace on both sides.
static DATE_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[–—]\s*|\s+-\s+").expect("DATE_DASH regex"));

/// Full or abbreviated English month name, without anchors.
pub(crate) const MONTH_NAME: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t|tember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

/// "2019-2021", "Jan 2019-Dec 2020", "2019-Present": a hyphen between a year
/// and the next date token.
static COMPACT_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b((?:19|20)\d{{2}})\s*-\s*((?:{MONTH_NAME}\.?,?\s+)?(?:19|20)\d{{2}}\b|present\b|current\b|now\b)"
    ))
    .expect("COMPACT_RANGE regex")
});

/// Optional month name followed by a year, at the end of the text.
static TRAILING_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)(?:\b{MONTH_NAME}\.?,?\s+)?\b(?:19|20)\d{{2}}\s*$"))
        .expect("TRAILING_DATE regex")
});

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("YEAR regex"));

static TECH_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:technologies|skills used)\s*:(.*)$").expect("TECH_LIST regex")
});

static GPA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bc?gpa\b").expect("GPA regex"));

pub fn is_bullet(line: &str) -> bool {
    line.trim_start().starts_with(BULLET_GLYPHS)
}

/// Gate for opening a new job: not a bullet, names a job title, and is not an
/// extracurricular role.
pub fn is_work_role(line: &str) -> bool {
    if is_bullet(line) {
        return false;
    }
    let lower = line.to_lowercase();
    let has_title = WORK_TITLES.iter().any(|t| lower.contains(t));
    let has_excluded = EXCLUDED_ROLES.iter().any(|r| lower.contains(r));
    has_title && !has_excluded
}

/// Role text and inline dates parsed from a work-role line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleLine {
    pub role: String,
    pub start_date: String,
    pub end_date: String,
}

pub fn split_dates(line: &str) -> Vec<String> {
    let line = COMPACT_RANGE.replace_all(line, "${1} – ${2}");
    DATE_DASH
        .split(&line)
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Parses "Role – Start – End", "Role Start – End", "Role Start-End" or a
/// bare role.
pub fn parse_role_line(line: &str) -> RoleLine {
    let parts = split_dates(line);

    if parts.len() >= 3 {
        return RoleLine {
            role: parts[0].clone(),
            start_date: parts[parts.len() - 2].clone(),
            end_date: parts[parts.len() - 1].clone(),
        };
    }

    let (head, end_date) = match parts.as_slice() {
        [head, end] => (head.as_str(), end.clone()),
        [head] => (head.as_str(), String::new()),
        _ => (line.trim(), String::new()),
    };
    let head = head.trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '–' | '—'));

    match TRAILING_DATE.find(head) {
        Some(m) => RoleLine {
            role: head[..m.start()]
                .trim_end_matches(|c: char| {
                    c.is_whitespace() || matches!(c, ',' | '|' | '@' | '(' | '-' | '–' | '—')
                })
                .to_string(),
            start_date: m.as_str().trim().to_string(),
            end_date,
        },
        None => RoleLine {
            role: head.to_string(),
            start_date: String::new(),
            end_date,
        },
    }
}

/// What a line inside an open job is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobLineRule {
    Duration,
    Bullet,
    TechStack,
    Company,
    Continuation,
}

type JobPredicate = fn(&JobEntry, &str) -> bool;

/// Ordered rule table. `Continuation` is the fallback.
const JOB_LINE_RULES: &[(JobLineRule, JobPredicate)] = &[
    (JobLineRule::Duration, is_duration_line),
    (JobLineRule::Bullet, is_bullet_line),
    (JobLineRule::TechStack, is_tech_line),
    (JobLineRule::Company, is_company_line),
];

fn is_duration_line(job: &JobEntry, line: &str) -> bool {
    job.start_date.is_empty() && YEAR.is_match(line)
}

fn is_bullet_line(_job: &JobEntry, line: &str) -> bool {
    is_bullet(line)
}

fn is_tech_line(_job: &JobEntry, line: &str) -> bool {
    TECH_LIST.is_match(line)
}

fn is_company_line(job: &JobEntry, line: &str) -> bool {
    let lower = line.to_lowercase();
    job.company.is_empty()
        && line.chars().next().is_some_and(char::is_uppercase)
        && !GPA.is_match(line)
        && !lower.starts_with("technologies")
        && !lower.starts_with("skills")
}

pub fn classify_job_line(job: &JobEntry, line: &str) -> JobLineRule {
    JOB_LINE_RULES
        .iter()
        .find(|(_, predicate)| predicate(job, line))
        .map(|(rule, _)| *rule)
        .unwrap_or(JobLineRule::Continuation)
}

fn apply_job_line(job: &mut JobEntry, rule: JobLineRule, line: &str) {
    match rule {
        JobLineRule::Duration => {
            let parts = split_dates(line);
            match parts.as_slice() {
                [] => {}
                [only] => job.start_date = only.clone(),
                [first, .., last] => {
                    job.start_date = first.clone();
                    job.end_date = last.clone();
                }
            }
        }
        JobLineRule::TechStack => {
            if let Some(rest) = TECH_LIST.captures(line).and_then(|c| c.get(1)) {
                job.tech_stack = split_list(rest.as_str());
            }
        }
        JobLineRule::Company => job.company = line.to_string(),
        JobLineRule::Bullet | JobLineRule::Continuation => job.description.push(line.to_string()),
    }
}

/// Comma-separated list, trimmed, empties dropped.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Builds job entries from EXPERIENCE lines in source order.
pub fn build_experience<S: AsRef<str>>(lines: &[S]) -> Vec<JobEntry> {
    let mut jobs = Vec::new();
    let mut current: Option<JobEntry> = None;

    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        if is_work_role(line) {
            jobs.extend(current.take());
            let parsed = parse_role_line(line);
            current = Some(JobEntry {
                role: parsed.role,
                start_date: parsed.start_date,
                end_date: parsed.end_date,
                ..JobEntry::default()
            });
            continue;
        }

        if let Some(job) = current.as_mut() {
            let rule = classify_job_line(job, line);
            apply_job_line(job, rule, line);
        }
    }

    jobs.extend(current);
    jobs
}
