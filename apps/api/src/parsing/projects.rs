//! Project builder: turns PROJECTS section lines into `ProjectEntry` values.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

use crate::models::cv::ProjectEntry;
use crate::parsing::experience::{is_bullet, split_list};

const TECH_STACK_PHRASE: &str = "Tech Stack";

static TECH_STACK_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Tech Stack\s*:(.*)$").expect("TECH_STACK_LIST regex"));

/// What a project line is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectLineRule {
    /// Opens a new project with the line as its title.
    Title,
    TechStack,
    /// Mentions the tech stack without a colon. Dropped.
    MalformedTechStack,
    Description,
}

pub fn classify_project_line(line: &str) -> ProjectLineRule {
    let mentions_stack = line.contains(TECH_STACK_PHRASE);
    if !is_bullet(line) && !mentions_stack {
        ProjectLineRule::Title
    } else if TECH_STACK_LIST.is_match(line) {
        ProjectLineRule::TechStack
    } else if mentions_stack {
        ProjectLineRule::MalformedTechStack
    } else {
        ProjectLineRule::Description
    }
}

pub fn build_projects<S: AsRef<str>>(lines: &[S]) -> Vec<ProjectEntry> {
    let mut projects = Vec::new();
    let mut current: Option<ProjectEntry> = None;

    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        let rule = classify_project_line(line);
        if rule == ProjectLineRule::Title {
            projects.extend(current.take());
            current = Some(ProjectEntry {
                title: line.to_string(),
                ..ProjectEntry::default()
            });
            continue;
        }

        let Some(project) = current.as_mut() else {
            continue;
        };
        match rule {
            ProjectLineRule::TechStack => {
                if let Some(rest) = TECH_STACK_LIST.captures(line).and_then(|c| c.get(1)) {
                    project.tech_stack = split_list(rest.as_str());
                }
            }
            ProjectLineRule::Description => project.description.push(line.to_string()),
            ProjectLineRule::Title | ProjectLineRule::MalformedTechStack => {}
        }
    }

    projects.extend(current);
    projects
}
