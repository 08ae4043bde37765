//! Contact details over the full normalized text.

#![allow(clippy::expect_used)]

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::cv::ContactInfo;

const LOCATION_SCAN_LINES: usize = 15;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("EMAIL regex"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d\- \t]{8,}\d").expect("PHONE regex"));

static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").expect("URL regex"));

const PROFILE_HOSTS: &[&str] = &["linkedin.com", "github.com"];

pub fn extract_contact(text: &str) -> ContactInfo {
    ContactInfo {
        email: first_match(&EMAIL, text),
        phone: first_match(&PHONE, text),
        links: extract_links(text),
        location: extract_location(text),
    }
}

fn first_match(pattern: &Regex, text: &str) -> String {
    pattern
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// URLs plus whole lines naming a LinkedIn/GitHub profile, deduplicated.
pub fn extract_links(text: &str) -> Vec<String> {
    let mut links: BTreeSet<String> = URL
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    for line in text.lines() {
        let lower = line.to_lowercase();
        if PROFILE_HOSTS.iter().any(|host| lower.contains(host)) {
            links.insert(line.trim().to_string());
        }
    }

    links.into_iter().collect()
}

/// First early line with a comma and a letter, e.g. "Austin, TX".
pub fn extract_location(text: &str) -> String {
    text.lines()
        .take(LOCATION_SCAN_LINES)
        .find(|line| line.contains(',') && line.chars().any(char::is_alphabetic))
        .map(|line| line.trim().to_string())
        .unwrap_or_default()
}
