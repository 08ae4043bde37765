const SUMMARY_MARKERS: &[&str] = &["summary", "profile"];

/// The line right after the first summary/profile header, or empty.
pub fn extract_summary(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    lines
        .iter()
        .position(|line| {
            let lower = line.to_lowercase();
            SUMMARY_MARKERS.iter().any(|m| lower.contains(m))
        })
        .and_then(|i| lines.get(i + 1))
        .map(|line| line.trim().to_string())
        .unwrap_or_default()
}
