const CERTIFICATION_MARKERS: &[&str] = &["certification", "certified"];

/// Every line mentioning a certification, trimmed, in source order.
pub fn extract_certifications(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            CERTIFICATION_MARKERS.iter().any(|m| lower.contains(m))
        })
        .map(|line| line.trim().to_string())
        .collect()
}
