//! Aggregator, the single entry point from raw text to `CvRecord`.
//!
//! Total and side-effect free: every extractor contributes its empty default
//! when it finds nothing. Rejecting empty input is the caller's job.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::models::cv::CvRecord;
use crate::parsing::certifications::extract_certifications;
use crate::parsing::contact::extract_contact;
use crate::parsing::education::extract_education;
use crate::parsing::experience::build_experience;
use crate::parsing::name::{LexicalNameExtractor, NameExtractor};
use crate::parsing::normalizer::normalize;
use crate::parsing::projects::build_projects;
use crate::parsing::sections::segment_lines;
use crate::parsing::skills::{
    match_skills, match_skills_by_category, skill_frequencies, SkillVocabulary,
};
use crate::parsing::summary::extract_summary;

/// Heuristic résumé parser. Cheap to clone; the vocabulary and name strategy
/// are shared read-only.
#[derive(Clone)]
pub struct CvParser {
    vocabulary: Arc<SkillVocabulary>,
    name_extractor: Arc<dyn NameExtractor>,
}

impl CvParser {
    pub fn new(vocabulary: Arc<SkillVocabulary>, name_extractor: Arc<dyn NameExtractor>) -> Self {
        Self {
            vocabulary,
            name_extractor,
        }
    }

    /// Lexical name strategy.
    pub fn with_vocabulary(vocabulary: Arc<SkillVocabulary>) -> Self {
        Self::new(vocabulary, Arc::new(LexicalNameExtractor))
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    pub fn parse(&self, raw: &str) -> CvRecord {
        build_record(raw, &self.vocabulary, self.name_extractor.as_ref())
    }

    pub fn skill_frequencies(&self, raw: &str) -> BTreeMap<String, usize> {
        skill_frequencies(&normalize(raw), &self.vocabulary)
    }

    /// Vocabulary category → matched skills.
    pub fn skills_by_category(&self, raw: &str) -> BTreeMap<String, Vec<String>> {
        match_skills_by_category(&normalize(raw), &self.vocabulary)
    }
}

/// Parses with the lexical name strategy.
pub fn parse_cv(raw: &str, vocabulary: &SkillVocabulary) -> CvRecord {
    build_record(raw, vocabulary, &LexicalNameExtractor)
}

fn build_record(
    raw: &str,
    vocabulary: &SkillVocabulary,
    name_extractor: &dyn NameExtractor,
) -> CvRecord {
    let text = normalize(raw);
    let lines: Vec<&str> = text.split('\n').collect();
    let sections = segment_lines(&lines);

    let record = CvRecord {
        name: name_extractor.extract_name(&text),
        contact: extract_contact(&text),
        summary: extract_summary(&text),
        skills: match_skills(&text, vocabulary),
        education: extract_education(&text),
        experience: build_experience(&sections.experience),
        projects: build_projects(&sections.projects),
        certifications: extract_certifications(&text),
    };

    debug!(
        lines = lines.len(),
        name_strategy = ?name_extractor.strategy(),
        skills = record.skills.len(),
        education = record.education.len(),
        experience = record.experience.len(),
        projects = record.projects.len(),
        certifications = record.certifications.len(),
        "parsed cv"
    );

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::name::{EntityNameExtractor, GazetteerRecognizer};

    const SAMPLE_CV: &str = "Jane Doe\r\n\
Austin, TX\r\n\
Email: jane@x.com | Phone: +1-555-123-4567\r\n\
linkedin.com/in/janedoe\r\n\
\r\n\
PROFESSIONAL SUMMARY\r\n\
Backend engineer building reliable Go and Rust services.\r\n\
\r\n\
EXPERIENCE\r\n\
Software Engineer Intern\r\n\
Acme Corp\r\n\
Jun 2021 – Aug 2021\r\n\
• Built X with Docker\r\n\
• Built Y\r\n\
Technologies: Go, PostgreSQL\r\n\
Backend Developer – Jan 2022 – Present\r\n\
Globex\r\n\
• Led the migration to Kubernetes\r\n\
\r\n\
PROJECTS\r\n\
Portfolio Site\r\n\
• Built with React\r\n\
Tech Stack: React, Node.js\r\n\
\r\n\
EDUCATION\r\n\
Bachelor of Science - 2019\r\n\
State University\r\n\
\r\n\
CERTIFICATIONS\r\n\
AWS Certified Developer\r\n";

    fn parser() -> CvParser {
        CvParser::with_vocabulary(Arc::new(SkillVocabulary::builtin()))
    }

    #[test]
    fn test_full_record_from_sample_cv() {
        let record = parser().parse(SAMPLE_CV);

        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.contact.email, "jane@x.com");
        assert_eq!(record.contact.phone, "+1-555-123-4567");
        assert_eq!(record.contact.location, "Austin, TX");
        assert_eq!(record.contact.links, vec!["linkedin.com/in/janedoe"]);
        assert_eq!(
            record.summary,
            "Backend engineer building reliable Go and Rust services."
        );

        assert_eq!(record.experience.len(), 2);
        let intern = &record.experience[0];
        assert_eq!(intern.role, "Software Engineer Intern");
        assert_eq!(intern.company, "Acme Corp");
        assert_eq!(intern.start_date, "Jun 2021");
        assert_eq!(intern.end_date, "Aug 2021");
        assert_eq!(intern.description, vec!["• Built X with Docker", "• Built Y"]);
        assert_eq!(intern.tech_stack, vec!["Go", "PostgreSQL"]);

        let backend = &record.experience[1];
        assert_eq!(backend.role, "Backend Developer");
        assert_eq!(backend.start_date, "Jan 2022");
        assert_eq!(backend.end_date, "Present");
        assert_eq!(backend.company, "Globex");

        assert_eq!(record.projects.len(), 1);
        assert_eq!(record.projects[0].title, "Portfolio Site");
        assert_eq!(record.projects[0].tech_stack, vec!["React", "Node.js"]);

        assert_eq!(record.education.len(), 1);
        assert_eq!(record.education[0].degree, "Bachelor of Science");
        assert_eq!(record.education[0].institution, "State University");
        assert_eq!(record.education[0].year, "2019");

        assert_eq!(
            record.certifications,
            vec!["CERTIFICATIONS", "AWS Certified Developer"]
        );

        for skill in ["Docker", "Go", "Kubernetes", "Node.js", "PostgreSQL", "React", "Rust"] {
            assert!(record.skills.contains(&skill.to_string()), "missing {skill}");
        }
        let mut sorted = record.skills.clone();
        sorted.sort();
        assert_eq!(record.skills, sorted);
    }

    #[test]
    fn test_free_function_matches_lexical_parser() {
        let vocabulary = SkillVocabulary::builtin();
        assert_eq!(parse_cv(SAMPLE_CV, &vocabulary), parser().parse(SAMPLE_CV));
    }

    #[test]
    fn test_parse_is_repeatable() {
        let p = parser();
        assert_eq!(p.parse(SAMPLE_CV), p.parse(SAMPLE_CV));
    }

    #[test]
    fn test_sparse_text_degrades_to_defaults() {
        let record = parser().parse("lorem ipsum dolor");
        assert_eq!(record, CvRecord::default());
    }

    #[test]
    fn test_entity_strategy_is_pluggable() {
        let p = CvParser::new(
            Arc::new(SkillVocabulary::builtin()),
            Arc::new(EntityNameExtractor::new(GazetteerRecognizer::default())),
        );
        let record = p.parse("CURRICULUM VITAE\nJane Doe\nEmail: jane@x.com");
        assert_eq!(record.name, "Jane Doe");
    }

    #[test]
    fn test_skill_frequencies_through_parser() {
        let freq = parser().skill_frequencies(SAMPLE_CV);
        assert_eq!(freq.get("React"), Some(&2));
        assert_eq!(freq.get("Go"), Some(&2));
    }

    #[test]
    fn test_skills_grouped_by_category_through_parser() {
        let grouped = parser().skills_by_category(SAMPLE_CV);
        assert_eq!(grouped["databases"], vec!["PostgreSQL"]);
        assert_eq!(grouped["frameworks"], vec!["Node.js", "React"]);
    }
}
