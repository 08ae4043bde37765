use serde::{Deserialize, Serialize};

/// One work-experience item built from the EXPERIENCE section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobEntry {
    pub role: String,
    /// Written at most once; the first qualifying line wins.
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub description: Vec<String>,
    /// Last "Technologies:" line wins.
    pub tech_stack: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub description: Vec<String>,
    pub tech_stack: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    /// Degree text with the year and trailing separators/month removed.
    pub degree: String,
    pub institution: String,
    /// Four-digit year, or empty.
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub links: Vec<String>,
    pub location: String,
}

/// The fixed-schema record every structuring path must produce.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CvRecord {
    pub name: String,
    pub contact: ContactInfo,
    pub summary: String,
    pub skills: Vec<String>,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<JobEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<String>,
}
