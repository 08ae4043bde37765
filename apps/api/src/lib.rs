pub mod config;
pub mod errors;
pub mod models;
pub mod parsing;
pub mod routes;
pub mod state;

pub use models::cv::CvRecord;
pub use parsing::aggregator::{parse_cv, CvParser};
pub use parsing::skills::{SkillVocabulary, VocabularyError};
