use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::parsing::aggregator::CvParser;
use crate::parsing::name::{
    EntityNameExtractor, GazetteerRecognizer, LexicalNameExtractor, NameExtractor, NameStrategy,
};
use crate::parsing::skills::SkillVocabulary;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub parser: CvParser,
    pub config: Config,
}

impl AppState {
    /// Loads the skill vocabulary and picks the name strategy. Any failure
    /// here is a startup error.
    pub fn from_config(config: Config) -> Result<Self> {
        let vocabulary = load_vocabulary(&config)?;
        let name_extractor = build_name_extractor(config.name_strategy);
        info!("Name strategy: {:?}", config.name_strategy);

        Ok(AppState {
            parser: CvParser::new(Arc::new(vocabulary), name_extractor),
            config,
        })
    }
}

fn load_vocabulary(config: &Config) -> Result<SkillVocabulary> {
    let vocabulary = match &config.skills_vocabulary_path {
        Some(path) => SkillVocabulary::from_json_file(path)
            .with_context(|| format!("Failed to load skill vocabulary from {}", path.display()))?,
        None => SkillVocabulary::builtin(),
    };
    info!(
        "Skill vocabulary loaded: {} skills in {} categories",
        vocabulary.len(),
        vocabulary.categories().len()
    );
    Ok(vocabulary)
}

pub fn build_name_extractor(strategy: NameStrategy) -> Arc<dyn NameExtractor> {
    match strategy {
        NameStrategy::Lexical => Arc::new(LexicalNameExtractor),
        NameStrategy::Entity => Arc::new(EntityNameExtractor::new(GazetteerRecognizer::default())),
    }
}
