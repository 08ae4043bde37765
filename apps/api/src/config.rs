use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::parsing::name::NameStrategy;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_TEXT_BYTES: usize = 1_000_000;

/// Application configuration loaded from environment variables.
/// Every variable is optional; a present but invalid value fails startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON `{category: [skill, ...]}`. Unset means the built-in vocabulary.
    pub skills_vocabulary_path: Option<PathBuf>,
    pub name_strategy: NameStrategy,
    pub max_text_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            skills_vocabulary_path: None,
            name_strategy: NameStrategy::default(),
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => defaults.port,
        };

        let name_strategy = match lookup("NAME_STRATEGY") {
            Some(raw) => raw
                .parse::<NameStrategy>()
                .map_err(anyhow::Error::msg)
                .context("NAME_STRATEGY is invalid")?,
            None => defaults.name_strategy,
        };

        let max_text_bytes = match lookup("MAX_TEXT_BYTES") {
            Some(raw) => {
                let bytes = raw
                    .trim()
                    .parse::<usize>()
                    .context("MAX_TEXT_BYTES must be a positive integer")?;
                anyhow::ensure!(bytes > 0, "MAX_TEXT_BYTES must be greater than zero");
                bytes
            }
            None => defaults.max_text_bytes,
        };

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            skills_vocabulary_path: lookup("SKILLS_VOCABULARY_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            name_strategy,
            max_text_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert!(config.skills_vocabulary_path.is_none());
        assert_eq!(config.name_strategy, NameStrategy::Lexical);
        assert_eq!(config.max_text_bytes, 1_000_000);
    }

    #[test]
    fn test_values_are_read() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("RUST_LOG", "debug"),
            ("SKILLS_VOCABULARY_PATH", "/etc/skills.json"),
            ("NAME_STRATEGY", "entity"),
            ("MAX_TEXT_BYTES", "2048"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.rust_log, "debug");
        assert_eq!(
            config.skills_vocabulary_path,
            Some(PathBuf::from("/etc/skills.json"))
        );
        assert_eq!(config.name_strategy, NameStrategy::Entity);
        assert_eq!(config.max_text_bytes, 2048);
    }

    #[test]
    fn test_invalid_values_are_startup_errors() {
        assert!(Config::from_lookup(lookup_from(&[("PORT", "eighty")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("NAME_STRATEGY", "spacy")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("MAX_TEXT_BYTES", "0")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("MAX_TEXT_BYTES", "-5")])).is_err());
    }
}
