use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::Deserialize;

use gazeswipe_input::RecognizerConfig;

/// Intermediate representation for deserializing the TOML configuration file.
///
/// Every key is optional and falls back to the recognizer's defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub recognizer: RecognizerSection,
    #[serde(default)]
    pub session: SessionSection,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RecognizerSection {
    pub edge_threshold: Option<f64>,
    pub vertical_threshold: Option<f64>,
    pub min_samples_for_match: Option<usize>,
    /// Seconds.
    pub attempt_timeout: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SessionSection {
    /// Seconds without samples after which the source is reported silent.
    pub max_source_silence: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayConfig {
    pub recognizer: RecognizerConfig,
    pub max_source_silence: Duration,
}

pub const DEFAULT_MAX_SOURCE_SILENCE: Duration = Duration::from_secs(2);

impl ConfigFile {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("In {}", path.display()))
    }

    /// Converts the file representation into validated configuration values.
    pub fn into_replay_config(self) -> Result<ReplayConfig> {
        let defaults = RecognizerConfig::default();
        let section = self.recognizer;

        let recognizer = RecognizerConfig {
            edge_threshold: section.edge_threshold.unwrap_or(defaults.edge_threshold),
            vertical_threshold: section
                .vertical_threshold
                .unwrap_or(defaults.vertical_threshold),
            min_samples_for_match: section
                .min_samples_for_match
                .unwrap_or(defaults.min_samples_for_match),
            attempt_timeout: match section.attempt_timeout {
                Some(secs) => seconds("attempt_timeout", secs)?,
                None => defaults.attempt_timeout,
            },
        };
        recognizer.validate()?;

        let max_source_silence = match self.session.max_source_silence {
            Some(secs) => seconds("max_source_silence", secs)?,
            None => DEFAULT_MAX_SOURCE_SILENCE,
        };

        Ok(ReplayConfig {
            recognizer,
            max_source_silence,
        })
    }
}

fn seconds(key: &str, secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs)
        .with_context(|| format!("`{key}` must be a non-negative number of seconds, was: {secs}"))
}
