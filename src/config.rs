// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Tunables of the filtering pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Minimum similarity to "yes" for an affirmative decision.
    pub fuzzy_threshold: f64,
    /// Pause between consecutive postings, respecting upstream rate limits.
    pub request_delay_secs: f64,
    /// Timeout for one page-scrape request.
    pub scrape_timeout_secs: u64,
    /// Whether apply links are scraped for extra classification context.
    pub scrape_links: bool,
    /// Failure bias: `true` keeps a posting when its pipeline fails
    /// (favoring recall), `false` removes it (favoring precision).
    pub keep_on_failure: bool,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 0.7,
            request_delay_secs: 0.5,
            scrape_timeout_secs: 10,
            scrape_links: true,
            keep_on_failure: true,
        }
    }
}

impl FilterSettings {
    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    pub fn with_request_delay_secs(mut self, delay: f64) -> Self {
        self.request_delay_secs = delay;
        self
    }

    pub fn with_scrape_timeout_secs(mut self, timeout: u64) -> Self {
        self.scrape_timeout_secs = timeout;
        self
    }

    pub fn with_scrape_links(mut self, scrape: bool) -> Self {
        self.scrape_links = scrape;
        self
    }

    pub fn with_keep_on_failure(mut self, keep: bool) -> Self {
        self.keep_on_failure = keep;
        self
    }

    /// Load settings for the current environment from `config.yaml`;
    /// defaults apply when the file is absent.
    pub fn load() -> Result<Self> {
        let config_path = PathBuf::from("config.yaml");
        if !config_path.exists() {
            info!("config.yaml not found, using default filter settings");
            return Ok(Self::default());
        }

        let config_content =
            std::fs::read_to_string(&config_path).context("Failed to read config.yaml")?;
        let config_file: SettingsFile =
            serde_yaml::from_str(&config_content).context("Failed to parse config.yaml")?;

        let environment = environment_name();
        info!("Loaded filter settings for environment: {}", environment);
        Ok(match environment.as_str() {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SettingsFile {
    local: FilterSettings,
    production: FilterSettings,
}

fn environment_name() -> String {
    std::env::var("SMBFILTER_ENV")
        .or_else(|_| std::env::var("ENVIRONMENT"))
        .or_else(|_| std::env::var("ENV"))
        .unwrap_or_else(|_| "local".to_string())
}

/// The Gemini credential as an explicit state instead of a sentinel empty
/// string. `NotConfigured` is a supported mode: classification degrades to
/// the denylist and default verdicts.
#[derive(Debug, Clone)]
pub enum GeminiCredential {
    Configured(String),
    NotConfigured,
}

impl GeminiCredential {
    pub fn from_env() -> Self {
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Self::Configured(key),
            _ => Self::NotConfigured,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let settings = FilterSettings::default();
        assert_eq!(settings.fuzzy_threshold, 0.7);
        assert_eq!(settings.request_delay_secs, 0.5);
        assert_eq!(settings.scrape_timeout_secs, 10);
        assert!(settings.scrape_links);
        assert!(settings.keep_on_failure);
    }

    #[test]
    fn builders_override_single_fields() {
        let settings = FilterSettings::default()
            .with_fuzzy_threshold(0.9)
            .with_scrape_links(false);
        assert_eq!(settings.fuzzy_threshold, 0.9);
        assert!(!settings.scrape_links);
        assert_eq!(settings.request_delay_secs, 0.5);
    }

    #[test]
    fn settings_file_fills_missing_fields_from_defaults() {
        let yaml = "
local:
  scrape_links: false
production:
  request_delay_secs: 1.0
";
        let file: SettingsFile = serde_yaml::from_str(yaml).unwrap();
        assert!(!file.local.scrape_links);
        assert_eq!(file.local.fuzzy_threshold, 0.7);
        assert_eq!(file.production.request_delay_secs, 1.0);
        assert!(file.production.scrape_links);
    }
}
