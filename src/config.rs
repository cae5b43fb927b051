//! Application configuration
//!
//! Every field has a default, so an empty JSON object (or no config at
//! all) yields the stock setup used on static hosting.

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Local storage key holding the entry list
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Path prefix applied when served from one of `base_path_hosts`
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Origins (substring match) that serve the app under `base_path`
    #[serde(default = "default_base_path_hosts")]
    pub base_path_hosts: Vec<String>,

    /// Font size the text is measured at before scaling
    #[serde(default = "default_baseline_font_px")]
    pub baseline_font_px: f32,

    /// Size used when the text cannot be measured
    #[serde(default = "default_min_font_px")]
    pub min_font_px: f32,

    /// Optional cap on fitted sizes
    #[serde(default)]
    pub max_font_px: Option<f32>,
}

fn default_storage_key() -> String {
    "texts".to_string()
}

fn default_base_path() -> String {
    "/big-text-now".to_string()
}

fn default_base_path_hosts() -> Vec<String> {
    vec!["github.io".to_string()]
}

fn default_baseline_font_px() -> f32 {
    100.0
}

fn default_min_font_px() -> f32 {
    8.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            base_path: default_base_path(),
            base_path_hosts: default_base_path_hosts(),
            baseline_font_px: default_baseline_font_px(),
            min_font_px: default_min_font_px(),
            max_font_px: None,
        }
    }
}

impl AppConfig {
    /// Parse a JSON config, filling in defaults for missing fields
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: AppConfig =
            serde_json::from_str(raw).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.storage_key.is_empty() {
            return Err(Error::Config("storage_key must not be empty".into()));
        }
        if !(self.baseline_font_px > 0.0) {
            return Err(Error::Config("baseline_font_px must be positive".into()));
        }
        if !(self.min_font_px > 0.0) {
            return Err(Error::Config("min_font_px must be positive".into()));
        }
        if let Some(max) = self.max_font_px {
            if max < self.min_font_px {
                return Err(Error::Config("max_font_px is below min_font_px".into()));
            }
        }
        Ok(())
    }

    /// Path prefix in effect for a page served from `origin`
    pub fn base_path_for(&self, origin: &str) -> &str {
        if self.base_path_hosts.iter().any(|host| origin.contains(host.as_str())) {
            self.base_path.trim_end_matches('/')
        } else {
            ""
        }
    }
}
