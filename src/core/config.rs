//! Codex configuration with documented defaults
//!
//! Loaded from a TOML file (usually `codex.toml`) or built from defaults.
//! Every field is optional in the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::error::{CodexError, Result};

/// Configuration for content loading and effect evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodexConfig {
    /// Directory scanned for species content files (`.toml` / `.json`)
    ///
    /// When unset, only the built-in catalog is loaded.
    pub content_dir: Option<PathBuf>,

    /// Reject records with validation issues instead of logging warnings
    pub strict: bool,

    /// Game rule: every policy costs 1 influence to adopt
    pub cheap_policies: bool,

    /// Happiness change per liked (or disliked) item present for a planet
    ///
    /// Applied by the opinion effects each species carries. At 0.5, four
    /// liked policies lift a planet's target happiness by 2.
    pub opinion_effect_scale: f64,

    /// Baseline target happiness before species modifiers
    pub base_happiness: f64,

    /// Default tracing filter used by the binary when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for CodexConfig {
    fn default() -> Self {
        Self {
            content_dir: None,
            strict: false,
            cheap_policies: false,
            opinion_effect_scale: 0.5,
            base_happiness: 5.0,
            log_filter: "stellar_codex=info".to_string(),
        }
    }
}

impl CodexConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text, filling missing fields with defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CodexConfig = toml::from_str(content)?;
        config.validate().map_err(CodexError::Config)?;
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.opinion_effect_scale.is_finite() || self.opinion_effect_scale < 0.0 {
            return Err(format!(
                "opinion_effect_scale ({}) must be a non-negative number",
                self.opinion_effect_scale
            ));
        }

        if !self.base_happiness.is_finite() {
            return Err("base_happiness must be finite".into());
        }

        if self.log_filter.trim().is_empty() {
            return Err("log_filter must not be empty".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(CodexConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = CodexConfig::from_toml_str(
            r#"
strict = true
content_dir = "content/species"
"#,
        )
        .unwrap();

        assert!(config.strict);
        assert_eq!(config.content_dir, Some(PathBuf::from("content/species")));
        assert!(!config.cheap_policies);
        assert!((config.opinion_effect_scale - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_scale_rejected() {
        let result = CodexConfig::from_toml_str("opinion_effect_scale = -1.0");
        assert!(matches!(result, Err(CodexError::Config(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = CodexConfig::from_toml_str("strict = ");
        assert!(matches!(result, Err(CodexError::TomlError(_))));
    }
}
