// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Engine Configuration
//!
//! Options controlling how completion results are rendered for a client.
//! Every field has a default, so an empty JSON object is a valid configuration.
//!
//! ## Example
//!
//! ```rust
//! use typeql_lsp::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{ "maxItems": 20 }"#).unwrap();
//! assert_eq!(config.max_items, 20);
//! assert!(config.snippets);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key under which clients nest TypeQL settings
pub const SETTINGS_KEY: &str = "typeql";

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Maximum number of rendered completion items
    pub max_items: usize,

    /// Render nested-pattern templates as snippets with tab stops
    pub snippets: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_items: 100,
            snippets: true,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse engine config from LSP initialization options or settings
    ///
    /// Expected shape:
    /// {
    ///   "typeql": {
    ///     "maxItems": 50,
    ///     "snippets": false
    ///   }
    /// }
    ///
    /// A payload without the `typeql` key yields the default configuration.
    pub fn from_lsp_settings(settings: &Value) -> Result<Self, ConfigError> {
        let Some(typeql) = settings.get(SETTINGS_KEY) else {
            return Ok(Self::default());
        };
        let config = Self::deserialize(typeql)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_items == 0 {
            return Err(ConfigError::InvalidMaxItems);
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Malformed JSON or unknown option
    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("maxItems must be greater than zero")]
    InvalidMaxItems,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_from_empty_object() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.max_items, 100);
        assert!(config.snippets);
    }

    #[test]
    fn test_camel_case_fields() {
        let config = EngineConfig::from_json_str(r#"{"maxItems": 5, "snippets": false}"#).unwrap();
        assert_eq!(config.max_items, 5);
        assert!(!config.snippets);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            EngineConfig::from_json_str("{ maxItems"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            EngineConfig::from_json_str(r#"{"max_items": 5}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_zero_max_items_is_rejected() {
        let err = EngineConfig::from_json_str(r#"{"maxItems": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMaxItems));
        assert_eq!(err.to_string(), "maxItems must be greater than zero");
    }

    #[test]
    fn test_from_lsp_settings() {
        let settings = json!({ "typeql": { "snippets": false } });
        let config = EngineConfig::from_lsp_settings(&settings).unwrap();
        assert!(!config.snippets);
        assert_eq!(config.max_items, 100);

        let config = EngineConfig::from_lsp_settings(&json!({ "other": 1 })).unwrap();
        assert_eq!(config, EngineConfig::default());

        let settings = json!({ "typeql": { "maxItems": "many" } });
        assert!(EngineConfig::from_lsp_settings(&settings).is_err());
    }
}
