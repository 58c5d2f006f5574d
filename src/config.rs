use crate::command::DEFAULT_HISTORY_LIMIT;
use crate::error::ConfigError;
use crate::id_generator::IdStrategy;
use crate::schema::SchemaConfig;
use serde::{Deserialize, Serialize};

/// Settings for a [`crate::FormEditor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to their defaults
pub struct BuilderConfig {
    pub schema: SchemaConfig,
    pub ids: IdStrategy,
    /// Number of undo steps kept; 0 disables undo
    pub history_limit: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            schema: SchemaConfig::default(),
            ids: IdStrategy::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl BuilderConfig {
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        if !value.is_object() {
            return Err(ConfigError::Invalid("expected a JSON object".into()));
        }
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PlaceholderKey;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = BuilderConfig::from_json(r#"{"ids": "uuid"}"#).unwrap();
        assert_eq!(config.ids, IdStrategy::Uuid);
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(config.schema.placeholder_key, PlaceholderKey::Examples);
    }

    #[test]
    fn test_placeholder_key_from_json() {
        let config =
            BuilderConfig::from_json(r#"{"schema": {"placeholder_key": "both"}, "history_limit": 0}"#)
                .unwrap();
        assert_eq!(config.schema.placeholder_key, PlaceholderKey::Both);
        assert_eq!(config.history_limit, 0);
    }

    #[test]
    fn test_malformed_config() {
        assert!(matches!(
            BuilderConfig::from_json("{ids: }"),
            Err(ConfigError::Parse(_))
        ));
    }
}
