//! Reference URL registry configuration types

use serde::{Deserialize, Serialize};

use crate::error::BlobUrlError;

/// Default origin embedded in generated URLs (opaque origin)
pub const DEFAULT_ORIGIN: &str = "null";

/// User-provided configuration for a registry (with defaults)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegistryInputConfig {
    /// Origin placed after the `blob:` scheme (e.g., "https://app.example.com")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    /// Maximum number of live URLs (unset = unlimited)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
}

/// Resolved registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub origin: String,
    pub capacity: Option<usize>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            capacity: None,
        }
    }
}

impl From<RegistryInputConfig> for RegistryConfig {
    fn from(input: RegistryInputConfig) -> Self {
        Self {
            origin: input
                .origin
                .map(|origin| origin.trim_end_matches('/').to_string())
                .filter(|origin| !origin.is_empty())
                .unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
            capacity: input.capacity,
        }
    }
}

impl RegistryConfig {
    /// Parse a JSON input config and resolve defaults
    pub fn from_json(json: &str) -> Result<Self, BlobUrlError> {
        let input: RegistryInputConfig = serde_json::from_str(json)?;
        Ok(input.into())
    }

    /// Prefix shared by every URL issued under this config
    pub fn url_prefix(&self) -> String {
        format!("blob:{}/", self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_config_default() {
        let config = RegistryConfig::default();
        assert_eq!(config.origin, "null");
        assert_eq!(config.capacity, None);
        assert_eq!(config.url_prefix(), "blob:null/");
    }

    #[test]
    fn test_input_config_to_config() {
        let input = RegistryInputConfig {
            origin: Some("https://app.example.com/".to_string()),
            capacity: Some(8),
        };

        let config: RegistryConfig = input.into();
        assert_eq!(config.origin, "https://app.example.com");
        assert_eq!(config.capacity, Some(8));
        assert_eq!(config.url_prefix(), "blob:https://app.example.com/");
    }

    #[test]
    fn test_empty_origin_falls_back_to_default() {
        let input = RegistryInputConfig {
            origin: Some(String::new()),
            capacity: None,
        };
        let config: RegistryConfig = input.into();
        assert_eq!(config.origin, DEFAULT_ORIGIN);
    }

    #[test]
    fn test_from_json() {
        let config = RegistryConfig::from_json(r#"{"capacity": 2}"#).unwrap();
        assert_eq!(config.origin, DEFAULT_ORIGIN);
        assert_eq!(config.capacity, Some(2));

        let err = RegistryConfig::from_json(r#"{"capacity": "many"}"#).unwrap_err();
        assert!(matches!(err, BlobUrlError::InvalidConfig(_)));
    }
}
