//! Client configuration
//!
//! Parses `~/.geode/config`, a YAML file of named contexts, each pointing at
//! one data-browser instance.

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Endpoint used when no config file exists
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";

/// Path prefix of the data-browser REST API
pub const DEFAULT_API_PREFIX: &str = "/api";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level config file
#[derive(Debug, Clone, Deserialize)]
pub struct GeodeConfig {
    /// Current context name
    pub context: String,
    /// Available contexts
    pub contexts: HashMap<String, Context>,
}

/// A single data-browser target
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Context {
    /// Host and port, scheme optional (e.g. "localhost:8080")
    pub endpoint: String,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_prefix() -> String {
    DEFAULT_API_PREFIX.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Context {
    fn default() -> Self {
        Self::from_endpoint(DEFAULT_ENDPOINT)
    }
}

impl GeodeConfig {
    /// Load configuration from the default location (~/.geode/config)
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: GeodeConfig = serde_yaml::from_str(content)?;
        if !config.contexts.contains_key(&config.context) {
            return Err(ConfigError::Invalid(format!(
                "current context '{}' is not defined",
                config.context
            )));
        }
        Ok(config)
    }

    /// Get the default config path (~/.geode/config)
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs_next::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(home.join(".geode").join("config"))
    }

    pub fn current_context(&self) -> Option<&Context> {
        self.contexts.get(&self.context)
    }

    pub fn context_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.contexts.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn get_context(&self, name: &str) -> Result<&Context, ConfigError> {
        self.contexts
            .get(name)
            .ok_or_else(|| ConfigError::ContextNotFound(name.to_string()))
    }
}

impl Context {
    /// A context for a bare endpoint with default prefix and timeout
    pub fn from_endpoint(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            api_prefix: default_api_prefix(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Full API root URL, e.g. `http://localhost:8080/api`
    pub fn api_root(&self) -> String {
        let endpoint = self.endpoint.trim().trim_end_matches('/');
        let base = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("http://{}", endpoint)
        };

        let prefix = self.api_prefix.trim().trim_matches('/');
        if prefix.is_empty() {
            base
        } else {
            format!("{}/{}", base, prefix)
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
context: local
contexts:
  local:
    endpoint: localhost:8080
  staging:
    endpoint: https://geode.staging.example.com/
    api_prefix: /browser/api/
    timeout_secs: 3
"#;
        let config = GeodeConfig::parse(yaml).unwrap();
        assert_eq!(config.context, "local");
        assert_eq!(config.context_names(), vec!["local", "staging"]);

        let local = config.current_context().unwrap();
        assert_eq!(local.api_root(), "http://localhost:8080/api");
        assert_eq!(local.timeout(), Duration::from_secs(10));

        let staging = config.get_context("staging").unwrap();
        assert_eq!(
            staging.api_root(),
            "https://geode.staging.example.com/browser/api"
        );
        assert_eq!(staging.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_unknown_current_context_is_invalid() {
        let yaml = r#"
context: missing
contexts:
  local:
    endpoint: localhost:8080
"#;
        assert!(matches!(
            GeodeConfig::parse(yaml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_context_not_found() {
        let config = GeodeConfig::parse(
            "context: a\ncontexts:\n  a:\n    endpoint: h:1\n",
        )
        .unwrap();
        assert!(matches!(
            config.get_context("b"),
            Err(ConfigError::ContextNotFound(name)) if name == "b"
        ));
    }

    #[test]
    fn test_default_context() {
        let ctx = Context::default();
        assert_eq!(ctx.api_root(), "http://localhost:8080/api");

        let bare = Context {
            api_prefix: String::new(),
            ..Context::from_endpoint("10.0.0.5:9090")
        };
        assert_eq!(bare.api_root(), "http://10.0.0.5:9090");
    }

    #[test]
    fn test_missing_file() {
        let err = GeodeConfig::load_from(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
