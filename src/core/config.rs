//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.askai/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::completion::DEFAULT_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AskaiConfig {
    #[serde(default)]
    pub openai: OpenAiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Engine name shown in the title bar, derived from the base URL.
    pub model_name: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.askai/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".askai").join("config.toml"))
}

/// Load config from `~/.askai/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AskaiConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<AskaiConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AskaiConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(AskaiConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: AskaiConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# askai Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [openai]
# api_key = "sk-..."                 # Or set OPENAI_API_KEY env var
# base_url = "https://api.openai.com/v1/engines/text-curie-001"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_base_url` is from the `--base-url` CLI flag (None = not specified).
pub fn resolve(config: &AskaiConfig, cli_base_url: Option<&str>) -> ResolvedConfig {
    // API key: env → config
    let api_key = std::env::var("OPENAI_API_KEY")
        .ok()
        .or_else(|| config.openai.api_key.clone());

    // Base URL: CLI → env → config → default
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("OPENAI_BASE_URL").ok())
        .or_else(|| config.openai.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let model_name = model_name_from_base_url(&base_url);

    ResolvedConfig {
        api_key,
        base_url,
        model_name,
    }
}

/// Derives a display name from an engine-scoped base URL
/// (the last non-empty path segment).
fn model_name_from_base_url(base_url: &str) -> String {
    base_url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(base_url)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_sparse() {
        let config = AskaiConfig::default();
        assert!(config.openai.api_key.is_none());
        assert!(config.openai.base_url.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = AskaiConfig::default();
        let resolved = resolve(&config, None);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.model_name, "text-curie-001");
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = AskaiConfig {
            openai: OpenAiConfig {
                api_key: Some("sk-test-123".to_string()),
                base_url: Some("http://localhost:8080/v1/engines/my-engine".to_string()),
            },
        };
        let resolved = resolve(&config, None);
        assert_eq!(
            resolved.base_url,
            "http://localhost:8080/v1/engines/my-engine"
        );
        assert_eq!(resolved.model_name, "my-engine");
    }

    #[test]
    fn test_resolve_cli_base_url_wins() {
        let config = AskaiConfig {
            openai: OpenAiConfig {
                api_key: None,
                base_url: Some("http://from-config/engines/a".to_string()),
            },
        };
        let resolved = resolve(&config, Some("http://from-cli/engines/b"));
        assert_eq!(resolved.base_url, "http://from-cli/engines/b");
        assert_eq!(resolved.model_name, "b");
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[openai]
api_key = "sk-test-123"
"#;
        let config: AskaiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-test-123"));
        assert!(config.openai.base_url.is_none());
    }

    #[test]
    fn test_model_name_handles_trailing_slash() {
        assert_eq!(
            model_name_from_base_url("https://host/v1/engines/text-curie-001/"),
            "text-curie-001"
        );
    }
}
