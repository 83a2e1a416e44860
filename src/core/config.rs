//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.lumi/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::completion::ADVISOR_DIRECTIVE;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LumiConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub model: Option<String>,
    pub max_reply_tokens: Option<u32>,
    pub default_category: Option<String>,
    pub system_prompt: Option<String>,
    pub system_prompt_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EndpointConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_MAX_REPLY_TOKENS: u32 = 400;
pub const DEFAULT_ENDPOINT_BASE_URL: &str = "https://api.openai.com/v1";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub model_name: String,
    pub max_reply_tokens: u32,
    pub system_prompt: String,
    pub api_key: Option<String>,
    pub endpoint_base_url: String,
    pub catalog_url: Option<String>,
    pub initial_category: Option<String>,
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

/// Returns the path to `~/.lumi/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".lumi").join("config.toml"))
}

/// Load config from `~/.lumi/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `LumiConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LumiConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(LumiConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(LumiConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: LumiConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Lumi Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# model = "gpt-4o"
# max_reply_tokens = 400
# default_category = "skincare"
# system_prompt = "You are a helpful beauty advisor."
# system_prompt_file = "advisor.md"  # Path relative to ~/.lumi/

# [endpoint]
# api_key = "sk-..."                 # Or set OPENAI_API_KEY env var
# base_url = "https://api.openai.com/v1"

# [catalog]
# url = "https://example.com/products.json"  # Or set LUMI_CATALOG_URL env var
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
/// `cli_category` is the `--category` flag (None = not specified).
pub fn resolve(config: &LumiConfig, cli_category: Option<&str>) -> ResolvedConfig {
    // Model: env → config → default
    let model_name = std::env::var("LUMI_MODEL")
        .ok()
        .or_else(|| config.general.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // System prompt: inline config wins over file, both win over default
    let system_prompt = resolve_system_prompt(config);

    // API key: env → config
    let api_key = std::env::var("OPENAI_API_KEY")
        .ok()
        .or_else(|| config.endpoint.api_key.clone());

    // Endpoint base URL: env → config → default
    let endpoint_base_url = std::env::var("OPENAI_BASE_URL")
        .ok()
        .or_else(|| config.endpoint.base_url.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT_BASE_URL.to_string());

    // Catalog URL: env → config (no default — the grid explains how to set it)
    let catalog_url = std::env::var("LUMI_CATALOG_URL")
        .ok()
        .or_else(|| config.catalog.url.clone());

    // Initial category: CLI → config
    let initial_category = cli_category
        .map(|s| s.to_string())
        .or_else(|| config.general.default_category.clone());

    ResolvedConfig {
        model_name,
        max_reply_tokens: config
            .general
            .max_reply_tokens
            .unwrap_or(DEFAULT_MAX_REPLY_TOKENS),
        system_prompt,
        api_key,
        endpoint_base_url,
        catalog_url,
        initial_category,
    }
}

/// Resolves the system prompt: inline wins over file, both win over default.
fn resolve_system_prompt(config: &LumiConfig) -> String {
    // Inline system_prompt takes priority
    if let Some(ref prompt) = config.general.system_prompt {
        return prompt.clone();
    }

    // Try loading from system_prompt_file (relative to ~/.lumi/)
    if let Some(ref file) = config.general.system_prompt_file {
        if let Some(home) = dirs::home_dir() {
            let prompt_path = home.join(".lumi").join(file);
            match fs::read_to_string(&prompt_path) {
                Ok(contents) => {
                    let trimmed = contents.trim().to_string();
                    if !trimmed.is_empty() {
                        info!("Loaded system prompt from {}", prompt_path.display());
                        return trimmed;
                    }
                    warn!("System prompt file is empty: {}", prompt_path.display());
                }
                Err(e) => {
                    warn!(
                        "Failed to read system prompt file {}: {}",
                        prompt_path.display(),
                        e
                    );
                }
            }
        }
    }

    ADVISOR_DIRECTIVE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = LumiConfig::default();
        assert!(config.general.model.is_none());
        assert!(config.endpoint.api_key.is_none());
        assert!(config.catalog.url.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = LumiConfig::default();
        let resolved = resolve(&config, None);
        assert_eq!(resolved.max_reply_tokens, DEFAULT_MAX_REPLY_TOKENS);
        assert_eq!(resolved.endpoint_base_url, DEFAULT_ENDPOINT_BASE_URL);
        assert!(resolved.catalog_url.is_none());
        assert!(resolved.initial_category.is_none());
        assert!(
            resolved
                .system_prompt
                .starts_with("You are a helpful beauty advisor")
        );
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = LumiConfig {
            general: GeneralConfig {
                model: Some("my-model".to_string()),
                max_reply_tokens: Some(1200),
                default_category: Some("haircare".to_string()),
                system_prompt: Some("Custom prompt.".to_string()),
                system_prompt_file: None,
            },
            endpoint: EndpointConfig {
                api_key: Some("sk-test".to_string()),
                base_url: Some("http://localhost:9999/v1".to_string()),
            },
            catalog: CatalogConfig {
                url: Some("http://localhost:9999/products.json".to_string()),
            },
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.model_name, "my-model");
        assert_eq!(resolved.max_reply_tokens, 1200);
        assert_eq!(resolved.initial_category.as_deref(), Some("haircare"));
        assert_eq!(resolved.system_prompt, "Custom prompt.");
        assert_eq!(
            resolved.catalog_url.as_deref(),
            Some("http://localhost:9999/products.json")
        );
    }

    #[test]
    fn test_resolve_cli_category_wins() {
        let config = LumiConfig {
            general: GeneralConfig {
                default_category: Some("makeup".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("fragrance"));
        assert_eq!(resolved.initial_category.as_deref(), Some("fragrance"));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
model = "gpt-4o"
max_reply_tokens = 400
default_category = "skincare"

[endpoint]
api_key = "sk-test-123"

[catalog]
url = "https://shop.example.com/products.json"
"#;
        let config: LumiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.model.as_deref(), Some("gpt-4o"));
        assert_eq!(config.general.max_reply_tokens, Some(400));
        assert_eq!(config.endpoint.api_key.as_deref(), Some("sk-test-123"));
        assert_eq!(
            config.catalog.url.as_deref(),
            Some("https://shop.example.com/products.json")
        );
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[catalog]
url = "https://shop.example.com/products.json"
"#;
        let config: LumiConfig = toml::from_str(toml_str).unwrap();
        assert!(config.catalog.url.is_some());
        assert!(config.general.model.is_none());
        assert!(config.endpoint.api_key.is_none());
    }

    #[test]
    fn test_inline_system_prompt_wins_over_file() {
        let config = LumiConfig {
            general: GeneralConfig {
                system_prompt: Some("Inline wins.".to_string()),
                system_prompt_file: Some("should-not-load.md".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.system_prompt, "Inline wins.");
    }
}
