//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`SCOUT_API_KEY`, `SCOUT_BASE_URL`, `SCOUT_MODEL`,
//!    `SCOUT_API_TIMEOUT_SECS`)
//! 2. TOML file specified via the --config CLI flag
//! 3. ./scout.toml in the current directory
//! 4. $XDG_CONFIG_HOME/scout/scout.toml (or ~/.config/scout/scout.toml)
//! 5. Built-in defaults
//!
//! The bearer credential is read once here; its absence is reported to the
//! caller as a fatal construction error.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";
pub const DEFAULT_MODEL: &str = "sonar-reasoning-pro";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 60;

/// Top-level runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub network: NetworkConfig,
    pub display: DisplayConfig,
}

/// Resolved API connection settings used by the query client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Clone, Copy)]
pub struct NetworkConfig {
    pub api_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct DisplayConfig {
    pub color: bool,
}

// ---------------------------------------------------------------------------
// File schema
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    api: FileApiConfig,
    network: FileNetworkConfig,
    display: FileDisplayConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileApiConfig {
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct FileNetworkConfig {
    api_timeout_secs: u64,
}

impl Default for FileNetworkConfig {
    fn default() -> Self {
        Self {
            api_timeout_secs: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct FileDisplayConfig {
    color: bool,
}

impl Default for FileDisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from the --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<Config, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let config_text = read_config_text(path_override, &read_file, &config_root)?;
    let parsed: FileConfig = toml::from_str(&config_text)?;

    let mut config = Config {
        api: ApiConfig {
            base_url: normalized(&parsed.api.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: parsed.api.api_key.trim().to_string(),
            model: normalized(&parsed.api.model).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        },
        network: NetworkConfig {
            api_timeout_secs: parsed.network.api_timeout_secs.max(1),
        },
        display: DisplayConfig {
            color: parsed.display.color,
        },
    };

    apply_env_overrides(&mut config, &env_lookup)?;
    config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
    Ok(config)
}

fn read_config_text<FRead, FRoot>(
    path_override: Option<&str>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<String, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    if let Some(p) = path_override {
        // An explicit path must exist; silent fallback would mask typos.
        return Ok(read_file(Path::new(p))?);
    }

    if let Ok(text) = read_file(Path::new("scout.toml")) {
        return Ok(text);
    }
    if let Some(dir) = config_root() {
        let global = dir.join("scout").join("scout.toml");
        if let Ok(text) = read_file(&global) {
            return Ok(text);
        }
    }

    Ok(String::new())
}

fn apply_env_overrides<FEnv>(config: &mut Config, env_lookup: &FEnv) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(key) = env_lookup("SCOUT_API_KEY") {
        config.api.api_key = key.trim().to_string();
    }
    if let Some(url) = env_lookup("SCOUT_BASE_URL") {
        config.api.base_url = url;
    }
    if let Some(model) = env_lookup("SCOUT_MODEL") {
        config.api.model = model;
    }
    if let Some(timeout) = env_lookup("SCOUT_API_TIMEOUT_SECS") {
        let parsed = timeout.parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid SCOUT_API_TIMEOUT_SECS value `{timeout}`: expected positive integer seconds"
            ))
        })?;
        // Clamp to at least 1 second to avoid accidental no-timeout behavior.
        config.network.api_timeout_secs = parsed.max(1);
    }
    Ok(())
}

/// Fail construction when no bearer credential was resolved.
///
/// The startup collaborator prints the actionable message and exits.
pub fn require_api_key(config: &Config) -> Result<(), ConfigError> {
    if config.api.api_key.is_empty() {
        return Err(ConfigError::Invalid(
            "no API key found; set the SCOUT_API_KEY environment variable".to_string(),
        ));
    }
    Ok(())
}

fn normalized(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn load_for_test(
        path_override: Option<&str>,
        files: BTreeMap<String, String>,
        env: BTreeMap<String, String>,
    ) -> Result<Config, ConfigError> {
        load_config_from_sources(
            path_override,
            move |path| {
                let key = path.to_string_lossy().into_owned();
                files
                    .get(&key)
                    .cloned()
                    .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, key))
            },
            move |name| env.get(name).cloned(),
            || Some(PathBuf::from("/cfg")),
        )
    }

    #[test]
    fn defaults_apply_without_any_sources() {
        let c = load_for_test(None, BTreeMap::new(), BTreeMap::new()).unwrap();
        assert_eq!(c.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(c.api.model, DEFAULT_MODEL);
        assert!(c.api.api_key.is_empty());
        assert_eq!(c.network.api_timeout_secs, DEFAULT_API_TIMEOUT_SECS);
        assert!(c.display.color);
    }

    #[test]
    fn local_file_overrides_defaults() {
        let mut files = BTreeMap::new();
        files.insert(
            "scout.toml".to_string(),
            r#"
            [api]
            base_url = "https://local.example/v1/"
            model = "sonar-pro"

            [display]
            color = false
            "#
            .to_string(),
        );
        let c = load_for_test(None, files, BTreeMap::new()).unwrap();
        // Trailing slash is stripped so URL joining stays predictable.
        assert_eq!(c.api.base_url, "https://local.example/v1");
        assert_eq!(c.api.model, "sonar-pro");
        assert!(!c.display.color);
    }

    #[test]
    fn global_file_is_used_when_local_absent() {
        let mut files = BTreeMap::new();
        files.insert(
            "/cfg/scout/scout.toml".to_string(),
            "[api]\nmodel = \"global-model\"\n".to_string(),
        );
        let c = load_for_test(None, files, BTreeMap::new()).unwrap();
        assert_eq!(c.api.model, "global-model");
    }

    #[test]
    fn env_overrides_beat_file_values() {
        let mut files = BTreeMap::new();
        files.insert(
            "scout.toml".to_string(),
            "[api]\napi_key = \"file-key\"\nmodel = \"file-model\"\n".to_string(),
        );
        let mut env = BTreeMap::new();
        env.insert("SCOUT_API_KEY".to_string(), " env-key ".to_string());
        env.insert("SCOUT_MODEL".to_string(), "env-model".to_string());
        env.insert("SCOUT_API_TIMEOUT_SECS".to_string(), "9".to_string());
        let c = load_for_test(None, files, env).unwrap();
        assert_eq!(c.api.api_key, "env-key");
        assert_eq!(c.api.model, "env-model");
        assert_eq!(c.network.api_timeout_secs, 9);
    }

    #[test]
    fn invalid_timeout_value_is_rejected() {
        let mut env = BTreeMap::new();
        env.insert("SCOUT_API_TIMEOUT_SECS".to_string(), "soon".to_string());
        let err = load_for_test(None, BTreeMap::new(), env).unwrap_err();
        assert!(err.to_string().contains("SCOUT_API_TIMEOUT_SECS"));
    }

    #[test]
    fn explicit_config_path_must_exist() {
        let err = load_for_test(Some("missing.toml"), BTreeMap::new(), BTreeMap::new());
        assert!(err.is_err());
    }

    #[test]
    fn missing_api_key_fails_construction() {
        let c = load_for_test(None, BTreeMap::new(), BTreeMap::new()).unwrap();
        let err = require_api_key(&c).unwrap_err();
        assert!(err.to_string().contains("SCOUT_API_KEY"));
    }

    #[test]
    fn present_api_key_passes_check() {
        let mut env = BTreeMap::new();
        env.insert("SCOUT_API_KEY".to_string(), "pplx-abc".to_string());
        let c = load_for_test(None, BTreeMap::new(), env).unwrap();
        assert!(require_api_key(&c).is_ok());
    }
}
