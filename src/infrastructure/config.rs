use crate::domain::error::AskError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_enable_emoji")]
    pub enable_emoji: bool,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    pub path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_enable")]
    pub enable: bool,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Logging {
    /// Map the configured level onto a tracing filter directive
    pub fn filter_directive(&self) -> &'static str {
        match self.level.to_uppercase().as_str() {
            "DEBUG" => "debug",
            "INFO" => "info",
            "WARN" => "warn",
            "ERROR" => "error",
            _ => "warn",
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enable: true,
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: "WARN".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            enable_emoji: true,
            llm: LlmConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            logging: Logging::default(),
        }
    }
}

// Defaults
fn default_theme() -> String {
    "temp".to_string()
}
fn default_enable_emoji() -> bool {
    true
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}
fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_model() -> String {
    "gpt-4o".to_string()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_ttl_secs() -> u64 {
    300
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("vidask").join("config.toml"))
}

/// Get dataset path (config value, or the config directory by default)
pub fn get_database_path(config: &Config) -> PathBuf {
    if let Some(path) = config.database.path.as_deref() {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // ~/.config/vidask/videos.db (Linux)
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vidask")
        .join("videos.db")
}

pub fn parse_config(content: &str) -> Result<Config, AskError> {
    Ok(toml::from_str::<Config>(content)?)
}

/// Apply environment overrides on top of a parsed config.
///
/// Only called from `load_config`; nothing below the start-up path reads
/// the environment.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup("OPENAI_API_KEY").filter(|v| !v.is_empty()) {
        config.llm.api_key = Some(key);
    }
    if let Some(path) = lookup("VIDASK_DB_PATH").filter(|v| !v.is_empty()) {
        config.database.path = Some(path);
    }
}

pub fn load_config() -> Result<Config, AskError> {
    let mut config = Config::default();

    if let Some(path) = get_config_path() {
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            match parse_config(&content) {
                Ok(parsed) => config = parsed,
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

pub fn generate_config_sample() -> Result<(), AskError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            eprintln!("Config file already exists at: {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let sample = Config::default();
        let toml_content = toml::to_string_pretty(&sample)
            .map_err(|e| AskError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, toml_content)
            .map_err(|e| AskError::Config(format!("Failed to write config file: {}", e)))?;
        println!("Generated config file at: {}", path.display());
    } else {
        return Err(AskError::Config(
            "Cannot determine config directory".to_string(),
        ));
    }

    Ok(())
}
