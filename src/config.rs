//! Configuration management for CCA

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub languages: LanguagesConfig,
}

/// Gemini API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// API key. When absent, the GEMINI_API_KEY environment variable is
    /// used instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

impl ApiConfig {
    /// Config key first, environment second.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok().filter(|key| !key.is_empty()))
    }
}

/// Languages offered for analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagesConfig {
    #[serde(default = "default_languages")]
    pub enabled: Vec<String>,
}

fn default_languages() -> Vec<String> {
    vec![
        "Java".to_string(),
        "Python".to_string(),
        "C".to_string(),
        "C++".to_string(),
        "JavaScript".to_string(),
        "Rust".to_string(),
    ]
}

impl Default for LanguagesConfig {
    fn default() -> Self {
        Self {
            enabled: default_languages(),
        }
    }
}

impl Config {
    /// Get the config file path (~/.config/cca/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join("config.toml"))
    }

    /// Get the config directory path (~/.config/cca)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("cca"))
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    /// Add a language to the enabled list
    pub fn add_language(&mut self, name: &str) -> bool {
        if !self.is_language_enabled(name) {
            self.languages.enabled.push(name.to_string());
            true
        } else {
            false
        }
    }

    /// Remove a language from the enabled list
    pub fn remove_language(&mut self, name: &str) -> bool {
        let initial_len = self.languages.enabled.len();
        self.languages
            .enabled
            .retain(|l| !l.eq_ignore_ascii_case(name));
        self.languages.enabled.len() < initial_len
    }

    /// Check if a language is in the enabled list
    pub fn is_language_enabled(&self, name: &str) -> bool {
        self.languages
            .enabled
            .iter()
            .any(|l| l.eq_ignore_ascii_case(name))
    }
}

/// Infer the language from a file extension. The `--language` flag always
/// wins; this only covers the default set's common extensions.
pub fn language_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    match ext.to_ascii_lowercase().as_str() {
        "java" => Some("Java"),
        "py" => Some("Python"),
        "c" | "h" => Some("C"),
        "cpp" | "cc" | "cxx" | "hpp" => Some("C++"),
        "js" | "mjs" => Some("JavaScript"),
        "rs" => Some("Rust"),
        _ => None,
    }
}
