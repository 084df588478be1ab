//! Configuration file support

use roast_core::{ExchangeConfig, HttpChatService};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Configuration for roast
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chat endpoint URL
    pub endpoint: Option<String>,
    /// Per-exchange deadline in milliseconds
    pub timeout_ms: Option<u64>,
    /// Text sent automatically on startup
    pub greeting: Option<String>,
    /// Whether to use TUI mode by default
    pub tui: Option<bool>,
}

impl Config {
    /// Get the config directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("roast")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("ROAST_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// Parse config from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load config from file, falling back to defaults with a warning
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, content)
    }

    /// Create a default config file if it doesn't exist
    pub fn init() -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        if path.exists() {
            return Ok(path);
        }

        let default_config = Config {
            endpoint: Some(HttpChatService::DEFAULT_ENDPOINT.to_string()),
            timeout_ms: Some(ExchangeConfig::DEFAULT_TIMEOUT.as_millis() as u64),
            greeting: Some(ExchangeConfig::DEFAULT_GREETING.to_string()),
            tui: Some(true),
        };

        default_config.save()?;
        Ok(path)
    }
}

/// Generate example config content
pub fn example_config() -> &'static str {
    r#"# roast configuration file
# Place at ~/.config/roast/config.toml (Linux/Mac) or %APPDATA%\roast\config.toml (Windows)
# or point ROAST_CONFIG_PATH at it

# Chat endpoint; receives {"message": "..."} and answers {"reply": "..."}
endpoint = "https://comp-eb.onrender.com/chat"

# Give up on a reply after this many milliseconds
timeout_ms = 30000

# Sent automatically when the client starts (not shown as a user message)
greeting = "Hello"

# Whether to use TUI mode by default (true by default)
# Set to false for simple stdin/stdout mode
tui = true
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_parses() {
        let config = Config::parse(example_config()).unwrap();
        assert_eq!(
            config.endpoint.as_deref(),
            Some("https://comp-eb.onrender.com/chat")
        );
        assert_eq!(config.timeout_ms, Some(30_000));
        assert_eq!(config.greeting.as_deref(), Some("Hello"));
        assert_eq!(config.tui, Some(true));
    }

    #[test]
    fn test_missing_fields_default() {
        let config = Config::parse("tui = false").unwrap();
        assert_eq!(
            config,
            Config {
                tui: Some(false),
                ..Config::default()
            }
        );
    }

    #[test]
    fn test_wrong_type_rejected() {
        assert!(Config::parse("timeout_ms = \"soon\"").is_err());
    }
}
