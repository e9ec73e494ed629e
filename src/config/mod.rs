//! # Configuration Management Module
//!
//! Centralized configuration for the questlog server with validation,
//! defaults, and TOML persistence.
//!
//! ## Configuration Structure
//!
//! - [`ServerConfig`] - HTTP bind address and port
//! - [`StorageConfig`] - Data persistence settings
//! - [`GameConfig`] - Starting balances and admin accounts
//! - [`LoggingConfig`] - Logging and debugging settings
//!
//! ## Usage
//!
//! ```rust,no_run
//! use questlog::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     println!("Listening on {}:{}", config.server.host, config.server.port);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 4000
//!
//! [storage]
//! data_dir = "./data"
//!
//! [game]
//! starting_coins = 100
//! starting_gems = 5
//! admin_emails = ["admin@example.com"]
//!
//! [logging]
//! level = "info"
//! file = "questlog.log"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
    /// Skip loading the bundled achievement and reward catalog on first run.
    #[serde(default)]
    pub skip_seed_library: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            skip_seed_library: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Coins granted to every new account.
    #[serde(default = "default_starting_coins")]
    pub starting_coins: i64,
    /// Gems granted to every new account.
    #[serde(default = "default_starting_gems")]
    pub starting_gems: i64,
    /// Accounts registered with one of these emails get the admin role.
    #[serde(default)]
    pub admin_emails: Vec<String>,
}

fn default_starting_coins() -> i64 {
    100
}

fn default_starting_gems() -> i64 {
    5
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_coins: default_starting_coins(),
            starting_gems: default_starting_gems(),
            admin_emails: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some("questlog.log".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Sanity checks before the server starts.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(anyhow!("server.host must not be empty"));
        }
        if self.server.port == 0 {
            return Err(anyhow!("server.port must be non-zero"));
        }
        if self.storage.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir must not be empty"));
        }
        if self.game.starting_coins < 0 || self.game.starting_gems < 0 {
            return Err(anyhow!("starting balances must not be negative"));
        }
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            other => return Err(anyhow!("unknown logging.level '{}'", other)),
        }
        Ok(())
    }

    /// True when `email` should receive the admin role at registration.
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.game
            .admin_emails
            .iter()
            .any(|a| a.eq_ignore_ascii_case(email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.game.starting_coins, 100);
        assert_eq!(config.game.starting_gems, 5);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            "#,
        )
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.data_dir, "./data");
        assert_eq!(config.game.starting_gems, 5);
    }

    #[test]
    fn rejects_bad_level() {
        let mut config = Config::default();
        config.logging.level = "chatty".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn admin_email_match_is_case_insensitive() {
        let mut config = Config::default();
        config.game.admin_emails = vec!["Admin@Example.com".to_string()];
        assert!(config.is_admin_email("admin@example.com"));
        assert!(!config.is_admin_email("user@example.com"));
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.server.port, config.server.port);
        assert_eq!(back.logging.level, config.logging.level);
    }
}
