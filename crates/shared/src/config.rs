//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Notification configuration.
    #[serde(default)]
    pub notification: NotificationConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Notification dispatch configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Whether notifications are dispatched at all.
    #[serde(default = "default_notifications_enabled")]
    pub enabled: bool,
    /// Sender name shown to employees.
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
}

fn default_notifications_enabled() -> bool {
    true
}

fn default_sender_name() -> String {
    "Salarium".to_string()
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: default_notifications_enabled(),
            sender_name: default_sender_name(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SALARIUM").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
