//! Application configuration management.

use std::collections::HashMap;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Dashboard configuration.
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// Category presentation configuration.
    #[serde(default)]
    pub categories: CategoriesConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
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

/// Dashboard configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// How many recent entries the dashboard returns.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u64,
    /// Default number of months in the trend window.
    #[serde(default = "default_trend_months")]
    pub trend_months: u32,
}

fn default_recent_limit() -> u64 {
    10
}

fn default_trend_months() -> u32 {
    6
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
            trend_months: default_trend_months(),
        }
    }
}

/// Category presentation configuration.
///
/// Colors live here instead of in code so a deployment can restyle its
/// dashboard without a rebuild. Unknown categories get the fallback color.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesConfig {
    /// Category key to hex color.
    #[serde(default)]
    pub palette: HashMap<String, String>,
    /// Color for categories missing from the palette.
    #[serde(default = "default_fallback_color")]
    pub fallback_color: String,
}

fn default_fallback_color() -> String {
    "#757575".to_string()
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            palette: HashMap::new(),
            fallback_color: default_fallback_color(),
        }
    }
}

impl CategoriesConfig {
    /// Returns the configured color for a category, or the fallback.
    #[must_use]
    pub fn color_for(&self, category: &str) -> &str {
        self.palette
            .get(category)
            .map_or(self.fallback_color.as_str(), String::as_str)
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
            .add_source(config::Environment::with_prefix("CENTAVO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
