//! Environment configuration
//!
//! All configuration is environment-provided (optionally through a `.env`
//! file loaded by the binary before `init_config` runs). Loaded once at
//! startup; handlers read through `get_config`.

use std::env;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub views: ViewsConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub pool_size: u32,
}

#[derive(Clone, Debug)]
pub struct ViewsConfig {
    /// View counting can be disabled entirely; resolution still works.
    pub enable_tracking: bool,
    pub flush_interval_secs: u64,
    pub flush_threshold: usize,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    /// Empty or unset means stdout.
    pub file: Option<String>,
    /// "text" or "json".
    pub format: String,
}

impl AppConfig {
    fn from_env() -> Self {
        AppConfig {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("SERVER_PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(3000),
            },
            database: DatabaseConfig {
                database_url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite://shortlnk.db?mode=rwc".to_string()),
                pool_size: env::var("DATABASE_POOL_SIZE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            },
            views: ViewsConfig {
                enable_tracking: env::var("VIEW_TRACKING")
                    .map(|v| v != "false" && v != "0")
                    .unwrap_or(true),
                flush_interval_secs: env::var("VIEW_FLUSH_INTERVAL")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
                flush_threshold: env::var("VIEW_FLUSH_THRESHOLD")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(100),
            },
            logging: LoggingConfig {
                level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                file: env::var("LOG_FILE").ok().filter(|f| !f.is_empty()),
                format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
            },
        }
    }
}

/// Load configuration from the environment. Idempotent; the first call wins.
pub fn init_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::from_env)
}

/// Configuration accessor. Initializes from the environment on first use
/// so tests do not need an explicit `init_config` call.
pub fn get_config() -> &'static AppConfig {
    init_config()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // Not using env vars here; from_env falls back to defaults for
        // anything unset in the test environment.
        let config = AppConfig::from_env();
        assert!(!config.database.database_url.is_empty());
        assert!(config.views.flush_interval_secs > 0);
        assert!(config.views.flush_threshold > 0);
    }
}
