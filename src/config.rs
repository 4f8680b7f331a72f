//! Configuration management module
//!
//! Loads and validates environment-based configuration.
//! Designed to be production-ready and easily extensible.

use serde::Deserialize;
use std::env;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid number format in environment variable")]
    ParseError,
}

/// Server configuration settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Security configuration settings
#[derive(Debug, Clone, Deserialize)]
pub struct SecuritySettings {
    /// HS256 signing secret for bearer tokens
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub token_ttl_hours: i64,
}

/// History query settings
#[derive(Debug, Clone, Deserialize)]
pub struct HistorySettings {
    /// Maximum records returned by a history query
    pub limit: usize,
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub security: SecuritySettings,
    pub history: HistorySettings,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self, SettingsError> {
        let port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .map_err(|_| SettingsError::ParseError)?;

        let token_ttl_hours = env::var("TOKEN_TTL_HOURS")
            .unwrap_or_else(|_| "24".into())
            .parse()
            .map_err(|_| SettingsError::ParseError)?;

        let history_limit = env::var("HISTORY_LIMIT")
            .unwrap_or_else(|_| "50".into())
            .parse()
            .map_err(|_| SettingsError::ParseError)?;

        Ok(Self {
            server: ServerSettings {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
                port,
            },
            security: SecuritySettings {
                jwt_secret: env::var("JWT_SECRET")
                    .unwrap_or_else(|_| "fitlife-dev-secret".into()),
                token_ttl_hours,
            },
            history: HistorySettings {
                limit: history_limit,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        env::remove_var("SERVER_HOST");
        env::remove_var("SERVER_PORT");
        env::remove_var("TOKEN_TTL_HOURS");
        env::remove_var("HISTORY_LIMIT");

        let settings = Settings::from_env().unwrap();

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.security.token_ttl_hours, 24);
        assert_eq!(settings.history.limit, 50);
    }

    #[test]
    fn test_custom_settings() {
        env::set_var("SERVER_PORT", "3000");
        env::set_var("HISTORY_LIMIT", "10");

        let settings = Settings::from_env().unwrap();

        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.history.limit, 10);

        env::remove_var("SERVER_PORT");
        env::remove_var("HISTORY_LIMIT");
    }
}
