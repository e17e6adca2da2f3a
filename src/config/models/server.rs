//! HTTP server configuration

use super::{default_host, default_port, env_opt, env_parse};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load server settings from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env_opt("GATEWAY_HOST").unwrap_or_else(default_host),
            port: env_parse("PORT", default_port()),
            cors: CorsConfig::from_env(),
        })
    }

    /// Validate server settings
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.host.is_empty() {
            return Err("host must not be empty".to_string());
        }
        if self.port == 0 {
            return Err("port must be non-zero".to_string());
        }
        Ok(())
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Whether CORS handling is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Allowed origins; `*` allows any origin
    #[serde(default = "default_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: default_origins(),
        }
    }
}

impl CorsConfig {
    /// Load CORS settings from environment variables
    pub fn from_env() -> Self {
        let allowed_origins = env_opt("CORS_ORIGIN")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(default_origins);

        Self {
            enabled: true,
            allowed_origins,
        }
    }

    /// Whether any origin is allowed
    pub fn allows_all_origins(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

fn default_true() -> bool {
    true
}

fn default_origins() -> Vec<String> {
    vec!["*".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 7939);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_port_rejected() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cors_allows_all_origins() {
        let config = CorsConfig::default();
        assert!(config.allows_all_origins());

        let restricted = CorsConfig {
            enabled: true,
            allowed_origins: vec!["https://dashboard.example.com".to_string()],
        };
        assert!(!restricted.allows_all_origins());
    }
}
