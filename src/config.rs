//! Configuration loading and management.
//!
//! Loads configuration from embedded config.toml with environment variable overrides.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Embedded configuration file content.
const CONFIG_TOML: &str = include_str!("../config.toml");

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub oauth: OAuthConfig,
    pub http: HttpConfig,
    pub terraform: TerraformConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub graph_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OAuthConfig {
    /// Identity platform host, without tenant.
    pub authority: String,
    pub scope: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TerraformConfig {
    pub binary: String,
    pub shell: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Config {
    /// Load configuration from embedded config.toml with environment variable overrides.
    pub fn load() -> Result<Self> {
        let mut config: Config =
            toml::from_str(CONFIG_TOML).context("Failed to parse embedded config.toml")?;

        if let Ok(url) = env::var("GRAPH_BASE_URL") {
            config.api.graph_base_url = url;
        }

        if let Ok(authority) = env::var("AZURE_AUTHORITY_HOST") {
            config.oauth.authority = authority;
        }

        if let Ok(binary) = env::var("TERRAFORM_BIN") {
            config.terraform.binary = binary;
        }

        if let Ok(log_level) = env::var("RUST_LOG") {
            config.logging.level = log_level;
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate that required configuration is present.
    fn validate(&self) -> Result<()> {
        if self.api.graph_base_url.trim().is_empty() {
            anyhow::bail!("Graph base URL not configured. Set GRAPH_BASE_URL or update config.toml");
        }

        if self.oauth.authority.trim().is_empty() {
            anyhow::bail!(
                "Authority host not configured. Set AZURE_AUTHORITY_HOST or update config.toml"
            );
        }

        if self.http.timeout_seconds == 0 || self.http.connect_timeout_seconds == 0 {
            anyhow::bail!("HTTP timeouts must be greater than zero");
        }

        if self.terraform.binary.trim().is_empty() {
            anyhow::bail!("Terraform binary not configured. Set TERRAFORM_BIN or update config.toml");
        }

        Ok(())
    }

    /// Get the token URL for a tenant.
    pub fn token_url(&self, tenant_id: &str) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.oauth.authority.trim_end_matches('/'),
            tenant_id
        )
    }

    /// Graph base URL without a trailing slash.
    pub fn graph_base_url(&self) -> &str {
        self.api.graph_base_url.trim_end_matches('/')
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    pub fn http_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.http.connect_timeout_seconds)
    }
}

#[cfg(test)]
pub(crate) fn test_config(graph_base_url: &str, authority: &str) -> Config {
    Config {
        api: ApiConfig {
            graph_base_url: graph_base_url.into(),
        },
        oauth: OAuthConfig {
            authority: authority.into(),
            scope: "https://graph.microsoft.com/.default".into(),
        },
        http: HttpConfig {
            timeout_seconds: 5,
            connect_timeout_seconds: 5,
        },
        terraform: TerraformConfig {
            binary: "terraform".into(),
            shell: "bash".into(),
        },
        logging: LoggingConfig {
            level: "info".into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parsing() {
        let result = toml::from_str::<Config>(CONFIG_TOML);
        assert!(result.is_ok(), "Config parsing failed: {:?}", result.err());

        let config = result.unwrap();
        assert_eq!(config.api.graph_base_url, "https://graph.microsoft.com/beta");
        assert_eq!(config.terraform.binary, "terraform");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_urls() {
        let config = test_config(
            "https://graph.microsoft.com/beta/",
            "https://login.microsoftonline.com/",
        );

        assert_eq!(
            config.token_url("test-tenant"),
            "https://login.microsoftonline.com/test-tenant/oauth2/v2.0/token"
        );
        assert_eq!(config.graph_base_url(), "https://graph.microsoft.com/beta");
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = test_config("https://graph", "https://login");
        config.http.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }
}
