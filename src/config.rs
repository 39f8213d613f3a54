//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export PORT=5000
//! export UPSTREAM_BASE_URL="http://api.reddit.com"
//! export UPSTREAM_TIMEOUT_SECONDS=10
//! ```
//!
//! ## Optional Variables
//!
//! - `PORT` - Listen port (default: `5000`)
//! - `LISTEN_HOST` - Listen host (default: `0.0.0.0`)
//! - `UPSTREAM_BASE_URL` - Listing API origin (default: `http://api.reddit.com`)
//! - `UPSTREAM_TIMEOUT_SECONDS` - Outbound request timeout (default: 10, range: 1-300)
//! - `UPSTREAM_USER_AGENT` - `User-Agent` sent upstream (default: `article-graph/<version>`)
//! - `GRAPHIQL` - Serve the GraphiQL page on `GET /graphql` (default: `true`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_UPSTREAM_BASE_URL: &str = "http://api.reddit.com";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub upstream_base_url: String,
    pub upstream_timeout_seconds: u64,
    pub upstream_user_agent: String,
    /// Whether `GET /graphql` from a browser renders the GraphiQL IDE.
    pub graphiql: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` or `UPSTREAM_TIMEOUT_SECONDS` is set but
    /// not a number.
    pub fn from_env() -> Result<Self> {
        let port: u16 = match env::var("PORT") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{v}'"))?,
            Err(_) => 5000,
        };
        let host = env::var("LISTEN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let listen_addr = format!("{host}:{port}");

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let upstream_base_url = env::var("UPSTREAM_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_UPSTREAM_BASE_URL.to_string());

        let upstream_timeout_seconds: u64 = match env::var("UPSTREAM_TIMEOUT_SECONDS") {
            Ok(v) => v.parse().with_context(|| {
                format!("UPSTREAM_TIMEOUT_SECONDS must be a number of seconds, got '{v}'")
            })?,
            Err(_) => 10,
        };

        let upstream_user_agent = env::var("UPSTREAM_USER_AGENT")
            .unwrap_or_else(|_| format!("article-graph/{}", env!("CARGO_PKG_VERSION")));

        let graphiql = env::var("GRAPHIQL")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(true);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            upstream_base_url,
            upstream_timeout_seconds,
            upstream_user_agent,
            graphiql,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `upstream_base_url` is not an absolute http(s) URL
    /// - `upstream_timeout_seconds` is outside 1-300
    /// - `upstream_user_agent` is empty
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        let url = Url::parse(&self.upstream_base_url).with_context(|| {
            format!(
                "UPSTREAM_BASE_URL must be an absolute URL, got '{}'",
                self.upstream_base_url
            )
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!(
                "UPSTREAM_BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.upstream_base_url
            );
        }

        if !(1..=300).contains(&self.upstream_timeout_seconds) {
            anyhow::bail!(
                "UPSTREAM_TIMEOUT_SECONDS must be between 1 and 300, got {}",
                self.upstream_timeout_seconds
            );
        }

        if self.upstream_user_agent.trim().is_empty() {
            anyhow::bail!("UPSTREAM_USER_AGENT must not be empty");
        }

        Ok(())
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Upstream: {}", self.upstream_base_url);
        tracing::info!("  Upstream timeout: {}s", self.upstream_timeout_seconds);
        tracing::info!("  Upstream user agent: {}", self.upstream_user_agent);
        tracing::info!(
            "  GraphiQL: {}",
            if self.graphiql { "enabled" } else { "disabled" }
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 7] = [
        "PORT",
        "LISTEN_HOST",
        "UPSTREAM_BASE_URL",
        "UPSTREAM_TIMEOUT_SECONDS",
        "UPSTREAM_USER_AGENT",
        "GRAPHIQL",
        "LOG_FORMAT",
    ];

    fn clear_env() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    fn valid_config() -> Config {
        Config {
            listen_addr: "0.0.0.0:5000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            upstream_timeout_seconds: 10,
            upstream_user_agent: "article-graph/test".to_string(),
            graphiql: true,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.upstream_base_url = "ftp://api.reddit.com".to_string();
        assert!(config.validate().is_err());
        config.upstream_base_url = "api.reddit.com".to_string();
        assert!(config.validate().is_err());
        config.upstream_base_url = "https://api.reddit.com".to_string();
        assert!(config.validate().is_ok());

        config.upstream_timeout_seconds = 0;
        assert!(config.validate().is_err());
        config.upstream_timeout_seconds = 301;
        assert!(config.validate().is_err());
        config.upstream_timeout_seconds = 300;
        assert!(config.validate().is_ok());

        config.upstream_user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:5000");
        assert_eq!(config.upstream_base_url, "http://api.reddit.com");
        assert_eq!(config.upstream_timeout(), Duration::from_secs(10));
        assert!(config.upstream_user_agent.starts_with("article-graph/"));
        assert!(config.graphiql);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("PORT", "8080");
            env::set_var("LISTEN_HOST", "127.0.0.1");
            env::set_var("UPSTREAM_BASE_URL", "http://localhost:9999");
            env::set_var("UPSTREAM_TIMEOUT_SECONDS", "3");
            env::set_var("GRAPHIQL", "false");
        }

        let config = load_from_env().unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.upstream_base_url, "http://localhost:9999");
        assert_eq!(config.upstream_timeout_seconds, 3);
        assert!(!config.graphiql);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_port_rejected() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("PORT", "http");
        }

        assert!(Config::from_env().is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unparsable_timeout_rejected() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("UPSTREAM_TIMEOUT_SECONDS", "soon");
        }

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("UPSTREAM_TIMEOUT_SECONDS"));

        clear_env();
    }
}
