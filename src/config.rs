//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Optional Variables
//!
//! All variables have defaults; the service starts with an empty environment.
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `APP_ENV` - Runtime mode: `development`, `test` or `production`
//!   (default: `development`)
//! - `ENABLE_RATE_LIMITING` - Master switch for the request limiter
//!   (default: `true`; only the literal `true` or `1` enables it)
//! - `RATE_LIMIT_WINDOW_MS` - Fixed window length in milliseconds
//!   (default: `900000`, i.e. 15 minutes; min: 1000, max: 86400000)
//! - `RATE_LIMIT_MAX` - Requests allowed per client per window
//!   (default: `100`, min: 1, max: 1000000)
//! - `RATE_LIMIT_PATH_PREFIX` - Path prefix the limiter protects; the API is
//!   also mounted here (default: `/api/`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::Result;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default fixed window: 15 minutes.
const DEFAULT_WINDOW_MS: u64 = 900_000;

/// Default request budget per client per window.
const DEFAULT_MAX_REQUESTS: u32 = 100;

/// Runtime mode of the service.
///
/// Production adds `Strict-Transport-Security` to every response; development
/// logs the underlying cause of request parse failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" => Ok(Self::Production),
            other => anyhow::bail!(
                "APP_ENV must be 'development', 'test' or 'production', got '{}'",
                other
            ),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        })
    }
}

/// Settings for the fixed-window request limiter.
#[derive(Debug, Clone)]
pub struct RateLimitSettings {
    /// Master switch. When false every request passes through untouched.
    pub enabled: bool,
    /// Fixed window length in milliseconds.
    pub window_ms: u64,
    /// Requests allowed per client key within one window.
    pub max_requests: u32,
    /// Path prefix the limiter protects. Requests outside it bypass the limiter.
    pub path_prefix: String,
}

impl RateLimitSettings {
    /// The window as a [`Duration`].
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub environment: Environment,
    pub log_level: String,
    pub log_format: String,
    pub rate_limit: RateLimitSettings,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `APP_ENV` holds an unknown mode. Malformed numeric
    /// variables fall back to their defaults; bounds are checked in
    /// [`validate`](Self::validate).
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let environment = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .parse()?;

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let enabled = env::var("ENABLE_RATE_LIMITING")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(true);

        let window_ms = env::var("RATE_LIMIT_WINDOW_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_WINDOW_MS);

        let max_requests = env::var("RATE_LIMIT_MAX")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_REQUESTS);

        let path_prefix =
            env::var("RATE_LIMIT_PATH_PREFIX").unwrap_or_else(|_| "/api/".to_string());

        Ok(Self {
            listen_addr,
            environment,
            log_level,
            log_format,
            rate_limit: RateLimitSettings {
                enabled,
                window_ms,
                max_requests,
                path_prefix,
            },
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `listen_addr` is invalid
    /// - `log_format` is not `text` or `json`
    /// - the rate-limit window or budget is out of bounds
    /// - the protected path prefix does not name a path segment
    pub fn validate(&self) -> Result<()> {
        // Validate listen address format
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        // Validate log format
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        // Validate window bounds
        if self.rate_limit.window_ms < 1_000 {
            anyhow::bail!(
                "RATE_LIMIT_WINDOW_MS must be at least 1000, got {}",
                self.rate_limit.window_ms
            );
        }

        if self.rate_limit.window_ms > 86_400_000 {
            anyhow::bail!(
                "RATE_LIMIT_WINDOW_MS is too large (max: 86400000), got {}",
                self.rate_limit.window_ms
            );
        }

        // Validate request budget
        if self.rate_limit.max_requests == 0 {
            anyhow::bail!("RATE_LIMIT_MAX must be at least 1");
        }

        if self.rate_limit.max_requests > 1_000_000 {
            anyhow::bail!(
                "RATE_LIMIT_MAX is too large (max: 1000000), got {}",
                self.rate_limit.max_requests
            );
        }

        // The prefix doubles as the API mount point, so it must keep at
        // least one path segment once trailing slashes are stripped.
        let prefix = &self.rate_limit.path_prefix;
        if !prefix.starts_with('/') || prefix.trim_end_matches('/').is_empty() {
            anyhow::bail!(
                "RATE_LIMIT_PATH_PREFIX must start with '/' and name a path segment, got '{}'",
                prefix
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Environment: {}", self.environment);

        if self.rate_limit.enabled {
            tracing::info!(
                "  Rate limit: {} requests per {}s on {}",
                self.rate_limit.max_requests,
                self.rate_limit.window_ms / 1000,
                self.rate_limit.path_prefix
            );
        } else {
            tracing::info!("  Rate limit: disabled");
        }

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

    const ALL_VARS: &[&str] = &[
        "LISTEN",
        "APP_ENV",
        "RUST_LOG",
        "LOG_FORMAT",
        "ENABLE_RATE_LIMITING",
        "RATE_LIMIT_WINDOW_MS",
        "RATE_LIMIT_MAX",
        "RATE_LIMIT_PATH_PREFIX",
    ];

    fn clear_env() {
        // SAFETY: Callers hold #[serial], so no concurrent access
        for var in ALL_VARS {
            unsafe {
                env::remove_var(var);
            }
        }
    }

    fn valid_config() -> Config {
        Config {
            listen_addr: "0.0.0.0:3000".to_string(),
            environment: Environment::Development,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            rate_limit: RateLimitSettings {
                enabled: true,
                window_ms: 900_000,
                max_requests: 100,
                path_prefix: "/api/".to_string(),
            },
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        // Test invalid listen address
        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "0.0.0.0:3000".to_string();

        // Test invalid log format
        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        // Test window bounds
        config.rate_limit.window_ms = 999;
        assert!(config.validate().is_err());

        config.rate_limit.window_ms = 86_400_001;
        assert!(config.validate().is_err());

        config.rate_limit.window_ms = 900_000;

        // Test request budget bounds
        config.rate_limit.max_requests = 0;
        assert!(config.validate().is_err());

        config.rate_limit.max_requests = 1_000_001;
        assert!(config.validate().is_err());

        config.rate_limit.max_requests = 100;

        // Test path prefix
        config.rate_limit.path_prefix = "api/".to_string();
        assert!(config.validate().is_err());

        config.rate_limit.path_prefix = "///".to_string();
        assert!(config.validate().is_err());

        config.rate_limit.path_prefix = "/api/".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            "production".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!("test".parse::<Environment>().unwrap(), Environment::Test);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    #[serial]
    fn test_defaults_with_empty_environment() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.log_format, "text");
        assert!(config.rate_limit.enabled);
        assert_eq!(config.rate_limit.window_ms, 900_000);
        assert_eq!(config.rate_limit.max_requests, 100);
        assert_eq!(config.rate_limit.path_prefix, "/api/");
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_rate_limit_overrides() {
        clear_env();

        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("RATE_LIMIT_WINDOW_MS", "60000");
            env::set_var("RATE_LIMIT_MAX", "5");
            env::set_var("APP_ENV", "production");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.rate_limit.window_ms, 60_000);
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.environment, Environment::Production);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_enable_flag_parsing() {
        clear_env();

        // Anything other than "true"/"1" disables the limiter
        for (value, expected) in [("true", true), ("1", true), ("false", false), ("yes", false)] {
            // SAFETY: Tests are run serially due to #[serial], so no concurrent access
            unsafe {
                env::set_var("ENABLE_RATE_LIMITING", value);
            }
            let config = Config::from_env().unwrap();
            assert_eq!(config.rate_limit.enabled, expected, "value: {value}");
        }

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unknown_environment_rejected() {
        clear_env();

        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("APP_ENV", "staging");
        }

        assert!(Config::from_env().is_err());

        clear_env();
    }
}
