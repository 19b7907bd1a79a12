//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. The resolved [`AppConfig`] is built once at process start and
//! handed to the components that need it; nothing reads configuration from
//! global state.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::auth::{AuthConfig, HashConfig};
pub use self::database::DatabaseConfig;
pub use self::logging::{LogFormat, LoggingConfig};
pub use self::session::{MAX_TTL_HOURS, SessionConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Credential policy and hashing settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Session lifetime and cookie settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `GATEHOUSE__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("GATEHOUSE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make the service insecure or unusable.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.database.url.trim().is_empty() {
            return Err(AppError::configuration("database.url must be set"));
        }
        if !(1..=MAX_TTL_HOURS).contains(&self.session.ttl_hours) {
            return Err(AppError::configuration(format!(
                "session.ttl_hours must be between 1 and {MAX_TTL_HOURS}"
            )));
        }
        if self.session.cookie_name.trim().is_empty() {
            return Err(AppError::configuration("session.cookie_name must be set"));
        }
        if self.auth.password_min_length == 0 {
            return Err(AppError::configuration(
                "auth.password_min_length must be positive",
            ));
        }

        let hash = &self.auth.hash;
        if hash.iterations == 0 || hash.parallelism == 0 {
            return Err(AppError::configuration(
                "auth.hash.iterations and auth.hash.parallelism must be positive",
            ));
        }
        // Argon2 requires at least 8 KiB of memory per lane.
        if hash.memory_kib < 8 * hash.parallelism {
            return Err(AppError::configuration(
                "auth.hash.memory_kib must be at least 8 * parallelism",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AppConfig {
        AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://localhost/gatehouse".to_string(),
                max_connections: 10,
                min_connections: 1,
                connect_timeout_seconds: 10,
                idle_timeout_seconds: 300,
                connect_retries: 1,
                retry_delay_ms: 0,
            },
            auth: AuthConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = sample();
        assert!(config.validate().is_ok());
        assert_eq!(config.session.ttl_hours, 168);
        assert_eq!(config.session.ttl_seconds(), 604_800);
        assert_eq!(config.session.cookie_name, "session_token");
        assert!(!config.session.allow_insecure_cookies);
        assert_eq!(config.auth.password_min_length, 8);
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = sample();
        config.session.ttl_hours = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_ttl_rejected() {
        let mut config = sample();
        config.session.ttl_hours = MAX_TTL_HOURS;
        assert!(config.validate().is_ok());
        config.session.ttl_hours = 10_000_000_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_undersized_hash_memory_rejected() {
        let mut config = sample();
        config.auth.hash.parallelism = 4;
        config.auth.hash.memory_kib = 16;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("GATEHOUSE__DATABASE__URL", Some("postgres://env/gatehouse")),
                ("GATEHOUSE__SESSION__TTL_HOURS", Some("2")),
                ("GATEHOUSE__SESSION__ALLOW_INSECURE_COOKIES", Some("true")),
            ],
            || {
                let config = AppConfig::load("test").expect("config should load");
                assert_eq!(config.database.url, "postgres://env/gatehouse");
                assert_eq!(config.session.ttl_hours, 2);
                assert!(config.session.allow_insecure_cookies);
                assert_eq!(config.server.port, 8000);
            },
        );
    }

    #[test]
    fn test_load_without_database_url_fails() {
        temp_env::with_var_unset("GATEHOUSE__DATABASE__URL", || {
            assert!(AppConfig::load("test").is_err());
        });
    }
}
