//! Service settings loaded with the `config` crate
//!
//! Values come from `PRACTICE__`-prefixed environment variables, with nested
//! keys separated by a double underscore, e.g. `PRACTICE__SERVER__PORT=3001`
//! or `PRACTICE__JWT__SECRET=...`.

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Token verification settings
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// HS256 shared secret of the identity provider
    pub secret: String,
    /// Expected `aud` claim; not checked when unset
    pub audience: Option<String>,
}

/// Top-level service settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub jwt: JwtSettings,
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl Settings {
    /// Load settings from the environment
    ///
    /// # Environment Variables
    /// - `PRACTICE__SERVER__HOST` (default: "0.0.0.0")
    /// - `PRACTICE__SERVER__PORT` (default: 3001)
    /// - `PRACTICE__JWT__SECRET` (required)
    /// - `PRACTICE__JWT__AUDIENCE` (optional)
    /// - `PRACTICE__LOG_LEVEL` (default: "info")
    pub fn from_env() -> Result<Self> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3001)?
            .set_default("log_level", "info")?
            .add_source(
                Environment::with_prefix("PRACTICE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            std::env::remove_var("PRACTICE__SERVER__HOST");
            std::env::remove_var("PRACTICE__SERVER__PORT");
            std::env::remove_var("PRACTICE__JWT__SECRET");
            std::env::remove_var("PRACTICE__JWT__AUDIENCE");
            std::env::remove_var("PRACTICE__LOG_LEVEL");
        }
    }

    #[test]
    #[serial]
    fn test_settings_defaults() {
        clear_env();
        unsafe {
            std::env::set_var("PRACTICE__JWT__SECRET", "test-secret");
        }

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.server.bind_address(), "0.0.0.0:3001");
        assert_eq!(settings.jwt.secret, "test-secret");
        assert!(settings.jwt.audience.is_none());
        assert_eq!(settings.log_level, "info");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_settings_from_env_with_custom_values() {
        clear_env();
        unsafe {
            std::env::set_var("PRACTICE__SERVER__HOST", "127.0.0.1");
            std::env::set_var("PRACTICE__SERVER__PORT", "8088");
            std::env::set_var("PRACTICE__JWT__SECRET", "another-secret");
            std::env::set_var("PRACTICE__JWT__AUDIENCE", "authenticated");
        }

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.server.bind_address(), "127.0.0.1:8088");
        assert_eq!(settings.jwt.audience.as_deref(), Some("authenticated"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_settings_require_jwt_secret() {
        clear_env();
        assert!(Settings::from_env().is_err());
    }
}
