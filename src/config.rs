// Application configuration loaded from environment variables

use std::str::FromStr;

/// Default token lifetime: 30 minutes
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 1800;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Runtime configuration for the API server
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub token_ttl_seconds: i64,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
}

impl AppConfig {
    /// Build the configuration from the process environment
    ///
    /// `DATABASE_URL` and `JWT_SECRET` are required; everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let token_ttl_seconds =
            parse_or("JWT_TTL_SECONDS", lookup("JWT_TTL_SECONDS"), DEFAULT_TOKEN_TTL_SECONDS)?;
        if token_ttl_seconds <= 0 {
            return Err(ConfigError::Invalid {
                name: "JWT_TTL_SECONDS",
                value: token_ttl_seconds.to_string(),
            });
        }

        Ok(Self {
            database_url,
            jwt_secret,
            token_ttl_seconds,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", lookup("PORT"), 8080)?,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", lookup("DB_MAX_CONNECTIONS"), 5)?,
        })
    }

    /// Address the HTTP listener binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/yummy"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.token_ttl_seconds, DEFAULT_TOKEN_TTL_SECONDS);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.db_max_connections, 5);
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        let result = AppConfig::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/yummy",
        )]));
        assert!(matches!(result, Err(ConfigError::Missing("JWT_SECRET"))));
    }

    #[test]
    fn test_invalid_ttl_is_an_error() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/yummy"),
            ("JWT_SECRET", "secret"),
            ("JWT_TTL_SECONDS", "soon"),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid { name: "JWT_TTL_SECONDS", .. })));

        let result = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/yummy"),
            ("JWT_SECRET", "secret"),
            ("JWT_TTL_SECONDS", "0"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/yummy"),
            ("JWT_SECRET", "secret"),
            ("JWT_TTL_SECONDS", "31536000"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
        ]))
        .unwrap();

        assert_eq!(config.token_ttl_seconds, 31_536_000);
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    }
}
