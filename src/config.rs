//! Server configuration loaded from environment variables (and `.env` when present).

use crate::error::ConfigError;
use std::str::FromStr;

/// Runtime settings for the server binary.
///
/// | Env var              | Default                       |
/// |----------------------|-------------------------------|
/// | `DATABASE_URL`       | `postgres://localhost/filmes` |
/// | `HOST`               | `0.0.0.0`                     |
/// | `PORT`               | `3000`                        |
/// | `DB_MAX_CONNECTIONS` | `5`                           |
/// | `BODY_LIMIT_BYTES`   | `1048576`                     |
///
/// The table schema comes from `FILMES_SCHEMA`, see [`crate::store::filmes_schema`].
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub body_limit_bytes: usize,
}

impl ServerConfig {
    /// Reads `.env` (if any) and then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(ServerConfig {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "postgres://localhost/filmes".into()),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_var(&lookup, "PORT", 3000)?,
            max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            body_limit_bytes: parse_var(&lookup, "BODY_LIMIT_BYTES", 1024 * 1024)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidVar { var, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.database_url, "postgres://localhost/filmes");
        assert_eq!(cfg.bind_addr(), "0.0.0.0:3000");
        assert_eq!(cfg.max_connections, 5);
        assert_eq!(cfg.body_limit_bytes, 1024 * 1024);
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = ServerConfig::from_lookup(lookup_from(&[("PORT", "8080"), ("HOST", "127.0.0.1")])).unwrap();
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: "PORT", .. }));
    }
}
