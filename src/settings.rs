//! Process settings read from the environment (after `dotenvy` has loaded `.env`).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    /// `max-age` for the Cache-Control header, in seconds.
    pub cache_max_age: u64,
    /// Insert the sample companies and employees on start-up.
    pub seed_data: bool,
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: "postgres://localhost/routine".into(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            db_max_connections: 5,
            cache_max_age: 60,
            seed_data: true,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        Ok(Settings {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: parse_or(&lookup, "BIND_ADDR", defaults.bind_addr)?,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            cache_max_age: parse_or(&lookup, "CACHE_MAX_AGE", defaults.cache_max_age)?,
            seed_data: parse_or(&lookup, "SEED_DATA", defaults.seed_data)?,
            max_body_bytes: parse_or(&lookup, "MAX_BODY_BYTES", defaults.max_body_bytes)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn unset_keys_use_defaults() {
        let s = Settings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(s.cache_max_age, 60);
        assert_eq!(s.bind_addr.port(), 3000);
        assert!(s.seed_data);
    }

    #[test]
    fn values_are_parsed() {
        let s = Settings::from_lookup(lookup_from(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("CACHE_MAX_AGE", "120"),
            ("SEED_DATA", "false"),
        ]))
        .unwrap();
        assert_eq!(s.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(s.cache_max_age, 120);
        assert!(!s.seed_data);
    }

    #[test]
    fn invalid_value_names_the_key() {
        let err = Settings::from_lookup(lookup_from(&[("DB_MAX_CONNECTIONS", "lots")])).unwrap_err();
        assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
    }
}
