use std::net::SocketAddr;

use crate::models::DEFAULT_RATE_PER_LITER;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl StoreBackend {
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!(
                "Invalid STORE_BACKEND: {}. Must be 'postgres' or 'memory'",
                other
            )),
        }
    }
}

/// Service configuration read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub default_rate_per_liter: f64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend = StoreBackend::parse(
            &lookup("STORE_BACKEND").unwrap_or_else(|| "postgres".to_string()),
        )?;

        let database_max_connections: u32 = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse()
                .map_err(|_| format!("DATABASE_MAX_CONNECTIONS must be a positive integer, got {}", v))?,
            None => 10,
        };

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|_| format!("BIND_ADDR is not a socket address: {}", bind_addr))?;

        let default_rate_per_liter: f64 = match lookup("DEFAULT_RATE_PER_LITER") {
            Some(v) => v
                .parse()
                .map_err(|_| format!("DEFAULT_RATE_PER_LITER must be a number, got {}", v))?,
            None => DEFAULT_RATE_PER_LITER,
        };

        let config = Self {
            store_backend,
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            database_max_connections,
            bind_addr,
            default_rate_per_liter,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.store_backend == StoreBackend::Postgres && self.database_url.is_none() {
            return Err("DATABASE_URL must be set when STORE_BACKEND is postgres".to_string());
        }
        if !(self.default_rate_per_liter > 0.0) {
            return Err("DEFAULT_RATE_PER_LITER must be positive".to_string());
        }
        if self.database_max_connections == 0 {
            return Err("DATABASE_MAX_CONNECTIONS must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_database_url() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/fuel")]).unwrap();
        assert_eq!(config.store_backend, StoreBackend::Postgres);
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.default_rate_per_liter, 9500.0);
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let err = config_from(&[]).unwrap_err();
        assert!(err.contains("DATABASE_URL"));
    }

    #[test]
    fn test_memory_backend_needs_no_database() {
        let config = config_from(&[("STORE_BACKEND", "Memory"), ("BIND_ADDR", "127.0.0.1:8080")]).unwrap();
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(config_from(&[("STORE_BACKEND", "sqlite")]).is_err());
        assert!(config_from(&[("STORE_BACKEND", "memory"), ("DEFAULT_RATE_PER_LITER", "0")]).is_err());
        assert!(config_from(&[("STORE_BACKEND", "memory"), ("DEFAULT_RATE_PER_LITER", "abc")]).is_err());
        assert!(config_from(&[("STORE_BACKEND", "memory"), ("BIND_ADDR", "localhost")]).is_err());
    }
}
