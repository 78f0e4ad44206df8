//! Configuration loading from environment.

use std::env;

/// Where transactions and payables are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    /// Process-local store, lost on exit.
    Memory,
    /// SQL database reached through the compiled-in backend.
    Database(String),
}

/// Log line rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub storage: Storage,
    pub log_format: LogFormat,
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid PORT {:?}: {}", raw, e))?,
            None => 3000,
        };

        let storage = match lookup("DATABASE_URL") {
            Some(url) if !url.is_empty() && url != "memory" => Storage::Database(url),
            _ => Storage::Memory,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => anyhow::bail!("invalid LOG_FORMAT {:?}, expected json or pretty", other),
        };

        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|s| !s.is_empty());

        Ok(Self {
            port,
            storage,
            log_format,
            otlp_endpoint,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.storage, Storage::Memory);
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn test_database_url_selects_sql_storage() {
        let config = load(&[("DATABASE_URL", "sqlite://payables.db?mode=rwc")]).unwrap();
        assert_eq!(
            config.storage,
            Storage::Database("sqlite://payables.db?mode=rwc".into())
        );

        let config = load(&[("DATABASE_URL", "memory")]).unwrap();
        assert_eq!(config.storage, Storage::Memory);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("LOG_FORMAT", "pretty"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(
            config.otlp_endpoint.as_deref(),
            Some("http://localhost:4317")
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(load(&[("PORT", "not-a-port")]).is_err());
        assert!(load(&[("LOG_FORMAT", "xml")]).is_err());
    }
}
