use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::workflows::credit::DEFAULT_BATCH_LIMIT;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Deployment stage the evaluator runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnvironment {
    #[default]
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Runtime settings for the evaluation service and CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub evaluation: EvaluationSettings,
}

impl AppConfig {
    /// Read `.env` when present, then the `APP_*` process variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("APP_ENV")
            .map(|name| AppEnvironment::from_name(&name))
            .unwrap_or_default();

        let host = lookup("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("APP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let log_level = lookup("APP_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let batch_limit = match lookup("APP_BATCH_LIMIT") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(ConfigError::InvalidBatchLimit(raw))?,
            None => DEFAULT_BATCH_LIMIT,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            evaluation: EvaluationSettings { batch_limit },
        })
    }
}

/// Listener address for the HTTP service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host
                .parse::<IpAddr>()
                .map_err(|source| ConfigError::InvalidHost {
                    host: self.host.clone(),
                    source,
                })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Limits applied by the evaluation endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationSettings {
    pub batch_limit: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a port number, got '{0}'")]
    InvalidPort(String),
    #[error("APP_HOST '{host}' is not an IP address or localhost")]
    InvalidHost {
        host: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("APP_BATCH_LIMIT must be a positive integer, got '{0}'")]
    InvalidBatchLimit(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).expect("defaults load");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.telemetry.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.evaluation.batch_limit, DEFAULT_BATCH_LIMIT);
    }

    #[test]
    fn localhost_resolves_to_loopback() {
        let config = config_from(&[("APP_HOST", "LocalHost"), ("APP_PORT", "8080")])
            .expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8080));
    }

    #[test]
    fn hostnames_other_than_localhost_are_rejected() {
        let config = config_from(&[("APP_HOST", "credit.internal")]).expect("config loads");
        let error = config.server.socket_addr().expect_err("not an address");
        assert!(error.to_string().contains("credit.internal"));
    }

    #[test]
    fn production_stage_and_custom_limit() {
        let config = config_from(&[("APP_ENV", "prod"), ("APP_BATCH_LIMIT", " 25 ")])
            .expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.evaluation.batch_limit, 25);
    }

    #[test]
    fn zero_or_garbage_values_are_rejected() {
        let error = config_from(&[("APP_BATCH_LIMIT", "0")]).expect_err("zero limit");
        assert!(matches!(error, ConfigError::InvalidBatchLimit(ref raw) if raw == "0"));

        let error = config_from(&[("APP_PORT", "eighty")]).expect_err("bad port");
        assert!(matches!(error, ConfigError::InvalidPort(ref raw) if raw == "eighty"));
    }
}
