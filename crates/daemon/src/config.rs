//! Daemon configuration, read from the environment

use anyhow::{Context, Result};
use disposal_api_rpc::server::{DEFAULT_RPC_HOST, DEFAULT_RPC_PORT};

pub const DEFAULT_DB_PATH: &str = "~/.job-disposal/markers.db";

pub const ENV_DB_PATH: &str = "DISPOSAL_DB_PATH";
pub const ENV_RPC_HOST: &str = "DISPOSAL_RPC_HOST";
pub const ENV_RPC_PORT: &str = "DISPOSAL_RPC_PORT";
pub const ENV_LOG_FORMAT: &str = "DISPOSAL_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Development: human-readable, colored
    Pretty,
    /// Production: one JSON object per line
    Json,
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub db_path: String,
    pub rpc_host: String,
    pub rpc_port: u16,
    pub log_format: LogFormat,
}

impl DaemonConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults, bad values are errors
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup(ENV_DB_PATH).unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let db_path = shellexpand::tilde(&db_path).into_owned();

        let rpc_host = lookup(ENV_RPC_HOST).unwrap_or_else(|| DEFAULT_RPC_HOST.to_string());

        let rpc_port = match lookup(ENV_RPC_PORT) {
            Some(port) => port
                .parse()
                .with_context(|| format!("{} must be a port number, got {:?}", ENV_RPC_PORT, port))?,
            None => DEFAULT_RPC_PORT,
        };

        let log_format = match lookup(ENV_LOG_FORMAT).as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => anyhow::bail!(
                "{} must be \"pretty\" or \"json\", got {:?}",
                ENV_LOG_FORMAT,
                other
            ),
        };

        Ok(Self {
            db_path,
            rpc_host,
            rpc_port,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DaemonConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.rpc_host, DEFAULT_RPC_HOST);
        assert_eq!(config.rpc_port, DEFAULT_RPC_PORT);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.db_path.ends_with(".job-disposal/markers.db"));
    }

    #[test]
    fn test_overrides() {
        let config = DaemonConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "/var/lib/disposal/markers.db"),
            (ENV_RPC_PORT, "7000"),
            (ENV_LOG_FORMAT, "json"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, "/var/lib/disposal/markers.db");
        assert_eq!(config.rpc_port, 7000);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = DaemonConfig::from_lookup(lookup(&[(ENV_RPC_PORT, "ninety")])).unwrap_err();
        assert!(err.to_string().contains(ENV_RPC_PORT));
    }

    #[test]
    fn test_invalid_log_format_is_an_error() {
        assert!(DaemonConfig::from_lookup(lookup(&[(ENV_LOG_FORMAT, "xml")])).is_err());
    }
}
