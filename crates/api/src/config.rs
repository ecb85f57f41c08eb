//! Process configuration read from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::Duration;
use thiserror::Error;

/// How bearer tokens are issued and resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenMode {
    /// Random opaque tokens held in the process-local token table.
    #[default]
    Opaque,
    /// The token is the username itself. Demo use only.
    Symbolic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub token_mode: TokenMode,
    pub token_ttl: Option<Duration>,
    /// JSON role→permission policy; the built-in mapping is used when unset.
    pub policy_path: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("BIND_ADDR '{0}' is not a valid socket address")]
    BindAddr(String),

    #[error("TOKEN_MODE must be 'opaque' or 'symbolic', got '{0}'")]
    TokenMode(String),

    #[error("TOKEN_TTL_SECS must be a positive integer, got '{0}'")]
    TokenTtl(String),
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            token_mode: TokenMode::Opaque,
            token_ttl: None,
            policy_path: None,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("BIND_ADDR") {
            config.bind_addr = raw.parse().map_err(|_| ConfigError::BindAddr(raw.clone()))?;
        }

        if let Some(raw) = lookup("TOKEN_MODE") {
            config.token_mode = match raw.trim().to_ascii_lowercase().as_str() {
                "opaque" => TokenMode::Opaque,
                "symbolic" => TokenMode::Symbolic,
                _ => return Err(ConfigError::TokenMode(raw)),
            };
        }

        if let Some(raw) = lookup("TOKEN_TTL_SECS") {
            let secs = raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::TokenTtl(raw.clone()))?;
            config.token_ttl = Some(Duration::seconds(secs));
        }

        config.policy_path = lookup("RBAC_POLICY_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn reads_every_setting() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("TOKEN_MODE", "Symbolic"),
            ("TOKEN_TTL_SECS", "900"),
            ("RBAC_POLICY_PATH", "/etc/gatekeeper/policy.json"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 9000)));
        assert_eq!(config.token_mode, TokenMode::Symbolic);
        assert_eq!(config.token_ttl, Some(Duration::minutes(15)));
        assert_eq!(
            config.policy_path,
            Some(PathBuf::from("/etc/gatekeeper/policy.json"))
        );
    }

    #[test]
    fn rejects_invalid_values() {
        assert_eq!(
            ApiConfig::from_lookup(lookup(&[("BIND_ADDR", "localhost")])),
            Err(ConfigError::BindAddr("localhost".to_string()))
        );
        assert_eq!(
            ApiConfig::from_lookup(lookup(&[("TOKEN_MODE", "jwt")])),
            Err(ConfigError::TokenMode("jwt".to_string()))
        );
        assert_eq!(
            ApiConfig::from_lookup(lookup(&[("TOKEN_TTL_SECS", "0")])),
            Err(ConfigError::TokenTtl("0".to_string()))
        );
    }
}
