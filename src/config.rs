//! HTTP server settings from environment variables.
//!
//! | Variable                 | Default          | Description                        |
//! |--------------------------|------------------|------------------------------------|
//! | `PASSLAB_BIND`           | `127.0.0.1:5000` | listen address                     |
//! | `PASSLAB_LOG`            | `info`           | tracing filter for `serve`         |
//! | `PASSLAB_MAX_BODY_BYTES` | `65536`          | request body limit                 |
//! | `PASSLAB_ENGINE`         | `auto`           | `auto` or `entropy`                |
//!
//! Unparseable values fall back to the default. Command-line flags override
//! whatever is read here.

use crate::strength::EngineChoice;
use std::net::SocketAddr;

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub log_level: String,
    pub max_body_bytes: usize,
    pub engine: EngineChoice,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            bind: lookup("PASSLAB_BIND")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or_else(default_bind),
            log_level: lookup("PASSLAB_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            max_body_bytes: lookup("PASSLAB_MAX_BODY_BYTES")
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|&bytes| bytes > 0)
                .unwrap_or(DEFAULT_MAX_BODY_BYTES),
            engine: lookup("PASSLAB_ENGINE")
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5000))
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
    fn test_defaults() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.bind.to_string(), DEFAULT_BIND);
        assert_eq!(cfg.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(cfg.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert_eq!(cfg.engine, EngineChoice::Auto);
    }

    #[test]
    fn test_overrides_applied() {
        let cfg = ServerConfig::from_lookup(lookup_from(&[
            ("PASSLAB_BIND", "0.0.0.0:8080"),
            ("PASSLAB_LOG", "passlab=debug"),
            ("PASSLAB_MAX_BODY_BYTES", "1024"),
            ("PASSLAB_ENGINE", "entropy"),
        ]));

        assert_eq!(cfg.bind.port(), 8080);
        assert_eq!(cfg.log_level, "passlab=debug");
        assert_eq!(cfg.max_body_bytes, 1024);
        assert_eq!(cfg.engine, EngineChoice::Entropy);
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let cfg = ServerConfig::from_lookup(lookup_from(&[
            ("PASSLAB_BIND", "not an address"),
            ("PASSLAB_MAX_BODY_BYTES", "0"),
            ("PASSLAB_ENGINE", "quantum"),
        ]));

        assert_eq!(cfg.bind.to_string(), DEFAULT_BIND);
        assert_eq!(cfg.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert_eq!(cfg.engine, EngineChoice::Auto);
    }
}
