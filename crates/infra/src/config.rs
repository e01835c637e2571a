//! Process configuration, read from environment variables.
//!
//! | variable | default |
//! |---|---|
//! | `PANTRY_BIND_ADDR` | `0.0.0.0:8080` |
//! | `API_SECRET_KEY` | dev-only default (logged as a warning) |
//! | `VISION_API_URL` | Google Vision `images:annotate` |
//! | `VISION_API_KEY` | unset |
//! | `VISION_TIMEOUT_MS` | `10000` |
//! | `VISION_MAX_RESULTS` | `10` |
//! | `MAX_IMAGE_BYTES` | `10485760` |
//! | `USE_PERSISTENT_STORES` | `false` |
//! | `DATABASE_URL` | required when persistent |

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use crate::recognition::gateway::DEFAULT_RECOGNITION_TIMEOUT;
use crate::recognition::vision::DEFAULT_VISION_URL;

const DEV_API_SECRET: &str = "dev-secret";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has an invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Where stock lines are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerBackend {
    InMemory,
    Postgres { database_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisionConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub max_results: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub api_secret: String,
    pub vision: VisionConfig,
    pub max_image_bytes: usize,
    pub ledger: LedgerBackend,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_or("PANTRY_BIND_ADDR", var("PANTRY_BIND_ADDR"), SocketAddr::from(([0, 0, 0, 0], 8080)))?;

        let api_secret = var("API_SECRET_KEY").unwrap_or_else(|| {
            warn!("API_SECRET_KEY not set; using insecure dev default");
            DEV_API_SECRET.to_string()
        });

        let timeout_ms = parse_or(
            "VISION_TIMEOUT_MS",
            var("VISION_TIMEOUT_MS"),
            DEFAULT_RECOGNITION_TIMEOUT.as_millis() as u64,
        )?;
        if timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                var: "VISION_TIMEOUT_MS",
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        let vision = VisionConfig {
            endpoint: var("VISION_API_URL").unwrap_or_else(|| DEFAULT_VISION_URL.to_string()),
            api_key: var("VISION_API_KEY"),
            timeout: Duration::from_millis(timeout_ms),
            max_results: parse_or("VISION_MAX_RESULTS", var("VISION_MAX_RESULTS"), 10u32)?,
        };

        let max_image_bytes = parse_or("MAX_IMAGE_BYTES", var("MAX_IMAGE_BYTES"), 10 * 1024 * 1024usize)?;

        let use_persistent = var("USE_PERSISTENT_STORES")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);
        let ledger = if use_persistent {
            let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
            LedgerBackend::Postgres { database_url }
        } else {
            LedgerBackend::InMemory
        };

        Ok(Self {
            bind_addr,
            api_secret,
            vision,
            max_image_bytes,
            ledger,
        })
    }
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(cfg.api_secret, DEV_API_SECRET);
        assert_eq!(cfg.vision.endpoint, DEFAULT_VISION_URL);
        assert_eq!(cfg.vision.api_key, None);
        assert_eq!(cfg.vision.timeout, Duration::from_secs(10));
        assert_eq!(cfg.vision.max_results, 10);
        assert_eq!(cfg.ledger, LedgerBackend::InMemory);
    }

    #[test]
    fn reads_explicit_values() {
        let cfg = config(&[
            ("PANTRY_BIND_ADDR", "127.0.0.1:9000"),
            ("API_SECRET_KEY", "s3cret"),
            ("VISION_API_URL", "http://localhost:4000/annotate"),
            ("VISION_API_KEY", "abc"),
            ("VISION_TIMEOUT_MS", "2500"),
            ("USE_PERSISTENT_STORES", "true"),
            ("DATABASE_URL", "postgres://pantry@localhost/pantry"),
        ])
        .unwrap();

        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.api_secret, "s3cret");
        assert_eq!(cfg.vision.api_key.as_deref(), Some("abc"));
        assert_eq!(cfg.vision.timeout, Duration::from_millis(2500));
        assert_eq!(
            cfg.ledger,
            LedgerBackend::Postgres {
                database_url: "postgres://pantry@localhost/pantry".to_string()
            }
        );
    }

    #[test]
    fn persistent_mode_requires_database_url() {
        let err = config(&[("USE_PERSISTENT_STORES", "true")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = config(&[("VISION_TIMEOUT_MS", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "VISION_TIMEOUT_MS", .. }));

        let err = config(&[("VISION_TIMEOUT_MS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "VISION_TIMEOUT_MS", .. }));
    }
}
