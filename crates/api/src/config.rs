//! Process configuration read from environment variables.
//!
//! | variable      | default        |
//! |---------------|----------------|
//! | `JWT_SECRET`  | `dev-secret`   |
//! | `BIND_ADDR`   | `0.0.0.0:8080` |
//! | `JSON_PRETTY` | `false`        |

use std::net::SocketAddr;

use thiserror::Error;

use quickadmin_core::util::json::JsonOptions;

pub const DEFAULT_JWT_SECRET: &str = "dev-secret";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("BIND_ADDR '{0}' is not a socket address")]
    InvalidBindAddr(String),

    #[error("{name} must be a boolean, got '{value}'")]
    InvalidBool { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
    pub json: JsonOptions,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.trim().is_empty()) {
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET not set; using insecure development secret");
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(raw_addr.clone()))?;

        let pretty = match lookup("JSON_PRETTY") {
            Some(value) => parse_bool("JSON_PRETTY", &value)?,
            None => false,
        };

        Ok(Self {
            jwt_secret,
            bind_addr,
            json: JsonOptions {
                pretty,
                ..JsonOptions::default()
            },
        })
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            name,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.jwt_secret, DEFAULT_JWT_SECRET);
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.json, JsonOptions::default());
    }

    #[test]
    fn values_are_read_from_lookup() {
        let cfg = config(&[
            ("JWT_SECRET", "s3cret"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("JSON_PRETTY", "true"),
        ])
        .unwrap();
        assert_eq!(cfg.jwt_secret, "s3cret");
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert!(cfg.json.pretty);
        assert!(cfg.json.omit_nulls);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            config(&[("BIND_ADDR", "nowhere")]),
            Err(ConfigError::InvalidBindAddr("nowhere".to_string()))
        );
        assert!(matches!(
            config(&[("JSON_PRETTY", "maybe")]),
            Err(ConfigError::InvalidBool { name: "JSON_PRETTY", .. })
        ));
    }
}
