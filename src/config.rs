// Server configuration read from the environment
use crate::engine::Limits;
use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Origin allowed by CORS. Any origin when unset.
    pub allowed_origin: Option<String>,
    pub limits: Limits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            allowed_origin: None,
            limits: Limits::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        Ok(Self {
            host: lookup("ALGOGRAPH_HOST").unwrap_or(defaults.host),
            port: parse(&lookup, "ALGOGRAPH_PORT", defaults.port)?,
            allowed_origin: lookup("ALGOGRAPH_ALLOWED_ORIGIN").filter(|o| !o.trim().is_empty()),
            limits: Limits {
                max_nodes: parse(&lookup, "ALGOGRAPH_MAX_NODES", defaults.limits.max_nodes)?,
                max_edges: parse(&lookup, "ALGOGRAPH_MAX_EDGES", defaults.limits.max_edges)?,
                max_steps: parse(&lookup, "ALGOGRAPH_MAX_STEPS", defaults.limits.max_steps)?,
            },
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got {:?}", key, raw)),
        None => Ok(default),
    }
}
