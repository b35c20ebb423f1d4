//! Session and server configuration.

use std::time::Duration;

use gcviz_collector::{Algorithm, LayoutConfig};

use crate::error::{Error, Result};

/// Default autoplay cadence.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(2500);

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration for a visualizer session.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Collector selected at startup
    pub algorithm: Algorithm,
    /// Time between autoplay steps
    pub tick_interval: Duration,
    /// Layout tuning
    pub layout: LayoutConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            tick_interval: DEFAULT_TICK_INTERVAL,
            layout: LayoutConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Read `GCVIZ_ALGORITHM` and `GCVIZ_TICK_MS`, defaulting when unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("GCVIZ_ALGORITHM") {
            config.algorithm = name.parse()?;
        }

        if let Some(raw) = lookup("GCVIZ_TICK_MS") {
            let ms: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|&ms| ms > 0)
                .ok_or_else(|| Error::InvalidConfig {
                    key: "GCVIZ_TICK_MS",
                    value: raw.clone(),
                })?;
            config.tick_interval = Duration::from_millis(ms);
        }

        Ok(config)
    }
}

/// Configuration for the HTTP/WebSocket surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl ServerConfig {
    /// Read `GCVIZ_PORT`, defaulting when unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var("GCVIZ_PORT") {
            Ok(raw) => Self::parse_port(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn parse_port(raw: &str) -> Result<Self> {
        raw.trim()
            .parse()
            .map(|port| Self { port })
            .map_err(|_| Error::InvalidConfig {
                key: "GCVIZ_PORT",
                value: raw.to_string(),
            })
    }
}
