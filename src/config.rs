//! Server configuration from environment variables
//!
//! | Variable               | Default                 |
//! |------------------------|-------------------------|
//! | `PORT`                 | 3000                    |
//! | `HOST`                 | 0.0.0.0                 |
//! | `CORS_ORIGINS`         | `http://localhost:5173` |
//! | `API_VERSION`          | v1                      |
//! | `ADVISOR_HISTORY_SEED` | unset (entropy)         |

use anyhow::Context;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_API_VERSION: &str = "v1";

/// Allowed cross-origin callers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// `CORS_ORIGINS=*`
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    /// Comma-separated list; blank entries are dropped
    pub fn parse(raw: &str) -> Self {
        if raw.trim() == "*" {
            return CorsOrigins::Any;
        }
        CorsOrigins::List(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub cors_origins: CorsOrigins,
    pub api_version: String,
    /// Seed for the yield-history generator
    pub history_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            cors_origins: CorsOrigins::List(vec![DEFAULT_CORS_ORIGIN.to_string()]),
            api_version: DEFAULT_API_VERSION.to_string(),
            history_seed: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys take defaults; set but
    /// unparseable values are errors.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT") {
            config.port = port.trim().parse().with_context(|| format!("Invalid PORT: {}", port))?;
        }

        if let Some(host) = lookup("HOST") {
            config.host = host.trim().parse().with_context(|| format!("Invalid HOST: {}", host))?;
        }

        if let Some(origins) = lookup("CORS_ORIGINS") {
            config.cors_origins = CorsOrigins::parse(&origins);
        }

        if let Some(version) = lookup("API_VERSION").filter(|v| !v.trim().is_empty()) {
            config.api_version = version.trim().to_string();
        }

        if let Some(seed) = lookup("ADVISOR_HISTORY_SEED") {
            config.history_seed = Some(
                seed.trim()
                    .parse()
                    .with_context(|| format!("Invalid ADVISOR_HISTORY_SEED: {}", seed))?,
            );
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Route prefix, e.g. `/api/v1`
    pub fn api_prefix(&self) -> String {
        format!("/api/{}", self.api_version)
    }
}
