//! Layered server configuration.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. an optional YAML file (`--config <path>`)
//! 3. environment variables prefixed `MANAGER__`, `__` separating sections
//!    (e.g. `MANAGER__DATABASE__URL`)

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, ensure};
use clients::ClientsConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use identity::IdentityConfig;
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "MANAGER__";

const REDACTED: &str = "[REDACTED]";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub identity: IdentityConfig,
    pub clients: ClientsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Listen address, `host:port`.
    pub bind_addr: String,
    /// Requests running longer than this are answered with 408.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_owned(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// `SQLx` connection URL (`sqlite://...` or `postgres://...`).
    pub url: String,
    pub max_conns: u32,
    pub min_conns: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://client-manager.db?mode=rwc".to_owned(),
            max_conns: 10,
            min_conns: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` overrides it when set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Merge defaults, the optional YAML file and `MANAGER__*` variables,
    /// then validate the result.
    ///
    /// # Errors
    /// Fails if the file is missing or unparsable, a value has the wrong
    /// shape, or validation rejects the merged configuration.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            ensure!(
                path.is_file(),
                "config file not found: {}",
                path.display()
            );
            figment = figment.merge(Yaml::file(path));
        }

        let cfg: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    /// Returns the first invalid setting.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid server.bind_addr '{}'", self.server.bind_addr))?;
        ensure!(
            self.server.request_timeout_secs > 0,
            "server.request_timeout_secs must be greater than zero"
        );
        ensure!(
            !self.database.url.trim().is_empty(),
            "database.url must be set"
        );
        ensure!(
            self.database.max_conns > 0 && self.database.min_conns <= self.database.max_conns,
            "database.min_conns must not exceed database.max_conns, which must be positive"
        );
        self.identity.validate().map_err(anyhow::Error::msg)?;
        self.clients.validate().map_err(anyhow::Error::msg)?;
        Ok(())
    }

    /// Effective configuration as pretty JSON with the signing secret masked.
    ///
    /// # Errors
    /// Fails only if serialization fails.
    pub fn redacted_json(&self) -> anyhow::Result<String> {
        let mut shown = self.clone();
        if !shown.identity.token_secret.is_empty() {
            REDACTED.clone_into(&mut shown.identity.token_secret);
        }
        serde_json::to_string_pretty(&shown).context("failed to render configuration")
    }
}
