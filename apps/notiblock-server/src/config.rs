//! Layered server configuration: defaults, then YAML file, then environment

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use notice_service::api::rest::TokenRegistry;
use notice_service::config::{AuthConfig, Config as NoticeConfig};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Environment variable prefix; nested keys are separated by `__`
pub const ENV_PREFIX: &str = "NOTIBLOCK__";

/// Database URL selecting the process-local option store
pub const MEMORY_DATABASE: &str = "memory";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub notice: NoticeConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum accepted request body (bytes)
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SeaORM connection URL, or `memory` for a process-local store
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Run migrations on `serve`
    #[serde(default = "default_true")]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            auto_migrate: true,
        }
    }
}

impl DatabaseConfig {
    pub fn is_memory(&self) -> bool {
        self.url == MEMORY_DATABASE
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration; a missing YAML file is not an error
    pub fn load(path: &Path) -> Result<Self> {
        Self::figment(path)
            .extract()
            .with_context(|| format!("failed to load configuration from {}", path.display()))
    }

    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .with_context(|| format!("invalid bind address '{}'", self.server.bind))
    }

    /// Check everything that can be checked without opening the database
    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        self.notice.validate()?;
        TokenRegistry::from_config(&self.auth)?;
        Ok(())
    }

    /// Copy safe to print: token values and the nonce secret are masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.auth.nonce_secret.is_empty() {
            copy.auth.nonce_secret = REDACTED.to_string();
        }
        for token in &mut copy.auth.tokens {
            token.token = REDACTED.to_string();
        }
        copy
    }
}

const REDACTED: &str = "<redacted>";

fn default_bind() -> String {
    "127.0.0.1:8087".to_string()
}

fn default_body_limit() -> usize {
    256 * 1024
}

fn default_database_url() -> String {
    "sqlite://notiblock.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
