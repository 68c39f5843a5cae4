//! Configuration for notice service module

use crate::contract::{AuthContext, Capability};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Configuration errors detected while building the module
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid timezone '{0}'")]
    InvalidTimezone(String),

    #[error("Invalid capability for token of user '{user_id}': {reason}")]
    InvalidCapability { user_id: String, reason: String },

    #[error("Option key cannot be empty")]
    EmptyOptionKey,
}

/// Notice settings configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Option store key holding the notice record
    #[serde(default = "default_option_key")]
    pub option_key: String,

    /// IANA timezone of the site calendar used to compute "today"
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Autoload hint passed to the option store on write
    #[serde(default = "default_true")]
    pub autoload: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            option_key: default_option_key(),
            timezone: default_timezone(),
            autoload: true,
        }
    }
}

impl Config {
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::InvalidTimezone(self.timezone.clone()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.option_key.trim().is_empty() {
            return Err(ConfigError::EmptyOptionKey);
        }
        self.timezone()?;
        Ok(())
    }
}

/// Caller authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Secret mixed into anti-forgery tokens; generated per process when empty
    #[serde(default)]
    pub nonce_secret: String,

    /// Anti-forgery token lifetime (seconds)
    #[serde(default = "default_nonce_lifetime")]
    pub nonce_lifetime_secs: u64,

    /// Static bearer tokens
    #[serde(default)]
    pub tokens: Vec<TokenConfig>,
}

/// A bearer token and the user it authenticates
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TokenConfig {
    pub token: String,
    pub user_id: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl TokenConfig {
    pub fn auth_context(&self) -> Result<AuthContext, ConfigError> {
        let capabilities = self
            .capabilities
            .iter()
            .map(|c| c.parse::<Capability>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|reason| ConfigError::InvalidCapability {
                user_id: self.user_id.clone(),
                reason,
            })?;

        Ok(AuthContext::user(self.user_id.clone(), capabilities))
    }
}

fn default_option_key() -> String {
    "notiblock_global_notice".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_true() -> bool {
    true
}

fn default_nonce_lifetime() -> u64 {
    86_400 // 1 day
}
