//! Domain service - shared dependencies and per-request orchestration

use crate::config::{Config, ConfigError};
use crate::contract::{AuthContext, Capability, NoticeError, NoticeSettings, NoticeStatus};
use super::activation::{is_active, today_in, Clock};
use super::auth::{require, Authorizer};
use super::nonce::NonceIssuer;
use super::repository::OptionStore;
use super::status::describe;
use super::store::SettingsStore;
use chrono_tz::Tz;
use std::sync::Arc;

/// Long-lived service state shared by all requests.
///
/// Holds no settings itself; each request asks for its own [`SettingsStore`].
pub struct Service {
    options: Arc<dyn OptionStore>,
    authorizer: Arc<dyn Authorizer>,
    clock: Arc<dyn Clock>,
    nonces: NonceIssuer,
    option_key: String,
    autoload: bool,
    timezone: Tz,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        options: Arc<dyn OptionStore>,
        authorizer: Arc<dyn Authorizer>,
        clock: Arc<dyn Clock>,
        nonces: NonceIssuer,
        config: &Config,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            options,
            authorizer,
            clock,
            nonces,
            option_key: config.option_key.clone(),
            autoload: config.autoload,
            timezone: config.timezone()?,
        })
    }

    /// Start a request: a store with an empty cache
    pub fn store(&self) -> SettingsStore {
        SettingsStore::new(self.options.clone(), self.option_key.clone(), self.autoload)
    }

    /// Today in the site calendar
    pub fn today(&self) -> String {
        today_in(self.clock.now(), self.timezone)
    }

    pub fn nonces(&self) -> &NonceIssuer {
        &self.nonces
    }

    pub fn authorize(&self, ctx: &AuthContext, capability: Capability) -> Result<(), NoticeError> {
        require(self.authorizer.as_ref(), ctx, capability)
    }

    /// Activation check against today's date, using the request cache
    pub async fn is_active(&self, store: &mut SettingsStore) -> Result<bool, NoticeError> {
        let settings = store.get_settings(false).await?;
        Ok(self.is_active_today(&settings))
    }

    pub fn is_active_today(&self, settings: &NoticeSettings) -> bool {
        is_active(settings, &self.today())
    }

    pub fn status(&self, settings: &NoticeSettings) -> Option<NoticeStatus> {
        describe(settings, &self.today())
    }
}

impl std::fmt::Debug for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Service")
            .field("option_key", &self.option_key)
            .field("autoload", &self.autoload)
            .field("timezone", &self.timezone)
            .field("nonces", &self.nonces)
            .finish()
    }
}
