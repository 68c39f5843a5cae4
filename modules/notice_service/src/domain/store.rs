//! Request-scoped settings store
//!
//! A `SettingsStore` is built for one inbound request and dropped with it; its
//! cache is never shared between requests, so no locking is involved.

use crate::contract::{NoticeError, NoticeSettings};
use super::repository::OptionStore;
use super::validation::{
    normalize_stored, sanitize_input, validate_date_range, FIELD_ALWAYS_SHOW, FIELD_CONTENT,
    FIELD_END_DATE, FIELD_START_DATE,
};
use serde_json::{json, Value};
use std::sync::Arc;

pub struct SettingsStore {
    options: Arc<dyn OptionStore>,
    option_key: String,
    autoload: bool,
    cache: Option<NoticeSettings>,
}

impl SettingsStore {
    pub fn new(options: Arc<dyn OptionStore>, option_key: impl Into<String>, autoload: bool) -> Self {
        Self {
            options,
            option_key: option_key.into(),
            autoload,
            cache: None,
        }
    }

    /// Cached record, if this request already loaded or wrote one
    pub fn cached(&self) -> Option<&NoticeSettings> {
        self.cache.as_ref()
    }

    /// Get the normalized settings.
    ///
    /// Served from the request cache unless `force_refresh` is set or nothing
    /// has been loaded yet. A missing option yields the defaults.
    pub async fn get_settings(&mut self, force_refresh: bool) -> Result<NoticeSettings, NoticeError> {
        if !force_refresh {
            if let Some(cached) = &self.cache {
                tracing::debug!(key = %self.option_key, "notice settings served from request cache");
                return Ok(cached.clone());
            }
        }

        let raw = self.options.read(&self.option_key).await.map_err(|e| {
            tracing::error!(key = %self.option_key, error = ?e, "failed to read notice settings");
            NoticeError::persistence(e.to_string())
        })?;

        tracing::debug!(key = %self.option_key, found = raw.is_some(), "notice settings loaded from option store");

        let settings = normalize_stored(raw.as_ref());
        self.cache = Some(settings.clone());
        Ok(settings)
    }

    /// Sanitize, validate and persist raw settings input.
    ///
    /// Nothing is written when validation fails. After a successful write the
    /// cache holds the written record so later reads in this request see it
    /// without another store read. A failed write leaves the cache untouched.
    pub async fn save_settings(&mut self, raw: &Value) -> Result<(), NoticeError> {
        let sanitized = sanitize_input(raw);

        if let Err(e) = validate_date_range(&sanitized) {
            tracing::warn!(
                start_date = %sanitized.start_date,
                end_date = %sanitized.end_date,
                "rejected notice settings with inverted date range"
            );
            return Err(e);
        }

        let value = to_option_value(&sanitized);
        let written = self
            .options
            .write(&self.option_key, &value, self.autoload)
            .await
            .map_err(|e| {
                tracing::error!(key = %self.option_key, error = ?e, "failed to write notice settings");
                NoticeError::persistence(e.to_string())
            })?;

        if !written {
            tracing::warn!(key = %self.option_key, "option store reported no change for notice settings");
            return Err(NoticeError::persistence("option value was not updated"));
        }

        self.cache = Some(normalize_stored(Some(&value)));
        tracing::info!(
            key = %self.option_key,
            always_show = sanitized.always_show,
            start_date = %sanitized.start_date,
            end_date = %sanitized.end_date,
            "notice settings saved"
        );
        Ok(())
    }
}

fn to_option_value(settings: &NoticeSettings) -> Value {
    json!({
        FIELD_CONTENT: settings.content,
        FIELD_START_DATE: settings.start_date,
        FIELD_END_DATE: settings.end_date,
        FIELD_ALWAYS_SHOW: settings.always_show,
    })
}
