//! Option store trait for data access
//!
//! The notice record lives in a host-provided key-value option store.
//! Implementations are in infra/storage/repositories.rs and infra/memory.rs

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Key-value option store
#[async_trait]
pub trait OptionStore: Send + Sync {
    /// Read the raw value stored under `key`, `None` if it was never written
    async fn read(&self, key: &str) -> Result<Option<Value>>;

    /// Write `value` under `key`.
    ///
    /// `autoload` hints that the option should be loaded eagerly with the
    /// other autoloaded options. Returns `Ok(false)` when nothing was written
    /// because the stored value is already identical.
    async fn write(&self, key: &str, value: &Value, autoload: bool) -> Result<bool>;
}
