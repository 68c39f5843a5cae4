//! In-memory option store for tests and ephemeral deployments

use crate::domain::repository::OptionStore;
use anyhow::{bail, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Debug, Clone)]
struct StoredOption {
    value: Value,
    autoload: bool,
}

/// Process-local option store.
///
/// Counts reads and writes and can be told to fail, so callers' caching and
/// error paths can be observed.
#[derive(Debug, Default)]
pub struct InMemoryOptionStore {
    data: RwLock<HashMap<String, StoredOption>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without counting it as a write
    pub fn with_value(self, key: &str, value: Value) -> Self {
        self.data.write().insert(
            key.to_string(),
            StoredOption {
                value,
                autoload: true,
            },
        );
        self
    }

    /// Stored value, bypassing the read counter
    pub fn peek(&self, key: &str) -> Option<Value> {
        self.data.read().get(key).map(|o| o.value.clone())
    }

    pub fn autoload(&self, key: &str) -> Option<bool> {
        self.data.read().get(key).map(|o| o.autoload)
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl OptionStore for InMemoryOptionStore {
    async fn read(&self, key: &str) -> Result<Option<Value>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            bail!("option store unavailable");
        }
        Ok(self.peek(key))
    }

    async fn write(&self, key: &str, value: &Value, autoload: bool) -> Result<bool> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("option store unavailable");
        }

        let mut data = self.data.write();
        if data.get(key).is_some_and(|o| &o.value == value) {
            return Ok(false);
        }

        data.insert(
            key.to_string(),
            StoredOption {
                value: value.clone(),
                autoload,
            },
        );
        Ok(true)
    }
}
