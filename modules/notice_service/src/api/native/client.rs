//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{NoticeApi, NoticeError, NoticeSettings, NoticeStatus};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
///
/// In-process callers are trusted: no capability checks are applied. Each
/// call gets its own settings cache.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl NoticeApi for NativeClient {
    async fn get_settings(&self) -> Result<NoticeSettings, NoticeError> {
        self.service.store().get_settings(false).await
    }

    async fn save_settings(&self, raw: serde_json::Value) -> Result<NoticeSettings, NoticeError> {
        let mut store = self.service.store();
        store.save_settings(&raw).await?;
        store.get_settings(false).await
    }

    async fn is_active(&self) -> Result<bool, NoticeError> {
        let mut store = self.service.store();
        self.service.is_active(&mut store).await
    }

    async fn status(&self) -> Result<Option<NoticeStatus>, NoticeError> {
        let settings = self.service.store().get_settings(false).await?;
        Ok(self.service.status(&settings))
    }
}
