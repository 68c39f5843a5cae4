//! Native client trait for inter-module communication
//!
//! This trait defines the API that other modules use to interact with the notice service.
//! NO HTTP - direct function calls for performance.

use super::{
    error::NoticeError,
    model::{NoticeSettings, NoticeStatus},
};
use async_trait::async_trait;

/// Notice service API for inter-module communication
///
/// Every call runs against a fresh request-scoped settings cache.
#[async_trait]
pub trait NoticeApi: Send + Sync {
    /// Get the normalized notice settings
    async fn get_settings(&self) -> Result<NoticeSettings, NoticeError>;

    /// Sanitize, validate and persist raw settings input, returning the stored record
    async fn save_settings(&self, raw: serde_json::Value) -> Result<NoticeSettings, NoticeError>;

    /// Whether the notice should display today
    async fn is_active(&self) -> Result<bool, NoticeError>;

    /// Dashboard status summary, `None` when no message is configured
    async fn status(&self) -> Result<Option<NoticeStatus>, NoticeError>;
}
