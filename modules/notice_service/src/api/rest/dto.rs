//! REST DTOs with serde derives for HTTP API

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Notice settings response DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NoticeSettingsDto {
    /// Sanitized rich-text message
    #[schema(example = "<p>We are closed for the holidays.</p>")]
    pub content: String,

    /// First day of the display window, empty when open
    #[schema(example = "2025-12-20")]
    pub start_date: String,

    /// Last day of the display window, empty when open
    #[schema(example = "2026-01-02")]
    pub end_date: String,

    /// Display regardless of the date window
    pub always_show: bool,
}

/// Dashboard form submission (`application/x-www-form-urlencoded`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardForm {
    pub notiblock_content: Option<String>,
    pub notiblock_start_date: Option<String>,
    pub notiblock_end_date: Option<String>,
    /// Checkbox: present when ticked, whatever its value
    pub notiblock_always_show: Option<String>,
    pub notiblock_nonce: Option<String>,
    /// Name of the submit button; absent when the form was not submitted
    pub notiblock_save_settings: Option<String>,
}

/// Query parameters accepted by the block renderers
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockQuery {
    /// Extra wrapper class names from the host editor
    #[serde(rename = "className")]
    pub class_name: Option<String>,
}

// Note: Conversion implementations live in mapper.rs
