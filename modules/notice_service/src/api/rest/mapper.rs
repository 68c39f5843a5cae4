//! Mapper implementations for converting between DTOs and contract models

use super::dto::*;
use crate::contract;
use crate::domain::validation::{
    sanitize_text_field, FIELD_ALWAYS_SHOW, FIELD_CONTENT, FIELD_END_DATE, FIELD_START_DATE,
};
use serde_json::{json, Value};

impl From<contract::NoticeSettings> for NoticeSettingsDto {
    fn from(settings: contract::NoticeSettings) -> Self {
        Self {
            content: settings.content,
            start_date: settings.start_date,
            end_date: settings.end_date,
            always_show: settings.always_show,
        }
    }
}

impl DashboardForm {
    /// Raw settings input for the store.
    ///
    /// Content is passed through untouched (the store sanitizes it as rich
    /// text); the checkbox maps to a presence flag.
    pub fn into_raw(self) -> Value {
        json!({
            FIELD_CONTENT: self.notiblock_content.unwrap_or_default(),
            FIELD_START_DATE: sanitize_text_field(&self.notiblock_start_date.unwrap_or_default()),
            FIELD_END_DATE: sanitize_text_field(&self.notiblock_end_date.unwrap_or_default()),
            FIELD_ALWAYS_SHOW: self.notiblock_always_show.is_some(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkbox_presence_maps_to_flag() {
        let form = DashboardForm {
            notiblock_always_show: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(form.into_raw()[FIELD_ALWAYS_SHOW], json!(true));

        let form = DashboardForm::default();
        let raw = form.into_raw();
        assert_eq!(raw[FIELD_ALWAYS_SHOW], json!(false));
        assert_eq!(raw[FIELD_CONTENT], json!(""));
    }

    #[test]
    fn test_dates_are_trimmed() {
        let form = DashboardForm {
            notiblock_start_date: Some(" 2025-01-01 ".to_string()),
            ..Default::default()
        };
        assert_eq!(form.into_raw()[FIELD_START_DATE], json!("2025-01-01"));
    }
}
