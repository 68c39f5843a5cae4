//! Status summary shown on the dashboard

use crate::contract::{NoticeSettings, NoticeStatus};
use super::activation::is_active;

/// Describe the notice state for `today`, `None` when no message is configured
pub fn describe(settings: &NoticeSettings, today: &str) -> Option<NoticeStatus> {
    if !settings.has_content() {
        return None;
    }

    let period = if settings.always_show {
        Some("Always visible (date range ignored)".to_string())
    } else {
        match (settings.start_date.as_str(), settings.end_date.as_str()) {
            ("", "") => None,
            (start, "") => Some(format!("Display from: {}", start)),
            ("", end) => Some(format!("Display until: {}", end)),
            (start, end) => Some(format!("Display period: {} to {}", start, end)),
        }
    };

    Some(NoticeStatus {
        active: is_active(settings, today),
        period,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(start: &str, end: &str, always_show: bool) -> NoticeSettings {
        NoticeSettings {
            content: "<p>Hi</p>".to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            always_show,
        }
    }

    #[test]
    fn test_no_content_no_status() {
        assert_eq!(describe(&NoticeSettings::default(), "2025-01-01"), None);
    }

    #[test]
    fn test_periods() {
        let status = describe(&settings("2025-01-01", "2025-01-31", false), "2025-01-10").unwrap();
        assert!(status.active);
        assert_eq!(status.label(), "Active");
        assert_eq!(status.period.as_deref(), Some("Display period: 2025-01-01 to 2025-01-31"));

        let status = describe(&settings("2025-01-01", "", false), "2024-01-10").unwrap();
        assert!(!status.active);
        assert_eq!(status.label(), "Inactive");
        assert_eq!(status.period.as_deref(), Some("Display from: 2025-01-01"));

        let status = describe(&settings("", "2025-01-31", false), "2025-01-10").unwrap();
        assert_eq!(status.period.as_deref(), Some("Display until: 2025-01-31"));

        let status = describe(&settings("", "", false), "2025-01-10").unwrap();
        assert!(!status.active);
        assert_eq!(status.period, None);
    }

    #[test]
    fn test_always_show_period() {
        let status = describe(&settings("2099-01-01", "", true), "2025-01-10").unwrap();
        assert!(status.active);
        assert_eq!(status.period.as_deref(), Some("Always visible (date range ignored)"));
    }
}
