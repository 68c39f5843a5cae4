//! Activation window evaluation
//!
//! The window is inclusive on both ends and either end may be open. Dates are
//! compared as `YYYY-MM-DD` strings, which matches calendar order as long as
//! the format is enforced on write.

use crate::contract::NoticeSettings;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Whether the notice should display on `today` (`YYYY-MM-DD`, site calendar)
pub fn is_active(settings: &NoticeSettings, today: &str) -> bool {
    if settings.always_show {
        return true;
    }

    if !settings.has_date_range() {
        return false;
    }

    if !settings.start_date.is_empty() && today < settings.start_date.as_str() {
        return false;
    }

    if !settings.end_date.is_empty() && today > settings.end_date.as_str() {
        return false;
    }

    true
}

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Calendar date of `now` in the site timezone, as `YYYY-MM-DD`
pub fn today_in(now: DateTime<Utc>, tz: Tz) -> String {
    now.with_timezone(&tz).format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn window(start: &str, end: &str) -> NoticeSettings {
        NoticeSettings {
            content: "<p>Notice</p>".to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            always_show: false,
        }
    }

    #[test]
    fn test_always_show_wins() {
        let settings = NoticeSettings {
            always_show: true,
            ..window("2099-01-01", "2000-01-01")
        };
        assert!(is_active(&settings, "2025-06-01"));
        assert!(is_active(&settings, ""));
    }

    #[test]
    fn test_no_range_configured() {
        assert!(!is_active(&window("", ""), "2025-06-01"));
    }

    #[test]
    fn test_open_ended_start() {
        let settings = window("2025-01-01", "");
        assert!(is_active(&settings, "2025-06-01"));
        assert!(is_active(&settings, "2025-01-01"));
        assert!(!is_active(&settings, "2024-12-31"));
    }

    #[test]
    fn test_open_ended_end() {
        let settings = window("", "2025-01-31");
        assert!(is_active(&settings, "1999-01-01"));
        assert!(is_active(&settings, "2025-01-31"));
        assert!(!is_active(&settings, "2025-02-01"));
    }

    #[test]
    fn test_inclusive_boundaries() {
        let settings = window("2025-01-01", "2025-01-31");
        assert!(is_active(&settings, "2025-01-01"));
        assert!(is_active(&settings, "2025-01-15"));
        assert!(is_active(&settings, "2025-01-31"));
        assert!(!is_active(&settings, "2024-12-31"));
        assert!(!is_active(&settings, "2025-02-01"));
    }

    #[test]
    fn test_single_day_window() {
        let settings = window("2025-03-10", "2025-03-10");
        assert!(is_active(&settings, "2025-03-10"));
        assert!(!is_active(&settings, "2025-03-09"));
        assert!(!is_active(&settings, "2025-03-11"));
    }

    #[test]
    fn test_today_follows_site_timezone() {
        // 23:30 UTC on Jan 31 is already Feb 1 in Berlin
        let now = Utc.with_ymd_and_hms(2025, 1, 31, 23, 30, 0).unwrap();
        assert_eq!(today_in(now, chrono_tz::UTC), "2025-01-31");
        assert_eq!(today_in(now, chrono_tz::Europe::Berlin), "2025-02-01");
        assert_eq!(today_in(now, chrono_tz::America::New_York), "2025-01-31");

        let settings = window("2025-01-01", "2025-01-31");
        assert!(is_active(&settings, &today_in(now, chrono_tz::UTC)));
        assert!(!is_active(&settings, &today_in(now, chrono_tz::Europe::Berlin)));
    }

    #[test]
    fn test_fixed_clock() {
        let instant = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(FixedClock(instant).now(), instant);
    }
}
