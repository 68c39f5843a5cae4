//! Common test utilities: pinned clock, seeded option store and a wired module
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use notice_service::config::{AuthConfig, Config, TokenConfig};
use notice_service::domain::{FixedClock, OptionStore, SAVE_SETTINGS_ACTION};
use notice_service::infra::InMemoryOptionStore;
use notice_service::{ModuleCtx, NoticeServiceModule};
use std::sync::Arc;

pub const OPTION_KEY: &str = "notiblock_global_notice";
pub const NONCE_SECRET: &str = "test-nonce-secret";

pub const EDITOR_TOKEN: &str = "editor-token";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const SUBSCRIBER_TOKEN: &str = "subscriber-token";

/// Midday UTC on `date` (`YYYY-MM-DD`)
pub fn instant(date: &str) -> DateTime<Utc> {
    format!("{date}T12:00:00Z")
        .parse()
        .unwrap_or_else(|e| panic!("bad test date {date}: {e}"))
}

pub fn fixed_clock(date: &str) -> Arc<FixedClock> {
    Arc::new(FixedClock(instant(date)))
}

pub fn auth_config() -> AuthConfig {
    let token = |token: &str, user: &str, caps: &[&str]| TokenConfig {
        token: token.to_string(),
        user_id: user.to_string(),
        capabilities: caps.iter().map(|c| c.to_string()).collect(),
    };

    AuthConfig {
        nonce_secret: NONCE_SECRET.to_string(),
        nonce_lifetime_secs: 86_400,
        tokens: vec![
            token(EDITOR_TOKEN, "editor", &["edit_posts"]),
            token(ADMIN_TOKEN, "admin", &["manage_options"]),
            token(SUBSCRIBER_TOKEN, "subscriber", &[]),
        ],
    }
}

/// Module wired to an in-memory store and a clock pinned to `today`
pub fn init_module(options: Arc<InMemoryOptionStore>, today: &str) -> NoticeServiceModule {
    let module = NoticeServiceModule::default();
    module
        .init(ModuleCtx {
            config: Config::default(),
            auth: auth_config(),
            options: options as Arc<dyn OptionStore>,
            clock: fixed_clock(today),
        })
        .unwrap();
    module
}

/// A nonce the dashboard would have embedded for the admin user
pub fn admin_nonce(module: &NoticeServiceModule) -> String {
    module
        .service()
        .unwrap()
        .nonces()
        .create(SAVE_SETTINGS_ACTION, "admin")
}

pub fn print_test_header(test_name: &str, purpose: &str) {
    println!("\n🧪 TEST: {}", test_name);
    println!("📋 PURPOSE: {}", purpose);
}
