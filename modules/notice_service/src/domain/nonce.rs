//! Anti-forgery tokens for the dashboard form
//!
//! A token is bound to an action, a user and a time tick of half the token
//! lifetime. Tokens from the current and the previous tick are accepted, so a
//! token stays valid for between one half and one full lifetime.

use super::activation::Clock;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use std::sync::Arc;

/// Action name for the settings form
pub const SAVE_SETTINGS_ACTION: &str = "notiblock_save_settings";

const TOKEN_LEN: usize = 10;

pub struct NonceIssuer {
    secret: String,
    lifetime_secs: i64,
    clock: Arc<dyn Clock>,
}

impl NonceIssuer {
    pub fn new(secret: impl Into<String>, lifetime_secs: u64, clock: Arc<dyn Clock>) -> Self {
        // A tick needs at least one second
        let lifetime_secs = i64::try_from(lifetime_secs).unwrap_or(i64::MAX).max(2);
        Self {
            secret: secret.into(),
            lifetime_secs,
            clock,
        }
    }

    fn tick(&self) -> i64 {
        let half = self.lifetime_secs / 2;
        let now = self.clock.now().timestamp();
        // ceil(now / half) for non-negative timestamps
        (now + half - 1).div_euclid(half)
    }

    fn token_for(&self, tick: i64, action: &str, subject: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(tick.to_string().as_bytes());
        hasher.update(b"|");
        hasher.update(action.as_bytes());
        hasher.update(b"|");
        hasher.update(subject.as_bytes());
        hasher.update(b"|");
        hasher.update(self.secret.as_bytes());
        let digest = hex::encode(hasher.finalize());
        digest[..TOKEN_LEN].to_string()
    }

    /// Issue a token for `action` on behalf of `subject`
    pub fn create(&self, action: &str, subject: &str) -> String {
        self.token_for(self.tick(), action, subject)
    }

    /// Check a submitted token
    pub fn verify(&self, token: &str, action: &str, subject: &str) -> bool {
        if token.len() != TOKEN_LEN {
            return false;
        }

        let tick = self.tick();
        [tick, tick - 1]
            .into_iter()
            .any(|t| {
                self.token_for(t, action, subject)
                    .as_bytes()
                    .ct_eq(token.as_bytes())
                    .into()
            })
    }
}

impl std::fmt::Debug for NonceIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonceIssuer")
            .field("secret", &"<redacted>")
            .field("lifetime_secs", &self.lifetime_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::activation::FixedClock;
    use chrono::{Duration, TimeZone, Utc};

    const DAY: u64 = 86_400;

    fn issuer_at(offset_secs: i64) -> NonceIssuer {
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 1).unwrap();
        let clock = Arc::new(FixedClock(base + Duration::seconds(offset_secs)));
        NonceIssuer::new("test-secret", DAY, clock)
    }

    #[test]
    fn test_token_shape() {
        let token = issuer_at(0).create(SAVE_SETTINGS_ACTION, "admin");
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_verify_same_tick() {
        let issuer = issuer_at(0);
        let token = issuer.create(SAVE_SETTINGS_ACTION, "admin");
        assert!(issuer.verify(&token, SAVE_SETTINGS_ACTION, "admin"));
    }

    #[test]
    fn test_verify_rejects_other_action_or_user() {
        let issuer = issuer_at(0);
        let token = issuer.create(SAVE_SETTINGS_ACTION, "admin");
        assert!(!issuer.verify(&token, "other_action", "admin"));
        assert!(!issuer.verify(&token, SAVE_SETTINGS_ACTION, "editor"));
        assert!(!issuer.verify("", SAVE_SETTINGS_ACTION, "admin"));
        assert!(!issuer.verify("0123456789", SAVE_SETTINGS_ACTION, "admin"));
    }

    #[test]
    fn test_near_miss_tokens_rejected() {
        let issuer = issuer_at(0);
        let token = issuer.create(SAVE_SETTINGS_ACTION, "admin");

        let mut flipped = token.clone().into_bytes();
        flipped[TOKEN_LEN - 1] = if flipped[TOKEN_LEN - 1] == b'0' { b'1' } else { b'0' };
        let flipped = String::from_utf8(flipped).unwrap();
        assert!(!issuer.verify(&flipped, SAVE_SETTINGS_ACTION, "admin"));

        assert!(!issuer.verify(&format!("{token}0"), SAVE_SETTINGS_ACTION, "admin"));
        assert!(!issuer.verify(&token[..TOKEN_LEN - 1], SAVE_SETTINGS_ACTION, "admin"));
    }

    #[test]
    fn test_previous_tick_accepted_older_rejected() {
        let token = issuer_at(0).create(SAVE_SETTINGS_ACTION, "admin");
        let half = (DAY / 2) as i64;

        assert!(issuer_at(half).verify(&token, SAVE_SETTINGS_ACTION, "admin"));
        assert!(!issuer_at(2 * half).verify(&token, SAVE_SETTINGS_ACTION, "admin"));
    }

    #[test]
    fn test_secret_changes_token() {
        let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 1).unwrap()));
        let a = NonceIssuer::new("one", DAY, clock.clone());
        let b = NonceIssuer::new("two", DAY, clock);
        assert_ne!(
            a.create(SAVE_SETTINGS_ACTION, "admin"),
            b.create(SAVE_SETTINGS_ACTION, "admin")
        );
    }
}
