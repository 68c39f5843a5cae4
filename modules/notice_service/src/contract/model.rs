//! Contract models for notice service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// The global notice record.
///
/// After normalization every field is present: absent dates are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeSettings {
    /// Sanitized rich-text message
    pub content: String,
    /// First day of the activation window (`YYYY-MM-DD`) or empty
    pub start_date: String,
    /// Last day of the activation window (`YYYY-MM-DD`) or empty
    pub end_date: String,
    /// Bypasses the activation window entirely
    pub always_show: bool,
}

impl NoticeSettings {
    /// Whether a message has been configured
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    /// Whether at least one bound of the activation window is set
    pub fn has_date_range(&self) -> bool {
        !self.start_date.is_empty() || !self.end_date.is_empty()
    }
}

/// Dashboard summary of the current notice state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeStatus {
    /// Result of the activation check for today
    pub active: bool,
    /// Human readable description of the display period, if any
    pub period: Option<String>,
}

impl NoticeStatus {
    pub fn label(&self) -> &'static str {
        if self.active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

/// Capabilities checked before the notice is read or mutated
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Minimal content-editing capability, required by the settings endpoint
    EditPosts,
    /// Site administration, required by the dashboard form
    ManageOptions,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EditPosts => "edit_posts",
            Self::ManageOptions => "manage_options",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "edit_posts" => Ok(Self::EditPosts),
            "manage_options" => Ok(Self::ManageOptions),
            other => Err(format!("unknown capability '{}'", other)),
        }
    }
}

/// Authentication context of the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    /// Authenticated user, `None` for anonymous callers
    pub user_id: Option<String>,
    /// Capabilities granted to the caller
    pub capabilities: BTreeSet<Capability>,
}

impl AuthContext {
    /// Create an anonymous context
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Create an authenticated context with the given capabilities
    pub fn user(user_id: impl Into<String>, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            capabilities: capabilities.into_iter().collect(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// Stable identifier used to bind anti-forgery tokens
    pub fn nonce_subject(&self) -> &str {
        self.user_id.as_deref().unwrap_or("0")
    }
}
