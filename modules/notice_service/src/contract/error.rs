//! Contract error types for notice service
//!
//! These errors are transport-agnostic and used for inter-module communication.

use super::model::Capability;

/// Error code reported when the end date precedes the start date
pub const INVALID_DATE_RANGE: &str = "invalid_date_range";

/// Notice service domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoticeError {
    /// User-correctable input error; settings are left unchanged
    #[error("{message}")]
    Validation {
        /// Machine readable error code
        code: String,
        /// Message shown to the admin
        message: String,
    },
    /// The option store failed to read or write the record
    #[error("Persistence error: {reason}")]
    Persistence {
        /// Failure details (logged, never shown to end users)
        reason: String,
    },
    /// The caller is not authenticated
    #[error("Authentication required")]
    Unauthorized,
    /// The caller lacks a required capability
    #[error("Missing capability: {capability}")]
    Forbidden {
        /// Capability that was checked
        capability: Capability,
    },
    /// The anti-forgery token is missing, malformed or expired
    #[error("The link you followed has expired.")]
    InvalidNonce,
}

impl NoticeError {
    pub fn invalid_date_range() -> Self {
        Self::Validation {
            code: INVALID_DATE_RANGE.to_string(),
            message: "End date must be after start date.".to_string(),
        }
    }

    pub fn persistence(reason: impl Into<String>) -> Self {
        Self::Persistence {
            reason: reason.into(),
        }
    }

    /// Machine readable code for the error
    pub fn code(&self) -> &str {
        match self {
            Self::Validation { code, .. } => code,
            Self::Persistence { .. } => "persistence_error",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden { .. } => "forbidden",
            Self::InvalidNonce => "invalid_nonce",
        }
    }
}
