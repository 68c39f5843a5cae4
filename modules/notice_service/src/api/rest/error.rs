//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::NoticeError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Machine readable error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            code: None,
        }
    }

    /// Add detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: NoticeError) -> Problem {
    let code = error.code().to_string();
    match error {
        NoticeError::Validation { message, .. } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error").with_detail(message)
        }

        NoticeError::Persistence { reason } => {
            tracing::error!("Persistence error: {}", reason);
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                .with_detail("An unexpected error occurred")
        }

        NoticeError::Unauthorized => Problem::new(StatusCode::UNAUTHORIZED, "Unauthorized")
            .with_detail("Authentication required"),

        NoticeError::Forbidden { capability } => Problem::new(StatusCode::FORBIDDEN, "Forbidden")
            .with_detail(format!(
                "Sorry, you are not allowed to do that (requires '{}').",
                capability
            )),

        NoticeError::InvalidNonce => Problem::new(StatusCode::FORBIDDEN, "Invalid Security Token")
            .with_detail("The link you followed has expired."),
    }
    .with_code(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::Capability;

    #[test]
    fn test_status_codes() {
        assert_eq!(map_domain_error(NoticeError::invalid_date_range()).status, 400);
        assert_eq!(map_domain_error(NoticeError::persistence("disk")).status, 500);
        assert_eq!(map_domain_error(NoticeError::Unauthorized).status, 401);
        assert_eq!(
            map_domain_error(NoticeError::Forbidden {
                capability: Capability::EditPosts
            })
            .status,
            403
        );
        assert_eq!(map_domain_error(NoticeError::InvalidNonce).status, 403);
    }

    #[test]
    fn test_persistence_details_are_hidden() {
        let problem = map_domain_error(NoticeError::persistence("sqlite locked"));
        assert_eq!(problem.detail.as_deref(), Some("An unexpected error occurred"));
        assert_eq!(problem.code.as_deref(), Some("persistence_error"));
    }

    #[test]
    fn test_validation_code() {
        let problem = map_domain_error(NoticeError::invalid_date_range());
        assert_eq!(problem.code.as_deref(), Some("invalid_date_range"));
        assert_eq!(problem.detail.as_deref(), Some("End date must be after start date."));
    }
}
