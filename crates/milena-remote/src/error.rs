//! # Remote Error Types
//!
//! Error types for calls to the hosted backend.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  HTTP response (status + JSON body)        reqwest::Error               │
//! │       │                                          │                      │
//! │       ▼                                          ▼                      │
//! │  RemoteError (this module) ← classifies by status and error code       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in storefront app) ← generic user-facing message            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Front end shows the alert                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Body Format
//! The table API answers failures with
//! `{"code": "23503", "message": "...", "details": "...", "hint": null}`.
//! Codes `23503` and `23505` are Postgres foreign-key and unique violations.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Postgres error code for a foreign key violation.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Postgres error code for a unique violation.
pub const UNIQUE_VIOLATION: &str = "23505";

/// Parsed error body of a failed request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: [(&str, Option<&String>); 4] = [
            ("code", self.code.as_ref()),
            ("message", self.message.as_ref()),
            ("details", self.details.as_ref()),
            ("hint", self.hint.as_ref()),
        ];
        let parts: Vec<String> = fields
            .into_iter()
            .filter_map(|(label, value)| value.map(|v| format!("{}: {}", label, v)))
            .collect();

        write!(f, "{}", parts.join(", "))
    }
}

/// Hosted backend errors.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// A referenced row still points at the one being deleted.
    ///
    /// ## When This Occurs
    /// - Deleting a category that products still reference
    ///   (only when the backend enforces the foreign key)
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Creating a category with a name that exists, if the column is unique
    #[error("Unique violation: {message}")]
    UniqueViolation { message: String },

    /// The backend rejected the request with a structured error body.
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: ErrorBody },

    /// The backend rejected the request with a body that is not JSON.
    ///
    /// ## When This Occurs
    /// - Storage errors from a proxy
    /// - Gateway timeouts (502/504 HTML pages)
    #[error("API error ({status}): {message}")]
    Unparsed { status: u16, message: String },

    /// An insert asked for the created row but got none back.
    #[error("{table}: insert returned no rows")]
    EmptyResponse { table: String },

    /// Update or delete issued without a row filter.
    #[error("{table}: refusing to {operation} without a filter")]
    MissingFilter {
        table: String,
        operation: &'static str,
    },

    /// Transport failure (connect, timeout, TLS).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Malformed backend URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Response body did not match the expected shape.
    #[error("Unexpected response body: {0}")]
    Json(#[from] serde_json::Error),

    /// Bad configuration (empty key, invalid header value).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RemoteError {
    /// Classifies a failed response.
    ///
    /// ## Mapping
    /// ```text
    /// JSON body, code 23503  → ForeignKeyViolation
    /// JSON body, code 23505  → UniqueViolation
    /// JSON body, other       → Api
    /// anything else          → Unparsed
    /// ```
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) if parsed != ErrorBody::default() => parsed,
            _ => {
                return RemoteError::Unparsed {
                    status,
                    message: body.to_string(),
                }
            }
        };

        let message = parsed.message.clone().unwrap_or_default();
        match parsed.code.as_deref() {
            Some(FOREIGN_KEY_VIOLATION) => RemoteError::ForeignKeyViolation { message },
            Some(UNIQUE_VIOLATION) => RemoteError::UniqueViolation { message },
            _ => RemoteError::Api {
                status,
                body: parsed,
            },
        }
    }

    /// True for a foreign key violation.
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, RemoteError::ForeignKeyViolation { .. })
    }

    /// HTTP status of a rejected request, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Api { status, .. } | RemoteError::Unparsed { status, .. } => {
                Some(*status)
            }
            RemoteError::ForeignKeyViolation { .. } => Some(409),
            RemoteError::UniqueViolation { .. } => Some(409),
            _ => None,
        }
    }
}

/// Result type for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_key_body() {
        let body = r#"{"code":"23503","details":"Key (id)=(3) is still referenced from table \"products\".","hint":null,"message":"update or delete on table \"categories\" violates foreign key constraint"}"#;
        let err = RemoteError::from_response(409, body);
        assert!(err.is_foreign_key_violation());
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn test_unique_body() {
        let err = RemoteError::from_response(409, r#"{"code":"23505","message":"duplicate key"}"#);
        assert!(matches!(err, RemoteError::UniqueViolation { .. }));
    }

    #[test]
    fn test_other_api_error_keeps_details() {
        let err = RemoteError::from_response(
            400,
            r#"{"code":"PGRST204","message":"Column 'foo' not found","details":null,"hint":null}"#,
        );
        match err {
            RemoteError::Api { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body.code.as_deref(), Some("PGRST204"));
                assert_eq!(body.to_string(), "code: PGRST204, message: Column 'foo' not found");
            }
            other => panic!("expected Api, got {:?}", other),
        }
    }

    #[test]
    fn test_non_json_body_is_unparsed() {
        let err = RemoteError::from_response(502, "<html>Bad gateway</html>");
        assert!(matches!(err, RemoteError::Unparsed { status: 502, .. }));

        // Valid JSON without any known field is not an error body either
        let err = RemoteError::from_response(500, r#"{"error":"boom"}"#);
        assert!(matches!(err, RemoteError::Unparsed { status: 500, .. }));
    }
}
