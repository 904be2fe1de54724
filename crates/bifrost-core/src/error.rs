// ── Core error types ──
//
// User-facing errors from bifrost-core. Consumers never see reqwest errors
// or JSON parse failures directly. The `From<bifrost_api::Error>` impl
// translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

use crate::model::SubmissionStatus;
use crate::validate::FieldIssue;

/// Shown when a submission fails without a server-supplied reason.
pub const GENERIC_SUBMIT_ERROR: &str = "Something went wrong. Please try again.";

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach signup service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Signup service timed out")]
    Timeout,

    // ── Server responses ─────────────────────────────────────────────
    /// The server refused the request and said why.
    #[error("{message}")]
    Rejected { message: String, fields: Vec<String> },

    #[error("Too many signup attempts -- wait a minute and try again")]
    RateLimited { message: Option<String> },

    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Selection errors ─────────────────────────────────────────────
    #[error("Site not found: {id}")]
    UnknownSite { id: i64 },

    #[error("Unit '{unit}' is not available at the selected site")]
    UnknownUnit { unit: String },

    #[error("Package '{package}' is not offered at the selected site")]
    PackageUnavailable { package: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The server's own `error` text, when the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => Some(message),
            Self::RateLimited { message } => message.as_deref(),
            _ => None,
        }
    }

    /// Message for the submission-failed notice: the server's text when
    /// present, otherwise [`GENERIC_SUBMIT_ERROR`].
    pub fn submission_message(&self) -> String {
        self.server_message()
            .map_or_else(|| GENERIC_SUBMIT_ERROR.to_owned(), str::to_owned)
    }
}

/// Why `prepare_submission` refused to start. State is left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// A submission is in flight or its result has not been dismissed.
    #[error("Submission not possible while status is '{status}'")]
    Busy { status: SubmissionStatus },

    /// Required fields are missing or invalid.
    #[error("Form incomplete: {}", issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Incomplete { issues: Vec<FieldIssue> },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<bifrost_api::Error> for CoreError {
    fn from(err: bifrost_api::Error) -> Self {
        match err {
            bifrost_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            bifrost_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            bifrost_api::Error::ClientBuild(message) => CoreError::Config { message },
            bifrost_api::Error::RateLimited { message } => CoreError::RateLimited { message },
            bifrost_api::Error::Api {
                status: _,
                message: Some(message),
                fields,
            } => CoreError::Rejected { message, fields },
            bifrost_api::Error::Api {
                status,
                message: None,
                ..
            } => CoreError::Api {
                message: format!("HTTP {status}"),
                status: Some(status),
            },
            bifrost_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_preferred() {
        let err = CoreError::from(bifrost_api::Error::Api {
            status: 409,
            message: Some("Unit already booked".into()),
            fields: Vec::new(),
        });
        assert_eq!(err.submission_message(), "Unit already booked");
    }

    #[test]
    fn bare_status_falls_back_to_generic_message() {
        let err = CoreError::from(bifrost_api::Error::Api {
            status: 500,
            message: None,
            fields: Vec::new(),
        });
        assert!(matches!(err, CoreError::Api { status: Some(500), .. }));
        assert_eq!(err.submission_message(), GENERIC_SUBMIT_ERROR);
    }
}
