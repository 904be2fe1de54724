//! CLI error types with miette diagnostics.
//!
//! Maps core and config errors into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use bifrost_config::ConfigError;
use bifrost_core::{CoreError, SubmitBlocked};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const RATE_LIMITED: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to signup service at {url}: {reason}")]
    #[diagnostic(
        code(bifrost::connection_failed),
        help(
            "Check that the signup service is running and reachable.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Could not load {resource} from the signup service")]
    #[diagnostic(
        code(bifrost::reference_unavailable),
        help("Check --api-url or your profile, and rerun with -v for details.")
    )]
    ReferenceUnavailable { resource: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(bifrost::timeout),
        help("Increase the timeout with --timeout or check the service's responsiveness.")
    )]
    Timeout,

    // ── Submission ───────────────────────────────────────────────────

    #[error("Please enter a valid email address: '{email}'")]
    #[diagnostic(code(bifrost::invalid_email))]
    InvalidEmail { email: String },

    #[error("The form is incomplete")]
    #[diagnostic(code(bifrost::incomplete), help("{issues}"))]
    Incomplete { issues: String },

    #[error("{message}")]
    #[diagnostic(code(bifrost::submission_failed), help("{hint}"))]
    SubmissionFailed { message: String, hint: String },

    #[error("{message}")]
    #[diagnostic(
        code(bifrost::rate_limited),
        help("The signup service accepts a few signups per minute. Wait and try again.")
    )]
    RateLimited { message: String },

    #[error("A submission is already {status}")]
    #[diagnostic(code(bifrost::busy))]
    Busy { status: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(bifrost::not_found),
        help("Run: bifrost {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error: {message}")]
    #[diagnostic(code(bifrost::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(bifrost::validation))]
    Validation { field: String, reason: String },

    #[error("Prompt failed: {reason}")]
    #[diagnostic(
        code(bifrost::prompt),
        help("Pass the value as a flag, or use --no-input in non-interactive contexts.")
    )]
    Prompt { reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(bifrost::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: bifrost config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No signup service configured")]
    #[diagnostic(
        code(bifrost::no_config),
        help(
            "Create a profile with: bifrost config init\n\
             Or pass --api-url / set BIFROST_API_URL.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(bifrost::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(bifrost::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(bifrost::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::ReferenceUnavailable { .. } => {
                exit_code::CONNECTION
            }
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::SubmissionFailed { .. } => exit_code::REJECTED,
            Self::RateLimited { .. } => exit_code::RATE_LIMITED,
            Self::InvalidEmail { .. }
            | Self::Incomplete { .. }
            | Self::Validation { .. }
            | Self::Prompt { .. }
            | Self::NoConfig { .. }
            | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::Timeout => CliError::Timeout,

            CoreError::Rejected { message, fields } => CliError::SubmissionFailed {
                hint: missing_fields_hint(&fields),
                message,
            },

            CoreError::RateLimited { message } => CliError::RateLimited {
                message: message.unwrap_or_else(|| "Too many signup attempts".into()),
            },

            CoreError::UnknownSite { id } => CliError::NotFound {
                resource_type: "site".into(),
                identifier: id.to_string(),
                list_command: "sites".into(),
            },

            CoreError::UnknownUnit { unit } => CliError::NotFound {
                resource_type: "unit".into(),
                identifier: unit,
                list_command: "units --site <ID>".into(),
            },

            CoreError::PackageUnavailable { package } => CliError::NotFound {
                resource_type: "package".into(),
                identifier: package,
                list_command: "packages --site <ID>".into(),
            },

            CoreError::Api { message, status: _ } | CoreError::Internal(message) => {
                CliError::ApiError { message }
            }

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

impl From<SubmitBlocked> for CliError {
    fn from(err: SubmitBlocked) -> Self {
        match err {
            SubmitBlocked::Busy { status } => CliError::Busy {
                status: status.to_string(),
            },
            SubmitBlocked::Incomplete { issues } => CliError::Incomplete {
                issues: issues
                    .iter()
                    .map(|issue| format!("- {issue}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { name, available } => CliError::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(Box::new(other)),
        }
    }
}

pub(crate) fn missing_fields_hint(fields: &[String]) -> String {
    if fields.is_empty() {
        "Check the entered values and submit again.".into()
    } else {
        format!("Missing fields: {}", fields.join(", "))
    }
}
