// ── Submission status and bot-trap metadata ──

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use strum::Display;

/// Where the submission workflow currently stands. Drives which notice
/// (if any) the presentation layer shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Display)]
#[serde(tag = "status", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Loading,
    InvalidEmail,
    Success,
    Error {
        message: String,
    },
}

impl SubmissionStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// A notice the user has to acknowledge before the form is usable again.
    pub fn is_dismissible(&self) -> bool {
        matches!(self, Self::InvalidEmail | Self::Success | Self::Error { .. })
    }
}

/// Hidden honeypot value and form-load timestamp sent with every submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AntiAutomation {
    pub honeypot_field: String,
    pub honeypot_value: String,
    pub form_loaded_at: DateTime<Utc>,
}

impl AntiAutomation {
    pub fn new(honeypot_field: impl Into<String>, form_loaded_at: DateTime<Utc>) -> Self {
        Self {
            honeypot_field: honeypot_field.into(),
            honeypot_value: String::new(),
            form_loaded_at,
        }
    }

    /// ISO-8601 UTC with millisecond precision, e.g. `2025-01-31T08:15:00.000Z`.
    pub fn loaded_at_wire(&self) -> String {
        self.form_loaded_at
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
