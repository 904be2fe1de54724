// ── Runtime signup configuration ──
//
// These types describe *which* form to run and *where* to send it.
// They never touch disk. The CLI builds a `SignupConfig` and hands it in.

use std::time::Duration;

use url::Url;

use crate::model::{PackageCatalog, UnitCardinality};

/// Which fields and behaviours a deployment of the form enables.
///
/// The two shipped layouts differ only in configuration: an individual-only
/// form with one unit per signup, and an individual/company form with VAT
/// number and multi-unit selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormVariant {
    /// Show the individual/company choice plus company name and VAT number.
    pub company_signup: bool,
    pub unit_cardinality: UnitCardinality,
    /// Name of the hidden bot-trap field in the payload.
    pub honeypot_field: String,
}

impl FormVariant {
    pub fn individual() -> Self {
        Self {
            company_signup: false,
            unit_cardinality: UnitCardinality::Single,
            honeypot_field: "company".into(),
        }
    }

    pub fn company() -> Self {
        Self {
            company_signup: true,
            unit_cardinality: UnitCardinality::Multiple,
            honeypot_field: "website".into(),
        }
    }
}

impl Default for FormVariant {
    fn default() -> Self {
        Self::company()
    }
}

/// Everything the controller needs to run one signup session.
///
/// Built by the CLI, passed to `SignupController`. Core never reads config files.
#[derive(Debug, Clone)]
pub struct SignupConfig {
    /// Backend root (e.g., `https://signup.example.com`).
    pub api_url: Url,
    /// Request timeout for every call.
    pub timeout: Duration,
    pub variant: FormVariant,
    pub packages: PackageCatalog,
}

impl SignupConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            timeout: Duration::from_secs(30),
            variant: FormVariant::default(),
            packages: PackageCatalog::default(),
        }
    }
}
