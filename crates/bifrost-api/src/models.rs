// Wire types for the signup API.
//
// These mirror the JSON the backend speaks. Domain types with richer
// semantics live in bifrost-core and convert into/out of these.

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A selectable site, as returned by `GET /api/sites`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SiteResponse {
    pub id: i64,
    pub name: String,
}

/// The `unit_number` field: one label or a list, depending on the form variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UnitNumber {
    Single(String),
    Multiple(Vec<String>),
}

/// Hidden bot-trap field. Serialized as a single `{name: value}` entry so the
/// key can differ between form variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Honeypot {
    pub field: String,
    pub value: String,
}

impl Serialize for Honeypot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.value)?;
        map.end()
    }
}

/// Flat JSON body for `POST /api/signup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub signup_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_reg_no: Option<String>,

    pub site_id: Option<String>,
    pub site_name: Option<String>,
    pub unit_number: UnitNumber,
    pub package: String,
    pub activation_type: String,
    pub activation_date: Option<NaiveDate>,

    #[serde(flatten)]
    pub honeypot: Honeypot,
    pub form_loaded_at: String,
}

impl SignupRequest {
    /// JSON keys the body always owns. A honeypot key must not reuse one,
    /// or the flattened entry would shadow the real value.
    pub const FIELD_NAMES: &'static [&'static str] = &[
        "first_name",
        "last_name",
        "email",
        "phone",
        "notes",
        "signup_type",
        "company_name",
        "vat_reg_no",
        "site_id",
        "site_name",
        "unit_number",
        "package",
        "activation_type",
        "activation_date",
        "form_loaded_at",
    ];
}

/// Optional success body from `POST /api/signup`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SignupReceipt {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Failure body: `{"error": "...", "fields": [...]}`. Both parts optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub fields: Vec<String>,
}
