// ── Dropdown / radio selections ──
//
// Kept apart from the free-text `SignupForm` and merged into the payload
// at submission time.

use bifrost_api::UnitNumber;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::form::{ActivationType, SignupType};

/// How many units one signup may cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCardinality {
    #[default]
    Single,
    Multiple,
}

/// Selected unit label(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitSelection {
    Single(Option<String>),
    Multiple(Vec<String>),
}

impl UnitSelection {
    pub fn empty(cardinality: UnitCardinality) -> Self {
        match cardinality {
            UnitCardinality::Single => Self::Single(None),
            UnitCardinality::Multiple => Self::Multiple(Vec::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(unit) => unit.is_none(),
            Self::Multiple(units) => units.is_empty(),
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        match self {
            Self::Single(unit) => unit.iter().map(String::as_str).collect(),
            Self::Multiple(units) => units.iter().map(String::as_str).collect(),
        }
    }

    /// Single mode replaces the current unit; multiple mode adds it once.
    pub fn select(&mut self, label: &str) {
        match self {
            Self::Single(unit) => *unit = Some(label.to_owned()),
            Self::Multiple(units) => {
                if !units.iter().any(|u| u == label) {
                    units.push(label.to_owned());
                }
            }
        }
    }

    pub fn deselect(&mut self, label: &str) {
        match self {
            Self::Single(unit) => {
                if unit.as_deref() == Some(label) {
                    *unit = None;
                }
            }
            Self::Multiple(units) => units.retain(|u| u != label),
        }
    }

    pub fn clear(&mut self) {
        match self {
            Self::Single(unit) => *unit = None,
            Self::Multiple(units) => units.clear(),
        }
    }

    /// Wire form: an empty string when nothing is selected in single mode.
    pub fn to_wire(&self) -> UnitNumber {
        match self {
            Self::Single(unit) => UnitNumber::Single(unit.clone().unwrap_or_default()),
            Self::Multiple(units) => UnitNumber::Multiple(units.clone()),
        }
    }
}

/// Everything chosen from a list rather than typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub site_id: Option<i64>,
    pub units: UnitSelection,
    pub package: Option<String>,
    /// `None` when the form variant has no individual/company choice.
    pub signup_type: Option<SignupType>,
    pub activation_type: Option<ActivationType>,
    pub activation_date: Option<NaiveDate>,
}

impl SelectionState {
    pub fn new(cardinality: UnitCardinality, company_signup: bool) -> Self {
        Self {
            site_id: None,
            units: UnitSelection::empty(cardinality),
            package: None,
            signup_type: company_signup.then_some(SignupType::default()),
            activation_type: None,
            activation_date: None,
        }
    }

    /// Line shown under the activation choice, if the choice is complete.
    pub fn activation_notice(&self) -> Option<String> {
        match (self.activation_type?, self.activation_date) {
            (ActivationType::Asap, _) => {
                Some("Activation will occur within 24 hours of debit-order approval.".into())
            }
            (ActivationType::Scheduled, Some(date)) => Some(format!(
                "Activation will take place on {}, subject to debit-order approval.",
                date.format("%Y-%m-%d")
            )),
            (ActivationType::Scheduled, None) => None,
        }
    }
}
