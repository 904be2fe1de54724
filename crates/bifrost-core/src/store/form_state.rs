// ── Form state container ──
//
// Owns every value the customer enters or selects plus the submission
// status. Mutated only through the methods below, one field at a time.

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::FormVariant;
use crate::model::{
    ActivationType, AntiAutomation, FormField, SelectionState, SignupForm, SignupType,
    SubmissionStatus,
};

#[derive(Debug, Clone)]
pub struct FormState {
    variant: FormVariant,
    pub(crate) form: SignupForm,
    pub(crate) selection: SelectionState,
    pub(crate) status: SubmissionStatus,
    pub(crate) meta: AntiAutomation,
}

impl FormState {
    /// Empty form for `variant`, stamped as loaded at `loaded_at`.
    pub fn new(variant: FormVariant, loaded_at: DateTime<Utc>) -> Self {
        let selection = SelectionState::new(variant.unit_cardinality, variant.company_signup);
        let meta = AntiAutomation::new(variant.honeypot_field.clone(), loaded_at);
        Self {
            variant,
            form: SignupForm::default(),
            selection,
            status: SubmissionStatus::Idle,
            meta,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn variant(&self) -> &FormVariant {
        &self.variant
    }

    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn anti_automation(&self) -> &AntiAutomation {
        &self.meta
    }

    // ── Updates ──────────────────────────────────────────────────────

    /// Overwrite one text field; everything else is preserved.
    pub fn update(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value.into());
    }

    /// Ignored when the variant has no individual/company choice.
    pub fn set_signup_type(&mut self, signup_type: SignupType) {
        if self.variant.company_signup {
            self.selection.signup_type = Some(signup_type);
        }
    }

    /// Not checked against the catalog here; the controller does that.
    pub fn set_package(&mut self, package: Option<String>) {
        self.selection.package = package;
    }

    pub fn set_activation_type(&mut self, activation_type: Option<ActivationType>) {
        self.selection.activation_type = activation_type;
    }

    pub fn set_activation_date(&mut self, date: Option<NaiveDate>) {
        self.selection.activation_date = date;
    }

    /// Whatever ended up in the hidden bot-trap input.
    pub fn set_honeypot(&mut self, value: impl Into<String>) {
        self.meta.honeypot_value = value.into();
    }

    pub(crate) fn set_status(&mut self, status: SubmissionStatus) {
        self.status = status;
    }

    /// Clear every text field and every selection.
    ///
    /// Status and the form-load timestamp are left alone; the controller
    /// owns status transitions.
    pub fn reset(&mut self) {
        self.form = SignupForm::default();
        self.selection = SelectionState::new(
            self.variant.unit_cardinality,
            self.variant.company_signup,
        );
    }
}
