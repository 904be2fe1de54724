// ── Customer-entered form fields ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Free-text fields of the signup form, keyed by their wire name.
///
/// Parses from the snake_case field name the backend uses, so a UI can
/// route `name="first_name"` inputs straight into [`SignupForm::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Phone,
    Notes,
    CompanyName,
    VatRegNo,
}

/// Whether the customer signs up personally or on behalf of a company.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SignupType {
    #[default]
    Individual,
    Company,
}

/// Immediate or scheduled connection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ActivationType {
    #[serde(rename = "ASAP")]
    #[strum(serialize = "ASAP")]
    Asap,
    #[serde(rename = "Scheduled")]
    #[strum(serialize = "Scheduled")]
    Scheduled,
}

/// Text the customer types in. Every field starts (and resets to) empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
    pub company_name: String,
    pub vat_reg_no: String,
}

impl SignupForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Notes => &self.notes,
            FormField::CompanyName => &self.company_name,
            FormField::VatRegNo => &self.vat_reg_no,
        }
    }

    /// Overwrite exactly one field.
    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Notes => &mut self.notes,
            FormField::CompanyName => &mut self.company_name,
            FormField::VatRegNo => &mut self.vat_reg_no,
        };
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_match_wire_names() {
        assert_eq!(FormField::VatRegNo.as_ref(), "vat_reg_no");
        assert_eq!("first_name".parse::<FormField>().ok(), Some(FormField::FirstName));
        assert!("site".parse::<FormField>().is_err());
    }

    #[test]
    fn set_touches_only_the_named_field() {
        let mut form = SignupForm {
            first_name: "Ada".into(),
            email: "ada@example.com".into(),
            ..SignupForm::default()
        };
        form.set(FormField::Phone, "0115550000".into());

        assert_eq!(form.get(FormField::Phone), "0115550000");
        assert_eq!(form.first_name, "Ada");
        assert_eq!(form.email, "ada@example.com");
        assert_eq!(form.notes, "");
    }

    #[test]
    fn activation_type_wire_names() {
        assert_eq!(ActivationType::Asap.to_string(), "ASAP");
        assert_eq!("asap".parse::<ActivationType>().ok(), Some(ActivationType::Asap));
        assert_eq!("Scheduled".parse::<ActivationType>().ok(), Some(ActivationType::Scheduled));
        assert_eq!(SignupType::Company.to_string(), "company");
    }
}
