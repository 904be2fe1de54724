// ── Client-side validation ──
//
// Email syntax plus the required-field table. Required-ness that depends on
// the signup or activation type is a row in `FIELD_RULES`, not a branch in
// the submit path.

use std::fmt;

use chrono::NaiveDate;
use validator::ValidateEmail;

use crate::config::FormVariant;
use crate::model::{ActivationType, PackageCatalog, SelectionState, SignupForm, SignupType};

/// Syntactic email check: `local@domain.tld`, no whitespace.
///
/// Pure; never touches the network. Deliverability is the server's problem.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return false;
    }
    email.validate_email()
}

// ── Required fields ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    FirstName,
    LastName,
    Email,
    Phone,
    Site,
    Units,
    Package,
    SignupType,
    CompanyName,
    ActivationType,
    ActivationDate,
}

impl RequiredField {
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "first name",
            Self::LastName => "last name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Site => "building complex",
            Self::Units => "unit number",
            Self::Package => "package",
            Self::SignupType => "signup type",
            Self::CompanyName => "company name",
            Self::ActivationType => "activation",
            Self::ActivationDate => "activation date",
        }
    }

    fn is_filled(self, form: &SignupForm, selection: &SelectionState) -> bool {
        let text = |s: &str| !s.trim().is_empty();
        match self {
            Self::FirstName => text(&form.first_name),
            Self::LastName => text(&form.last_name),
            Self::Email => text(&form.email),
            Self::Phone => text(&form.phone),
            Self::CompanyName => text(&form.company_name),
            Self::Site => selection.site_id.is_some(),
            Self::Units => !selection.units.is_empty(),
            Self::Package => selection.package.is_some(),
            Self::SignupType => selection.signup_type.is_some(),
            Self::ActivationType => selection.activation_type.is_some(),
            Self::ActivationDate => selection.activation_date.is_some(),
        }
    }
}

/// When a rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    /// The form variant offers the individual/company choice.
    VariantHasSignupType,
    /// The variant offers it and the customer picked "company".
    CompanySignup,
    /// Activation type is "Scheduled".
    Scheduled,
}

impl Condition {
    fn holds(self, selection: &SelectionState, variant: &FormVariant) -> bool {
        match self {
            Self::Always => true,
            Self::VariantHasSignupType => variant.company_signup,
            Self::CompanySignup => {
                variant.company_signup && selection.signup_type == Some(SignupType::Company)
            }
            Self::Scheduled => selection.activation_type == Some(ActivationType::Scheduled),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: RequiredField,
    pub when: Condition,
}

const fn rule(field: RequiredField, when: Condition) -> FieldRule {
    FieldRule { field, when }
}

/// Required-field table. VAT number and notes are always optional.
pub const FIELD_RULES: &[FieldRule] = &[
    rule(RequiredField::FirstName, Condition::Always),
    rule(RequiredField::LastName, Condition::Always),
    rule(RequiredField::Email, Condition::Always),
    rule(RequiredField::Phone, Condition::Always),
    rule(RequiredField::SignupType, Condition::VariantHasSignupType),
    rule(RequiredField::CompanyName, Condition::CompanySignup),
    rule(RequiredField::Site, Condition::Always),
    rule(RequiredField::Units, Condition::Always),
    rule(RequiredField::Package, Condition::Always),
    rule(RequiredField::ActivationType, Condition::Always),
    rule(RequiredField::ActivationDate, Condition::Scheduled),
];

/// One reason the form cannot be submitted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    Missing(RequiredField),
    /// Scheduled activation must be today or later.
    DateInPast { date: NaiveDate },
    /// Selected package is not offered at the selected site.
    PackageNotOffered { package: String },
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(field) => write!(f, "{} is required", field.label()),
            Self::DateInPast { date } => {
                write!(f, "activation date {date} is in the past")
            }
            Self::PackageNotOffered { package } => {
                write!(f, "package '{package}' is not offered at this site")
            }
        }
    }
}

/// Every issue blocking submission, in form order. Empty means submittable.
///
/// `today` bounds the scheduled activation date; pass the caller's local date.
pub fn check_required(
    form: &SignupForm,
    selection: &SelectionState,
    variant: &FormVariant,
    catalog: &PackageCatalog,
    today: NaiveDate,
) -> Vec<FieldIssue> {
    let mut issues: Vec<FieldIssue> = FIELD_RULES
        .iter()
        .filter(|r| r.when.holds(selection, variant))
        .filter(|r| !r.field.is_filled(form, selection))
        .map(|r| FieldIssue::Missing(r.field))
        .collect();

    if let Some(package) = &selection.package {
        if !catalog.is_offered(package, selection.site_id) {
            issues.push(FieldIssue::PackageNotOffered {
                package: package.clone(),
            });
        }
    }

    if selection.activation_type == Some(ActivationType::Scheduled) {
        if let Some(date) = selection.activation_date {
            if date < today {
                issues.push(FieldIssue::DateInPast { date });
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::model::{UnitCardinality, UnitSelection};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 15).unwrap()
    }

    fn complete() -> (SignupForm, SelectionState) {
        let form = SignupForm {
            first_name: "Sipho".into(),
            last_name: "Dlamini".into(),
            email: "sipho@example.com".into(),
            phone: "0731112222".into(),
            ..SignupForm::default()
        };
        let mut selection = SelectionState::new(UnitCardinality::Multiple, true);
        selection.site_id = Some(2);
        selection.units = UnitSelection::Multiple(vec!["A101".into()]);
        selection.package = Some("100/100Mbps - R950".into());
        selection.activation_type = Some(ActivationType::Asap);
        (form, selection)
    }

    #[test]
    fn accepts_well_formed_addresses() {
        for email in ["a@b.co", "first.last+fibre@mail.example.org", "x_y@sub.domain.za"] {
            assert!(is_valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in [
            "",
            "not-an-email",
            "a@b",
            "@b.co",
            "a@",
            "a@@b.co",
            "a@b..co",
            "a@.co",
            "a b@c.co",
            "a@b.co ",
            "a@b@c.co",
        ] {
            assert!(!is_valid_email(email), "{email:?} should be invalid");
        }
    }

    #[test]
    fn complete_form_has_no_issues() {
        let (form, selection) = complete();
        let issues = check_required(
            &form,
            &selection,
            &FormVariant::company(),
            &PackageCatalog::default(),
            today(),
        );
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn company_signup_requires_company_name() {
        let (form, mut selection) = complete();
        selection.signup_type = Some(SignupType::Company);

        let issues = check_required(
            &form,
            &selection,
            &FormVariant::company(),
            &PackageCatalog::default(),
            today(),
        );
        assert_eq!(issues, vec![FieldIssue::Missing(RequiredField::CompanyName)]);
    }

    #[test]
    fn individual_variant_ignores_company_rules() {
        let (form, mut selection) = complete();
        selection.signup_type = None;

        let issues = check_required(
            &form,
            &selection,
            &FormVariant::individual(),
            &PackageCatalog::default(),
            today(),
        );
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn scheduled_activation_needs_a_date_not_in_the_past() {
        let (form, mut selection) = complete();
        selection.activation_type = Some(ActivationType::Scheduled);

        let missing = check_required(
            &form,
            &selection,
            &FormVariant::company(),
            &PackageCatalog::default(),
            today(),
        );
        assert_eq!(missing, vec![FieldIssue::Missing(RequiredField::ActivationDate)]);

        let yesterday = today().pred_opt().unwrap();
        selection.activation_date = Some(yesterday);
        let past = check_required(
            &form,
            &selection,
            &FormVariant::company(),
            &PackageCatalog::default(),
            today(),
        );
        assert_eq!(past, vec![FieldIssue::DateInPast { date: yesterday }]);

        selection.activation_date = Some(today());
        assert!(
            check_required(
                &form,
                &selection,
                &FormVariant::company(),
                &PackageCatalog::default(),
                today(),
            )
            .is_empty()
        );
    }

    #[test]
    fn restricted_package_is_flagged() {
        let (form, mut selection) = complete();
        selection.site_id = Some(1);
        selection.package = Some("200/200Mbps - R1 125".into());

        let issues = check_required(
            &form,
            &selection,
            &FormVariant::company(),
            &PackageCatalog::default(),
            today(),
        );
        assert_eq!(
            issues,
            vec![FieldIssue::PackageNotOffered {
                package: "200/200Mbps - R1 125".into()
            }]
        );
    }

    #[test]
    fn blank_text_counts_as_missing() {
        let (mut form, selection) = complete();
        form.phone = "   ".into();
        let issues = check_required(
            &form,
            &selection,
            &FormVariant::company(),
            &PackageCatalog::default(),
            today(),
        );
        assert_eq!(issues, vec![FieldIssue::Missing(RequiredField::Phone)]);
    }
}
