// ── Payload assembly ──
//
// Merge free text, selections, the resolved site name and the bot-trap
// metadata into the flat body `POST /api/signup` expects.

use bifrost_api::SignupRequest;
use bifrost_api::models::Honeypot;

use crate::config::FormVariant;
use crate::model::{ActivationType, AntiAutomation, SelectionState, SignupForm};

/// Build the signup body. Pure: same inputs, same payload; inputs untouched.
///
/// `activation_date` is only sent for scheduled activation. Company fields
/// are left out entirely when the variant has no company signup.
pub fn assemble(
    form: &SignupForm,
    selection: &SelectionState,
    site_name: Option<&str>,
    meta: &AntiAutomation,
    variant: &FormVariant,
) -> SignupRequest {
    let company = |value: &str| variant.company_signup.then(|| value.to_owned());

    SignupRequest {
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        email: form.email.clone(),
        phone: form.phone.clone(),
        notes: form.notes.clone(),
        signup_type: if variant.company_signup {
            selection.signup_type.map(|t| t.to_string())
        } else {
            None
        },
        company_name: company(&form.company_name),
        vat_reg_no: company(&form.vat_reg_no),
        site_id: selection.site_id.map(|id| id.to_string()),
        site_name: site_name.map(str::to_owned),
        unit_number: selection.units.to_wire(),
        package: selection.package.clone().unwrap_or_default(),
        activation_type: selection
            .activation_type
            .map(|t| t.to_string())
            .unwrap_or_default(),
        activation_date: match selection.activation_type {
            Some(ActivationType::Scheduled) => selection.activation_date,
            _ => None,
        },
        honeypot: Honeypot {
            field: meta.honeypot_field.clone(),
            value: meta.honeypot_value.clone(),
        },
        form_loaded_at: meta.loaded_at_wire(),
    }
}
