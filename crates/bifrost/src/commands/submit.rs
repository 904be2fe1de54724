//! Signup submission: fill the form from flags and prompts, then submit.

use std::io::IsTerminal;
use std::time::Duration;

use chrono::NaiveDate;
use dialoguer::{Input, MultiSelect, Select};
use indicatif::{ProgressBar, ProgressStyle};

use bifrost_core::{
    ActivationType, CoreError, FormField, SignupController, SignupReceipt, SignupType,
    SubmissionStatus, UnitCardinality,
};

use crate::cli::{ActivationArg, GlobalOpts, SignupTypeArg, SubmitArgs};
use crate::error::{CliError, missing_fields_hint};
use crate::output;

use super::util::{self, prompt_err};

// ── Prompting ────────────────────────────────────────────────────────

/// Asks for values the flags left out. Disabled prompts fall through to
/// "not provided" and let form validation report what is missing.
struct Prompter {
    enabled: bool,
}

impl Prompter {
    fn text(&self, prompt: &str, given: Option<String>) -> Result<String, CliError> {
        match given {
            Some(value) => Ok(value),
            None if self.enabled => Input::<String>::new()
                .with_prompt(prompt)
                .interact_text()
                .map_err(prompt_err),
            None => Ok(String::new()),
        }
    }

    fn optional_text(&self, prompt: &str, given: Option<String>) -> Result<String, CliError> {
        match given {
            Some(value) => Ok(value),
            None if self.enabled => Input::<String>::new()
                .with_prompt(format!("{prompt} (optional)"))
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err),
            None => Ok(String::new()),
        }
    }

    fn choose<T: ToString>(&self, prompt: &str, items: &[T]) -> Result<Option<usize>, CliError> {
        if !self.enabled || items.is_empty() {
            return Ok(None);
        }
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map(Some)
            .map_err(prompt_err)
    }

    fn choose_many<T: ToString>(&self, prompt: &str, items: &[T]) -> Result<Vec<usize>, CliError> {
        if !self.enabled || items.is_empty() {
            return Ok(Vec::new());
        }
        MultiSelect::new()
            .with_prompt(prompt)
            .items(items)
            .interact()
            .map_err(prompt_err)
    }
}

// ── Handler ──────────────────────────────────────────────────────────

pub async fn handle(
    controller: &mut SignupController,
    args: SubmitArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let prompter = Prompter {
        enabled: !args.no_input && std::io::stdin().is_terminal(),
    };
    let color = output::should_color(&global.color);

    util::require_sites(controller).await?;

    fill_customer(controller, &prompter, &args)?;
    fill_site_and_units(controller, &prompter, args.site, &args.units).await?;
    fill_package(controller, &prompter, args.package)?;
    fill_activation(controller, &prompter, args.activation, args.date.as_deref())?;

    let notes = prompter.optional_text("Notes", args.notes)?;
    controller.update(FormField::Notes, notes);

    // ── Submit ──
    let Some(pending) = controller.prepare_submission()? else {
        let email = controller.state().form().email.clone();
        controller.dismiss();
        return Err(CliError::InvalidEmail { email });
    };

    if let Some(notice) = controller.activation_notice() {
        output::note(&notice, color, global.quiet);
    }

    let spinner = spinner(global.quiet);
    let result = controller.send(&pending).await;
    spinner.finish_and_clear();

    match result {
        Ok(receipt) => {
            controller.finish_submission(Ok(receipt.clone()));
            report_success(&receipt, color, global)
        }
        Err(err) => {
            let rate_limited = matches!(err, CoreError::RateLimited { .. });
            let hint = match &err {
                CoreError::Rejected { fields, .. } => missing_fields_hint(fields),
                other => other.to_string(),
            };
            let message = match controller.finish_submission(Err(err)) {
                SubmissionStatus::Error { message } => message.clone(),
                other => other.to_string(),
            };
            Err(if rate_limited {
                CliError::RateLimited { message }
            } else {
                CliError::SubmissionFailed { message, hint }
            })
        }
    }
}

// ── Form sections ────────────────────────────────────────────────────

fn fill_customer(
    controller: &mut SignupController,
    prompter: &Prompter,
    args: &SubmitArgs,
) -> Result<(), CliError> {
    let fields = [
        (FormField::FirstName, "First name", &args.first_name),
        (FormField::LastName, "Last name", &args.last_name),
        (FormField::Email, "Email", &args.email),
        (FormField::Phone, "Phone", &args.phone),
    ];
    for (field, prompt, given) in fields {
        let value = prompter.text(prompt, given.clone())?;
        controller.update(field, value);
    }

    if !controller.config().variant.company_signup {
        if args.signup_type.is_some() || args.company_name.is_some() || args.vat_reg_no.is_some() {
            tracing::warn!("company fields are ignored for the individual form");
        }
        return Ok(());
    }

    let signup_type = match args.signup_type {
        Some(SignupTypeArg::Individual) => Some(SignupType::Individual),
        Some(SignupTypeArg::Company) => Some(SignupType::Company),
        None => prompter
            .choose("Signing up as", &["Individual", "Company"])?
            .map(|i| if i == 1 { SignupType::Company } else { SignupType::Individual }),
    };
    if let Some(signup_type) = signup_type {
        controller.set_signup_type(signup_type);
    }

    if controller.state().selection().signup_type == Some(SignupType::Company) {
        let name = prompter.text("Company name", args.company_name.clone())?;
        controller.update(FormField::CompanyName, name);
        let vat = prompter.optional_text("VAT registration number", args.vat_reg_no.clone())?;
        controller.update(FormField::VatRegNo, vat);
    }
    Ok(())
}

async fn fill_site_and_units(
    controller: &mut SignupController,
    prompter: &Prompter,
    site: Option<i64>,
    units: &[String],
) -> Result<(), CliError> {
    let site = match site {
        Some(id) => Some(util::find_site(controller, id)?.id),
        None => {
            let names: Vec<&str> = controller.sites().iter().map(|s| s.name.as_str()).collect();
            prompter
                .choose("Building complex", &names)?
                .and_then(|i| controller.sites().get(i))
                .map(|s| s.id)
        }
    };
    let Some(site) = site else {
        return Ok(());
    };
    util::require_units(controller, site).await?;

    if !units.is_empty() {
        controller.select_units(units)?;
        return Ok(());
    }

    let available = controller.units().to_vec();
    let picked: Vec<usize> = match controller.config().variant.unit_cardinality {
        UnitCardinality::Single => prompter
            .choose("Unit number", &available)?
            .into_iter()
            .collect(),
        UnitCardinality::Multiple => prompter.choose_many("Unit numbers", &available)?,
    };
    let labels: Vec<&str> = picked
        .into_iter()
        .filter_map(|i| available.get(i).map(String::as_str))
        .collect();
    controller.select_units(&labels)?;
    Ok(())
}

fn fill_package(
    controller: &mut SignupController,
    prompter: &Prompter,
    package: Option<String>,
) -> Result<(), CliError> {
    let package = match package {
        Some(p) => Some(p),
        None => {
            let offered: Vec<String> = controller
                .available_packages()
                .into_iter()
                .map(str::to_owned)
                .collect();
            prompter
                .choose("Package", &offered)?
                .and_then(|i| offered.into_iter().nth(i))
        }
    };
    if let Some(p) = package.as_deref() {
        controller.select_package(Some(p))?;
    }
    Ok(())
}

fn fill_activation(
    controller: &mut SignupController,
    prompter: &Prompter,
    activation: Option<ActivationArg>,
    date: Option<&str>,
) -> Result<(), CliError> {
    let activation = match activation {
        Some(ActivationArg::Asap) => Some(ActivationType::Asap),
        Some(ActivationArg::Scheduled) => Some(ActivationType::Scheduled),
        None => prompter
            .choose("Activation", &["As soon as possible", "On a chosen date"])?
            .map(|i| if i == 1 { ActivationType::Scheduled } else { ActivationType::Asap }),
    };
    controller.set_activation_type(activation);

    if activation != Some(ActivationType::Scheduled) {
        return Ok(());
    }
    let raw = prompter.text("Activation date (YYYY-MM-DD)", date.map(str::to_owned))?;
    if raw.is_empty() {
        return Ok(());
    }
    controller.set_activation_date(Some(parse_date(&raw)?));
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| CliError::Validation {
        field: "date".into(),
        reason: format!("expected YYYY-MM-DD ({e})"),
    })
}

// ── Output ───────────────────────────────────────────────────────────

fn spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message("Submitting signup...");
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn report_success(receipt: &SignupReceipt, color: bool, global: &GlobalOpts) -> Result<(), CliError> {
    output::success("Signup submitted successfully.", color, global.quiet);

    let out = output::render_single(
        &global.output,
        receipt,
        |r| r.message.clone().unwrap_or_default(),
        |r| r.status.clone().unwrap_or_default(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
