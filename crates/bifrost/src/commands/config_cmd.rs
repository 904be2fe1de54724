//! Config subcommand handlers.

use dialoguer::{Input, Select};

use bifrost_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = bifrost_config::config_path();
            eprintln!("Bifrost signup CLI -- configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            // 1. Profile name
            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default(global.profile.clone().unwrap_or_else(|| "default".into()))
                .interact_text()
                .map_err(prompt_err)?;

            // 2. Service URL
            let api_url: String = Input::new()
                .with_prompt("Signup service URL")
                .default(
                    global
                        .api_url
                        .clone()
                        .unwrap_or_else(|| "http://localhost:5000".into()),
                )
                .interact_text()
                .map_err(prompt_err)?;

            // 3. Form layout
            let variants = &[
                "company (individual or company, several units)",
                "individual (one unit per signup)",
            ];
            let variant = Select::new()
                .with_prompt("Form layout")
                .items(variants)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let mut profile = Profile::new(api_url);
            profile.variant = if variant == 0 { "company" } else { "individual" }.into();

            // 4. Validate, then merge into the existing file, if any
            let mut cfg = bifrost_config::load_config_or_default();
            bifrost_config::profile_to_signup_config(&profile, cfg.defaults.timeout)?;
            if cfg.profiles.is_empty() {
                cfg.default_profile = Some(profile_name.clone());
            }
            cfg.profiles.insert(profile_name.clone(), profile);

            let path = bifrost_config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", path.display());
            eprintln!("  Profile: {profile_name}");
            eprintln!("\n  Test it: bifrost sites --profile {profile_name}");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = bifrost_config::load_config_or_default();
            let out = output::render_single(&global.output, &cfg, render_toml, |c: &Config| {
                c.default_profile.clone().unwrap_or_default()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(
                &bifrost_config::config_path().display().to_string(),
                global.quiet,
            );
            Ok(())
        }
    }
}

fn render_toml(cfg: &Config) -> String {
    toml::to_string_pretty(cfg).unwrap_or_else(|e| format!("# failed to render config: {e}"))
}
