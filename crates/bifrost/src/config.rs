//! Resolve the signup service to talk to: profile from the config file,
//! overridden by global flags and `BIFROST_*` environment variables.

use bifrost_config::{Config, Profile};
use bifrost_core::SignupConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Build a `SignupConfig` from the config file, profile, and CLI overrides.
///
/// This is the single boundary where config-file types cross into core types.
pub fn build_signup_config(global: &GlobalOpts) -> Result<SignupConfig, CliError> {
    let cfg = bifrost_config::load_config_or_default();
    resolve(&cfg, global)
}

fn resolve(cfg: &Config, global: &GlobalOpts) -> Result<SignupConfig, CliError> {
    let profile_name = cfg.active_profile_name(global.profile.as_deref());

    let mut profile = match cfg.profile(&profile_name) {
        Ok(profile) => profile.clone(),
        // An explicitly requested profile must exist.
        Err(err) if global.profile.is_some() => return Err(err.into()),
        Err(_) => {
            let url = global.api_url.as_deref().ok_or_else(|| CliError::NoConfig {
                path: bifrost_config::config_path().display().to_string(),
            })?;
            Profile::new(url)
        }
    };

    // Flag > env > profile
    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }
    if let Some(variant) = global.variant {
        profile.variant = variant.as_str().into();
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    tracing::debug!(profile = %profile_name, api_url = %profile.api_url, "resolved signup service");
    Ok(bifrost_config::profile_to_signup_config(
        &profile,
        cfg.defaults.timeout,
    )?)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::time::Duration;

    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["bifrost"];
        argv.extend_from_slice(args);
        argv.push("sites");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with_profile() -> Config {
        let mut cfg = Config::default();
        let mut profile = Profile::new("https://signup.example");
        profile.variant = "individual".into();
        cfg.profiles.insert("default".into(), profile);
        cfg
    }

    #[test]
    fn flags_override_profile() {
        let cfg = config_with_profile();
        let signup = resolve(
            &cfg,
            &global(&["--api-url", "http://localhost:5000", "--timeout", "3", "--variant", "company"]),
        )
        .unwrap();

        assert_eq!(signup.api_url.as_str(), "http://localhost:5000/");
        assert_eq!(signup.timeout, Duration::from_secs(3));
        assert!(signup.variant.company_signup);
    }

    #[test]
    fn profile_used_without_flags() {
        let signup = resolve(&config_with_profile(), &global(&[])).unwrap();
        assert_eq!(signup.api_url.as_str(), "https://signup.example/");
        assert!(!signup.variant.company_signup);
    }

    #[test]
    fn api_url_alone_is_enough() {
        let signup = resolve(&Config::default(), &global(&["--api-url", "http://localhost:5000"]))
            .unwrap();
        assert_eq!(signup.timeout, Duration::from_secs(30));
    }

    #[test]
    fn nothing_configured_is_an_error() {
        let err = resolve(&Config::default(), &global(&[])).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn unknown_explicit_profile_is_an_error() {
        let err = resolve(
            &config_with_profile(),
            &global(&["--profile", "staging", "--api-url", "http://localhost:5000"]),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::ProfileNotFound { ref name, .. } if name == "staging"));
    }
}
