//! Shared configuration for Bifrost signup tools.
//!
//! TOML profiles, environment overrides, and translation to
//! `bifrost_core::SignupConfig`. The CLI layers its flags on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use bifrost_core::{
    FormVariant, PackageCatalog, PackageRestriction, SignupConfig, SignupRequest, UnitCardinality,
};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String, available: Vec<String> },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named signup backends.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Explicit override, then `default_profile`, then `"default"`.
    pub fn active_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles.get(name).ok_or_else(|| {
            let mut available: Vec<String> = self.profiles.keys().cloned().collect();
            available.sort();
            ConfigError::ProfileNotFound {
                name: name.into(),
                available,
            }
        })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named signup backend and the form layout it expects.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g., "https://signup.example.com").
    pub api_url: String,

    /// Form layout: "company" (default) or "individual".
    #[serde(default = "default_variant")]
    pub variant: String,

    /// Override the hidden bot-trap field name.
    pub honeypot_field: Option<String>,

    /// Override unit cardinality (true = several units per signup).
    pub multi_unit: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Replace the package list.
    pub packages: Option<Vec<String>>,

    /// Replace the per-site package exclusions.
    pub package_restrictions: Option<Vec<PackageRestriction>>,
}

impl Profile {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            variant: default_variant(),
            honeypot_field: None,
            multi_unit: None,
            timeout: None,
            packages: None,
            package_restrictions: None,
        }
    }
}

fn default_variant() -> String {
    "company".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("za", "bifrost", "bifrost").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("bifrost");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file, then `BIFROST_`-prefixed environment
/// variables (`__` separates nesting, e.g. `BIFROST_DEFAULTS__TIMEOUT`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("BIFROST_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist or is unreadable.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to core config ──────────────────────────────────────

/// Map a variant name onto its preset.
pub fn parse_variant(name: &str) -> Result<FormVariant, ConfigError> {
    match name {
        "company" => Ok(FormVariant::company()),
        "individual" => Ok(FormVariant::individual()),
        other => Err(ConfigError::Validation {
            field: "variant".into(),
            reason: format!("expected 'company' or 'individual', got '{other}'"),
        }),
    }
}

/// Build a `SignupConfig` from a profile. `default_timeout` applies when the
/// profile sets none.
pub fn profile_to_signup_config(
    profile: &Profile,
    default_timeout: u64,
) -> Result<SignupConfig, ConfigError> {
    let api_url: url::Url = profile
        .api_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("invalid URL: {}", profile.api_url),
        })?;

    let mut variant = parse_variant(&profile.variant)?;
    if let Some(ref field) = profile.honeypot_field {
        if field.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "honeypot_field".into(),
                reason: "must not be empty".into(),
            });
        }
        if SignupRequest::FIELD_NAMES.contains(&field.as_str()) {
            return Err(ConfigError::Validation {
                field: "honeypot_field".into(),
                reason: format!("'{field}' is already a signup field"),
            });
        }
        variant.honeypot_field.clone_from(field);
    }
    if let Some(multi) = profile.multi_unit {
        variant.unit_cardinality = if multi {
            UnitCardinality::Multiple
        } else {
            UnitCardinality::Single
        };
    }

    let mut packages = PackageCatalog::default();
    if let Some(ref list) = profile.packages {
        if list.is_empty() {
            return Err(ConfigError::Validation {
                field: "packages".into(),
                reason: "at least one package is required".into(),
            });
        }
        packages.packages.clone_from(list);
    }
    if let Some(ref restrictions) = profile.package_restrictions {
        packages.restrictions.clone_from(restrictions);
    }

    Ok(SignupConfig {
        api_url,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(default_timeout)),
        variant,
        packages,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn loads_profiles_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "staging"

[defaults]
timeout = 12

[profiles.staging]
api_url = "https://staging.signup.example"
variant = "individual"

[[profiles.staging.package_restrictions]]
site_id = 4
excluded = ["50/50"]
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.active_profile_name(None), "staging");
        assert_eq!(cfg.active_profile_name(Some("prod")), "prod");
        assert_eq!(cfg.defaults.timeout, 12);
        assert_eq!(cfg.defaults.output, "table");

        let profile = cfg.profile("staging").unwrap();
        let signup = profile_to_signup_config(profile, cfg.defaults.timeout).unwrap();
        assert_eq!(signup.api_url.as_str(), "https://staging.signup.example/");
        assert_eq!(signup.timeout, Duration::from_secs(12));
        assert_eq!(signup.variant, FormVariant::individual());
        assert_eq!(signup.packages.available_for(Some(4)).len(), 2);
        assert_eq!(signup.packages.available_for(Some(1)).len(), 3);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn overrides_apply_on_top_of_variant() {
        let mut profile = Profile::new("http://localhost:5000");
        profile.honeypot_field = Some("fax".into());
        profile.multi_unit = Some(false);
        profile.timeout = Some(5);

        let signup = profile_to_signup_config(&profile, 30).unwrap();
        assert!(signup.variant.company_signup);
        assert_eq!(signup.variant.honeypot_field, "fax");
        assert_eq!(signup.variant.unit_cardinality, UnitCardinality::Single);
        assert_eq!(signup.timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_bad_values() {
        let mut profile = Profile::new("not a url");
        assert!(matches!(
            profile_to_signup_config(&profile, 30),
            Err(ConfigError::Validation { ref field, .. }) if field == "api_url"
        ));

        profile.api_url = "http://localhost".into();
        profile.variant = "enterprise".into();
        assert!(matches!(
            profile_to_signup_config(&profile, 30),
            Err(ConfigError::Validation { ref field, .. }) if field == "variant"
        ));
    }

    #[test]
    fn honeypot_cannot_shadow_a_signup_field() {
        for name in ["email", "first_name", "site_id", "company_name"] {
            let mut profile = Profile::new("http://localhost:5000");
            profile.honeypot_field = Some(name.into());
            assert!(
                matches!(
                    profile_to_signup_config(&profile, 30),
                    Err(ConfigError::Validation { ref field, .. }) if field == "honeypot_field"
                ),
                "honeypot '{name}' was accepted"
            );
        }
    }

    #[test]
    fn unknown_profile_lists_alternatives() {
        let mut cfg = Config::default();
        cfg.profiles.insert("b".into(), Profile::new("http://b"));
        cfg.profiles.insert("a".into(), Profile::new("http://a"));

        match cfg.profile("c") {
            Err(ConfigError::ProfileNotFound { available, .. }) => {
                assert_eq!(available, vec!["a".to_string(), "b".to_string()]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.profiles.insert("default".into(), Profile::new("http://localhost:5000"));

        save_config_to(&cfg, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profiles["default"].api_url, "http://localhost:5000");
        assert_eq!(loaded.profiles["default"].variant, "company");
    }
}
