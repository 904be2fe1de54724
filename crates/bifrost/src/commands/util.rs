//! Shared helpers for command handlers.

use bifrost_core::{Site, SignupController};

use crate::error::CliError;

/// Load the site list, turning a silent loader failure into an error.
pub async fn require_sites(controller: &mut SignupController) -> Result<(), CliError> {
    if controller.load_sites().await {
        Ok(())
    } else {
        Err(CliError::ReferenceUnavailable {
            resource: "sites".into(),
        })
    }
}

/// Look up a site in the loaded list.
pub fn find_site(controller: &SignupController, id: i64) -> Result<&Site, CliError> {
    Ok(controller.site(id)?)
}

/// Select a site and load its units.
pub async fn require_units(controller: &mut SignupController, site: i64) -> Result<(), CliError> {
    if controller.change_site(Some(site)).await {
        Ok(())
    } else {
        Err(CliError::ReferenceUnavailable {
            resource: format!("units for site {site}"),
        })
    }
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Prompt {
        reason: e.to_string(),
    }
}
