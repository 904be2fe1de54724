//! Command dispatch: bridges CLI args -> controller calls -> output formatting.

pub mod config_cmd;
pub mod packages;
pub mod sites;
pub mod submit;
pub mod units;
pub mod util;

use bifrost_core::SignupController;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a service-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    mut controller: SignupController,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Sites => sites::handle(&mut controller, global).await,
        Command::Units { site } => units::handle(&mut controller, site, global).await,
        Command::Packages { site } => packages::handle(&controller, site, global),
        Command::Submit(args) => submit::handle(&mut controller, *args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
