//! Package command handler.

use tabled::Tabled;

use bifrost_core::SignupController;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct PackageRow {
    #[tabled(rename = "Package")]
    package: String,
}

/// Packages are configured locally; a site only narrows the list, so no
/// request is made.
pub fn handle(
    controller: &SignupController,
    site: Option<i64>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let packages: Vec<String> = controller
        .config()
        .packages
        .available_for(site)
        .into_iter()
        .map(str::to_owned)
        .collect();

    let out = output::render_list(
        &global.output,
        &packages,
        |p| PackageRow { package: p.clone() },
        Clone::clone,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
