//! Unit command handler.

use tabled::Tabled;

use bifrost_core::SignupController;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct UnitRow {
    #[tabled(rename = "Unit")]
    unit: String,
}

pub async fn handle(
    controller: &mut SignupController,
    site: i64,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::require_units(controller, site).await?;

    let out = output::render_list(
        &global.output,
        controller.units(),
        |u| UnitRow { unit: u.clone() },
        Clone::clone,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
