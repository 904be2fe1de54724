//! Site command handler.

use tabled::Tabled;

use bifrost_core::{SignupController, Site};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
}

fn site_row(site: &Site) -> SiteRow {
    SiteRow {
        id: site.id,
        name: site.name.clone(),
    }
}

pub async fn handle(controller: &mut SignupController, global: &GlobalOpts) -> Result<(), CliError> {
    util::require_sites(controller).await?;

    let out = output::render_list(
        &global.output,
        controller.sites(),
        site_row,
        |s| s.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
