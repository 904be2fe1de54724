// Reference data endpoints: sites and their vacant units.

use tracing::debug;

use crate::client::SignupClient;
use crate::error::Error;
use crate::models::SiteResponse;

impl SignupClient {
    /// List all selectable sites.
    ///
    /// `GET /api/sites`
    pub async fn list_sites(&self) -> Result<Vec<SiteResponse>, Error> {
        let url = self.api_url("sites")?;
        debug!("listing sites");
        self.get(url).await
    }

    /// List unit labels available at a site.
    ///
    /// `GET /api/units?site_id={site_id}`
    pub async fn list_units(&self, site_id: i64) -> Result<Vec<String>, Error> {
        let mut url = self.api_url("units")?;
        url.query_pairs_mut()
            .append_pair("site_id", &site_id.to_string());
        debug!(site_id, "listing units");
        self.get(url).await
    }
}
