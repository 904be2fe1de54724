// Wire → domain conversions.

use bifrost_api::SiteResponse;

use crate::model::Site;

impl From<SiteResponse> for Site {
    fn from(site: SiteResponse) -> Self {
        Self {
            id: site.id,
            name: site.name.trim().to_owned(),
        }
    }
}
