// ── Reference data loader state ──
//
// Sites are loaded once; units are reloaded per selected site. Unit fetches
// carry a generation number so a response for a site the user has since
// moved away from is dropped instead of overwriting the current list.

use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::Site;

/// Ticket for one in-flight units fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitsRequest {
    pub site_id: i64,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct ReferenceData {
    sites: Vec<Site>,
    units: Vec<String>,
    generation: u64,
}

impl ReferenceData {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Sites ────────────────────────────────────────────────────────

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn replace_sites(&mut self, sites: Vec<Site>) {
        self.sites = sites;
    }

    /// Display name for `id`, or `None` if it is not in the loaded list.
    pub fn site_name(&self, id: i64) -> Option<&str> {
        self.sites
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.as_str())
    }

    // ── Units ────────────────────────────────────────────────────────

    pub fn units(&self) -> &[String] {
        &self.units
    }

    pub fn has_unit(&self, label: &str) -> bool {
        self.units.iter().any(|u| u == label)
    }

    /// Start tracking a new site selection.
    ///
    /// Always invalidates the current list and any fetch still in flight.
    /// Returns the request to issue, or `None` when the selection was cleared.
    pub fn begin_units(&mut self, site: Option<i64>) -> Option<UnitsRequest> {
        self.invalidate();
        site.map(|site_id| UnitsRequest {
            site_id,
            generation: self.generation,
        })
    }

    /// Apply a finished fetch. Returns `true` if the list was replaced.
    ///
    /// Stale responses are dropped. Failures are logged and leave the list as is.
    pub fn complete_units(
        &mut self,
        request: &UnitsRequest,
        result: Result<Vec<String>, CoreError>,
    ) -> bool {
        if request.generation != self.generation {
            debug!(
                site_id = request.site_id,
                "discarding units for a site that is no longer selected"
            );
            return false;
        }

        match result {
            Ok(units) => {
                debug!(site_id = request.site_id, count = units.len(), "units loaded");
                self.units = units;
                true
            }
            Err(e) => {
                warn!(site_id = request.site_id, error = %e, "failed to fetch units");
                false
            }
        }
    }

    /// Clear the unit list and orphan any in-flight fetch.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.units.clear();
    }
}
