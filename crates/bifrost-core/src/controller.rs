// ── Signup controller ──
//
// Owns the form state and reference data for one signup session and runs
// the submission workflow: validate → assemble → send → interpret result.
// Network calls borrow `&self` and state changes take `&mut self`, so an
// event loop can issue a request, keep handling input, and feed the result
// back in with `apply_units` / `finish_submission`.

use chrono::{Local, NaiveDate, Utc};
use tracing::{debug, info, warn};

use bifrost_api::{SignupClient, SignupReceipt, SignupRequest, TransportConfig};

use crate::config::SignupConfig;
use crate::error::{CoreError, SubmitBlocked};
use crate::model::{ActivationType, FormField, Site, SignupType, SubmissionStatus};
use crate::payload::assemble;
use crate::store::{FormState, ReferenceData, UnitsRequest};
use crate::validate::{check_required, is_valid_email};

/// A validated, assembled submission waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    request: SignupRequest,
}

impl PendingSubmission {
    pub fn request(&self) -> &SignupRequest {
        &self.request
    }
}

/// The main entry point for consumers.
///
/// Holds a single owned [`FormState`] and [`ReferenceData`]; nothing is
/// global. Status moves `idle → loading → {invalid_email | success | error}`
/// and back to `idle` only through [`dismiss`](Self::dismiss).
pub struct SignupController {
    config: SignupConfig,
    client: SignupClient,
    state: FormState,
    reference: ReferenceData,
}

impl SignupController {
    /// Create a controller with a fresh HTTP client. Does NOT fetch anything --
    /// call [`load_sites()`](Self::load_sites) to populate the site list.
    pub fn new(config: SignupConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::with_timeout(config.timeout);
        let client = SignupClient::new(config.api_url.clone(), &transport)?;
        Ok(Self::with_client(config, client))
    }

    /// Create a controller around an existing client.
    pub fn with_client(config: SignupConfig, client: SignupClient) -> Self {
        let state = FormState::new(config.variant.clone(), Utc::now());
        Self {
            config,
            client,
            state,
            reference: ReferenceData::new(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn config(&self) -> &SignupConfig {
        &self.config
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn status(&self) -> &SubmissionStatus {
        self.state.status()
    }

    pub fn sites(&self) -> &[Site] {
        self.reference.sites()
    }

    /// Look up a loaded site by id.
    pub fn site(&self, id: i64) -> Result<&Site, CoreError> {
        self.reference
            .sites()
            .iter()
            .find(|s| s.id == id)
            .ok_or(CoreError::UnknownSite { id })
    }

    pub fn units(&self) -> &[String] {
        self.reference.units()
    }

    /// Packages choosable for the currently selected site.
    pub fn available_packages(&self) -> Vec<&str> {
        self.config
            .packages
            .available_for(self.state.selection.site_id)
    }

    /// The submit trigger is enabled only while idle.
    pub fn can_submit(&self) -> bool {
        self.state.status().is_idle()
    }

    pub fn activation_notice(&self) -> Option<String> {
        self.state.selection.activation_notice()
    }

    // ── Field updates ────────────────────────────────────────────────

    pub fn update(&mut self, field: FormField, value: impl Into<String>) {
        self.state.update(field, value);
    }

    pub fn set_signup_type(&mut self, signup_type: SignupType) {
        self.state.set_signup_type(signup_type);
    }

    pub fn set_activation_type(&mut self, activation_type: Option<ActivationType>) {
        self.state.set_activation_type(activation_type);
    }

    pub fn set_activation_date(&mut self, date: Option<NaiveDate>) {
        self.state.set_activation_date(date);
    }

    pub fn set_honeypot(&mut self, value: impl Into<String>) {
        self.state.set_honeypot(value);
    }

    // ── Reference data ───────────────────────────────────────────────

    /// Fetch the site list. On failure the previous list is kept and the
    /// error is only logged. Returns `true` if the list was replaced.
    pub async fn load_sites(&mut self) -> bool {
        match self.client.list_sites().await {
            Ok(sites) => {
                let sites: Vec<Site> = sites.into_iter().map(Site::from).collect();
                debug!(count = sites.len(), "sites loaded");
                self.reference.replace_sites(sites);
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch sites");
                false
            }
        }
    }

    /// Change the selected site.
    ///
    /// Clears the unit list and unit selection, and drops a selected package
    /// the new site does not offer. Returns the units fetch to issue, or
    /// `None` if the site was cleared or did not change.
    pub fn select_site(&mut self, site: Option<i64>) -> Option<UnitsRequest> {
        if site == self.state.selection.site_id {
            return None;
        }
        if let Some(id) = site {
            if self.reference.site_name(id).is_none() {
                debug!(site_id = id, "selected site is not in the loaded list");
            }
        }

        let selection = &mut self.state.selection;
        selection.site_id = site;
        selection.units.clear();

        let offered = selection
            .package
            .as_deref()
            .is_none_or(|p| self.config.packages.is_offered(p, site));
        if !offered {
            debug!(package = ?selection.package, "package not offered at new site, clearing");
            selection.package = None;
        }

        self.reference.begin_units(site)
    }

    /// Fetch units for an issued request. Does not touch state.
    pub async fn fetch_units(&self, request: &UnitsRequest) -> Result<Vec<String>, CoreError> {
        Ok(self.client.list_units(request.site_id).await?)
    }

    /// Feed a finished units fetch back in. Stale results are dropped.
    pub fn apply_units(
        &mut self,
        request: &UnitsRequest,
        result: Result<Vec<String>, CoreError>,
    ) -> bool {
        self.reference.complete_units(request, result)
    }

    /// Select a site and load its units in one step.
    pub async fn change_site(&mut self, site: Option<i64>) -> bool {
        let Some(request) = self.select_site(site) else {
            return false;
        };
        let result = self.fetch_units(&request).await;
        self.apply_units(&request, result)
    }

    // ── Selections ───────────────────────────────────────────────────

    /// Select a unit from the loaded list. Single-unit forms replace the
    /// current unit; multi-unit forms add to the selection.
    pub fn select_unit(&mut self, label: &str) -> Result<(), CoreError> {
        if !self.reference.has_unit(label) {
            return Err(CoreError::UnknownUnit {
                unit: label.to_owned(),
            });
        }
        self.state.selection.units.select(label);
        Ok(())
    }

    /// Replace the unit selection wholesale. Nothing changes if any label
    /// is unknown. Single-unit forms keep the last label.
    pub fn select_units<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<(), CoreError> {
        if let Some(unknown) = labels
            .iter()
            .map(AsRef::as_ref)
            .find(|l| !self.reference.has_unit(l))
        {
            return Err(CoreError::UnknownUnit {
                unit: unknown.to_owned(),
            });
        }
        let units = &mut self.state.selection.units;
        units.clear();
        for label in labels {
            units.select(label.as_ref());
        }
        Ok(())
    }

    pub fn deselect_unit(&mut self, label: &str) {
        self.state.selection.units.deselect(label);
    }

    pub fn select_package(&mut self, package: Option<&str>) -> Result<(), CoreError> {
        if let Some(p) = package {
            if !self
                .config
                .packages
                .is_offered(p, self.state.selection.site_id)
            {
                return Err(CoreError::PackageUnavailable { package: p.to_owned() });
            }
        }
        self.state.set_package(package.map(str::to_owned));
        Ok(())
    }

    // ── Submission ───────────────────────────────────────────────────

    /// Gate and validate a submission.
    ///
    /// Refuses (without touching state) when not idle or when required
    /// fields are missing. Otherwise moves to `loading`; an invalid email
    /// then ends in `invalid_email` with `Ok(None)` and no payload.
    pub fn prepare_submission(&mut self) -> Result<Option<PendingSubmission>, SubmitBlocked> {
        if !self.can_submit() {
            return Err(SubmitBlocked::Busy {
                status: self.state.status().clone(),
            });
        }

        let today = Local::now().date_naive();
        let issues = check_required(
            &self.state.form,
            &self.state.selection,
            self.state.variant(),
            &self.config.packages,
            today,
        );
        if !issues.is_empty() {
            return Err(SubmitBlocked::Incomplete { issues });
        }

        self.state.set_status(SubmissionStatus::Loading);

        if !is_valid_email(&self.state.form.email) {
            debug!("email failed syntax check");
            self.state.set_status(SubmissionStatus::InvalidEmail);
            return Ok(None);
        }

        let site_name = self
            .state
            .selection
            .site_id
            .and_then(|id| self.reference.site_name(id));
        let request = assemble(
            &self.state.form,
            &self.state.selection,
            site_name,
            &self.state.meta,
            self.state.variant(),
        );
        Ok(Some(PendingSubmission { request }))
    }

    /// Post a prepared submission. Does not touch state.
    pub async fn send(&self, pending: &PendingSubmission) -> Result<SignupReceipt, CoreError> {
        Ok(self.client.submit_signup(&pending.request).await?)
    }

    /// Record the outcome of [`send`](Self::send).
    ///
    /// Success resets the form and the site/unit selection. Failure keeps
    /// every entered value so the user can resubmit. Ignored unless a
    /// submission is in flight.
    pub fn finish_submission(
        &mut self,
        result: Result<SignupReceipt, CoreError>,
    ) -> &SubmissionStatus {
        if !self.state.status().is_loading() {
            warn!(status = %self.state.status(), "submission result arrived while not loading");
            return self.state.status();
        }

        match result {
            Ok(receipt) => {
                info!(message = ?receipt.message, "signup accepted");
                self.state.set_status(SubmissionStatus::Success);
                self.state.reset();
                self.reference.invalidate();
            }
            Err(e) => {
                warn!(error = %e, "signup failed");
                self.state.set_status(SubmissionStatus::Error {
                    message: e.submission_message(),
                });
            }
        }
        self.state.status()
    }

    /// Validate, send and record the result in one step.
    pub async fn submit(&mut self) -> Result<&SubmissionStatus, SubmitBlocked> {
        let Some(pending) = self.prepare_submission()? else {
            return Ok(self.state.status());
        };
        let result = self.send(&pending).await;
        Ok(self.finish_submission(result))
    }

    /// Acknowledge the current notice and return to idle.
    pub fn dismiss(&mut self) {
        if self.state.status().is_dismissible() {
            self.state.set_status(SubmissionStatus::Idle);
        }
    }
}
