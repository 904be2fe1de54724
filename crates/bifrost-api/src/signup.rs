// Signup submission endpoint.

use tracing::debug;

use crate::client::SignupClient;
use crate::error::Error;
use crate::models::{SignupReceipt, SignupRequest};

impl SignupClient {
    /// Submit a signup.
    ///
    /// `POST /api/signup`
    ///
    /// Any 2xx counts as success. The body is optional; a JSON
    /// `{status, message}` is returned as a receipt when present.
    pub async fn submit_signup(&self, request: &SignupRequest) -> Result<SignupReceipt, Error> {
        let url = self.api_url("signup")?;
        debug!(email = %request.email, "submitting signup");
        let body = self.post(url, request).await?;

        if body.trim().is_empty() {
            return Ok(SignupReceipt::default());
        }
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }
}
