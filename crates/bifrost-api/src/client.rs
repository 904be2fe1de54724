// Signup API HTTP client
//
// Wraps `reqwest::Client` with URL construction and response decoding.
// Endpoint methods live in `sites.rs` and `signup.rs` as inherent methods
// so this module stays focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::ErrorBody;
use crate::transport::TransportConfig;

/// Raw HTTP client for the signup backend.
///
/// Non-success responses are turned into [`Error::Api`] (or
/// [`Error::RateLimited`]) with the server's `error` text preserved.
#[derive(Debug, Clone)]
pub struct SignupClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SignupClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root (e.g. `https://signup.example.com`);
    /// endpoint paths are joined onto it.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Parse `base_url` and wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self::with_client(http, base_url))
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/api/{path}`, tolerating a trailing slash (or none) on the base.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/api/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let body = Self::check_status(resp).await?;
        Self::decode(&body)
    }

    /// Send a POST request with JSON body and return the raw success body.
    pub(crate) async fn post(&self, url: Url, body: &impl Serialize) -> Result<String, Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::check_status(resp).await
    }

    /// Return the body text on 2xx, otherwise an error built from the `{error, fields}` body.
    async fn check_status(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if status.is_success() {
            return Ok(body);
        }

        let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
        debug!(status = status.as_u16(), error = ?parsed.error, "request rejected");

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited {
                message: parsed.error,
            });
        }

        Err(Error::Api {
            status: status.as_u16(),
            message: parsed.error,
            fields: parsed.fields,
        })
    }

    pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
        serde_json::from_str(body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: body.to_owned(),
        })
    }
}
