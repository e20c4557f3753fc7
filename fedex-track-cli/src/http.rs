//! Authenticated HTTP transport
//!
//! Concrete implementation of the library's transport capabilities over
//! `reqwest::blocking`. Authentication happens once at construction via the
//! OAuth2 client-credentials grant; the bearer token is then attached to
//! every tracking query.

use crate::config::ApiConfig;
use fedex_track_client::{DocumentFetcher, Result, TrackError, TrackTransport};
use serde_json::{json, Value};
use std::fs::File;
use std::path::Path;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(10);

/// Authenticated FedEx API transport
pub struct FedexTransport {
    client: reqwest::blocking::Client,
    track_url: String,
    auth_token: String,
}

impl FedexTransport {
    /// Authenticate against the carrier and build a ready-to-use transport
    ///
    /// Rejects empty credentials before any network call. A token-less
    /// response from the auth endpoint fails with [`TrackError::Auth`].
    pub fn connect(config: &ApiConfig) -> Result<Self> {
        if config.api_key.is_empty() || config.secret_key.is_empty() {
            return Err(TrackError::Auth("invalid key supplied".to_string()));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| TrackError::Transport(e.to_string()))?;

        log::info!("Requesting auth token from {}", config.auth_url());
        let response = client
            .post(config.auth_url())
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", config.api_key.as_str()),
                ("client_secret", config.secret_key.as_str()),
            ])
            .send()
            .map_err(|e| TrackError::Auth(e.to_string()))?;

        let body: Value = response
            .json()
            .map_err(|e| TrackError::Auth(e.to_string()))?;
        let auth_token = body
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| TrackError::Auth("invalid authentication request".to_string()))?
            .to_string();

        log::debug!("Obtained authentication token");
        Ok(Self {
            client,
            track_url: config.track_url(),
            auth_token,
        })
    }
}

impl TrackTransport for FedexTransport {
    fn submit_tracking_query(&self, tracking_number: &str) -> Result<Value> {
        let payload = json!({
            "trackingInfo": [
                {"trackingNumberInfo": {"trackingNumber": tracking_number}}
            ],
            "includeDetailedScans": "False"
        });

        let response = self
            .client
            .post(&self.track_url)
            .bearer_auth(&self.auth_token)
            .json(&payload)
            .send()
            .map_err(|e| TrackError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| TrackError::Transport(e.to_string()))?;

        response
            .json()
            .map_err(|e| TrackError::Transport(e.to_string()))
    }

    fn is_application_error(&self, response: &Value) -> bool {
        response.get("errors").is_some()
    }
}

impl DocumentFetcher for FedexTransport {
    fn fetch_and_persist(&self, url: &str, dest: &Path) -> Result<()> {
        log::info!("Downloading {} to {:?}", url, dest);
        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| TrackError::Download(e.to_string()))?
            .error_for_status()
            .map_err(|e| TrackError::Download(e.to_string()))?;

        let mut file = File::create(dest)?;
        response
            .copy_to(&mut file)
            .map_err(|e| TrackError::Download(e.to_string()))?;
        Ok(())
    }
}
