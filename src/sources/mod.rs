//! Remote weather sources and their normalizers.
//!
//! Each source follows the same two-phase pattern:
//!
//! 1. **Fetching**: one GET request through the shared [`reqwest::Client`]
//! 2. **Normalizing**: a pure function from the response body to a
//!    [`WeatherRecord`]
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Apixu forecast | [`apixu`] | JSON API | Requires an API key; 10-day window |
//! | Google weather widget | [`google`] | HTML scraping | Layout may change without notice |
//!
//! The normalizers are public so they can be driven from fixtures without a
//! network round trip.

pub mod apixu;
pub mod google;
pub mod layout;

use crate::error::WeatherError;
use crate::models::WeatherRecord;
use crate::utils::redact_url;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use std::time::Duration;
use tracing::{debug, instrument};

/// The search page only serves the expected widget markup to desktop browsers.
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/71.0.3578.98 Safari/537.36";

/// Client-side timeout applied to every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A remote source that can produce a [`WeatherRecord`] for a location.
pub trait WeatherSource {
    /// Short name used in log fields.
    fn name(&self) -> &'static str;

    /// Fetch and normalize current conditions for `location`.
    async fn fetch(&self, location: &str) -> Result<WeatherRecord, WeatherError>;
}

/// Build the HTTP client shared by all sources.
pub fn build_client() -> Result<Client, WeatherError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| WeatherError::network("<client>", e))
}

/// GET `url` with the desktop user-agent and return the body bytes.
///
/// Non-2xx responses are reported as [`WeatherError::Network`]. The
/// recorded URL has its API key redacted.
#[instrument(level = "info", skip(client, url), fields(url = %redact_url(url)))]
pub async fn fetch_body(client: &Client, url: &str) -> Result<Vec<u8>, WeatherError> {
    let response = client
        .get(url)
        .header(USER_AGENT, DESKTOP_USER_AGENT)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| WeatherError::network(url, e))?;

    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| WeatherError::network(url, e))?;
    debug!(%status, bytes = body.len(), "Fetched response body");
    Ok(body.to_vec())
}
