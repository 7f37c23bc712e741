//! Remote geology service client
//!
//! Coordinate path: sends latitude/longitude to the prediction service
//! and normalizes its reply into [`GeologyResult`]. The service
//! distinguishes "understood the request, found nothing" (a 404 with a
//! structured no-match payload — a normal result here) from actual
//! failures (surfaced as [`GeologyError`]).

use base64::{engine::general_purpose, Engine as _};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tai_common::GeologyResult;
use thiserror::Error;

const USER_AGENT: &str = "TerrainAI/0.1.0 (https://github.com/terrain-ai/terrain-ai)";

/// Remote renderer defaults, applied when the caller omits the knobs
pub const DEFAULT_GRID_SIZE: u32 = 50;
pub const DEFAULT_VARIATION: u32 = 50;

/// Geology client errors
#[derive(Debug, Error)]
pub enum GeologyError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Service error {0}: {1}")]
    ServiceError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Prediction request body, mirrored from the service contract
#[derive(Debug, Serialize)]
struct PredictBody {
    latitude: f64,
    longitude: f64,
    include_terrain_png: bool,
    grid_size: u32,
    variation: u32,
}

/// Raw prediction response as the service sends it
#[derive(Debug, Deserialize)]
struct PredictWire {
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    geology: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    terrain_png_b64: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Remote geology service client
pub struct GeologyClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl GeologyClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GeologyError> {
        // Trailing slash so Url::join keeps the base path intact
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url =
            Url::parse(&normalized).map_err(|e| GeologyError::InvalidUrl(e.to_string()))?;

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| GeologyError::NetworkError(e.to_string()))?;

        Ok(Self { http_client, base_url })
    }

    /// Look up geology for a coordinate pair.
    ///
    /// A no-match reply normalizes to an `Ok` result with
    /// `matched_region` absent and `status_message` populated; only
    /// service failures return an error.
    pub async fn predict(
        &self,
        latitude: f64,
        longitude: f64,
        include_terrain_png: bool,
        grid_size: u32,
        variation: u32,
    ) -> Result<GeologyResult, GeologyError> {
        let url = self
            .base_url
            .join("predict")
            .map_err(|e| GeologyError::InvalidUrl(e.to_string()))?;

        let body = PredictBody {
            latitude,
            longitude,
            include_terrain_png,
            grid_size,
            variation,
        };

        tracing::debug!(latitude, longitude, grid_size, variation, "Querying geology service");

        let response = self
            .http_client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GeologyError::NetworkError(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| GeologyError::NetworkError(e.to_string()))?;

        let result = normalize_response(status, &text)?;

        tracing::info!(
            latitude,
            longitude,
            matched = result.matched_region.is_some(),
            "Geology lookup complete"
        );

        Ok(result)
    }

    /// URL of the out-of-band terrain image endpoint, for callers that
    /// did not request inline PNG bytes.
    pub fn terrain_image_url(
        &self,
        lat: f64,
        lon: f64,
        grid_size: u32,
        variation: u32,
    ) -> Result<Url, GeologyError> {
        let mut url = self
            .base_url
            .join("terrain")
            .map_err(|e| GeologyError::InvalidUrl(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("lat", &lat.to_string())
            .append_pair("lon", &lon.to_string())
            .append_pair("grid_size", &grid_size.to_string())
            .append_pair("variation", &variation.to_string());

        Ok(url)
    }

    /// Fetch the rendered terrain raster for a coordinate pair.
    pub async fn fetch_terrain_image(
        &self,
        lat: f64,
        lon: f64,
        grid_size: u32,
        variation: u32,
    ) -> Result<Vec<u8>, GeologyError> {
        let url = self.terrain_image_url(lat, lon, grid_size, variation)?;

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| GeologyError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeologyError::ServiceError(status.as_u16(), error_text));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GeologyError::NetworkError(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

/// Translate a raw (status, body) pair into the normalized result.
///
/// Pure function so the no-match policy is testable without a live
/// service:
/// - success: passthrough of state/geology/png/message
/// - 404 with a structured no-match payload (a `message`, or a JSON body
///   whose `state` is null): a NORMAL empty result, not an error
/// - anything else: error carrying the server-supplied message when
///   present, else a generic status-code message
fn normalize_response(status: u16, body: &str) -> Result<GeologyResult, GeologyError> {
    let wire: Option<PredictWire> = serde_json::from_str(body).ok();

    if (200..300).contains(&status) {
        let wire = wire.ok_or_else(|| {
            GeologyError::ParseError(format!("Malformed prediction response: {}", truncated(body)))
        })?;

        // Reject inline rasters that are not valid base64 rather than
        // forwarding garbage to the frontend.
        if let Some(png) = &wire.terrain_png_b64 {
            general_purpose::STANDARD
                .decode(png)
                .map_err(|e| GeologyError::ParseError(format!("Invalid terrain PNG: {}", e)))?;
        }

        return Ok(GeologyResult {
            matched_region: wire.state,
            geology: wire.geology,
            terrain_png_b64: wire.terrain_png_b64,
            status_message: wire.message,
        });
    }

    if status == 404 {
        if let Some(wire) = &wire {
            if wire.message.is_some() || wire.state.is_none() {
                return Ok(GeologyResult {
                    matched_region: None,
                    geology: None,
                    terrain_png_b64: None,
                    status_message: Some(
                        wire.message
                            .clone()
                            .unwrap_or_else(|| "Location not matched".to_string()),
                    ),
                });
            }
        }
    }

    let message = wire
        .and_then(|w| w.error.or(w.message))
        .unwrap_or_else(|| format!("HTTP {}", status));
    Err(GeologyError::ServiceError(status, message))
}

fn truncated(body: &str) -> String {
    const MAX: usize = 120;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let cut: String = body.chars().take(MAX).collect();
        format!("{}...", cut)
    }
}
