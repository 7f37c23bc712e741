//! API request/response types shared between the analysis paths and the
//! frontend.
//!
//! `TerrainResult` is the contract for the image classification path;
//! `GeologyResult` is the normalized contract for the coordinate path.
//! Field names on the wire match what the web frontend consumes.

use serde::{Deserialize, Serialize};

/// One (label, score) output from the vision classifier.
///
/// Candidates arrive ordered by descending score and are never reordered.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassificationCandidate {
    /// Free-text vocabulary token emitted by the model
    pub label: String,
    /// Match confidence in [0.0, 1.0]
    pub score: f64,
}

/// Geographic coordinates in degrees
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Terrain classification result returned to the frontend.
///
/// Always fully populated: even when the classifier is unavailable the
/// degraded-fallback policy still produces a type, color and description.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TerrainResult {
    /// Category display name (e.g. "Mountain")
    #[serde(rename = "type")]
    pub terrain_type: String,
    /// UI color tag (e.g. "mountain"), keyed by the frontend theme
    pub color: String,
    /// Confidence percentage, clamped to [0.0, 100.0]
    pub confidence: f64,
    /// Human-readable category description
    pub description: String,
    /// Illustrative coordinates attached to the result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// Coordinate lookup request for the geology path.
///
/// `grid_size` and `variation` control the remote terrain renderer and
/// default to 50 when omitted.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeologyRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_terrain_png: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation: Option<u32>,
}

/// Normalized geology lookup result.
///
/// `None` fields signal "no match" and are distinguishable from a match
/// with empty data. A no-match response from the remote service is a
/// normal value of this type, never an error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeologyResult {
    /// Matched region name, absent when the service found nothing
    pub matched_region: Option<String>,
    /// Geological attributes of the matched region
    pub geology: Option<serde_json::Map<String, serde_json::Value>>,
    /// Base64-encoded rendered terrain raster, when requested inline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terrain_png_b64: Option<String>,
    /// Server-supplied status text (populated on no-match)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terrain_result_serializes_type_field() {
        let result = TerrainResult {
            terrain_type: "Mountain".to_string(),
            color: "mountain".to_string(),
            confidence: 87.5,
            description: "High-altitude regions".to_string(),
            coordinates: Some(Coordinates { lat: 20.0, lng: 78.0 }),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["type"], "Mountain");
        assert_eq!(json["color"], "mountain");
        assert_eq!(json["confidence"], 87.5);
        assert_eq!(json["coordinates"]["lat"], 20.0);
    }

    #[test]
    fn geology_result_no_match_keeps_absent_fields() {
        let result = GeologyResult {
            matched_region: None,
            geology: None,
            terrain_png_b64: None,
            status_message: Some("No match".to_string()),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["matched_region"].is_null());
        assert!(json["geology"].is_null());
        // Optional payload fields are omitted entirely rather than nulled
        assert!(json.get("terrain_png_b64").is_none());
        assert_eq!(json["status_message"], "No match");
    }

    #[test]
    fn geology_request_defaults_omitted_on_wire() {
        let req = GeologyRequest {
            latitude: 22.57,
            longitude: 88.36,
            include_terrain_png: None,
            grid_size: None,
            variation: None,
        };

        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("grid_size").is_none());
        assert!(json.get("variation").is_none());
    }
}
