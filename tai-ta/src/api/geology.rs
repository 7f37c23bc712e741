//! Geology lookup endpoints (coordinate path)
//!
//! POST /api/geology proxies a coordinate lookup through the remote
//! geology service and returns the normalized result; a remote no-match
//! is a 200 with `matched_region` null. GET /api/terrain streams the
//! rendered terrain raster.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::services::{DEFAULT_GRID_SIZE, DEFAULT_VARIATION};
use crate::AppState;
use tai_common::{GeologyRequest, GeologyResult};

/// POST /api/geology
pub async fn predict_geology(
    State(state): State<AppState>,
    Json(req): Json<GeologyRequest>,
) -> ApiResult<Json<GeologyResult>> {
    let result = state
        .geology
        .predict(
            req.latitude,
            req.longitude,
            req.include_terrain_png.unwrap_or(false),
            req.grid_size.unwrap_or(DEFAULT_GRID_SIZE),
            req.variation.unwrap_or(DEFAULT_VARIATION),
        )
        .await?;

    Ok(Json(result))
}

/// Query parameters for the terrain image endpoint
#[derive(Debug, Deserialize)]
pub struct TerrainImageParams {
    pub lat: f64,
    pub lon: f64,
    pub grid_size: Option<u32>,
    pub variation: Option<u32>,
}

/// GET /api/terrain
pub async fn terrain_image(
    State(state): State<AppState>,
    Query(params): Query<TerrainImageParams>,
) -> ApiResult<Response> {
    let bytes = state
        .geology
        .fetch_terrain_image(
            params.lat,
            params.lon,
            params.grid_size.unwrap_or(DEFAULT_GRID_SIZE),
            params.variation.unwrap_or(DEFAULT_VARIATION),
        )
        .await?;

    Ok(([(header::CONTENT_TYPE, "image/png")], bytes).into_response())
}

/// Build geology routes
pub fn geology_routes() -> Router<AppState> {
    Router::new()
        .route("/api/geology", post(predict_geology))
        .route("/api/terrain", get(terrain_image))
}
