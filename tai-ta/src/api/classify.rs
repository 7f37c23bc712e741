//! Image classification endpoint
//!
//! POST /api/predict — multipart form with a single `file` field.
//! Validation happens before any model call; a rejected upload never
//! reaches the classifier. On classifier failure the configured
//! fallback policy decides between a synthetic result and a 503.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use tai_common::TerrainResult;

use crate::error::{ApiError, ApiResult};
use crate::validators::{validate_image_upload, MAX_UPLOAD_BYTES};
use crate::AppState;

/// POST /api/predict
pub async fn predict_terrain(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<TerrainResult>> {
    let mut upload: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed upload: {}", e)))?
    {
        if field.name() == Some("file") {
            let content_type = field.content_type().map(str::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;
            upload = Some((content_type, data.to_vec()));
            break;
        }
    }

    let (content_type, data) = upload
        .ok_or_else(|| ApiError::BadRequest("Missing file field in upload".to_string()))?;

    validate_image_upload(content_type.as_deref(), &data)?;

    tracing::info!(
        bytes = data.len(),
        content_type = content_type.as_deref().unwrap_or("(sniffed)"),
        "Terrain analysis started"
    );

    let result = match state.classifier.classify(data).await {
        Ok(candidates) => state.resolver.resolve(&candidates),
        Err(err) => {
            *state.last_error.write().await = Some(err.to_string());

            if !state.config.fallback.synthetic_on_classifier_failure {
                return Err(err.into());
            }

            tracing::warn!(error = %err, "Classifier unavailable, serving synthetic result");
            state.resolver.degraded()
        }
    };

    tracing::info!(
        terrain = %result.terrain_type,
        confidence = result.confidence,
        "Terrain analysis complete"
    );

    Ok(Json(result))
}

/// Build classification routes.
///
/// The framework body limit sits above the validator's 10 MiB cap so
/// oversized uploads get the validator's user-facing message instead of
/// a bare 413.
pub fn classify_routes() -> Router<AppState> {
    Router::new()
        .route("/api/predict", post(predict_terrain))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
}
