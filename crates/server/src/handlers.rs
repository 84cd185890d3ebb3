use axum::{Json, body::Bytes, extract::State};
use payload::RecommendationResponse;
use serde_json::{Value, json};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub const SERVICE_NAME: &str = "recommendation-engine";

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME
    }))
}

/// `POST /api/recommendations`
///
/// Takes the raw body rather than `Json<T>` so that malformed JSON and
/// validation failures share one `{"error": ...}` shape.
pub async fn recommendations(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<RecommendationResponse>> {
    let body = std::str::from_utf8(&body)
        .map_err(|e| AppError::BadRequest(format!("Request body is not UTF-8: {e}")))?;
    let request = payload::parse_request(body)?;

    let response = state.service.recommend(request).await?;
    Ok(Json(response))
}
