use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use pantry_core::PantryError;
use pantry_infra::recognition::decode_image_payload;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// Identify the item in a base64 photo without touching the ledger.
pub async fn recognize(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RecognizeRequest>,
) -> axum::response::Response {
    let Some(payload) = body.image.filter(|s| !s.trim().is_empty()) else {
        return errors::json_error(StatusCode::BAD_REQUEST, "missing_image", "missing image data");
    };

    let image = match decode_image_payload(&payload) {
        Ok(bytes) => bytes,
        Err(e) => return errors::pantry_error_to_response(e),
    };

    match services.gateway().recognize(&image).await {
        Ok(label) => (StatusCode::OK, Json(dto::RecognizeResponse { item: Some(label) })).into_response(),
        Err(PantryError::NotRecognized) => {
            (StatusCode::OK, Json(dto::RecognizeResponse { item: None })).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "recognition failed");
            errors::pantry_error_to_response(e)
        }
    }
}
