use std::sync::Arc;

use axum::{Json, body::Bytes, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// Recognize the photo in the request body and count one more of that item.
pub async fn intake(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> axum::response::Response {
    match services.intake().capture_and_intake(&body).await {
        Ok(receipt) => (StatusCode::OK, Json(dto::IntakeResponse::from(receipt))).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, retryable = e.is_retryable(), "intake failed");
            errors::pantry_error_to_response(e)
        }
    }
}
