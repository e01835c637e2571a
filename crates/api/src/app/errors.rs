use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use pantry_core::PantryError;

pub fn pantry_error_to_response(err: PantryError) -> axum::response::Response {
    match err {
        PantryError::InvalidArgument(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_argument", msg),
        PantryError::InvalidImage(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_image", msg),
        PantryError::NotFound(name) => {
            json_error(StatusCode::NOT_FOUND, "not_found", format!("item not found: {name}"))
        }
        PantryError::NotRecognized => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "not_recognized",
            "no item could be recognized in the image",
        ),
        PantryError::GatewayUnavailable(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "gateway_unavailable", msg)
        }
        PantryError::StoreUnavailable(msg) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_to_status_codes() {
        let cases = [
            (PantryError::invalid_argument("x"), StatusCode::BAD_REQUEST),
            (PantryError::invalid_image("x"), StatusCode::BAD_REQUEST),
            (PantryError::not_found("x"), StatusCode::NOT_FOUND),
            (PantryError::NotRecognized, StatusCode::UNPROCESSABLE_ENTITY),
            (PantryError::gateway_unavailable("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (PantryError::store_unavailable("x"), StatusCode::SERVICE_UNAVAILABLE),
        ];

        for (err, status) in cases {
            assert_eq!(pantry_error_to_response(err).status(), status);
        }
    }
}
