use axum::{Router, routing::post};

pub mod intake;
pub mod recognize;
pub mod system;

/// Router for all endpoints behind the shared secret.
pub fn router() -> Router {
    Router::new()
        .route("/recognize", post(recognize::recognize))
        .route("/intake", post(intake::intake))
}
