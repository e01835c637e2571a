//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: ledger store, recognition gateway and intake wiring
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, extract::DefaultBodyLimit, routing::get};
use tower::ServiceBuilder;

use pantry_infra::config::AppConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// HTTP-level settings taken from the process configuration.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub api_secret: String,
    /// Upper bound on request bodies (raw bytes or base64 JSON).
    pub max_body_bytes: usize,
}

impl From<&AppConfig> for ApiSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            api_secret: config.api_secret.clone(),
            max_body_bytes: config.max_image_bytes,
        }
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<AppServices>, settings: ApiSettings) -> Router {
    let auth_state = middleware::AuthState {
        api_secret: Arc::from(settings.api_secret),
    };

    // Protected routes: require the shared secret.
    let protected = routes::router()
        .layer(Extension(services))
        .layer(DefaultBodyLimit::max(settings.max_body_bytes))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::api_key_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
        .layer(ServiceBuilder::new())
}
