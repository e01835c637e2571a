//! REST client for a Google-Vision-compatible `images:annotate` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use pantry_core::{PantryError, PantryResult};

use super::detector::{LabelAnnotation, LabelDetector};

pub const DEFAULT_VISION_URL: &str = "https://vision.googleapis.com/v1/images:annotate";

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
struct AnnotateImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    label_annotations: Vec<LabelAnnotation>,
    error: Option<ApiStatus>,
}

#[derive(Debug, Deserialize)]
struct ApiStatus {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

/// Label detector backed by the Vision REST API.
///
/// The client is built once and injected into `RecognitionGateway`; the API
/// key travels as the `key` query parameter.
#[derive(Debug, Clone)]
pub struct VisionApiClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
    max_results: u32,
}

impl VisionApiClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        max_results: u32,
    ) -> PantryResult<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| PantryError::gateway_unavailable(format!("http client init failed: {e}")))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key,
            max_results: max_results.max(1),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body(&self, image: &[u8]) -> AnnotateRequest {
        AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(image),
                },
                features: vec![Feature {
                    kind: "LABEL_DETECTION",
                    max_results: self.max_results,
                }],
            }],
        }
    }
}

/// Labels of the first response entry, or the provider's error.
fn first_entry_labels(response: AnnotateResponse) -> PantryResult<Vec<LabelAnnotation>> {
    let Some(first) = response.responses.into_iter().next() else {
        return Ok(Vec::new());
    };

    if let Some(status) = first.error {
        return Err(PantryError::gateway_unavailable(format!(
            "vision api error {}: {}",
            status.code, status.message
        )));
    }

    Ok(first.label_annotations)
}

#[async_trait]
impl LabelDetector for VisionApiClient {
    async fn detect(&self, image: &[u8]) -> PantryResult<Vec<LabelAnnotation>> {
        let mut request = self.http.post(&self.endpoint).json(&self.request_body(image));
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "vision api request failed");
            PantryError::gateway_unavailable(format!("request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %body, "vision api returned error status");
            return Err(PantryError::gateway_unavailable(format!(
                "vision api returned {status}"
            )));
        }

        let parsed: AnnotateResponse = response.json().await.map_err(|e| {
            PantryError::gateway_unavailable(format!("unreadable vision api response: {e}"))
        })?;

        let labels = first_entry_labels(parsed)?;
        debug!(count = labels.len(), "vision api returned labels");
        Ok(labels)
    }
}
