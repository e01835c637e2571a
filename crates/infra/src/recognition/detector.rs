use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use pantry_core::PantryResult;

/// One label returned by a label-detection API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelAnnotation {
    pub description: String,
    /// Confidence in `[0, 1]`; missing scores count as 0.
    #[serde(default)]
    pub score: f32,
}

impl LabelAnnotation {
    pub fn new(description: impl Into<String>, score: f32) -> Self {
        Self {
            description: description.into(),
            score,
        }
    }
}

/// Client of an external label-detection service.
///
/// Returns the labels of the first result entry, in whatever order the
/// provider sends them. Transport, auth and provider-side failures are
/// `PantryError::GatewayUnavailable`; an empty vector means "no labels".
#[async_trait]
pub trait LabelDetector: Send + Sync {
    async fn detect(&self, image: &[u8]) -> PantryResult<Vec<LabelAnnotation>>;
}

#[async_trait]
impl<D> LabelDetector for Arc<D>
where
    D: LabelDetector + ?Sized,
{
    async fn detect(&self, image: &[u8]) -> PantryResult<Vec<LabelAnnotation>> {
        (**self).detect(image).await
    }
}
