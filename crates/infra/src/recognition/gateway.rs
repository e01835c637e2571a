use std::time::Duration;

use tracing::{info, warn};

use pantry_core::{PantryError, PantryResult};

use super::detector::{LabelAnnotation, LabelDetector};
use super::image::sniff_format;

pub const DEFAULT_RECOGNITION_TIMEOUT: Duration = Duration::from_secs(10);

/// Reduces an external label-detection call to one best-guess label.
///
/// - Non-image payloads fail with `InvalidImage` before any network call.
/// - The detector call is bounded by `timeout`; elapsing is `GatewayUnavailable`.
/// - No labels (or only blank ones) is `NotRecognized`, never a gateway error.
pub struct RecognitionGateway<D> {
    detector: D,
    timeout: Duration,
}

impl<D> RecognitionGateway<D>
where
    D: LabelDetector,
{
    pub fn new(detector: D, timeout: Duration) -> Self {
        Self { detector, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Return the highest-scoring label for `image`.
    pub async fn recognize(&self, image: &[u8]) -> PantryResult<String> {
        let format = sniff_format(image)?;

        let labels = match tokio::time::timeout(self.timeout, self.detector.detect(image)).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "label detection timed out");
                return Err(PantryError::gateway_unavailable(format!(
                    "label detection timed out after {:?}",
                    self.timeout
                )));
            }
        };

        let label = best_label(&labels).ok_or(PantryError::NotRecognized)?;
        info!(label = %label.description, score = label.score, format = format.mime_type(), "image recognized");
        Ok(label.description.clone())
    }
}

/// Highest score wins; ties go to the earlier label. Blank descriptions are skipped.
fn best_label(labels: &[LabelAnnotation]) -> Option<&LabelAnnotation> {
    labels
        .iter()
        .filter(|l| !l.description.trim().is_empty())
        .fold(None, |best: Option<&LabelAnnotation>, label| match best {
            Some(b) if b.score >= label.score => Some(b),
            _ => Some(label),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

    enum Reply {
        Labels(Vec<LabelAnnotation>),
        Fail,
        Hang,
    }

    struct StubDetector {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl StubDetector {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LabelDetector for StubDetector {
        async fn detect(&self, _image: &[u8]) -> PantryResult<Vec<LabelAnnotation>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Reply::Labels(labels) => Ok(labels.clone()),
                Reply::Fail => Err(PantryError::gateway_unavailable("401 unauthorized")),
                Reply::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(vec![])
                }
            }
        }
    }

    fn gateway(reply: Reply) -> RecognitionGateway<StubDetector> {
        RecognitionGateway::new(StubDetector::new(reply), Duration::from_millis(50))
    }

    #[tokio::test]
    async fn returns_the_labelled_item() {
        let gw = gateway(Reply::Labels(vec![LabelAnnotation::new("apple", 0.9)]));
        assert_eq!(gw.recognize(JPEG).await.unwrap(), "apple");
    }

    #[tokio::test]
    async fn picks_highest_score() {
        let gw = gateway(Reply::Labels(vec![
            LabelAnnotation::new("Fruit", 0.81),
            LabelAnnotation::new("Banana", 0.95),
            LabelAnnotation::new("Yellow", 0.95),
        ]));
        assert_eq!(gw.recognize(JPEG).await.unwrap(), "Banana");
    }

    #[tokio::test]
    async fn no_labels_is_not_recognized() {
        let gw = gateway(Reply::Labels(vec![]));
        assert_eq!(gw.recognize(JPEG).await.unwrap_err(), PantryError::NotRecognized);

        let blank = gateway(Reply::Labels(vec![LabelAnnotation::new("  ", 0.99)]));
        assert_eq!(blank.recognize(JPEG).await.unwrap_err(), PantryError::NotRecognized);
    }

    #[tokio::test]
    async fn detector_failure_is_not_downgraded() {
        let gw = gateway(Reply::Fail);
        assert!(matches!(
            gw.recognize(JPEG).await,
            Err(PantryError::GatewayUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn timeout_is_gateway_unavailable() {
        let gw = gateway(Reply::Hang);
        assert!(matches!(
            gw.recognize(JPEG).await,
            Err(PantryError::GatewayUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn non_image_is_rejected_before_network() {
        let gw = gateway(Reply::Labels(vec![LabelAnnotation::new("apple", 0.9)]));
        assert!(matches!(
            gw.recognize(b"definitely not an image").await,
            Err(PantryError::InvalidImage(_))
        ));
        assert_eq!(gw.detector.calls.load(Ordering::SeqCst), 0);
    }
}
