//! Capture intake: recognize a photo, then count one more of that item.
//!
//! This is the only place recognition and ledger mutation are composed. Each
//! successful call increments the ledger exactly once; any recognition failure
//! leaves the ledger untouched. Retrying is left to the caller.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use pantry_core::PantryResult;

use crate::ledger_store::LedgerStore;
use crate::recognition::{LabelDetector, RecognitionGateway};
use crate::stock_ledger::StockLedgerService;

/// Result of a successful intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntakeReceipt {
    pub item: String,
    pub quantity: u64,
}

pub struct IntakeOrchestrator<S, D> {
    ledger: Arc<StockLedgerService<S>>,
    gateway: Arc<RecognitionGateway<D>>,
}

impl<S, D> Clone for IntakeOrchestrator<S, D> {
    fn clone(&self) -> Self {
        Self {
            ledger: self.ledger.clone(),
            gateway: self.gateway.clone(),
        }
    }
}

impl<S, D> IntakeOrchestrator<S, D>
where
    S: LedgerStore,
    D: LabelDetector,
{
    pub fn new(ledger: Arc<StockLedgerService<S>>, gateway: Arc<RecognitionGateway<D>>) -> Self {
        Self { ledger, gateway }
    }

    pub async fn capture_and_intake(&self, image: &[u8]) -> PantryResult<IntakeReceipt> {
        let label = self.gateway.recognize(image).await.inspect_err(|e| {
            warn!(error = %e, "intake aborted before ledger update");
        })?;

        let quantity = self.ledger.add_quantity(&label, 1).await?;
        info!(item = %label, quantity, "intake recorded");

        Ok(IntakeReceipt {
            item: label,
            quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use pantry_core::PantryError;

    use crate::ledger_store::InMemoryLedgerStore;
    use crate::recognition::LabelAnnotation;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    struct FixedDetector(PantryResult<Vec<LabelAnnotation>>);

    #[async_trait]
    impl LabelDetector for FixedDetector {
        async fn detect(&self, _image: &[u8]) -> PantryResult<Vec<LabelAnnotation>> {
            self.0.clone()
        }
    }

    fn orchestrator(
        reply: PantryResult<Vec<LabelAnnotation>>,
    ) -> (
        IntakeOrchestrator<InMemoryLedgerStore, FixedDetector>,
        Arc<StockLedgerService<InMemoryLedgerStore>>,
    ) {
        let ledger = Arc::new(StockLedgerService::new(InMemoryLedgerStore::new()));
        let gateway = Arc::new(RecognitionGateway::new(
            FixedDetector(reply),
            Duration::from_secs(1),
        ));
        (IntakeOrchestrator::new(ledger.clone(), gateway), ledger)
    }

    #[tokio::test]
    async fn recognized_capture_increments_by_one() {
        let (intake, ledger) = orchestrator(Ok(vec![LabelAnnotation::new("apple", 0.9)]));

        let first = intake.capture_and_intake(PNG).await.unwrap();
        assert_eq!(first, IntakeReceipt { item: "apple".into(), quantity: 1 });

        let second = intake.capture_and_intake(PNG).await.unwrap();
        assert_eq!(second.quantity, 2);
        assert_eq!(ledger.get("apple").await.unwrap().unwrap().quantity(), 2);
    }

    #[tokio::test]
    async fn not_recognized_leaves_ledger_unchanged() {
        let (intake, ledger) = orchestrator(Ok(vec![]));
        ledger.add_quantity("milk", 1).await.unwrap();
        let before = ledger.list().await.unwrap();

        let err = intake.capture_and_intake(PNG).await.unwrap_err();
        assert_eq!(err, PantryError::NotRecognized);
        assert_eq!(ledger.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn gateway_failure_leaves_ledger_unchanged() {
        let (intake, ledger) = orchestrator(Err(PantryError::gateway_unavailable("503")));

        let err = intake.capture_and_intake(PNG).await.unwrap_err();
        assert!(matches!(err, PantryError::GatewayUnavailable(_)));
        assert!(ledger.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_image_leaves_ledger_unchanged() {
        let (intake, ledger) = orchestrator(Ok(vec![LabelAnnotation::new("apple", 0.9)]));

        let err = intake.capture_and_intake(b"plain text").await.unwrap_err();
        assert!(matches!(err, PantryError::InvalidImage(_)));
        assert!(ledger.list().await.unwrap().is_empty());
    }
}
