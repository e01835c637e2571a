use std::{sync::Arc, time::Duration};

use anyhow::Context;

use pantry_infra::{
    IntakeOrchestrator, InMemoryLedgerStore, LabelDetector, LedgerStore, PostgresLedgerStore,
    RecognitionGateway, StockLedgerService, VisionApiClient,
    config::{AppConfig, LedgerBackend},
};

pub type SharedLedgerStore = Arc<dyn LedgerStore>;
pub type SharedLabelDetector = Arc<dyn LabelDetector>;

/// Services shared by every request handler.
///
/// Clients are constructed once and injected here; handlers never reach for
/// process-global state.
pub struct AppServices {
    ledger: Arc<StockLedgerService<SharedLedgerStore>>,
    gateway: Arc<RecognitionGateway<SharedLabelDetector>>,
    intake: IntakeOrchestrator<SharedLedgerStore, SharedLabelDetector>,
}

impl AppServices {
    pub fn new(
        store: SharedLedgerStore,
        detector: SharedLabelDetector,
        recognition_timeout: Duration,
    ) -> Self {
        let ledger = Arc::new(StockLedgerService::new(store));
        let gateway = Arc::new(RecognitionGateway::new(detector, recognition_timeout));
        let intake = IntakeOrchestrator::new(ledger.clone(), gateway.clone());
        Self {
            ledger,
            gateway,
            intake,
        }
    }

    /// Ledger operations for in-process collaborators (the UI layer).
    pub fn ledger(&self) -> &StockLedgerService<SharedLedgerStore> {
        &self.ledger
    }

    pub fn gateway(&self) -> &RecognitionGateway<SharedLabelDetector> {
        &self.gateway
    }

    pub fn intake(&self) -> &IntakeOrchestrator<SharedLedgerStore, SharedLabelDetector> {
        &self.intake
    }
}

/// Wire services from configuration (in-memory or Postgres ledger, Vision client).
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let store: SharedLedgerStore = match &config.ledger {
        LedgerBackend::InMemory => {
            tracing::info!("using in-memory ledger store");
            Arc::new(InMemoryLedgerStore::new())
        }
        LedgerBackend::Postgres { database_url } => {
            tracing::info!("using postgres ledger store");
            let store = PostgresLedgerStore::connect(database_url)
                .await
                .context("failed to connect to the ledger database")?;
            Arc::new(store)
        }
    };

    let detector = VisionApiClient::new(
        config.vision.endpoint.clone(),
        config.vision.api_key.clone(),
        config.vision.max_results,
    )
    .context("failed to build the vision api client")?;

    if config.vision.api_key.is_none() {
        tracing::warn!("VISION_API_KEY not set; label detection requests will be unauthenticated");
    }

    Ok(AppServices::new(store, Arc::new(detector), config.vision.timeout))
}
