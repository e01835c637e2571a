//! Infrastructure layer: ledger storage, external recognition API, config.
//!
//! Domain rules live in `pantry-inventory`; this crate wires them to IO.

pub mod config;
pub mod intake;
pub mod keyed_lock;
pub mod ledger_store;
pub mod photo_store;
pub mod recognition;
pub mod stock_ledger;

pub use intake::{IntakeOrchestrator, IntakeReceipt};
pub use ledger_store::{InMemoryLedgerStore, LedgerStore, PostgresLedgerStore};
pub use photo_store::{InMemoryPhotoStore, PhotoStore};
pub use recognition::{LabelAnnotation, LabelDetector, RecognitionGateway, VisionApiClient};
pub use stock_ledger::StockLedgerService;
