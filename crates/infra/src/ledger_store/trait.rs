use std::sync::Arc;

use async_trait::async_trait;

use pantry_core::{ItemName, PantryResult};
use pantry_inventory::StockItem;

/// Keyed storage for stock lines.
///
/// Implementations must be read-after-write consistent: a `get` issued after a
/// completed `put`/`delete` observes it. Connectivity failures surface as
/// `PantryError::StoreUnavailable`; writes are never dropped silently.
///
/// The store does not serialize read-modify-write sequences. That is the job
/// of `StockLedgerService`, the only component allowed to write here.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn get(&self, name: &ItemName) -> PantryResult<Option<StockItem>>;

    /// Create or fully replace the record stored under `item.name()`.
    async fn put(&self, item: StockItem) -> PantryResult<()>;

    /// Remove the record; deleting an absent name is not an error.
    async fn delete(&self, name: &ItemName) -> PantryResult<()>;

    /// All stored items. Order is implementation-defined.
    async fn list(&self) -> PantryResult<Vec<StockItem>>;
}

#[async_trait]
impl<S> LedgerStore for Arc<S>
where
    S: LedgerStore + ?Sized,
{
    async fn get(&self, name: &ItemName) -> PantryResult<Option<StockItem>> {
        (**self).get(name).await
    }

    async fn put(&self, item: StockItem) -> PantryResult<()> {
        (**self).put(item).await
    }

    async fn delete(&self, name: &ItemName) -> PantryResult<()> {
        (**self).delete(name).await
    }

    async fn list(&self) -> PantryResult<Vec<StockItem>> {
        (**self).list().await
    }
}
