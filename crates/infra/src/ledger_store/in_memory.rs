use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use pantry_core::{Entity, ItemName, PantryError, PantryResult};
use pantry_inventory::StockItem;

use super::r#trait::LedgerStore;

/// In-memory ledger store.
///
/// Intended for tests/dev. `list()` returns items in name order.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    items: RwLock<BTreeMap<ItemName, StockItem>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> PantryError {
    PantryError::store_unavailable("lock poisoned")
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn get(&self, name: &ItemName) -> PantryResult<Option<StockItem>> {
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(items.get(name).cloned())
    }

    async fn put(&self, item: StockItem) -> PantryResult<()> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        items.insert(item.id().clone(), item);
        Ok(())
    }

    async fn delete(&self, name: &ItemName) -> PantryResult<()> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        items.remove(name);
        Ok(())
    }

    async fn list(&self) -> PantryResult<Vec<StockItem>> {
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(items.values().cloned().collect())
    }
}
