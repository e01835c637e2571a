//! Stock ledger service: the only writer of the ledger store.
//!
//! ```text
//! add/remove/attach/detach(name)
//!   ↓
//! 1. Validate name + delta (InvalidArgument)
//!   ↓
//! 2. Acquire the per-name lock
//!   ↓
//! 3. Read current record
//!   ↓
//! 4. Decide the new record (pure, `pantry-inventory`)
//!   ↓
//! 5. Put or delete, release the lock
//! ```
//!
//! Holding the per-name lock across steps 3-5 closes the lost-update race
//! between concurrent increments of the same item.

use chrono::Utc;
use tracing::info;

use pantry_core::{ItemName, PantryError, PantryResult, PhotoRef};
use pantry_inventory::{RemoveOutcome, StockDelta, StockItem, apply_add, apply_remove, filter_by_term};

use crate::keyed_lock::KeyedLocks;
use crate::ledger_store::LedgerStore;
use crate::photo_store::{PhotoStore, photo_key};

pub struct StockLedgerService<S> {
    store: S,
    locks: KeyedLocks,
}

impl<S> StockLedgerService<S>
where
    S: LedgerStore,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: KeyedLocks::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Add `delta` units to `name`, creating the line if needed.
    ///
    /// Returns the resulting quantity.
    pub async fn add_quantity(&self, name: &str, delta: u64) -> PantryResult<u64> {
        let name = ItemName::parse(name)?;
        let delta = StockDelta::new(delta)?;

        let _guard = self.locks.lock(name.as_str()).await;
        let current = self.store.get(&name).await?;
        let next = apply_add(current.as_ref(), &name, delta, Utc::now())?;
        let quantity = next.quantity();
        self.store.put(next).await?;

        info!(item = %name, delta = delta.get(), quantity, "stock added");
        Ok(quantity)
    }

    /// Remove up to `delta` units from `name`.
    ///
    /// A missing item is a no-op. Reaching zero deletes the record. Returns the
    /// resulting quantity (0 when deleted or absent).
    pub async fn remove_quantity(&self, name: &str, delta: u64) -> PantryResult<u64> {
        let name = ItemName::parse(name)?;
        let delta = StockDelta::new(delta)?;

        let _guard = self.locks.lock(name.as_str()).await;
        let current = self.store.get(&name).await?;
        let outcome = apply_remove(current.as_ref(), delta, Utc::now());
        let quantity = outcome.resulting_quantity();

        match outcome {
            RemoveOutcome::Absent => {}
            RemoveOutcome::Deleted => {
                self.store.delete(&name).await?;
                info!(item = %name, "stock line deleted");
            }
            RemoveOutcome::Updated(item) => {
                self.store.put(item).await?;
                info!(item = %name, delta = delta.get(), quantity, "stock removed");
            }
        }

        Ok(quantity)
    }

    /// Set the photo reference of an existing item. Quantity is untouched.
    pub async fn attach_photo(&self, name: &str, photo_ref: &str) -> PantryResult<StockItem> {
        let photo_ref = PhotoRef::parse(photo_ref)?;
        self.set_photo(name, Some(photo_ref)).await
    }

    /// Clear the photo reference of an existing item. The item is kept.
    pub async fn detach_photo(&self, name: &str) -> PantryResult<StockItem> {
        self.set_photo(name, None).await
    }

    /// Upload `bytes` through `photos` and attach the returned reference.
    ///
    /// The item must already exist; nothing is uploaded otherwise.
    pub async fn upload_photo<P>(
        &self,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
        photos: &P,
    ) -> PantryResult<StockItem>
    where
        P: PhotoStore + ?Sized,
    {
        let name = ItemName::parse(name)?;

        let _guard = self.locks.lock(name.as_str()).await;
        let current = self.require(&name).await?;
        let photo_ref = photos.upload(&photo_key(&name), bytes, content_type).await?;
        let next = current.with_photo(Some(photo_ref), Utc::now());
        self.store.put(next.clone()).await?;

        info!(item = %name, "photo uploaded");
        Ok(next)
    }

    pub async fn get(&self, name: &str) -> PantryResult<Option<StockItem>> {
        let name = ItemName::parse(name)?;
        self.store.get(&name).await
    }

    pub async fn list(&self) -> PantryResult<Vec<StockItem>> {
        self.store.list().await
    }

    /// Items whose name contains `term` (case-insensitive), in `list()` order.
    pub async fn search(&self, term: &str) -> PantryResult<Vec<StockItem>> {
        let items = self.store.list().await?;
        Ok(filter_by_term(items, term))
    }

    async fn set_photo(&self, name: &str, photo_ref: Option<PhotoRef>) -> PantryResult<StockItem> {
        let name = ItemName::parse(name)?;

        let _guard = self.locks.lock(name.as_str()).await;
        let current = self.require(&name).await?;
        let attached = photo_ref.is_some();
        let next = current.with_photo(photo_ref, Utc::now());
        self.store.put(next.clone()).await?;

        info!(item = %name, attached, "photo reference updated");
        Ok(next)
    }

    async fn require(&self, name: &ItemName) -> PantryResult<StockItem> {
        self.store
            .get(name)
            .await?
            .ok_or_else(|| PantryError::not_found(name.as_str()))
    }
}
