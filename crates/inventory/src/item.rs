use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pantry_core::{Entity, ItemName, PantryError, PantryResult, PhotoRef};

/// Positive quantity change applied by add/remove.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StockDelta(u64);

impl StockDelta {
    /// The implicit delta of a single add/remove (one unit).
    pub const ONE: StockDelta = StockDelta(1);

    pub fn new(value: u64) -> PantryResult<Self> {
        if value == 0 {
            return Err(PantryError::invalid_argument("delta must be positive"));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// One tracked inventory line.
///
/// Persisted items always hold `quantity > 0`; a line that would drop to zero
/// is deleted instead (see [`apply_remove`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    name: ItemName,
    quantity: u64,
    photo_ref: Option<PhotoRef>,
    updated_at: DateTime<Utc>,
}

impl StockItem {
    /// Rebuild an item from a stored record.
    pub fn restore(
        name: ItemName,
        quantity: u64,
        photo_ref: Option<PhotoRef>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name,
            quantity,
            photo_ref,
            updated_at,
        }
    }

    pub fn name(&self) -> &ItemName {
        &self.name
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn photo_ref(&self) -> Option<&PhotoRef> {
        self.photo_ref.as_ref()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace the photo reference; quantity is left untouched.
    pub fn with_photo(&self, photo_ref: Option<PhotoRef>, at: DateTime<Utc>) -> Self {
        Self {
            name: self.name.clone(),
            quantity: self.quantity,
            photo_ref,
            updated_at: at,
        }
    }
}

impl Entity for StockItem {
    type Id = ItemName;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}

/// Decide the record that results from adding `delta` units.
///
/// An absent item is created with `quantity = delta` and no photo.
pub fn apply_add(
    current: Option<&StockItem>,
    name: &ItemName,
    delta: StockDelta,
    at: DateTime<Utc>,
) -> PantryResult<StockItem> {
    match current {
        None => Ok(StockItem {
            name: name.clone(),
            quantity: delta.get(),
            photo_ref: None,
            updated_at: at,
        }),
        Some(item) => {
            let quantity = item
                .quantity
                .checked_add(delta.get())
                .ok_or_else(|| PantryError::invalid_argument("quantity overflow"))?;
            Ok(StockItem {
                name: item.name.clone(),
                quantity,
                photo_ref: item.photo_ref.clone(),
                updated_at: at,
            })
        }
    }
}

/// Outcome of removing units from a (possibly absent) item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Nothing stored under the name; removal is a no-op.
    Absent,
    /// Quantity reached zero; the record must be deleted.
    Deleted,
    /// Quantity is still positive; the record must be overwritten.
    Updated(StockItem),
}

impl RemoveOutcome {
    /// Quantity left after the removal (0 when deleted or absent).
    pub fn resulting_quantity(&self) -> u64 {
        match self {
            RemoveOutcome::Absent | RemoveOutcome::Deleted => 0,
            RemoveOutcome::Updated(item) => item.quantity,
        }
    }
}

/// Decide what removing `delta` units does, saturating at zero.
pub fn apply_remove(
    current: Option<&StockItem>,
    delta: StockDelta,
    at: DateTime<Utc>,
) -> RemoveOutcome {
    let Some(item) = current else {
        return RemoveOutcome::Absent;
    };

    match item.quantity.saturating_sub(delta.get()) {
        0 => RemoveOutcome::Deleted,
        quantity => RemoveOutcome::Updated(StockItem {
            name: item.name.clone(),
            quantity,
            photo_ref: item.photo_ref.clone(),
            updated_at: at,
        }),
    }
}
