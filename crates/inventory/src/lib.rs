//! Pantry stock domain.
//!
//! This crate contains the business rules for stock lines, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod item;
pub mod search;

pub use item::{RemoveOutcome, StockDelta, StockItem, apply_add, apply_remove};
pub use search::filter_by_term;
