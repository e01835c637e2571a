//! `pantry-core`: shared building blocks for the pantry stock ledger.
//!
//! This crate contains **pure** primitives (no IO): the error taxonomy and the
//! validated value objects every other crate speaks in.

pub mod entity;
pub mod error;
pub mod value_object;

pub use entity::Entity;
pub use error::{PantryError, PantryResult};
pub use value_object::{ItemName, PhotoRef, ValueObject};
