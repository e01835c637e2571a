//! Records that keep one identity while their attributes change.

/// Something stored and addressed by a stable key.
///
/// A stock line is keyed by its name; quantity, photo and timestamp may all
/// change under that key. Stores use `id()` to place a record.
pub trait Entity {
    type Id: Clone + Ord + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
