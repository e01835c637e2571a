//! Error taxonomy shared by the ledger, the recognition gateway and the API.

use thiserror::Error;

/// Result type used across the pantry crates.
pub type PantryResult<T> = Result<T, PantryError>;

/// Pantry-level error.
///
/// Caller mistakes (`InvalidArgument`, `InvalidImage`, `NotFound`) are
/// deterministic and never retried. `NotRecognized` is a successful call that
/// produced no usable label. The two `*Unavailable` variants are external
/// dependency failures and are safe to retry with backoff.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PantryError {
    /// Bad caller input (empty name, non-positive delta, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The payload handed to the recognition gateway is not image data.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Operation on a stock item that does not exist.
    #[error("item not found: {0}")]
    NotFound(String),

    /// The label-detection API answered but returned no usable label.
    #[error("image not recognized")]
    NotRecognized,

    /// The label-detection API could not be reached, rejected our credentials,
    /// or did not answer in time.
    #[error("recognition gateway unavailable: {0}")]
    GatewayUnavailable(String),

    /// The ledger store could not be reached or failed a read/write.
    #[error("ledger store unavailable: {0}")]
    StoreUnavailable(String),
}

impl PantryError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImage(msg.into())
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn gateway_unavailable(msg: impl Into<String>) -> Self {
        Self::GatewayUnavailable(msg.into())
    }

    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        Self::StoreUnavailable(msg.into())
    }

    /// Whether a caller may retry the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PantryError::GatewayUnavailable(_) | PantryError::StoreUnavailable(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_dependency_failures_are_retryable() {
        assert!(PantryError::gateway_unavailable("timeout").is_retryable());
        assert!(PantryError::store_unavailable("pool closed").is_retryable());

        assert!(!PantryError::invalid_argument("empty").is_retryable());
        assert!(!PantryError::invalid_image("empty").is_retryable());
        assert!(!PantryError::not_found("apple").is_retryable());
        assert!(!PantryError::NotRecognized.is_retryable());
    }

    #[test]
    fn display_includes_context() {
        let err = PantryError::not_found("apple");
        assert_eq!(err.to_string(), "item not found: apple");
    }
}
