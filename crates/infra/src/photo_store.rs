//! Blob storage interface for item photos.
//!
//! The ledger only needs a retrievable reference back from an upload; how the
//! bytes are stored is up to the provider behind this trait.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use pantry_core::{ItemName, PantryError, PantryResult, PhotoRef};

/// Storage key used for an item's photo.
pub fn photo_key(name: &ItemName) -> String {
    format!("item-images/{}", name)
}

#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Store `bytes` under `key`, replacing any previous object, and return a
    /// reference the UI can load the image from.
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> PantryResult<PhotoRef>;
}

#[async_trait]
impl<P> PhotoStore for Arc<P>
where
    P: PhotoStore + ?Sized,
{
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> PantryResult<PhotoRef> {
        (**self).upload(key, bytes, content_type).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPhoto {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// In-memory photo store for tests/dev.
///
/// References are `<base_url>/<key>`.
#[derive(Debug)]
pub struct InMemoryPhotoStore {
    base_url: String,
    objects: RwLock<HashMap<String, StoredPhoto>>,
}

impl InMemoryPhotoStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    pub fn object(&self, key: &str) -> Option<StoredPhoto> {
        self.objects.read().ok()?.get(key).cloned()
    }
}

#[async_trait]
impl PhotoStore for InMemoryPhotoStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> PantryResult<PhotoRef> {
        if bytes.is_empty() {
            return Err(PantryError::invalid_argument("photo upload is empty"));
        }

        let mut objects = self
            .objects
            .write()
            .map_err(|_| PantryError::store_unavailable("photo store lock poisoned"))?;
        objects.insert(
            key.to_string(),
            StoredPhoto {
                content_type: content_type.to_string(),
                bytes,
            },
        );

        PhotoRef::parse(format!("{}/{}", self.base_url, key))
    }
}
