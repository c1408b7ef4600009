//! Tables of live reference URLs
//!
//! A registry plays the part of the platform's object URL table: it hands
//! out `blob:` URLs for blobs and frees them again on revocation.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::blob::Blob;
use crate::config::RegistryConfig;
use crate::error::BlobUrlError;

/// Platform table of revocable reference URLs
pub trait ObjectUrlRegistry {
    /// Payload a URL dereferences to
    type Content;
    /// Failure raised by the platform primitives
    type Error;

    /// Register `content` and return a new URL that dereferences to it
    fn create_object_url(&self, content: &Self::Content) -> Result<String, Self::Error>;

    /// Free the table entry for `url`. Unknown URLs are ignored.
    fn revoke_object_url(&self, url: &str);

    /// Payload used when a URL is requested before any content was set
    fn empty_content(&self) -> Result<Self::Content, Self::Error>;
}

impl<R: ObjectUrlRegistry + ?Sized> ObjectUrlRegistry for &R {
    type Content = R::Content;
    type Error = R::Error;

    fn create_object_url(&self, content: &Self::Content) -> Result<String, Self::Error> {
        (**self).create_object_url(content)
    }

    fn revoke_object_url(&self, url: &str) {
        (**self).revoke_object_url(url)
    }

    fn empty_content(&self) -> Result<Self::Content, Self::Error> {
        (**self).empty_content()
    }
}

impl<R: ObjectUrlRegistry + ?Sized> ObjectUrlRegistry for Rc<R> {
    type Content = R::Content;
    type Error = R::Error;

    fn create_object_url(&self, content: &Self::Content) -> Result<String, Self::Error> {
        (**self).create_object_url(content)
    }

    fn revoke_object_url(&self, url: &str) {
        (**self).revoke_object_url(url)
    }

    fn empty_content(&self) -> Result<Self::Content, Self::Error> {
        (**self).empty_content()
    }
}

impl<R: ObjectUrlRegistry + ?Sized> ObjectUrlRegistry for Arc<R> {
    type Content = R::Content;
    type Error = R::Error;

    fn create_object_url(&self, content: &Self::Content) -> Result<String, Self::Error> {
        (**self).create_object_url(content)
    }

    fn revoke_object_url(&self, url: &str) {
        (**self).revoke_object_url(url)
    }

    fn empty_content(&self) -> Result<Self::Content, Self::Error> {
        (**self).empty_content()
    }
}

/// In-process URL table
///
/// Clones share the same table, so several handles can be bound to one
/// registry and observe each other's entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    config: Arc<RegistryConfig>,
    entries: Arc<Mutex<HashMap<String, Blob>>>,
}

impl MemoryRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config: Arc::new(config),
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Dereference a live URL
    pub fn resolve(&self, url: &str) -> Option<Blob> {
        self.entries().get(url).cloned()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries().contains_key(url)
    }

    /// Number of live URLs
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Blob>> {
        // Entries are plain data; a poisoned lock still holds a consistent map
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ObjectUrlRegistry for MemoryRegistry {
    type Content = Blob;
    type Error = BlobUrlError;

    fn create_object_url(&self, blob: &Blob) -> Result<String, BlobUrlError> {
        let mut entries = self.entries();

        if let Some(capacity) = self.config.capacity {
            if entries.len() >= capacity {
                warn!("Refusing reference URL: {} live URLs", entries.len());
                return Err(BlobUrlError::RegistryFull { capacity });
            }
        }

        let url = format!("{}{}", self.config.url_prefix(), Uuid::new_v4());
        debug!(
            "Created reference URL {} ({} bytes, {:?})",
            url,
            blob.size(),
            blob.content_type()
        );
        entries.insert(url.clone(), blob.clone());
        Ok(url)
    }

    fn revoke_object_url(&self, url: &str) {
        if self.entries().remove(url).is_some() {
            debug!("Revoked reference URL {}", url);
        }
    }

    fn empty_content(&self) -> Result<Blob, BlobUrlError> {
        Ok(Blob::empty())
    }
}
