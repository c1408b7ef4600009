//! Blob handle with a lazily materialized reference URL
//!
//! A [`BlobHandle`] owns one blob and at most one live reference URL for
//! it. The URL is created on first request, reused afterwards, and revoked
//! when the content is replaced, when the handle is disposed, or when the
//! handle goes out of scope.

use tracing::debug;

use crate::blob::{Blob, BlobOptions, BlobPart};
use crate::error::BlobUrlError;
use crate::registry::ObjectUrlRegistry;

/// Lifecycle position of a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    /// No content has been assigned yet
    Empty,
    /// Content is stored but no reference URL exists
    ContentSet,
    /// A reference URL is live
    Materialized,
    /// Disposed; content and reference are released
    Disposed,
}

/// Owns one blob and its revocable reference URL
pub struct BlobHandle<R: ObjectUrlRegistry> {
    registry: R,
    content: Option<R::Content>,
    reference: Option<String>,
    disposed: bool,
}

impl<R: ObjectUrlRegistry> BlobHandle<R> {
    /// Create an empty handle bound to `registry`
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            content: None,
            reference: None,
            disposed: false,
        }
    }

    /// Store already built content, replacing what was there
    ///
    /// A reference URL materialized for the previous content is revoked, so
    /// the next [`reference_url`](Self::reference_url) reflects the new blob.
    pub fn set_blob(&mut self, content: R::Content) {
        self.revoke_reference();
        debug!("Blob handle content replaced");
        self.content = Some(content);
        self.disposed = false;
    }

    /// Return the reference URL, creating it on first use
    ///
    /// Repeated calls return the same string without registering new URLs.
    /// Without content the URL points at an empty blob. A disposed handle
    /// refuses until new content is set.
    pub fn reference_url(&mut self) -> Result<&str, R::Error>
    where
        R::Error: From<BlobUrlError>,
    {
        if self.disposed {
            return Err(BlobUrlError::Disposed.into());
        }

        let url = match self.reference.take() {
            Some(url) => url,
            None => match &self.content {
                Some(content) => self.registry.create_object_url(content)?,
                None => {
                    let empty = self.registry.empty_content()?;
                    self.registry.create_object_url(&empty)?
                }
            },
        };
        Ok(self.reference.insert(url).as_str())
    }

    /// Revoke the reference URL (if any) and release the stored content
    ///
    /// Calling this more than once is harmless.
    pub fn dispose(&mut self) {
        self.revoke_reference();
        self.content = None;
        self.disposed = true;
    }

    pub fn content(&self) -> Option<&R::Content> {
        self.content.as_ref()
    }

    /// The reference URL if one is live, without creating it
    pub fn cached_reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn is_materialized(&self) -> bool {
        self.reference.is_some()
    }

    pub fn state(&self) -> HandleState {
        if self.reference.is_some() {
            HandleState::Materialized
        } else if self.disposed {
            HandleState::Disposed
        } else if self.content.is_some() {
            HandleState::ContentSet
        } else {
            HandleState::Empty
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    fn revoke_reference(&mut self) {
        if let Some(url) = self.reference.take() {
            self.registry.revoke_object_url(&url);
        }
    }
}

impl<R: ObjectUrlRegistry<Content = Blob>> BlobHandle<R> {
    /// Build a blob from `parts` and store it, replacing prior content
    pub fn set_content<I, P>(&mut self, parts: I, options: &BlobOptions)
    where
        I: IntoIterator<Item = P>,
        P: Into<BlobPart>,
    {
        let blob = Blob::new(parts, options);
        debug!(
            "Blob handle building content ({} bytes, {:?})",
            blob.size(),
            blob.content_type()
        );
        self.set_blob(blob);
    }
}

impl<R: ObjectUrlRegistry> Drop for BlobHandle<R> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<R> std::fmt::Debug for BlobHandle<R>
where
    R: ObjectUrlRegistry,
    R::Content: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobHandle")
            .field("content", &self.content)
            .field("reference", &self.reference)
            .field("state", &self.state())
            .finish()
    }
}
