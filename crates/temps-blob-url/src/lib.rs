//! temps-blob-url: blob handles with revocable reference URLs
//!
//! A [`BlobHandle`] owns one [`Blob`] and lazily materializes a `blob:` URL
//! for it through an [`ObjectUrlRegistry`]. The URL is reused until the
//! content changes or the handle is disposed or dropped, at which point it
//! is revoked so the registry's table does not grow unbounded.
//!
//! [`MemoryRegistry`] keeps the URL table in process. On `wasm32` the
//! `wasm` module binds handles to the browser's `URL.createObjectURL`.

pub mod blob;
pub mod config;
pub mod error;
pub mod handle;
pub mod registry;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use blob::{Blob, BlobOptions, BlobPart, Endings};
pub use config::{RegistryConfig, RegistryInputConfig};
pub use error::BlobUrlError;
pub use handle::{BlobHandle, HandleState};
pub use registry::{MemoryRegistry, ObjectUrlRegistry};
#[cfg(target_arch = "wasm32")]
pub use wasm::{BrowserRegistry, JsBlob, JsBlobHandle};
