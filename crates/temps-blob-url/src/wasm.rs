//! Browser bindings
//!
//! [`BrowserRegistry`] backs blob handles with the page's own object URL
//! table (`URL.createObjectURL` / `URL.revokeObjectURL`), and [`JsBlobHandle`]
//! exposes a handle to JavaScript as `BlobStore` with `setBlob`, `getURL`
//! and `dispose`.
//!
//! Content is a platform `Blob` built by the browser's own constructor, and
//! exceptions thrown by the platform reach the caller untouched.

use js_sys::{Array, Object, Reflect, Uint8Array};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;

use crate::blob::Blob;
use crate::error::BlobUrlError;
use crate::handle::BlobHandle;
use crate::registry::ObjectUrlRegistry;

#[wasm_bindgen]
extern "C" {
    /// A platform `Blob`
    #[wasm_bindgen(js_name = Blob)]
    #[derive(Debug, Clone)]
    pub type JsBlob;

    #[wasm_bindgen(constructor, js_class = "Blob", catch)]
    fn new(parts: &JsValue, options: &JsValue) -> Result<JsBlob, JsValue>;

    #[wasm_bindgen(method, getter, js_class = "Blob")]
    pub fn size(this: &JsBlob) -> f64;

    #[wasm_bindgen(method, getter, js_class = "Blob", js_name = "type")]
    pub fn content_type(this: &JsBlob) -> String;

    #[wasm_bindgen(js_namespace = URL, js_name = createObjectURL, catch)]
    fn url_create_object_url(blob: &JsBlob) -> Result<String, JsValue>;

    #[wasm_bindgen(js_namespace = URL, js_name = revokeObjectURL, catch)]
    fn url_revoke_object_url(url: &str) -> Result<(), JsValue>;
}

impl JsBlob {
    /// Run the platform constructor on `parts` and `options` as given
    pub fn from_js(parts: &JsValue, options: &JsValue) -> Result<JsBlob, JsValue> {
        JsBlob::new(parts, options)
    }

    /// Copy a [`Blob`] into a platform blob with the same bytes and type
    pub fn from_blob(blob: &Blob) -> Result<JsBlob, JsValue> {
        let parts = Array::of1(&Uint8Array::from(blob.bytes().as_ref()));
        let options = Object::new();
        Reflect::set(
            &options,
            &JsValue::from_str("type"),
            &JsValue::from_str(blob.content_type()),
        )?;
        JsBlob::new(&parts, &options)
    }
}

impl From<BlobUrlError> for JsValue {
    fn from(error: BlobUrlError) -> Self {
        js_sys::Error::new(&error.to_string()).into()
    }
}

/// Object URL table of the current page or worker
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserRegistry;

impl ObjectUrlRegistry for BrowserRegistry {
    type Content = JsBlob;
    type Error = JsValue;

    fn create_object_url(&self, blob: &JsBlob) -> Result<String, JsValue> {
        let url = url_create_object_url(blob)?;
        debug!("Created reference URL {}", url);
        Ok(url)
    }

    fn revoke_object_url(&self, url: &str) {
        match url_revoke_object_url(url) {
            Ok(()) => debug!("Revoked reference URL {}", url),
            Err(e) => warn!("Failed to revoke {}: {:?}", url, e),
        }
    }

    fn empty_content(&self) -> Result<JsBlob, JsValue> {
        JsBlob::new(&Array::new(), &JsValue::UNDEFINED)
    }
}

/// JavaScript-facing blob handle
#[wasm_bindgen(js_name = BlobStore)]
pub struct JsBlobHandle {
    handle: BlobHandle<BrowserRegistry>,
}

#[wasm_bindgen(js_class = "BlobStore")]
impl JsBlobHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsBlobHandle {
        JsBlobHandle {
            handle: BlobHandle::new(BrowserRegistry),
        }
    }

    /// Replace the stored blob with `new Blob(parts, options)`
    #[wasm_bindgen(js_name = setBlob)]
    pub fn set_blob(&mut self, parts: &JsValue, options: &JsValue) -> Result<(), JsValue> {
        let blob = JsBlob::from_js(parts, options)?;
        self.handle.set_blob(blob);
        Ok(())
    }

    /// The `blob:` URL for the stored blob, created on first call
    #[wasm_bindgen(js_name = getURL)]
    pub fn get_url(&mut self) -> Result<String, JsValue> {
        self.handle.reference_url().map(str::to_string)
    }

    pub fn dispose(&mut self) {
        self.handle.dispose();
    }
}

impl Default for JsBlobHandle {
    fn default() -> Self {
        Self::new()
    }
}
